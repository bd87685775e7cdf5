//! Search tests against a file on disk.
//!
//! The fixture mirrors a small JPEG/EXIF header: `ff` markers at 0 and 2,
//! then two `ff 7f` runs deep in the maker-note data.

use std::io::Write;

use bingrok_core::config::DumpLayout;
use bingrok_core::present::format_hex_dump;
use bingrok_core::source::MockSourceBuilder;
use bingrok_core::{EndOfData, Error, Pattern, SearchRequest, SliceLength, SourceReader};
use tempfile::NamedTempFile;

const FIXTURE_LEN: usize = 1560;

fn fixture_bytes() -> Vec<u8> {
    MockSourceBuilder::new()
        .with_size(FIXTURE_LEN, 0)
        .write_bytes(
            0,
            &[
                0xff, 0xd8, 0xff, 0xe1, 0x80, 0xb0, 0x45, 0x78, 0x69, 0x66, 0x00, 0x00, 0x49,
                0x49, 0x2a, 0x00, 0x08, 0x00,
            ],
        )
        .write_bytes(
            1438,
            &[
                0xff, 0x7f, 0x0f, 0x00, 0x03, 0x00, 0x02, 0x00, 0x00, 0x00, 0x02, 0x00, 0xff,
                0xff, 0xfb, 0x01, 0x23, 0x00, 0x10, 0x00, 0x01, 0x00, 0x80, 0x00, 0x20, 0x01,
            ],
        )
        .write_bytes(
            1494,
            &[
                0xff, 0x7f, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x00, 0x00, 0xff, 0xff, 0x00,
                0x00, 0x10, 0x00,
            ],
        )
        .into_bytes()
}

fn fixture_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(&fixture_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn search(file: &NamedTempFile, tokens: &[&str], start: u64, skip: u64) -> bingrok_core::Result<u64> {
    let pattern = Pattern::from_hex_tokens(tokens)?;
    let request = SearchRequest::new(pattern).start_offset(start).skip_count(skip);
    SourceReader::open(file.path())?.search(&request)
}

#[test]
fn test_fixture_length() {
    let file = fixture_file();
    let reader = SourceReader::open(file.path()).unwrap();
    assert_eq!(reader.len(), FIXTURE_LEN as u64);
}

#[test]
fn test_first_byte_match() {
    let file = fixture_file();
    assert_eq!(search(&file, &["ff"], 0, 0).unwrap(), 0);
}

#[test]
fn test_start_offset_and_skip_agree() {
    let file = fixture_file();
    assert_eq!(search(&file, &["ff"], 1, 0).unwrap(), 2);
    assert_eq!(search(&file, &["ff"], 0, 1).unwrap(), 2);
    assert_eq!(search(&file, &["ff"], 0, 2).unwrap(), 1438);
}

#[test]
fn test_two_byte_pattern_matches() {
    let file = fixture_file();
    assert_eq!(search(&file, &["ff", "7f"], 0, 0).unwrap(), 1438);
    assert_eq!(search(&file, &["ff", "7f"], 0, 1).unwrap(), 1494);
}

#[test]
fn test_three_byte_pattern() {
    let file = fixture_file();
    assert_eq!(search(&file, &["02", "00", "ff"], 0, 0).unwrap(), 1448);
}

#[test]
fn test_third_match_not_found() {
    let file = fixture_file();
    let err = search(&file, &["ff", "7f"], 0, 2).unwrap_err();
    assert!(err.is_end_of_data());
}

#[test]
fn test_start_offset_past_end() {
    let file = fixture_file();
    let err = search(&file, &["ff"], FIXTURE_LEN as u64, 0).unwrap_err();
    assert!(matches!(
        err,
        Error::EndOfData(EndOfData::NotEnoughMatches { .. })
    ));
}

#[test]
fn test_skip_count_matches_repeated_search() {
    // Searching from one past each match walks the same sequence as skip-count.
    let file = fixture_file();
    let mut start = 0;
    for skip in 0..6 {
        let direct = search(&file, &["ff"], 0, skip).unwrap();
        let stepped = search(&file, &["ff"], start, 0).unwrap();
        assert_eq!(direct, stepped, "skip {}", skip);
        start = stepped + 1;
    }
}

#[test]
fn test_match_window_dump() {
    let file = fixture_file();
    let mut reader = SourceReader::open(file.path()).unwrap();
    let pattern = Pattern::from_hex_tokens(&["ff", "7f"]).unwrap();
    let offset = reader.search(&SearchRequest::new(pattern).skip_count(1)).unwrap();

    let window = reader.read_slice(offset, SliceLength::Explicit(16)).unwrap();
    assert_eq!(
        format_hex_dump(offset, &window, &DumpLayout::default()),
        "000005d6  ff 7f ff ff ff ff ff ff  00 00 ff ff 00 00 10 00\n"
    );
}

#[test]
fn test_max_bytes_cuts_off_later_matches() {
    let file = fixture_file();
    let pattern = Pattern::from_hex_tokens(&["ff", "7f"]).unwrap();
    let request = SearchRequest::new(pattern).max_bytes(Some(1439));
    let err = SourceReader::open(file.path())
        .unwrap()
        .search(&request)
        .unwrap_err();
    assert!(err.is_end_of_data());
}

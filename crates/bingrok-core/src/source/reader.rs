use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use tracing::debug;

use crate::diagnostics::{Diagnostics, NoDiagnostics};
use crate::error::Result;
use crate::search::{self, SearchRequest};
use crate::unpack::FormatDescriptor;

const MAX_PREALLOCATION: usize = 64 * 1024;

/// How many bytes a slice read should request.
#[derive(Debug, Clone, Copy)]
pub enum SliceLength<'a> {
    Explicit(usize),
    /// The total size of a descriptor's parts.
    Format(&'a FormatDescriptor),
}

impl SliceLength<'_> {
    pub fn resolve(&self) -> usize {
        match self {
            SliceLength::Explicit(length) => *length,
            SliceLength::Format(descriptor) => descriptor.size(),
        }
    }
}

/// Seek to `offset` from the start of `source` and read up to `length` bytes.
///
/// A short read near the end of the source is not an error; callers check
/// the returned length before unpacking.
pub fn read_slice<R: Read + Seek>(source: &mut R, offset: u64, length: usize) -> Result<Vec<u8>> {
    source.seek(SeekFrom::Start(offset))?;

    let mut buffer = Vec::with_capacity(length.min(MAX_PREALLOCATION));
    source.by_ref().take(length as u64).read_to_end(&mut buffer)?;
    Ok(buffer)
}

/// Exclusive owner of an open source.
///
/// Dropping the reader releases the underlying handle.
#[derive(Debug)]
pub struct SourceReader<R> {
    inner: R,
    len: u64,
}

impl SourceReader<BufReader<File>> {
    /// Open a file read-only.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let len = file.metadata()?.len();
        debug!("Opened {:?} ({} bytes)", path, len);
        Ok(Self {
            inner: BufReader::new(file),
            len,
        })
    }
}

impl<R: Read + Seek> SourceReader<R> {
    /// Wrap any seekable source, e.g. a `Cursor` in tests.
    pub fn new(mut inner: R) -> Result<Self> {
        let len = inner.seek(SeekFrom::End(0))?;
        inner.seek(SeekFrom::Start(0))?;
        Ok(Self { inner, len })
    }

    pub(crate) fn from_parts(inner: R, len: u64) -> Self {
        Self { inner, len }
    }

    /// Total size of the source in bytes.
    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn read_slice(&mut self, offset: u64, length: SliceLength<'_>) -> Result<Vec<u8>> {
        self.read_slice_with(offset, length, &mut NoDiagnostics)
    }

    pub fn read_slice_with<D: Diagnostics>(
        &mut self,
        offset: u64,
        length: SliceLength<'_>,
        diagnostics: &mut D,
    ) -> Result<Vec<u8>> {
        let requested = length.resolve();
        debug!("Getting slice at offset ({}).", offset);

        let bytes = read_slice(&mut self.inner, offset, requested)?;
        diagnostics.slice_read(offset, requested, bytes.len());
        Ok(bytes)
    }

    pub fn search(&mut self, request: &SearchRequest) -> Result<u64> {
        self.search_with(request, &mut NoDiagnostics)
    }

    pub fn search_with<D: Diagnostics>(
        &mut self,
        request: &SearchRequest,
        diagnostics: &mut D,
    ) -> Result<u64> {
        search::search(&mut self.inner, self.len, request, diagnostics)
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::Pattern;
    use std::io::Cursor;

    #[derive(Default)]
    struct SliceLog(Vec<(u64, usize, usize)>);

    impl Diagnostics for SliceLog {
        fn slice_read(&mut self, offset: u64, requested: usize, read: usize) {
            self.0.push((offset, requested, read));
        }
    }

    #[test]
    fn test_read_slice_explicit() {
        let mut reader = SourceReader::new(Cursor::new((0u8..32).collect::<Vec<_>>())).unwrap();
        let bytes = reader.read_slice(4, SliceLength::Explicit(3)).unwrap();
        assert_eq!(bytes, vec![4, 5, 6]);
    }

    #[test]
    fn test_read_slice_from_format() {
        let descriptor = FormatDescriptor::parse("<I:2c").unwrap();
        let mut reader = SourceReader::new(Cursor::new((0u8..32).collect::<Vec<_>>())).unwrap();
        let bytes = reader.read_slice(10, SliceLength::Format(&descriptor)).unwrap();
        assert_eq!(bytes, vec![10, 11, 12, 13, 14, 15]);
    }

    #[test]
    fn test_short_read_at_end() {
        let mut reader = SourceReader::new(Cursor::new(vec![1, 2, 3])).unwrap();
        let bytes = reader.read_slice(1, SliceLength::Explicit(16)).unwrap();
        assert_eq!(bytes, vec![2, 3]);

        let bytes = reader.read_slice(10, SliceLength::Explicit(4)).unwrap();
        assert!(bytes.is_empty());
    }

    #[test]
    fn test_slice_diagnostics() {
        let mut reader = SourceReader::new(Cursor::new(vec![1, 2, 3])).unwrap();
        let mut log = SliceLog::default();
        reader
            .read_slice_with(2, SliceLength::Explicit(4), &mut log)
            .unwrap();
        assert_eq!(log.0, vec![(2, 4, 1)]);
    }

    #[test]
    fn test_len_and_search() {
        let mut reader = SourceReader::new(Cursor::new(vec![0, 0xff, 0, 0xff])).unwrap();
        assert_eq!(reader.len(), 4);
        assert!(!reader.is_empty());

        let pattern = Pattern::new(vec![0xff]).unwrap();
        let request = SearchRequest::new(pattern).skip_count(1);
        assert_eq!(reader.search(&request).unwrap(), 3);
    }

    #[test]
    fn test_read_after_search_reseeks() {
        let mut reader = SourceReader::new(Cursor::new(vec![9, 8, 7, 6])).unwrap();
        let pattern = Pattern::new(vec![7]).unwrap();
        let found = reader.search(&SearchRequest::new(pattern)).unwrap();
        let bytes = reader.read_slice(found, SliceLength::Explicit(2)).unwrap();
        assert_eq!(bytes, vec![7, 6]);
    }
}

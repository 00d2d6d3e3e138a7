//! Full in-memory extraction of large objects.
//!
//! The content is read in one pass into a buffer sized to the LOB's declared
//! length. The stream is released on every exit path, and a failed release
//! is returned as an error even when the read itself succeeded.

use std::io::{self, Read};

use tracing::{trace, warn};

use crate::error::{Error, Result};
use crate::types::{LargeObject, LobStream};

/// Read a character LOB into a string.
///
/// A `None` handle yields `None` without opening a stream.
pub fn read_character_lob<L: LargeObject>(handle: Option<L>) -> Result<Option<String>> {
    read_character_lob_limited(handle, None)
}

/// Read a binary LOB into a byte vector.
///
/// A `None` handle yields `None` without opening a stream.
pub fn read_binary_lob<L: LargeObject>(handle: Option<L>) -> Result<Option<Vec<u8>>> {
    read_binary_lob_limited(handle, None)
}

pub(crate) fn read_character_lob_limited<L: LargeObject>(
    handle: Option<L>,
    limit: Option<u64>,
) -> Result<Option<String>> {
    let Some(handle) = handle else {
        return Ok(None);
    };

    let data = read_content(handle, limit)?;
    let text = String::from_utf8(data).map_err(|e| {
        Error::lob_read(
            "character LOB is not valid UTF-8",
            io::Error::new(io::ErrorKind::InvalidData, e),
        )
    })?;
    Ok(Some(text))
}

pub(crate) fn read_binary_lob_limited<L: LargeObject>(
    handle: Option<L>,
    limit: Option<u64>,
) -> Result<Option<Vec<u8>>> {
    match handle {
        Some(handle) => read_content(handle, limit).map(Some),
        None => Ok(None),
    }
}

fn read_content<L: LargeObject>(handle: L, limit: Option<u64>) -> Result<Vec<u8>> {
    let length = handle
        .length()
        .map_err(|e| Error::lob_read("failed to read LOB length", e))?;

    if let Some(limit) = limit {
        if length > limit {
            return Err(Error::LobTooLarge { length, limit });
        }
    }
    let size = usize::try_from(length).map_err(|_| Error::LobTooLarge {
        length,
        limit: usize::MAX as u64,
    })?;

    let stream = handle
        .open_stream()
        .map_err(|e| Error::lob_read("failed to open LOB stream", e))?;
    let mut guard = StreamGuard::new(stream);

    let mut buffer = vec![0u8; size];
    let read = guard.read_exact(&mut buffer);
    let released = guard.release();
    finish(read, released)?;

    trace!(bytes = size, "read LOB content");
    Ok(buffer)
}

/// Combine the read and release outcomes. A release failure always wins the
/// error slot but carries the read failure along.
fn finish(read: io::Result<()>, released: io::Result<()>) -> Result<()> {
    match (read, released) {
        (Ok(()), Ok(())) => Ok(()),
        (Err(read_error), Ok(())) => Err(Error::lob_read("failed to read LOB content", read_error)),
        (Ok(()), Err(source)) => Err(Error::LobRelease {
            source,
            read_error: None,
        }),
        (Err(read_error), Err(source)) => Err(Error::LobRelease {
            source,
            read_error: Some(read_error),
        }),
    }
}

/// Owns an open LOB stream until it is released.
///
/// [`StreamGuard::release`] reports the close result. If the guard is dropped
/// without being released (a panic while reading), the stream is closed in
/// `Drop` and a failure can only be logged.
struct StreamGuard<S: LobStream> {
    stream: Option<S>,
}

impl<S: LobStream> StreamGuard<S> {
    fn new(stream: S) -> Self {
        Self {
            stream: Some(stream),
        }
    }

    fn release(mut self) -> io::Result<()> {
        match self.stream.take() {
            Some(stream) => stream.close(),
            None => Ok(()),
        }
    }
}

impl<S: LobStream> Read for StreamGuard<S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.stream.as_mut() {
            Some(stream) => stream.read(buf),
            None => Err(io::Error::new(
                io::ErrorKind::Other,
                "LOB stream already released",
            )),
        }
    }
}

impl<S: LobStream> Drop for StreamGuard<S> {
    fn drop(&mut self) {
        if let Some(stream) = self.stream.take() {
            if let Err(e) = stream.close() {
                warn!(error = %e, "failed to release LOB stream during unwind");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MemoryLob;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Stream that counts releases and can fail on read or close.
    struct ProbeStream {
        data: io::Cursor<Vec<u8>>,
        fail_read: bool,
        fail_close: bool,
        closed: Rc<Cell<u32>>,
    }

    impl Read for ProbeStream {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.fail_read {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "read failed"));
            }
            self.data.read(buf)
        }
    }

    impl LobStream for ProbeStream {
        fn close(self) -> io::Result<()> {
            self.closed.set(self.closed.get() + 1);
            if self.fail_close {
                Err(io::Error::new(io::ErrorKind::Other, "close failed"))
            } else {
                Ok(())
            }
        }
    }

    struct ProbeLob {
        stream: ProbeStream,
        length: u64,
    }

    impl ProbeLob {
        fn new(data: &[u8], closed: Rc<Cell<u32>>) -> Self {
            Self {
                length: data.len() as u64,
                stream: ProbeStream {
                    data: io::Cursor::new(data.to_vec()),
                    fail_read: false,
                    fail_close: false,
                    closed,
                },
            }
        }
    }

    impl LargeObject for ProbeLob {
        type Stream = ProbeStream;

        fn length(&self) -> io::Result<u64> {
            Ok(self.length)
        }

        fn open_stream(self) -> io::Result<ProbeStream> {
            Ok(self.stream)
        }
    }

    #[test]
    fn test_read_binary_lob() {
        let data = read_binary_lob(Some(MemoryLob::new(vec![1u8, 2, 3]))).unwrap();
        assert_eq!(data, Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_read_character_lob() {
        let text = read_character_lob(Some(MemoryLob::from_text("h\u{e9}llo"))).unwrap();
        assert_eq!(text.as_deref(), Some("h\u{e9}llo"));
    }

    #[test]
    fn test_null_handle() {
        assert_eq!(read_binary_lob(None::<MemoryLob>).unwrap(), None);
        assert_eq!(read_character_lob(None::<MemoryLob>).unwrap(), None);
    }

    #[test]
    fn test_released_on_success() {
        let closed = Rc::new(Cell::new(0));
        let lob = ProbeLob::new(b"abc", closed.clone());
        assert_eq!(read_binary_lob(Some(lob)).unwrap(), Some(b"abc".to_vec()));
        assert_eq!(closed.get(), 1);
    }

    #[test]
    fn test_released_on_read_failure() {
        let closed = Rc::new(Cell::new(0));
        let mut lob = ProbeLob::new(b"abc", closed.clone());
        lob.stream.fail_read = true;

        let err = read_binary_lob(Some(lob)).unwrap_err();
        assert!(matches!(err, Error::LobRead { .. }));
        assert_eq!(closed.get(), 1);
    }

    #[test]
    fn test_released_on_utf8_failure() {
        let closed = Rc::new(Cell::new(0));
        let lob = ProbeLob::new(&[0xff, 0xfe], closed.clone());

        let err = read_character_lob(Some(lob)).unwrap_err();
        assert!(matches!(err, Error::LobRead { .. }));
        assert_eq!(closed.get(), 1);
    }

    #[test]
    fn test_release_failure_after_successful_read() {
        let closed = Rc::new(Cell::new(0));
        let mut lob = ProbeLob::new(b"abc", closed.clone());
        lob.stream.fail_close = true;

        let err = read_binary_lob(Some(lob)).unwrap_err();
        assert!(matches!(err, Error::LobRelease { read_error: None, .. }));
        assert_eq!(closed.get(), 1);
    }

    #[test]
    fn test_release_failure_keeps_read_failure() {
        let closed = Rc::new(Cell::new(0));
        let mut lob = ProbeLob::new(b"abc", closed.clone());
        lob.stream.fail_read = true;
        lob.stream.fail_close = true;

        let err = read_binary_lob(Some(lob)).unwrap_err();
        assert!(matches!(err, Error::LobRelease { read_error: Some(_), .. }));
    }

    #[test]
    fn test_short_stream_is_read_error() {
        let lob = MemoryLob::new(vec![1u8, 2]).with_declared_length(5);
        let err = read_binary_lob(Some(lob)).unwrap_err();
        match err {
            Error::LobRead { source, .. } => {
                assert_eq!(source.kind(), io::ErrorKind::UnexpectedEof)
            }
            other => panic!("Expected LobRead, got {:?}", other),
        }
    }

    #[test]
    fn test_limit() {
        let lob = MemoryLob::new(vec![0u8; 16]);
        let err = read_binary_lob_limited(Some(lob), Some(8)).unwrap_err();
        assert!(matches!(err, Error::LobTooLarge { length: 16, limit: 8 }));
    }
}

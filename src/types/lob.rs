//! LOB (Large Object) handles for CLOB, NCLOB, and BLOB columns.
//!
//! A cursor hands out a LOB column as a handle rather than inline data. The
//! handle reports the content length and opens a stream over the content
//! exactly once: [`LargeObject::open_stream`] consumes it.

use bytes::buf::Reader;
use bytes::{Buf, Bytes};
use std::io::{self, Read};

/// Stream over the content of a large object.
///
/// The stream must be released with [`LobStream::close`]; a failed release is
/// reported to the caller rather than dropped.
pub trait LobStream: Read {
    /// Release the stream and any resource behind it.
    fn close(self) -> io::Result<()>
    where
        Self: Sized;
}

/// Single-use handle to a large object.
pub trait LargeObject {
    /// Stream type produced by [`LargeObject::open_stream`].
    type Stream: LobStream;

    /// Content length in bytes.
    ///
    /// For character LOBs this is the length of the UTF-8 encoding.
    fn length(&self) -> io::Result<u64>;

    /// Open the content stream, consuming the handle.
    fn open_stream(self) -> io::Result<Self::Stream>;
}

/// Large object held in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryLob {
    /// LOB content.
    pub data: Bytes,
    /// Length reported by [`LargeObject::length`]; defaults to `data.len()`.
    pub declared_length: u64,
}

impl MemoryLob {
    /// Create a LOB over the given content.
    pub fn new(data: impl Into<Bytes>) -> Self {
        let data = data.into();
        Self {
            declared_length: data.len() as u64,
            data,
        }
    }

    /// Create a character LOB from text.
    pub fn from_text(text: &str) -> Self {
        Self::new(Bytes::copy_from_slice(text.as_bytes()))
    }

    /// Override the reported length.
    pub fn with_declared_length(mut self, length: u64) -> Self {
        self.declared_length = length;
        self
    }
}

impl LargeObject for MemoryLob {
    type Stream = MemoryLobStream;

    fn length(&self) -> io::Result<u64> {
        Ok(self.declared_length)
    }

    fn open_stream(self) -> io::Result<Self::Stream> {
        Ok(MemoryLobStream {
            reader: self.data.reader(),
        })
    }
}

/// Stream over a [`MemoryLob`].
#[derive(Debug)]
pub struct MemoryLobStream {
    reader: Reader<Bytes>,
}

impl Read for MemoryLobStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.read(buf)
    }
}

impl LobStream for MemoryLobStream {
    fn close(self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_lob_new() {
        let lob = MemoryLob::new(vec![1u8, 2, 3, 4]);
        assert_eq!(lob.length().unwrap(), 4);
    }

    #[test]
    fn test_memory_lob_text_length_is_utf8() {
        let lob = MemoryLob::from_text("h\u{e9}llo");
        assert_eq!(lob.length().unwrap(), 6);
    }

    #[test]
    fn test_memory_lob_stream() {
        let lob = MemoryLob::from_text("hello");
        let mut stream = lob.open_stream().unwrap();
        let mut out = String::new();
        stream.read_to_string(&mut out).unwrap();
        assert_eq!(out, "hello");
        stream.close().unwrap();
    }

    #[test]
    fn test_declared_length_override() {
        let lob = MemoryLob::new(vec![0u8; 3]).with_declared_length(10);
        assert_eq!(lob.length().unwrap(), 10);
    }
}

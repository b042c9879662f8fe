//! Buffer management for the frame reader and writer.

use crate::error::{Error, Result};

/// Decoded bytes waiting to be handed to the caller.
///
/// Unbounded: a caller reading a few bytes at a time lets it accumulate
/// whole blocks.
#[derive(Debug, Default)]
pub(crate) struct PendingBuffer {
    data: Vec<u8>,
    read_pos: usize,
}

impl PendingBuffer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Number of bytes available to read.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.data.len() - self.read_pos
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.read_pos >= self.data.len()
    }

    #[inline]
    pub(crate) fn readable(&self) -> &[u8] {
        &self.data[self.read_pos..]
    }

    /// Consume `n` bytes from the read position.
    #[inline]
    pub(crate) fn consume(&mut self, n: usize) {
        self.read_pos = (self.read_pos + n).min(self.data.len());
        if self.is_empty() {
            self.clear();
        }
    }

    pub(crate) fn clear(&mut self) {
        self.data.clear();
        self.read_pos = 0;
    }

    /// Appends decoded bytes after any still unread.
    pub(crate) fn extend(&mut self, bytes: &[u8]) {
        if self.read_pos > 0 {
            self.data.drain(..self.read_pos);
            self.read_pos = 0;
        }
        self.data.extend_from_slice(bytes);
    }

    /// Copies as many pending bytes as fit into `buf`.
    pub(crate) fn read(&mut self, buf: &mut [u8]) -> usize {
        let n = buf.len().min(self.len());
        buf[..n].copy_from_slice(&self.data[self.read_pos..self.read_pos + n]);
        self.consume(n);
        n
    }
}

/// A reusable working buffer that only grows, never past `limit`.
#[derive(Debug)]
pub(crate) struct ScratchBuffer {
    data: Vec<u8>,
    limit: usize,
}

impl ScratchBuffer {
    pub(crate) fn with_limit(limit: usize) -> Self {
        Self {
            data: Vec::new(),
            limit,
        }
    }

    /// Returns a `len`-byte window, growing the allocation if needed.
    pub(crate) fn get_mut(&mut self, len: usize) -> Result<&mut [u8]> {
        if len > self.limit {
            return Err(Error::block_too_large(len, self.limit));
        }
        if self.data.len() < len {
            self.data.resize(len, 0);
        }
        Ok(&mut self.data[..len])
    }

    #[inline]
    pub(crate) fn as_slice(&self, len: usize) -> &[u8] {
        &self.data[..len]
    }

    #[cfg(test)]
    pub(crate) fn capacity(&self) -> usize {
        self.data.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_read_and_consume() {
        let mut buf = PendingBuffer::new();
        buf.extend(b"Hello, World!");
        assert_eq!(buf.len(), 13);

        let mut out = [0u8; 7];
        assert_eq!(buf.read(&mut out), 7);
        assert_eq!(&out, b"Hello, ");
        assert_eq!(buf.readable(), b"World!");

        buf.extend(b"!!");
        assert_eq!(buf.readable(), b"World!!!");

        let mut out = [0u8; 64];
        assert_eq!(buf.read(&mut out), 8);
        assert!(buf.is_empty());
        assert_eq!(buf.read(&mut out), 0);
    }

    #[test]
    fn test_pending_consume_past_end() {
        let mut buf = PendingBuffer::new();
        buf.extend(b"abc");
        buf.consume(10);
        assert!(buf.is_empty());
        assert_eq!(buf.len(), 0);
    }

    #[test]
    fn test_scratch_grows_monotonically() {
        let mut scratch = ScratchBuffer::with_limit(16);
        assert_eq!(scratch.get_mut(8).unwrap().len(), 8);
        assert_eq!(scratch.capacity(), 8);
        assert_eq!(scratch.get_mut(4).unwrap().len(), 4);
        assert_eq!(scratch.capacity(), 8);
        assert_eq!(scratch.get_mut(16).unwrap().len(), 16);
        assert_eq!(scratch.capacity(), 16);
    }

    #[test]
    fn test_scratch_enforces_limit() {
        let mut scratch = ScratchBuffer::with_limit(16);
        assert!(matches!(
            scratch.get_mut(17),
            Err(Error::BlockTooLarge { len: 17, max: 16 })
        ));
        assert_eq!(scratch.capacity(), 0);
    }
}

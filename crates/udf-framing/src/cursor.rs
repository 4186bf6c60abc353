//! Bounded cursor over a byte slice.
//!
//! Every read is bounds-checked and fails with `TruncatedFrame` rather
//! than advancing past the end, so a failed parse never leaves the
//! position beyond the buffer.

use crate::error::FramingError;

/// Read cursor over a borrowed byte slice.
#[derive(Debug)]
pub struct ByteCursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Current offset from the start of the buffer.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left to read.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// The unread tail of the buffer. Does not advance the cursor.
    pub fn rest(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], FramingError> {
        if len > self.remaining() {
            return Err(FramingError::TruncatedFrame {
                needed: len,
                remaining: self.remaining(),
            });
        }
        let slice = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    pub fn read_u8(&mut self) -> Result<u8, FramingError> {
        Ok(self.take(1)?[0])
    }

    /// Read a 4-byte big-endian unsigned integer.
    pub fn read_u32_be(&mut self) -> Result<u32, FramingError> {
        let bytes = self.take(4)?;
        Ok(u32::from_be_bytes(bytes.try_into().expect("4 bytes")))
    }

    pub fn read_slice(&mut self, len: usize) -> Result<&'a [u8], FramingError> {
        self.take(len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_in_sequence() {
        let mut cursor = ByteCursor::new(&[0x01, 0x00, 0x00, 0x00, 0x05, 0xAA, 0xBB]);
        assert_eq!(cursor.read_u8().unwrap(), 0x01);
        assert_eq!(cursor.read_u32_be().unwrap(), 5);
        assert_eq!(cursor.read_slice(2).unwrap(), &[0xAA, 0xBB]);
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn rest_does_not_advance() {
        let mut cursor = ByteCursor::new(b"abcdef");
        cursor.read_slice(2).unwrap();
        assert_eq!(cursor.rest(), b"cdef");
        assert_eq!(cursor.position(), 2);
        assert_eq!(cursor.rest(), b"cdef");
    }

    #[test]
    fn truncated_read_reports_sizes() {
        let mut cursor = ByteCursor::new(&[0x01, 0x02]);
        cursor.read_u8().unwrap();
        let err = cursor.read_u32_be().unwrap_err();
        match err {
            FramingError::TruncatedFrame { needed, remaining } => {
                assert_eq!(needed, 4);
                assert_eq!(remaining, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn failed_read_does_not_advance() {
        let mut cursor = ByteCursor::new(&[0x01]);
        assert!(cursor.read_u32_be().is_err());
        assert_eq!(cursor.position(), 0);
        assert_eq!(cursor.read_u8().unwrap(), 0x01);
    }

    #[test]
    fn empty_buffer() {
        let mut cursor = ByteCursor::new(&[]);
        assert_eq!(cursor.remaining(), 0);
        assert!(cursor.read_u8().is_err());
    }
}

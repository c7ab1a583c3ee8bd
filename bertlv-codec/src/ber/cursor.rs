//! Forward-only byte cursor over a [`Bytes`] buffer
//!
//! A thin layer over [`bytes::Buf`] that checks the remaining count before
//! every read, so a short buffer turns into `None` instead of a panic.

use bytes::{Buf, Bytes};

#[derive(Debug, Clone)]
pub struct OctetCursor {
    buf: Bytes,
}

impl OctetCursor {
    pub fn new(buf: impl Into<Bytes>) -> Self {
        Self { buf: buf.into() }
    }

    /// Get remaining bytes
    pub fn remaining(&self) -> usize {
        self.buf.remaining()
    }

    /// Check if there is more data to decode
    pub fn has_remaining(&self) -> bool {
        self.buf.has_remaining()
    }

    /// Next byte without consuming it
    pub fn peek(&self) -> Option<u8> {
        self.buf.first().copied()
    }

    pub fn read_u8(&mut self) -> Option<u8> {
        if !self.buf.has_remaining() {
            return None;
        }
        Some(self.buf.get_u8())
    }

    /// Big-endian unsigned integer of 1 to 4 bytes
    pub fn read_uint(&mut self, width: usize) -> Option<u32> {
        if !(1..=4).contains(&width) || self.buf.remaining() < width {
            return None;
        }
        let value = match width {
            1 => u32::from(self.buf.get_u8()),
            2 => u32::from(self.buf.get_u16()),
            3 => self.buf.get_uint(3) as u32,
            _ => self.buf.get_u32(),
        };
        Some(value)
    }

    /// Exactly `count` bytes as a sub-buffer, or `None` if fewer remain
    pub fn read_bytes(&mut self, count: usize) -> Option<Bytes> {
        if self.buf.remaining() < count {
            return None;
        }
        Some(self.buf.copy_to_bytes(count))
    }

    /// Everything left, leaving the cursor empty
    pub fn read_remaining(&mut self) -> Bytes {
        let count = self.buf.remaining();
        self.buf.copy_to_bytes(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_uint_widths() {
        let mut cursor = OctetCursor::new(vec![0x01, 0x00, 0x02, 0x00, 0x00, 0x03, 0x00, 0x00, 0x00, 0x04]);
        assert_eq!(cursor.read_uint(1), Some(1));
        assert_eq!(cursor.read_uint(2), Some(2));
        assert_eq!(cursor.read_uint(3), Some(3));
        assert_eq!(cursor.read_uint(4), Some(4));
        assert!(!cursor.has_remaining());
        assert_eq!(cursor.read_uint(1), None);
    }

    #[test]
    fn test_short_reads() {
        let mut cursor = OctetCursor::new(vec![0xAA, 0xBB]);
        assert_eq!(cursor.peek(), Some(0xAA));
        assert_eq!(cursor.remaining(), 2);
        assert_eq!(cursor.read_bytes(3), None);
        assert_eq!(cursor.read_uint(4), None);
        assert_eq!(cursor.read_u8(), Some(0xAA));
        assert_eq!(cursor.read_remaining(), Bytes::from_static(&[0xBB]));
        assert_eq!(cursor.read_u8(), None);
        assert_eq!(cursor.peek(), None);
    }
}

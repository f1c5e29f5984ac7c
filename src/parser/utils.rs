/*!
Provides IO utility functions for reading fixed-width fields and bounded regions from a buffer.

All reads are checked against the bytes remaining in the buffer. A buffer obtained with
[ReadUtils::read_region] is a view limited to the region announced by a length field, so
a decoder working on it can never read past the region, and whatever it leaves unread is
visible to the caller through [bytes::Buf::remaining].
*/
use crate::error::ParserError;
use bytes::{Buf, Bytes};
use std::net::Ipv4Addr;

impl ReadUtils for Bytes {}
impl ReadUtils for &[u8] {}

/// Result of an attempt to read the first field of a list entry.
///
/// List decoders need to tell a region that ends exactly at an entry boundary (the list is
/// complete) from one that ends in the middle of a field (the input is malformed).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOutcome<T> {
    /// The whole field was read.
    Complete(T),
    /// Nothing was left to read.
    CleanEnd,
    /// Some, but not all, of the field's bytes were present.
    Truncated { needed: usize, available: usize },
}

impl<T> ReadOutcome<T> {
    /// `Complete` becomes `Some`, `CleanEnd` becomes `None`, and `Truncated` becomes
    /// [ParserError::Truncated] naming `field`.
    pub fn into_option(self, field: &'static str) -> Result<Option<T>, ParserError> {
        match self {
            ReadOutcome::Complete(v) => Ok(Some(v)),
            ReadOutcome::CleanEnd => Ok(None),
            ReadOutcome::Truncated { needed, available } => Err(ParserError::Truncated {
                field,
                needed,
                available,
            }),
        }
    }
}

pub trait ReadUtils: Buf {
    #[inline]
    fn has_n_remaining(&self, n: usize, field: &'static str) -> Result<(), ParserError> {
        if self.remaining() < n {
            Err(ParserError::Truncated {
                field,
                needed: n,
                available: self.remaining(),
            })
        } else {
            Ok(())
        }
    }

    #[inline]
    fn read_u8(&mut self, field: &'static str) -> Result<u8, ParserError> {
        self.has_n_remaining(1, field)?;
        Ok(self.get_u8())
    }

    #[inline]
    fn read_u16(&mut self, field: &'static str) -> Result<u16, ParserError> {
        self.has_n_remaining(2, field)?;
        Ok(self.get_u16())
    }

    #[inline]
    fn read_u32(&mut self, field: &'static str) -> Result<u32, ParserError> {
        self.has_n_remaining(4, field)?;
        Ok(self.get_u32())
    }

    #[inline]
    fn read_u64(&mut self, field: &'static str) -> Result<u64, ParserError> {
        self.has_n_remaining(8, field)?;
        Ok(self.get_u64())
    }

    fn read_ipv4_address(&mut self, field: &'static str) -> Result<Ipv4Addr, ParserError> {
        let addr = self.read_u32(field)?;
        Ok(Ipv4Addr::from(addr))
    }

    /// Reads the first field of a list entry as a single octet.
    #[inline]
    fn try_read_u8(&mut self) -> ReadOutcome<u8> {
        match self.remaining() {
            0 => ReadOutcome::CleanEnd,
            _ => ReadOutcome::Complete(self.get_u8()),
        }
    }

    /// Reads the first field of a list entry as a big-endian 16-bit integer.
    #[inline]
    fn try_read_u16(&mut self) -> ReadOutcome<u16> {
        match self.remaining() {
            0 => ReadOutcome::CleanEnd,
            1 => ReadOutcome::Truncated {
                needed: 2,
                available: 1,
            },
            _ => ReadOutcome::Complete(self.get_u16()),
        }
    }

    fn read_n_bytes(
        &mut self,
        n_bytes: usize,
        field: &'static str,
    ) -> Result<Vec<u8>, ParserError> {
        self.has_n_remaining(n_bytes, field)?;
        let mut buf = vec![0; n_bytes];
        self.copy_to_slice(&mut buf);
        Ok(buf)
    }

    /// Splits off the next `n_bytes` as their own buffer, failing if fewer are left.
    fn read_region(&mut self, n_bytes: usize, field: &'static str) -> Result<Bytes, ParserError> {
        self.has_n_remaining(n_bytes, field)?;
        Ok(self.copy_to_bytes(n_bytes))
    }

    /// Reads everything left in the buffer.
    fn read_remaining(&mut self) -> Vec<u8> {
        let mut buf = vec![0; self.remaining()];
        self.copy_to_slice(&mut buf);
        buf
    }
}

//! Bounded little-endian reads over a byte slice.
//!
//! Every parser in this crate reads through a [`Cursor`]. A cursor never reads
//! past the end of its slice, and remembers where its slice begins within the
//! whole document so that errors report absolute offsets.

use thiserror::Error;

use super::varint;

/// The structural fault found in a stream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Corruption {
    /// Fewer bytes remain than a field requires.
    #[error("unexpectedly reached the end of the data (needed {needed}, {remaining} remain)")]
    EndOfSlice { needed: usize, remaining: usize },
    /// A variable-length integer holds more than 64 significant bits.
    #[error("variable-length integer overflows 64 bits")]
    VarintOverflow,
    /// A tag differs from the one required at this position.
    #[error("expected tag {expected_index}/{expected_type:#x}, found {index}/{wire_type:#x}")]
    UnexpectedTag {
        expected_index: u64,
        expected_type: u8,
        index: u64,
        wire_type: u8,
    },
    /// A declared count needs more bytes than remain.
    #[error("count of {count} records of {size} bytes exceeds the {remaining} bytes remaining")]
    CountOverrun {
        count: u32,
        size: usize,
        remaining: usize,
    },
    /// A declared block or subblock length exceeds its enclosing scope.
    #[error("declared length {length} exceeds the {remaining} bytes remaining")]
    LengthOverrun { length: u32, remaining: usize },
    /// A point subblock is not a whole number of points.
    #[error("point data of {length} bytes is not a multiple of {size}")]
    PointRemainder { length: u32, size: usize },
    /// Bytes were left over inside a structure that must be fully consumed.
    #[error("{0} unconsumed trailing bytes")]
    TrailingBytes(usize),
}

/// A structural violation, located by its absolute byte offset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Corrupt data at offset {offset}: {kind}.")]
pub struct CorruptData {
    pub offset: usize,
    pub kind: Corruption,
}

/// A read position within a bounded slice of a document.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    r: &'a [u8],
    i: usize,
    base: usize,
}

impl<'a> Cursor<'a> {
    /// Create a cursor over `r`, which begins at absolute offset `base`.
    pub fn new(r: &'a [u8], base: usize) -> Self {
        Self { r, i: 0, base }
    }

    /// Absolute offset of the next byte.
    pub fn offset(&self) -> usize {
        self.base + self.i
    }

    pub fn remaining(&self) -> usize {
        self.r.len() - self.i
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Build an error located at the current offset.
    pub fn corrupt(&self, kind: Corruption) -> CorruptData {
        CorruptData {
            offset: self.offset(),
            kind,
        }
    }

    /// Take an exact number of bytes, advancing the cursor.
    pub fn take<const N: usize>(&mut self) -> Result<[u8; N], CorruptData> {
        let mut out = [0; N];
        out.copy_from_slice(self.take_slice(N)?);
        Ok(out)
    }

    /// Borrow the next `n` bytes, advancing the cursor.
    pub fn take_slice(&mut self, n: usize) -> Result<&'a [u8], CorruptData> {
        let remaining = self.remaining();
        if n > remaining {
            Err(self.corrupt(Corruption::EndOfSlice {
                needed: n,
                remaining,
            }))?;
        }

        let s = self.i;
        self.i += n;

        Ok(&self.r[s..self.i])
    }

    /// Split off a cursor over the next `length` bytes, advancing past them.
    ///
    /// Fails if `length` exceeds the bytes remaining in this cursor.
    pub fn sub(&mut self, length: u32) -> Result<Cursor<'a>, CorruptData> {
        let remaining = self.remaining();
        let n = usize::try_from(length).unwrap_or(usize::MAX);
        if n > remaining {
            Err(self.corrupt(Corruption::LengthOverrun { length, remaining }))?;
        }

        let base = self.offset();
        Ok(Cursor::new(self.take_slice(n)?, base))
    }

    /// Advance past `n` bytes without inspecting them.
    pub fn skip(&mut self, n: usize) -> Result<(), CorruptData> {
        self.take_slice(n).map(|_| ())
    }

    /// Verify that `count` records of at least `size` bytes each could still
    /// be read, so that storage may be sized by `count`.
    pub fn check_count(&self, count: u32, size: usize) -> Result<usize, CorruptData> {
        let remaining = self.remaining();
        let n = usize::try_from(count).unwrap_or(usize::MAX);

        match n.checked_mul(size) {
            Some(total) if total <= remaining => Ok(n),
            _ => Err(self.corrupt(Corruption::CountOverrun {
                count,
                size,
                remaining,
            })),
        }
    }

    /// Fail unless every byte has been consumed.
    pub fn finish(&self) -> Result<(), CorruptData> {
        match self.remaining() {
            0 => Ok(()),
            n => Err(self.corrupt(Corruption::TrailingBytes(n))),
        }
    }

    pub fn u8(&mut self) -> Result<u8, CorruptData> {
        Ok(self.take::<1>()?[0])
    }

    pub fn u32(&mut self) -> Result<u32, CorruptData> {
        Ok(u32::from_le_bytes(self.take()?))
    }

    pub fn f32(&mut self) -> Result<f32, CorruptData> {
        Ok(f32::from_le_bytes(self.take()?))
    }

    pub fn f64(&mut self) -> Result<f64, CorruptData> {
        Ok(f64::from_le_bytes(self.take()?))
    }

    /// Read a base-128 variable-length unsigned integer.
    pub fn varint(&mut self) -> Result<u64, CorruptData> {
        let (value, n) = varint::decode(&self.r[self.i..]).map_err(|kind| self.corrupt(kind))?;
        self.i += n;
        Ok(value)
    }

    /// Peek at the next variable-length integer without consuming it.
    pub fn peek_varint(&self) -> Result<u64, CorruptData> {
        self.clone().varint()
    }
}

//! States processing the flat V3 and V5 body.
//!
//! The body is a fixed nesting of counted records:
//!
//! ```text
//! u32 layer count
//!   u32 line count
//!     u32 brush type, u32 brush color, u32 padding, f32 brush size
//!     f32 unknown (V5 only)
//!     u32 point count
//!       24-byte float points
//! ```
//!
//! Every count is checked against the bytes remaining before any storage is
//! sized by it.

use alloc::vec::Vec;

use zerocopy::{
    FromBytes,
    little_endian::{F32, U32},
};

use super::{
    cursor::{Corruption, CorruptData, Cursor},
    header::Dialect,
    point::{FloatPoint, PointLayout, Sample, unpack},
};

/// Decoded body of a V3 or V5 document.
#[derive(Debug, Clone)]
pub struct FlatPage {
    pub dialect: Dialect,
    pub layers: Vec<Layer>,
}

#[derive(Debug, Clone, Default)]
pub struct Layer {
    pub lines: Vec<Line>,
}

/// A single stroke as stored by V3 and V5.
#[derive(Debug, Clone)]
pub struct Line {
    pub brush_type: u32,
    pub brush_color: u32,
    pub brush_size: f32,
    pub samples: Vec<Sample>,
}

#[repr(C)]
#[derive(FromBytes)]
struct LineHeaderV3 {
    brush_type: U32,
    brush_color: U32,
    _padding: U32,
    brush_size: F32,
}

#[repr(C)]
#[derive(FromBytes)]
struct LineHeaderV5 {
    common: LineHeaderV3,
    _unknown: F32,
}

/// State token to decode a flat body.
#[derive(Debug)]
pub struct FlatBody {
    dialect: Dialect,
}

impl FlatBody {
    pub(super) fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    /// Either [`Dialect::V3`] or [`Dialect::V5`].
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Decode the body, which must fill the remainder of the document.
    pub fn advance(self, r: &mut Cursor) -> Result<FlatPage, CorruptData> {
        let header_size = match self.dialect {
            Dialect::V5 => size_of::<LineHeaderV5>(),
            _ => size_of::<LineHeaderV3>(),
        };

        // Smallest possible records, used to bound declared counts.
        let min_layer = size_of::<u32>();
        let min_line = header_size + size_of::<u32>();

        let layer_count = r.u32()?;
        let mut layers = Vec::with_capacity(r.check_count(layer_count, min_layer)?);

        for _ in 0..layer_count {
            let line_count = r.u32()?;
            let mut lines = Vec::with_capacity(r.check_count(line_count, min_line)?);

            for _ in 0..line_count {
                lines.push(self.decode_line(r)?);
            }

            log::trace!("decoded layer of {} lines", lines.len());
            layers.push(Layer { lines });
        }

        r.finish()?;

        Ok(FlatPage {
            dialect: self.dialect,
            layers,
        })
    }

    fn decode_line(&self, r: &mut Cursor) -> Result<Line, CorruptData> {
        let LineHeaderV3 {
            brush_type,
            brush_color,
            brush_size,
            ..
        } = match self.dialect {
            Dialect::V5 => {
                let header: LineHeaderV5 = zerocopy::transmute!(r.take::<20>()?);
                header.common
            }
            _ => zerocopy::transmute!(r.take::<16>()?),
        };

        let point_count = r.u32()?;
        let n = r.check_count(point_count, FloatPoint::SIZE)?;

        let length = n * FloatPoint::SIZE;
        let remainder = r.corrupt(Corruption::PointRemainder {
            length: u32::try_from(length).unwrap_or(u32::MAX),
            size: FloatPoint::SIZE,
        });

        let data = r.take_slice(length)?;
        let samples = unpack::<FloatPoint>(data).ok_or(remainder)?;

        Ok(Line {
            brush_type: brush_type.get(),
            brush_color: brush_color.get(),
            brush_size: brush_size.get(),
            samples,
        })
    }
}

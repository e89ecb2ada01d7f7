//! On-disk point layouts.
//!
//! Two fixed-size layouts exist: a 24-byte all-float layout, used by V3, V5
//! and version 1 of V6 scene blocks, and a 14-byte packed layout used by
//! every later version of V6 scene blocks. Both are decoded into a [`Sample`], which
//! holds the units of the packed layout. Float fields are re-quantized on the
//! way in, so no dialect's native units escape a parser.

use alloc::vec::Vec;
use core::f32::consts::TAU;

use zerocopy::{
    FromBytes, Immutable, KnownLayout, Unaligned,
    little_endian::{F32, U16},
};

/// A point in packed units.
///
/// `speed` and `width` span the full `u16` range; `direction` maps one full
/// turn onto a byte, and `pressure` maps `[0, 1]` onto a byte.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub x: f32,
    pub y: f32,
    pub speed: u16,
    pub width: u16,
    pub direction: u8,
    pub pressure: u8,
}

/// A fixed-size point layout.
pub trait PointLayout: FromBytes + KnownLayout + Immutable + Unaligned + Copy + Into<Sample> {
    /// Size of one encoded point.
    const SIZE: usize = size_of::<Self>();
}

/// The 14-byte packed layout.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, KnownLayout, Immutable, Unaligned)]
pub struct PackedPoint {
    x: F32,
    y: F32,
    speed: U16,
    width: U16,
    direction: u8,
    pressure: u8,
}

impl PointLayout for PackedPoint {}

impl From<PackedPoint> for Sample {
    fn from(p: PackedPoint) -> Self {
        Sample {
            x: p.x.get(),
            y: p.y.get(),
            speed: p.speed.get(),
            width: p.width.get(),
            direction: p.direction,
            pressure: p.pressure,
        }
    }
}

/// The 24-byte float layout.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, KnownLayout, Immutable, Unaligned)]
pub struct FloatPoint {
    x: F32,
    y: F32,
    speed: F32,
    direction: F32,
    width: F32,
    pressure: F32,
}

impl PointLayout for FloatPoint {}

impl From<FloatPoint> for Sample {
    fn from(p: FloatPoint) -> Self {
        Sample {
            x: p.x.get(),
            y: p.y.get(),
            speed: quantize_magnitude(p.speed.get()),
            width: quantize_magnitude(p.width.get()),
            direction: quantize_direction(p.direction.get()),
            pressure: quantize_pressure(p.pressure.get()),
        }
    }
}

/// Scale a float speed or width by four into the `u16` range, saturating.
pub fn quantize_magnitude(v: f32) -> u16 {
    (v * 4.0).clamp(0.0, u16::MAX as f32) as u16
}

/// Map a direction in radians over `[0, 2π)` onto a byte.
pub fn quantize_direction(radians: f32) -> u8 {
    (radians * 255.0 / TAU).clamp(0.0, 255.0) as u8
}

/// Map a pressure over `[0, 1]` onto a byte.
pub fn quantize_pressure(v: f32) -> u8 {
    (v * 255.0).clamp(0.0, 255.0) as u8
}

/// Decode a run of points of layout `P`.
///
/// Returns `None` unless `r` holds a whole number of points.
pub fn unpack<P: PointLayout>(r: &[u8]) -> Option<Vec<Sample>> {
    let points = <[P]>::ref_from_bytes(r).ok()?;
    Some(points.iter().map(|&p| p.into()).collect())
}

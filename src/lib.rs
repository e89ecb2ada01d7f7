#![no_std]

//! A defensive decoder for reMarkable's binary `.lines` stroke format.
//!
//! Nib reads all three on-disk dialects (V3, V5 and V6) into one canonical
//! [`Document`], suitable for any renderer. Decoding is pure: it performs no
//! I/O, and treats its input as untrusted. Malformed data produces an
//! [`Error`], never a panic or a partially decoded document.
//!
//! Most users need only [`decode`]. The [`avec`] module adds reader-based
//! decoding and multi-page assembly, and the [`sans`] module exposes the
//! dialect parsers for finer control.
//!
//! ## Cargo Features
//!
//! The following crate feature flags are available:
//!
//! - `std`: enable reader-based decoding and `HashMap` page sources (default).

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod avec;
pub mod document;
pub mod normalize;
pub mod sans;

pub use avec::{decode_slice as decode, slice::Error};
pub use document::{Color, Document, Point, Stroke, Tool};

//! Dialect parsers, free of I/O.
//!
//! This module is intended for applications that need dialect-level access to
//! a document. See [`crate::avec`] for the interfaces most users want.
//!
//! # Architecture
//!
//! Decoding begins at [`Decoder`], whose `advance` method matches the
//! document header and returns a state token for the dialect's body: either a
//! [`flat::FlatBody`] (V3 and V5) or a [`tagged::TaggedBody`] (V6). Advancing
//! that token over a [`cursor::Cursor`] yields the dialect's own structures,
//! which [`crate::normalize`] turns into a [`crate::Document`].
//!
//! Parsing is strict. Any structural violation ends decoding with a
//! [`cursor::CorruptData`]; no attempt is made to resynchronize on later
//! bytes.

pub mod cursor;
pub mod flat;
pub mod header;
pub mod point;
pub mod tagged;
pub mod varint;

/// Entrypoint to decoding.
pub type Decoder = header::DocumentHeader;

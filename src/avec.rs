//! Convenience interfaces for common decoding patterns.
//!
//! The functions in this module decode whole documents from slices and
//! readers, and assemble multi-page documents from per-page streams.

pub mod pages;
#[cfg(feature = "std")]
pub mod reader;
pub mod slice;

pub use pages::{PageOutcome, PageStreams, decode_documents, decode_pages};
#[cfg(feature = "std")]
pub use reader::decode as decode_reader;
pub use slice::decode as decode_slice;

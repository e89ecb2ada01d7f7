//! Reader-based decoder implementation.
//!
//! _Requires Cargo feature `std`._

use std::{io::Read, vec::Vec};

use thiserror::Error;

use crate::{
    document::Document,
    sans::{cursor::CorruptData, header::UnsupportedFormat},
};

use super::slice;

/// Errors occurring while decoding from a reader.
#[derive(Debug, Error)]
pub enum Error {
    /// An error from the supplied reader.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// The header matches no known dialect.
    #[error(transparent)]
    UnsupportedFormat(#[from] UnsupportedFormat),
    /// The body violates its dialect's structure.
    #[error(transparent)]
    CorruptData(#[from] CorruptData),
}

impl From<slice::Error> for Error {
    fn from(err: slice::Error) -> Self {
        match err {
            slice::Error::UnsupportedFormat(e) => Self::UnsupportedFormat(e),
            slice::Error::CorruptData(e) => Self::CorruptData(e),
        }
    }
}

/// Decode a document from a reader.
///
/// The reader is consumed to its end before decoding begins, since no part of
/// a document can be trusted until its structure has been checked.
///
/// This method is also re-exported as `nib::avec::decode_reader`.
///
/// _Requires Cargo feature `std`._
pub fn decode(r: &mut impl Read) -> Result<Document, Error> {
    let mut buf = Vec::new();
    r.read_to_end(&mut buf)?;

    Ok(slice::decode(&buf)?)
}

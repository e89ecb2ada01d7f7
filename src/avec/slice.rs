//! Slice-based decoder implementation.

use either::Either::{Left, Right};
use thiserror::Error;

use crate::{
    document::Document,
    normalize,
    sans::{
        Decoder,
        cursor::{CorruptData, Cursor},
        header::{HEADER_LEN, UnsupportedFormat},
    },
};

/// Errors occurring while decoding from a slice.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The header matches no known dialect.
    #[error(transparent)]
    UnsupportedFormat(#[from] UnsupportedFormat),
    /// The body violates its dialect's structure.
    #[error(transparent)]
    CorruptData(#[from] CorruptData),
}

/// Decode a document from a slice.
///
/// This method is also re-exported as `nib::decode` and
/// `nib::avec::decode_slice`.
pub fn decode(r: &[u8]) -> Result<Document, Error> {
    let (successor, body) = Decoder::advance(r)?;

    // Offsets reported in errors count from the start of the header.
    let r = &mut Cursor::new(body, HEADER_LEN);

    let document = match successor {
        Left(state) => normalize::flat(state.advance(r)?),
        Right(state) => normalize::tagged(state.advance(r)?),
    };

    log::debug!(
        "decoded {} strokes of {} points",
        document.strokes().len(),
        document.point_count()
    );

    Ok(document)
}

//! States processing the document header.

use alloc::vec::Vec;

use either::Either::{self, Left, Right};
use thiserror::Error;

use super::{flat::FlatBody, tagged::TaggedBody};

/// Length of the space-padded header at the start of every document.
pub const HEADER_LEN: usize = 43;

pub const HEADER_V3: &[u8; HEADER_LEN] = b"reMarkable .lines file, version=3          ";
pub const HEADER_V5: &[u8; HEADER_LEN] = b"reMarkable .lines file, version=5          ";
pub const HEADER_V6: &[u8; HEADER_LEN] = b"reMarkable .lines file, version=6          ";

/// One of the incompatible binary layouts, distinguished by header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    V3,
    V5,
    V6,
}

impl Dialect {
    /// The literal header identifying this dialect.
    pub const fn header(self) -> &'static [u8; HEADER_LEN] {
        match self {
            Dialect::V3 => HEADER_V3,
            Dialect::V5 => HEADER_V5,
            Dialect::V6 => HEADER_V6,
        }
    }
}

/// The header matches no known dialect.
///
/// Holds the header bytes observed, which are fewer than [`HEADER_LEN`] when
/// the document is shorter than a header.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unsupported format with header \"{}\".", .header.escape_ascii())]
pub struct UnsupportedFormat {
    pub header: Vec<u8>,
}

/// State token to decode a document header.
#[derive(Debug)]
pub struct DocumentHeader;

impl DocumentHeader {
    /// Transition to another state by decoding a document header.
    ///
    /// Matching is byte-exact: a header differing in any byte, including
    /// case or padding, is unsupported.
    ///
    /// Returns a successor state token for the dialect's body, and the bytes
    /// following the header.
    pub fn advance(r: &[u8]) -> Result<(Either<FlatBody, TaggedBody>, &[u8]), UnsupportedFormat> {
        let unsupported = || UnsupportedFormat {
            header: r[..r.len().min(HEADER_LEN)].to_vec(),
        };

        let (header, body) = r.split_first_chunk::<HEADER_LEN>().ok_or_else(unsupported)?;

        let successor = match header {
            HEADER_V3 => Left(FlatBody::new(Dialect::V3)),
            HEADER_V5 => Left(FlatBody::new(Dialect::V5)),
            HEADER_V6 => Right(TaggedBody(())),
            _ => Err(unsupported())?,
        };

        log::debug!(
            "detected {:?} header",
            successor.as_ref().either(|s| s.dialect(), |_| Dialect::V6)
        );

        Ok((successor, body))
    }
}

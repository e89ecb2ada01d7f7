//! Assembly of multi-page documents.
//!
//! A notebook stores one stream per page, keyed by page identifier, and a
//! separate manifest giving page order. Pages are decoded independently: a
//! missing or corrupt page is reported and skipped without affecting the
//! others.

use alloc::{collections::BTreeMap, vec::Vec};
use core::borrow::Borrow;

use crate::document::Document;

use super::slice::{self, Error};

/// A source of page streams, keyed by page identifier.
pub trait PageStreams {
    /// Retrieve the stream for a page, if one exists.
    fn stream(&self, id: &str) -> Option<&[u8]>;
}

impl<K, V> PageStreams for BTreeMap<K, V>
where
    K: Borrow<str> + Ord,
    V: AsRef<[u8]>,
{
    fn stream(&self, id: &str) -> Option<&[u8]> {
        self.get(id).map(AsRef::as_ref)
    }
}

#[cfg(feature = "std")]
impl<K, V, S> PageStreams for std::collections::HashMap<K, V, S>
where
    K: Borrow<str> + Eq + core::hash::Hash,
    V: AsRef<[u8]>,
    S: core::hash::BuildHasher,
{
    fn stream(&self, id: &str) -> Option<&[u8]> {
        self.get(id).map(AsRef::as_ref)
    }
}

/// The result of decoding one page.
#[derive(Debug, Clone, PartialEq)]
pub enum PageOutcome {
    Decoded(Document),
    /// The manifest lists the page, but no stream holds it.
    Missing,
    Failed(Error),
}

impl PageOutcome {
    /// The decoded document, if there is one.
    pub fn document(self) -> Option<Document> {
        match self {
            PageOutcome::Decoded(document) => Some(document),
            _ => None,
        }
    }
}

/// Decode pages in manifest order, returning one outcome per identifier.
pub fn decode_pages<'a>(
    order: impl IntoIterator<Item = &'a str>,
    streams: &impl PageStreams,
) -> Vec<(&'a str, PageOutcome)> {
    order
        .into_iter()
        .map(|id| {
            let outcome = match streams.stream(id).map(slice::decode) {
                Some(Ok(document)) => PageOutcome::Decoded(document),
                Some(Err(err)) => {
                    log::warn!("page {id} failed to decode: {err}");
                    PageOutcome::Failed(err)
                }
                None => {
                    log::warn!("page {id} not found, skipping");
                    PageOutcome::Missing
                }
            };

            (id, outcome)
        })
        .collect()
}

/// Decode pages in manifest order, keeping only those that decode.
pub fn decode_documents<'a>(
    order: impl IntoIterator<Item = &'a str>,
    streams: &impl PageStreams,
) -> Vec<Document> {
    decode_pages(order, streams)
        .into_iter()
        .filter_map(|(_, outcome)| outcome.document())
        .collect()
}

//! States processing the tagged V6 body.
//!
//! The body is a sequence of self-delimiting blocks, each an 8-byte header
//! followed by its payload:
//!
//! ```text
//! u32 payload length, u8 reserved, u8 minimum version, u8 current version, u8 block type
//! ```
//!
//! Only scene item blocks carry strokes. Every other block is skipped by its
//! declared length, so unknown block types never interrupt decoding.
//!
//! Inside a scene item, fields are prefixed by a variable-length tag whose low
//! four bits give a [`WireType`] and whose remaining bits give a field index.
//! Fields must appear in a fixed order; any other tag is corruption.

use alloc::vec::Vec;
use core::fmt;

use tartan_bitfield::bitfield;
use zerocopy::{FromBytes, little_endian::U32};

use super::{
    cursor::{Corruption, CorruptData, Cursor},
    point::{FloatPoint, PackedPoint, PointLayout, Sample, unpack},
};

/// The kind of a block, from its header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockType {
    MigrationInfo,
    PageInfo,
    TreeNode,
    SceneItem,
    TextItem,
    AuthorIds,
    Unknown(u8),
}

impl From<u8> for BlockType {
    fn from(b: u8) -> Self {
        match b {
            0x00 => BlockType::MigrationInfo,
            0x02 => BlockType::PageInfo,
            0x04 => BlockType::TreeNode,
            0x05 => BlockType::SceneItem,
            0x06 => BlockType::TextItem,
            0x09 => BlockType::AuthorIds,
            b => BlockType::Unknown(b),
        }
    }
}

/// The encoding of a tagged field's value.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireType {
    Byte1 = 0x01,
    Byte4 = 0x04,
    Byte8 = 0x08,
    /// A `u32` length followed by that many bytes.
    Length4 = 0x0C,
    /// A CRDT identifier: one byte, then a variable-length integer.
    Id = 0x0F,
}

/// Encode a field tag, as found before every tagged field.
pub const fn tag(index: u64, wire_type: WireType) -> u64 {
    index << 4 | wire_type as u64
}

/// Item discriminators, the first byte of a scene item's value.
const ITEM_GROUP: u8 = 0x00;
const ITEM_LINE: u8 = 0x03;
const ITEM_TEXT: u8 = 0x05;

bitfield! {
    struct Tag(u64) {
        [0..4] wire_type: u8,
        [4..64] index: u64,
    }
}

#[repr(C)]
#[derive(FromBytes)]
struct BlockHeader {
    length: U32,
    _reserved: u8,
    min_version: u8,
    current_version: u8,
    block_type: u8,
}

/// A (author, sequence) identifier from the collaborative editing history.
///
/// Read only to keep field order honest; never leaves this module.
struct CrdtId {
    author: u8,
    sequence: u64,
}

impl fmt::Display for CrdtId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.author, self.sequence)
    }
}

/// Decoded strokes of a V6 document.
#[derive(Debug, Clone, Default)]
pub struct TaggedPage {
    pub lines: Vec<LineItem>,
}

/// A visible line from a scene item block.
#[derive(Debug, Clone)]
pub struct LineItem {
    pub tool: u32,
    pub color: u32,
    pub thickness_scale: f64,
    pub starting_length: f32,
    pub samples: Vec<Sample>,
}

/// State token to decode a tagged body.
#[derive(Debug)]
pub struct TaggedBody(pub(super) ());

impl TaggedBody {
    /// Decode every block in the body, collecting visible lines in order.
    pub fn advance(self, r: &mut Cursor) -> Result<TaggedPage, CorruptData> {
        let mut page = TaggedPage::default();

        while !r.is_empty() {
            let BlockHeader {
                length,
                min_version,
                current_version,
                block_type,
                ..
            } = zerocopy::transmute!(r.take::<8>()?);

            let length = length.get();
            let block_type = BlockType::from(block_type);

            log::trace!(
                "{block_type:?} block of {length} bytes at {} (versions {min_version}..={current_version})",
                r.offset()
            );

            // Splitting off the payload seeks past it whether or not it is read.
            let mut block = r.sub(length)?;

            match block_type {
                BlockType::SceneItem => {
                    if let Some(line) = decode_scene_item(&mut block, current_version)? {
                        page.lines.push(line);
                    }
                }
                _ => log::debug!("skipped {block_type:?} block of {length} bytes"),
            }
        }

        Ok(page)
    }
}

/// Decode a scene item, returning its line if it holds a visible one.
fn decode_scene_item(r: &mut Cursor, version: u8) -> Result<Option<LineItem>, CorruptData> {
    let parent = expect_id(r, 1)?;
    let item = expect_id(r, 2)?;
    let left = expect_id(r, 3)?;
    let right = expect_id(r, 4)?;

    log::trace!("scene item {item} under {parent}, between {left} and {right}");

    expect_tag(r, 5, WireType::Byte4)?;
    let deleted_length = r.u32()?;

    if deleted_length > 0 {
        log::debug!("skipped deleted scene item {item}");
        return Ok(None);
    }

    if !next_tag_is(r, 6, WireType::Length4) {
        log::debug!("scene item {item} holds no value");
        return Ok(None);
    }

    expect_tag(r, 6, WireType::Length4)?;
    let length = r.u32()?;
    let mut value = r.sub(length)?;

    let line = match value.u8()? {
        ITEM_LINE => Some(decode_line(&mut value, version)?),
        item_type => {
            let kind = match item_type {
                ITEM_GROUP => "group",
                ITEM_TEXT => "text",
                _ => "unknown",
            };
            log::debug!("skipped {kind} item {item} ({item_type:#x})");
            None
        }
    };

    r.finish()?;

    Ok(line)
}

/// Decode the fields of a line item, which must fill `r`.
fn decode_line(r: &mut Cursor, version: u8) -> Result<LineItem, CorruptData> {
    expect_tag(r, 1, WireType::Byte4)?;
    let tool = r.u32()?;

    expect_tag(r, 2, WireType::Byte4)?;
    let color = r.u32()?;

    expect_tag(r, 3, WireType::Byte8)?;
    let thickness_scale = r.f64()?;

    expect_tag(r, 4, WireType::Byte4)?;
    let starting_length = r.f32()?;

    expect_tag(r, 5, WireType::Length4)?;
    let length = r.u32()?;
    let mut points = r.sub(length)?;

    // Only version 1 blocks hold float points.
    let samples = match version {
        1 => decode_points::<FloatPoint>(&mut points, length)?,
        _ => decode_points::<PackedPoint>(&mut points, length)?,
    };

    // Timestamp and move identifiers, neither of which is required.
    for index in [6, 7] {
        if next_tag_is(r, index, WireType::Id) {
            expect_id(r, index)?;
        }
    }

    r.finish()?;

    Ok(LineItem {
        tool,
        color,
        thickness_scale,
        starting_length,
        samples,
    })
}

fn decode_points<P: PointLayout>(r: &mut Cursor, length: u32) -> Result<Vec<Sample>, CorruptData> {
    let remainder = r.corrupt(Corruption::PointRemainder {
        length,
        size: P::SIZE,
    });

    let data = r.take_slice(r.remaining())?;
    unpack::<P>(data).ok_or(remainder)
}

/// Read a tag, failing unless it has the given index and wire type.
fn expect_tag(r: &mut Cursor, index: u64, wire_type: WireType) -> Result<(), CorruptData> {
    let start = r.offset();
    let found = Tag(r.varint()?);

    if found.index() != index || found.wire_type() != wire_type as u8 {
        Err(CorruptData {
            offset: start,
            kind: Corruption::UnexpectedTag {
                expected_index: index,
                expected_type: wire_type as u8,
                index: found.index(),
                wire_type: found.wire_type(),
            },
        })?;
    }

    Ok(())
}

/// Whether the next bytes are the given tag. An unreadable tag is not.
fn next_tag_is(r: &Cursor, index: u64, wire_type: WireType) -> bool {
    r.peek_varint().is_ok_and(|v| v == tag(index, wire_type))
}

fn expect_id(r: &mut Cursor, index: u64) -> Result<CrdtId, CorruptData> {
    expect_tag(r, index, WireType::Id)?;

    Ok(CrdtId {
        author: r.u8()?,
        sequence: r.varint()?,
    })
}

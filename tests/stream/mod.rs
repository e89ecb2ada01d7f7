//! Builders for hand-made documents.

#![allow(dead_code)]

use nib::sans::{
    header::Dialect,
    tagged::{WireType, tag},
    varint,
};

pub const SCENE_ITEM: u8 = 0x05;

pub fn header(dialect: Dialect) -> Vec<u8> {
    dialect.header().to_vec()
}

/// A V3 or V5 line: brush type, brush color, brush size, float points.
pub struct FlatLine {
    pub brush_type: u32,
    pub brush_color: u32,
    pub brush_size: f32,
    pub points: Vec<[f32; 6]>,
}

impl FlatLine {
    pub fn new(brush_type: u32, brush_color: u32, points: Vec<[f32; 6]>) -> Self {
        Self {
            brush_type,
            brush_color,
            brush_size: 2.0,
            points,
        }
    }
}

/// Encode a full V3 or V5 document.
pub fn flat(dialect: Dialect, layers: &[Vec<FlatLine>]) -> Vec<u8> {
    let mut out = header(dialect);
    out.extend((layers.len() as u32).to_le_bytes());

    for lines in layers {
        out.extend((lines.len() as u32).to_le_bytes());

        for line in lines {
            out.extend(line.brush_type.to_le_bytes());
            out.extend(line.brush_color.to_le_bytes());
            out.extend(0u32.to_le_bytes());
            out.extend(line.brush_size.to_le_bytes());
            if dialect == Dialect::V5 {
                out.extend(0f32.to_le_bytes());
            }
            out.extend((line.points.len() as u32).to_le_bytes());
            for point in &line.points {
                for v in point {
                    out.extend(v.to_le_bytes());
                }
            }
        }
    }

    out
}

pub fn point(x: f32, y: f32) -> [f32; 6] {
    [x, y, 1.0, 0.5, 2.0, 0.5]
}

pub fn tagged_field(out: &mut Vec<u8>, index: u64, wire_type: WireType) {
    varint::encode(tag(index, wire_type), out);
}

pub fn id(out: &mut Vec<u8>, index: u64, author: u8, sequence: u64) {
    tagged_field(out, index, WireType::Id);
    out.push(author);
    varint::encode(sequence, out);
}

pub fn u32_field(out: &mut Vec<u8>, index: u64, v: u32) {
    tagged_field(out, index, WireType::Byte4);
    out.extend(v.to_le_bytes());
}

pub fn subblock(out: &mut Vec<u8>, index: u64, payload: &[u8]) {
    tagged_field(out, index, WireType::Length4);
    out.extend((payload.len() as u32).to_le_bytes());
    out.extend(payload);
}

/// Wrap a payload in a block header.
pub fn block(block_type: u8, current_version: u8, payload: &[u8]) -> Vec<u8> {
    let mut out = (payload.len() as u32).to_le_bytes().to_vec();
    out.extend([0, 1, current_version, block_type]);
    out.extend(payload);
    out
}

/// The identifier and deletion fields opening every scene item.
pub fn scene_head(deleted_length: u32) -> Vec<u8> {
    let mut out = Vec::new();
    id(&mut out, 1, 0, 1);
    id(&mut out, 2, 1, 42);
    id(&mut out, 3, 0, 0);
    id(&mut out, 4, 0, 0);
    u32_field(&mut out, 5, deleted_length);
    out
}

/// The value subblock of a line item, holding already-encoded points.
pub fn line_value(tool: u32, color: u32, points: &[u8], trailing: &[u8]) -> Vec<u8> {
    let mut body = vec![0x03];
    u32_field(&mut body, 1, tool);
    u32_field(&mut body, 2, color);
    tagged_field(&mut body, 3, WireType::Byte8);
    body.extend(1.0f64.to_le_bytes());
    tagged_field(&mut body, 4, WireType::Byte4);
    body.extend(0f32.to_le_bytes());
    subblock(&mut body, 5, points);
    body.extend(trailing);

    let mut out = Vec::new();
    subblock(&mut out, 6, &body);
    out
}

/// A scene item block holding one line.
pub fn line_block(current_version: u8, tool: u32, color: u32, points: &[u8]) -> Vec<u8> {
    let mut payload = scene_head(0);
    payload.extend(line_value(tool, color, points, &[]));
    block(SCENE_ITEM, current_version, &payload)
}

/// Encode points in the 14-byte packed layout.
pub fn packed(points: &[(f32, f32, u16, u16, u8, u8)]) -> Vec<u8> {
    let mut out = Vec::new();
    for &(x, y, speed, width, direction, pressure) in points {
        out.extend(x.to_le_bytes());
        out.extend(y.to_le_bytes());
        out.extend(speed.to_le_bytes());
        out.extend(width.to_le_bytes());
        out.push(direction);
        out.push(pressure);
    }
    out
}

/// Encode points in the 24-byte float layout.
pub fn floats(points: &[[f32; 6]]) -> Vec<u8> {
    points
        .iter()
        .flat_map(|p| p.iter().flat_map(|v| v.to_le_bytes()))
        .collect()
}

/// A V6 document from already-encoded blocks.
pub fn tagged(blocks: &[Vec<u8>]) -> Vec<u8> {
    let mut out = header(Dialect::V6);
    for block in blocks {
        out.extend(block);
    }
    out
}

//! Mapping of dialect-specific structures onto the canonical [`Document`].
//!
//! Tool and color codes are looked up in static tables keyed by dialect.
//! Unrecognized tools become [`Tool::Ballpoint`] and unrecognized colors
//! become [`Color::Black`]; neither is an error. All validation happens in the
//! parsers, so nothing here can fail.

use alloc::vec::Vec;

use crate::{
    document::{Color, Document, Point, Stroke, Tool},
    sans::{flat::FlatPage, header::Dialect, point::Sample, tagged::TaggedPage},
};

const V3_TOOLS: &[(u32, Tool)] = &[
    (0, Tool::Ballpoint), // Brush
    (1, Tool::Pencil),    // Tilt pencil
    (2, Tool::Ballpoint),
    (3, Tool::Marker),
    (4, Tool::Fineliner),
    (5, Tool::Highlighter),
    (6, Tool::Eraser),
    (7, Tool::Pencil), // Sharp pencil
    (8, Tool::EraseArea),
];

// V5 adds a second range of codes, 12 to 18, for the same tools.
const V5_TOOLS: &[(u32, Tool)] = &[
    (0, Tool::Ballpoint),
    (1, Tool::Pencil),
    (2, Tool::Ballpoint),
    (3, Tool::Marker),
    (4, Tool::Fineliner),
    (5, Tool::Highlighter),
    (6, Tool::Eraser),
    (7, Tool::Pencil),
    (8, Tool::EraseArea),
    (12, Tool::Ballpoint), // Brush
    (13, Tool::Pencil),    // Sharp pencil
    (14, Tool::Pencil),    // Tilt pencil
    (15, Tool::Ballpoint),
    (16, Tool::Marker),
    (17, Tool::Fineliner),
    (18, Tool::Highlighter),
];

const V6_TOOLS: &[(u32, Tool)] = &[
    (0, Tool::Ballpoint),
    (1, Tool::Pencil),
    (2, Tool::Ballpoint),
    (3, Tool::Marker),
    (4, Tool::Fineliner),
    (5, Tool::Highlighter),
    (6, Tool::Eraser),
    (7, Tool::Pencil),
    (8, Tool::EraseArea),
    (12, Tool::Ballpoint),
    (13, Tool::Pencil),
    (14, Tool::Pencil),
    (15, Tool::Ballpoint),
    (16, Tool::Marker),
    (17, Tool::Fineliner),
    (18, Tool::Highlighter),
    (21, Tool::Ballpoint), // Calligraphy pen
];

const COLORS: &[(u32, Color)] = &[(0, Color::Black), (1, Color::Grey), (2, Color::White)];

/// Map a dialect's tool code onto a [`Tool`].
pub fn tool(dialect: Dialect, code: u32) -> Tool {
    let table = match dialect {
        Dialect::V3 => V3_TOOLS,
        Dialect::V5 => V5_TOOLS,
        Dialect::V6 => V6_TOOLS,
    };

    lookup(table, code).unwrap_or(Tool::Ballpoint)
}

/// Map a color code onto a [`Color`]. Every dialect shares one table.
pub fn color(code: u32) -> Color {
    lookup(COLORS, code).unwrap_or(Color::Black)
}

fn lookup<T: Copy>(table: &[(u32, T)], code: u32) -> Option<T> {
    table.iter().find(|(c, _)| *c == code).map(|&(_, v)| v)
}

/// Map a sample onto a canonical point, rescaling `u16` fields to `0..=255`.
pub fn point(s: &Sample) -> Point {
    fn rescale(v: u16) -> f32 {
        f32::from(v) * 255.0 / f32::from(u16::MAX)
    }

    Point {
        x: s.x,
        y: s.y,
        pressure: f32::from(s.pressure),
        width: rescale(s.width),
        direction: f32::from(s.direction),
        speed: rescale(s.speed),
    }
}

fn points(samples: &[Sample]) -> Vec<Point> {
    samples.iter().map(point).collect()
}

/// Normalize a V3 or V5 body. Lines keep their order, layer by layer.
pub fn flat(page: FlatPage) -> Document {
    let dialect = page.dialect;

    let strokes = page
        .layers
        .iter()
        .flat_map(|layer| &layer.lines)
        .filter_map(|line| {
            Stroke::new(
                tool(dialect, line.brush_type),
                color(line.brush_color),
                line.brush_size,
                points(&line.samples),
            )
        })
        .collect();

    Document::new(strokes)
}

/// Normalize a V6 body.
pub fn tagged(page: TaggedPage) -> Document {
    let strokes = page
        .lines
        .iter()
        .filter_map(|line| {
            Stroke::new(
                tool(Dialect::V6, line.tool),
                color(line.color),
                (line.thickness_scale * 2.0) as f32,
                points(&line.samples),
            )
        })
        .collect();

    Document::new(strokes)
}

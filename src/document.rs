//! The canonical document model shared by every dialect.

use alloc::vec::Vec;

/// A drawing tool, collapsed from every dialect's tool codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    Fineliner,
    Pencil,
    Ballpoint,
    Marker,
    Highlighter,
    Eraser,
    EraseArea,
}

/// An ink color, collapsed from every dialect's color codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    Grey,
    White,
}

/// A point of a stroke.
///
/// Positions are in device units. `pressure`, `width`, `direction` and
/// `speed` all span `0.0..=255.0`; `direction` maps one full turn onto that
/// range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
    pub pressure: f32,
    pub width: f32,
    pub direction: f32,
    pub speed: f32,
}

/// A single stroke. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    tool: Tool,
    color: Color,
    width: f32,
    points: Vec<Point>,
}

impl Stroke {
    /// Build a stroke, or `None` if it would have no points.
    pub fn new(tool: Tool, color: Color, width: f32, points: Vec<Point>) -> Option<Self> {
        if points.is_empty() {
            return None;
        }

        Some(Self {
            tool,
            color,
            width,
            points,
        })
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Base width of the stroke, before per-point variation.
    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }
}

/// An axis-aligned rectangle in device units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

/// A decoded page: an ordered sequence of strokes on a fixed canvas.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    strokes: Vec<Stroke>,
}

impl Document {
    /// Width of the logical canvas in device units.
    pub const WIDTH: u32 = 1404;
    /// Height of the logical canvas in device units.
    pub const HEIGHT: u32 = 1872;

    pub fn new(strokes: Vec<Stroke>) -> Self {
        Self { strokes }
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn into_strokes(self) -> Vec<Stroke> {
        self.strokes
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    /// Total number of points across all strokes.
    pub fn point_count(&self) -> usize {
        self.strokes.iter().map(|s| s.points.len()).sum()
    }

    /// The smallest rectangle holding every point, or the whole canvas for a
    /// document without strokes.
    pub fn bounds(&self) -> Bounds {
        let mut points = self.strokes.iter().flat_map(|s| &s.points);

        let Some(first) = points.next() else {
            return Bounds {
                min_x: 0.0,
                min_y: 0.0,
                max_x: Self::WIDTH as f32,
                max_y: Self::HEIGHT as f32,
            };
        };

        let init = Bounds {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };

        points.fold(init, |b, p| Bounds {
            min_x: b.min_x.min(p.x),
            min_y: b.min_y.min(p.y),
            max_x: b.max_x.max(p.x),
            max_y: b.max_y.max(p.y),
        })
    }
}

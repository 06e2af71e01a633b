//! Geometric value types for annotation regions
//!
//! Coordinates are plain `f32` pixels. Whether a value lives in display space or
//! natural image space is decided by the type that carries it (see `annotation`).

use serde::{Deserialize, Serialize};

/// A pixel position
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Offset by the given delta
    pub fn translate(self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Both axes within `radius` of `other` (square hit region)
    pub fn is_near(self, other: Point, radius: f32) -> bool {
        (self.x - other.x).abs() <= radius && (self.y - other.y).abs() <= radius
    }

    /// Euclidean distance to another point
    pub fn distance(self, other: Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Multiply both axes by a uniform factor
    pub fn scale(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }
}

/// Axis-aligned rectangle given by two opposite corners
///
/// No ordering is enforced between `x1`/`x2` or `y1`/`y2`. Anything that tests
/// containment or draws goes through [`Rect::normalized`] first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl Rect {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Rectangle spanned by two arbitrary points, first point as `(x1, y1)`
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x1: a.x,
            y1: a.y,
            x2: b.x,
            y2: b.y,
        }
    }

    /// `(min_x, min_y, max_x, max_y)`
    pub fn normalized(&self) -> (f32, f32, f32, f32) {
        normalize_rect(self.x1, self.y1, self.x2, self.y2)
    }

    pub fn width(&self) -> f32 {
        (self.x2 - self.x1).abs()
    }

    pub fn height(&self) -> f32 {
        (self.y2 - self.y1).abs()
    }

    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        Self {
            x1: self.x1 + dx,
            y1: self.y1 + dy,
            x2: self.x2 + dx,
            y2: self.y2 + dy,
        }
    }

    pub fn scale(&self, factor: f32) -> Self {
        Self {
            x1: self.x1 * factor,
            y1: self.y1 * factor,
            x2: self.x2 * factor,
            y2: self.y2 * factor,
        }
    }
}

/// Closed ring of vertices; the last vertex connects back to the first
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub items: Vec<Point>,
}

impl Polygon {
    /// Minimum vertex count of a closed polygon
    pub const MIN_VERTICES: usize = 3;

    pub fn new(items: Vec<Point>) -> Self {
        Self { items }
    }

    /// Rigid-body move of every vertex
    pub fn translate(&mut self, dx: f32, dy: f32) {
        for p in &mut self.items {
            *p = p.translate(dx, dy);
        }
    }

    pub fn scale(&self, factor: f32) -> Self {
        Self {
            items: self.items.iter().map(|p| p.scale(factor)).collect(),
        }
    }
}

/// Normalize min/max coordinates from arbitrary start/end points
#[inline]
pub fn normalize_rect(x1: f32, y1: f32, x2: f32, y2: f32) -> (f32, f32, f32, f32) {
    let (min_x, max_x) = if x1 < x2 { (x1, x2) } else { (x2, x1) };
    let (min_y, max_y) = if y1 < y2 { (y1, y2) } else { (y2, y1) };
    (min_x, min_y, max_x, max_y)
}

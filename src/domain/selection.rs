//! Tool, handle and cursor types

use serde::{Deserialize, Serialize};

use super::geometry::{Point, Rect};

/// Active drawing tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    Select,
    #[default]
    Rect,
    Polygon,
}

/// Corner handle of a rectangle, named on the normalized rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    /// North-West corner
    NW,
    /// North-East corner
    NE,
    /// South-East corner
    SE,
    /// South-West corner
    SW,
}

impl Corner {
    pub const ALL: [Corner; 4] = [Corner::NW, Corner::NE, Corner::SE, Corner::SW];

    /// Position of this corner on the normalized rectangle
    pub fn point(self, rect: &Rect) -> Point {
        let (min_x, min_y, max_x, max_y) = rect.normalized();
        match self {
            Corner::NW => Point::new(min_x, min_y),
            Corner::NE => Point::new(max_x, min_y),
            Corner::SE => Point::new(max_x, max_y),
            Corner::SW => Point::new(min_x, max_y),
        }
    }

    pub fn opposite(self) -> Corner {
        match self {
            Corner::NW => Corner::SE,
            Corner::NE => Corner::SW,
            Corner::SE => Corner::NW,
            Corner::SW => Corner::NE,
        }
    }
}

/// Pointer affordance shown over the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorIcon {
    /// Plain arrow
    Default,
    #[default]
    Crosshair,
    Pointer,
    Move,
    Resize(Corner),
}

impl CursorIcon {
    /// CSS cursor keyword
    pub fn css_name(self) -> &'static str {
        match self {
            CursorIcon::Default => "auto",
            CursorIcon::Crosshair => "crosshair",
            CursorIcon::Pointer => "pointer",
            CursorIcon::Move => "move",
            CursorIcon::Resize(Corner::NW) | CursorIcon::Resize(Corner::SE) => "nwse-resize",
            CursorIcon::Resize(Corner::NE) | CursorIcon::Resize(Corner::SW) => "nesw-resize",
        }
    }
}

//! Surface double that records draw calls

use super::Surface;
use crate::config::TagColor;
use crate::domain::{Point, Rect};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear,
    Rect { rect: Rect, color: TagColor, focused: bool },
    Polygon { items: Vec<Point>, color: TagColor, closed: bool, focused: bool },
    PreviewLine { from: Point, to: Point },
    ClosingMarker { at: Point },
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
    /// Calls since the most recent clear
    pub fn last_frame(&self) -> &[DrawCall] {
        let start = self
            .calls
            .iter()
            .rposition(|c| *c == DrawCall::Clear)
            .map_or(0, |i| i + 1);
        &self.calls[start..]
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self) {
        self.calls.push(DrawCall::Clear);
    }

    fn stroke_rect(&mut self, rect: &Rect, color: TagColor, focused: bool) {
        self.calls.push(DrawCall::Rect {
            rect: *rect,
            color,
            focused,
        });
    }

    fn stroke_polygon(&mut self, items: &[Point], color: TagColor, closed: bool, focused: bool) {
        self.calls.push(DrawCall::Polygon {
            items: items.to_vec(),
            color,
            closed,
            focused,
        });
    }

    fn preview_line(&mut self, from: Point, to: Point, _color: TagColor) {
        self.calls.push(DrawCall::PreviewLine { from, to });
    }

    fn closing_marker(&mut self, at: Point, _color: TagColor) {
        self.calls.push(DrawCall::ClosingMarker { at });
    }
}

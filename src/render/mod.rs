//! Annotation rendering module
//!
//! This module contains:
//! - The [`Surface`] trait the store draws through
//! - Styling constants shared by surfaces
//! - A tiny-skia surface that rasterizes the overlay and flattens it onto the image

pub mod geometry;
pub mod pixmap;
#[cfg(test)]
pub(crate) mod recording;

pub use pixmap::PixmapSurface;

use crate::config::TagColor;
use crate::domain::{Point, Rect};

/// Drawing target for the annotation overlay, in display coordinates
pub trait Surface {
    /// Erase the whole overlay
    fn clear(&mut self);

    /// Outline a rectangle; `rect` may have inverted corners
    fn stroke_rect(&mut self, rect: &Rect, color: TagColor, focused: bool);

    /// Outline a vertex chain, joining last to first when `closed`
    fn stroke_polygon(&mut self, items: &[Point], color: TagColor, closed: bool, focused: bool);

    /// Thin guide line that is never persisted
    fn preview_line(&mut self, from: Point, to: Point, color: TagColor);

    /// Highlight vertex 0 when a click would close the ring
    fn closing_marker(&mut self, at: Point, color: TagColor);
}

//! Annotation types for labelled image regions
//!
//! [`Annotation`] is the host-facing unit in natural image coordinates.
//! [`DrawnShape`] is the same pair held by the engine in display coordinates.
//! Converting between them is the job of [`crate::mapper::CoordinateMapper`].

use serde::{Deserialize, Serialize};

use super::geometry::{Point, Polygon, Rect};

/// Region geometry, serialized as `{"rect": {..}}` or `{"polygon": {..}}`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    Rect(Rect),
    Polygon(Polygon),
}

impl Shape {
    pub fn as_rect(&self) -> Option<&Rect> {
        match self {
            Shape::Rect(rect) => Some(rect),
            Shape::Polygon(_) => None,
        }
    }

    pub fn as_polygon(&self) -> Option<&Polygon> {
        match self {
            Shape::Polygon(polygon) => Some(polygon),
            Shape::Rect(_) => None,
        }
    }

    /// Check if the point falls inside this shape
    pub fn contains(&self, p: Point) -> bool {
        match self {
            Shape::Rect(rect) => crate::hit_test::point_in_rect(p.x, p.y, rect),
            Shape::Polygon(polygon) => crate::hit_test::point_in_polygon(p, &polygon.items),
        }
    }

    pub fn translate(&mut self, dx: f32, dy: f32) {
        match self {
            Shape::Rect(rect) => *rect = rect.translate(dx, dy),
            Shape::Polygon(polygon) => polygon.translate(dx, dy),
        }
    }

    pub fn scale(&self, factor: f32) -> Shape {
        match self {
            Shape::Rect(rect) => Shape::Rect(rect.scale(factor)),
            Shape::Polygon(polygon) => Shape::Polygon(polygon.scale(factor)),
        }
    }
}

/// Entry of the master tag palette
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    /// Unique identifier referenced by annotations
    pub name: String,
    /// Text shown for the tag
    pub label: String,
    /// Color literal or design token
    pub color: String,
}

/// Labelled shape in natural image coordinates
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub shape: Shape,
    /// `name` of a palette tag
    pub tag: String,
}

/// Labelled shape held by the engine, in display coordinates
///
/// Selection is not stored here; the store tracks the focused index.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawnShape {
    pub shape: Shape,
    pub tag: String,
}

impl DrawnShape {
    pub fn new(shape: Shape, tag: impl Into<String>) -> Self {
        Self {
            shape,
            tag: tag.into(),
        }
    }
}

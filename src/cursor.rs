//! Cursor affordance for a hovering pointer

use crate::domain::{CursorIcon, DrawnShape, Point, Shape, Tool};
use crate::hit_test;

/// Pick the cursor to show while no drag is in progress
///
/// Handles of the focused shape win, then hovering any shape, then the tool's
/// own cursor.
pub fn resolve_cursor(
    shapes: &[DrawnShape],
    focused: Option<usize>,
    p: Point,
    tool: Tool,
    handle_radius: f32,
) -> CursorIcon {
    match focused.and_then(|i| shapes.get(i)).map(|s| &s.shape) {
        Some(Shape::Rect(rect)) => {
            if let Some(corner) = hit_test::corner_handle(rect, p.x, p.y, handle_radius) {
                return CursorIcon::Resize(corner);
            }
        }
        Some(Shape::Polygon(polygon)) => {
            // No per-vertex editing: a vertex grabs the whole polygon
            if hit_test::vertex_handle(&polygon.items, p.x, p.y, handle_radius).is_some() {
                return CursorIcon::Move;
            }
        }
        None => {}
    }

    if shapes.iter().any(|s| s.shape.contains(p)) {
        CursorIcon::Pointer
    } else if tool == Tool::Select {
        CursorIcon::Default
    } else {
        CursorIcon::Crosshair
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Corner, Polygon, Rect};

    fn shapes() -> Vec<DrawnShape> {
        vec![
            DrawnShape::new(Shape::Rect(Rect::new(10.0, 10.0, 60.0, 60.0)), "cat"),
            DrawnShape::new(
                Shape::Polygon(Polygon::new(vec![
                    Point::new(100.0, 100.0),
                    Point::new(150.0, 100.0),
                    Point::new(150.0, 150.0),
                ])),
                "dog",
            ),
        ]
    }

    #[test]
    fn test_focused_rect_corner_resizes() {
        let cursor = resolve_cursor(&shapes(), Some(0), Point::new(61.0, 9.0), Tool::Rect, 8.0);
        assert_eq!(cursor, CursorIcon::Resize(Corner::NE));
    }

    #[test]
    fn test_unfocused_rect_corner_is_just_hover() {
        let cursor = resolve_cursor(&shapes(), None, Point::new(60.0, 10.0), Tool::Rect, 8.0);
        assert_eq!(cursor, CursorIcon::Pointer);
    }

    #[test]
    fn test_focused_polygon_vertex_moves() {
        let p = Point::new(152.0, 152.0);
        let cursor = resolve_cursor(&shapes(), Some(1), p, Tool::Select, 8.0);
        assert_eq!(cursor, CursorIcon::Move);
    }

    #[test]
    fn test_hover_and_tool_fallbacks() {
        let s = shapes();
        let inside = Point::new(30.0, 30.0);
        let outside = Point::new(300.0, 5.0);
        let cursor = |shapes: &[DrawnShape], focused, p, tool| {
            resolve_cursor(shapes, focused, p, tool, 8.0)
        };
        assert_eq!(cursor(&s, Some(1), inside, Tool::Rect), CursorIcon::Pointer);
        assert_eq!(cursor(&s, None, outside, Tool::Select), CursorIcon::Default);
        assert_eq!(cursor(&s, None, outside, Tool::Polygon), CursorIcon::Crosshair);
        assert_eq!(cursor(&[], None, inside, Tool::Rect), CursorIcon::Crosshair);
    }
}

//! Polygon gesture state machine: multi-click creation and rigid moves

use crate::config::EngineSettings;
use crate::domain::{Point, Polygon};
use crate::hit_test;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum PolygonState {
    #[default]
    Idle,
    /// Open ring, vertex 0 first
    Collecting { items: Vec<Point> },
    /// Dragging the focused polygon
    Moving {
        origin: Point,
        last: Point,
        dragged: bool,
    },
}

/// Result of a click while the polygon tool is active
#[derive(Debug, Clone, PartialEq)]
pub enum PolygonClick {
    /// First vertex placed
    Started,
    /// Vertex appended to the open ring
    Added,
    /// Clicked vertex 0 with too few vertices; still collecting
    TooFewToClose,
    /// Ring closed
    Closed(Polygon),
}

/// Ephemeral guide from the last vertex to the pointer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewLine {
    pub from: Point,
    pub to: Point,
    /// Pointer is over vertex 0 and a click would close the ring
    pub closing: bool,
}

#[derive(Debug, Clone)]
pub struct PolygonAnnotator {
    state: PolygonState,
    handle_radius: f32,
    close_radius: f32,
    drag_threshold: f32,
}

impl PolygonAnnotator {
    pub fn new(settings: &EngineSettings) -> Self {
        Self {
            state: PolygonState::Idle,
            handle_radius: settings.handle_radius,
            close_radius: settings.close_radius,
            drag_threshold: settings.drag_threshold,
        }
    }

    pub fn is_collecting(&self) -> bool {
        matches!(self.state, PolygonState::Collecting { .. })
    }

    pub fn is_moving(&self) -> bool {
        matches!(self.state, PolygonState::Moving { .. })
    }

    /// Vertices placed so far
    pub fn pending(&self) -> &[Point] {
        match &self.state {
            PolygonState::Collecting { items } => items,
            _ => &[],
        }
    }

    /// Drop any gesture in progress, including an open ring
    pub fn reset(&mut self) {
        self.state = PolygonState::Idle;
    }

    /// Grab the focused polygon if the press lands on it
    ///
    /// Ignored while a ring is being collected. Returns whether the press was taken.
    pub fn on_mouse_down(&mut self, p: Point, focused: Option<&Polygon>) -> bool {
        if self.is_collecting() {
            return false;
        }
        let Some(polygon) = focused else {
            return false;
        };
        let grabbed = hit_test::point_in_polygon(p, &polygon.items)
            || hit_test::vertex_handle(&polygon.items, p.x, p.y, self.handle_radius).is_some();
        if grabbed {
            self.state = PolygonState::Moving {
                origin: p,
                last: p,
                dragged: false,
            };
        }
        grabbed
    }

    /// Translation to apply to the focused polygon, if the drag is live
    pub fn on_mouse_move(&mut self, p: Point) -> Option<(f32, f32)> {
        let PolygonState::Moving {
            origin,
            last,
            dragged,
        } = &mut self.state
        else {
            return None;
        };
        if !*dragged && origin.distance(p) <= self.drag_threshold {
            return None;
        }
        *dragged = true;
        let delta = (p.x - last.x, p.y - last.y);
        *last = p;
        Some(delta)
    }

    /// End a move; returns whether the polygon was actually dragged
    pub fn finish_move(&mut self) -> bool {
        match self.state {
            PolygonState::Moving { dragged, .. } => {
                self.state = PolygonState::Idle;
                dragged
            }
            _ => false,
        }
    }

    /// Place a vertex, or close the ring when clicking near vertex 0
    pub fn on_click(&mut self, p: Point) -> PolygonClick {
        let PolygonState::Collecting { items } = &mut self.state else {
            log::debug!("Starting polygon at {p:?}");
            self.state = PolygonState::Collecting { items: vec![p] };
            return PolygonClick::Started;
        };

        if !hit_test::near_first_vertex(p, items, self.close_radius) {
            items.push(p);
            return PolygonClick::Added;
        }
        if items.len() < Polygon::MIN_VERTICES {
            return PolygonClick::TooFewToClose;
        }
        let items = std::mem::take(items);
        self.state = PolygonState::Idle;
        log::debug!("Closing polygon with {} vertices", items.len());
        PolygonClick::Closed(Polygon::new(items))
    }

    /// Guide line to draw for the pointer, while collecting
    pub fn preview(&self, pointer: Point) -> Option<PreviewLine> {
        let PolygonState::Collecting { items } = &self.state else {
            return None;
        };
        let from = *items.last()?;
        Some(PreviewLine {
            from,
            to: pointer,
            closing: items.len() >= Polygon::MIN_VERTICES
                && hit_test::near_first_vertex(pointer, items, self.close_radius),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn annotator() -> PolygonAnnotator {
        PolygonAnnotator::new(&EngineSettings::default())
    }

    fn click_all(polygon: &mut PolygonAnnotator, points: &[(f32, f32)]) -> Vec<PolygonClick> {
        points
            .iter()
            .map(|&(x, y)| polygon.on_click(Point::new(x, y)))
            .collect()
    }

    #[test]
    fn test_square_closes_on_first_vertex() {
        let mut polygon = annotator();
        let clicks = click_all(&mut polygon, &[(0.0, 0.0), (50.0, 0.0), (50.0, 50.0), (0.0, 50.0)]);
        assert_eq!(clicks[0], PolygonClick::Started);
        assert!(clicks[1..].iter().all(|c| *c == PolygonClick::Added));

        let PolygonClick::Closed(closed) = polygon.on_click(Point::new(2.0, 3.0)) else {
            panic!("ring should close");
        };
        assert_eq!(closed.items.len(), 4);
        assert_eq!(closed.items[0], Point::new(0.0, 0.0));
        assert!(!polygon.is_collecting());
    }

    #[test]
    fn test_far_click_appends_vertex() {
        let mut polygon = annotator();
        click_all(&mut polygon, &[(0.0, 0.0), (50.0, 0.0), (50.0, 50.0), (0.0, 50.0)]);
        assert_eq!(polygon.on_click(Point::new(-30.0, 25.0)), PolygonClick::Added);
        assert_eq!(polygon.pending().len(), 5);
    }

    #[test]
    fn test_two_vertices_cannot_close() {
        let mut polygon = annotator();
        click_all(&mut polygon, &[(0.0, 0.0), (50.0, 0.0)]);
        assert_eq!(polygon.on_click(Point::new(1.0, 1.0)), PolygonClick::TooFewToClose);
        assert!(polygon.is_collecting());
        assert_eq!(polygon.pending().len(), 2);
    }

    #[test]
    fn test_three_vertices_close() {
        let mut polygon = annotator();
        click_all(&mut polygon, &[(0.0, 0.0), (50.0, 0.0), (25.0, 40.0)]);
        assert!(matches!(
            polygon.on_click(Point::new(0.0, 0.0)),
            PolygonClick::Closed(p) if p.items.len() == 3
        ));
    }

    #[test]
    fn test_preview_line_and_closing_hint() {
        let mut polygon = annotator();
        assert_eq!(polygon.preview(Point::new(5.0, 5.0)), None);
        click_all(&mut polygon, &[(0.0, 0.0), (50.0, 0.0)]);
        let line = polygon.preview(Point::new(40.0, 40.0)).unwrap();
        assert_eq!(line.from, Point::new(50.0, 0.0));
        assert!(!line.closing);
        // Two vertices: hovering vertex 0 is not a valid close yet
        assert!(!polygon.preview(Point::new(1.0, 1.0)).unwrap().closing);
        polygon.on_click(Point::new(50.0, 50.0));
        assert!(polygon.preview(Point::new(1.0, 1.0)).unwrap().closing);
    }

    #[test]
    fn test_rigid_move() {
        let mut shape = Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(20.0, 0.0),
            Point::new(0.0, 20.0),
        ]);
        let mut polygon = annotator();
        assert!(polygon.on_mouse_down(Point::new(5.0, 5.0), Some(&shape)));
        assert_eq!(polygon.on_mouse_move(Point::new(6.0, 5.0)), None);
        let (dx, dy) = polygon.on_mouse_move(Point::new(15.0, 10.0)).unwrap();
        shape.translate(dx, dy);
        assert_eq!(shape.items[1], Point::new(30.0, 5.0));
        assert!(polygon.finish_move());
        assert!(!polygon.is_moving());
    }

    #[test]
    fn test_press_outside_polygon_is_not_taken() {
        let shape = Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(20.0, 0.0),
            Point::new(0.0, 20.0),
        ]);
        let mut polygon = annotator();
        assert!(!polygon.on_mouse_down(Point::new(50.0, 50.0), Some(&shape)));
        assert!(!polygon.finish_move());
    }
}

//! Rectangle gesture state machine: draw, resize by corner, move

use crate::config::EngineSettings;
use crate::domain::{Corner, Point, Rect};
use crate::hit_test;

/// Gesture in progress
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum RectState {
    #[default]
    Idle,
    /// Pressed on empty canvas, not yet past the drag threshold
    Pressed { anchor: Point },
    /// Spanning a new rectangle from `anchor`
    Drawing { anchor: Point, current: Point },
    /// Dragging `corner` of the focused rectangle around the fixed `pivot`
    Resizing {
        corner: Corner,
        pivot: Point,
        origin: Point,
        dragged: bool,
    },
    /// Dragging the focused rectangle's body
    Moving {
        origin: Point,
        last: Point,
        dragged: bool,
    },
}

/// Result of a pointer move
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RectMove {
    /// Nothing to apply
    None,
    /// New rectangle being drawn; not part of the store yet
    Preview(Rect),
    /// Replacement geometry for the focused rectangle
    Edited(Rect),
}

/// Result of the click that ends a gesture
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RectClick {
    /// No drag happened; the caller treats it as a plain click
    Click(Point),
    /// A finished rectangle for the store
    Created(Rect),
    /// Resize or move of the focused rectangle finished
    Edited,
    /// Drawn rectangle had no area
    Rejected,
}

#[derive(Debug, Clone)]
pub struct RectAnnotator {
    state: RectState,
    handle_radius: f32,
    drag_threshold: f32,
}

impl RectAnnotator {
    pub fn new(settings: &EngineSettings) -> Self {
        Self {
            state: RectState::Idle,
            handle_radius: settings.handle_radius,
            drag_threshold: settings.drag_threshold,
        }
    }

    pub fn state(&self) -> RectState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == RectState::Idle
    }

    /// Drop any gesture in progress
    pub fn reset(&mut self) {
        self.state = RectState::Idle;
    }

    /// Start a gesture
    ///
    /// A press on a corner of `focused` resizes it, a press inside it moves it.
    /// Otherwise, when `can_draw` is set, the press anchors a new rectangle.
    /// Returns whether the press was taken.
    pub fn on_mouse_down(&mut self, p: Point, focused: Option<&Rect>, can_draw: bool) -> bool {
        if let Some(rect) = focused {
            if let Some(corner) = hit_test::corner_handle(rect, p.x, p.y, self.handle_radius) {
                let pivot = corner.opposite().point(rect);
                log::debug!("Resizing rect from {corner:?}, pivot {pivot:?}");
                self.state = RectState::Resizing {
                    corner,
                    pivot,
                    origin: p,
                    dragged: false,
                };
                return true;
            }
            if hit_test::point_in_rect(p.x, p.y, rect) {
                self.state = RectState::Moving {
                    origin: p,
                    last: p,
                    dragged: false,
                };
                return true;
            }
        }
        if can_draw {
            self.state = RectState::Pressed { anchor: p };
            return true;
        }
        self.state = RectState::Idle;
        false
    }

    /// Advance the gesture to the pointer position
    pub fn on_mouse_move(&mut self, p: Point, focused: Option<&Rect>) -> RectMove {
        let threshold = self.drag_threshold;
        match &mut self.state {
            RectState::Idle => RectMove::None,
            RectState::Pressed { anchor } => {
                if anchor.distance(p) <= threshold {
                    return RectMove::None;
                }
                let anchor = *anchor;
                log::debug!("Drawing rect from {anchor:?}");
                self.state = RectState::Drawing { anchor, current: p };
                RectMove::Preview(Rect::from_corners(anchor, p))
            }
            RectState::Drawing { anchor, current } => {
                *current = p;
                RectMove::Preview(Rect::from_corners(*anchor, p))
            }
            RectState::Resizing {
                pivot,
                origin,
                dragged,
                ..
            } => {
                if !*dragged && origin.distance(p) <= threshold {
                    return RectMove::None;
                }
                *dragged = true;
                // Corners may cross; consumers normalize
                RectMove::Edited(Rect::from_corners(*pivot, p))
            }
            RectState::Moving {
                origin,
                last,
                dragged,
            } => {
                let Some(rect) = focused else {
                    return RectMove::None;
                };
                if !*dragged && origin.distance(p) <= threshold {
                    return RectMove::None;
                }
                *dragged = true;
                let (dx, dy) = (p.x - last.x, p.y - last.y);
                *last = p;
                RectMove::Edited(rect.translate(dx, dy))
            }
        }
    }

    /// Finish the gesture; the state is back to idle afterwards
    pub fn on_click(&mut self, p: Point) -> RectClick {
        let state = std::mem::take(&mut self.state);
        match state {
            RectState::Idle | RectState::Pressed { .. } => RectClick::Click(p),
            RectState::Drawing { anchor, .. } => {
                let rect = Rect::from_corners(anchor, p);
                if rect.width() > 0.0 && rect.height() > 0.0 {
                    RectClick::Created(rect)
                } else {
                    log::debug!("Dropping zero-area rect at {anchor:?}");
                    RectClick::Rejected
                }
            }
            RectState::Resizing { dragged, .. } | RectState::Moving { dragged, .. } => {
                if dragged {
                    RectClick::Edited
                } else {
                    RectClick::Click(p)
                }
            }
        }
    }

    /// Rectangle being drawn, for preview rendering
    pub fn preview(&self) -> Option<Rect> {
        match self.state {
            RectState::Drawing { anchor, current } => Some(Rect::from_corners(anchor, current)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn annotator() -> RectAnnotator {
        RectAnnotator::new(&EngineSettings::default())
    }

    #[test]
    fn test_drag_creates_rect() {
        let mut rect = annotator();
        assert!(rect.on_mouse_down(Point::new(10.0, 10.0), None, true));
        assert_eq!(
            rect.on_mouse_move(Point::new(60.0, 30.0), None),
            RectMove::Preview(Rect::new(10.0, 10.0, 60.0, 30.0))
        );
        rect.on_mouse_move(Point::new(110.0, 60.0), None);
        assert_eq!(rect.preview(), Some(Rect::new(10.0, 10.0, 110.0, 60.0)));
        assert_eq!(
            rect.on_click(Point::new(110.0, 60.0)),
            RectClick::Created(Rect::new(10.0, 10.0, 110.0, 60.0))
        );
        assert!(rect.is_idle());
    }

    #[test]
    fn test_drag_in_any_direction() {
        let mut rect = annotator();
        rect.on_mouse_down(Point::new(100.0, 100.0), None, true);
        rect.on_mouse_move(Point::new(40.0, 20.0), None);
        assert_eq!(
            rect.on_click(Point::new(40.0, 20.0)),
            RectClick::Created(Rect::new(100.0, 100.0, 40.0, 20.0))
        );
    }

    #[test]
    fn test_click_without_drag_is_plain_click() {
        let mut rect = annotator();
        rect.on_mouse_down(Point::new(10.0, 10.0), None, true);
        // Jitter below the drag threshold
        assert_eq!(rect.on_mouse_move(Point::new(11.0, 11.0), None), RectMove::None);
        assert_eq!(rect.on_click(Point::new(11.0, 11.0)), RectClick::Click(Point::new(11.0, 11.0)));
        assert!(rect.is_idle());
    }

    #[test]
    fn test_zero_area_rect_is_rejected() {
        let mut rect = annotator();
        rect.on_mouse_down(Point::new(10.0, 10.0), None, true);
        rect.on_mouse_move(Point::new(50.0, 10.0), None);
        assert_eq!(rect.on_click(Point::new(50.0, 10.0)), RectClick::Rejected);
    }

    #[test]
    fn test_resize_keeps_pivot_fixed() {
        let focused = Rect::new(10.0, 10.0, 50.0, 50.0);
        let mut rect = annotator();
        assert!(rect.on_mouse_down(Point::new(51.0, 49.0), Some(&focused), true));
        assert!(matches!(rect.state(), RectState::Resizing { corner: Corner::SE, .. }));
        assert_eq!(
            rect.on_mouse_move(Point::new(80.0, 90.0), Some(&focused)),
            RectMove::Edited(Rect::new(10.0, 10.0, 80.0, 90.0))
        );
        // Crossing over the pivot is allowed
        assert_eq!(
            rect.on_mouse_move(Point::new(0.0, 5.0), Some(&focused)),
            RectMove::Edited(Rect::new(10.0, 10.0, 0.0, 5.0))
        );
        assert_eq!(rect.on_click(Point::new(0.0, 5.0)), RectClick::Edited);
    }

    #[test]
    fn test_move_translates_by_delta() {
        let mut focused = Rect::new(10.0, 10.0, 50.0, 50.0);
        let mut rect = annotator();
        assert!(rect.on_mouse_down(Point::new(30.0, 30.0), Some(&focused), false));
        for p in [Point::new(40.0, 35.0), Point::new(45.0, 25.0)] {
            if let RectMove::Edited(moved) = rect.on_mouse_move(p, Some(&focused)) {
                focused = moved;
            }
        }
        assert_eq!(focused, Rect::new(25.0, 5.0, 65.0, 45.0));
        assert_eq!(rect.on_click(Point::new(45.0, 25.0)), RectClick::Edited);
    }

    #[test]
    fn test_press_outside_without_draw_is_not_taken() {
        let focused = Rect::new(10.0, 10.0, 50.0, 50.0);
        let mut rect = annotator();
        assert!(!rect.on_mouse_down(Point::new(200.0, 200.0), Some(&focused), false));
        assert!(rect.is_idle());
    }
}

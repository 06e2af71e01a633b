//! Shape store: the root of the annotation engine
//!
//! Owns the shape list (newest first), the active tool and tag, and the single
//! focused shape. Pointer input is routed into the rectangle and polygon gesture
//! machines; every committed change redraws the surface and queues the natural
//! space annotation list for the host.

use anyhow::Context;
use image::RgbaImage;

use crate::annotations::polygon::{PolygonAnnotator, PolygonClick};
use crate::annotations::rect::{RectAnnotator, RectClick, RectMove};
use crate::config::{AnnotatorConfig, Palette, ResolveColor};
use crate::cursor::resolve_cursor;
use crate::domain::{Annotation, CursorIcon, DrawnShape, Point, Shape, Tag, Tool};
use crate::mapper::CoordinateMapper;
use crate::render::{PixmapSurface, Surface};
use crate::session::messages::{HostEvent, MouseButton};
use crate::source::SourceImage;

/// Everything that only exists once an image is loaded
struct Canvas<S> {
    image: String,
    mapper: CoordinateMapper,
    surface: S,
}

pub struct ShapeStore<S: Surface> {
    config: AnnotatorConfig,
    colors: Box<dyn ResolveColor>,
    shapes: Vec<DrawnShape>,
    focused: Option<usize>,
    tool: Tool,
    active_tag: String,
    rect: RectAnnotator,
    polygon: PolygonAnnotator,
    canvas: Option<Canvas<S>>,
    pointer: Option<Point>,
    cursor: CursorIcon,
    events: Vec<HostEvent>,
}

impl<S: Surface> ShapeStore<S> {
    pub fn new(config: AnnotatorConfig) -> Self {
        let colors = Palette::new(&config.tags, config.settings.fallback_color);
        Self {
            colors: Box::new(colors),
            shapes: Vec::new(),
            focused: None,
            tool: Tool::default(),
            active_tag: config.default_tag(),
            rect: RectAnnotator::new(&config.settings),
            polygon: PolygonAnnotator::new(&config.settings),
            canvas: None,
            pointer: None,
            cursor: CursorIcon::default(),
            events: Vec::new(),
            config,
        }
    }

    /// Replace the palette-based color lookup, e.g. with a theme-aware one
    pub fn with_color_resolver(mut self, colors: impl ResolveColor + 'static) -> Self {
        self.colors = Box::new(colors);
        self
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Set up the canvas for a freshly loaded image
    ///
    /// Discards any previous shapes and gestures, then seeds the configured
    /// items converted to display space. On a precondition failure the engine
    /// stays unloaded and a `LoadFailed` event is queued. Returns whether the
    /// canvas is ready.
    pub fn load(
        &mut self,
        image: &str,
        natural_size: (u32, u32),
        make_surface: impl FnOnce(u32, u32) -> anyhow::Result<S>,
    ) -> bool {
        self.unload();
        let (natural_width, natural_height) = natural_size;
        let mapper = match self
            .config
            .display_height()
            .and_then(|height| CoordinateMapper::new(natural_height as f32, height))
        {
            Ok(mapper) => mapper,
            Err(err) => {
                self.fail_load(err);
                return false;
            }
        };
        let (width, height) = mapper.display_size(natural_width, natural_height);
        let surface = match make_surface(width, height) {
            Ok(surface) => surface,
            Err(err) => {
                self.fail_load(err);
                return false;
            }
        };

        self.shapes = self
            .config
            .items
            .iter()
            .flatten()
            .map(|item| mapper.to_display(item))
            .collect();
        log::debug!(
            "Loaded {image} at scale {} with {} shapes",
            mapper.scale(),
            self.shapes.len()
        );
        self.canvas = Some(Canvas {
            image: image.to_string(),
            mapper,
            surface,
        });
        self.commit();
        true
    }

    /// Report that the image itself could not be obtained
    pub fn fail_load(&mut self, err: anyhow::Error) {
        log::warn!("Image annotator {:?} failed to load: {:#}", self.config.name, err);
        self.unload();
        self.events.push(HostEvent::LoadFailed {
            name: self.config.name.clone(),
            reason: format!("{err:#}"),
        });
    }

    /// Tear down the canvas and every shape, e.g. when the image goes away
    pub fn unload(&mut self) {
        self.canvas = None;
        self.shapes.clear();
        self.focused = None;
        self.pointer = None;
        self.rect.reset();
        self.polygon.reset();
    }

    pub fn is_loaded(&self) -> bool {
        self.canvas.is_some()
    }

    /// Identity of the loaded image
    pub fn image(&self) -> Option<&str> {
        self.canvas.as_ref().map(|c| c.image.as_str())
    }

    // ========================================================================
    // Toolbar operations
    // ========================================================================

    /// Switch tool, cancelling any gesture and clearing focus
    pub fn select_tool(&mut self, tool: Tool) {
        self.rect.reset();
        self.polygon.reset();
        self.focused = None;
        self.tool = tool;
        self.cursor = match tool {
            Tool::Select => CursorIcon::Default,
            Tool::Rect | Tool::Polygon => CursorIcon::Crosshair,
        };
        self.commit();
    }

    /// Tag new shapes with `name`; a focused shape is relabelled in place
    pub fn activate_tag(&mut self, name: &str) {
        self.active_tag = name.to_string();
        if let Some(shape) = self.focused.and_then(|i| self.shapes.get_mut(i)) {
            shape.tag = name.to_string();
        }
        self.commit();
    }

    /// Remove the focused shape; no-op without focus
    pub fn remove_focused(&mut self) {
        let Some(index) = self.focused.take() else {
            return;
        };
        self.cancel_edit();
        self.shapes.remove(index);
        self.commit();
    }

    /// Remove every shape; no-op when already empty
    pub fn remove_all(&mut self) {
        if self.shapes.is_empty() {
            return;
        }
        self.cancel_edit();
        self.shapes.clear();
        self.focused = None;
        self.commit();
    }

    /// Focus the front-most shape under the point, or nothing
    ///
    /// A hit also makes the shape's tag the active tag.
    pub fn select(&mut self, x: f32, y: f32) {
        let p = Point::new(x, y);
        self.focused = self.shapes.iter().position(|s| s.shape.contains(p));
        if let Some(shape) = self.focused_shape() {
            self.active_tag = shape.tag.clone();
        }
        self.commit();
    }

    // ========================================================================
    // Pointer input
    // ========================================================================

    pub fn on_mouse_down(&mut self, x: f32, y: f32, button: MouseButton) {
        if !self.is_loaded() || button != MouseButton::Left {
            return;
        }
        let p = Point::new(x, y);
        self.pointer = Some(p);
        if self.polygon.is_collecting() {
            return;
        }

        let focused = self.focused.and_then(|i| self.shapes.get(i)).map(|s| &s.shape);
        let can_draw = self.tool == Tool::Rect;
        match focused {
            Some(Shape::Rect(rect)) => {
                self.rect.on_mouse_down(p, Some(rect), can_draw);
            }
            Some(Shape::Polygon(polygon)) => {
                if !self.polygon.on_mouse_down(p, Some(polygon)) {
                    self.rect.on_mouse_down(p, None, can_draw);
                }
            }
            None => {
                self.rect.on_mouse_down(p, None, can_draw);
            }
        }
    }

    pub fn on_mouse_move(&mut self, x: f32, y: f32) {
        if !self.is_loaded() {
            return;
        }
        let p = Point::new(x, y);
        self.pointer = Some(p);
        log::trace!("Pointer at {p:?}");

        if !self.rect.is_idle() {
            let focused = self.focused.and_then(|i| self.shapes.get(i));
            match self.rect.on_mouse_move(p, focused.and_then(|s| s.shape.as_rect())) {
                RectMove::None => {}
                RectMove::Preview(_) => {
                    // A new shape is being drawn; nothing else stays selected
                    self.focused = None;
                    self.redraw();
                }
                RectMove::Edited(rect) => {
                    if let Some(shape) = self.focused.and_then(|i| self.shapes.get_mut(i)) {
                        shape.shape = Shape::Rect(rect);
                        self.commit();
                    }
                }
            }
            return;
        }

        if self.polygon.is_moving() {
            if let Some((dx, dy)) = self.polygon.on_mouse_move(p)
                && let Some(shape) = self.focused.and_then(|i| self.shapes.get_mut(i))
            {
                shape.shape.translate(dx, dy);
                self.commit();
            }
            return;
        }

        if self.polygon.is_collecting() {
            let closing = self.polygon.preview(p).is_some_and(|line| line.closing);
            self.cursor = if closing {
                CursorIcon::Pointer
            } else {
                CursorIcon::Crosshair
            };
            self.redraw();
            return;
        }

        self.update_cursor(p);
    }

    pub fn on_click(&mut self, x: f32, y: f32) {
        if !self.is_loaded() {
            return;
        }
        let p = Point::new(x, y);
        self.pointer = Some(p);

        let created = match self.rect.on_click(p) {
            RectClick::Created(rect) => {
                self.push_shape(Shape::Rect(rect));
                true
            }
            // Already committed while dragging
            RectClick::Edited => false,
            RectClick::Rejected => {
                self.redraw();
                false
            }
            RectClick::Click(p) => {
                if self.polygon.finish_move() {
                    false
                } else {
                    self.click(p)
                }
            }
        };

        if created && self.config.triggers_submit() {
            self.events.push(HostEvent::Submit {
                name: self.config.name.clone(),
            });
        }
        if self.polygon.is_collecting() {
            self.cursor = CursorIcon::Crosshair;
        } else {
            self.update_cursor(p);
        }
    }

    /// Plain click for the active tool; returns whether a shape was created
    fn click(&mut self, p: Point) -> bool {
        match self.tool {
            Tool::Select | Tool::Rect => {
                self.select(p.x, p.y);
                false
            }
            Tool::Polygon => match self.polygon.on_click(p) {
                PolygonClick::Closed(polygon) => {
                    self.push_shape(Shape::Polygon(polygon));
                    true
                }
                PolygonClick::Started | PolygonClick::Added | PolygonClick::TooFewToClose => {
                    self.redraw();
                    false
                }
            },
        }
    }

    // ========================================================================
    // State
    // ========================================================================

    /// Shapes in display space, newest first
    pub fn shapes(&self) -> &[DrawnShape] {
        &self.shapes
    }

    pub fn focused(&self) -> Option<usize> {
        self.focused
    }

    pub fn focused_shape(&self) -> Option<&DrawnShape> {
        self.focused.and_then(|i| self.shapes.get(i))
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn active_tag(&self) -> &str {
        &self.active_tag
    }

    pub fn tags(&self) -> &[Tag] {
        &self.config.tags
    }

    pub fn title(&self) -> &str {
        &self.config.title
    }

    pub fn cursor(&self) -> CursorIcon {
        self.cursor
    }

    pub fn can_remove_focused(&self) -> bool {
        self.focused.is_some()
    }

    pub fn can_remove_all(&self) -> bool {
        !self.shapes.is_empty()
    }

    pub fn rect_annotator(&self) -> &RectAnnotator {
        &self.rect
    }

    pub fn polygon_annotator(&self) -> &PolygonAnnotator {
        &self.polygon
    }

    pub fn mapper(&self) -> Option<&CoordinateMapper> {
        self.canvas.as_ref().map(|c| &c.mapper)
    }

    pub fn surface(&self) -> Option<&S> {
        self.canvas.as_ref().map(|c| &c.surface)
    }

    /// Current output: every shape in natural image coordinates
    pub fn annotations(&self) -> Vec<Annotation> {
        match self.mapper() {
            Some(mapper) => self.shapes.iter().map(|s| mapper.to_natural(s)).collect(),
            None => Vec::new(),
        }
    }

    /// Drain queued host notifications
    pub fn take_events(&mut self) -> Vec<HostEvent> {
        std::mem::take(&mut self.events)
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn push_shape(&mut self, shape: Shape) {
        self.shapes.insert(0, DrawnShape::new(shape, self.active_tag.clone()));
        self.focused = self.focused.map(|i| i + 1);
        self.commit();
    }

    /// Drop a resize or move that would outlive its target
    fn cancel_edit(&mut self) {
        self.rect.reset();
        if self.polygon.is_moving() {
            self.polygon.reset();
        }
    }

    fn update_cursor(&mut self, p: Point) {
        self.cursor = resolve_cursor(
            &self.shapes,
            self.focused,
            p,
            self.tool,
            self.config.settings.handle_radius,
        );
    }

    /// Redraw and publish
    ///
    /// An undrained `Annotations` event at the back of the queue is overwritten, so
    /// a drag leaves one snapshot per drain rather than one per pointer move.
    fn commit(&mut self) {
        self.redraw();
        if !self.is_loaded() {
            return;
        }
        let event = HostEvent::Annotations {
            name: self.config.name.clone(),
            items: self.annotations(),
        };
        if let Some(HostEvent::Annotations { .. }) = self.events.last() {
            self.events.pop();
        }
        self.events.push(event);
    }

    /// Paint every shape oldest first so the newest ends up on top, then the
    /// gesture previews
    fn redraw(&mut self) {
        let Some(canvas) = self.canvas.as_mut() else {
            return;
        };
        let surface = &mut canvas.surface;
        surface.clear();
        for (i, drawn) in self.shapes.iter().enumerate().rev() {
            let color = self.colors.resolve_color(&drawn.tag);
            let focused = self.focused == Some(i);
            match &drawn.shape {
                Shape::Rect(rect) => surface.stroke_rect(rect, color, focused),
                Shape::Polygon(polygon) => {
                    surface.stroke_polygon(&polygon.items, color, true, focused)
                }
            }
        }

        let color = self.colors.resolve_color(&self.active_tag);
        if let Some(rect) = self.rect.preview() {
            surface.stroke_rect(&rect, color, false);
        }
        let pending = self.polygon.pending();
        if !pending.is_empty() {
            surface.stroke_polygon(pending, color, false, false);
            if let Some(line) = self.pointer.and_then(|p| self.polygon.preview(p)) {
                surface.preview_line(line.from, line.to, color);
                if line.closing {
                    surface.closing_marker(pending[0], color);
                }
            }
        }
    }
}

impl ShapeStore<PixmapSurface> {
    /// Load a decoded image, rendering into a tiny-skia overlay
    pub fn load_source(&mut self, source: &SourceImage) -> bool {
        let settings = self.config.settings.clone();
        self.load(
            &source.origin,
            (source.width(), source.height()),
            |width, height| PixmapSurface::new(width, height, &settings),
        )
    }

    /// The source image at display size with the current overlay painted on top
    pub fn flatten(&self, source: &SourceImage) -> anyhow::Result<RgbaImage> {
        let canvas = self.canvas.as_ref().context("No image loaded")?;
        canvas.surface.compose_onto(&source.to_display(&canvas.mapper))
    }

    /// Open and load an image file, reporting failures to the host
    pub fn load_path(&mut self, path: &str) -> bool {
        match SourceImage::open(path) {
            Ok(source) => self.load_source(&source),
            Err(err) => {
                self.fail_load(err);
                false
            }
        }
    }
}

//! Overlay rendering using tiny-skia
//!
//! The overlay lives in its own transparent pixmap the size of the display
//! canvas; [`PixmapSurface::compose_onto`] flattens it over the image.

use anyhow::Context;
use image::RgbaImage;
use tiny_skia::{
    FillRule, IntSize, LineCap, LineJoin, Paint, PathBuilder, Pixmap, PixmapPaint, Stroke,
    StrokeDash, Transform,
};

use super::Surface;
use super::geometry::{handle, preview, shape};
use crate::config::{EngineSettings, TagColor};
use crate::domain::{Point, Rect};

pub struct PixmapSurface {
    pixmap: Pixmap,
    stroke_width: f32,
    focused_stroke_width: f32,
}

impl PixmapSurface {
    /// Create a transparent overlay of the given display size
    pub fn new(width: u32, height: u32, settings: &EngineSettings) -> anyhow::Result<Self> {
        let pixmap = Pixmap::new(width, height)
            .with_context(|| format!("Cannot allocate {width}x{height} overlay"))?;
        Ok(Self {
            pixmap,
            stroke_width: settings.stroke_width,
            focused_stroke_width: settings.focused_stroke_width,
        })
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Flatten the overlay over a display-size copy of the image
    pub fn compose_onto(&self, background: &RgbaImage) -> anyhow::Result<RgbaImage> {
        let (w, h) = (background.width(), background.height());
        let size = IntSize::from_wh(w, h).context("Background image is empty")?;
        let mut canvas = Pixmap::from_vec(background.as_raw().clone(), size)
            .context("Background buffer does not match its size")?;
        canvas.draw_pixmap(
            0,
            0,
            self.pixmap.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
        RgbaImage::from_raw(w, h, canvas.take_demultiplied())
            .context("Composed buffer does not match image size")
    }

    fn stroke(&self, focused: bool) -> Stroke {
        Stroke {
            width: if focused {
                self.focused_stroke_width
            } else {
                self.stroke_width
            },
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Default::default()
        }
    }

    fn draw_handles(&mut self, points: &[Point], color: TagColor) {
        let paint = solid(color, None);
        let half = handle::SIZE / 2.0;
        for p in points {
            let rect =
                tiny_skia::Rect::from_xywh(p.x - half, p.y - half, handle::SIZE, handle::SIZE);
            if let Some(rect) = rect {
                self.pixmap.fill_rect(rect, &paint, Transform::identity(), None);
            }
        }
    }
}

/// Paint for a tag color, optionally overriding its alpha
fn solid(color: TagColor, alpha: Option<u8>) -> Paint<'static> {
    let [r, g, b, a] = color.to_rgba_u8();
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, alpha.unwrap_or(a));
    paint.anti_alias = true;
    paint
}

impl Surface for PixmapSurface {
    fn clear(&mut self) {
        self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
    }

    fn stroke_rect(&mut self, rect: &Rect, color: TagColor, focused: bool) {
        let (min_x, min_y, max_x, max_y) = rect.normalized();
        let corners = [
            Point::new(min_x, min_y),
            Point::new(max_x, min_y),
            Point::new(max_x, max_y),
            Point::new(min_x, max_y),
        ];
        self.stroke_polygon(&corners, color, true, focused);
    }

    fn stroke_polygon(&mut self, items: &[Point], color: TagColor, closed: bool, focused: bool) {
        let Some((first, rest)) = items.split_first() else {
            return;
        };
        let mut pb = PathBuilder::new();
        pb.move_to(first.x, first.y);
        for p in rest {
            pb.line_to(p.x, p.y);
        }
        if closed {
            pb.close();
        }
        // A single vertex has no path; its handle is all there is to draw
        let Some(path) = pb.finish() else {
            self.draw_handles(items, color);
            return;
        };

        if closed {
            self.pixmap.fill_path(
                &path,
                &solid(color, Some(shape::FILL_ALPHA)),
                FillRule::EvenOdd,
                Transform::identity(),
                None,
            );
        }
        let stroke = self.stroke(focused);
        self.pixmap
            .stroke_path(&path, &solid(color, None), &stroke, Transform::identity(), None);
        if focused || !closed {
            self.draw_handles(items, color);
        }
    }

    fn preview_line(&mut self, from: Point, to: Point, color: TagColor) {
        let mut pb = PathBuilder::new();
        pb.move_to(from.x, from.y);
        pb.line_to(to.x, to.y);
        let Some(path) = pb.finish() else {
            return;
        };
        let stroke = Stroke {
            width: preview::THICKNESS,
            dash: StrokeDash::new(preview::DASH.to_vec(), 0.0),
            ..Default::default()
        };
        self.pixmap
            .stroke_path(&path, &solid(color, None), &stroke, Transform::identity(), None);
    }

    fn closing_marker(&mut self, at: Point, color: TagColor) {
        let Some(path) = PathBuilder::from_circle(at.x, at.y, handle::CLOSING_RADIUS) else {
            return;
        };
        let stroke = self.stroke(true);
        self.pixmap
            .stroke_path(&path, &solid(color, None), &stroke, Transform::identity(), None);
    }
}

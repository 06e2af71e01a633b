//! Raster asset behind the annotation canvas

use std::path::Path;

use anyhow::{Context, ensure};
use image::RgbaImage;
use image::imageops::FilterType;

use crate::mapper::CoordinateMapper;

/// Decoded image in its natural resolution
#[derive(Clone, Debug)]
pub struct SourceImage {
    /// Path or URL the image was loaded from; identifies the image
    pub origin: String,
    pub rgba: RgbaImage,
}

impl SourceImage {
    /// Decode an image file from disk
    pub fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let rgba = image::open(path)
            .with_context(|| format!("Failed to load image {}", path.display()))?
            .to_rgba8();
        Self::from_rgba(path.to_string_lossy().into_owned(), rgba)
    }

    /// Wrap already decoded pixels
    pub fn from_rgba(origin: impl Into<String>, rgba: RgbaImage) -> anyhow::Result<Self> {
        let origin = origin.into();
        ensure!(
            rgba.width() > 0 && rgba.height() > 0,
            "Image {origin} has no pixels"
        );
        log::debug!(
            "SourceImage loaded: {}x{} pixels from {}",
            rgba.width(),
            rgba.height(),
            origin
        );
        Ok(Self { origin, rgba })
    }

    /// Natural width in pixels
    pub fn width(&self) -> u32 {
        self.rgba.width()
    }

    /// Natural height in pixels
    pub fn height(&self) -> u32 {
        self.rgba.height()
    }

    /// Copy scaled to the canvas size the mapper implies
    pub fn to_display(&self, mapper: &CoordinateMapper) -> RgbaImage {
        let (w, h) = mapper.display_size(self.width(), self.height());
        if (w, h) == self.rgba.dimensions() {
            return self.rgba.clone();
        }
        image::imageops::resize(&self.rgba, w, h, FilterType::Triangle)
    }
}

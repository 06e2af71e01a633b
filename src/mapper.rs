//! Conversion between natural image pixels and displayed canvas pixels
//!
//! A single uniform factor relates the two spaces, so aspect ratio is preserved.

use anyhow::{bail, ensure};

use crate::domain::{Annotation, DrawnShape};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoordinateMapper {
    scale: f32,
}

impl CoordinateMapper {
    /// `display_height` defaults to the natural height
    pub fn new(natural_height: f32, display_height: Option<f32>) -> anyhow::Result<Self> {
        if !(natural_height.is_finite() && natural_height > 0.0) {
            bail!("natural image height must be positive, got {natural_height}");
        }
        let display_height = display_height.unwrap_or(natural_height);
        ensure!(
            display_height.is_finite() && display_height > 0.0,
            "display height must be positive, got {display_height}"
        );
        Ok(Self {
            scale: display_height / natural_height,
        })
    }

    /// Display pixels per natural pixel
    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn to_display(&self, annotation: &Annotation) -> DrawnShape {
        DrawnShape::new(annotation.shape.scale(self.scale), annotation.tag.clone())
    }

    pub fn to_natural(&self, shape: &DrawnShape) -> Annotation {
        Annotation {
            shape: shape.shape.scale(1.0 / self.scale),
            tag: shape.tag.clone(),
        }
    }

    /// Canvas size for an image of the given natural size
    pub fn display_size(&self, natural_width: u32, natural_height: u32) -> (u32, u32) {
        (
            ((natural_width as f32) * self.scale).round().max(1.0) as u32,
            ((natural_height as f32) * self.scale).round().max(1.0) as u32,
        )
    }
}

//! Initialization model, engine tunables and tag colors

use std::collections::HashMap;
use std::str::FromStr;

use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};

use crate::domain::{Annotation, Tag};

/// Serializable color representation, channels in 0.0-1.0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TagColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    #[serde(default = "default_alpha")]
    pub a: f32,
}

fn default_alpha() -> f32 {
    1.0
}

impl Default for TagColor {
    fn default() -> Self {
        Self::RED
    }
}

impl TagColor {
    /// Fallback for tags that cannot be resolved
    pub const RED: TagColor = TagColor {
        r: 0.9,
        g: 0.1,
        b: 0.1,
        a: 1.0,
    };

    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    /// Convert to image crate RGBA format (0-255)
    pub fn to_rgba_u8(self) -> [u8; 4] {
        [
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8,
            (self.a * 255.0).round() as u8,
        ]
    }
}

impl FromStr for TagColor {
    type Err = anyhow::Error;

    /// Parse `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)` or `rgba(r, g, b, a)`
    fn from_str(s: &str) -> anyhow::Result<Self> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex).with_context(|| format!("invalid hex color {s:?}"));
        }
        let lower = s.to_ascii_lowercase();
        let args = lower
            .strip_prefix("rgba(")
            .or_else(|| lower.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'));
        let Some(args) = args else {
            bail!("unsupported color {s:?}");
        };
        let parts: Vec<&str> = args.split(',').map(str::trim).collect();
        if parts.len() != 3 && parts.len() != 4 {
            bail!("expected 3 or 4 channels in {s:?}");
        }
        let channel = |p: &str| -> anyhow::Result<u8> {
            p.parse::<u8>()
                .with_context(|| format!("invalid channel {p:?} in {s:?}"))
        };
        let alpha = match parts.get(3) {
            Some(a) => a
                .parse::<f32>()
                .with_context(|| format!("invalid alpha {a:?} in {s:?}"))?
                .clamp(0.0, 1.0),
            None => 1.0,
        };
        let mut color = TagColor::from_rgba8(
            channel(parts[0])?,
            channel(parts[1])?,
            channel(parts[2])?,
            255,
        );
        color.a = alpha;
        Ok(color)
    }
}

fn parse_hex(hex: &str) -> anyhow::Result<TagColor> {
    let nibble = |i: usize| u8::from_str_radix(&hex[i..=i], 16).map(|v| v * 17);
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
    if !hex.is_ascii() {
        bail!("non-ascii hex digits");
    }
    let color = match hex.len() {
        3 => TagColor::from_rgba8(nibble(0)?, nibble(1)?, nibble(2)?, 255),
        6 => TagColor::from_rgba8(byte(0)?, byte(2)?, byte(4)?, 255),
        8 => TagColor::from_rgba8(byte(0)?, byte(2)?, byte(4)?, byte(6)?),
        n => bail!("expected 3, 6 or 8 hex digits, got {n}"),
    };
    Ok(color)
}

/// Resolves a tag name to the color its shapes are drawn with
pub trait ResolveColor {
    fn resolve_color(&self, tag: &str) -> TagColor;
}

/// Tag palette resolving literal colors, with a fixed fallback
#[derive(Debug, Clone)]
pub struct Palette {
    colors: HashMap<String, TagColor>,
    fallback: TagColor,
}

impl Palette {
    /// Build from the master tag list
    ///
    /// Tags whose color is not a literal (e.g. a design token) stay unresolved and
    /// draw with the fallback color.
    pub fn new(tags: &[Tag], fallback: TagColor) -> Self {
        let mut colors = HashMap::with_capacity(tags.len());
        for tag in tags {
            match tag.color.parse::<TagColor>() {
                Ok(color) => {
                    colors.insert(tag.name.clone(), color);
                }
                Err(err) => {
                    log::warn!("Tag {:?} has unresolvable color: {:#}", tag.name, err);
                }
            }
        }
        Self { colors, fallback }
    }

    /// Override the color of a tag, e.g. after the host resolved a design token
    pub fn set(&mut self, tag: impl Into<String>, color: TagColor) {
        self.colors.insert(tag.into(), color);
    }
}

impl ResolveColor for Palette {
    fn resolve_color(&self, tag: &str) -> TagColor {
        match self.colors.get(tag) {
            Some(color) => *color,
            None => {
                log::trace!("No color for tag {tag:?}, using fallback");
                self.fallback
            }
        }
    }
}

/// Engine tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Half-size of the square hit region around corner and vertex handles
    #[serde(default = "default_handle_radius")]
    pub handle_radius: f32,
    /// Half-size of the hit region around a polygon's first vertex
    #[serde(default = "default_close_radius")]
    pub close_radius: f32,
    /// Pointer travel that turns a press into a drag
    #[serde(default = "default_drag_threshold")]
    pub drag_threshold: f32,
    /// Outline width of unfocused shapes
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f32,
    /// Outline width of the focused shape
    #[serde(default = "default_focused_stroke_width")]
    pub focused_stroke_width: f32,
    /// Color for tags missing from the palette
    #[serde(default)]
    pub fallback_color: TagColor,
}

fn default_handle_radius() -> f32 {
    8.0
}

fn default_close_radius() -> f32 {
    8.0
}

fn default_drag_threshold() -> f32 {
    2.0
}

fn default_stroke_width() -> f32 {
    2.0
}

fn default_focused_stroke_width() -> f32 {
    4.0
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            handle_radius: default_handle_radius(),
            close_radius: default_close_radius(),
            drag_threshold: default_drag_threshold(),
            stroke_width: default_stroke_width(),
            focused_stroke_width: default_focused_stroke_width(),
            fallback_color: TagColor::default(),
        }
    }
}

/// Component model delivered by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatorConfig {
    /// Identifier the output is published under
    pub name: String,
    /// Path of the raster asset
    pub image: String,
    #[serde(default)]
    pub title: String,
    /// Master tag palette, in display order
    pub tags: Vec<Tag>,
    /// Prior annotations in natural image coordinates
    #[serde(default)]
    pub items: Option<Vec<Annotation>>,
    /// Ask the host to submit as soon as a shape is drawn
    #[serde(default)]
    pub trigger: Option<bool>,
    /// Display height, `"400"` or `"400px"`; natural height when absent
    #[serde(default)]
    pub image_height: Option<String>,
    #[serde(default)]
    pub settings: EngineSettings,
}

impl AnnotatorConfig {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("Failed to parse annotator model")
    }

    /// Requested display height in pixels, if one is configured
    pub fn display_height(&self) -> anyhow::Result<Option<f32>> {
        self.image_height.as_deref().map(parse_image_height).transpose()
    }

    pub fn triggers_submit(&self) -> bool {
        self.trigger.unwrap_or(false)
    }

    /// First tag of the palette, used as the initial active tag
    pub fn default_tag(&self) -> String {
        self.tags.first().map(|t| t.name.clone()).unwrap_or_default()
    }
}

/// Parse a pixel height such as `"400"` or `"400px"`
pub fn parse_image_height(value: &str) -> anyhow::Result<f32> {
    let trimmed = value.trim();
    let number = trimmed.strip_suffix("px").unwrap_or(trimmed).trim();
    let height: f32 = number
        .parse()
        .with_context(|| format!("invalid image height {value:?}"))?;
    if !height.is_finite() || height <= 0.0 {
        bail!("image height must be positive, got {value:?}");
    }
    Ok(height)
}

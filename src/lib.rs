//! Interactive rectangle and polygon region annotation over raster images
//!
//! A host loads an image into a [`ShapeStore`], forwards pointer and toolbar
//! input as [`AnnotatorMsg`], and drains [`HostEvent`]s carrying the annotation
//! list in natural image coordinates. Shapes are kept in display coordinates and
//! painted through a [`Surface`]; [`PixmapSurface`] rasterizes them with tiny-skia.

pub mod annotations;
pub mod config;
pub mod cursor;
pub mod domain;
pub mod mapper;
pub mod render;
pub mod session;
pub mod source;

pub use annotations::handlers::handle_annotator_msg;
pub use config::{AnnotatorConfig, EngineSettings, Palette, ResolveColor, TagColor};
pub use domain::{Annotation, CursorIcon, DrawnShape, Point, Polygon, Rect, Shape, Tag, Tool};
pub use mapper::CoordinateMapper;
pub use render::{PixmapSurface, Surface};
pub use session::messages::{AnnotatorMsg, HostEvent, MouseButton, PointerAction};
pub use session::state::ShapeStore;
pub use source::SourceImage;

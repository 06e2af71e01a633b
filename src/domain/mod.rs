//! Pure domain types with minimal dependencies
//!
//! This module contains the value types shared by the hit tester, the
//! gesture state machines and the store. Nothing here knows about rendering.

pub mod annotation;
pub mod geometry;
pub mod selection;

pub use annotation::*;
pub use geometry::*;
pub use selection::*;

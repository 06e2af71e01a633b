//! Drawing gestures and message handlers
//!
//! This module provides:
//! - The rectangle gesture machine (draw, resize, move)
//! - The polygon gesture machine (multi-click creation, move)
//! - Message handlers for AnnotatorMsg

pub mod handlers;
pub mod polygon;
pub mod rect;

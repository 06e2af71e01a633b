//! Message types exchanged with the host
//!
//! This module contains:
//! - AnnotatorMsg with nested pointer actions for input handling
//! - HostEvent for everything the engine reports back

use serde::Serialize;

use crate::domain::{Annotation, Tool};

// ============================================================================
// Input
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

/// Pointer input, in display coordinates relative to the canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerAction {
    Down { x: f32, y: f32, button: MouseButton },
    Move { x: f32, y: f32 },
    /// Button released; ends whatever the press started
    Click { x: f32, y: f32 },
}

/// All annotator messages
#[derive(Debug, Clone, PartialEq)]
pub enum AnnotatorMsg {
    /// Switch tool, dropping any gesture in progress
    SelectTool(Tool),
    /// Use this tag for new shapes and relabel the focused one
    ActivateTag(String),
    /// Remove the focused shape
    RemoveFocused,
    /// Remove every shape
    RemoveAll,
    Pointer(PointerAction),
}

// ============================================================================
// Output
// ============================================================================

/// Notifications for the host, drained with `ShapeStore::take_events`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HostEvent {
    /// Full annotation list in natural image coordinates
    Annotations {
        name: String,
        items: Vec<Annotation>,
    },
    /// A shape was completed and the model asks for immediate submission
    Submit { name: String },
    /// The engine could not set up an annotatable surface
    LoadFailed { name: String, reason: String },
}

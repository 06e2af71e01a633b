//! Annotation session module
//!
//! This module contains:
//! - The shape store owning shapes, focus, tool and active tag
//! - Message types exchanged with the host

pub mod messages;
pub mod state;

//! Styling constants shared by overlay surfaces

/// Shape body constants
pub mod shape {
    /// Alpha of the translucent fill inside closed shapes (0-255)
    pub const FILL_ALPHA: u8 = 48;
}

/// Handle squares drawn on the focused shape
pub mod handle {
    /// Edge length of a corner/vertex handle square
    pub const SIZE: f32 = 8.0;
    /// Radius of the ring drawn around vertex 0 when a click would close the polygon
    pub const CLOSING_RADIUS: f32 = 6.0;
}

/// Preview guide line
pub mod preview {
    pub const THICKNESS: f32 = 1.0;
    /// Dash pattern (on, off)
    pub const DASH: [f32; 2] = [4.0, 4.0];
}

//! Conversion between content space (top-left origin) and device space
//! (bottom-left origin).

/// Convert a content-space Y coordinate to device space.
pub fn flip_y(y: f32, container_height: f32) -> f32 {
    container_height - y
}

/// Device-space Y of the bottom edge of an element at `y` with height `height`.
pub fn flip_y_with_height(y: f32, height: f32, container_height: f32) -> f32 {
    container_height - y - height
}

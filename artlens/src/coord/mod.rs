//! Screen-space coordinate types.
//!
//! Provides the 2D types the interaction core works in: viewport dimensions
//! and projected screen points. Screen coordinates are in CSS-style pixels
//! with the origin at the top-left corner and Y growing downward.

mod types;

pub use types::{ScreenPoint, UiRegion, Viewport};

/// Squared Euclidean distance between two screen positions.
///
/// Squared distances are compared directly to avoid the square root; they
/// impose the same ordering as true distances.
#[inline]
pub fn distance_squared(ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    let dx = ax - bx;
    let dy = ay - by;
    dx * dx + dy * dy
}

/// Maps normalized device coordinates to viewport pixels.
///
/// NDC spans `[-1, 1]` on both axes with Y up; the result has Y down.
#[inline]
pub fn ndc_to_screen(ndc_x: f64, ndc_y: f64, viewport: Viewport) -> (f64, f64) {
    let x = (ndc_x + 1.0) * 0.5 * viewport.width;
    let y = (1.0 - ndc_y) * 0.5 * viewport.height;
    (x, y)
}

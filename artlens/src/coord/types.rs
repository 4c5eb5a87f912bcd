//! Core screen-space types.

use crate::content::PoiId;

/// Viewport dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Viewport {
    /// Create a viewport with the given dimensions.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether the dimensions are usable for projection.
    ///
    /// A viewport that has not been laid out yet reports zero size.
    pub fn is_ready(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// The smaller of width and height.
    pub fn min_dimension(&self) -> f64 {
        self.width.min(self.height)
    }
}

/// A POI anchor projected into screen space.
///
/// Derived on demand for a single pointer event; never stored across events
/// because both the camera and the anchors move every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub id: PoiId,
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub fn new(id: PoiId, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }
}

/// A rectangular UI control region (exit button, panel chrome).
///
/// Pointer events landing inside a control region belong to the control and
/// are never interpreted as POI taps.
#[derive(Debug, Clone, PartialEq)]
pub struct UiRegion {
    /// Name used in log output (e.g. "exit").
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl UiRegion {
    /// Create a control region.
    pub fn new(name: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            width,
            height,
        }
    }

    /// Whether a point lies inside the region (edges inclusive).
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px <= self.x + self.width && py >= self.y && py <= self.y + self.height
    }
}

//! Projection adapter: world positions to screen pixels.
//!
//! The AR engine owns the camera. Each frame it hands the current
//! view-projection matrix and viewport size to a [`Projector`], and the
//! hit-test engine asks the projector where each POI anchor lands on screen.
//!
//! # Pipeline
//!
//! ```text
//! world (x,y,z,1) ──► view_proj × p ──► clip (x,y,z,w) ──► ndc = clip/w ──► pixels
//!                                           │                  │
//!                                       w ≤ ε: behind      z > 1: beyond far
//! ```
//!
//! Nothing is cached: anchors and camera move every frame, so every query
//! reads the latest state.

mod camera;

pub use camera::{CameraProjector, PassthroughProjector};

use glam::DVec3;
use thiserror::Error;

use crate::content::PoiId;
use crate::coord::{ScreenPoint, Viewport};

/// Why a world position could not be projected.
///
/// All variants are treated by callers as "no screen position"; none of
/// them is a fault.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionError {
    /// The engine has not provided a camera yet (scene still loading).
    #[error("camera not ready")]
    CameraNotReady,

    /// The viewport has no usable size yet.
    #[error("viewport not ready")]
    ViewportNotReady,

    /// The point is behind the camera.
    #[error("point is behind the camera")]
    BehindCamera,

    /// The point lies beyond the far clipping plane.
    #[error("point is beyond the far plane")]
    BeyondFarPlane,

    /// The projection produced NaN or infinity.
    #[error("projection produced a non-finite value")]
    NonFinite,
}

/// Converts world positions into screen points for the current frame.
pub trait Projector {
    /// Current viewport, if laid out.
    fn viewport(&self) -> Option<Viewport>;

    /// Project a POI anchor's world position.
    fn project(&self, id: PoiId, world: DVec3) -> Result<ScreenPoint, ProjectionError>;
}

impl<P: Projector + ?Sized> Projector for &P {
    fn viewport(&self) -> Option<Viewport> {
        (**self).viewport()
    }

    fn project(&self, id: PoiId, world: DVec3) -> Result<ScreenPoint, ProjectionError> {
        (**self).project(id, world)
    }
}

impl<P: Projector + ?Sized> Projector for Box<P> {
    fn viewport(&self) -> Option<Viewport> {
        (**self).viewport()
    }

    fn project(&self, id: PoiId, world: DVec3) -> Result<ScreenPoint, ProjectionError> {
        (**self).project(id, world)
    }
}

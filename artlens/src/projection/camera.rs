//! Projector implementations.

use glam::{DMat4, DVec3, DVec4};

use super::{ProjectionError, Projector};
use crate::content::PoiId;
use crate::coord::{ndc_to_screen, ScreenPoint, Viewport};

/// Minimum clip-space `w` for a point to count as in front of the camera.
const MIN_CLIP_W: f64 = 1e-6;

/// Perspective projector driven by the engine's camera.
///
/// The engine calls [`update_camera`](Self::update_camera) and
/// [`set_viewport`](Self::set_viewport) as the frame state changes. Until
/// both are present every projection is unavailable.
#[derive(Debug, Clone, Default)]
pub struct CameraProjector {
    view_projection: Option<DMat4>,
    viewport: Option<Viewport>,
}

impl CameraProjector {
    /// Create a projector with no camera or viewport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a projector that is ready immediately.
    pub fn with_camera(view_projection: DMat4, viewport: Viewport) -> Self {
        Self {
            view_projection: Some(view_projection),
            viewport: Some(viewport),
        }
    }

    /// Replace the camera's view-projection matrix for the current frame.
    pub fn update_camera(&mut self, view_projection: DMat4) {
        self.view_projection = Some(view_projection);
    }

    /// Record a viewport resize or orientation change.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = Some(viewport);
    }

    /// Whether both camera and viewport are available.
    pub fn is_ready(&self) -> bool {
        self.view_projection.is_some() && self.ready_viewport().is_some()
    }

    fn ready_viewport(&self) -> Option<Viewport> {
        self.viewport.filter(Viewport::is_ready)
    }
}

impl Projector for CameraProjector {
    fn viewport(&self) -> Option<Viewport> {
        self.ready_viewport()
    }

    fn project(&self, id: PoiId, world: DVec3) -> Result<ScreenPoint, ProjectionError> {
        let view_projection = self
            .view_projection
            .ok_or(ProjectionError::CameraNotReady)?;
        let viewport = self
            .ready_viewport()
            .ok_or(ProjectionError::ViewportNotReady)?;

        let clip = view_projection * DVec4::new(world.x, world.y, world.z, 1.0);
        if !clip.is_finite() {
            return Err(ProjectionError::NonFinite);
        }
        if clip.w <= MIN_CLIP_W {
            return Err(ProjectionError::BehindCamera);
        }

        let ndc = clip.truncate() / clip.w;
        if ndc.z > 1.0 {
            return Err(ProjectionError::BeyondFarPlane);
        }

        let (x, y) = ndc_to_screen(ndc.x, ndc.y, viewport);
        if !x.is_finite() || !y.is_finite() {
            return Err(ProjectionError::NonFinite);
        }
        Ok(ScreenPoint::new(id, x, y))
    }
}

/// Projector that treats a world position's X/Y as screen pixels.
///
/// Used by the scenario runner and tests, where anchors are placed directly
/// at known screen positions.
#[derive(Debug, Clone, Default)]
pub struct PassthroughProjector {
    viewport: Option<Viewport>,
}

impl PassthroughProjector {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport: Some(viewport),
        }
    }

    /// A projector whose viewport is not laid out yet.
    pub fn unready() -> Self {
        Self { viewport: None }
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = Some(viewport);
    }
}

impl Projector for PassthroughProjector {
    fn viewport(&self) -> Option<Viewport> {
        self.viewport.filter(Viewport::is_ready)
    }

    fn project(&self, id: PoiId, world: DVec3) -> Result<ScreenPoint, ProjectionError> {
        if self.viewport().is_none() {
            return Err(ProjectionError::ViewportNotReady);
        }
        if !world.x.is_finite() || !world.y.is_finite() {
            return Err(ProjectionError::NonFinite);
        }
        Ok(ScreenPoint::new(id, world.x, world.y))
    }
}

//! Hit-test engine.

use glam::DVec2;

use crate::content::{PoiCatalog, PoiId};
use crate::coord::{distance_squared, ScreenPoint, UiRegion};
use crate::overlay::OverlayState;
use crate::projection::Projector;
use crate::scene::{ArScene, AttributeValue};
use crate::tracking::TrackingState;

/// Hit radius as a fraction of the smaller viewport dimension.
pub const DEFAULT_HIT_RADIUS_FRACTION: f64 = 0.12;

/// Snapshot of the interaction state taken for one pointer event.
#[derive(Debug, Clone, PartialEq)]
pub struct HitContext {
    pub overlay: OverlayState,
    pub gate_armed: bool,
    pub tracking: TrackingState,
    pub group_visibility: AttributeValue,
}

/// Why a pointer event was not considered for POI selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The pointer landed on a named UI control.
    OnControl(String),
    /// An overlay is visible.
    OverlayVisible,
    /// The interaction gate is disarmed.
    GateDisarmed,
    /// The marker is not being tracked.
    NotTracking,
    /// The POI group is not visible (anything but exact `true`).
    GroupHidden,
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::OnControl(name) => write!(f, "pointer on control '{}'", name),
            Rejection::OverlayVisible => write!(f, "overlay visible"),
            Rejection::GateDisarmed => write!(f, "gate disarmed"),
            Rejection::NotTracking => write!(f, "marker not tracked"),
            Rejection::GroupHidden => write!(f, "POI group hidden"),
        }
    }
}

/// Result of a hit-test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HitOutcome {
    /// A POI was hit.
    Hit(PoiId),
    /// A precondition failed.
    Rejected(Rejection),
    /// Preconditions held but no POI was within the radius, or geometry
    /// was unavailable.
    Miss,
}

impl HitOutcome {
    /// The hit POI, if any.
    pub fn poi(&self) -> Option<PoiId> {
        match self {
            HitOutcome::Hit(id) => Some(*id),
            _ => None,
        }
    }
}

/// Finds the POI under a pointer.
#[derive(Debug, Clone)]
pub struct HitTester {
    radius_fraction: f64,
    controls: Vec<UiRegion>,
}

impl HitTester {
    /// Create a tester. Fractions outside `(0, 1]` fall back to the default.
    pub fn new(radius_fraction: f64) -> Self {
        let radius_fraction = if radius_fraction > 0.0 && radius_fraction <= 1.0 {
            radius_fraction
        } else {
            tracing::warn!(
                radius_fraction,
                default = DEFAULT_HIT_RADIUS_FRACTION,
                "Hit radius fraction out of range, using default"
            );
            DEFAULT_HIT_RADIUS_FRACTION
        };
        Self {
            radius_fraction,
            controls: Vec::new(),
        }
    }

    /// Register a UI control region that swallows pointer events.
    pub fn add_control(&mut self, region: UiRegion) {
        self.controls.push(region);
    }

    pub fn controls(&self) -> &[UiRegion] {
        &self.controls
    }

    pub fn radius_fraction(&self) -> f64 {
        self.radius_fraction
    }

    /// Check the pointer-independent preconditions (2..5).
    pub fn check_state(&self, ctx: &HitContext) -> Result<(), Rejection> {
        if ctx.overlay.is_visible() {
            return Err(Rejection::OverlayVisible);
        }
        if !ctx.gate_armed {
            return Err(Rejection::GateDisarmed);
        }
        if !ctx.tracking.is_tracking() {
            return Err(Rejection::NotTracking);
        }
        if !ctx.group_visibility.is_true() {
            return Err(Rejection::GroupHidden);
        }
        Ok(())
    }

    /// Check every precondition for a pointer position.
    pub fn check_preconditions(&self, pointer: DVec2, ctx: &HitContext) -> Result<(), Rejection> {
        if let Some(control) = self.controls.iter().find(|c| c.contains(pointer.x, pointer.y)) {
            return Err(Rejection::OnControl(control.name.clone()));
        }
        self.check_state(ctx)
    }

    /// Resolve a pointer position to a POI.
    ///
    /// Anchor positions and the camera are read once per call, so the
    /// comparison runs over a single consistent frame.
    pub fn resolve<S, P>(
        &self,
        pointer: DVec2,
        ctx: &HitContext,
        catalog: &PoiCatalog,
        scene: &S,
        projector: &P,
    ) -> HitOutcome
    where
        S: ArScene + ?Sized,
        P: Projector + ?Sized,
    {
        if let Err(rejection) = self.check_preconditions(pointer, ctx) {
            return HitOutcome::Rejected(rejection);
        }

        let Some(viewport) = projector.viewport() else {
            tracing::debug!("Hit-test skipped: viewport not ready");
            return HitOutcome::Miss;
        };
        let radius = self.radius_fraction * viewport.min_dimension();

        let points: Vec<ScreenPoint> = catalog
            .iter()
            .filter_map(|poi| {
                let world = scene.anchor_position(&poi.anchor)?;
                match projector.project(poi.id, world) {
                    Ok(point) => Some(point),
                    Err(e) => {
                        tracing::trace!(poi = %poi.id, error = %e, "POI not on screen");
                        None
                    }
                }
            })
            .collect();

        match nearest_within(pointer, &points, radius) {
            Some(id) => HitOutcome::Hit(id),
            None => HitOutcome::Miss,
        }
    }
}

impl Default for HitTester {
    fn default() -> Self {
        Self::new(DEFAULT_HIT_RADIUS_FRACTION)
    }
}

/// Closest screen point within `radius` of the pointer.
///
/// Points exactly on the radius count. Ties on squared distance go to the
/// earlier point in `points`. A non-finite pointer or a negative radius
/// matches nothing.
pub fn nearest_within(pointer: DVec2, points: &[ScreenPoint], radius: f64) -> Option<PoiId> {
    if !pointer.is_finite() || radius.is_nan() || radius < 0.0 {
        return None;
    }
    let radius_sq = radius * radius;
    let mut best: Option<(PoiId, f64)> = None;

    for point in points {
        let d2 = distance_squared(pointer.x, pointer.y, point.x, point.y);
        if d2.is_nan() || d2 > radius_sq {
            continue;
        }
        match best {
            Some((_, best_d2)) if d2 >= best_d2 => {}
            _ => best = Some((point.id, d2)),
        }
    }

    best.map(|(id, _)| id)
}

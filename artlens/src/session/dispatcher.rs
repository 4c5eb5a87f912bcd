//! The session dispatcher.

use std::time::{Duration, Instant};

use glam::DVec2;

use super::event::{ArEvent, Effect, UiAction};
use crate::content::{PoiCatalog, PoiId};
use crate::coord::UiRegion;
use crate::gate::{InteractionGate, DEFAULT_REARM_DELAY};
use crate::hit_test::{HitContext, HitOutcome, HitTester, DEFAULT_HIT_RADIUS_FRACTION};
use crate::overlay::{OverlayMachine, OverlayState};
use crate::projection::Projector;
use crate::scene::ArScene;
use crate::tracking::TrackingState;

/// Default page the exit button navigates to.
pub const DEFAULT_MENU_PAGE: &str = "index.html";

/// Tunables for one AR session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Delay between an overlay closing and POI taps being accepted.
    pub rearm_delay: Duration,

    /// Hit radius as a fraction of the smaller viewport dimension.
    pub hit_radius_fraction: f64,

    /// Page the exit button navigates to.
    pub menu_page: String,

    /// UI control regions that swallow pointer events.
    pub controls: Vec<UiRegion>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            rearm_delay: DEFAULT_REARM_DELAY,
            hit_radius_fraction: DEFAULT_HIT_RADIUS_FRACTION,
            menu_page: DEFAULT_MENU_PAGE.to_string(),
            controls: Vec::new(),
        }
    }
}

impl SessionConfig {
    /// Set the re-arm delay.
    pub fn with_rearm_delay(mut self, delay: Duration) -> Self {
        self.rearm_delay = delay;
        self
    }

    /// Set the hit radius fraction.
    pub fn with_hit_radius_fraction(mut self, fraction: f64) -> Self {
        self.hit_radius_fraction = fraction;
        self
    }

    /// Set the page the exit button navigates to.
    pub fn with_menu_page(mut self, page: impl Into<String>) -> Self {
        self.menu_page = page.into();
        self
    }

    /// Add a UI control region.
    pub fn with_control(mut self, region: UiRegion) -> Self {
        self.controls.push(region);
        self
    }
}

/// Interaction state for one load of the AR page.
///
/// Owns the overlay machine, the interaction gate and the hit tester, plus
/// the engine-facing scene and projector. There is no teardown: a new page
/// load creates a new session.
pub struct ArSession<S, P> {
    overlay: OverlayMachine,
    gate: InteractionGate,
    hit_tester: HitTester,
    catalog: PoiCatalog,
    scene: S,
    projector: P,
    rearm_delay: Duration,
    menu_page: String,
    engine_ready: bool,
}

impl<S: ArScene, P: Projector> ArSession<S, P> {
    /// Create a session in the page-load state.
    pub fn new(config: SessionConfig, catalog: PoiCatalog, scene: S, projector: P) -> Self {
        let mut hit_tester = HitTester::new(config.hit_radius_fraction);
        for region in config.controls {
            hit_tester.add_control(region);
        }

        tracing::info!(
            pois = catalog.len(),
            rearm_delay_ms = config.rearm_delay.as_millis() as u64,
            hit_radius_fraction = config.hit_radius_fraction,
            "AR session created"
        );

        Self {
            overlay: OverlayMachine::new(),
            gate: InteractionGate::new(),
            hit_tester,
            catalog,
            scene,
            projector,
            rearm_delay: config.rearm_delay,
            menu_page: config.menu_page,
            engine_ready: false,
        }
    }

    /// Handle one event at time `now`.
    pub fn handle(&mut self, event: ArEvent, now: Instant) -> Vec<Effect> {
        let mut effects = Vec::new();

        match event {
            ArEvent::EngineReady => self.on_engine_ready(),
            ArEvent::TargetFound => self.on_target_found(&mut effects),
            ArEvent::TargetLost => self.overlay.on_target_lost(),
            ArEvent::PointerDown { x, y } => self.on_pointer_down(DVec2::new(x, y), &mut effects),
            ArEvent::PoiTapped(id) => self.on_poi_tapped(id, &mut effects),
            ArEvent::Click(action) => self.on_click(action, now, &mut effects),
            ArEvent::TimerFired(token) => {
                if self.gate.fire(token) {
                    effects.push(Effect::GateArmed);
                }
            }
        }

        effects
    }

    /// Fire every re-arm timer due at `now`.
    ///
    /// For hosts that poll instead of scheduling [`Effect::ScheduleRearm`].
    pub fn advance(&mut self, now: Instant) -> Vec<Effect> {
        if self.gate.poll(now) {
            vec![Effect::GateArmed]
        } else {
            Vec::new()
        }
    }

    /// Resolve a pointer position to a POI without changing state.
    pub fn resolve_hit(&self, x: f64, y: f64) -> Option<PoiId> {
        if !self.engine_ready {
            return None;
        }
        self.hit_test(DVec2::new(x, y)).poi()
    }

    pub fn tracking_state(&self) -> TrackingState {
        self.overlay.tracking()
    }

    pub fn overlay_state(&self) -> OverlayState {
        self.overlay.overlay()
    }

    pub fn intro_shown(&self) -> bool {
        self.overlay.intro_shown()
    }

    pub fn is_armed(&self) -> bool {
        self.gate.is_armed()
    }

    pub fn is_engine_ready(&self) -> bool {
        self.engine_ready
    }

    /// Earliest pending re-arm deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.gate.next_deadline()
    }

    pub fn catalog(&self) -> &PoiCatalog {
        &self.catalog
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    /// Mutable access for engine-side updates (anchor movement).
    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    pub fn projector(&self) -> &P {
        &self.projector
    }

    /// Mutable access for per-frame camera and viewport updates.
    pub fn projector_mut(&mut self) -> &mut P {
        &mut self.projector
    }

    /// Register a UI control region after construction.
    pub fn add_control(&mut self, region: UiRegion) {
        self.hit_tester.add_control(region);
    }

    fn on_engine_ready(&mut self) {
        if self.engine_ready {
            return;
        }
        self.engine_ready = true;
        tracing::info!("AR engine ready, hit-testing enabled");
    }

    fn on_target_found(&mut self, effects: &mut Vec<Effect>) {
        let transition = self.overlay.on_target_found();
        effects.push(Effect::HideScanBanner);

        if transition.intro_opened {
            self.gate.disarm();
            effects.push(Effect::ShowIntro);
        }
    }

    fn on_pointer_down(&mut self, pointer: DVec2, effects: &mut Vec<Effect>) {
        if !self.engine_ready {
            tracing::debug!("Pointer ignored: AR engine not ready");
            return;
        }

        match self.hit_test(pointer) {
            HitOutcome::Hit(id) => self.open_poi(id, effects),
            HitOutcome::Rejected(rejection) => {
                tracing::debug!(x = pointer.x, y = pointer.y, reason = %rejection, "Pointer rejected");
            }
            HitOutcome::Miss => {
                tracing::trace!(x = pointer.x, y = pointer.y, "Pointer missed all POIs");
            }
        }
    }

    fn on_poi_tapped(&mut self, id: PoiId, effects: &mut Vec<Effect>) {
        if !self.engine_ready {
            tracing::debug!(poi = %id, "Hotspot tap ignored: AR engine not ready");
            return;
        }
        match self.hit_tester.check_state(&self.hit_context()) {
            Ok(()) => self.open_poi(id, effects),
            Err(rejection) => {
                tracing::debug!(poi = %id, reason = %rejection, "Hotspot tap rejected");
            }
        }
    }

    fn on_click(&mut self, action: UiAction, now: Instant, effects: &mut Vec<Effect>) {
        match action {
            UiAction::CloseIntro => {
                if !self.overlay.close_intro() {
                    return;
                }
                effects.push(Effect::HideIntro);
                self.scene.set_group_visible(true);
                self.schedule_rearm(now, effects);
            }
            UiAction::ClosePoi => {
                if self.overlay.close_poi().is_none() {
                    return;
                }
                effects.push(Effect::HidePoiPanel);
                self.schedule_rearm(now, effects);
            }
            UiAction::Exit => {
                tracing::info!(page = %self.menu_page, "Leaving AR page");
                effects.push(Effect::Navigate(self.menu_page.clone()));
            }
        }
    }

    fn open_poi(&mut self, id: PoiId, effects: &mut Vec<Effect>) {
        let Some(poi) = self.catalog.get(id) else {
            tracing::warn!(poi = %id, "No content registered for POI");
            return;
        };
        if !self.overlay.open_poi(id) {
            return;
        }
        self.gate.disarm();
        effects.push(Effect::ShowPoiPanel {
            id,
            title: poi.title.clone(),
            body: poi.body.clone(),
        });
    }

    fn schedule_rearm(&mut self, now: Instant, effects: &mut Vec<Effect>) {
        let token = self.gate.arm_after(self.rearm_delay, now);
        effects.push(Effect::ScheduleRearm {
            token,
            delay: self.rearm_delay,
        });
    }

    fn hit_context(&self) -> HitContext {
        HitContext {
            overlay: self.overlay.overlay(),
            gate_armed: self.gate.is_armed(),
            tracking: self.overlay.tracking(),
            group_visibility: self.scene.group_visibility(),
        }
    }

    fn hit_test(&self, pointer: DVec2) -> HitOutcome {
        self.hit_tester.resolve(
            pointer,
            &self.hit_context(),
            &self.catalog,
            &self.scene,
            &self.projector,
        )
    }
}

impl<S: std::fmt::Debug, P: std::fmt::Debug> std::fmt::Debug for ArSession<S, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArSession")
            .field("overlay", &self.overlay)
            .field("gate", &self.gate)
            .field("engine_ready", &self.engine_ready)
            .field("scene", &self.scene)
            .field("projector", &self.projector)
            .finish()
    }
}

//! Integration tests for the AR session.
//!
//! These tests drive a full [`ArSession`] through realistic page flows:
//! - marker found → intro → close → delayed re-arm → POI panel
//! - hit-testing through a real perspective camera
//! - engine readiness and geometry that is not laid out yet
//! - the async runner with paused tokio time
//!
//! Run with: `cargo test --test ar_session_integration`

use std::time::{Duration, Instant};

use glam::{DMat4, DVec3};
use tokio::sync::mpsc;

use artlens::config::ConfigFile;
use artlens::content::{AnchorRef, PoiCatalog, PoiId, PointOfInterest};
use artlens::coord::{UiRegion, Viewport};
use artlens::overlay::OverlayState;
use artlens::projection::{CameraProjector, PassthroughProjector};
use artlens::runtime::SessionRunner;
use artlens::scene::{ArScene, AttributeValue, StaticScene};
use artlens::script::{parse_script, Replay};
use artlens::session::{ArEvent, ArSession, Effect, SessionConfig, UiAction};
use artlens::tracking::TrackingState;

// ============================================================================
// Helper Functions
// ============================================================================

const REARM: Duration = Duration::from_millis(1000);

/// Screen positions of the three shipped POIs on a 1000x800 page.
const POI_SCREEN: &[(u32, f64, f64)] = &[(1, 100.0, 100.0), (2, 500.0, 100.0), (3, 300.0, 400.0)];

fn catalog() -> PoiCatalog {
    PoiCatalog::new(vec![
        PointOfInterest::new(1, "Portrait", "Painted in one sitting."),
        PointOfInterest::new(2, "Window", "Added by a later restorer."),
        PointOfInterest::new(3, "Signature", "Hidden in the frame."),
    ])
    .unwrap()
}

fn screen_scene() -> StaticScene {
    let mut scene = StaticScene::new();
    for &(id, x, y) in POI_SCREEN {
        scene.set_anchor(AnchorRef::for_id(PoiId(id)), DVec3::new(x, y, 0.0));
    }
    scene
}

fn screen_session() -> ArSession<StaticScene, PassthroughProjector> {
    ArSession::new(
        SessionConfig::default(),
        catalog(),
        screen_scene(),
        PassthroughProjector::new(Viewport::new(1000.0, 800.0)),
    )
}

/// Ready session with the intro dismissed and the gate armed.
fn armed_session(t0: Instant) -> ArSession<StaticScene, PassthroughProjector> {
    let mut session = screen_session();
    session.handle(ArEvent::EngineReady, t0);
    session.handle(ArEvent::TargetFound, t0);
    session.handle(ArEvent::Click(UiAction::CloseIntro), t0);
    session.advance(t0 + REARM);
    assert!(session.is_armed());
    session
}

fn opened_panel(effects: &[Effect]) -> Option<PoiId> {
    effects.iter().find_map(|e| match e {
        Effect::ShowPoiPanel { id, .. } => Some(*id),
        _ => None,
    })
}

// ============================================================================
// Overlay Sequencing
// ============================================================================

/// Intro opens on the first found event only, across many found/lost cycles.
#[test]
fn test_intro_shows_once_per_session() {
    let t0 = Instant::now();
    let mut session = screen_session();

    let first = session.handle(ArEvent::TargetFound, t0);
    assert_eq!(first, vec![Effect::HideScanBanner, Effect::ShowIntro]);
    session.handle(ArEvent::Click(UiAction::CloseIntro), t0);

    for _ in 0..5 {
        session.handle(ArEvent::TargetLost, t0);
        let again = session.handle(ArEvent::TargetFound, t0);
        assert!(!again.contains(&Effect::ShowIntro));
    }
    assert_eq!(session.overlay_state(), OverlayState::None);
}

/// Losing the marker leaves an open panel alone.
#[test]
fn test_target_lost_keeps_panel_open() {
    let t0 = Instant::now();
    let mut session = armed_session(t0);
    let effects = session.handle(ArEvent::PointerDown { x: 500.0, y: 120.0 }, t0 + REARM);
    assert_eq!(opened_panel(&effects), Some(PoiId(2)));

    let lost = session.handle(ArEvent::TargetLost, t0 + REARM);
    assert!(lost.is_empty());
    assert_eq!(session.overlay_state(), OverlayState::PoiPanel(PoiId(2)));
    assert_eq!(session.tracking_state(), TrackingState::Searching);
}

/// Closing the intro reveals the POI group.
#[test]
fn test_close_intro_reveals_group() {
    let t0 = Instant::now();
    let mut session = screen_session();
    session.handle(ArEvent::TargetFound, t0);
    assert_eq!(session.scene().group_visibility(), AttributeValue::Bool(false));

    session.handle(ArEvent::Click(UiAction::CloseIntro), t0);
    assert_eq!(session.scene().group_visibility(), AttributeValue::Bool(true));
}

// ============================================================================
// Hit-Testing
// ============================================================================

/// The three reference pointer positions on a 1000x800 viewport.
#[test]
fn test_reference_pointer_positions() {
    let session = armed_session(Instant::now());
    assert_eq!(session.resolve_hit(140.0, 100.0), Some(PoiId(1)));
    assert_eq!(session.resolve_hit(300.0, 300.0), None);
    assert_eq!(session.resolve_hit(300.0, 350.0), Some(PoiId(3)));
}

/// No pointer position resolves while an overlay is visible.
#[test]
fn test_no_hits_while_overlay_visible() {
    let t0 = Instant::now();
    let mut session = armed_session(t0);
    session.handle(ArEvent::PointerDown { x: 100.0, y: 100.0 }, t0 + REARM);
    assert!(session.overlay_state().is_visible());

    for &(_, x, y) in POI_SCREEN {
        assert_eq!(session.resolve_hit(x, y), None);
    }
}

/// Equidistant POIs resolve to the one declared first.
#[test]
fn test_tie_break_declaration_order() {
    let t0 = Instant::now();
    let mut session = armed_session(t0);
    // POI 1 at (100,100), POI 2 moved to (180,100): pointer at (140,100) is 40 from both
    session
        .scene_mut()
        .set_anchor(AnchorRef::for_id(PoiId(2)), DVec3::new(180.0, 100.0, 0.0));
    assert_eq!(session.resolve_hit(140.0, 100.0), Some(PoiId(1)));
}

/// Pointers on a control region never reach the POIs.
#[test]
fn test_control_region_swallows_pointer() {
    let t0 = Instant::now();
    let mut session = armed_session(t0);
    session.add_control(UiRegion::new("exit", 50.0, 50.0, 100.0, 100.0));

    let effects = session.handle(ArEvent::PointerDown { x: 100.0, y: 100.0 }, t0 + REARM);
    assert!(effects.is_empty());
    assert_eq!(session.overlay_state(), OverlayState::None);
}

/// Hit-testing through a perspective camera looking at the painting.
#[test]
fn test_hit_through_perspective_camera() {
    let viewport = Viewport::new(1000.0, 800.0);
    let projection =
        DMat4::perspective_rh(60f64.to_radians(), viewport.width / viewport.height, 0.1, 100.0);
    let view = DMat4::look_at_rh(DVec3::new(0.0, 0.0, 5.0), DVec3::ZERO, DVec3::Y);
    let projector = CameraProjector::with_camera(projection * view, viewport);

    let mut scene = StaticScene::new();
    // POI 1 sits on the optical axis, so it projects to the viewport centre
    scene.set_anchor(AnchorRef::for_id(PoiId(1)), DVec3::ZERO);
    // POI 2 is behind the camera and never hittable
    scene.set_anchor(AnchorRef::for_id(PoiId(2)), DVec3::new(0.0, 0.0, 10.0));

    let t0 = Instant::now();
    let mut session = ArSession::new(SessionConfig::default(), catalog(), scene, projector);
    session.handle(ArEvent::EngineReady, t0);
    session.handle(ArEvent::TargetFound, t0);
    session.handle(ArEvent::Click(UiAction::CloseIntro), t0);
    session.advance(t0 + REARM);

    assert_eq!(session.resolve_hit(520.0, 390.0), Some(PoiId(1)));
    assert_eq!(session.resolve_hit(900.0, 700.0), None);
}

/// Before the viewport is laid out nothing resolves; afterwards it does.
#[test]
fn test_geometry_unavailable_is_no_hit() {
    let t0 = Instant::now();
    let mut session = ArSession::new(
        SessionConfig::default(),
        catalog(),
        screen_scene(),
        PassthroughProjector::unready(),
    );
    session.handle(ArEvent::EngineReady, t0);
    session.handle(ArEvent::TargetFound, t0);
    session.handle(ArEvent::Click(UiAction::CloseIntro), t0);
    session.advance(t0 + REARM);

    assert_eq!(session.resolve_hit(100.0, 100.0), None);
    session
        .projector_mut()
        .set_viewport(Viewport::new(1000.0, 800.0));
    assert_eq!(session.resolve_hit(100.0, 100.0), Some(PoiId(1)));
}

// ============================================================================
// Interaction Gate Timing
// ============================================================================

/// The gate stays closed for the whole re-arm interval after a close.
#[test]
fn test_gate_rearms_after_delay() {
    let t0 = Instant::now();
    let mut session = armed_session(t0);
    let t1 = t0 + REARM;

    session.handle(ArEvent::PointerDown { x: 100.0, y: 100.0 }, t1);
    let closed = session.handle(ArEvent::Click(UiAction::ClosePoi), t1);
    assert!(closed.contains(&Effect::HidePoiPanel));

    // Immediately after close
    assert_eq!(session.resolve_hit(100.0, 100.0), None);
    // Just before the deadline
    assert!(session.advance(t1 + REARM - Duration::from_millis(1)).is_empty());
    assert_eq!(session.resolve_hit(100.0, 100.0), None);
    // At the deadline
    assert_eq!(session.advance(t1 + REARM), vec![Effect::GateArmed]);
    assert_eq!(session.resolve_hit(100.0, 100.0), Some(PoiId(1)));
}

/// While a re-arm is pending every selection path is closed; the timer arms once.
#[test]
fn test_pending_rearm_blocks_then_fires_once() {
    let t0 = Instant::now();
    let mut session = armed_session(t0);
    let t1 = t0 + REARM;

    session.handle(ArEvent::PointerDown { x: 100.0, y: 100.0 }, t1);
    let first = session.handle(ArEvent::Click(UiAction::ClosePoi), t1);
    session.handle(ArEvent::PointerDown { x: 500.0, y: 100.0 }, t1);
    assert_eq!(session.overlay_state(), OverlayState::None);

    // Reopen through a direct tap is also gated
    session.handle(ArEvent::PoiTapped(PoiId(2)), t1);
    assert_eq!(session.overlay_state(), OverlayState::None);

    let token = match first.as_slice() {
        [Effect::HidePoiPanel, Effect::ScheduleRearm { token, .. }] => *token,
        other => panic!("unexpected effects: {:?}", other),
    };
    assert_eq!(
        session.handle(ArEvent::TimerFired(token), t1 + REARM),
        vec![Effect::GateArmed]
    );
    assert!(session
        .handle(ArEvent::TimerFired(token), t1 + REARM)
        .is_empty());
    assert!(session.is_armed());
}

// ============================================================================
// Engine Readiness, Content, Navigation
// ============================================================================

#[test]
fn test_pointer_ignored_until_engine_ready() {
    let t0 = Instant::now();
    let mut session = screen_session();
    session.handle(ArEvent::TargetFound, t0);
    session.handle(ArEvent::Click(UiAction::CloseIntro), t0);
    session.advance(t0 + REARM);

    let effects = session.handle(ArEvent::PointerDown { x: 100.0, y: 100.0 }, t0 + REARM);
    assert!(effects.is_empty());

    session.handle(ArEvent::EngineReady, t0 + REARM);
    let effects = session.handle(ArEvent::PointerDown { x: 100.0, y: 100.0 }, t0 + REARM);
    assert_eq!(opened_panel(&effects), Some(PoiId(1)));
}

/// A hotspot with no content is a silent no-op.
#[test]
fn test_missing_content_is_noop() {
    let t0 = Instant::now();
    let mut session = armed_session(t0);
    session
        .scene_mut()
        .set_anchor(AnchorRef::for_id(PoiId(9)), DVec3::new(800.0, 600.0, 0.0));

    let effects = session.handle(ArEvent::PoiTapped(PoiId(9)), t0 + REARM);
    assert!(effects.is_empty());
    assert_eq!(session.overlay_state(), OverlayState::None);
    assert!(session.is_armed());
}

#[test]
fn test_exit_navigates_to_configured_menu() {
    let config = ConfigFile::from_ini_str("[navigation]\nmenu_page = menu.html\n").unwrap();
    let mut session = ArSession::new(
        config.session_config(),
        catalog(),
        screen_scene(),
        PassthroughProjector::new(Viewport::new(1000.0, 800.0)),
    );
    let effects = session.handle(ArEvent::Click(UiAction::Exit), Instant::now());
    assert_eq!(effects, vec![Effect::Navigate("menu.html".to_string())]);
}

// ============================================================================
// Scenario Replay
// ============================================================================

#[test]
fn test_replay_full_tour() {
    let script = "\
viewport 1000 800
anchor 1 100 100
anchor 2 500 100
anchor 3 300 400
ready
found
click close-intro
pointer 140 100     # too early
wait 1000
pointer 140 100
click close-poi
wait 1000
pointer 300 350
";
    let mut replay = Replay::new(SessionConfig::default(), catalog());
    replay.run(&parse_script(script).unwrap());

    let panels: Vec<PoiId> = replay
        .steps()
        .iter()
        .filter_map(|s| opened_panel(&s.effects))
        .collect();
    assert_eq!(panels, vec![PoiId(1), PoiId(3)]);
    assert_eq!(
        replay.session().overlay_state(),
        OverlayState::PoiPanel(PoiId(3))
    );
}

// ============================================================================
// Async Runner
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_runner_full_flow() {
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let (effect_tx, mut effect_rx) = mpsc::unbounded_channel();
    let handle = SessionRunner::new(screen_session(), effect_tx).start(&event_tx, event_rx);

    event_tx.send(ArEvent::EngineReady).unwrap();
    event_tx.send(ArEvent::TargetFound).unwrap();
    event_tx.send(ArEvent::Click(UiAction::CloseIntro)).unwrap();

    loop {
        if effect_rx.recv().await.unwrap() == Effect::GateArmed {
            break;
        }
    }

    event_tx
        .send(ArEvent::PointerDown { x: 300.0, y: 350.0 })
        .unwrap();
    let effect = effect_rx.recv().await.unwrap();
    assert!(matches!(effect, Effect::ShowPoiPanel { id: PoiId(3), .. }));

    drop(event_tx);
    let session = handle.await.unwrap();
    assert_eq!(session.overlay_state(), OverlayState::PoiPanel(PoiId(3)));
}

//! Deterministic scenario replay on a virtual clock.

use std::fmt;
use std::time::{Duration, Instant};

use glam::DVec3;

use super::parser::ScriptCommand;
use crate::content::{AnchorRef, PoiCatalog};
use crate::coord::{UiRegion, Viewport};
use crate::gate::TimerToken;
use crate::projection::PassthroughProjector;
use crate::scene::StaticScene;
use crate::session::{ArEvent, ArSession, Effect, SessionConfig};

/// What happened at one step of a replay.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayStep {
    /// Virtual time since the start of the replay.
    pub at_ms: u64,
    /// The command or timer that ran.
    pub label: String,
    /// Effects emitted by the session.
    pub effects: Vec<Effect>,
}

impl fmt::Display for ReplayStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:>6}ms] {}", self.at_ms, self.label)?;
        if !self.effects.is_empty() {
            let effects: Vec<String> = self.effects.iter().map(ToString::to_string).collect();
            write!(f, " -> {}", effects.join(", "))?;
        }
        Ok(())
    }
}

#[derive(Debug)]
struct PendingTimer {
    token: TimerToken,
    due: Duration,
}

/// Runs scenario commands against an [`ArSession`].
///
/// Anchors are placed directly in screen space through a
/// [`PassthroughProjector`]. Time only moves on `wait`; timers scheduled by
/// the session fire in deadline order while waiting, each at its own due
/// time.
#[derive(Debug)]
pub struct Replay {
    session: ArSession<StaticScene, PassthroughProjector>,
    start: Instant,
    elapsed: Duration,
    timers: Vec<PendingTimer>,
    steps: Vec<ReplayStep>,
}

impl Replay {
    /// Start a replay with no viewport laid out yet.
    pub fn new(config: SessionConfig, catalog: PoiCatalog) -> Self {
        let session = ArSession::new(
            config,
            catalog,
            StaticScene::new(),
            PassthroughProjector::unready(),
        );
        Self {
            session,
            start: Instant::now(),
            elapsed: Duration::ZERO,
            timers: Vec::new(),
            steps: Vec::new(),
        }
    }

    /// Run every command in order.
    pub fn run(&mut self, commands: &[ScriptCommand]) {
        for command in commands {
            self.apply(command);
        }
    }

    /// Run one command.
    pub fn apply(&mut self, command: &ScriptCommand) {
        let label = command.to_string();
        let effects = match command {
            ScriptCommand::Viewport { width, height } => {
                self.session
                    .projector_mut()
                    .set_viewport(Viewport::new(*width, *height));
                Vec::new()
            }
            ScriptCommand::Anchor { id, x, y } => {
                self.session
                    .scene_mut()
                    .set_anchor(AnchorRef::for_id(*id), DVec3::new(*x, *y, 0.0));
                Vec::new()
            }
            ScriptCommand::Ui {
                x,
                y,
                width,
                height,
            } => {
                let name = format!("ui-{}", self.steps.len());
                self.session
                    .add_control(UiRegion::new(name, *x, *y, *width, *height));
                Vec::new()
            }
            ScriptCommand::Group(value) => {
                self.session.scene_mut().set_group_attribute(value.clone());
                Vec::new()
            }
            ScriptCommand::Wait(delay) => {
                self.wait(*delay);
                Vec::new()
            }
            ScriptCommand::Ready => self.dispatch(ArEvent::EngineReady),
            ScriptCommand::Found => self.dispatch(ArEvent::TargetFound),
            ScriptCommand::Lost => self.dispatch(ArEvent::TargetLost),
            ScriptCommand::Pointer { x, y } => {
                self.dispatch(ArEvent::PointerDown { x: *x, y: *y })
            }
            ScriptCommand::Tap(id) => self.dispatch(ArEvent::PoiTapped(*id)),
            ScriptCommand::Click(action) => self.dispatch(ArEvent::Click(*action)),
        };

        // A wait records its timer steps before itself; it ends at the new time
        self.record(label, effects);
    }

    /// Steps recorded so far.
    pub fn steps(&self) -> &[ReplayStep] {
        &self.steps
    }

    /// The session being driven.
    pub fn session(&self) -> &ArSession<StaticScene, PassthroughProjector> {
        &self.session
    }

    /// Consume the replay and return its steps.
    pub fn into_steps(self) -> Vec<ReplayStep> {
        self.steps
    }

    fn now(&self) -> Instant {
        self.start + self.elapsed
    }

    fn dispatch(&mut self, event: ArEvent) -> Vec<Effect> {
        let effects = self.session.handle(event, self.now());
        for effect in &effects {
            if let Effect::ScheduleRearm { token, delay } = effect {
                self.timers.push(PendingTimer {
                    token: *token,
                    due: self.elapsed + *delay,
                });
            }
        }
        effects
    }

    fn wait(&mut self, delay: Duration) {
        let target = self.elapsed + delay;

        loop {
            let next = self
                .timers
                .iter()
                .enumerate()
                .filter(|(_, timer)| timer.due <= target)
                .min_by_key(|(_, timer)| timer.due)
                .map(|(index, _)| index);
            let Some(index) = next else {
                break;
            };

            let timer = self.timers.remove(index);
            self.elapsed = timer.due;
            let effects = self.dispatch(ArEvent::TimerFired(timer.token));
            self.record(format!("{} fired", timer.token), effects);
        }

        self.elapsed = target;
    }

    fn record(&mut self, label: String, effects: Vec<Effect>) {
        for effect in &effects {
            tracing::debug!(at_ms = self.elapsed.as_millis() as u64, %effect, "Replay effect");
        }
        self.steps.push(ReplayStep {
            at_ms: self.elapsed.as_millis() as u64,
            label,
            effects,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::content::{builtin_catalog, PoiId};
    use crate::overlay::OverlayState;
    use crate::script::parse_script;

    fn replay(text: &str) -> Replay {
        let mut replay = Replay::new(SessionConfig::default(), builtin_catalog());
        replay.run(&parse_script(text).unwrap());
        replay
    }

    const STAGE: &str = "\
viewport 1000 800
anchor 1 100 100
anchor 2 500 400
anchor 3 300 350
ready
found
";

    #[test]
    fn test_intro_then_tap_after_rearm() {
        let script = format!("{STAGE}click close-intro\nwait 1000\npointer 140 100\n");
        let replay = replay(&script);

        let steps = replay.steps();
        let found = &steps[5];
        assert_eq!(found.label, "found");
        assert_eq!(found.effects, vec![Effect::HideScanBanner, Effect::ShowIntro]);

        let timer_step = steps
            .iter()
            .find(|s| s.label.ends_with("fired"))
            .unwrap();
        assert_eq!(timer_step.at_ms, 1000);
        assert_eq!(timer_step.effects, vec![Effect::GateArmed]);

        let last = steps.last().unwrap();
        assert!(matches!(
            last.effects.as_slice(),
            [Effect::ShowPoiPanel { id: PoiId(1), .. }]
        ));
        assert_eq!(
            replay.session().overlay_state(),
            OverlayState::PoiPanel(PoiId(1))
        );
    }

    #[test]
    fn test_tap_before_rearm_is_swallowed() {
        let script = format!("{STAGE}click close-intro\nwait 999\npointer 140 100\n");
        let replay = replay(&script);
        assert!(replay.steps().last().unwrap().effects.is_empty());
        assert!(!replay.session().is_armed());
    }

    #[test]
    fn test_timers_fire_in_deadline_order() {
        // Two close actions schedule two timers; both fire during one wait
        let script = format!(
            "{STAGE}click close-intro\nwait 1000\npointer 300 350\nclick close-poi\nwait 5000\n"
        );
        let replay = replay(&script);

        let fired: Vec<(u64, &str)> = replay
            .steps()
            .iter()
            .filter(|s| s.label.ends_with("fired"))
            .map(|s| (s.at_ms, s.label.as_str()))
            .collect();
        assert_eq!(fired, vec![(1000, "timer#1 fired"), (2000, "timer#2 fired")]);
        assert_eq!(replay.steps().last().unwrap().at_ms, 6000);
    }

    #[test]
    fn test_group_attribute_blocks_hits() {
        let script =
            format!("{STAGE}click close-intro\nwait 1000\ngroup loading\npointer 140 100\n");
        let replay = replay(&script);
        assert!(replay.steps().last().unwrap().effects.is_empty());
        assert_eq!(replay.session().overlay_state(), OverlayState::None);
    }

    #[test]
    fn test_exit_navigates() {
        let replay = replay("click exit\n");
        assert_eq!(
            replay.steps()[0].effects,
            vec![Effect::Navigate("index.html".to_string())]
        );
    }

    #[test]
    fn test_step_display() {
        let step = ReplayStep {
            at_ms: 1000,
            label: "click close-poi".to_string(),
            effects: vec![Effect::HidePoiPanel],
        };
        assert_eq!(step.to_string(), "[  1000ms] click close-poi -> hide panel");
    }
}

//! Events consumed and effects produced by the session.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::content::PoiId;
use crate::gate::TimerToken;

/// A button on the AR page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    /// The intro overlay's close button.
    CloseIntro,
    /// The POI panel's close button.
    ClosePoi,
    /// The exit button, back to the menu page.
    Exit,
}

impl UiAction {
    /// Action name as used in page markup and scenario scripts.
    pub fn name(&self) -> &'static str {
        match self {
            UiAction::CloseIntro => "close-intro",
            UiAction::ClosePoi => "close-poi",
            UiAction::Exit => "exit",
        }
    }
}

impl fmt::Display for UiAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for UiAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "close-intro" => Ok(UiAction::CloseIntro),
            "close-poi" => Ok(UiAction::ClosePoi),
            "exit" | "exit-to-menu" => Ok(UiAction::Exit),
            other => Err(format!("unknown action '{}'", other)),
        }
    }
}

/// Something that happened on the AR page.
#[derive(Debug, Clone, PartialEq)]
pub enum ArEvent {
    /// The AR engine finished loading; hit-testing may start.
    EngineReady,
    /// The engine recognized the painting.
    TargetFound,
    /// The engine lost the painting.
    TargetLost,
    /// Pointer down (touch start, click) at client coordinates.
    PointerDown { x: f64, y: f64 },
    /// A POI hotspot element was tapped directly.
    PoiTapped(PoiId),
    /// A page button was clicked.
    Click(UiAction),
    /// A scheduled re-arm timer expired.
    TimerFired(TimerToken),
}

/// A change the host must apply in response to an event.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Hide the "scan the painting" banner.
    HideScanBanner,
    /// Show the intro overlay.
    ShowIntro,
    /// Hide the intro overlay.
    HideIntro,
    /// Fill the POI panel with content and show it.
    ShowPoiPanel {
        id: PoiId,
        title: String,
        body: String,
    },
    /// Hide the POI panel.
    HidePoiPanel,
    /// Deliver [`ArEvent::TimerFired`] with `token` after `delay`.
    ScheduleRearm { token: TimerToken, delay: Duration },
    /// The interaction gate became armed.
    GateArmed,
    /// Navigate away to another page.
    Navigate(String),
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Effect::HideScanBanner => write!(f, "hide scan banner"),
            Effect::ShowIntro => write!(f, "show intro"),
            Effect::HideIntro => write!(f, "hide intro"),
            Effect::ShowPoiPanel { id, title, .. } => write!(f, "show panel {} \"{}\"", id, title),
            Effect::HidePoiPanel => write!(f, "hide panel"),
            Effect::ScheduleRearm { token, delay } => {
                write!(f, "schedule {} in {}ms", token, delay.as_millis())
            }
            Effect::GateArmed => write!(f, "gate armed"),
            Effect::Navigate(page) => write!(f, "navigate to {}", page),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ui_action_parse() {
        assert_eq!("close-intro".parse(), Ok(UiAction::CloseIntro));
        assert_eq!("close-poi".parse(), Ok(UiAction::ClosePoi));
        assert_eq!("exit-to-menu".parse(), Ok(UiAction::Exit));
        assert!("open".parse::<UiAction>().is_err());
    }

    #[test]
    fn test_ui_action_name_roundtrip() {
        for action in [UiAction::CloseIntro, UiAction::ClosePoi, UiAction::Exit] {
            assert_eq!(action.name().parse(), Ok(action));
        }
    }

    #[test]
    fn test_effect_display() {
        let effect = Effect::ScheduleRearm {
            token: TimerToken(3),
            delay: Duration::from_millis(1000),
        };
        assert_eq!(effect.to_string(), "schedule timer#3 in 1000ms");
        assert_eq!(
            Effect::Navigate("index.html".to_string()).to_string(),
            "navigate to index.html"
        );
    }
}

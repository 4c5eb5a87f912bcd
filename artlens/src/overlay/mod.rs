//! Overlay state machine for the AR page.
//!
//! Tracks marker visibility, the one-time intro overlay and the POI panel.
//!
//! # State Machine
//!
//! ```text
//!             targetFound (first only)        close-intro
//!    None ───────────────────────────► Intro ─────────────► None
//!     │  ▲                                                  (never re-enters Intro)
//!     │  │ close-poi
//!     ▼  │
//!  PoiPanel(id)   ◄── hit while None
//! ```
//!
//! `targetLost` only changes [`TrackingState`]. An open panel stays open
//! when the painting leaves the camera frame.
//!
//! The machine enforces that only one overlay is visible: opening a panel
//! requires `None`, and each close action only applies to the overlay it
//! belongs to. Gate arming is the session's concern, not this type's.

use crate::content::PoiId;
use crate::tracking::TrackingState;

/// Which overlay is currently visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlayState {
    /// No overlay; the camera view is unobstructed.
    #[default]
    None,

    /// The introductory overlay shown on first recognition.
    Intro,

    /// The panel describing one POI.
    PoiPanel(PoiId),
}

impl OverlayState {
    /// Whether any overlay is visible.
    pub fn is_visible(&self) -> bool {
        !matches!(self, OverlayState::None)
    }
}

impl std::fmt::Display for OverlayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OverlayState::None => write!(f, "none"),
            OverlayState::Intro => write!(f, "intro"),
            OverlayState::PoiPanel(id) => write!(f, "panel({})", id),
        }
    }
}

/// Result of a `targetFound` event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoundTransition {
    /// The marker was not being tracked before this event.
    pub newly_tracking: bool,
    /// This event opened the intro overlay.
    pub intro_opened: bool,
}

/// Overlay and tracking state for one AR session (one page load).
#[derive(Debug, Default)]
pub struct OverlayMachine {
    tracking: TrackingState,
    overlay: OverlayState,
    intro_shown: bool,
}

impl OverlayMachine {
    /// Create a machine in the page-load state: searching, no overlay.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tracking(&self) -> TrackingState {
        self.tracking
    }

    pub fn overlay(&self) -> OverlayState {
        self.overlay
    }

    /// Whether the intro has been shown in this session.
    pub fn intro_shown(&self) -> bool {
        self.intro_shown
    }

    /// Handle the engine's `targetFound` event.
    ///
    /// Opens the intro on the first recognition of the session only.
    pub fn on_target_found(&mut self) -> FoundTransition {
        let newly_tracking = !self.tracking.is_tracking();
        self.tracking = TrackingState::Tracking;

        let intro_opened = if self.intro_shown {
            false
        } else {
            self.intro_shown = true;
            self.overlay = OverlayState::Intro;
            tracing::info!("Marker found for the first time, showing intro");
            true
        };

        if newly_tracking {
            tracing::debug!(overlay = %self.overlay, "Tracking started");
        }

        FoundTransition {
            newly_tracking,
            intro_opened,
        }
    }

    /// Handle the engine's `targetLost` event.
    ///
    /// Leaves the overlay untouched.
    pub fn on_target_lost(&mut self) {
        if self.tracking.is_tracking() {
            tracing::debug!(overlay = %self.overlay, "Tracking lost");
        }
        self.tracking = TrackingState::Searching;
    }

    /// Close the intro overlay.
    ///
    /// # Returns
    ///
    /// `true` if the intro was visible and is now closed.
    pub fn close_intro(&mut self) -> bool {
        if self.overlay != OverlayState::Intro {
            return false;
        }
        self.overlay = OverlayState::None;
        tracing::info!("Intro closed");
        true
    }

    /// Open the panel for a POI.
    ///
    /// Only allowed when no overlay is visible.
    pub fn open_poi(&mut self, id: PoiId) -> bool {
        if self.overlay.is_visible() {
            return false;
        }
        self.overlay = OverlayState::PoiPanel(id);
        tracing::info!(poi = %id, "POI panel opened");
        true
    }

    /// Close the visible POI panel.
    ///
    /// # Returns
    ///
    /// The id of the closed panel, or `None` if no panel was visible.
    pub fn close_poi(&mut self) -> Option<PoiId> {
        let OverlayState::PoiPanel(id) = self.overlay else {
            return None;
        };
        self.overlay = OverlayState::None;
        tracing::info!(poi = %id, "POI panel closed");
        Some(id)
    }
}

//! Marker tracking state.
//!
//! Mirrors the AR engine's view of the painting: either it is searching for
//! the marker or it is currently tracking it. Only `targetFound` and
//! `targetLost` events change this state.

/// Whether the AR engine currently sees the painting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackingState {
    /// Marker not in view. Initial state on page load.
    #[default]
    Searching,

    /// Marker recognized and being tracked.
    Tracking,
}

impl TrackingState {
    pub fn is_tracking(&self) -> bool {
        matches!(self, TrackingState::Tracking)
    }
}

impl std::fmt::Display for TrackingState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrackingState::Searching => write!(f, "searching"),
            TrackingState::Tracking => write!(f, "tracking"),
        }
    }
}

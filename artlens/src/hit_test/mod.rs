//! Screen-space hit-testing of POI anchors.
//!
//! Maps a 2D pointer position onto the POI hotspots the AR engine renders
//! on the painting.
//!
//! # Preconditions
//!
//! Checked in order, stopping at the first failure:
//!
//! 1. The pointer is not on a UI control (exit button, panel chrome).
//! 2. No overlay is visible.
//! 3. The interaction gate is armed.
//! 4. The marker is being tracked.
//! 5. The POI group visibility attribute is exactly `true`.
//!
//! # Algorithm
//!
//! Every POI anchor is projected to screen space for the current frame. The
//! hit radius is a fraction (default 12%) of the smaller viewport dimension
//! so targets scale with device and orientation. Among POIs within the
//! radius the one with the smallest squared distance wins; ties go to the
//! POI declared first in the catalog.

mod engine;

pub use engine::{
    nearest_within, HitContext, HitOutcome, HitTester, Rejection, DEFAULT_HIT_RADIUS_FRACTION,
};

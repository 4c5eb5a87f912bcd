//! Scenario scripts for driving a session without an AR engine.
//!
//! A script is a plain text file with one command per line:
//!
//! ```text
//! viewport 1000 800      # lay out the page
//! anchor 1 100 100       # POI 1 projects to (100, 100)
//! ui 0 0 200 60          # a control region that swallows pointers
//! ready                  # AR engine finished loading
//! found                  # marker acquired, intro opens
//! click close-intro      # also: close-poi, exit
//! wait 1000              # advance the virtual clock, firing timers
//! pointer 140 100        # pointer down at client coordinates
//! tap 2                  # direct hotspot tap
//! group false            # overwrite the group visibility attribute
//! lost                   # marker lost
//! ```
//!
//! [`Replay`] runs the commands on a virtual clock and records the effects
//! each one produced.

mod parser;
mod replay;

pub use parser::{load_script, parse_script, ScriptCommand, ScriptError};
pub use replay::{Replay, ReplayStep};

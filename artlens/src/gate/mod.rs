//! Interaction gate and re-arm timing.
//!
//! The gate decides whether a pointer event may select a POI. It is disarmed
//! while an overlay is animating in or open, and re-armed a fixed delay
//! after an overlay closes so the closing tap is not read as a POI tap.
//!
//! # Timers
//!
//! ```text
//! close overlay ──► arm_after(1s) ──► TimerToken(n), due = now + 1s
//!                                           │
//!                   fire(n) / poll(due) ────┴──► armed = true
//! ```
//!
//! Every `arm_after` creates an independent timer. Timers are never
//! cancelled: a stale timer that fires after a panel opened only re-arms the
//! gate, and hit-testing still rejects because an overlay is visible.
//! Arming an armed gate is a no-op.
//!
//! Deadlines are plain [`Instant`]s supplied by the caller, so the gate is
//! deterministic under test and under a virtual clock.

use std::time::{Duration, Instant};

/// Delay between an overlay closing and POI taps being accepted again.
pub const DEFAULT_REARM_DELAY: Duration = Duration::from_millis(1000);

/// Handle for one scheduled re-arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerToken(pub u64);

impl std::fmt::Display for TimerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy)]
struct PendingArm {
    token: TimerToken,
    due: Instant,
}

/// Gate controlling pointer-driven POI selection.
#[derive(Debug)]
pub struct InteractionGate {
    armed: bool,
    pending: Vec<PendingArm>,
    next_token: u64,
}

impl InteractionGate {
    /// Create a disarmed gate.
    ///
    /// POIs are unreachable until the intro has been dismissed, which is the
    /// first thing that arms the gate.
    pub fn new() -> Self {
        Self {
            armed: false,
            pending: Vec::new(),
            next_token: 1,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Number of scheduled arms that have not fired.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Earliest pending deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.iter().map(|p| p.due).min()
    }

    /// Disarm immediately. Pending timers are kept.
    pub fn disarm(&mut self) {
        if self.armed {
            tracing::debug!("Interaction gate disarmed");
        }
        self.armed = false;
    }

    /// Schedule the gate to arm `delay` after `now`.
    pub fn arm_after(&mut self, delay: Duration, now: Instant) -> TimerToken {
        let token = TimerToken(self.next_token);
        self.next_token += 1;
        self.pending.push(PendingArm {
            token,
            due: now + delay,
        });
        tracing::debug!(
            token = %token,
            delay_ms = delay.as_millis() as u64,
            "Interaction gate re-arm scheduled"
        );
        token
    }

    /// Fire a specific timer.
    ///
    /// # Returns
    ///
    /// `true` if this changed the gate from disarmed to armed. Unknown or
    /// already-fired tokens return `false`.
    pub fn fire(&mut self, token: TimerToken) -> bool {
        let Some(index) = self.pending.iter().position(|p| p.token == token) else {
            tracing::debug!(token = %token, "Ignoring unknown timer");
            return false;
        };
        self.pending.remove(index);
        self.arm(token)
    }

    /// Fire every timer due at or before `now`, in deadline order.
    ///
    /// # Returns
    ///
    /// `true` if the gate went from disarmed to armed.
    pub fn poll(&mut self, now: Instant) -> bool {
        let mut due: Vec<PendingArm> = Vec::new();
        self.pending.retain(|p| {
            if p.due <= now {
                due.push(*p);
                false
            } else {
                true
            }
        });
        due.sort_by_key(|p| (p.due, p.token));

        let mut changed = false;
        for pending in due {
            changed |= self.arm(pending.token);
        }
        changed
    }

    fn arm(&mut self, token: TimerToken) -> bool {
        if self.armed {
            tracing::debug!(token = %token, "Interaction gate already armed");
            return false;
        }
        self.armed = true;
        tracing::debug!(token = %token, "Interaction gate armed");
        true
    }
}

impl Default for InteractionGate {
    fn default() -> Self {
        Self::new()
    }
}

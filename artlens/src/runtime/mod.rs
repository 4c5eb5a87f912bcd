//! Async event loop for an [`ArSession`].
//!
//! The session itself is synchronous. [`SessionRunner`] gives it a home on
//! a single tokio task: events arrive on an unbounded channel and are
//! handled strictly in arrival order. Re-arm timers are `tokio::time::sleep`
//! tasks that post [`ArEvent::TimerFired`] back into the same channel, so a
//! timer is always ordered after the event that scheduled it and before any
//! event that arrives after it fires.
//!
//! # Example
//!
//! ```ignore
//! use tokio::sync::mpsc;
//! use artlens::runtime::SessionRunner;
//!
//! let (event_tx, event_rx) = mpsc::unbounded_channel();
//! let (effect_tx, mut effect_rx) = mpsc::unbounded_channel();
//! let handle = SessionRunner::new(session, effect_tx).start(&event_tx, event_rx);
//!
//! event_tx.send(ArEvent::TargetFound)?;
//! while let Some(effect) = effect_rx.recv().await { /* apply to UI */ }
//! ```
//!
//! The loop ends when every external sender is dropped and no timer is
//! pending; the session is handed back through the join handle.

use std::time::Duration;

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, WeakUnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::gate::TimerToken;
use crate::projection::Projector;
use crate::scene::ArScene;
use crate::session::{ArEvent, ArSession, Effect};

/// Drives an [`ArSession`] from a channel of events.
pub struct SessionRunner<S, P> {
    session: ArSession<S, P>,
    effects: UnboundedSender<Effect>,
}

impl<S, P> SessionRunner<S, P>
where
    S: ArScene + Send + 'static,
    P: Projector + Send + 'static,
{
    /// Create a runner that publishes effects on `effects`.
    pub fn new(session: ArSession<S, P>, effects: UnboundedSender<Effect>) -> Self {
        Self { session, effects }
    }

    /// Spawn the event loop.
    ///
    /// `events` is the sender half of `rx`; the runner keeps only a weak
    /// handle to it for posting timer events, so the loop still ends once
    /// the caller's senders are gone.
    pub fn start(
        self,
        events: &UnboundedSender<ArEvent>,
        rx: UnboundedReceiver<ArEvent>,
    ) -> JoinHandle<ArSession<S, P>> {
        let timers = events.downgrade();
        tokio::spawn(self.run(rx, timers))
    }

    async fn run(
        mut self,
        mut rx: UnboundedReceiver<ArEvent>,
        timers: WeakUnboundedSender<ArEvent>,
    ) -> ArSession<S, P> {
        tracing::debug!("Session runner started");

        while let Some(event) = rx.recv().await {
            let now = Instant::now().into_std();
            for effect in self.session.handle(event, now) {
                if let Effect::ScheduleRearm { token, delay } = &effect {
                    spawn_timer(&timers, *token, *delay);
                }
                if self.effects.send(effect).is_err() {
                    tracing::debug!("Effect receiver dropped");
                }
            }
        }

        tracing::debug!("Session runner stopped");
        self.session
    }
}

fn spawn_timer(
    timers: &WeakUnboundedSender<ArEvent>,
    token: TimerToken,
    delay: Duration,
) {
    let Some(tx) = timers.upgrade() else {
        tracing::debug!(token = %token, "Event channel closed, timer not scheduled");
        return;
    };
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        if tx.send(ArEvent::TimerFired(token)).is_err() {
            tracing::debug!(token = %token, "Session gone before timer fired");
        }
    });
}

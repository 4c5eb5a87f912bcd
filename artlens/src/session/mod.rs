//! AR session dispatcher.
//!
//! [`ArSession`] is the single entry point for everything that happens on
//! the AR page: engine callbacks, pointer input, button clicks and timer
//! expiry all arrive as [`ArEvent`]s and are handled one at a time. Each
//! call returns the [`Effect`]s the host must apply (show or hide overlays,
//! schedule a timer, navigate).
//!
//! # Architecture
//!
//! ```text
//!  engine ──targetFound/Lost──┐
//!  platform ──pointer/click───┼──► ArSession::handle ──► Vec<Effect> ──► host UI
//!  timers ──TimerFired────────┘        │
//!                                      ├── OverlayMachine (tracking, overlays)
//!                                      ├── InteractionGate (armed, timers)
//!                                      └── HitTester ──► Projector + ArScene
//! ```
//!
//! The session never blocks and never suspends; it is a function of
//! (state, event) → (state', effects). A host runs it on one logical
//! thread and delivers timer events through the same FIFO queue as
//! everything else, see [`crate::runtime`].
//!
//! # Example
//!
//! ```ignore
//! use artlens::session::{ArEvent, ArSession, SessionConfig, UiAction};
//!
//! let mut session = ArSession::new(SessionConfig::default(), catalog, scene, projector);
//! session.handle(ArEvent::EngineReady, now);
//! session.handle(ArEvent::TargetFound, now);
//! let effects = session.handle(ArEvent::Click(UiAction::CloseIntro), now);
//! ```

mod dispatcher;
mod event;

pub use dispatcher::{ArSession, SessionConfig};
pub use event::{ArEvent, Effect, UiAction};

//! ArtLens - AR art guide interaction core
//!
//! This library implements the interaction logic behind an augmented-reality
//! museum guide: a printed painting is used as a tracking marker, and once
//! the camera finds it, clickable points of interest (POIs) are overlaid on
//! the artwork. Tapping a POI opens a panel with its story.
//!
//! The core is engine-agnostic. The AR engine is reached through the
//! [`scene::ArScene`] and [`projection::Projector`] traits, and everything
//! the host must do in response to input comes back as
//! [`session::Effect`] values.
//!
//! # Modules
//!
//! - [`session`]: event dispatcher, the entry point
//! - [`overlay`] / [`tracking`]: overlay and marker-tracking state
//! - [`gate`]: interaction gate with delayed re-arming
//! - [`hit_test`]: pointer to POI resolution
//! - [`projection`] / [`coord`]: world to screen math
//! - [`content`]: POI catalog
//! - [`runtime`]: tokio event loop
//! - [`script`]: scenario replay on a virtual clock
//! - [`config`] / [`logging`]: ambient setup

pub mod config;
pub mod content;
pub mod coord;
pub mod gate;
pub mod hit_test;
pub mod logging;
pub mod overlay;
pub mod projection;
pub mod runtime;
pub mod scene;
pub mod script;
pub mod session;
pub mod tracking;

//! Point-of-interest content.
//!
//! The catalog is the static mapping from POI id to the text shown in the
//! POI panel, plus the anchor handle the AR engine uses to position the
//! hotspot on the painting. It is loaded once at startup and never mutated.
//!
//! # Declaration Order
//!
//! Catalog order is significant: when two POIs are equally close to a
//! pointer, the hit-test picks the one declared first.
//!
//! # Content File (INI)
//!
//! ```ini
//! [poi.1]
//! title = The lost portrait.
//! body = The portrait surfaced at an auction in the 1990s.
//! anchor = poi-1
//! ```
//!
//! `anchor` is optional and defaults to `poi-{id}`.

mod builtin;
mod catalog;

pub use builtin::builtin_catalog;
pub use catalog::{AnchorRef, ContentError, PoiCatalog, PoiId, PointOfInterest};

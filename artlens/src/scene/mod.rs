//! Boundary to the external AR/rendering engine.
//!
//! The engine owns the scene graph. The interaction core only needs three
//! things from it: where each POI anchor currently is, whether the POI
//! hotspot group is visible, and a way to show or hide that group.
//!
//! The group visibility flag is exposed by engines as a generic attribute,
//! so it is not guaranteed to be a boolean. [`AttributeValue`] keeps the raw
//! shape and only an exact `true` counts as visible.

use std::collections::HashMap;
use std::fmt;

use glam::DVec3;

use crate::content::AnchorRef;

/// Raw value of an engine attribute.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AttributeValue {
    /// The attribute is not set.
    #[default]
    Missing,
    /// A boolean value.
    Bool(bool),
    /// Any other value, including transitional states.
    Text(String),
}

impl AttributeValue {
    /// Whether the value is exactly boolean `true`.
    pub fn is_true(&self) -> bool {
        matches!(self, AttributeValue::Bool(true))
    }

    /// Parse the string form an engine reports (`"true"`, `"false"`, other).
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "true" => AttributeValue::Bool(true),
            "false" => AttributeValue::Bool(false),
            "" => AttributeValue::Missing,
            other => AttributeValue::Text(other.to_string()),
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Missing => write!(f, "(unset)"),
            AttributeValue::Bool(b) => write!(f, "{}", b),
            AttributeValue::Text(s) => write!(f, "{:?}", s),
        }
    }
}

/// Queries and commands the interaction core uses on the AR engine.
pub trait ArScene {
    /// Current world position of an anchor, if the engine knows it.
    fn anchor_position(&self, anchor: &AnchorRef) -> Option<DVec3>;

    /// Current value of the POI group's visibility attribute.
    fn group_visibility(&self) -> AttributeValue;

    /// Show or hide the POI hotspot group.
    fn set_group_visible(&mut self, visible: bool);
}

/// In-memory scene with fixed anchor positions.
///
/// Stands in for the engine in tests and in the scenario runner.
#[derive(Debug, Clone)]
pub struct StaticScene {
    anchors: HashMap<AnchorRef, DVec3>,
    group: AttributeValue,
}

impl StaticScene {
    /// Create an empty scene with the POI group hidden.
    pub fn new() -> Self {
        Self {
            anchors: HashMap::new(),
            group: AttributeValue::Bool(false),
        }
    }

    /// Place (or move) an anchor.
    pub fn set_anchor(&mut self, anchor: AnchorRef, position: DVec3) {
        self.anchors.insert(anchor, position);
    }

    /// Remove an anchor from the scene.
    pub fn remove_anchor(&mut self, anchor: &AnchorRef) {
        self.anchors.remove(anchor);
    }

    /// Overwrite the raw group visibility attribute.
    pub fn set_group_attribute(&mut self, value: AttributeValue) {
        self.group = value;
    }
}

impl Default for StaticScene {
    fn default() -> Self {
        Self::new()
    }
}

impl ArScene for StaticScene {
    fn anchor_position(&self, anchor: &AnchorRef) -> Option<DVec3> {
        self.anchors.get(anchor).copied()
    }

    fn group_visibility(&self) -> AttributeValue {
        self.group.clone()
    }

    fn set_group_visible(&mut self, visible: bool) {
        self.group = AttributeValue::Bool(visible);
    }
}

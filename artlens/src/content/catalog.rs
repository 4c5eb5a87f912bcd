//! Catalog types and INI loading.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use ini::Ini;
use thiserror::Error;

/// Prefix of POI section names in a content file.
const SECTION_PREFIX: &str = "poi.";

/// Identifier of a point of interest (1..N).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PoiId(pub u32);

impl fmt::Display for PoiId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "poi#{}", self.0)
    }
}

/// Opaque handle to a POI anchor in the external scene graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnchorRef(String);

impl AnchorRef {
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    /// Default anchor handle for a POI id.
    pub fn for_id(id: PoiId) -> Self {
        Self(format!("poi-{}", id.0))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AnchorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A point of interest on the tracked painting.
#[derive(Debug, Clone, PartialEq)]
pub struct PointOfInterest {
    pub id: PoiId,
    pub title: String,
    pub body: String,
    pub anchor: AnchorRef,
}

impl PointOfInterest {
    /// Create a POI anchored at the default handle for its id.
    pub fn new(id: u32, title: impl Into<String>, body: impl Into<String>) -> Self {
        let id = PoiId(id);
        Self {
            id,
            title: title.into(),
            body: body.into(),
            anchor: AnchorRef::for_id(id),
        }
    }

    /// Override the anchor handle.
    pub fn with_anchor(mut self, anchor: AnchorRef) -> Self {
        self.anchor = anchor;
        self
    }
}

/// Errors that can occur while loading POI content.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The content file could not be read or parsed.
    #[error("Failed to read content file {path}: {message}")]
    Read { path: PathBuf, message: String },

    /// A section name did not carry a valid numeric id.
    #[error("Invalid POI section '[{0}]', expected [poi.N] with N >= 1")]
    InvalidId(String),

    /// Two sections declared the same id.
    #[error("Duplicate POI id {0}")]
    DuplicateId(u32),

    /// A required key was missing from a section.
    #[error("POI section '[{section}]' is missing '{key}'")]
    MissingKey { section: String, key: &'static str },
}

/// Immutable, ordered POI catalog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PoiCatalog {
    pois: Vec<PointOfInterest>,
}

impl PoiCatalog {
    /// Build a catalog, rejecting duplicate ids.
    pub fn new(pois: Vec<PointOfInterest>) -> Result<Self, ContentError> {
        let mut seen = HashSet::new();
        for poi in &pois {
            if poi.id.0 == 0 {
                return Err(ContentError::InvalidId(format!("{}0", SECTION_PREFIX)));
            }
            if !seen.insert(poi.id) {
                return Err(ContentError::DuplicateId(poi.id.0));
            }
        }
        Ok(Self { pois })
    }

    /// Load a catalog from an INI content file.
    pub fn load(path: &Path) -> Result<Self, ContentError> {
        let ini = Ini::load_from_file(path).map_err(|e| ContentError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let catalog = Self::from_ini(&ini)?;
        tracing::info!(
            path = %path.display(),
            count = catalog.len(),
            "Loaded POI content"
        );
        Ok(catalog)
    }

    /// Parse a catalog from INI text.
    pub fn from_ini_str(text: &str) -> Result<Self, ContentError> {
        let ini = Ini::load_from_str(text).map_err(|e| ContentError::Read {
            path: PathBuf::from("<inline>"),
            message: e.to_string(),
        })?;
        Self::from_ini(&ini)
    }

    fn from_ini(ini: &Ini) -> Result<Self, ContentError> {
        let mut pois = Vec::new();

        for (section, props) in ini.iter() {
            let Some(name) = section else {
                continue;
            };
            let Some(raw_id) = name.strip_prefix(SECTION_PREFIX) else {
                tracing::debug!(section = name, "Ignoring non-POI section");
                continue;
            };
            let id: u32 = raw_id
                .trim()
                .parse()
                .map_err(|_| ContentError::InvalidId(name.to_string()))?;
            if id == 0 {
                return Err(ContentError::InvalidId(name.to_string()));
            }

            let title = props.get("title").ok_or_else(|| ContentError::MissingKey {
                section: name.to_string(),
                key: "title",
            })?;
            let body = props.get("body").ok_or_else(|| ContentError::MissingKey {
                section: name.to_string(),
                key: "body",
            })?;

            let mut poi = PointOfInterest::new(id, title.trim(), body.trim());
            if let Some(anchor) = props.get("anchor") {
                poi = poi.with_anchor(AnchorRef::new(anchor.trim()));
            }
            pois.push(poi);
        }

        Self::new(pois)
    }

    /// Look up a POI by id.
    pub fn get(&self, id: PoiId) -> Option<&PointOfInterest> {
        self.pois.iter().find(|poi| poi.id == id)
    }

    /// POIs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &PointOfInterest> {
        self.pois.iter()
    }

    pub fn len(&self) -> usize {
        self.pois.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pois.is_empty()
    }
}

//! INI-backed configuration file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use ini::Ini;
use thiserror::Error;

use crate::content::{builtin_catalog, ContentError, PoiCatalog};
use crate::gate::DEFAULT_REARM_DELAY;
use crate::hit_test::DEFAULT_HIT_RADIUS_FRACTION;
use crate::session::SessionConfig;

const CONFIG_DIR_NAME: &str = "artlens";
const CONFIG_FILE_NAME: &str = "config.ini";

/// Errors that can occur while loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be parsed.
    #[error("Failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// A value had the wrong type or was out of range.
    #[error("Invalid value for {key}: '{value}' ({reason})")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    /// I/O error while writing.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// `[interaction]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionSettings {
    /// Delay before POI taps are accepted after an overlay closes.
    pub rearm_delay_ms: u64,
    /// Hit radius as a fraction of the smaller viewport dimension.
    pub hit_radius_fraction: f64,
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self {
            rearm_delay_ms: DEFAULT_REARM_DELAY.as_millis() as u64,
            hit_radius_fraction: DEFAULT_HIT_RADIUS_FRACTION,
        }
    }
}

/// `[navigation]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationSettings {
    /// Page the exit button leads to.
    pub menu_page: String,
}

impl Default for NavigationSettings {
    fn default() -> Self {
        Self {
            menu_page: "index.html".to_string(),
        }
    }
}

/// `[content]` section.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentSettings {
    /// POI content file; the built-in catalog is used when unset.
    pub file: Option<PathBuf>,
}

/// The complete configuration file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigFile {
    pub interaction: InteractionSettings,
    pub navigation: NavigationSettings,
    pub content: ContentSettings,
}

/// Default configuration file location.
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
        .join(CONFIG_FILE_NAME)
}

impl ConfigFile {
    /// Load from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_file_path())
    }

    /// Load from a specific path. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let config = Self::from_ini(&ini)?;
        tracing::debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// Parse from INI text.
    pub fn from_ini_str(text: &str) -> Result<Self, ConfigError> {
        let ini = Ini::load_from_str(text).map_err(|e| ConfigError::Parse {
            path: PathBuf::from("<inline>"),
            message: e.to_string(),
        })?;
        Self::from_ini(&ini)
    }

    fn from_ini(ini: &Ini) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(section) = ini.section(Some("interaction")) {
            if let Some(value) = section.get("rearm_delay_ms") {
                config.interaction.rearm_delay_ms = parse_rearm_delay(value)?;
            }
            if let Some(value) = section.get("hit_radius_fraction") {
                config.interaction.hit_radius_fraction = parse_radius_fraction(value)?;
            }
        }

        if let Some(section) = ini.section(Some("navigation")) {
            if let Some(value) = section.get("menu_page") {
                config.navigation.menu_page = parse_menu_page(value)?;
            }
        }

        if let Some(section) = ini.section(Some("content")) {
            config.content.file = section
                .get("file")
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from);
        }

        Ok(config)
    }

    fn to_ini(&self) -> Ini {
        let mut ini = Ini::new();
        ini.with_section(Some("interaction"))
            .set("rearm_delay_ms", self.interaction.rearm_delay_ms.to_string())
            .set(
                "hit_radius_fraction",
                self.interaction.hit_radius_fraction.to_string(),
            );
        ini.with_section(Some("navigation"))
            .set("menu_page", self.navigation.menu_page.clone());
        if let Some(file) = &self.content.file {
            ini.with_section(Some("content"))
                .set("file", file.to_string_lossy().to_string());
        }
        ini
    }

    /// Save to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&config_file_path())
    }

    /// Save to a specific path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        self.to_ini().write_to_file(path)?;
        tracing::info!(path = %path.display(), "Saved config file");
        Ok(())
    }

    /// Session tunables derived from this file.
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig::default()
            .with_rearm_delay(Duration::from_millis(self.interaction.rearm_delay_ms))
            .with_hit_radius_fraction(self.interaction.hit_radius_fraction)
            .with_menu_page(self.navigation.menu_page.clone())
    }

    /// The POI catalog: the configured content file, or the built-in one.
    pub fn load_catalog(&self) -> Result<PoiCatalog, ContentError> {
        match &self.content.file {
            Some(path) => PoiCatalog::load(path),
            None => Ok(builtin_catalog()),
        }
    }
}

pub(crate) fn parse_rearm_delay(value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|e| ConfigError::InvalidValue {
            key: "interaction.rearm_delay_ms".to_string(),
            value: value.to_string(),
            reason: e.to_string(),
        })
}

pub(crate) fn parse_menu_page(value: &str) -> Result<String, ConfigError> {
    let page = value.trim();
    if page.is_empty() {
        return Err(ConfigError::InvalidValue {
            key: "navigation.menu_page".to_string(),
            value: value.to_string(),
            reason: "must not be empty".to_string(),
        });
    }
    Ok(page.to_string())
}

pub(crate) fn parse_radius_fraction(value: &str) -> Result<f64, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidValue {
        key: "interaction.hit_radius_fraction".to_string(),
        value: value.to_string(),
        reason,
    };
    let fraction: f64 = value
        .trim()
        .parse()
        .map_err(|e: std::num::ParseFloatError| invalid(e.to_string()))?;
    if !(fraction > 0.0 && fraction <= 1.0) {
        return Err(invalid("must be in (0, 1]".to_string()));
    }
    Ok(fraction)
}

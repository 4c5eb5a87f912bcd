//! Typed `section.key` access to configuration values.

use std::path::PathBuf;
use std::str::FromStr;

use super::file::{
    parse_menu_page, parse_radius_fraction, parse_rearm_delay, ConfigError, ConfigFile,
};

/// A settable configuration key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    InteractionRearmDelayMs,
    InteractionHitRadiusFraction,
    NavigationMenuPage,
    ContentFile,
}

impl ConfigKey {
    /// Every key, in display order.
    pub fn all() -> &'static [ConfigKey] {
        &[
            ConfigKey::InteractionRearmDelayMs,
            ConfigKey::InteractionHitRadiusFraction,
            ConfigKey::NavigationMenuPage,
            ConfigKey::ContentFile,
        ]
    }

    /// Full `section.key` name.
    pub fn name(&self) -> &'static str {
        match self {
            ConfigKey::InteractionRearmDelayMs => "interaction.rearm_delay_ms",
            ConfigKey::InteractionHitRadiusFraction => "interaction.hit_radius_fraction",
            ConfigKey::NavigationMenuPage => "navigation.menu_page",
            ConfigKey::ContentFile => "content.file",
        }
    }

    /// INI section name.
    pub fn section(&self) -> &'static str {
        self.name().split_once('.').map(|(s, _)| s).unwrap_or("")
    }

    /// Key name within the section.
    pub fn key_name(&self) -> &'static str {
        self.name().split_once('.').map(|(_, k)| k).unwrap_or("")
    }

    /// Current value as a string; empty when unset.
    pub fn get(&self, config: &ConfigFile) -> String {
        match self {
            ConfigKey::InteractionRearmDelayMs => config.interaction.rearm_delay_ms.to_string(),
            ConfigKey::InteractionHitRadiusFraction => {
                config.interaction.hit_radius_fraction.to_string()
            }
            ConfigKey::NavigationMenuPage => config.navigation.menu_page.clone(),
            ConfigKey::ContentFile => config
                .content
                .file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string())
                .unwrap_or_default(),
        }
    }

    /// Validate and set a value.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> Result<(), ConfigError> {
        match self {
            ConfigKey::InteractionRearmDelayMs => {
                config.interaction.rearm_delay_ms = parse_rearm_delay(value)?;
            }
            ConfigKey::InteractionHitRadiusFraction => {
                config.interaction.hit_radius_fraction = parse_radius_fraction(value)?;
            }
            ConfigKey::NavigationMenuPage => {
                config.navigation.menu_page = parse_menu_page(value)?;
            }
            ConfigKey::ContentFile => {
                let path = value.trim();
                config.content.file = if path.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(path))
                };
            }
        }
        Ok(())
    }
}

impl FromStr for ConfigKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigKey::all()
            .iter()
            .copied()
            .find(|key| key.name() == s)
            .ok_or_else(|| format!("unknown configuration key '{}'", s))
    }
}

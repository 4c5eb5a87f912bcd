//! Configuration file handling.
//!
//! Settings live in an INI file, by default at
//! `~/.config/artlens/config.ini` (platform config directory). A missing
//! file means "all defaults".
//!
//! # Example Configuration (INI)
//!
//! ```ini
//! [interaction]
//! rearm_delay_ms = 1000
//! hit_radius_fraction = 0.12
//!
//! [navigation]
//! menu_page = index.html
//!
//! [content]
//! file = /srv/artlens/poi.ini
//! ```

mod file;
mod keys;

pub use file::{
    config_file_path, ConfigError, ConfigFile, ContentSettings, InteractionSettings,
    NavigationSettings,
};
pub use keys::ConfigKey;

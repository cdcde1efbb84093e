//! Configuration management for bdmux.
//!
//! This module provides:
//! - TOML-based configuration with logical sections
//! - Atomic file writes (write to temp, then rename)
//! - Section-level updates (only changed section is modified)
//! - Defaults for every missing key
//!
//! # Example
//!
//! ```no_run
//! use bdmux_core::config::{ConfigManager, ConfigSection};
//!
//! let mut config = ConfigManager::new(".config/bdmux/settings.toml");
//! config.load_or_create().unwrap();
//!
//! println!("Shell: {}", config.settings().launch.shell);
//!
//! config.settings_mut().listing.min_relevant_secs = 300;
//! config.update_section(ConfigSection::Listing).unwrap();
//! ```

mod manager;
mod settings;

pub use manager::{ConfigError, ConfigManager, ConfigResult};
pub use settings::{ConfigSection, LaunchSettings, ListingSettings, LoggingSettings, Settings};

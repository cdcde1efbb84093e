//! Settings struct with TOML-based sections.
//!
//! Settings are organized into logical sections that map to TOML tables.
//! Each section can be updated independently for atomic section-level updates.

use serde::{Deserialize, Serialize};

use crate::logging::LogLevel;

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,

    /// Playlist listing settings.
    #[serde(default)]
    pub listing: ListingSettings,

    /// Settings for executing synthesized commands.
    #[serde(default)]
    pub launch: LaunchSettings,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Default level when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// Also write a log file into `logs_folder`.
    #[serde(default)]
    pub log_to_file: bool,

    /// Folder for log files.
    #[serde(default = "default_logs_folder")]
    pub logs_folder: String,
}

fn default_log_level() -> LogLevel {
    LogLevel::default()
}

fn default_logs_folder() -> String {
    ".logs".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            log_to_file: false,
            logs_folder: default_logs_folder(),
        }
    }
}

/// Playlist listing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingSettings {
    /// Shortest playlist, in seconds, shown by `list-playlists`.
    #[serde(default = "default_min_relevant_secs")]
    pub min_relevant_secs: u32,
}

fn default_min_relevant_secs() -> u32 {
    120
}

impl Default for ListingSettings {
    fn default() -> Self {
        Self {
            min_relevant_secs: default_min_relevant_secs(),
        }
    }
}

/// Command execution configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchSettings {
    /// Shell used to evaluate remux commands. Must support `<(...)`.
    #[serde(default = "default_shell")]
    pub shell: String,
}

fn default_shell() -> String {
    "bash".to_string()
}

impl Default for LaunchSettings {
    fn default() -> Self {
        Self {
            shell: default_shell(),
        }
    }
}

/// Names of config sections for targeted updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigSection {
    Logging,
    Listing,
    Launch,
}

impl ConfigSection {
    /// All sections, in file order.
    pub const ALL: [ConfigSection; 3] = [
        ConfigSection::Logging,
        ConfigSection::Listing,
        ConfigSection::Launch,
    ];

    /// Get the TOML table name for this section.
    pub fn table_name(&self) -> &'static str {
        match self {
            ConfigSection::Logging => "logging",
            ConfigSection::Listing => "listing",
            ConfigSection::Launch => "launch",
        }
    }

    /// Comment written above the section.
    pub fn description(&self) -> &'static str {
        match self {
            ConfigSection::Logging => "Logging configuration",
            ConfigSection::Listing => "Playlist listing",
            ConfigSection::Launch => "Remux command execution",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_serializes() {
        let settings = Settings::default();
        let toml = toml::to_string_pretty(&settings).unwrap();
        assert!(toml.contains("[logging]"));
        assert!(toml.contains("[listing]"));
        assert!(toml.contains("min_relevant_secs = 120"));
    }

    #[test]
    fn settings_round_trip() {
        let settings = Settings::default();
        let toml = toml::to_string_pretty(&settings).unwrap();
        let parsed: Settings = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.launch.shell, settings.launch.shell);
        assert_eq!(parsed.logging.level, settings.logging.level);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let minimal = "[listing]\nmin_relevant_secs = 600";
        let parsed: Settings = toml::from_str(minimal).unwrap();
        // Custom value preserved
        assert_eq!(parsed.listing.min_relevant_secs, 600);
        // Defaults applied for missing
        assert_eq!(parsed.launch.shell, "bash");
        assert!(!parsed.logging.log_to_file);
    }

    #[test]
    fn logging_defaults_to_warn() {
        let parsed: Settings = toml::from_str("[logging]\nlog_to_file = true").unwrap();
        assert_eq!(parsed.logging.level, LogLevel::Warn);
        assert_eq!(Settings::default().logging.level, LogLevel::Warn);
    }

    #[test]
    fn log_level_is_lowercase_in_toml() {
        let parsed: Settings = toml::from_str("[logging]\nlevel = \"debug\"").unwrap();
        assert_eq!(parsed.logging.level, LogLevel::Debug);
    }
}

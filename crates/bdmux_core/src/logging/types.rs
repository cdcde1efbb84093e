//! Logging types.

use serde::{Deserialize, Serialize};

/// Log level for filtering messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace-level debugging (very verbose).
    Trace,
    /// Debug information.
    Debug,
    /// General information.
    Info,
    /// Warnings.
    #[default]
    Warn,
    /// Errors.
    Error,
}

impl LogLevel {
    /// The level `steps` notches more verbose, stopping at `Trace`.
    ///
    /// Used for repeated `-v` flags.
    pub fn more_verbose(self, steps: u8) -> LogLevel {
        const ORDER: [LogLevel; 5] = [
            LogLevel::Error,
            LogLevel::Warn,
            LogLevel::Info,
            LogLevel::Debug,
            LogLevel::Trace,
        ];
        let start = ORDER.iter().position(|l| *l == self).unwrap_or(0);
        let index = (start + steps as usize).min(ORDER.len() - 1);
        ORDER[index]
    }
}

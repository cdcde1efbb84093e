//! Playlist identifiers.
//!
//! Playlists are addressed by the number of their `.mpls` file, written by
//! users either bare (`1`) or zero padded (`00001`). Only ASCII decimal
//! digits are accepted; there is no whitespace, sign, radix prefix or digit
//! grouping. Values that do not fit in 32 bits are rejected.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while resolving a textual playlist identifier.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlaylistIdError {
    #[error("illegal playlist '': identifier is empty")]
    Empty,

    #[error("illegal playlist '{input}': unexpected char '{ch}' at position {position}")]
    UnexpectedChar {
        input: String,
        ch: char,
        position: usize,
    },

    #[error("illegal playlist '{input}': value does not fit in 32 bits")]
    Overflow { input: String },
}

/// Numeric playlist identifier.
///
/// Displays zero padded to five digits, the way playlist files are named.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PlaylistId(u32);

impl PlaylistId {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// The numeric value.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for PlaylistId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:05}", self.0)
    }
}

impl From<u32> for PlaylistId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl FromStr for PlaylistId {
    type Err = PlaylistIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        resolve(s)
    }
}

/// Parse a user-supplied playlist identifier.
///
/// Fails at the first non-digit character, reporting the character and its
/// zero-based position.
pub fn resolve(text: &str) -> Result<PlaylistId, PlaylistIdError> {
    if text.is_empty() {
        return Err(PlaylistIdError::Empty);
    }

    let mut value: u32 = 0;
    for (position, ch) in text.chars().enumerate() {
        let digit = ch.to_digit(10).ok_or_else(|| PlaylistIdError::UnexpectedChar {
            input: text.to_string(),
            ch,
            position,
        })?;

        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(digit))
            .ok_or_else(|| PlaylistIdError::Overflow {
                input: text.to_string(),
            })?;
    }

    Ok(PlaylistId(value))
}

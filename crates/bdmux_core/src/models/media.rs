//! Elementary stream descriptors.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use super::enums::StreamKind;

/// Error for a malformed stream language code.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid language code '{0}': expected up to 3 printable ASCII characters")]
pub struct LanguageCodeError(pub String);

/// ISO 639-2 style language code: one to three printable ASCII characters.
///
/// An absent language is modelled as `Option::None`, never as an empty code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct LanguageCode(String);

impl LanguageCode {
    /// Validate a language code.
    ///
    /// Returns `Ok(None)` for the empty string. Anything after a NUL byte is
    /// ignored, matching fixed-width C string fields.
    pub fn parse(code: &str) -> Result<Option<Self>, LanguageCodeError> {
        let code = code.split('\0').next().unwrap_or_default();
        if code.is_empty() {
            return Ok(None);
        }
        if code.len() > 3 || !code.bytes().all(|b| b.is_ascii_graphic()) {
            return Err(LanguageCodeError(code.to_string()));
        }
        Ok(Some(Self(code.to_string())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Deserialize an optional language code, treating `""` as absent.
pub(crate) fn deserialize_language<'de, D>(deserializer: D) -> Result<Option<LanguageCode>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        Some(code) => LanguageCode::parse(&code).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// One elementary stream of a clip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreamDescriptor {
    pub kind: StreamKind,
    /// Transport stream packet identifier.
    pub pid: u16,
    pub lang: Option<LanguageCode>,
    /// Position among the clip's streams of the same kind.
    pub ordinal: usize,
}

impl StreamDescriptor {
    pub fn new(kind: StreamKind, pid: u16, lang: Option<LanguageCode>, ordinal: usize) -> Self {
        Self {
            kind,
            pid,
            lang,
            ordinal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_code_is_absent() {
        assert_eq!(LanguageCode::parse("").unwrap(), None);
        assert_eq!(LanguageCode::parse("\0\0\0").unwrap(), None);
    }

    #[test]
    fn accepts_short_printable_codes() {
        assert_eq!(LanguageCode::parse("eng").unwrap().unwrap().as_str(), "eng");
        assert_eq!(LanguageCode::parse("de\0").unwrap().unwrap().as_str(), "de");
    }

    #[test]
    fn rejects_long_or_unprintable_codes() {
        assert!(LanguageCode::parse("engl").is_err());
        assert!(LanguageCode::parse("e g").is_err());
        assert!(LanguageCode::parse("é").is_err());
    }

    #[test]
    fn deserializes_empty_as_none() {
        #[derive(Deserialize)]
        struct Holder {
            #[serde(default, deserialize_with = "deserialize_language")]
            lang: Option<LanguageCode>,
        }

        let h: Holder = serde_json::from_str(r#"{"lang": ""}"#).unwrap();
        assert_eq!(h.lang, None);
        let h: Holder = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(h.lang, None);
        let h: Holder = serde_json::from_str(r#"{"lang": "jpn"}"#).unwrap();
        assert_eq!(h.lang.unwrap().as_str(), "jpn");
        assert!(serde_json::from_str::<Holder>(r#"{"lang": "toolong"}"#).is_err());
    }
}

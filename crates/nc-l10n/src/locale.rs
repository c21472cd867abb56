//! Locale code identity and validation.
//!
//! Translation files are named after their locale code using underscore
//! region separators (`pt_BR.json`, `zh_CN.js`). Validation goes through
//! `unic-langid` after normalizing the separator, but the original
//! spelling is preserved so a `Locale` always renders back to the exact
//! code it was built from.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use unic_langid::{LanguageIdentifier, LanguageIdentifierError};

#[derive(Debug, Error)]
pub enum LocaleError {
    /// The locale code was empty.
    #[error("empty locale code")]
    Empty,
    /// The locale code is not a parseable language identifier.
    #[error("invalid locale code '{code}'")]
    Invalid {
        /// The rejected code.
        code: String,
        /// The parsing error produced by `unic-langid`.
        #[source]
        source: LanguageIdentifierError,
    },
}

/// A locale code as spelled on disk (e.g. `an`, `ast`, `pt_BR`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locale {
    code: String,
}

impl Locale {
    /// Validating constructor. Rejects codes `unic-langid` cannot parse.
    pub fn parse(code: &str) -> Result<Self, LocaleError> {
        if code.is_empty() {
            return Err(LocaleError::Empty);
        }
        let normalized = code.replace('_', "-");
        normalized
            .parse::<LanguageIdentifier>()
            .map_err(|source| LocaleError::Invalid {
                code: code.to_string(),
                source,
            })?;
        Ok(Self {
            code: code.to_string(),
        })
    }

    /// Non-validating constructor used when loading files whose stem may
    /// not be a well-formed locale (e.g. `sr@latin`). The lint layer
    /// reports such codes; processing continues regardless.
    pub fn lenient(code: &str) -> Self {
        Self {
            code: code.to_string(),
        }
    }

    /// Whether the code parses as a language identifier.
    pub fn is_valid(&self) -> bool {
        !self.code.is_empty()
            && self
                .code
                .replace('_', "-")
                .parse::<LanguageIdentifier>()
                .is_ok()
    }

    /// The primary language subtag (`pt_BR` -> `pt`).
    pub fn language(&self) -> &str {
        self.code
            .split(['_', '-', '@'])
            .next()
            .unwrap_or(&self.code)
    }

    /// The code exactly as spelled on disk.
    pub fn as_str(&self) -> &str {
        &self.code
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_code() {
        let locale = Locale::parse("ast").unwrap();
        assert_eq!(locale.as_str(), "ast");
        assert_eq!(locale.language(), "ast");
    }

    #[test]
    fn parse_preserves_underscore_spelling() {
        let locale = Locale::parse("pt_BR").unwrap();
        assert_eq!(locale.to_string(), "pt_BR");
        assert_eq!(locale.language(), "pt");
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(Locale::parse("not a locale").is_err());
        assert!(matches!(Locale::parse(""), Err(LocaleError::Empty)));
    }

    #[test]
    fn lenient_accepts_modifier_codes() {
        let locale = Locale::lenient("sr@latin");
        assert!(!locale.is_valid());
        assert_eq!(locale.language(), "sr");
        assert_eq!(locale.as_str(), "sr@latin");
    }

    #[test]
    fn validity_matches_parse() {
        assert!(Locale::lenient("zh_CN").is_valid());
        assert!(!Locale::lenient("").is_valid());
    }
}

//! `l10n.toml` project configuration.
//!
//! A project using the tooling drops an `l10n.toml` next to its
//! translation directory:
//!
//! ```toml
//! app_id = "libresign"
//! l10n_dir = "l10n"
//! source_language = "en"
//! ```
//!
//! `app_id` names the registration record written into `.js` tables,
//! `l10n_dir` is where the per-locale files live, and `source_language`
//! is the language the keys are written in.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use unic_langid::{LanguageIdentifier, LanguageIdentifierError};

/// Conventional configuration file name.
pub const CONFIG_FILE_NAME: &str = "l10n.toml";

#[derive(Debug, Error)]
pub enum L10nConfigError {
    /// Configuration file not found.
    #[error("l10n.toml configuration file not found")]
    NotFound,
    /// Failed to read the configuration file.
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file.
    #[error("Failed to parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),
    /// The source language is not a valid language identifier.
    #[error("Invalid source language identifier '{name}'")]
    InvalidSourceLanguage {
        /// The invalid identifier.
        name: String,
        /// The parsing error produced by `unic-langid`.
        #[source]
        source: LanguageIdentifierError,
    },
}

/// The configuration for the `nc-l10n` tooling.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct L10nConfig {
    /// App identifier used in the `.js` registration wrapper.
    pub app_id: String,
    /// Directory holding the per-locale translation files.
    #[serde(default = "default_l10n_dir")]
    pub l10n_dir: PathBuf,
    /// Language the source phrases are written in.
    #[serde(default = "default_source_language")]
    pub source_language: String,
}

fn default_l10n_dir() -> PathBuf {
    PathBuf::from("l10n")
}

fn default_source_language() -> String {
    "en".to_string()
}

impl L10nConfig {
    /// Reads the configuration from a path.
    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self, L10nConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(L10nConfigError::NotFound);
        }

        let content = std::fs::read_to_string(path)?;
        let config: L10nConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads `l10n.toml` from a project directory, falling back to
    /// defaults (app id from the directory name) when the file is
    /// absent.
    pub fn read_from_dir_or_default<P: AsRef<Path>>(dir: P) -> Result<Self, L10nConfigError> {
        let dir = dir.as_ref();
        match Self::read_from_path(dir.join(CONFIG_FILE_NAME)) {
            Ok(config) => Ok(config),
            Err(L10nConfigError::NotFound) => {
                let app_id = dir
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or("app")
                    .to_string();
                Ok(Self {
                    app_id,
                    l10n_dir: default_l10n_dir(),
                    source_language: default_source_language(),
                })
            },
            Err(err) => Err(err),
        }
    }

    /// Absolute path to the l10n directory for a project root.
    pub fn l10n_dir_in(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.l10n_dir)
    }

    fn validate(&self) -> Result<(), L10nConfigError> {
        self.source_language
            .replace('_', "-")
            .parse::<LanguageIdentifier>()
            .map_err(|source| L10nConfigError::InvalidSourceLanguage {
                name: self.source_language.clone(),
                source,
            })?;
        Ok(())
    }
}

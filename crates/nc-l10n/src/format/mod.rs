//! Readers and writers for the two on-disk table encodings.
//!
//! - [`TableFormat::Json`]: `{ "translations": { ... }, "pluralForm": "..." }`
//! - [`TableFormat::Script`]: `OC.L10N.register("<app>", { ... }, "<rule>");`
//!
//! Reading is lenient where the data demands it: duplicate keys are
//! collected (first occurrence wins) and a malformed plural rule header
//! falls back to the default rule, with the error recorded on the
//! [`LoadedTable`] so the lint layer can report it. Writing always
//! emits the canonical byte layout, so `read(write(t)) == t` for any
//! table and `write(read(b)) == b` for canonical input.

mod json;
mod script;

use crate::locale::Locale;
use crate::plural::{PluralRule, PluralRuleError};
use crate::table::{MessageId, TableError, Translation, TranslationTable};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReadError {
    /// The JSON document was malformed.
    #[error("malformed JSON table: {0}")]
    Json(#[from] serde_json::Error),
    /// The registration script deviated from the expected shape.
    #[error("malformed registration script at byte {offset}: expected {expected}")]
    Script {
        /// Byte offset of the failure.
        offset: usize,
        /// What the scanner was looking for.
        expected: &'static str,
    },
}

/// On-disk encoding of a translation table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableFormat {
    /// `<locale>.json`
    Json,
    /// `<locale>.js`
    Script,
}

impl TableFormat {
    /// Determine the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "json" => Some(Self::Json),
            "js" => Some(Self::Script),
            _ => None,
        }
    }

    /// The file extension this format uses.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Script => "js",
        }
    }
}

/// A raw translated value as it appears on disk.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawTranslation {
    Simple(String),
    Plural(Vec<String>),
}

/// Decoded file content before table construction.
#[derive(Debug)]
pub(crate) struct RawTable {
    pub(crate) app_id: Option<String>,
    pub(crate) plural_form: String,
    pub(crate) entries: Vec<(String, RawTranslation)>,
}

/// A table as loaded from disk, with the leniencies that loading real
/// data requires recorded alongside it.
#[derive(Debug)]
pub struct LoadedTable {
    pub table: TranslationTable,
    /// App id from the registration script, when the source had one.
    pub app_id: Option<String>,
    /// The plural rule header exactly as it appeared in the file.
    pub plural_form: String,
    /// Raw keys that appeared more than once (first occurrence kept).
    pub duplicate_keys: Vec<String>,
    /// Set when the plural rule header failed to parse and the default
    /// rule was substituted.
    pub plural_rule_error: Option<PluralRuleError>,
}

/// Parse table content in the given format.
pub fn read_str(
    format: TableFormat,
    locale: Locale,
    content: &str,
) -> Result<LoadedTable, ReadError> {
    let raw = match format {
        TableFormat::Json => json::read(content)?,
        TableFormat::Script => script::read(content)?,
    };
    Ok(build_table(locale, raw))
}

/// Serialize a table into its canonical byte layout.
///
/// `app_id` is only used by the script format's registration wrapper.
pub fn write_string(table: &TranslationTable, format: TableFormat, app_id: &str) -> String {
    match format {
        TableFormat::Json => json::write(table),
        TableFormat::Script => script::write(table, app_id),
    }
}

fn build_table(locale: Locale, raw: RawTable) -> LoadedTable {
    let plural_form = raw.plural_form;
    let (rule, plural_rule_error) = match PluralRule::parse(&plural_form) {
        Ok(rule) => (rule, None),
        Err(err) => (PluralRule::default(), Some(err)),
    };

    let mut table = TranslationTable::new(locale, rule);
    let mut duplicate_keys = Vec::new();

    for (key, value) in raw.entries {
        let id = MessageId::from_raw(&key);
        let translation = match value {
            RawTranslation::Simple(value) => Translation::Simple(value),
            RawTranslation::Plural(forms) => Translation::Plural(forms),
        };
        match table.insert(id, translation) {
            Ok(()) => {},
            Err(TableError::DuplicateKey { key, .. }) => duplicate_keys.push(key),
        }
    }

    LoadedTable {
        table,
        app_id: raw.app_id,
        plural_form,
        duplicate_keys,
        plural_rule_error,
    }
}

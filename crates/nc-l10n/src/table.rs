//! The locale translation table: an insertion-ordered mapping from
//! source phrase to translated phrase, plus the locale's plural rule.
//!
//! Plural entries use the host loader's key encoding: the singular and
//! plural source forms joined as `_<singular>_::_<plural>_`, mapped to
//! an array of translated forms indexed by the plural rule.

use crate::locale::Locale;
use crate::plural::PluralRule;
use indexmap::IndexMap;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableError {
    /// The same key was inserted twice.
    #[error("duplicate key '{key}' in locale '{locale}'")]
    DuplicateKey {
        /// The locale being built.
        locale: String,
        /// The repeated raw key.
        key: String,
    },
}

/// A source-language message identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum MessageId {
    /// A plain source phrase.
    Simple(String),
    /// A plural pair, encoded on disk as `_<singular>_::_<plural>_`.
    Plural {
        singular: String,
        plural: String,
    },
}

impl MessageId {
    /// Interpret a raw on-disk key. Keys of the shape
    /// `_<a>_::_<b>_` are plural pairs; everything else is simple.
    pub fn from_raw(raw: &str) -> Self {
        if let Some(inner) = raw.strip_prefix('_').and_then(|r| r.strip_suffix('_')) {
            if let Some((singular, plural)) = inner.split_once("_::_") {
                return Self::Plural {
                    singular: singular.to_string(),
                    plural: plural.to_string(),
                };
            }
        }
        Self::Simple(raw.to_string())
    }

    /// The on-disk spelling of this id.
    pub fn to_raw(&self) -> String {
        match self {
            Self::Simple(key) => key.clone(),
            Self::Plural { singular, plural } => format!("_{singular}_::_{plural}_"),
        }
    }

    /// The source phrase used for lookup (the singular form for plural
    /// pairs).
    pub fn source(&self) -> &str {
        match self {
            Self::Simple(key) => key,
            Self::Plural { singular, .. } => singular,
        }
    }

    pub fn is_plural(&self) -> bool {
        matches!(self, Self::Plural { .. })
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simple(key) => f.write_str(key),
            Self::Plural { .. } => f.write_str(&self.to_raw()),
        }
    }
}

/// A translated value: one phrase, or one form per plural category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Translation {
    Simple(String),
    Plural(Vec<String>),
}

impl Translation {
    /// The simple phrase, if this is not a plural entry.
    pub fn as_simple(&self) -> Option<&str> {
        match self {
            Self::Simple(value) => Some(value),
            Self::Plural(_) => None,
        }
    }

    /// The plural form array, if present.
    pub fn forms(&self) -> Option<&[String]> {
        match self {
            Self::Simple(_) => None,
            Self::Plural(forms) => Some(forms),
        }
    }
}

/// One locale's translation table.
///
/// Entries keep insertion order so a table re-serializes in the order
/// it was read. Key uniqueness is enforced at insert time; plural-form
/// arity against `nplurals` is deliberately not (shipped data violates
/// it, and the linter has to be able to load such files to report them).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranslationTable {
    locale: Locale,
    rule: PluralRule,
    entries: IndexMap<MessageId, Translation>,
}

impl TranslationTable {
    pub fn new(locale: Locale, rule: PluralRule) -> Self {
        Self {
            locale,
            rule,
            entries: IndexMap::new(),
        }
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn plural_rule(&self) -> &PluralRule {
        &self.rule
    }

    /// Insert an entry, rejecting duplicate ids.
    pub fn insert(&mut self, id: MessageId, translation: Translation) -> Result<(), TableError> {
        if self.entries.contains_key(&id) {
            return Err(TableError::DuplicateKey {
                locale: self.locale.as_str().to_string(),
                key: id.to_raw(),
            });
        }
        self.entries.insert(id, translation);
        Ok(())
    }

    pub fn get(&self, id: &MessageId) -> Option<&Translation> {
        self.entries.get(id)
    }

    /// Translate a simple source phrase.
    pub fn translate(&self, source: &str) -> Option<&str> {
        match self.entries.get(&MessageId::Simple(source.to_string()))? {
            Translation::Simple(value) => Some(value),
            Translation::Plural(_) => None,
        }
    }

    /// Translate a plural source pair for a count, selecting the form
    /// indexed by the locale's plural rule.
    pub fn translate_plural(&self, singular: &str, plural: &str, count: u64) -> Option<&str> {
        let id = MessageId::Plural {
            singular: singular.to_string(),
            plural: plural.to_string(),
        };
        match self.entries.get(&id)? {
            Translation::Plural(forms) => {
                let index = self.rule.index(count);
                forms.get(index).or_else(|| forms.last()).map(String::as_str)
            },
            Translation::Simple(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&MessageId, &Translation)> {
        self.entries.iter()
    }
}

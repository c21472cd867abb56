//! Placeholder token scanning.
//!
//! Source phrases embed two kinds of substitution markers the host
//! application fills at render time: printf-style `%s` / `%n` / `%d`
//! and named tokens like `{displayName}`. A translation should carry
//! the same multiset of tokens as its source phrase; the comparison is
//! advisory because shipped data contains legitimate violations
//! (untranslated passthrough strings among them).

use std::collections::BTreeMap;
use std::fmt;

/// A substitution marker found in a phrase.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PlaceholderToken {
    /// `%s`, `%n`, or `%d`.
    Printf(char),
    /// `{name}`.
    Named(String),
}

impl fmt::Display for PlaceholderToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Printf(c) => write!(f, "%{c}"),
            Self::Named(name) => write!(f, "{{{name}}}"),
        }
    }
}

/// Token counts for one phrase, ordered for deterministic reporting.
pub type PlaceholderCounts = BTreeMap<PlaceholderToken, usize>;

/// Collect every placeholder token in a phrase.
pub fn scan_placeholders(text: &str) -> PlaceholderCounts {
    let mut counts = PlaceholderCounts::new();
    let mut chars = text.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        match c {
            '%' => {
                if let Some((_, next)) = chars.peek().copied() {
                    if matches!(next, 's' | 'n' | 'd') {
                        chars.next();
                        *counts.entry(PlaceholderToken::Printf(next)).or_default() += 1;
                    }
                }
            },
            '{' => {
                let rest = &text[idx + 1..];
                if let Some(end) = rest.find('}') {
                    let name = &rest[..end];
                    if !name.is_empty()
                        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
                    {
                        *counts
                            .entry(PlaceholderToken::Named(name.to_string()))
                            .or_default() += 1;
                        // Skip past the consumed token.
                        while let Some((i, _)) = chars.peek().copied() {
                            if i > idx + end + 1 {
                                break;
                            }
                            chars.next();
                        }
                    }
                }
            },
            _ => {},
        }
    }

    counts
}

/// A token whose count differs between a source phrase and its
/// translation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlaceholderMismatch {
    pub token: PlaceholderToken,
    pub in_source: usize,
    pub in_translation: usize,
}

/// Compare token multisets between a source phrase and a translation.
pub fn parity(source: &str, translation: &str) -> Vec<PlaceholderMismatch> {
    let source_counts = scan_placeholders(source);
    let translation_counts = scan_placeholders(translation);

    let mut tokens: Vec<&PlaceholderToken> =
        source_counts.keys().chain(translation_counts.keys()).collect();
    tokens.sort();
    tokens.dedup();

    tokens
        .into_iter()
        .filter_map(|token| {
            let in_source = source_counts.get(token).copied().unwrap_or(0);
            let in_translation = translation_counts.get(token).copied().unwrap_or(0);
            if in_source == in_translation {
                None
            } else {
                Some(PlaceholderMismatch {
                    token: token.clone(),
                    in_source,
                    in_translation,
                })
            }
        })
        .collect()
}

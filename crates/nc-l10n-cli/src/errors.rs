//! CLI error types using miette for rustc-style diagnostics.
//!
//! Each lint finding maps to its own diagnostic struct so reports carry
//! a stable code, a source snippet with a label on the offending key,
//! and a help line. Reports aggregate findings via `#[related]`.

// Fields in these structs are read by miette's Diagnostic derive macro
#![allow(unused)]

use miette::{Diagnostic, NamedSource, SourceSpan};
use std::path::PathBuf;
use thiserror::Error;

/// Error when the l10n directory doesn't exist.
#[derive(Debug, Diagnostic, Error)]
#[error("l10n directory not found: {path}")]
#[diagnostic(
    code(nc_l10n::config::l10n_dir_not_found),
    help("Create the directory or point l10n_dir in l10n.toml at your translation files")
)]
pub struct L10nDirNotFoundError {
    /// The path that was expected.
    pub path: PathBuf,
}

/// Error when a translation file cannot be parsed at all.
#[derive(Debug, Diagnostic, Error)]
#[error("cannot parse translation file")]
#[diagnostic(code(nc_l10n::check::syntax_error), severity(Error))]
pub struct SyntaxDiag {
    /// The source content of the file.
    #[source_code]
    pub src: NamedSource<String>,

    /// Where parsing stopped, when known.
    #[label("parse error here")]
    pub span: Option<SourceSpan>,

    /// Help text.
    #[help]
    pub help: String,
}

/// A key that appears more than once in one file.
#[derive(Debug, Diagnostic, Error)]
#[error("duplicate key in locale '{locale}'")]
#[diagnostic(
    code(nc_l10n::check::duplicate_key),
    severity(Error),
    help("Remove the repeated entry; the loader keeps the first occurrence")
)]
pub struct DuplicateKeyDiag {
    /// The source content of the file.
    #[source_code]
    pub src: NamedSource<String>,

    /// The repeated occurrence.
    #[label("'{key}' appears again here")]
    pub span: Option<SourceSpan>,

    /// The repeated raw key.
    pub key: String,

    /// The locale of the file.
    pub locale: String,
}

/// A plural rule header that fails to parse or validate.
#[derive(Debug, Diagnostic, Error)]
#[error("invalid plural rule in locale '{locale}'")]
#[diagnostic(
    code(nc_l10n::check::plural_rule),
    severity(Error),
    help("The header must read 'nplurals=N; plural=(expression);' and index [0, N) for every count")
)]
pub struct PluralRuleDiag {
    /// The source content of the file.
    #[source_code]
    pub src: NamedSource<String>,

    /// The header text within the file.
    #[label("{detail}")]
    pub span: Option<SourceSpan>,

    /// What went wrong.
    pub detail: String,

    /// The locale of the file.
    pub locale: String,
}

/// A plural-form array whose length disagrees with `nplurals`.
#[derive(Debug, Diagnostic, Error)]
#[error("plural form count mismatch in locale '{locale}'")]
#[diagnostic(code(nc_l10n::check::plural_arity), severity(Error))]
pub struct PluralArityDiag {
    /// The source content of the file.
    #[source_code]
    pub src: NamedSource<String>,

    /// The entry with the wrong arity.
    #[label("has {forms} form(s), the plural rule declares {nplurals}")]
    pub span: Option<SourceSpan>,

    /// The raw key.
    pub key: String,

    /// Number of forms present.
    pub forms: usize,

    /// Number of forms declared by the plural rule.
    pub nplurals: usize,

    /// The locale of the file.
    pub locale: String,

    /// Help text.
    #[help]
    pub help: String,
}

/// A plural key paired with a simple value, or the reverse.
#[derive(Debug, Diagnostic, Error)]
#[error("mismatched entry shape in locale '{locale}'")]
#[diagnostic(
    code(nc_l10n::check::form_mismatch),
    severity(Error),
    help("Plural keys (_a_::_b_) take an array of forms; simple keys take a string")
)]
pub struct FormMismatchDiag {
    /// The source content of the file.
    #[source_code]
    pub src: NamedSource<String>,

    /// The offending entry.
    #[label("'{key}' has the wrong value shape")]
    pub span: Option<SourceSpan>,

    /// The raw key.
    pub key: String,

    /// The locale of the file.
    pub locale: String,
}

/// A placeholder token count that differs between source and translation.
#[derive(Debug, Diagnostic, Error)]
#[error("translation alters placeholder '{token}'")]
#[diagnostic(code(nc_l10n::check::placeholder_parity), severity(Warning))]
pub struct PlaceholderParityDiag {
    /// The source content of the file.
    #[source_code]
    pub src: NamedSource<String>,

    /// The entry with the mismatch.
    #[label("{token} appears {in_source} time(s) in the source, {in_translation} in the translation")]
    pub span: Option<SourceSpan>,

    /// The token rendering (`%s`, `{displayName}`, ...).
    pub token: String,

    /// Occurrences in the source phrase.
    pub in_source: usize,

    /// Occurrences in the translation.
    pub in_translation: usize,

    /// The raw key.
    pub key: String,

    /// The locale of the file.
    pub locale: String,

    /// Help text.
    #[help]
    pub help: String,
}

/// A file stem that is not a parseable locale code.
#[derive(Debug, Diagnostic, Error)]
#[error("file stem '{code}' is not a valid locale code")]
#[diagnostic(
    code(nc_l10n::check::locale_code),
    severity(Warning),
    help("Name translation files after a language identifier such as 'de' or 'pt_BR'")
)]
pub struct LocaleCodeDiag {
    /// The offending stem.
    pub code: String,

    /// The file path.
    pub path: PathBuf,
}

/// A check issue (either error or warning).
#[derive(Debug, Diagnostic, Error)]
pub enum CheckIssue {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] SyntaxDiag),

    #[error(transparent)]
    #[diagnostic(transparent)]
    DuplicateKey(#[from] DuplicateKeyDiag),

    #[error(transparent)]
    #[diagnostic(transparent)]
    PluralRule(#[from] PluralRuleDiag),

    #[error(transparent)]
    #[diagnostic(transparent)]
    PluralArity(#[from] PluralArityDiag),

    #[error(transparent)]
    #[diagnostic(transparent)]
    FormMismatch(#[from] FormMismatchDiag),

    #[error(transparent)]
    #[diagnostic(transparent)]
    PlaceholderParity(#[from] PlaceholderParityDiag),

    #[error(transparent)]
    #[diagnostic(transparent)]
    LocaleCode(#[from] LocaleCodeDiag),
}

impl CheckIssue {
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Self::Syntax(_)
                | Self::DuplicateKey(_)
                | Self::PluralRule(_)
                | Self::PluralArity(_)
                | Self::FormMismatch(_)
        )
    }

    /// Deterministic ordering: file, then issue kind, then key.
    pub fn sort_key(&self) -> String {
        match self {
            Self::Syntax(d) => format!("{}:0", d.src.name()),
            Self::PluralRule(d) => format!("{}:1", d.src.name()),
            Self::DuplicateKey(d) => format!("{}:2:{}", d.src.name(), d.key),
            Self::PluralArity(d) => format!("{}:3:{}", d.src.name(), d.key),
            Self::FormMismatch(d) => format!("{}:4:{}", d.src.name(), d.key),
            Self::PlaceholderParity(d) => {
                format!("{}:5:{}:{}", d.src.name(), d.key, d.token)
            },
            Self::LocaleCode(d) => format!("{}:6", d.path.display()),
        }
    }
}

/// Aggregated check results.
#[derive(Debug, Diagnostic, Error)]
#[error("check found {error_count} error(s) and {warning_count} warning(s)")]
#[diagnostic(code(nc_l10n::check::report))]
pub struct CheckReport {
    /// Number of error-level findings.
    pub error_count: usize,

    /// Number of warning-level findings.
    pub warning_count: usize,

    /// The individual findings.
    #[related]
    pub issues: Vec<CheckIssue>,
}

/// Error when formatting fails for a file.
#[derive(Debug, Diagnostic, Error)]
#[error("failed to format {path}")]
#[diagnostic(code(nc_l10n::fmt::failed))]
pub struct FmtError {
    /// The path to the file.
    pub path: PathBuf,

    /// The underlying error.
    #[help]
    pub help: String,
}

/// Report for fmt command failures.
#[derive(Debug, Diagnostic, Error)]
#[error("formatted {formatted_count} file(s), {error_count} error(s)")]
#[diagnostic(code(nc_l10n::fmt::report))]
pub struct FmtReport {
    /// Number of files rewritten.
    pub formatted_count: usize,

    /// Number of failures.
    pub error_count: usize,

    /// The individual failures.
    #[related]
    pub errors: Vec<FmtError>,
}

/// Dry-run outcome when files are not in canonical form.
#[derive(Debug, Diagnostic, Error)]
#[error("{count} file(s) are not in canonical form")]
#[diagnostic(
    code(nc_l10n::fmt::dry_run),
    help("Run 'nc-l10n fmt' to rewrite them")
)]
pub struct FmtDryRunReport {
    /// Number of files that would change.
    pub count: usize,
}

#[derive(Debug, Diagnostic, Error)]
pub enum CliError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    L10nDirNotFound(#[from] L10nDirNotFoundError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Check(#[from] CheckReport),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Fmt(#[from] FmtReport),

    #[error(transparent)]
    #[diagnostic(transparent)]
    FmtDryRun(#[from] FmtDryRunReport),

    #[error("Failed to read l10n.toml configuration: {0}")]
    #[diagnostic(code(nc_l10n::config::parse))]
    Config(String),

    #[error("IO error: {0}")]
    #[diagnostic(code(nc_l10n::io))]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    #[diagnostic(code(nc_l10n::other))]
    Other(String),
}

impl From<nc_l10n_toml::L10nConfigError> for CliError {
    fn from(err: nc_l10n_toml::L10nConfigError) -> Self {
        CliError::Config(err.to_string())
    }
}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::Other(err.to_string())
    }
}

/// Find the span of the `n`th occurrence (0-based) of a raw key in the
/// file content. Keys are stored JSON-escaped and quoted on disk, so
/// the search goes through the escaped spelling.
pub fn find_key_span(content: &str, raw_key: &str, occurrence: usize) -> Option<SourceSpan> {
    let quoted = serde_json::to_string(raw_key).ok()?;
    let mut from = 0;
    let mut seen = 0;
    while let Some(idx) = content[from..].find(&quoted) {
        let offset = from + idx;
        if seen == occurrence {
            return Some(SourceSpan::new(offset.into(), quoted.len()));
        }
        seen += 1;
        from = offset + quoted.len();
    }
    None
}

/// Find the span of the plural rule header string in the file content.
pub fn find_plural_form_span(content: &str, plural_form: &str) -> Option<SourceSpan> {
    let quoted = serde_json::to_string(plural_form).ok()?;
    content
        .find(&quoted)
        .map(|offset| SourceSpan::new(offset.into(), quoted.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_key_span_first_and_second_occurrence() {
        let content = r#"{ "Sign": "a", "Sign": "b" }"#;
        let first = find_key_span(content, "Sign", 0).unwrap();
        let second = find_key_span(content, "Sign", 1).unwrap();
        assert_eq!(first.offset(), 2);
        assert_eq!(second.offset(), 15);
        assert!(find_key_span(content, "Sign", 2).is_none());
    }

    #[test]
    fn find_key_span_uses_escaped_spelling() {
        let content = r#"{ "a\nb": "x" }"#;
        let span = find_key_span(content, "a\nb", 0).unwrap();
        assert_eq!(span.offset(), 2);
        assert_eq!(span.len(), 6);
    }

    #[test]
    fn find_plural_form_span_locates_header() {
        let content = r#"{ "pluralForm": "nplurals=2; plural=(n != 1);" }"#;
        let span = find_plural_form_span(content, "nplurals=2; plural=(n != 1);").unwrap();
        assert_eq!(span.offset(), 16);
    }
}

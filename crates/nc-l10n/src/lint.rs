//! Data-integrity checks over a loaded translation table.
//!
//! Pure rule functions: they take a [`LoadedTable`] and produce typed
//! [`Finding`]s. Rendering (diagnostic codes, source snippets, colors)
//! is the CLI's concern.

use crate::format::LoadedTable;
use crate::placeholder::{self, PlaceholderToken};
use crate::plural::VALIDATION_BOUND;
use crate::table::{MessageId, Translation};

/// How serious a finding is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    /// The table violates a hard invariant.
    Error,
    /// Advisory; the data is usable but suspicious.
    Warning,
}

/// A single lint finding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Finding {
    /// A raw key appeared more than once in the file.
    DuplicateKey { key: String },
    /// The plural rule header failed to parse or misbehaves.
    PluralRule { detail: String },
    /// A plural-form array length differs from `nplurals`.
    PluralArity {
        key: String,
        forms: usize,
        nplurals: usize,
    },
    /// A plural key paired with a simple value, or the reverse.
    FormMismatch { key: String },
    /// A placeholder token count differs between source and translation.
    PlaceholderParity {
        key: String,
        token: PlaceholderToken,
        in_source: usize,
        in_translation: usize,
    },
    /// The file stem is not a parseable locale code.
    LocaleCode { code: String },
}

impl Finding {
    pub fn severity(&self) -> Severity {
        match self {
            Self::DuplicateKey { .. }
            | Self::PluralRule { .. }
            | Self::PluralArity { .. }
            | Self::FormMismatch { .. } => Severity::Error,
            Self::PlaceholderParity { .. } | Self::LocaleCode { .. } => Severity::Warning,
        }
    }

    /// The raw key the finding points at, when it has one.
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::DuplicateKey { key }
            | Self::PluralArity { key, .. }
            | Self::FormMismatch { key }
            | Self::PlaceholderParity { key, .. } => Some(key),
            Self::PluralRule { .. } | Self::LocaleCode { .. } => None,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::DuplicateKey { key } => format!("duplicate key '{key}'"),
            Self::PluralRule { detail } => format!("plural rule: {detail}"),
            Self::PluralArity {
                key,
                forms,
                nplurals,
            } => format!("'{key}' has {forms} plural form(s), expected {nplurals}"),
            Self::FormMismatch { key } => {
                format!("'{key}' pairs a plural key with a non-array value (or the reverse)")
            },
            Self::PlaceholderParity {
                key,
                token,
                in_source,
                in_translation,
            } => format!(
                "'{key}': token {token} appears {in_source} time(s) in the source \
                 but {in_translation} time(s) in the translation"
            ),
            Self::LocaleCode { code } => format!("file stem '{code}' is not a valid locale code"),
        }
    }

    pub fn help(&self) -> String {
        match self {
            Self::DuplicateKey { .. } => {
                "Remove the repeated entry; the first occurrence is the one the loader keeps"
                    .to_string()
            },
            Self::PluralRule { .. } => {
                "Fix the 'nplurals=N; plural=(expression);' header".to_string()
            },
            Self::PluralArity { nplurals, .. } => {
                format!("Provide exactly {nplurals} translated forms for this entry")
            },
            Self::FormMismatch { .. } => {
                "Plural keys (_a_::_b_) take an array of forms; simple keys take a string"
                    .to_string()
            },
            Self::PlaceholderParity { token, .. } => {
                format!("Carry the {token} token over into the translation")
            },
            Self::LocaleCode { .. } => {
                "Name translation files after a language identifier such as 'de' or 'pt_BR'"
                    .to_string()
            },
        }
    }
}

/// Run every rule against a loaded table.
pub fn lint_table(loaded: &LoadedTable) -> Vec<Finding> {
    let mut findings = Vec::new();
    let table = &loaded.table;

    if !table.locale().is_valid() {
        findings.push(Finding::LocaleCode {
            code: table.locale().as_str().to_string(),
        });
    }

    for key in &loaded.duplicate_keys {
        findings.push(Finding::DuplicateKey { key: key.clone() });
    }

    let rule_ok = match &loaded.plural_rule_error {
        Some(err) => {
            findings.push(Finding::PluralRule {
                detail: err.to_string(),
            });
            false
        },
        None => match table.plural_rule().validate(VALIDATION_BOUND) {
            Ok(()) => true,
            Err(err) => {
                findings.push(Finding::PluralRule {
                    detail: err.to_string(),
                });
                false
            },
        },
    };

    let nplurals = table.plural_rule().nplurals();

    for (id, translation) in table.iter() {
        match (id, translation) {
            (MessageId::Plural { .. }, Translation::Plural(forms)) => {
                if rule_ok && forms.len() != nplurals {
                    findings.push(Finding::PluralArity {
                        key: id.to_raw(),
                        forms: forms.len(),
                        nplurals,
                    });
                }
                check_plural_parity(id, forms, &mut findings);
            },
            (MessageId::Simple(source), Translation::Simple(value)) => {
                check_parity(&id.to_raw(), source, value, &mut findings);
            },
            _ => {
                findings.push(Finding::FormMismatch { key: id.to_raw() });
            },
        }
    }

    findings
}

fn check_parity(key: &str, source: &str, translation: &str, findings: &mut Vec<Finding>) {
    for mismatch in placeholder::parity(source, translation) {
        findings.push(Finding::PlaceholderParity {
            key: key.to_string(),
            token: mismatch.token,
            in_source: mismatch.in_source,
            in_translation: mismatch.in_translation,
        });
    }
}

fn check_plural_parity(id: &MessageId, forms: &[String], findings: &mut Vec<Finding>) {
    let MessageId::Plural { singular, plural } = id else {
        return;
    };
    for (index, form) in forms.iter().enumerate() {
        // Form 0 translates the singular source; the rest the plural.
        let source = if index == 0 { singular } else { plural };
        check_parity(&id.to_raw(), source, form, findings);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{TableFormat, read_str};
    use crate::locale::Locale;

    fn load(locale: &str, content: &str) -> LoadedTable {
        read_str(TableFormat::Json, Locale::lenient(locale), content).unwrap()
    }

    #[test]
    fn clean_table_yields_no_findings() {
        let loaded = load(
            "de",
            r#"{
    "translations": {
        "Sign": "Signieren",
        "Signed by %s": "Signiert von %s",
        "_%n file_::_%n files_": ["%n Datei", "%n Dateien"]
    },
    "pluralForm": "nplurals=2; plural=(n != 1);"
}"#,
        );
        assert!(lint_table(&loaded).is_empty());
    }

    #[test]
    fn duplicate_key_is_an_error() {
        let loaded = load(
            "de",
            r#"{
    "translations": { "A": "x", "A": "y" },
    "pluralForm": "nplurals=2; plural=(n != 1);"
}"#,
        );
        let findings = lint_table(&loaded);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity(), Severity::Error);
        assert!(matches!(&findings[0], Finding::DuplicateKey { key } if key == "A"));
    }

    #[test]
    fn out_of_range_plural_rule_is_an_error() {
        let loaded = load(
            "xx",
            r#"{
    "translations": {},
    "pluralForm": "nplurals=2; plural=(n);"
}"#,
        );
        let findings = lint_table(&loaded);
        assert!(
            findings
                .iter()
                .any(|f| matches!(f, Finding::PluralRule { .. }))
        );
    }

    #[test]
    fn arity_mismatch_is_an_error() {
        let loaded = load(
            "cs",
            r#"{
    "translations": {
        "_%n hour_::_%n hours_": ["%n hodina", "%n hodiny"]
    },
    "pluralForm": "nplurals=3; plural=(n==1) ? 0 : (n>=2 && n<=4) ? 1 : 2;"
}"#,
        );
        let findings = lint_table(&loaded);
        assert!(findings.iter().any(|f| matches!(
            f,
            Finding::PluralArity {
                forms: 2,
                nplurals: 3,
                ..
            }
        )));
    }

    #[test]
    fn placeholder_mismatch_is_a_warning() {
        let loaded = load(
            "de",
            r#"{
    "translations": { "Signed by %s": "Signiert" },
    "pluralForm": "nplurals=2; plural=(n != 1);"
}"#,
        );
        let findings = lint_table(&loaded);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity(), Severity::Warning);
        assert!(matches!(
            &findings[0],
            Finding::PlaceholderParity { in_source: 1, in_translation: 0, .. }
        ));
    }

    #[test]
    fn invalid_locale_stem_is_a_warning() {
        let loaded = load(
            "sr@latin",
            r#"{
    "translations": {},
    "pluralForm": "nplurals=1; plural=0;"
}"#,
        );
        let findings = lint_table(&loaded);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity(), Severity::Warning);
        assert!(matches!(&findings[0], Finding::LocaleCode { .. }));
    }

    #[test]
    fn plural_key_with_string_value_is_flagged() {
        let loaded = load(
            "de",
            r#"{
    "translations": { "_%n file_::_%n files_": "kaputt" },
    "pluralForm": "nplurals=2; plural=(n != 1);"
}"#,
        );
        let findings = lint_table(&loaded);
        assert!(
            findings
                .iter()
                .any(|f| matches!(f, Finding::FormMismatch { .. }))
        );
    }

    #[test]
    fn arity_not_checked_when_rule_is_broken() {
        // A broken header already produced an error; arity against the
        // substituted default rule would be noise.
        let loaded = load(
            "de",
            r#"{
    "translations": { "_%n a_::_%n b_": ["x", "y", "z"] },
    "pluralForm": "broken"
}"#,
        );
        let findings = lint_table(&loaded);
        assert!(
            findings
                .iter()
                .all(|f| !matches!(f, Finding::PluralArity { .. }))
        );
    }
}

//! The `<locale>.json` encoding:
//! `{ "translations": { ... }, "pluralForm": "..." }`.
//!
//! Deserialization walks map entries itself instead of going through a
//! plain map type, so duplicate keys survive long enough to be
//! reported rather than silently collapsing to last-wins.

use super::{RawTable, RawTranslation, ReadError};
use crate::table::{Translation, TranslationTable};
use indexmap::IndexMap;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Translation entries in document order, duplicates included.
struct Entries(Vec<(String, RawTranslation)>);

impl<'de> Deserialize<'de> for Entries {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = Entries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of source phrases to translations")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Entries, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, RawTranslation>()? {
                    entries.push((key, value));
                }
                Ok(Entries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

#[derive(Deserialize)]
struct RawDocument {
    translations: Entries,
    #[serde(rename = "pluralForm")]
    plural_form: String,
}

pub(super) fn read(content: &str) -> Result<RawTable, ReadError> {
    let doc: RawDocument = serde_json::from_str(content)?;
    Ok(RawTable {
        app_id: None,
        plural_form: doc.plural_form,
        entries: doc.translations.0,
    })
}

#[derive(Serialize)]
#[serde(untagged)]
enum ValueOut<'a> {
    Simple(&'a str),
    Plural(&'a [String]),
}

#[derive(Serialize)]
struct DocumentOut<'a> {
    translations: IndexMap<String, ValueOut<'a>>,
    #[serde(rename = "pluralForm")]
    plural_form: &'a str,
}

/// Canonical layout: 4-space-indented JSON with a trailing newline.
pub(super) fn write(table: &TranslationTable) -> String {
    let mut translations = IndexMap::new();
    for (id, translation) in table.iter() {
        let value = match translation {
            Translation::Simple(value) => ValueOut::Simple(value),
            Translation::Plural(forms) => ValueOut::Plural(forms),
        };
        translations.insert(id.to_raw(), value);
    }

    let doc = DocumentOut {
        translations,
        plural_form: table.plural_rule().as_str(),
    };

    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    doc.serialize(&mut ser)
        .expect("string maps serialize infallibly");
    let mut out = String::from_utf8(buf).expect("serializer emits UTF-8");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::Locale;
    use crate::plural::PluralRule;
    use crate::table::MessageId;

    #[test]
    fn read_simple_and_plural_values() {
        let content = r#"{
    "translations": {
        "Save": "Gardar",
        "_%n signer_::_%n signers_": ["%n asinante", "%n asinantes"]
    },
    "pluralForm": "nplurals=2; plural=(n != 1);"
}"#;
        let raw = read(content).unwrap();
        assert_eq!(raw.entries.len(), 2);
        assert!(raw.app_id.is_none());
        assert!(matches!(raw.entries[0].1, RawTranslation::Simple(_)));
        assert!(matches!(raw.entries[1].1, RawTranslation::Plural(_)));
    }

    #[test]
    fn read_rejects_missing_plural_form() {
        let content = r#"{ "translations": {} }"#;
        assert!(matches!(read(content), Err(ReadError::Json(_))));
    }

    #[test]
    fn write_empty_table() {
        let table = TranslationTable::new(
            Locale::parse("an").unwrap(),
            PluralRule::parse("nplurals=2; plural=(n != 1);").unwrap(),
        );
        let out = write(&table);
        assert_eq!(
            out,
            "{\n    \"translations\": {},\n    \"pluralForm\": \"nplurals=2; plural=(n != 1);\"\n}\n"
        );
    }

    #[test]
    fn write_escapes_strings() {
        let mut table = TranslationTable::new(
            Locale::parse("de").unwrap(),
            PluralRule::parse("nplurals=2; plural=(n != 1);").unwrap(),
        );
        table
            .insert(
                MessageId::from_raw("Line\nbreak \"quoted\""),
                Translation::Simple("Zeilen\numbruch".to_string()),
            )
            .unwrap();
        let out = write(&table);
        assert!(out.contains(r#""Line\nbreak \"quoted\"": "Zeilen\numbruch""#));

        let raw = read(&out).unwrap();
        assert_eq!(raw.entries[0].0, "Line\nbreak \"quoted\"");
    }
}

//! Gettext PO catalog emission.
//!
//! Conversion target only; the tooling never reads PO files back. The
//! catalog carries the table's plural rule in the `Plural-Forms:`
//! header so downstream gettext tooling selects forms the same way the
//! host loader does.

use nc_l10n::{MessageId, Translation, TranslationTable};
use std::fmt::Write as _;

/// Render a table as a PO catalog.
pub fn write_po(table: &TranslationTable, app_id: &str) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "# Translations for {app_id}");
    out.push_str("msgid \"\"\nmsgstr \"\"\n");
    let _ = writeln!(out, "\"Project-Id-Version: {app_id}\\n\"");
    out.push_str("\"MIME-Version: 1.0\\n\"\n");
    out.push_str("\"Content-Type: text/plain; charset=UTF-8\\n\"\n");
    out.push_str("\"Content-Transfer-Encoding: 8bit\\n\"\n");
    let _ = writeln!(out, "\"Language: {}\\n\"", table.locale());
    let _ = writeln!(
        out,
        "\"Plural-Forms: {}\\n\"",
        escape(table.plural_rule().as_str())
    );

    for (id, translation) in table.iter() {
        out.push('\n');
        match (id, translation) {
            (MessageId::Plural { singular, plural }, Translation::Plural(forms)) => {
                let _ = writeln!(out, "msgid \"{}\"", escape(singular));
                let _ = writeln!(out, "msgid_plural \"{}\"", escape(plural));
                for (index, form) in forms.iter().enumerate() {
                    let _ = writeln!(out, "msgstr[{index}] \"{}\"", escape(form));
                }
            },
            (id, Translation::Simple(value)) => {
                let _ = writeln!(out, "msgid \"{}\"", escape(id.source()));
                let _ = writeln!(out, "msgstr \"{}\"", escape(value));
            },
            (id, Translation::Plural(forms)) => {
                // Shape mismatch already flagged by check; emit the
                // first form so the catalog stays loadable.
                let _ = writeln!(out, "msgid \"{}\"", escape(id.source()));
                let _ = writeln!(
                    out,
                    "msgstr \"{}\"",
                    escape(forms.first().map(String::as_str).unwrap_or(""))
                );
            },
        }
    }

    out
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out
}

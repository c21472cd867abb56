//! The `<locale>.js` encoding: the host loader registration call
//!
//! ```text
//! OC.L10N.register(
//!     "<app>",
//!     {
//!         "<key>" : "<value>",
//!         "_<a>_::_<b>_" : ["<form 0>","<form 1>"]
//!     },
//!     "<plural form>");
//! ```
//!
//! These files are generated mechanically, so the reader is a small
//! byte scanner over that fixed shape rather than a JavaScript parser.
//! String literals follow JSON escaping rules (including `\uXXXX`
//! with surrogate pairs).

use super::{RawTable, RawTranslation, ReadError};
use crate::table::{Translation, TranslationTable};

pub(super) fn read(content: &str) -> Result<RawTable, ReadError> {
    let mut scanner = Scanner::new(content);

    scanner.expect_token(b"OC.L10N.register", "'OC.L10N.register'")?;
    scanner.expect_byte(b'(', "'('")?;
    let app_id = scanner.string_literal()?;
    scanner.expect_byte(b',', "','")?;
    scanner.expect_byte(b'{', "'{'")?;

    let mut entries = Vec::new();
    loop {
        scanner.skip_whitespace();
        match scanner.peek() {
            Some(b'}') => {
                scanner.advance();
                break;
            },
            Some(b'"') => {
                let key = scanner.string_literal()?;
                scanner.expect_byte(b':', "':'")?;
                let value = scanner.value()?;
                entries.push((key, value));
                scanner.skip_whitespace();
                if scanner.peek() == Some(b',') {
                    scanner.advance();
                }
            },
            _ => return Err(scanner.error("'\"' or '}'")),
        }
    }

    scanner.expect_byte(b',', "','")?;
    let plural_form = scanner.string_literal()?;
    scanner.expect_byte(b')', "')'")?;
    scanner.skip_whitespace();
    if scanner.peek() == Some(b';') {
        scanner.advance();
    }
    scanner.skip_whitespace();
    if !scanner.at_end() {
        return Err(scanner.error("end of file"));
    }

    Ok(RawTable {
        app_id: Some(app_id),
        plural_form,
        entries,
    })
}

/// Canonical layout with a trailing newline.
pub(super) fn write(table: &TranslationTable, app_id: &str) -> String {
    let mut out = String::new();
    out.push_str("OC.L10N.register(\n    \"");
    escape_into(&mut out, app_id);
    out.push_str("\",\n    {\n");

    let mut first = true;
    for (id, translation) in table.iter() {
        if !first {
            out.push_str(",\n");
        }
        first = false;
        out.push_str("        \"");
        escape_into(&mut out, &id.to_raw());
        out.push_str("\" : ");
        match translation {
            Translation::Simple(value) => {
                out.push('"');
                escape_into(&mut out, value);
                out.push('"');
            },
            Translation::Plural(forms) => {
                out.push('[');
                for (i, form) in forms.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    out.push('"');
                    escape_into(&mut out, form);
                    out.push('"');
                }
                out.push(']');
            },
        }
    }
    if !first {
        out.push('\n');
    }

    out.push_str("    },\n    \"");
    escape_into(&mut out, table.plural_rule().as_str());
    out.push_str("\");\n");
    out
}

fn escape_into(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            },
            c => out.push(c),
        }
    }
}

struct Scanner<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(content: &'a str) -> Self {
        Self {
            bytes: content.as_bytes(),
            pos: 0,
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn error(&self, expected: &'static str) -> ReadError {
        ReadError::Script {
            offset: self.pos,
            expected,
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\n' | b'\r')) {
            self.advance();
        }
    }

    fn expect_token(&mut self, token: &[u8], expected: &'static str) -> Result<(), ReadError> {
        self.skip_whitespace();
        if self.bytes[self.pos..].starts_with(token) {
            self.pos += token.len();
            Ok(())
        } else {
            Err(self.error(expected))
        }
    }

    fn expect_byte(&mut self, byte: u8, expected: &'static str) -> Result<(), ReadError> {
        self.skip_whitespace();
        if self.peek() == Some(byte) {
            self.advance();
            Ok(())
        } else {
            Err(self.error(expected))
        }
    }

    /// A JSON-escaped string literal, quotes included.
    fn string_literal(&mut self) -> Result<String, ReadError> {
        self.expect_byte(b'"', "'\"'")?;
        let mut out = String::new();
        loop {
            match self.peek() {
                None => return Err(self.error("closing '\"'")),
                Some(b'"') => {
                    self.advance();
                    return Ok(out);
                },
                Some(b'\\') => {
                    self.advance();
                    let escaped = self.peek().ok_or_else(|| self.error("escape character"))?;
                    self.advance();
                    match escaped {
                        b'"' => out.push('"'),
                        b'\\' => out.push('\\'),
                        b'/' => out.push('/'),
                        b'n' => out.push('\n'),
                        b'r' => out.push('\r'),
                        b't' => out.push('\t'),
                        b'b' => out.push('\u{0008}'),
                        b'f' => out.push('\u{000c}'),
                        b'u' => out.push(self.unicode_escape()?),
                        _ => return Err(self.error("valid escape sequence")),
                    }
                },
                Some(_) => {
                    // Consume one UTF-8 scalar, not one byte.
                    let rest = std::str::from_utf8(&self.bytes[self.pos..])
                        .map_err(|_| self.error("valid UTF-8"))?;
                    let c = rest.chars().next().ok_or_else(|| self.error("character"))?;
                    out.push(c);
                    self.pos += c.len_utf8();
                },
            }
        }
    }

    /// Four hex digits after `\u`, pairing surrogates when needed.
    fn unicode_escape(&mut self) -> Result<char, ReadError> {
        let high = self.hex4()?;
        if (0xD800..=0xDBFF).contains(&high) {
            if !self.bytes[self.pos..].starts_with(b"\\u") {
                return Err(self.error("low surrogate escape"));
            }
            self.pos += 2;
            let low = self.hex4()?;
            if !(0xDC00..=0xDFFF).contains(&low) {
                return Err(self.error("low surrogate value"));
            }
            let code = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
            return char::from_u32(code).ok_or_else(|| self.error("valid code point"));
        }
        char::from_u32(high).ok_or_else(|| self.error("valid code point"))
    }

    fn hex4(&mut self) -> Result<u32, ReadError> {
        let mut value = 0u32;
        for _ in 0..4 {
            let digit = match self.peek() {
                Some(c @ b'0'..=b'9') => u32::from(c - b'0'),
                Some(c @ b'a'..=b'f') => u32::from(c - b'a') + 10,
                Some(c @ b'A'..=b'F') => u32::from(c - b'A') + 10,
                _ => return Err(self.error("hex digit")),
            };
            self.advance();
            value = value * 16 + digit;
        }
        Ok(value)
    }

    /// A translated value: a string literal or an array of them.
    fn value(&mut self) -> Result<RawTranslation, ReadError> {
        self.skip_whitespace();
        match self.peek() {
            Some(b'"') => Ok(RawTranslation::Simple(self.string_literal()?)),
            Some(b'[') => {
                self.advance();
                let mut forms = Vec::new();
                loop {
                    self.skip_whitespace();
                    match self.peek() {
                        Some(b']') => {
                            self.advance();
                            return Ok(RawTranslation::Plural(forms));
                        },
                        Some(b'"') => {
                            forms.push(self.string_literal()?);
                            self.skip_whitespace();
                            if self.peek() == Some(b',') {
                                self.advance();
                            }
                        },
                        _ => return Err(self.error("'\"' or ']'")),
                    }
                }
            },
            _ => Err(self.error("'\"' or '['")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::Locale;
    use crate::plural::PluralRule;
    use crate::table::MessageId;

    const SAMPLE: &str = "OC.L10N.register(\n    \"libresign\",\n    {\n        \"Sign\" : \"Signieren\",\n        \"_%n file_::_%n files_\" : [\"%n Datei\",\"%n Dateien\"]\n    },\n    \"nplurals=2; plural=(n != 1);\");\n";

    #[test]
    fn read_canonical_sample() {
        let raw = read(SAMPLE).unwrap();
        assert_eq!(raw.app_id.as_deref(), Some("libresign"));
        assert_eq!(raw.plural_form, "nplurals=2; plural=(n != 1);");
        assert_eq!(raw.entries.len(), 2);
        assert_eq!(raw.entries[0].0, "Sign");
        match &raw.entries[1].1 {
            RawTranslation::Plural(forms) => assert_eq!(forms.len(), 2),
            other => panic!("expected plural, got {other:?}"),
        }
    }

    #[test]
    fn read_tolerates_loose_whitespace() {
        let content = "OC.L10N.register( \"app\" , { \"a\" : \"b\" , \"c\":[\"d\", \"e\" ,] } , \"nplurals=1; plural=0;\" ) ;";
        let raw = read(content).unwrap();
        assert_eq!(raw.entries.len(), 2);
    }

    #[test]
    fn read_empty_table() {
        let content = "OC.L10N.register(\n    \"app\",\n    {\n    },\n    \"nplurals=1; plural=0;\");\n";
        let raw = read(content).unwrap();
        assert!(raw.entries.is_empty());
    }

    #[test]
    fn read_decodes_escapes() {
        let content = r#"OC.L10N.register("app", { "a\nb" : "céè", "s" : "😀" }, "nplurals=1; plural=0;");"#;
        let raw = read(content).unwrap();
        assert_eq!(raw.entries[0].0, "a\nb");
        match &raw.entries[0].1 {
            RawTranslation::Simple(v) => assert_eq!(v, "céè"),
            other => panic!("unexpected {other:?}"),
        }
        match &raw.entries[1].1 {
            RawTranslation::Simple(v) => assert_eq!(v, "😀"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn read_reports_offset_on_bad_wrapper() {
        let err = read("OC.L10N.publish(\"app\", {}, \"x\");").unwrap_err();
        match err {
            ReadError::Script { offset, expected } => {
                assert_eq!(offset, 0);
                assert!(expected.contains("OC.L10N.register"));
            },
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn write_matches_canonical_sample() {
        let mut table = TranslationTable::new(
            Locale::parse("de").unwrap(),
            PluralRule::parse("nplurals=2; plural=(n != 1);").unwrap(),
        );
        table
            .insert(
                MessageId::from_raw("Sign"),
                Translation::Simple("Signieren".to_string()),
            )
            .unwrap();
        table
            .insert(
                MessageId::from_raw("_%n file_::_%n files_"),
                Translation::Plural(vec!["%n Datei".to_string(), "%n Dateien".to_string()]),
            )
            .unwrap();
        assert_eq!(write(&table, "libresign"), SAMPLE);
    }

    #[test]
    fn write_read_round_trip_with_special_characters() {
        let mut table = TranslationTable::new(
            Locale::parse("fr").unwrap(),
            PluralRule::parse("nplurals=2; plural=(n > 1);").unwrap(),
        );
        table
            .insert(
                MessageId::from_raw("Quote \" and \\ back"),
                Translation::Simple("Ligne\nsuivante\tlà".to_string()),
            )
            .unwrap();
        let written = write(&table, "libresign");
        let raw = read(&written).unwrap();
        assert_eq!(raw.entries[0].0, "Quote \" and \\ back");
        match &raw.entries[0].1 {
            RawTranslation::Simple(v) => assert_eq!(v, "Ligne\nsuivante\tlà"),
            other => panic!("unexpected {other:?}"),
        }
    }
}

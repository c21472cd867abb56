//! Core library for working with Nextcloud-style locale translation
//! tables: the per-locale `<locale>.json` / `<locale>.js` files an app
//! ships under its `l10n/` directory.
//!
//! A table is a locale code, an insertion-ordered mapping from source
//! phrase to translated phrase (plural entries carry an array of forms),
//! and a gettext-style plural rule string such as
//! `nplurals=2; plural=(n != 1);`.
//!
//! This crate models those tables ([`TranslationTable`]), reads and
//! writes both on-disk encodings ([`format`]), evaluates plural rule
//! expressions ([`plural`]), and runs data-integrity checks over loaded
//! tables ([`lint`]).

pub mod format;
pub mod lint;
pub mod locale;
pub mod placeholder;
pub mod plural;
pub mod table;

pub use format::{LoadedTable, ReadError, TableFormat};
pub use lint::{Finding, Severity, lint_table};
pub use locale::{Locale, LocaleError};
pub use placeholder::{PlaceholderToken, scan_placeholders};
pub use plural::{PluralRule, PluralRuleError};
pub use table::{MessageId, TableError, Translation, TranslationTable};

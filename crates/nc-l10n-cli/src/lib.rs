//! CLI internals for the `nc-l10n` binary.

pub mod commands;
pub mod discovery;
pub mod errors;
pub mod po;
pub mod ui;

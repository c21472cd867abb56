//! Locale file discovery.
//!
//! Translation files live flat in the l10n directory, one (or two, in
//! both encodings) per locale: `de.json`, `de.js`, `pt_BR.json`, ...

use anyhow::{Context as _, Result};
use nc_l10n::TableFormat;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A discovered translation file.
#[derive(Clone, Debug)]
pub struct LocaleFile {
    /// Absolute path to the file.
    pub path: PathBuf,
    /// File stem, i.e. the locale code as spelled on disk.
    pub stem: String,
    /// On-disk encoding.
    pub format: TableFormat,
}

impl LocaleFile {
    /// Display name relative to the l10n dir (`de.json`).
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.stem, self.format.extension())
    }
}

/// Enumerate translation files in a directory, sorted by stem then
/// extension for deterministic processing order.
pub fn discover_locale_files(l10n_dir: &Path) -> Result<Vec<LocaleFile>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(l10n_dir).max_depth(1).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to read {}", l10n_dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let Some(format) = TableFormat::from_path(path) else {
            continue;
        };
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        files.push(LocaleFile {
            path: path.to_path_buf(),
            stem: stem.to_string(),
            format,
        });
    }

    files.sort_by(|a, b| {
        a.stem
            .cmp(&b.stem)
            .then_with(|| a.format.extension().cmp(b.format.extension()))
    });
    Ok(files)
}

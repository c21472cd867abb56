//! Shared project discovery for the commands.

use crate::discovery::{LocaleFile, discover_locale_files};
use crate::errors::{CliError, L10nDirNotFoundError};
use nc_l10n::{LoadedTable, Locale, ReadError, format};
use nc_l10n_toml::L10nConfig;
use std::path::PathBuf;

/// Common command-line selection of what to operate on.
#[derive(clap::Args, Debug)]
pub struct ProjectArgs {
    /// Path to the project root (defaults to current directory).
    #[arg(short, long)]
    pub path: Option<PathBuf>,

    /// Only process this locale.
    #[arg(short, long)]
    pub locale: Option<String>,
}

/// A resolved project: configuration plus discovered locale files.
pub struct Project {
    pub root: PathBuf,
    pub config: L10nConfig,
    pub l10n_dir: PathBuf,
    pub files: Vec<LocaleFile>,
}

impl Project {
    pub fn discover(args: &ProjectArgs) -> Result<Self, CliError> {
        let root = args.path.clone().unwrap_or_else(|| PathBuf::from("."));
        let config = L10nConfig::read_from_dir_or_default(&root)?;
        let l10n_dir = config.l10n_dir_in(&root);

        if !l10n_dir.is_dir() {
            return Err(L10nDirNotFoundError { path: l10n_dir }.into());
        }

        let mut files = discover_locale_files(&l10n_dir)?;
        if let Some(locale) = &args.locale {
            files.retain(|f| &f.stem == locale);
        }

        Ok(Self {
            root,
            config,
            l10n_dir,
            files,
        })
    }

    /// Read a discovered file's content.
    pub fn read_content(&self, file: &LocaleFile) -> Result<String, CliError> {
        Ok(fs_err::read_to_string(&file.path)?)
    }

    /// Parse file content into a loaded table.
    pub fn parse(&self, file: &LocaleFile, content: &str) -> Result<LoadedTable, ReadError> {
        format::read_str(file.format, Locale::lenient(&file.stem), content)
    }

    /// The app id to use when writing script tables: the one from the
    /// source file when present, the configured one otherwise.
    pub fn app_id<'a>(&'a self, loaded: &'a LoadedTable) -> &'a str {
        loaded.app_id.as_deref().unwrap_or(&self.config.app_id)
    }
}

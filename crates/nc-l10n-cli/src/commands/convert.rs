//! Convert command: re-encode tables between the two native formats or
//! export gettext PO catalogs.

use crate::commands::common::{Project, ProjectArgs};
use crate::errors::CliError;
use crate::po;
use crate::ui;
use anyhow::Context as _;
use clap::ValueEnum;
use nc_l10n::format::write_string;
use nc_l10n::TableFormat;
use std::path::PathBuf;

/// Conversion target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Target {
    /// Gettext PO catalog.
    Po,
    /// The `<locale>.json` registration record.
    Json,
    /// The `OC.L10N.register` script.
    Js,
}

impl Target {
    fn extension(self) -> &'static str {
        match self {
            Self::Po => "po",
            Self::Json => "json",
            Self::Js => "js",
        }
    }

    fn native_format(self) -> Option<TableFormat> {
        match self {
            Self::Po => None,
            Self::Json => Some(TableFormat::Json),
            Self::Js => Some(TableFormat::Script),
        }
    }
}

/// Arguments for the convert command.
#[derive(clap::Parser, Debug)]
pub struct ConvertArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Target format.
    #[arg(long, value_enum)]
    pub to: Target,

    /// Output directory (defaults to the l10n directory, or `po/` for
    /// PO catalogs).
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,
}

/// Run the convert command.
pub fn run_convert(args: ConvertArgs) -> Result<(), CliError> {
    ui::print_header("Translation table converter");

    let project = Project::discover(&args.project)?;

    if project.files.is_empty() {
        ui::print_no_files(&project.l10n_dir);
        return Ok(());
    }

    let out_dir = args.out_dir.clone().unwrap_or_else(|| match args.to {
        Target::Po => project.root.join("po"),
        Target::Json | Target::Js => project.l10n_dir.clone(),
    });
    fs_err::create_dir_all(&out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))
        .map_err(CliError::from)?;

    let mut converted = 0;

    for file in &project.files {
        // Re-encoding a file into its own format is fmt's job.
        if args.to.native_format() == Some(file.format) {
            continue;
        }

        let content = project.read_content(file)?;
        let loaded = project
            .parse(file, &content)
            .map_err(|e| CliError::Other(format!("{}: {e}", file.file_name())))?;

        let app_id = project.app_id(&loaded).to_string();
        let output = match args.to {
            Target::Po => po::write_po(&loaded.table, &app_id),
            Target::Json => write_string(&loaded.table, TableFormat::Json, &app_id),
            Target::Js => write_string(&loaded.table, TableFormat::Script, &app_id),
        };

        let out_path = out_dir.join(format!("{}.{}", file.stem, args.to.extension()));
        fs_err::write(&out_path, output)?;
        ui::print_converted(&file.path, &out_path);
        converted += 1;
    }

    ui::print_ok(&format!("{converted} file(s) converted"));
    Ok(())
}

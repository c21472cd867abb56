//! Fmt command: rewrite translation files into their canonical byte
//! layout, or show what would change.

use crate::commands::common::{Project, ProjectArgs};
use crate::errors::{CliError, FmtDryRunReport, FmtError, FmtReport};
use crate::ui;
use colored::Colorize as _;
use nc_l10n::format::write_string;
use similar::TextDiff;
use std::path::PathBuf;

/// Arguments for the fmt command.
#[derive(clap::Parser, Debug)]
pub struct FmtArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Show what would change without rewriting anything.
    #[arg(long)]
    pub dry_run: bool,
}

/// Result of formatting a single file.
#[derive(Debug)]
struct FmtResult {
    path: PathBuf,
    changed: bool,
    error: Option<String>,
}

/// Run the fmt command.
pub fn run_fmt(args: FmtArgs) -> Result<(), CliError> {
    ui::print_header("Translation table formatter");

    let project = Project::discover(&args.project)?;

    if project.files.is_empty() {
        ui::print_no_files(&project.l10n_dir);
        return Ok(());
    }

    let mut formatted = 0;
    let mut unchanged = 0;
    let mut errors: Vec<FmtError> = Vec::new();

    for file in &project.files {
        let result = fmt_file(&project, file, args.dry_run);
        if let Some(error) = result.error {
            errors.push(FmtError {
                path: result.path,
                help: error,
            });
        } else if result.changed {
            formatted += 1;
            if args.dry_run {
                ui::print_would_format(&result.path);
            } else {
                ui::print_formatted(&result.path);
            }
        } else {
            unchanged += 1;
        }
    }

    if !errors.is_empty() {
        return Err(CliError::Fmt(FmtReport {
            formatted_count: formatted,
            error_count: errors.len(),
            errors,
        }));
    }

    if args.dry_run && formatted > 0 {
        return Err(CliError::FmtDryRun(FmtDryRunReport { count: formatted }));
    }

    ui::print_fmt_summary(formatted, unchanged);
    Ok(())
}

/// Format a single file, printing a diff in dry-run mode.
fn fmt_file(project: &Project, file: &crate::discovery::LocaleFile, dry_run: bool) -> FmtResult {
    let content = match fs_err::read_to_string(&file.path) {
        Ok(c) => c,
        Err(e) => {
            return FmtResult {
                path: file.path.clone(),
                changed: false,
                error: Some(format!("Failed to read file: {e}")),
            };
        },
    };

    let loaded = match project.parse(file, &content) {
        Ok(loaded) => loaded,
        Err(e) => {
            return FmtResult {
                path: file.path.clone(),
                changed: false,
                error: Some(e.to_string()),
            };
        },
    };

    // A broken plural header would be silently replaced by the default
    // rule on rewrite; refuse and let check report it instead.
    if let Some(err) = &loaded.plural_rule_error {
        return FmtResult {
            path: file.path.clone(),
            changed: false,
            error: Some(format!("unformattable plural rule header: {err}")),
        };
    }

    let canonical = write_string(&loaded.table, file.format, project.app_id(&loaded));
    let changed = content != canonical;

    if changed && dry_run {
        print_diff(&content, &canonical);
    }

    if changed && !dry_run {
        if let Err(e) = fs_err::write(&file.path, &canonical) {
            return FmtResult {
                path: file.path.clone(),
                changed: false,
                error: Some(format!("Failed to write file: {e}")),
            };
        }
    }

    FmtResult {
        path: file.path.clone(),
        changed,
        error: None,
    }
}

fn print_diff(old: &str, new: &str) {
    let diff = TextDiff::from_lines(old, new);
    for change in diff.iter_all_changes() {
        match change.tag() {
            similar::ChangeTag::Delete => print!("{}", format!("-{change}").red()),
            similar::ChangeTag::Insert => print!("{}", format!("+{change}").green()),
            similar::ChangeTag::Equal => {},
        }
    }
}

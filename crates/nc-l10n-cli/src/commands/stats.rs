//! Stats command: per-locale coverage summary.

use crate::commands::common::{Project, ProjectArgs};
use crate::errors::CliError;
use crate::ui;
use colored::Colorize as _;
use nc_l10n::{Severity, Translation, lint_table};

/// Arguments for the stats command.
#[derive(clap::Parser, Debug)]
pub struct StatsArgs {
    #[command(flatten)]
    pub project: ProjectArgs,
}

#[derive(Debug, Default)]
struct Row {
    entries: usize,
    plurals: usize,
    nplurals: usize,
    warnings: usize,
    errors: usize,
}

/// Run the stats command.
pub fn run_stats(args: StatsArgs) -> Result<(), CliError> {
    ui::print_header("Translation table statistics");

    let project = Project::discover(&args.project)?;

    if project.files.is_empty() {
        ui::print_no_files(&project.l10n_dir);
        return Ok(());
    }

    println!(
        "{:<12} {:<6} {:>8} {:>8} {:>9} {:>7} {:>7}",
        "locale".bold(),
        "format".bold(),
        "entries".bold(),
        "plurals".bold(),
        "nplurals".bold(),
        "errors".bold(),
        "warns".bold()
    );

    let mut total = Row::default();

    for file in &project.files {
        let content = project.read_content(file)?;
        let Ok(loaded) = project.parse(file, &content) else {
            println!(
                "{:<12} {:<6} {}",
                file.stem,
                file.format.extension(),
                "unparseable".red()
            );
            total.errors += 1;
            continue;
        };

        let mut row = Row {
            entries: loaded.table.len(),
            plurals: loaded
                .table
                .iter()
                .filter(|(_, t)| matches!(t, Translation::Plural(_)))
                .count(),
            nplurals: loaded.table.plural_rule().nplurals(),
            ..Row::default()
        };
        for finding in lint_table(&loaded) {
            match finding.severity() {
                Severity::Error => row.errors += 1,
                Severity::Warning => row.warnings += 1,
            }
        }

        println!(
            "{:<12} {:<6} {:>8} {:>8} {:>9} {:>7} {:>7}",
            file.stem,
            file.format.extension(),
            row.entries,
            row.plurals,
            row.nplurals,
            if row.errors > 0 {
                row.errors.to_string().red().to_string()
            } else {
                row.errors.to_string()
            },
            if row.warnings > 0 {
                row.warnings.to_string().yellow().to_string()
            } else {
                row.warnings.to_string()
            }
        );

        total.entries += row.entries;
        total.plurals += row.plurals;
        total.errors += row.errors;
        total.warnings += row.warnings;
    }

    println!(
        "{:<12} {:<6} {:>8} {:>8} {:>9} {:>7} {:>7}",
        "total".bold(),
        "",
        total.entries,
        total.plurals,
        "",
        total.errors,
        total.warnings
    );

    Ok(())
}

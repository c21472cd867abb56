//! Console output helpers shared by the commands.

use colored::Colorize as _;
use std::path::Path;

pub const PREFIX: &str = "[nc-l10n]";

pub fn print_header(title: &str) {
    println!("{} {}", PREFIX.cyan().bold(), title.dimmed());
}

pub fn print_checking(file_name: &str) {
    println!(
        "{} {} {}",
        PREFIX.cyan().bold(),
        "Checking".dimmed(),
        file_name.green()
    );
}

pub fn print_no_files(dir: &Path) {
    println!(
        "{} {}",
        PREFIX.red().bold(),
        format!("No translation files found in {}", dir.display()).red()
    );
}

pub fn print_ok(message: &str) {
    println!("{} {}", PREFIX.green().bold(), message.green());
}

pub fn print_formatted(path: &Path) {
    println!(
        "{} {} {}",
        PREFIX.cyan().bold(),
        "Formatted".dimmed(),
        path.display().to_string().green()
    );
}

pub fn print_would_format(path: &Path) {
    println!(
        "{} {} {}",
        PREFIX.yellow().bold(),
        "Would format".dimmed(),
        path.display().to_string().yellow()
    );
}

pub fn print_fmt_summary(formatted: usize, unchanged: usize) {
    println!(
        "{} {}",
        PREFIX.green().bold(),
        format!("{formatted} file(s) formatted, {unchanged} already canonical").green()
    );
}

pub fn print_converted(from: &Path, to: &Path) {
    println!(
        "{} {} {} {} {}",
        PREFIX.cyan().bold(),
        "Converted".dimmed(),
        from.display().to_string().white(),
        "->".dimmed(),
        to.display().to_string().green()
    );
}

use clap::{Parser, Subcommand};
use miette::Result as MietteResult;
use nc_l10n_cli::commands::{
    CheckArgs, ConvertArgs, FmtArgs, StatsArgs, run_check, run_convert, run_fmt, run_stats,
};

#[derive(Parser)]
#[command(name = "nc-l10n")]
#[command(about = "Lint, format, and convert locale translation tables")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check translation files for integrity issues
    Check(CheckArgs),

    /// Rewrite translation files into their canonical layout
    Fmt(FmtArgs),

    /// Show per-locale coverage statistics
    Stats(StatsArgs),

    /// Convert translation files to another format
    Convert(ConvertArgs),
}

fn main() -> MietteResult<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .color(true)
                .build(),
        )
    }))
    .ok();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check(args) => run_check(args),
        Commands::Fmt(args) => run_fmt(args),
        Commands::Stats(args) => run_stats(args),
        Commands::Convert(args) => run_convert(args),
    };

    result.map_err(miette::Report::new)
}

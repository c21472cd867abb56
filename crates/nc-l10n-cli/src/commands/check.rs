//! Check command: run the data-integrity rules over every translation
//! file and render findings as miette diagnostics.

use crate::commands::common::{Project, ProjectArgs};
use crate::discovery::LocaleFile;
use crate::errors::{
    CheckIssue, CheckReport, CliError, DuplicateKeyDiag, FormMismatchDiag, LocaleCodeDiag,
    PlaceholderParityDiag, PluralArityDiag, PluralRuleDiag, SyntaxDiag, find_key_span,
    find_plural_form_span,
};
use crate::ui;
use miette::NamedSource;
use nc_l10n::{Finding, ReadError, lint_table};

/// Arguments for the check command.
#[derive(clap::Parser, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Treat warnings as errors.
    #[arg(long)]
    pub strict: bool,
}

/// Run the check command.
pub fn run_check(args: CheckArgs) -> Result<(), CliError> {
    ui::print_header("Translation table checker");

    let project = Project::discover(&args.project)?;

    if project.files.is_empty() {
        ui::print_no_files(&project.l10n_dir);
        return Ok(());
    }

    let mut issues: Vec<CheckIssue> = Vec::new();

    for file in &project.files {
        ui::print_checking(&file.file_name());
        let content = project.read_content(file)?;
        match project.parse(file, &content) {
            Ok(loaded) => {
                for finding in lint_table(&loaded) {
                    issues.push(issue_from_finding(file, &content, &loaded, finding));
                }
            },
            Err(err) => {
                issues.push(syntax_issue(file, &content, err));
            },
        }
    }

    issues.sort_by_key(CheckIssue::sort_key);

    let error_count = issues.iter().filter(|i| i.is_error()).count();
    let warning_count = issues.len() - error_count;

    if issues.is_empty() {
        ui::print_ok("No issues found!");
        return Ok(());
    }

    let report = CheckReport {
        error_count,
        warning_count,
        issues,
    };

    if error_count > 0 || (args.strict && warning_count > 0) {
        return Err(CliError::Check(report));
    }

    // Warnings only: render them without failing the run.
    eprintln!("{:?}", miette::Report::new(report));
    Ok(())
}

fn named_source(file: &LocaleFile, content: &str) -> NamedSource<String> {
    NamedSource::new(file.file_name(), content.to_string())
}

fn syntax_issue(file: &LocaleFile, content: &str, err: ReadError) -> CheckIssue {
    let span = match &err {
        ReadError::Script { offset, .. } => Some((*offset, 1usize).into()),
        ReadError::Json(_) => None,
    };
    CheckIssue::Syntax(SyntaxDiag {
        src: named_source(file, content),
        span,
        help: err.to_string(),
    })
}

fn issue_from_finding(
    file: &LocaleFile,
    content: &str,
    loaded: &nc_l10n::LoadedTable,
    finding: Finding,
) -> CheckIssue {
    let locale = file.stem.clone();
    match finding {
        Finding::DuplicateKey { key } => CheckIssue::DuplicateKey(DuplicateKeyDiag {
            src: named_source(file, content),
            span: find_key_span(content, &key, 1),
            key,
            locale,
        }),
        Finding::PluralRule { detail } => CheckIssue::PluralRule(PluralRuleDiag {
            src: named_source(file, content),
            span: find_plural_form_span(content, &loaded.plural_form),
            detail,
            locale,
        }),
        Finding::PluralArity {
            key,
            forms,
            nplurals,
        } => CheckIssue::PluralArity(PluralArityDiag {
            src: named_source(file, content),
            span: find_key_span(content, &key, 0),
            help: format!("Provide exactly {nplurals} translated forms for '{key}'"),
            key,
            forms,
            nplurals,
            locale,
        }),
        Finding::FormMismatch { key } => CheckIssue::FormMismatch(FormMismatchDiag {
            src: named_source(file, content),
            span: find_key_span(content, &key, 0),
            key,
            locale,
        }),
        Finding::PlaceholderParity {
            key,
            token,
            in_source,
            in_translation,
        } => CheckIssue::PlaceholderParity(PlaceholderParityDiag {
            src: named_source(file, content),
            span: find_key_span(content, &key, 0),
            token: token.to_string(),
            in_source,
            in_translation,
            help: format!("Carry the {token} token over into the translation of '{key}'"),
            key,
            locale,
        }),
        Finding::LocaleCode { code } => CheckIssue::LocaleCode(LocaleCodeDiag {
            code,
            path: file.path.clone(),
        }),
    }
}

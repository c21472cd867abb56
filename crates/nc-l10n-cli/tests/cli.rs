use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::*;

const CANONICAL_DE_JSON: &str = r#"{
    "translations": {
        "Sign": "Signieren",
        "Signed by %s": "Signiert von %s",
        "_%n file_::_%n files_": [
            "%n Datei",
            "%n Dateien"
        ]
    },
    "pluralForm": "nplurals=2; plural=(n != 1);"
}
"#;

fn project() -> TempDir {
    let temp = TempDir::new().unwrap();
    temp.child("l10n.toml")
        .write_str("app_id = \"libresign\"\nl10n_dir = \"l10n\"\n")
        .unwrap();
    temp.child("l10n/de.json").write_str(CANONICAL_DE_JSON).unwrap();
    temp
}

fn cli() -> Command {
    Command::cargo_bin("nc-l10n").unwrap()
}

#[test]
fn check_clean_project_succeeds() {
    let temp = project();
    cli()
        .args(["check", "--path"])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No issues found"));
}

#[test]
fn check_missing_l10n_dir_fails() {
    let temp = TempDir::new().unwrap();
    temp.child("l10n.toml")
        .write_str("app_id = \"libresign\"\n")
        .unwrap();
    cli()
        .args(["check", "--path"])
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("l10n directory not found"));
}

#[test]
fn check_warns_on_placeholder_mismatch_without_failing() {
    let temp = project();
    temp.child("l10n/fr.json")
        .write_str(
            r#"{
    "translations": {
        "Signed by %s": "Signé par"
    },
    "pluralForm": "nplurals=2; plural=(n > 1);"
}
"#,
        )
        .unwrap();

    cli()
        .args(["check", "--path"])
        .arg(temp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("placeholder"));
}

#[test]
fn check_strict_promotes_warnings() {
    let temp = project();
    temp.child("l10n/fr.json")
        .write_str(
            r#"{
    "translations": {
        "Signed by %s": "Signé par"
    },
    "pluralForm": "nplurals=2; plural=(n > 1);"
}
"#,
        )
        .unwrap();

    cli()
        .args(["check", "--strict", "--path"])
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("warning(s)"));
}

#[test]
fn check_fails_on_bad_plural_rule() {
    let temp = project();
    temp.child("l10n/xx.json")
        .write_str(
            r#"{
    "translations": {},
    "pluralForm": "nplurals=2; plural=(n);"
}
"#,
        )
        .unwrap();

    cli()
        .args(["check", "--path"])
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("error(s)"));
}

#[test]
fn check_fails_on_duplicate_key() {
    let temp = project();
    temp.child("l10n/it.json")
        .write_str(
            r#"{
    "translations": {
        "Sign": "Firma",
        "Sign": "Firmare"
    },
    "pluralForm": "nplurals=2; plural=(n != 1);"
}
"#,
        )
        .unwrap();

    cli()
        .args(["check", "--path"])
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("duplicate key"));
}

#[test]
fn check_single_locale_filter() {
    let temp = project();
    // Broken file that the filter must skip.
    temp.child("l10n/xx.json").write_str("{ not json").unwrap();

    cli()
        .args(["check", "--locale", "de", "--path"])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No issues found"));
}

#[test]
fn fmt_rewrites_non_canonical_file() {
    let temp = project();
    temp.child("l10n/es.json")
        .write_str(r#"{"translations":{"Sign":"Firmar"},"pluralForm":"nplurals=2; plural=(n != 1);"}"#)
        .unwrap();

    cli()
        .args(["fmt", "--path"])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("1 file(s) formatted"));

    temp.child("l10n/es.json").assert(
        r#"{
    "translations": {
        "Sign": "Firmar"
    },
    "pluralForm": "nplurals=2; plural=(n != 1);"
}
"#,
    );
}

#[test]
fn fmt_leaves_canonical_files_alone() {
    let temp = project();
    cli()
        .args(["fmt", "--path"])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("0 file(s) formatted"));

    temp.child("l10n/de.json").assert(CANONICAL_DE_JSON);
}

#[test]
fn fmt_refuses_broken_plural_header() {
    let temp = project();
    // Rewriting this file would swap the header for the default rule.
    let broken = r#"{"translations":{},"pluralForm":"garbage"}"#;
    temp.child("l10n/xx.json").write_str(broken).unwrap();

    cli()
        .args(["fmt", "--path"])
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("unformattable plural rule header"));

    temp.child("l10n/xx.json").assert(broken);
}

#[test]
fn fmt_dry_run_fails_when_changes_pending() {
    let temp = project();
    temp.child("l10n/es.json")
        .write_str(r#"{"translations":{},"pluralForm":"nplurals=2; plural=(n != 1);"}"#)
        .unwrap();

    cli()
        .args(["fmt", "--dry-run", "--path"])
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("not in canonical form"));

    // Dry run must not touch the file.
    temp.child("l10n/es.json")
        .assert(r#"{"translations":{},"pluralForm":"nplurals=2; plural=(n != 1);"}"#);
}

#[test]
fn stats_lists_locales() {
    let temp = project();
    cli()
        .args(["stats", "--path"])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("de").and(predicate::str::contains("total")));
}

#[test]
fn convert_to_po_writes_catalog() {
    let temp = project();
    cli()
        .args(["convert", "--to", "po", "--path"])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("1 file(s) converted"));

    temp.child("po/de.po").assert(
        predicate::str::contains("\"Plural-Forms: nplurals=2; plural=(n != 1);\\n\"")
            .and(predicate::str::contains("msgid_plural \"%n files\"")),
    );
}

#[test]
fn convert_json_to_js_round_trips_through_check() {
    let temp = project();
    cli()
        .args(["convert", "--to", "js", "--path"])
        .arg(temp.path())
        .assert()
        .success();

    temp.child("l10n/de.js")
        .assert(predicate::str::contains("OC.L10N.register(\n    \"libresign\","));

    // The generated script must itself pass check.
    cli()
        .args(["check", "--path"])
        .arg(temp.path())
        .assert()
        .success();
}

// Drives the compiled binary against a throwaway data directory.

use assert_cmd::Command;
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

fn letterset(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("letterset").unwrap();
    cmd.arg("--config")
        .arg(dir.join("config.json"))
        .arg("--data-dir")
        .arg(dir.join("data"))
        .env("RUST_LOG", "warn");
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let assert = cmd.assert().success();
    String::from_utf8_lossy(&assert.get_output().stdout).into_owned()
}

/// Polish with alphabet {a, b} and 100 speakers, Czech with {a, c} and 10
fn seeded() -> TempDir {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("config.json"),
        r#"{"languages": ["pol", "ces"], "speakers": {"pol": 100, "ces": 10}}"#,
    )
    .unwrap();

    letterset(dir.path())
        .args(["letters", "pol", "a", "b"])
        .assert()
        .success();
    letterset(dir.path())
        .args(["letters", "ces", "a", "C"])
        .assert()
        .success();

    let raw_pol = dir.path().join("pol-sentences.txt");
    fs::write(&raw_pol, "1\tAAABB\n2\taaabb\n").unwrap();
    let raw_ces = dir.path().join("ces-sentences.txt");
    fs::write(&raw_ces, "1\tAc\n2\tac\n").unwrap();

    let out = stdout_of(letterset(dir.path()).arg("import").arg("pol").arg(&raw_pol));
    assert_eq!(out.trim(), "imported 2 sentences for pol");
    letterset(dir.path())
        .arg("import")
        .arg("ces")
        .arg(&raw_ces)
        .assert()
        .success();

    dir
}

#[test]
fn rank_writes_reports_and_prints_log() {
    let dir = seeded();
    let out = stdout_of(letterset(dir.path()).args(["rank", "--max-languages", "1"]));

    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "results:");
    assert_eq!(lines[1], "b score: 40 langs: Polish");
    assert_eq!(lines[2], "c score: 5 langs: Czech");
    assert!(out.contains("listed 2 chars out of 3 total chars"));
    assert!(out.contains("covered 2/2 languages: Polish, Czech"));

    let results = dir.path().join("data").join("results");
    for name in [
        "ranking.json",
        "results_log.txt",
        "anki_letters.csv",
        "markdown_table.md",
    ] {
        assert!(results.join(name).exists(), "{name} missing");
    }
    let anki = fs::read_to_string(results.join("anki_letters.csv")).unwrap();
    assert_eq!(anki, "B;b;40;Polish\nC;c;5;Czech\n");
}

#[test]
fn rank_top_and_out_flags() {
    let dir = seeded();
    let out_dir = dir.path().join("reports");
    let out = stdout_of(
        letterset(dir.path())
            .args(["rank", "--max-languages", "2", "--top", "1", "--out"])
            .arg(&out_dir),
    );
    // a is shared by both languages: 100 * 0.6 + 10 * 0.5
    assert!(out.starts_with("results:\na score: 65 langs: Polish, Czech\n"));
    assert!(out.contains("listed 1 chars out of 3 total chars"));

    let json = fs::read_to_string(out_dir.join("ranking.json")).unwrap();
    let ranking: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(ranking.as_array().unwrap().len(), 3);
    assert_eq!(ranking[0]["letter"], "a");
    assert_eq!(ranking[0]["rank"], 1);
}

#[test]
fn check_passes_when_everything_is_cached() {
    let dir = seeded();
    let out = stdout_of(letterset(dir.path()).arg("check"));
    assert!(out.contains("pol  corpus: ok"));
    assert!(out.contains("ces  corpus: ok"));
}

#[test]
fn check_fails_for_missing_resources() {
    let dir = seeded();
    letterset(dir.path())
        .args(["rank", "--languages", "pol,ces,fin"])
        .assert()
        .failure();
    fs::write(
        dir.path().join("config.json"),
        r#"{"languages": ["pol", "fin"], "speakers": {"pol": 100}}"#,
    )
    .unwrap();
    let assert = letterset(dir.path()).arg("check").assert().failure();
    let out = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
    assert!(out.contains("fin  corpus: missing alphabet: missing speakers: missing script: -"));
}

#[test]
fn rank_rejects_non_latin_corpus() {
    let dir = seeded();
    let raw = dir.path().join("ell.txt");
    fs::write(&raw, "1\tΚαλημέρα κόσμε\n").unwrap();
    letterset(dir.path())
        .arg("import")
        .arg("ell")
        .arg(&raw)
        .assert()
        .success();

    let assert = letterset(dir.path())
        .args(["rank", "--languages", "pol,ell"])
        .assert()
        .failure();
    let err = String::from_utf8_lossy(&assert.get_output().stderr).into_owned();
    assert!(err.contains("language ell does not use latin script"), "{err}");
}

#[test]
fn config_prints_and_saves_effective_config() {
    let dir = tempdir().unwrap();
    let out = stdout_of(letterset(dir.path()).args(["config", "--save"]));
    assert!(out.contains("\"max_languages\": 4"));
    let saved = fs::read_to_string(dir.path().join("config.json")).unwrap();
    assert!(saved.contains("\"assumed_text_length\": 40"));
    assert!(saved.contains("\"data_dir\""));
}

//! Configuration integration tests.
//!
//! Each test writes config files into a scratch directory, runs the binary
//! from there, and checks the repetition settings that took effect, either
//! through `info --json` or through the totals `stats --json` reports.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

/// Returns a Command configured to run our binary.
#[allow(deprecated)]
fn cmd() -> Command {
    Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap()
}

/// Reference and output whose total depends on every counting setting:
///
/// | settings                  | total |
/// |---------------------------|-------|
/// | adjacent, order 1         | 1     |
/// | global, order 1           | 2     |
/// | global, order 1, subtract | 1     |
/// | any mode, order 2         | 0     |
fn write_corpus(dir: &Path) {
    fs::write(dir.join("ref.txt"), "a b a\n").unwrap();
    fs::write(dir.join("out.txt"), "x y x x\n").unwrap();
}

fn parse_success(command: &mut Command) -> Value {
    let output = command.output().expect("failed to run command");
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("invalid JSON output")
}

/// Effective configuration as reported by `info --json`.
fn info_json(dir: &Path) -> Value {
    parse_success(cmd().args(["-C", dir.to_str().unwrap(), "info", "--json"]))
}

/// Total repetitions for the corpus in `dir`, with extra `stats` flags.
fn stats_total(dir: &Path, extra: &[&str]) -> i64 {
    write_corpus(dir);
    let json = parse_success(
        cmd()
            .args(["-C", dir.to_str().unwrap(), "--json", "stats", "--ref", "ref.txt"])
            .args(extra)
            .arg("out.txt"),
    );
    json["systems"][0]["total"].as_i64().unwrap()
}

// =============================================================================
// Discovery
// =============================================================================

#[test]
fn defaults_apply_without_config_file() {
    let tmp = TempDir::new().unwrap();
    let json = info_json(tmp.path());

    assert!(json["config"]["config_file"].is_null());
    assert_eq!(json["config"]["mode"], "adjacent");
    assert_eq!(json["config"]["ngram_order"], 1);
    assert_eq!(json["config"]["subtract_legitimate_reps"], false);
    assert_eq!(json["config"]["num_examples"], 10);
    assert_eq!(stats_total(tmp.path(), &[]), 1);
}

#[test]
fn dotfile_in_working_dir_sets_mode() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".repstat.toml"), "mode = \"global\"\n").unwrap();

    let reported = info_json(tmp.path())["config"]["config_file"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(reported.ends_with(".repstat.toml"), "reported: {reported}");
    assert_eq!(stats_total(tmp.path(), &[]), 2);
}

#[test]
fn regular_config_sets_example_count() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("repstat.toml"), "num_examples = 3\n").unwrap();
    write_corpus(tmp.path());

    let json = parse_success(cmd().args([
        "-C",
        tmp.path().to_str().unwrap(),
        "--json",
        "examples",
        "--ref",
        "ref.txt",
        "out.txt",
    ]));
    assert_eq!(json["num_examples"], 3);
}

#[test]
fn config_in_ancestor_applies_to_nested_run() {
    let tmp = TempDir::new().unwrap();
    let nested = tmp.path().join("runs").join("wmt");
    fs::create_dir_all(&nested).unwrap();
    fs::write(tmp.path().join(".repstat.toml"), "ngram_order = 2\n").unwrap();

    assert_eq!(info_json(&nested)["config"]["ngram_order"], 2);
    assert_eq!(stats_total(&nested, &[]), 0);
}

#[test]
fn every_format_is_read() {
    let cases = [
        (".repstat.toml", "mode = \"global\"\n"),
        (".repstat.yaml", "mode: global\n"),
        (".repstat.yml", "mode: global\n"),
        (".repstat.json", r#"{"mode": "global"}"#),
    ];
    for (name, content) in cases {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(name), content).unwrap();
        assert_eq!(stats_total(tmp.path(), &[]), 2, "format of {name}");
    }
}

// =============================================================================
// Precedence
// =============================================================================

#[test]
fn dotfile_and_regular_file_merge_with_regular_winning() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".repstat.toml"),
        "mode = \"global\"\nngram_order = 2\n",
    )
    .unwrap();
    fs::write(
        tmp.path().join("repstat.toml"),
        "ngram_order = 1\nsubtract_legitimate_reps = true\n",
    )
    .unwrap();

    let json = info_json(tmp.path());
    assert_eq!(json["config"]["mode"], "global", "dotfile key kept");
    assert_eq!(json["config"]["ngram_order"], 1, "regular file wins");
    assert_eq!(json["config"]["subtract_legitimate_reps"], true);
    assert_eq!(stats_total(tmp.path(), &[]), 1);
}

#[test]
fn nearest_directory_config_shadows_ancestor() {
    let tmp = TempDir::new().unwrap();
    let project = tmp.path().join("project");
    fs::create_dir_all(&project).unwrap();
    fs::write(tmp.path().join(".repstat.toml"), "mode = \"global\"\n").unwrap();
    fs::write(project.join(".repstat.toml"), "num_examples = 5\n").unwrap();

    let json = info_json(&project);
    assert_eq!(json["config"]["num_examples"], 5);
    assert_eq!(
        json["config"]["mode"], "adjacent",
        "ancestor config is not read once a nearer one exists"
    );
}

#[test]
fn yaml_overrides_toml_in_same_directory() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".repstat.toml"),
        "mode = \"global\"\nsubtract_legitimate_reps = true\n",
    )
    .unwrap();
    fs::write(
        tmp.path().join(".repstat.yaml"),
        "subtract_legitimate_reps: false\n",
    )
    .unwrap();

    assert_eq!(stats_total(tmp.path(), &[]), 2);
}

#[test]
fn explicit_config_overrides_discovered() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".repstat.toml"), "mode = \"global\"\n").unwrap();
    let explicit = tmp.path().join("bigram.toml");
    fs::write(&explicit, "ngram_order = 2\n").unwrap();

    let json = parse_success(cmd().args([
        "-C",
        tmp.path().to_str().unwrap(),
        "--config",
        explicit.to_str().unwrap(),
        "info",
        "--json",
    ]));
    assert_eq!(json["config"]["mode"], "global");
    assert_eq!(json["config"]["ngram_order"], 2);
    let reported = json["config"]["config_file"].as_str().unwrap();
    assert!(reported.ends_with("bigram.toml"), "reported: {reported}");
}

#[test]
fn env_overrides_project_config() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".repstat.toml"), "ngram_order = 3\n").unwrap();

    let json = parse_success(
        cmd()
            .env("REPSTAT_NGRAM_ORDER", "2")
            .env("REPSTAT_MODE", "global")
            .args(["-C", tmp.path().to_str().unwrap(), "info", "--json"]),
    );
    assert_eq!(json["config"]["ngram_order"], 2, "env should beat file");
    assert_eq!(json["config"]["mode"], "global");
}

#[test]
fn flags_override_config() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".repstat.toml"),
        "mode = \"global\"\nsubtract_legitimate_reps = true\n",
    )
    .unwrap();

    assert_eq!(stats_total(tmp.path(), &[]), 1);
    assert_eq!(stats_total(tmp.path(), &["--no-subtract-legitimate-reps"]), 2);
    assert_eq!(
        stats_total(
            tmp.path(),
            &["--mode", "adjacent", "--no-subtract-legitimate-reps"]
        ),
        1
    );
    assert_eq!(stats_total(tmp.path(), &["-n", "2"]), 0);
}

// =============================================================================
// Invalid Values
// =============================================================================

#[test]
fn malformed_files_fail_to_load() {
    let cases = [
        (".repstat.toml", "mode = [[["),
        (".repstat.yaml", "mode: [global\n"),
        (".repstat.json", "{mode: global}"),
    ];
    for (name, content) in cases {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(name), content).unwrap();
        cmd()
            .args(["-C", tmp.path().to_str().unwrap(), "info"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("configuration"));
    }
}

#[test]
fn unknown_mode_is_rejected() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".repstat.toml"), "mode = \"sideways\"\n").unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "info"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load configuration"));
}

#[test]
fn unknown_keys_do_not_block_known_ones() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".repstat.toml"),
        "mode = \"global\"\nbleu_smoothing = \"floor\"\n",
    )
    .unwrap();

    assert_eq!(stats_total(tmp.path(), &[]), 2);
}

#[test]
fn zero_ngram_order_in_config_fails_stats() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".repstat.toml"), "ngram_order = 0\n").unwrap();
    write_corpus(tmp.path());

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "stats", "--ref", "ref.txt", "out.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid n-gram order"));
}

// =============================================================================
// Input Limits
// =============================================================================

#[test]
fn oversized_input_respects_configured_limit() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".repstat.toml"), "max_input_bytes = 4\n").unwrap();
    write_corpus(tmp.path());

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "stats", "--ref", "ref.txt", "out.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("input too large"));
}

#[test]
fn disabled_input_limit_is_reported() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".repstat.toml"),
        "max_input_bytes = 4\ndisable_input_limit = true\n",
    )
    .unwrap();

    assert!(info_json(tmp.path())["config"]["max_input_bytes"].is_null());
    assert_eq!(stats_total(tmp.path(), &[]), 1);
}

// =============================================================================
// Search Boundary
// =============================================================================

#[test]
fn search_stops_at_repository_root() {
    let tmp = TempDir::new().unwrap();
    let repo = tmp.path().join("repo");
    let data = repo.join("data");
    fs::create_dir_all(&data).unwrap();
    fs::create_dir(repo.join(".git")).unwrap();
    fs::write(tmp.path().join(".repstat.toml"), "mode = \"global\"\n").unwrap();

    assert!(info_json(&data)["config"]["config_file"].is_null());
    assert_eq!(stats_total(&data, &[]), 1);
}

#[test]
fn config_at_repository_root_is_found() {
    let tmp = TempDir::new().unwrap();
    let repo = tmp.path().join("repo");
    let data = repo.join("data");
    fs::create_dir_all(&data).unwrap();
    fs::create_dir(repo.join(".git")).unwrap();
    fs::write(repo.join(".repstat.toml"), "mode = \"global\"\n").unwrap();

    assert_eq!(stats_total(&data, &[]), 2);
}

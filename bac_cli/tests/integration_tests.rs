//! Integration tests for the bac binary.
//!
//! These tests verify end-to-end behavior including:
//! - Single drink and cumulative estimates
//! - Profile configuration and overrides
//! - Input validation and exit status
//! - JSON output

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Helper to create an isolated config directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Helper to get the CLI binary, isolated from any user config
fn cli(config_home: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("bac"));
    cmd.env("XDG_CONFIG_HOME", config_home);
    cmd.env_remove("RUST_LOG");
    cmd
}

fn write_evening_csv(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("drinks.csv");
    fs::write(
        &path,
        "volume_ml,abv,start,end\n100,0.12,20:00,20:05\n200,0.12,20:30,21:00\n",
    )
    .expect("Failed to write drinks");
    path
}

#[test]
fn test_cli_help() {
    let temp_dir = setup_test_dir();
    cli(temp_dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Blood alcohol concentration estimator",
        ));
}

#[test]
fn test_single_drink_reference_values() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .args(["--weight", "70", "--sex", "male", "--stomach", "full"])
        .args(["single", "--volume", "200", "--abv", "0.12"])
        .args(["--start", "20:00", "--end", "21:00"])
        .assert()
        .success()
        .stdout(predicate::str::contains("BAC: 0.128 g/L"))
        .stdout(predicate::str::contains("Level: Sober"))
        .stdout(predicate::str::contains("Legal to drive: yes"))
        .stdout(predicate::str::contains("Time to sober: 51 minutes"));
}

#[test]
fn test_single_drink_accepts_percentage() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .args(["single", "--volume", "200", "--abv", "12%"])
        .args(["--start", "20:00", "--end", "21:00"])
        .args(["--weight", "70", "--sex", "male"])
        .assert()
        .success()
        .stdout(predicate::str::contains("BAC: 0.128 g/L"));
}

#[test]
fn test_single_drink_json() {
    let temp_dir = setup_test_dir();

    let output = cli(temp_dir.path())
        .args(["--json", "--weight", "70", "--sex", "male"])
        .args(["single", "--volume", "200", "--abv", "0.12"])
        .args(["--start", "20:00", "--end", "21:00"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).expect("stdout is JSON");
    assert_eq!(report["bac"], 0.128);
    assert_eq!(report["interpretation"]["level_label"], "Sober");
    assert_eq!(report["interpretation"]["legal_to_drive"], true);
}

#[test]
fn test_session_reference_trace() {
    let temp_dir = setup_test_dir();
    let drinks = write_evening_csv(temp_dir.path());

    cli(temp_dir.path())
        .args(["--weight", "70", "--sex", "male", "--stomach", "full"])
        .arg("session")
        .arg("--drinks")
        .arg(&drinks)
        .assert()
        .success()
        .stdout(predicate::str::contains("Between drink 1 and 2"))
        .stdout(predicate::str::contains("Elapsed: 25 minutes"))
        .stdout(predicate::str::contains("BAC after metabolism: 0.127 g/L"))
        .stdout(predicate::str::contains("BAC: 0.330 g/L"))
        .stdout(predicate::str::contains("Approaching the legal limit"))
        .stdout(predicate::str::contains("Between drink 2 and 3").not());
}

#[test]
fn test_session_json_and_decay_model() {
    let temp_dir = setup_test_dir();
    let drinks = write_evening_csv(temp_dir.path());

    let run = |model: &str| -> serde_json::Value {
        let output = cli(temp_dir.path())
            .args(["--json", "--weight", "70", "--sex", "male", "--stomach", "full"])
            .arg("session")
            .arg("--drinks")
            .arg(&drinks)
            .args(["--model", model])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&output).expect("stdout is JSON")
    };

    let reference = run("reference");
    assert_eq!(reference["metabolism_trace"].as_array().unwrap().len(), 1);
    assert_eq!(reference["metabolism_trace"][0]["elapsed_unit"], "minutes");
    assert_eq!(reference["report"]["bac"], 0.33);

    let decay = run("decay");
    assert_eq!(decay["model"], "decay");
    assert!(decay["report"]["bac"].as_f64().unwrap() < 0.33);
}

#[test]
fn test_missing_weight_fails() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .args(["--sex", "male"])
        .args(["single", "--volume", "200", "--abv", "0.12"])
        .args(["--start", "20:00", "--end", "21:00"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no body weight"));
}

#[test]
fn test_zero_weight_rejected() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .args(["--weight", "0", "--sex", "female"])
        .args(["single", "--volume", "200", "--abv", "0.12"])
        .args(["--start", "20:00", "--end", "21:00"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("body weight must be a positive"));
}

#[test]
fn test_unknown_sex_rejected() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .args(["--weight", "70", "--sex", "robot"])
        .args(["single", "--volume", "200", "--abv", "0.12"])
        .args(["--start", "20:00", "--end", "21:00"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized sex"));
}

#[test]
fn test_profile_from_config_file() {
    let temp_dir = setup_test_dir();
    let config_path = temp_dir.path().join("profile.toml");
    fs::write(
        &config_path,
        "[profile]\nweight_kg = 70.0\nsex = \"male\"\nstomach = \"full\"\n",
    )
    .unwrap();

    cli(temp_dir.path())
        .arg("--config")
        .arg(&config_path)
        .args(["single", "--volume", "200", "--abv", "0.12"])
        .args(["--start", "20:00", "--end", "21:00"])
        .assert()
        .success()
        .stdout(predicate::str::contains("BAC: 0.128 g/L"));
}

#[test]
fn test_default_config_location() {
    let temp_dir = setup_test_dir();
    let config_dir = temp_dir.path().join("bac-estimator");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("config.toml"),
        "[profile]\nweight_kg = 70.0\nsex = \"male\"\n\n[output]\nformat = \"json\"\n",
    )
    .unwrap();
    let drinks = write_evening_csv(temp_dir.path());

    let output = cli(temp_dir.path())
        .arg("session")
        .arg("--drinks")
        .arg(&drinks)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let doc: serde_json::Value = serde_json::from_slice(&output).expect("stdout is JSON");
    assert_eq!(doc["drinks"], 2);
}

#[test]
fn test_decay_command() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .args(["decay", "--bac", "0.5", "--hours", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("BAC: 0.350 g/L"));

    // Negative elapsed time never raises BAC
    cli(temp_dir.path())
        .args(["decay", "--bac", "0.5", "--hours", "-2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("BAC: 0.500 g/L"));
}

#[test]
fn test_elapsed_across_midnight() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .args(["elapsed", "--start", "23:30", "--end", "00:15"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Elapsed: 45 minutes"));
}

#[test]
fn test_interpret_legal_limit() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .args(["interpret", "--bac", "0.5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Warning: near the legal limit"))
        .stdout(predicate::str::contains("Legal to drive: yes"));

    cli(temp_dir.path())
        .args(["interpret", "--bac", "0.51"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Warning: do not drive"))
        .stdout(predicate::str::contains("Legal to drive: no"));

    cli(temp_dir.path())
        .args(["interpret", "--bac", "0.15"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Time to sober: 1.0 hours"));
}

#[test]
fn test_invalid_drink_row_fails() {
    let temp_dir = setup_test_dir();
    let path = temp_dir.path().join("bad.csv");
    fs::write(&path, "volume_ml,abv,start,end\n100,0.12,20:00,late\n").unwrap();

    cli(temp_dir.path())
        .args(["--weight", "70", "--sex", "male"])
        .arg("session")
        .arg("--drinks")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 2"));
}

#[test]
fn test_session_uses_row_stomach_state() {
    let temp_dir = setup_test_dir();
    let path = temp_dir.path().join("empty.csv");
    fs::write(
        &path,
        "volume_ml,abv,start,end,stomach\n100,0.12,20:00,20:05,empty\n200,0.12,20:30,21:00,empty\n",
    )
    .unwrap();

    let run = |extra: &[&str]| -> f64 {
        let output = cli(temp_dir.path())
            .args(["--json", "--weight", "70", "--sex", "male"])
            .args(extra)
            .arg("session")
            .arg("--drinks")
            .arg(&path)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        let doc: serde_json::Value = serde_json::from_slice(&output).expect("stdout is JSON");
        doc["report"]["bac"].as_f64().unwrap()
    };

    // Rows say empty stomach, so the result is above the full-stomach 0.330
    assert!(run(&[]) > 0.33);
    // An explicit --stomach still overrides every row
    assert_eq!(run(&["--stomach", "full"]), 0.33);
}

#[test]
fn test_non_finite_bac_rejected() {
    let temp_dir = setup_test_dir();

    for bad in ["inf", "NaN", "-0.2"] {
        cli(temp_dir.path())
            .args(["interpret", "--bac", bad])
            .assert()
            .failure()
            .stderr(predicate::str::contains("BAC must be a finite, non-negative"));

        cli(temp_dir.path())
            .args(["decay", "--bac", bad, "--hours", "1"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("BAC must be a finite, non-negative"));
    }
}

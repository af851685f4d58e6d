//! File-backed catalog and configuration tests for the nutri binary.
//!
//! These tests verify the CLI can handle:
//! - Replacement catalogs in JSON and CSV form
//! - Invalid or unsupported catalog files
//! - Profile defaults from a config file

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::sync::OnceLock;
use tempfile::TempDir;

/// Empty config home shared by every run, so a developer's own
/// `nutri/config.toml` never changes the catalog or profile under test
static CONFIG_HOME: OnceLock<TempDir> = OnceLock::new();

/// Helper to get the path to the CLI binary
fn cli() -> Command {
    let config_home =
        CONFIG_HOME.get_or_init(|| tempfile::tempdir().expect("Failed to create temp dir"));
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("nutri"));
    cmd.env("XDG_CONFIG_HOME", config_home.path());
    cmd
}

fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

#[test]
fn test_json_catalog_replaces_builtin() {
    let temp_dir = setup_test_dir();
    let catalog_path = temp_dir.path().join("foods.json");
    fs::write(
        &catalog_path,
        r#"[{"id": "tofu", "name": "Tofu", "calories": 76, "protein": 8, "carbs": 1.9, "fat": 4.8, "fiber": 0.3}]"#,
    )
    .expect("Failed to write catalog");

    cli()
        .arg("--catalog")
        .arg(&catalog_path)
        .args(["search", "tofu"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Tofu"));

    // Built-in foods are gone
    cli()
        .arg("--catalog")
        .arg(&catalog_path)
        .args(["search", "apple"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No foods found"));
}

#[test]
fn test_csv_catalog_facts() {
    let temp_dir = setup_test_dir();
    let catalog_path = temp_dir.path().join("foods.csv");
    fs::write(
        &catalog_path,
        "name,calories,protein,carbs,fat,fiber\nLentils,116,9,20,0.4,7.9\n",
    )
    .expect("Failed to write catalog");

    cli()
        .arg("--catalog")
        .arg(&catalog_path)
        .args(["facts", "lentils", "--quantity", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Calories  232 kcal"))
        .stdout(predicate::str::contains("Fiber     16g"));
}

#[test]
fn test_invalid_catalog_is_rejected() {
    let temp_dir = setup_test_dir();
    let catalog_path = temp_dir.path().join("foods.json");
    fs::write(
        &catalog_path,
        r#"[{"name": "", "calories": 10, "protein": 1, "carbs": 1, "fat": 1}]"#,
    )
    .expect("Failed to write catalog");

    cli()
        .arg("--catalog")
        .arg(&catalog_path)
        .args(["search", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Food name is required"));
}

#[test]
fn test_corrupted_catalog_is_rejected() {
    let temp_dir = setup_test_dir();
    let catalog_path = temp_dir.path().join("foods.json");
    fs::write(&catalog_path, "{ invalid json }}}}").expect("Failed to write catalog");

    cli()
        .arg("--catalog")
        .arg(&catalog_path)
        .args(["search", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Json"));
}

#[test]
fn test_config_catalog_and_profile() {
    let temp_dir = setup_test_dir();
    let catalog_path = temp_dir.path().join("foods.csv");
    fs::write(
        &catalog_path,
        "id,name,calories,protein,carbs,fat,fiber\nskyr,Skyr,63,11,4,0.2,0\n",
    )
    .expect("Failed to write catalog");

    let config_path = temp_dir.path().join("config.toml");
    fs::write(
        &config_path,
        format!(
            r#"
[catalog]
path = {:?}

[profile]
weight_kg = 70.0
height_cm = 175.0
age_years = 30.0
sex = "male"
activity_level = "very_active"
"#,
            catalog_path.to_string_lossy()
        ),
    )
    .expect("Failed to write config");

    cli()
        .arg("--config")
        .arg(&config_path)
        .args(["search", "sky"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Skyr"));

    // 1648.75 × 1.9 = 3132.625
    cli()
        .arg("--config")
        .arg(&config_path)
        .arg("energy")
        .assert()
        .success()
        .stdout(predicate::str::contains("BMR:  1649 kcal/day"))
        .stdout(predicate::str::contains("TDEE: 3133 kcal/day (very_active"));
}

#[test]
fn test_energy_without_profile_fails() {
    let temp_dir = setup_test_dir();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "").expect("Failed to write config");

    cli()
        .arg("--config")
        .arg(&config_path)
        .args(["energy", "--weight", "70"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("height_cm is required"));
}

// dirs only reads XDG_CONFIG_HOME on Linux
#[cfg(target_os = "linux")]
#[test]
fn test_default_config_location_is_read() {
    let temp_dir = setup_test_dir();
    let catalog_path = temp_dir.path().join("foods.csv");
    fs::write(
        &catalog_path,
        "id,name,calories,protein,carbs,fat,fiber\nkefir,Kefir,41,3.4,4.8,1,0\n",
    )
    .expect("Failed to write catalog");

    let config_dir = temp_dir.path().join("nutri");
    fs::create_dir_all(&config_dir).expect("Failed to create config dir");
    fs::write(
        config_dir.join("config.toml"),
        format!("[catalog]\npath = {:?}\n", catalog_path.to_string_lossy()),
    )
    .expect("Failed to write config");

    cli()
        .env("XDG_CONFIG_HOME", temp_dir.path())
        .args(["search", "kef"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Kefir"));

    // The shared empty config home falls back to the built-in catalog
    cli()
        .args(["search", "kef"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No foods found"));
}

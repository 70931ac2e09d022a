mod common;

use std::fs;
use std::process::Command;

use common::{unique_temp_path, PROFILE_JSON};

fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_runeview")
}

/// Command with the catalog pointed at a closed local port and a private cache file.
fn offline_command(cache_path: &std::path::Path) -> Command {
    let mut command = Command::new(bin());
    command
        .env("RUNEVIEW_CATALOG_URL", "http://127.0.0.1:9/api/v2/monsters/")
        .env("RUNEVIEW_CATALOG_TIMEOUT_MS", "2000")
        .env("RUNEVIEW_CATALOG_CACHE", cache_path)
        .env("RUST_LOG", "off");
    command
}

fn write_profile() -> std::path::PathBuf {
    let path = unique_temp_path("profile", "json");
    fs::write(&path, PROFILE_JSON).expect("profile fixture should be written");
    path
}

#[test]
fn unknown_command_prints_usage() {
    let output = Command::new(bin())
        .arg("frobnicate")
        .output()
        .expect("binary should run");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("usage: runeview"));
}

#[test]
fn runes_command_returns_usage_without_path() {
    let output = Command::new(bin())
        .arg("runes")
        .output()
        .expect("runes should run");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("usage: runeview runes"));
}

#[test]
fn runes_command_emits_scored_records() {
    let profile = write_profile();
    let output = Command::new(bin())
        .arg("runes")
        .arg(&profile)
        .output()
        .expect("runes should run");

    assert_eq!(output.status.code(), Some(0));
    let payload: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("runes should emit json");
    let runes = payload.as_array().expect("array of runes");
    assert_eq!(runes.len(), 6);
    let first = runes.iter().find(|r| r["rune_id"] == 1).unwrap();
    assert_eq!(first["score"], 71.1);
    assert_eq!(first["owner_unit_id"], 1001);

    let _ = fs::remove_file(profile);
}

#[test]
fn unreadable_profile_fails_with_exit_one() {
    let output = Command::new(bin())
        .args(["runes", "/definitely/not/here.json"])
        .output()
        .expect("runes should run");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to read profile"));
}

#[test]
fn monsters_command_degrades_to_placeholders_offline() {
    let profile = write_profile();
    let cache_path = unique_temp_path("cli-cache", "json");

    let output = offline_command(&cache_path)
        .arg("monsters")
        .arg(&profile)
        .output()
        .expect("monsters should run");

    assert_eq!(output.status.code(), Some(0));
    let payload: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("monsters should emit json");
    assert_eq!(payload[0]["name"], "ID:14314");
    assert_eq!(payload[0]["set_label"], "Violent");
    assert_eq!(payload[1]["name"], "ID:10111");

    let cached: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&cache_path).expect("cache flushed"))
            .expect("cache should be json");
    assert_eq!(cached["14314"]["name"], "ID:14314");

    let _ = fs::remove_file(profile);
    let _ = fs::remove_file(cache_path);
}

#[test]
fn export_command_writes_both_csv_files() {
    let profile = write_profile();
    let cache_path = unique_temp_path("export-cache", "json");
    let out_dir = unique_temp_path("export", "d");

    let output = offline_command(&cache_path)
        .arg("export")
        .arg(&profile)
        .arg(&out_dir)
        .output()
        .expect("export should run");

    assert_eq!(output.status.code(), Some(0));
    let runes_csv = fs::read_to_string(out_dir.join("runes.csv")).expect("runes.csv");
    assert_eq!(runes_csv.lines().count(), 7);
    let monsters_csv = fs::read_to_string(out_dir.join("monsters.csv")).expect("monsters.csv");
    assert!(monsters_csv.starts_with("unit_id,catalog_id,name,"));
    assert_eq!(monsters_csv.lines().count(), 3);

    let _ = fs::remove_file(profile);
    let _ = fs::remove_file(cache_path);
    let _ = fs::remove_dir_all(out_dir);
}

#[test]
fn profiles_command_lists_exports_with_wizard_info() {
    let dir = unique_temp_path("profiles", "d");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("Tester-424242.json"), PROFILE_JSON).unwrap();
    fs::write(dir.join("notes.json"), "{\"hello\": 1}").unwrap();

    let output = Command::new(bin())
        .arg("profiles")
        .arg(&dir)
        .output()
        .expect("profiles should run");

    assert_eq!(output.status.code(), Some(0));
    let payload: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let listings = payload.as_array().unwrap();
    assert_eq!(listings.len(), 1);
    let label = listings[0]["label"].as_str().unwrap();
    assert!(label.starts_with("Tester [424242] Lv50 — "));
    assert!(label.ends_with(" — Tester-424242.json"));

    let _ = fs::remove_dir_all(dir);
}

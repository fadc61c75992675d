// SPDX-License-Identifier: MIT OR Apache-2.0

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn cnref(store: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("cnref"));
    cmd.env("NO_COLOR", "1")
        .env("HOME", store.parent().expect("store parent"))
        .arg("--store")
        .arg(store);
    cmd
}

fn json_output(cmd: &mut Command) -> Value {
    let assert = cmd.assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8");
    serde_json::from_str(&stdout).expect("json")
}

fn names(value: &Value) -> Vec<String> {
    value
        .as_array()
        .expect("array")
        .iter()
        .map(|v| v["name"].as_str().expect("name").to_string())
        .collect()
}

#[test]
fn list_by_type_returns_only_that_type() {
    let dir = TempDir::new().expect("tempdir");
    let store = dir.path().join("prefs.json");

    let json = json_output(cnref(&store).args(["--format", "json", "list", "-t", "event"]));
    let results = json.as_array().expect("array");
    assert_eq!(results.len(), 9);
    assert!(results.iter().all(|v| v["type"] == "event"));
}

#[test]
fn list_text_filter_matches_description() {
    let dir = TempDir::new().expect("tempdir");
    let store = dir.path().join("prefs.json");

    let json = json_output(cnref(&store).args(["--format", "json", "list", "-q", "localstorage"]));
    let found = names(&json);
    assert!(found.contains(&"data_save".to_string()));
    assert!(found.contains(&"storage_event".to_string()));
}

#[test]
fn search_paginates_and_records_history() {
    let dir = TempDir::new().expect("tempdir");
    let store = dir.path().join("prefs.json");

    let json = json_output(cnref(&store).args([
        "--format", "json", "search", "filter", "-n", "4", "-p", "2",
    ]));
    assert_eq!(json["page"], 2);
    assert_eq!(json["page_size"], 4);
    assert!(json["total"].as_u64().expect("total") > 4);
    let first = &json["results"][0];
    assert!(first["highlighted_name"]
        .as_str()
        .expect("highlighted")
        .contains("<mark>filter</mark>"));

    cnref(&store).args(["search", "element"]).assert().success();
    cnref(&store).args(["search", "filter"]).assert().success();

    let history = json_output(cnref(&store).args(["--format", "json", "history"]));
    assert_eq!(history, serde_json::json!(["filter", "element"]));

    let suggestions = json_output(cnref(&store).args(["--format", "json", "suggest", "ELE"]));
    assert_eq!(suggestions, serde_json::json!(["element"]));
}

#[test]
fn search_whole_word_requires_exact_term() {
    let dir = TempDir::new().expect("tempdir");
    let store = dir.path().join("prefs.json");

    let substring = json_output(cnref(&store).args(["--format", "json", "search", "load"]));
    let whole = json_output(cnref(&store).args(["--format", "json", "search", "load", "-w"]));
    let substring_total = substring["total"].as_u64().expect("total");
    let whole_names: Vec<&str> = whole["results"]
        .as_array()
        .expect("results")
        .iter()
        .map(|v| v["name"].as_str().expect("name"))
        .collect();
    assert!(whole_names.contains(&"data_load"));
    assert!(!whole_names.contains(&"data_loaded_is"));
    assert!(substring_total > whole_names.len() as u64);
}

#[test]
fn search_without_matches_prints_hint() {
    let dir = TempDir::new().expect("tempdir");
    let store = dir.path().join("prefs.json");

    cnref(&store)
        .args(["search", "zzzzqqq"])
        .assert()
        .success()
        .stderr(predicate::str::contains("No codenames found"));
}

#[test]
fn expand_persists_between_runs() {
    let dir = TempDir::new().expect("tempdir");
    let store = dir.path().join("prefs.json");

    cnref(&store).args(["expand", "event"]).assert().success();

    let groups = json_output(cnref(&store).args(["--format", "json", "groups"]));
    let groups = groups.as_array().expect("groups");
    let event = groups
        .iter()
        .find(|g| g["root"] == "event")
        .expect("event group");
    assert_eq!(event["expanded"], true);
    let app = groups.iter().find(|g| g["root"] == "app").expect("app group");
    assert_eq!(app["expanded"], false);

    let roots: Vec<&str> = groups.iter().map(|g| g["root"].as_str().unwrap()).collect();
    let mut sorted = roots.clone();
    sorted.sort();
    assert_eq!(roots, sorted);
}

#[test]
fn expand_unknown_root_fails_with_hint() {
    let dir = TempDir::new().expect("tempdir");
    let store = dir.path().join("prefs.json");

    cnref(&store)
        .args(["expand", "nonexistent"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown root term"));
}

#[test]
fn saved_filters_and_presets_round_trip() {
    let dir = TempDir::new().expect("tempdir");
    let store = dir.path().join("prefs.json");

    cnref(&store)
        .args(["list", "-t", "constant", "-x", "color", "--save"])
        .assert()
        .success();

    let saved = json_output(cnref(&store).args(["--format", "json", "list", "--saved"]));
    let saved_names = names(&saved);
    assert!(!saved_names.is_empty());
    assert!(saved_names.iter().all(|n| !n.starts_with("color_")));

    let preset = json_output(cnref(&store).args(["--format", "json", "preset", "save", "consts"]));
    assert_eq!(preset["id"], 1);
    assert_eq!(preset["name"], "consts");

    let loaded = json_output(cnref(&store).args(["--format", "json", "preset", "load", "1"]));
    assert_eq!(loaded["matched"].as_u64(), Some(saved_names.len() as u64));

    cnref(&store)
        .args(["preset", "load", "99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("preset 99 not found"));
}

#[test]
fn custom_data_file_replaces_catalog() {
    let dir = TempDir::new().expect("tempdir");
    let store = dir.path().join("prefs.json");
    let data = dir.path().join("names.json");
    fs::write(
        &data,
        r#"[
            {"name":"app_init","type":"function","description":"Boots the app"},
            {"name":"user_login","type":"function","description":"Writes a log entry"},
            {"name":"config_load","type":"variable"}
        ]"#,
    )
    .expect("write data");

    let json = json_output(
        cnref(&store)
            .arg("--data")
            .arg(&data)
            .args(["--format", "json", "search", "app"]),
    );
    assert_eq!(json["total"], 1);
    assert_eq!(json["results"][0]["name"], "app_init");
    assert_eq!(json["results"][0]["root"], "app");
}

#[test]
fn theme_is_remembered() {
    let dir = TempDir::new().expect("tempdir");
    let store = dir.path().join("prefs.json");

    cnref(&store).args(["theme", "dark"]).assert().success();
    cnref(&store)
        .args(["theme"])
        .assert()
        .success()
        .stdout(predicate::str::contains("theme: dark"));
}

#[test]
fn compare_reports_shared_terms() {
    let dir = TempDir::new().expect("tempdir");
    let store = dir.path().join("prefs.json");

    let json = json_output(cnref(&store).args([
        "--format",
        "json",
        "compare",
        "filter_apply",
        "filter_reset",
    ]));
    assert_eq!(json["match_count"], 1);
    assert_eq!(json["same_root"], true);
}

#[test]
fn completions_are_generated() {
    let dir = TempDir::new().expect("tempdir");
    let store = dir.path().join("prefs.json");

    cnref(&store)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cnref"));
}

#[test]
fn filter_reset_clears_saved_state() {
    let dir = TempDir::new().expect("tempdir");
    let store = dir.path().join("prefs.json");

    cnref(&store)
        .args(["list", "-t", "constant", "-x", "color", "-q", "max", "--save"])
        .assert()
        .success();
    let narrowed = json_output(cnref(&store).args(["--format", "json", "filter", "show"]));
    assert!(narrowed["matched"].as_u64() < narrowed["total"].as_u64());
    assert_eq!(narrowed["root_filters"]["color"], false);

    let reset = json_output(cnref(&store).args(["--format", "json", "filter", "reset"]));
    assert_eq!(reset["matched"], reset["total"]);
    assert_eq!(reset["search_text"], "");
    assert_eq!(reset["root_filters"]["color"], true);

    let all = json_output(cnref(&store).args(["--format", "json", "list", "--saved"]));
    assert_eq!(all.as_array().expect("array").len(), 91);
}

#[test]
fn filter_toggles_feed_saved_listing() {
    let dir = TempDir::new().expect("tempdir");
    let store = dir.path().join("prefs.json");

    cnref(&store).args(["filter", "type", "event"]).assert().success();
    cnref(&store).args(["filter", "root", "element"]).assert().success();

    let listed = json_output(cnref(&store).args(["--format", "json", "list", "--saved"]));
    let results = listed.as_array().expect("array");
    assert!(!results.is_empty());
    assert!(results.iter().all(|v| v["type"] != "event" && v["root"] != "element"));

    cnref(&store)
        .args(["filter", "root", "nonexistent"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown root term"));
}

#[test]
fn import_persists_records_between_runs() {
    let dir = TempDir::new().expect("tempdir");
    let store = dir.path().join("prefs.json");
    let data = dir.path().join("names.json");
    fs::write(
        &data,
        r#"[{"name":"cart_add","type":"Function"},{"name":"cart_total","type":"variable"}]"#,
    )
    .expect("write data");

    let imported = json_output(cnref(&store).args(["--format", "json", "import"]).arg(&data));
    assert_eq!(imported["imported"], 2);
    assert_eq!(imported["roots"], 1);

    let listed = json_output(cnref(&store).args(["--format", "json", "list"]));
    assert_eq!(names(&listed), vec!["cart_add", "cart_total"]);
}

#[test]
fn data_file_with_unknown_type_is_rejected() {
    let dir = TempDir::new().expect("tempdir");
    let store = dir.path().join("prefs.json");
    let data = dir.path().join("names.json");
    fs::write(&data, r#"[{"name":"cart_add","type":"widget"}]"#).expect("write data");

    cnref(&store)
        .arg("--data")
        .arg(&data)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown codename type 'widget'"));
}

#[test]
fn snippets_are_saved_searched_and_cleared() {
    let dir = TempDir::new().expect("tempdir");
    let store = dir.path().join("prefs.json");

    let builtin = json_output(cnref(&store).args(["--format", "json", "snippet", "show", "data_fetch"]));
    assert_eq!(builtin[0]["description"], "Fetching user data from an API");

    let placeholder = json_output(cnref(&store).args(["--format", "json", "snippet", "show", "user_create"]));
    assert_eq!(placeholder[0]["generated"], true);

    cnref(&store)
        .args([
            "snippet",
            "add",
            "user_create",
            "--code",
            "const u = user_create();\nu.save();\nrender(u);",
            "-d",
            "Create and save",
        ])
        .assert()
        .success();

    let saved = json_output(cnref(&store).args(["--format", "json", "snippet", "show", "user_create"]));
    assert_eq!(saved.as_array().expect("array").len(), 1);
    assert!(saved[0]["timestamp"].as_u64().is_some());
    assert!(saved[0].get("generated").is_none());

    let focused = json_output(cnref(&store).args([
        "--format", "json", "snippet", "show", "user_create", "--line", "2", "-C", "0",
    ]));
    assert_eq!(focused[0]["context"]["code"], "u.save();");
    assert_eq!(focused[0]["context"]["highlight_line"], 0);

    let found = json_output(cnref(&store).args(["--format", "json", "snippet", "search", "u.save"]));
    assert!(found.get("user_create").is_some());

    cnref(&store).args(["snippet", "clear"]).assert().success();
    let cleared = json_output(cnref(&store).args(["--format", "json", "snippet", "show", "user_create"]));
    assert_eq!(cleared[0]["generated"], true);
}

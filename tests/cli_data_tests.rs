//! End-to-end tests for `cardcraft data` commands.

use serde_json::Value;
use std::fs;

mod fixtures;
use fixtures::*;

#[test]
fn test_data_export_blob_shape() {
    let dir = temp_data_dir();
    seed_template(dir.path(), "T1");
    seed_session(dir.path(), "S1");

    let output = run_in(dir.path(), &["data", "export"]);
    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let blob: Value =
        serde_json::from_slice(&output.stdout).expect("export should emit valid JSON");
    assert_eq!(blob["version"], "1.0");
    assert!(blob["exportedAt"].as_str().is_some());
    assert_eq!(blob["templates"].as_array().map(Vec::len), Some(1));
    assert_eq!(blob["sessions"].as_array().map(Vec::len), Some(1));
}

#[test]
fn test_data_export_then_import_into_fresh_store() {
    let source = temp_data_dir();
    seed_template(source.path(), "T1");
    seed_session(source.path(), "S1");

    let blob_path = source.path().join("export.json");
    let output = run_in(
        source.path(),
        &["data", "export", "--out", blob_path.to_str().expect("utf-8 path")],
    );
    assert_eq!(output.status.code(), Some(0));
    assert!(blob_path.exists());

    let target = temp_data_dir();
    let output = run_in(
        target.path(),
        &["data", "import", blob_path.to_str().expect("utf-8 path")],
    );
    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(String::from_utf8_lossy(&output.stdout).contains("1 template(s) and 1 session(s)"));

    // Re-importing the same blob adds nothing
    let output = run_in(
        target.path(),
        &["data", "import", blob_path.to_str().expect("utf-8 path")],
    );
    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("0 template(s) and 0 session(s)"));

    let output = run_in(target.path(), &["template", "list", "--json"]);
    let templates: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(templates.as_array().map(Vec::len), Some(1));
}

#[test]
fn test_data_import_malformed_blob_fails() {
    let dir = temp_data_dir();
    seed_template(dir.path(), "Survivor");

    let blob_path = dir.path().join("bad.json");
    fs::write(&blob_path, "{\"templates\": \"wrong\"}").expect("write blob");

    let output = run_in(
        dir.path(),
        &["data", "import", blob_path.to_str().expect("utf-8 path")],
    );
    assert_ne!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid data format"));

    // Existing data is untouched
    let output = run_in(dir.path(), &["template", "list", "--json"]);
    let templates: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(templates.as_array().map(Vec::len), Some(1));
}

#[test]
fn test_data_clear_requires_confirmation() {
    let dir = temp_data_dir();
    seed_template(dir.path(), "Keep Me");

    let output = run_in(dir.path(), &["data", "clear"]);
    assert_ne!(output.status.code(), Some(0));

    let output = run_in(dir.path(), &["template", "list", "--json"]);
    let templates: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(templates.as_array().map(Vec::len), Some(1));

    let output = run_in(dir.path(), &["data", "clear", "--yes"]);
    assert_eq!(output.status.code(), Some(0));

    let output = run_in(dir.path(), &["template", "list", "--json"]);
    let templates: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(templates.as_array().map(Vec::len), Some(0));
}

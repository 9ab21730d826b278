//! End-to-end tests for `cardcraft template` commands.

use serde_json::Value;

mod fixtures;
use fixtures::*;

#[test]
fn test_template_list_empty_store() {
    let dir = temp_data_dir();

    let output = run_in(dir.path(), &["template", "list"]);

    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("No templates"),
        "Output should indicate no templates: {stdout}"
    );
}

#[test]
fn test_template_new_then_list() {
    let dir = temp_data_dir();

    let output = run_in(
        dir.path(),
        &[
            "template",
            "new",
            "--name",
            "Feedback Card",
            "--category",
            "feedback",
            "--tags",
            "retro, workshop",
        ],
    );
    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Created template 'Feedback Card'"));

    let output = run_in(dir.path(), &["template", "list", "--json"]);
    assert_eq!(output.status.code(), Some(0));
    let templates: Value =
        serde_json::from_slice(&output.stdout).expect("list --json should emit valid JSON");
    let templates = templates.as_array().expect("JSON array");
    assert_eq!(templates.len(), 1);
    assert_eq!(templates[0]["name"], "Feedback Card");
    assert_eq!(templates[0]["category"], "feedback");
    assert_eq!(templates[0]["tags"][0], "retro");
    assert_eq!(templates[0]["tags"][1], "workshop");
    assert_eq!(templates[0]["isPublic"], false);
}

#[test]
fn test_template_show_emits_card_json() {
    let dir = temp_data_dir();
    let template = seed_template(dir.path(), "Intro Card");

    let output = run_in(dir.path(), &["template", "show", &template.id]);
    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let shown: Value =
        serde_json::from_slice(&output.stdout).expect("show should emit valid JSON");
    assert_eq!(shown["id"], template.id.as_str());
    assert_eq!(shown["card"]["name"], "Intro Card");
    // Elements keep the adjacently tagged wire shape
    let elements = shown["card"]["elements"].as_array().expect("elements array");
    assert_eq!(elements.len(), 3);
    assert_eq!(elements[0]["type"], "name-label");
    assert_eq!(elements[0]["properties"]["text"], "Name");
}

#[test]
fn test_template_show_unknown_id_fails() {
    let dir = temp_data_dir();

    let output = run_in(dir.path(), &["template", "show", "nope"]);
    assert_ne!(output.status.code(), Some(0));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Template not found"), "stderr: {stderr}");
}

#[test]
fn test_template_delete_removes_record() {
    let dir = temp_data_dir();
    let template = seed_template(dir.path(), "Short-lived");

    let output = run_in(dir.path(), &["template", "delete", &template.id]);
    assert_eq!(output.status.code(), Some(0));

    let output = run_in(dir.path(), &["template", "list", "--json"]);
    let templates: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(templates.as_array().map(Vec::len), Some(0));

    // Deleting again reports the miss
    let output = run_in(dir.path(), &["template", "delete", &template.id]);
    assert_ne!(output.status.code(), Some(0));
}

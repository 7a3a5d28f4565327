//! Integration tests for project commands

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn paperrank_cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("paperrank").unwrap();
    cmd.env("PAPERRANK_DB", dir.path().join("test.sqlite"))
        .env("PAPERRANK_CONFIG", dir.path().join("config.yml"))
        // Nothing listens here; any accidental network call fails fast
        .env("PAPERRANK_QDRANT_URL", "http://127.0.0.1:9")
        .env("PAPERRANK_LLM_URL", "http://127.0.0.1:9");
    cmd
}

fn create_project(dir: &TempDir, name: &str) -> String {
    let output = paperrank_cmd(dir)
        .args(["--format", "json", "project", "create", name])
        .args(["--context", "Robust optimisation for deep networks"])
        .args(["-q", "Does sharpness predict generalisation?"])
        .args(["-k", "sam", "-k", "flatness"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let project: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    project["id"].as_str().unwrap().to_string()
}

#[test]
fn test_project_create_and_list() {
    let dir = TempDir::new().unwrap();
    create_project(&dir, "Sharpness");
    create_project(&dir, "Pruning");

    paperrank_cmd(&dir)
        .args(["project", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sharpness (0 papers)"))
        .stdout(predicate::str::contains("Pruning (0 papers)"));
}

#[test]
fn test_project_show_json() {
    let dir = TempDir::new().unwrap();
    let id = create_project(&dir, "Sharpness");

    let output = paperrank_cmd(&dir)
        .args(["--format", "json", "project", "show", &id])
        .output()
        .unwrap();
    assert!(output.status.success());
    let project: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(project["name"], "Sharpness");
    assert_eq!(project["keywords"][1], "flatness");
    assert_eq!(project["paper_count"], 0);
}

#[test]
fn test_project_delete() {
    let dir = TempDir::new().unwrap();
    let id = create_project(&dir, "Short-lived");

    paperrank_cmd(&dir)
        .args(["project", "delete", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted project"));

    paperrank_cmd(&dir)
        .args(["project", "show", &id])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Project not found"));
}

#[test]
fn test_project_create_requires_name() {
    let dir = TempDir::new().unwrap();
    paperrank_cmd(&dir)
        .args(["project", "create", " "])
        .assert()
        .code(3);
}

#[test]
fn test_save_to_unknown_project() {
    let dir = TempDir::new().unwrap();
    paperrank_cmd(&dir)
        .args(["project", "save", "missing", "2401.00001v1"])
        .assert()
        .code(2);
}

#[test]
fn test_remove_unsaved_paper() {
    let dir = TempDir::new().unwrap();
    let id = create_project(&dir, "Sharpness");
    paperrank_cmd(&dir)
        .args(["project", "remove", &id, "2401.00001v1"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("is not saved to project"));
}

#[test]
fn test_papers_of_empty_project() {
    let dir = TempDir::new().unwrap();
    let id = create_project(&dir, "Sharpness");
    paperrank_cmd(&dir)
        .args(["project", "papers", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("No saved papers"));
}

#[test]
fn test_summarize_without_saved_papers() {
    let dir = TempDir::new().unwrap();
    let id = create_project(&dir, "Sharpness");
    paperrank_cmd(&dir)
        .args(["summarize", &id])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No papers saved"));
}

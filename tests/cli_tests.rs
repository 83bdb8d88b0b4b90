//! End-to-end tests for the `vgplan` binary
mod common;

use common::{setup_test_env, vgplan_command};
use predicates::prelude::*;
use serde_json::Value;
use std::path::Path;

fn run_json(db: &Path, args: &[&str]) -> Value {
    let output = vgplan_command(db).args(args).output().unwrap();
    assert!(
        output.status.success(),
        "{:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_cli_init_creates_database() {
    let (_temp_dir, db) = setup_test_env();

    vgplan_command(&db)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized"))
        .stdout(predicate::str::contains("0 phase(s), 0 task(s)"));

    assert!(db.exists());
}

#[test]
fn test_cli_db_flag_overrides_env() {
    let (temp_dir, db) = setup_test_env();
    let other = temp_dir.path().join("other.db");

    vgplan_command(&db)
        .arg("--db")
        .arg(&other)
        .arg("init")
        .assert()
        .success();

    assert!(other.exists());
    assert!(!db.exists());
}

#[test]
fn test_cli_log_file_receives_output() {
    let (temp_dir, db) = setup_test_env();
    let log = temp_dir.path().join("logs").join("vgplan.log");

    vgplan_command(&db)
        .arg("--verbose")
        .arg("--log-file")
        .arg(&log)
        .arg("init")
        .assert()
        .success();

    assert!(log.exists());
}

#[test]
fn test_cli_config_json() {
    let (_temp_dir, db) = setup_test_env();

    let config = run_json(&db, &["config", "--format", "json"]);
    assert_eq!(config["statuses"][0], "To Do");
    assert_eq!(config["statuses"][4], "Done");
    assert_eq!(config["priorities"].as_array().unwrap().len(), 3);
}

#[test]
fn test_cli_board_add_and_show() {
    let (_temp_dir, db) = setup_test_env();

    let task = run_json(
        &db,
        &[
            "board",
            "add",
            "Write release notes",
            "--priority",
            "High",
            "--due",
            "2025-06-30",
            "--format",
            "json",
        ],
    );
    assert_eq!(task["title"], "Write release notes");
    assert_eq!(task["status"], "To Do");
    assert_eq!(task["due_date"], "2025-06-30");

    vgplan_command(&db)
        .args(["board", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("To Do (1)"))
        .stdout(predicate::str::contains("Write release notes [High] due 2025-06-30"));

    let board = run_json(&db, &["board", "show", "--format", "json"]);
    assert_eq!(board["columns"].as_array().unwrap().len(), 5);
    assert_eq!(board["columns"][0]["tasks"][0]["id"], task["id"]);
}

#[test]
fn test_cli_board_move_and_drop() {
    let (_temp_dir, db) = setup_test_env();
    run_json(&db, &["board", "add", "Card", "--format", "json"]);

    vgplan_command(&db)
        .args(["board", "move", "1", "right"])
        .assert()
        .success()
        .stdout(predicate::str::contains("moved to 'In Progress'"));

    vgplan_command(&db)
        .args(["board", "move", "1", "left"])
        .assert()
        .success();
    vgplan_command(&db)
        .args(["board", "move", "1", "left"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already at the edge"));

    let moved = run_json(&db, &["board", "drop", "1", "done", "--format", "json"]);
    assert_eq!(moved["status"], "Done");

    let moved = run_json(&db, &["board", "drop", "1", "2", "--format", "json"]);
    assert_eq!(moved["status"], "Blocked");
}

#[test]
fn test_cli_board_edit() {
    let (_temp_dir, db) = setup_test_env();
    run_json(&db, &["board", "add", "Draft", "--due", "2025-01-01", "--format", "json"]);

    let task = run_json(
        &db,
        &[
            "board",
            "edit",
            "1",
            "--title",
            "Final",
            "--status",
            "In Review",
            "--clear-due",
            "--format",
            "json",
        ],
    );
    assert_eq!(task["title"], "Final");
    assert_eq!(task["status"], "In Review");
    assert!(task.get("due_date").is_none());
}

#[test]
fn test_cli_board_delete_with_yes() {
    let (_temp_dir, db) = setup_test_env();
    run_json(&db, &["board", "add", "Temporary", "--format", "json"]);

    vgplan_command(&db)
        .args(["board", "delete", "1", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted task #1"));

    vgplan_command(&db)
        .args(["board", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Temporary").not());
}

#[test]
fn test_cli_board_navigate() {
    let (_temp_dir, db) = setup_test_env();
    for title in ["one", "two", "three"] {
        run_json(&db, &["board", "add", title, "--format", "json"]);
    }

    let result = run_json(
        &db,
        &["board", "navigate", "down", "down", "down", "down", "enter", "--format", "json"],
    );
    assert_eq!(result["cursor"]["column"], 0);
    assert_eq!(result["cursor"]["task"], 0);
    assert_eq!(result["focused_task"]["title"], "one");
    assert_eq!(result["steps"][4]["outcome"], "open_editor");

    let result = run_json(
        &db,
        &["board", "navigate", "--task", "1", "ctrl+right", "--format", "json"],
    );
    assert_eq!(result["steps"][0]["outcome"], "task_moved");
    assert_eq!(result["focused_task"]["title"], "two");
    assert_eq!(result["focused_task"]["status"], "In Progress");
}

#[test]
fn test_cli_tree_build_and_show() {
    let (_temp_dir, db) = setup_test_env();

    let phase = run_json(
        &db,
        &["tree", "new", "root", "Discovery", "--skill-sets", "BA, SA", "--format", "json"],
    );
    assert_eq!(phase["kind"], "phase");
    let phase_id = phase["id"].as_i64().unwrap().to_string();

    let epic = run_json(
        &db,
        &["tree", "new", "phase", "Interviews", "--parent-id", &phase_id, "--format", "json"],
    );
    let epic_id = epic["id"].as_i64().unwrap().to_string();

    run_json(
        &db,
        &["tree", "new", "epic", "Schedule users", "--parent-id", &epic_id, "--format", "json"],
    );

    vgplan_command(&db)
        .args(["tree", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All Project Phases"))
        .stdout(predicate::str::contains("  Phase: Discovery"))
        .stdout(predicate::str::contains("    Epic: Interviews"))
        .stdout(predicate::str::contains("      Task: Schedule users"));

    // Hierarchy tasks land on the board
    vgplan_command(&db)
        .args(["board", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Schedule users"));
}

#[test]
fn test_cli_tree_edit_keeps_unspecified_fields() {
    let (_temp_dir, db) = setup_test_env();
    let phase = run_json(
        &db,
        &["tree", "new", "root", "Build", "--skill-sets", "Rust", "--format", "json"],
    );
    let id = phase["id"].as_i64().unwrap().to_string();

    let edited = run_json(
        &db,
        &["tree", "edit", "phase", &id, "--name", "Build & Test", "--format", "json"],
    );
    assert_eq!(edited["name"], "Build & Test");
    assert_eq!(edited["skill_sets"], "Rust");
    assert_eq!(edited["label"], "Phase: Build & Test");
}

#[test]
fn test_cli_tree_delete_rules() {
    let (_temp_dir, db) = setup_test_env();
    run_json(&db, &["tree", "new", "root", "P", "--format", "json"]);
    run_json(
        &db,
        &["tree", "new", "phase", "E", "--parent-id", "1", "--format", "json"],
    );

    vgplan_command(&db)
        .args(["tree", "delete", "phase", "1", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("delete them first"));

    vgplan_command(&db)
        .args(["tree", "delete", "epic", "1", "--yes"])
        .assert()
        .success();
    vgplan_command(&db)
        .args(["tree", "delete", "phase", "1", "--yes"])
        .assert()
        .success();

    vgplan_command(&db)
        .args(["tree", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Phase: P").not());
}

#[test]
fn test_cli_tree_form() {
    let (_temp_dir, db) = setup_test_env();
    run_json(
        &db,
        &["tree", "new", "root", "Discovery", "--skill-sets", "BA", "--format", "json"],
    );

    let form = run_json(&db, &["tree", "form", "edit", "phase", "1", "--format", "json"]);
    assert_eq!(form["title"], "Edit Phase");
    assert_eq!(form["form"]["name"], "Discovery");
    assert_eq!(form["form"]["skill_sets"], "BA");

    let form = run_json(&db, &["tree", "form", "new", "root", "--format", "json"]);
    assert_eq!(form["title"], "Create Phase");
    assert_eq!(form["kind"], "phase");

    let form = run_json(&db, &["tree", "form", "edit", "root", "--format", "json"]);
    assert!(form.is_null());
}

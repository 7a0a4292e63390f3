use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;

fn crewload_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("crewload"));
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

fn init_workspace() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    crewload_cmd()
        .arg("init")
        .current_dir(temp_dir.path())
        .assert()
        .success();
    temp_dir
}

/// Run a command with `--json` and parse its output.
fn run_json(dir: &Path, args: &[&str]) -> Value {
    let output = crewload_cmd()
        .args(args)
        .arg("--json")
        .current_dir(dir)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

fn add_member(dir: &Path, name: &str) -> String {
    run_json(dir, &["member", "add", name])["id"]
        .as_str()
        .unwrap()
        .to_string()
}

fn create_task(dir: &Path, title: &str, priority: &str, assignees: &[&str]) -> String {
    let mut args = vec!["task", "create", title, "--priority", priority];
    for &assignee in assignees {
        args.extend(["--assignee", assignee]);
    }
    run_json(dir, &args)["id"].as_str().unwrap().to_string()
}

// =============================================================================
// Basic CLI
// =============================================================================

#[test]
fn test_help() {
    crewload_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("workload"));
}

#[test]
fn test_version() {
    crewload_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("crewload"));
}

#[test]
fn test_not_initialized_error() {
    let temp_dir = TempDir::new().unwrap();

    crewload_cmd()
        .arg("scores")
        .current_dir(temp_dir.path())
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("not initialized")
                .or(predicate::str::contains("Failed to load")),
        );
}

// =============================================================================
// Initialization
// =============================================================================

#[test]
fn test_init_creates_config() {
    let temp_dir = TempDir::new().unwrap();

    crewload_cmd()
        .arg("init")
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized"));

    assert!(temp_dir.path().join(".crewload.toml").exists());
    assert!(temp_dir.path().join(".crewload").join("members").exists());
    assert!(temp_dir.path().join(".crewload").join("goals").exists());
}

#[test]
fn test_init_twice_fails() {
    let temp_dir = init_workspace();

    crewload_cmd()
        .arg("init")
        .current_dir(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("already initialized"));
}

#[test]
fn test_commands_work_from_subdirectory() {
    let temp_dir = init_workspace();
    let nested = temp_dir.path().join("deep").join("inside");
    std::fs::create_dir_all(&nested).unwrap();

    add_member(&nested, "Ada");

    crewload_cmd()
        .args(["member", "list"])
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Ada"));
}

// =============================================================================
// Records
// =============================================================================

#[test]
fn test_member_add_and_list() {
    let temp_dir = init_workspace();
    let ada = add_member(temp_dir.path(), "Ada");
    assert!(ada.starts_with("m-"));

    crewload_cmd()
        .args(["member", "add", "Visitor", "--guest"])
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Added"));

    let members = run_json(temp_dir.path(), &["member", "list"]);
    let members = members.as_array().unwrap();
    assert_eq!(members.len(), 2);
    assert!(members.iter().any(|m| m["name"] == "Visitor" && m["team"] == false));
}

#[test]
fn test_task_with_unknown_assignee_is_rejected() {
    let temp_dir = init_workspace();

    crewload_cmd()
        .args(["task", "create", "Orphan", "--assignee", "m-nobody"])
        .current_dir(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_task_lifecycle() {
    let temp_dir = init_workspace();
    let ada = add_member(temp_dir.path(), "Ada");
    let task = create_task(temp_dir.path(), "Write docs", "high", &[ada.as_str()]);

    crewload_cmd()
        .args(["task", "done", task.as_str()])
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Done"));

    let shown = run_json(temp_dir.path(), &["task", "show", task.as_str()]);
    assert_eq!(shown["status"], "done");
    assert!(shown["completed"].is_string());

    // Done tasks are hidden unless --all
    let open = run_json(temp_dir.path(), &["task", "list"]);
    assert!(open.as_array().unwrap().is_empty());
    let all = run_json(temp_dir.path(), &["task", "list", "--all"]);
    assert_eq!(all.as_array().unwrap().len(), 1);

    crewload_cmd()
        .args(["task", "reopen", task.as_str()])
        .current_dir(temp_dir.path())
        .assert()
        .success();
    let shown = run_json(temp_dir.path(), &["task", "show", task.as_str()]);
    assert_eq!(shown["status"], "open");
}

#[test]
fn test_show_unknown_task() {
    let temp_dir = init_workspace();

    crewload_cmd()
        .args(["task", "show", "t-missing"])
        .current_dir(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not found"));
}

// =============================================================================
// Scoring and assignment
// =============================================================================

#[test]
fn test_scores_reflect_open_work() {
    let temp_dir = init_workspace();
    let ada = add_member(temp_dir.path(), "Ada");
    let grace = add_member(temp_dir.path(), "Grace");
    for title in ["One", "Two", "Three"] {
        create_task(temp_dir.path(), title, "medium", &[ada.as_str()]);
    }

    let scores = run_json(temp_dir.path(), &["scores"]);
    assert_eq!(scores[&ada], 3);
    assert_eq!(scores[&grace], 0);
}

#[test]
fn test_guests_are_not_scored() {
    let temp_dir = init_workspace();
    add_member(temp_dir.path(), "Ada");
    crewload_cmd()
        .args(["member", "add", "Visitor", "--guest"])
        .current_dir(temp_dir.path())
        .assert()
        .success();

    let scores = run_json(temp_dir.path(), &["scores"]);
    assert_eq!(scores.as_object().unwrap().len(), 1);
}

#[test]
fn test_review_assigns_least_loaded_member() {
    let temp_dir = init_workspace();
    let ada = add_member(temp_dir.path(), "Ada");
    let grace = add_member(temp_dir.path(), "Grace");
    create_task(temp_dir.path(), "Busy", "critical", &[ada.as_str()]);
    let review = create_task(temp_dir.path(), "Review me", "low", &[]);

    let result = run_json(temp_dir.path(), &["review", review.as_str()]);
    assert_eq!(result["reviewer"], grace.as_str());

    let task = run_json(temp_dir.path(), &["task", "show", review.as_str()]);
    assert_eq!(task["assignees"][0], grace.as_str());

    // Running it again on the same state changes nothing
    let again = run_json(temp_dir.path(), &["review", review.as_str()]);
    assert_eq!(again["reviewer"], grace.as_str());
    let task = run_json(temp_dir.path(), &["task", "show", review.as_str()]);
    assert_eq!(task["assignees"].as_array().unwrap().len(), 1);
}

#[test]
fn test_review_without_team_assigns_nobody() {
    let temp_dir = init_workspace();
    let review = create_task(temp_dir.path(), "Review me", "low", &[]);

    crewload_cmd()
        .args(["review", review.as_str()])
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("nobody assigned"));
}

#[test]
fn test_rebalance_assigns_orphaned_goals() {
    let temp_dir = init_workspace();
    let ada = add_member(temp_dir.path(), "Ada");
    let grace = add_member(temp_dir.path(), "Grace");
    for title in ["Grow", "Ship", "Hire", "Learn"] {
        run_json(temp_dir.path(), &["goal", "create", title]);
    }

    let dry = run_json(temp_dir.path(), &["rebalance", "--dry-run"]);
    assert_eq!(dry["assigned"], 4);
    assert_eq!(dry["dry_run"], true);
    let goals = run_json(temp_dir.path(), &["goal", "list"]);
    assert!(goals.as_array().unwrap().iter().all(|g| g["assignee"].is_null()));

    let outcome = run_json(temp_dir.path(), &["rebalance"]);
    assert_eq!(outcome["assigned"], 4);
    let scores = run_json(temp_dir.path(), &["scores"]);
    assert_eq!(scores[&ada], 2);
    assert_eq!(scores[&grace], 2);
}

#[test]
fn test_rebalance_evens_out_goal_load() {
    let temp_dir = init_workspace();
    let ada = add_member(temp_dir.path(), "Ada");
    let grace = add_member(temp_dir.path(), "Grace");
    for i in 0..6 {
        run_json(
            temp_dir.path(),
            &["goal", "create", &format!("Goal {}", i), "--assignee", ada.as_str()],
        );
    }

    let outcome = run_json(temp_dir.path(), &["rebalance"]);
    assert_eq!(outcome["rebalanced"], 2);

    let scores = run_json(temp_dir.path(), &["scores"]);
    let gap = scores[&ada].as_i64().unwrap() - scores[&grace].as_i64().unwrap();
    assert!(gap.abs() <= 2);
}

#[test]
fn test_held_lock_blocks_mutations() {
    let temp_dir = init_workspace();
    add_member(temp_dir.path(), "Ada");
    let review = create_task(temp_dir.path(), "Review me", "low", &[]);
    std::fs::write(temp_dir.path().join(".crewload").join(".lock"), "rebalance (pid 1)").unwrap();

    crewload_cmd()
        .args(["review", review.as_str()])
        .current_dir(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("locked"));

    crewload_cmd()
        .arg("unlock")
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed"));

    crewload_cmd()
        .args(["review", review.as_str()])
        .current_dir(temp_dir.path())
        .assert()
        .success();
}

#[test]
fn test_unreadable_member_file_fails_rebalance() {
    let temp_dir = init_workspace();
    let ada = add_member(temp_dir.path(), "Ada");
    add_member(temp_dir.path(), "Grace");
    for title in ["Grow", "Ship"] {
        run_json(
            temp_dir.path(),
            &["goal", "create", title, "--assignee", ada.as_str()],
        );
    }
    let members_dir = temp_dir.path().join(".crewload").join("members");
    let ada_file = std::fs::read_dir(&members_dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .find(|path| path.to_string_lossy().contains(ada.as_str()))
        .unwrap();
    std::fs::write(&ada_file, "+++\nid = \n+++\n").unwrap();

    crewload_cmd()
        .arg("rebalance")
        .current_dir(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains(ada.as_str()));

    let goals = run_json(temp_dir.path(), &["goal", "list"]);
    for goal in goals.as_array().unwrap() {
        assert_eq!(goal["assignee"].as_str(), Some(ada.as_str()));
    }
}

// =============================================================================
// Reports
// =============================================================================

#[test]
fn test_breakdown_totals_match_scores() {
    let temp_dir = init_workspace();
    let ada = add_member(temp_dir.path(), "Ada");
    create_task(temp_dir.path(), "Fix", "high", &[ada.as_str()]);
    run_json(
        temp_dir.path(),
        &["project", "create", "Platform", "--owner", ada.as_str()],
    );

    let breakdown = run_json(temp_dir.path(), &["breakdown"]);
    assert_eq!(breakdown[0]["member_id"], ada.as_str());
    assert_eq!(breakdown[0]["total"], 4);
    assert_eq!(breakdown[0]["items"].as_array().unwrap().len(), 2);
}

#[test]
fn test_daily_counts_todays_work() {
    let temp_dir = init_workspace();
    let ada = add_member(temp_dir.path(), "Ada");
    create_task(temp_dir.path(), "Fix", "high", &[ada.as_str()]);

    let report = run_json(temp_dir.path(), &["daily", "--days", "1"]);
    assert_eq!(report[&ada]["today_plus"], 2);
    assert_eq!(report[&ada]["today_minus"], 0);
    assert_eq!(report[&ada]["today_net"], 2);
    assert_eq!(report[&ada]["avg_daily_plus"], 2.0);
}

#[test]
fn test_daily_rejects_empty_window() {
    let temp_dir = init_workspace();

    crewload_cmd()
        .args(["daily", "--days", "0"])
        .current_dir(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 1"));
}

// =============================================================================
// GraphQL
// =============================================================================

#[test]
fn test_query_scores() {
    let temp_dir = init_workspace();
    add_member(temp_dir.path(), "Ada");

    crewload_cmd()
        .args(["query", "{ scores { memberId score } }"])
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"score\": 0"));
}

#[test]
fn test_mutate_rebalance_dry_run() {
    let temp_dir = init_workspace();
    add_member(temp_dir.path(), "Ada");
    run_json(temp_dir.path(), &["goal", "create", "Grow"]);

    crewload_cmd()
        .args(["mutate", "rebalanceGoals(dryRun: true) { assigned dryRun }"])
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"assigned\": 1"));
}

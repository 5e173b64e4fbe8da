use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper function to create a temporary directory for CLI tests
fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Command running offline against the database in `temp_dir`, with plain
/// output.
fn synapse_cmd(temp_dir: &TempDir) -> Command {
    let db_path = temp_dir.path().join("cli_test.db");
    let mut cmd = Command::cargo_bin("synapse").expect("Failed to find synapse binary");
    cmd.current_dir(temp_dir.path())
        .env_remove("OPENAI_API_KEY")
        .args(["--demo", "--no-color", "--database-file"])
        .arg(db_path);
    cmd
}

/// Creates a plan and returns its ID.
fn create_plan(temp_dir: &TempDir, topic: &str) -> String {
    let output = synapse_cmd(temp_dir)
        .args(["plan", "new", topic])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    extract_id_from_output(&String::from_utf8(output).expect("Invalid UTF-8"))
}

#[test]
fn test_cli_create_plan_offline() {
    let temp_dir = create_cli_test_environment();

    synapse_cmd(&temp_dir)
        .args(["plan", "new", "Organic chemistry", "--level", "advanced"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created plan with ID: 1"))
        .stdout(predicate::str::contains("# 1. Organic chemistry"))
        .stdout(predicate::str::contains("### 1. Orientation and key vocabulary"))
        .stdout(predicate::str::contains("Offline template used"));
}

#[test]
fn test_cli_create_plan_rejects_zero_minutes() {
    let temp_dir = create_cli_test_environment();

    synapse_cmd(&temp_dir)
        .args(["plan", "new", "Music theory", "--minutes", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to create plan"));
}

#[test]
fn test_cli_list_empty_plans() {
    let temp_dir = create_cli_test_environment();

    synapse_cmd(&temp_dir)
        .args(["plan", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No plans found."));
}

#[test]
fn test_cli_list_is_per_user() {
    let temp_dir = create_cli_test_environment();
    create_plan(&temp_dir, "Ancient history");

    // No subcommand lists plans
    synapse_cmd(&temp_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("# Plans"))
        .stdout(predicate::str::contains("## Ancient history (ID: 1) 0% [offline]"));

    synapse_cmd(&temp_dir)
        .args(["--user", "someone-else", "plan", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No plans found."));
}

#[test]
fn test_cli_show_and_rename_plan() {
    let temp_dir = create_cli_test_environment();
    let plan_id = create_plan(&temp_dir, "Astronomy");

    synapse_cmd(&temp_dir)
        .args(["plan", "rename", &plan_id, "Astrophysics"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Renamed from 'Astronomy' to 'Astrophysics'"));

    synapse_cmd(&temp_dir)
        .args(["plan", "show", &plan_id])
        .assert()
        .success()
        .stdout(predicate::str::contains("# 1. Astrophysics"))
        .stdout(predicate::str::contains("## Review"));
}

#[test]
fn test_cli_foreign_plan_is_read_only() {
    let temp_dir = create_cli_test_environment();
    let plan_id = create_plan(&temp_dir, "Sculpture");

    synapse_cmd(&temp_dir)
        .args(["--user", "visitor", "plan", "show", &plan_id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Read-only"));

    synapse_cmd(&temp_dir)
        .args(["--user", "visitor", "step", "status", &plan_id, "1", "done"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("read-only"));
}

#[test]
fn test_cli_delete_requires_confirmation() {
    let temp_dir = create_cli_test_environment();
    let plan_id = create_plan(&temp_dir, "Botany");

    synapse_cmd(&temp_dir)
        .args(["plan", "delete", &plan_id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--confirm"));

    synapse_cmd(&temp_dir)
        .args(["plan", "delete", &plan_id, "--confirm"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted plan 'Botany' (ID: 1)"));

    synapse_cmd(&temp_dir)
        .args(["plan", "show", &plan_id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Plan with ID 1 not found"));
}

#[test]
fn test_cli_expand_keeps_full_plan() {
    let temp_dir = create_cli_test_environment();
    let plan_id = create_plan(&temp_dir, "Geology");

    synapse_cmd(&temp_dir)
        .args(["plan", "expand", &plan_id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Kept plan 1"));
}

#[test]
fn test_cli_step_explain_and_exercises() {
    let temp_dir = create_cli_test_environment();
    let plan_id = create_plan(&temp_dir, "Statistics");

    synapse_cmd(&temp_dir)
        .args(["step", "explain", &plan_id, "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## Foundations"))
        .stdout(predicate::str::contains("Step 2 of 9"));

    synapse_cmd(&temp_dir)
        .args(["step", "exercises", &plan_id, "2", "--refresh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## Quiz"))
        .stdout(predicate::str::contains("Length: 100 to 140 words"));
}

#[test]
fn test_cli_step_out_of_range() {
    let temp_dir = create_cli_test_environment();
    let plan_id = create_plan(&temp_dir, "Logic");

    synapse_cmd(&temp_dir)
        .args(["step", "explain", &plan_id, "42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
}

#[test]
fn test_cli_status_and_progress() {
    let temp_dir = create_cli_test_environment();
    let plan_id = create_plan(&temp_dir, "Economics");

    synapse_cmd(&temp_dir)
        .args(["step", "status", &plan_id, "1", "done"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Step 1 is now ✓ Done"))
        .stdout(predicate::str::contains("11% complete"));

    synapse_cmd(&temp_dir)
        .args(["step", "status", &plan_id, "2", "doing"])
        .assert()
        .success();

    synapse_cmd(&temp_dir)
        .args(["progress", &plan_id])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. Orientation and key vocabulary (✓ Done)"))
        .stdout(predicate::str::contains("2. Foundations (➤ Doing)"))
        .stdout(predicate::str::contains("3. Guided examples (○ To-do)"));
}

#[test]
fn test_cli_check_answers() {
    let temp_dir = create_cli_test_environment();
    let plan_id = create_plan(&temp_dir, "Genetics");

    synapse_cmd(&temp_dir)
        .args([
            "step", "check", &plan_id, "1", "--answers", "A,B", "--text", "far too short",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("## Score:"))
        .stdout(predicate::str::contains("3 words, at least 100 required"));

    synapse_cmd(&temp_dir)
        .args(["step", "check", &plan_id, "1", "--answers", "Z"])
        .assert()
        .failure();
}

#[test]
fn test_cli_due_dates_and_today() {
    let temp_dir = create_cli_test_environment();
    let plan_id = create_plan(&temp_dir, "Philosophy");

    synapse_cmd(&temp_dir)
        .args(["step", "due", &plan_id, "3", "2026-04-01", "--note", "Read Kant"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Due: 2026-04-01"))
        .stdout(predicate::str::contains("Read Kant"));

    synapse_cmd(&temp_dir)
        .args(["today", "--date", "2026-04-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## Philosophy"))
        .stdout(predicate::str::contains("3. Guided examples, due 2026-04-01 (2 days overdue)"));

    synapse_cmd(&temp_dir)
        .args(["today", "--date", "2026-03-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing due today."));
}

#[test]
fn test_cli_map_writes_svg() {
    let temp_dir = create_cli_test_environment();
    let plan_id = create_plan(&temp_dir, "Graph theory");
    let output = temp_dir.path().join("map.svg");

    synapse_cmd(&temp_dir)
        .args(["map", &plan_id, "--style", "tiered", "--highlight", "1", "--output"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote tiered"));

    let svg = std::fs::read_to_string(&output).expect("Failed to read map");
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("Graph theory"));
}

#[test]
fn test_cli_map_default_file_name() {
    let temp_dir = create_cli_test_environment();
    let plan_id = create_plan(&temp_dir, "Typography");

    synapse_cmd(&temp_dir)
        .args(["map", &plan_id, "--style", "radial"])
        .assert()
        .success();

    assert!(temp_dir.path().join("plan-1-radial.svg").exists());
}

#[test]
fn test_cli_tutor_offline() {
    let temp_dir = create_cli_test_environment();
    let plan_id = create_plan(&temp_dir, "Calculus");

    synapse_cmd(&temp_dir)
        .args(["tutor", &plan_id, "What is a limit?"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Q: What is a limit?"))
        .stdout(predicate::str::contains("Offline answer"));
}

/// Extracts the plan ID from a "# <id>. <topic>" header.
fn extract_id_from_output(output: &str) -> String {
    for line in output.lines() {
        if let Some(stripped) = line.strip_prefix("# ") {
            if let Some((id, _)) = stripped.split_once('.') {
                if !id.is_empty() && id.chars().all(|c| c.is_ascii_digit()) {
                    return id.to_string();
                }
            }
        }
    }
    panic!("Could not find plan ID in output:\n{output}")
}

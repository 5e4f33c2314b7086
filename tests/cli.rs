//! End-to-end tests of the `leitner` binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn leitner(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("leitner").unwrap();
    cmd.env("LEITNER_DATA_DIR", data_dir.path());
    cmd.env_remove("LEITNER_LOG");
    cmd
}

/// Add a card and return its short id
fn add_card(data_dir: &TempDir, leitner_box: &str, question: &str) -> String {
    let output = leitner(data_dir)
        .args(["card", "add", leitner_box, question])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    stdout
        .lines()
        .find_map(|line| line.trim().strip_prefix("ID: "))
        .unwrap()
        .to_string()
}

#[test]
fn test_init_creates_config() {
    let dir = TempDir::new().unwrap();

    leitner(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized Leitner"));

    assert!(dir.path().join("config.json").exists());
    assert!(dir.path().join("data").join("boxes.json").exists());

    leitner(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already initialized"));
}

#[test]
fn test_box_lifecycle() {
    let dir = TempDir::new().unwrap();

    leitner(&dir)
        .args(["box", "create", "Spanish"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ID: box-1"));

    leitner(&dir)
        .args(["box", "create", "spanish"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    leitner(&dir)
        .args(["box", "interval", "Spanish", "3", "10"])
        .assert()
        .success();

    leitner(&dir)
        .args(["box", "show", "box-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("10d"))
        .stdout(predicate::str::contains("26d"));

    leitner(&dir)
        .args(["box", "policy", "Spanish", "restart"])
        .assert()
        .success()
        .stdout(predicate::str::contains("back to level 1"));

    leitner(&dir)
        .args(["box", "rename", "Spanish", "Español"])
        .assert()
        .success();

    leitner(&dir)
        .args(["box", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Español"));
}

#[test]
fn test_interval_rejects_zero_days() {
    let dir = TempDir::new().unwrap();
    leitner(&dir).args(["box", "create", "Spanish"]).assert().success();

    leitner(&dir)
        .args(["box", "interval", "Spanish", "2", "0"])
        .assert()
        .failure();

    leitner(&dir)
        .args(["box", "interval", "Spanish", "14", "3"])
        .assert()
        .failure();
}

#[test]
fn test_card_commands() {
    let dir = TempDir::new().unwrap();
    leitner(&dir).args(["box", "create", "Spanish"]).assert().success();
    leitner(&dir).args(["box", "create", "German"]).assert().success();

    let id = add_card(&dir, "Spanish", "hola");

    leitner(&dir)
        .args(["card", "list", "Spanish"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hola"));

    leitner(&dir)
        .args(["card", "favorite", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Marked as favorite"));

    leitner(&dir)
        .args(["card", "favorites", "Spanish"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hola"));

    leitner(&dir)
        .args(["card", "complete", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("level 1 -> 13 (completed)"));

    leitner(&dir)
        .args(["card", "move", &id, "German"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Moved to German"));

    leitner(&dir)
        .args(["card", "show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("German"))
        .stdout(predicate::str::contains("Passed:   never"));

    leitner(&dir)
        .args(["card", "delete", &id])
        .assert()
        .success();

    leitner(&dir)
        .args(["card", "show", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_review_session() {
    let dir = TempDir::new().unwrap();
    leitner(&dir).args(["box", "create", "Spanish"]).assert().success();
    add_card(&dir, "Spanish", "uno");
    add_card(&dir, "Spanish", "dos");

    leitner(&dir)
        .args(["review", "Spanish", "--level", "1"])
        .write_stdin("p\np\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Reviewed 2 cards: 2 passed, 0 failed"));

    // Both cards wait two days at level 2
    leitner(&dir)
        .args(["review", "Spanish"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to review"));

    leitner(&dir)
        .args(["card", "list", "Spanish", "--level", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("in 2 days"));

    leitner(&dir)
        .args(["audit", "-n", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pass: level 1 -> 2"));
}

#[test]
fn test_delete_box_requires_force() {
    let dir = TempDir::new().unwrap();
    leitner(&dir).args(["box", "create", "Spanish"]).assert().success();
    add_card(&dir, "Spanish", "uno");

    leitner(&dir)
        .args(["box", "delete", "Spanish"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--force"));

    leitner(&dir)
        .args(["box", "delete", "Spanish", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 cards removed"));

    leitner(&dir)
        .args(["box", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No boxes found."));
}

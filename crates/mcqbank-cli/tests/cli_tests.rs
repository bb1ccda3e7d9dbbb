//! CLI integration tests using assert_cmd.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const HEADER: &str = "Subject,Chapter,Question,OptionA,OptionB,OptionC,OptionD,Answer\n";

/// A command isolated in `dir`: no user config, no env override.
fn mcqbank(dir: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("mcqbank").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env_remove("MCQBANK_DATA_FILE")
        .env_remove("RUST_LOG");
    cmd
}

fn add(dir: &Path, subject: &str, chapter: &str, question: &str, answer: &str) {
    mcqbank(dir)
        .args(["add", "--subject", subject, "--chapter", chapter])
        .args(["--question", question])
        .args(["--option-a", "alpha", "--option-b", "beta"])
        .args(["--option-c", "gamma", "--option-d", "delta"])
        .args(["--answer", answer])
        .assert()
        .success();
}

fn seeded() -> TempDir {
    let dir = TempDir::new().unwrap();
    add(dir.path(), "Math", "Algebra", "First algebra question", "A");
    add(dir.path(), "Physics", "Optics", "What bends light?", "B");
    add(dir.path(), "Math", "Algebra", "Second algebra question", "B");
    add(dir.path(), "Math", "Geometry", "How many sides has a triangle?", "C");
    add(dir.path(), "Math", "Algebra", "Third algebra question", "C");
    dir
}

fn data(dir: &Path) -> String {
    std::fs::read_to_string(dir.join("questions.csv")).unwrap()
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    mcqbank(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created mcqbank.toml"))
        .stdout(predicate::str::contains("Created questions.csv"));

    assert!(dir.path().join("mcqbank.toml").exists());
    assert_eq!(data(dir.path()), HEADER);
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();
    mcqbank(dir.path()).arg("init").assert().success();

    mcqbank(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn init_honours_config_path() {
    let dir = TempDir::new().unwrap();

    mcqbank(dir.path())
        .args(["--config", "setup/custom.toml", "init"])
        .assert()
        .success();

    assert!(dir.path().join("setup").join("custom.toml").exists());
    assert_eq!(
        std::fs::read_to_string(dir.path().join("setup").join("questions.csv")).unwrap(),
        HEADER
    );
    assert!(!dir.path().join("mcqbank.toml").exists());
    assert!(!dir.path().join("questions.csv").exists());

    mcqbank(dir.path())
        .args(["--config", "setup/custom.toml", "subjects"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No subjects found"));
}

#[test]
fn subjects_on_empty_store() {
    let dir = TempDir::new().unwrap();
    mcqbank(dir.path())
        .arg("subjects")
        .assert()
        .success()
        .stdout(predicate::str::contains("No subjects found"));
    assert!(!dir.path().join("questions.csv").exists());
}

#[test]
fn add_writes_canonical_rows() {
    let dir = TempDir::new().unwrap();
    mcqbank(dir.path())
        .args(["add", "--subject", " Math ", "--chapter", "Algebra"])
        .args(["--question", "x, y or z?"])
        .args(["--option-a", "x", "--option-b", "y", "--option-c", "z", "--option-d", "none"])
        .args(["--answer", "d"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Question added as Q1 in Math > Algebra."));

    assert_eq!(
        data(dir.path()),
        format!("{HEADER}Math,Algebra,\"x, y or z?\",x,y,z,none,D\n")
    );
}

#[test]
fn add_rejects_empty_question() {
    let dir = seeded();
    let before = data(dir.path());

    mcqbank(dir.path())
        .args(["add", "--subject", "Math", "--chapter", "Algebra"])
        .args(["--question", "   "])
        .args(["--option-a", "a", "--option-b", "b", "--option-c", "c", "--option-d", "d"])
        .args(["--answer", "A"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("question must not be empty"));

    assert_eq!(data(dir.path()), before);
}

#[test]
fn add_rejects_unknown_answer() {
    let dir = TempDir::new().unwrap();
    mcqbank(dir.path())
        .args(["add", "--subject", "Math", "--chapter", "Algebra", "--question", "q"])
        .args(["--option-a", "a", "--option-b", "b", "--option-c", "c", "--option-d", "d"])
        .args(["--answer", "E"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("answer must be one of A, B, C, D"));
}

#[test]
fn subjects_and_chapters_are_sorted() {
    let dir = seeded();

    mcqbank(dir.path())
        .arg("subjects")
        .assert()
        .success()
        .stdout("Math\nPhysics\n");

    mcqbank(dir.path())
        .args(["chapters", "--subject", "Math"])
        .assert()
        .success()
        .stdout("Algebra\nGeometry\n");

    mcqbank(dir.path())
        .args(["chapters", "--subject", "Chemistry"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No chapters found"));
}

#[test]
fn list_shows_chapter_questions_in_order() {
    let dir = seeded();

    let output = mcqbank(dir.path())
        .args(["list", "--subject", "Math", "--chapter", "Algebra"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 question(s)"))
        .stdout(predicate::str::contains("triangle").not())
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(output).unwrap();
    let first = text.find("First algebra question").unwrap();
    let third = text.find("Third algebra question").unwrap();
    assert!(first < third);
}

#[test]
fn list_unknown_chapter_is_empty_not_an_error() {
    let dir = seeded();
    mcqbank(dir.path())
        .args(["list", "--subject", "Physics", "--chapter", "Mechanics"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No questions added yet."));
}

#[test]
fn edit_changes_only_given_fields() {
    let dir = seeded();

    mcqbank(dir.path())
        .args(["edit", "--subject", "Math", "--chapter", "Algebra", "--number", "2"])
        .args(["--question", "Edited question", "--answer", "d"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Changes saved to Q2."));

    let rows: Vec<String> = data(dir.path()).lines().map(String::from).collect();
    assert_eq!(rows.len(), 6);
    assert_eq!(rows[3], "Math,Algebra,Edited question,alpha,beta,gamma,delta,D");
    assert_eq!(rows[1], "Math,Algebra,First algebra question,alpha,beta,gamma,delta,A");
    assert_eq!(rows[5], "Math,Algebra,Third algebra question,alpha,beta,gamma,delta,C");
}

#[test]
fn edit_leaves_hand_written_fields_alone() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("questions.csv"),
        format!("{HEADER}Math,Algebra,old,x,,z,\"  padded  \",A\n"),
    )
    .unwrap();

    mcqbank(dir.path())
        .args(["edit", "--subject", "Math", "--chapter", "Algebra", "--number", "1"])
        .args(["--question", "new"])
        .assert()
        .success();

    let content = data(dir.path());
    assert!(content.starts_with(&format!("{HEADER}Math,Algebra,new,x,,z,")));
    assert!(content.contains("  padded  "));
}

#[test]
fn edit_unknown_number_fails() {
    let dir = seeded();
    let before = data(dir.path());

    mcqbank(dir.path())
        .args(["edit", "--subject", "Math", "--chapter", "Algebra", "--number", "4"])
        .args(["--question", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no question Q4"));

    assert_eq!(data(dir.path()), before);
}

#[test]
fn delete_removes_one_question() {
    let dir = seeded();

    mcqbank(dir.path())
        .args(["delete", "--subject", "Math", "--chapter", "Algebra", "--number", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Question Q1 deleted."));

    let content = data(dir.path());
    assert!(!content.contains("First algebra question"));
    assert_eq!(content.lines().count(), 5);

    mcqbank(dir.path())
        .args(["list", "--subject", "Math", "--chapter", "Algebra"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 question(s)"));
}

#[test]
fn malformed_store_is_reported() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("questions.csv"), format!("{HEADER}Math,Algebra,q\n")).unwrap();

    mcqbank(dir.path())
        .arg("subjects")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read question store"));
}

#[test]
fn quiz_scores_answers_from_stdin() {
    let dir = TempDir::new().unwrap();
    for i in 0..3 {
        add(dir.path(), "Math", "Algebra", &format!("Question {i}"), "B");
    }

    mcqbank(dir.path())
        .args(["quiz", "--subject", "Math", "--chapter", "Algebra", "--count", "3"])
        .write_stdin("b\nn\na\nn\nb\ns\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Question 1 of 3"))
        .stdout(predicate::str::contains("Your Score: 2/3"));
}

#[test]
fn quiz_defaults_to_configured_size() {
    let dir = TempDir::new().unwrap();
    for i in 0..4 {
        add(dir.path(), "Math", "Algebra", &format!("Question {i}"), "A");
    }
    std::fs::write(dir.path().join("mcqbank.toml"), "default_quiz_size = 2\n").unwrap();

    mcqbank(dir.path())
        .args(["quiz", "--subject", "Math", "--chapter", "Algebra"])
        .write_stdin("q\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Question 1 of 2"))
        .stdout(predicate::str::contains("Back to main menu."));
}

#[test]
fn quiz_rejects_oversized_count() {
    let dir = seeded();
    mcqbank(dir.path())
        .args(["quiz", "--subject", "Math", "--chapter", "Algebra", "--count", "4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("between 1 and 3"));
}

#[test]
fn quiz_on_empty_chapter() {
    let dir = seeded();
    mcqbank(dir.path())
        .args(["quiz", "--subject", "Physics", "--chapter", "Optics2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No questions available"));
}

#[test]
fn data_flag_and_env_select_the_store() {
    let dir = TempDir::new().unwrap();
    let custom = dir.path().join("nested").join("bank.csv");

    mcqbank(dir.path())
        .arg("--data")
        .arg(&custom)
        .args(["add", "--subject", "Math", "--chapter", "Algebra", "--question", "q"])
        .args(["--option-a", "a", "--option-b", "b", "--option-c", "c", "--option-d", "d"])
        .args(["--answer", "A"])
        .assert()
        .success();
    assert!(custom.exists());
    assert!(!dir.path().join("questions.csv").exists());

    mcqbank(dir.path())
        .env("MCQBANK_DATA_FILE", &custom)
        .arg("subjects")
        .assert()
        .success()
        .stdout("Math\n");
}

#[test]
fn missing_config_file_fails() {
    let dir = TempDir::new().unwrap();
    mcqbank(dir.path())
        .args(["--config", "nope.toml", "subjects"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn help_output() {
    let dir = TempDir::new().unwrap();
    mcqbank(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Multiple-choice study quiz manager"));
}

#[test]
fn version_output() {
    let dir = TempDir::new().unwrap();
    mcqbank(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("mcqbank"));
}

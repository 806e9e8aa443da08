use crate::common::command::{get_branch_tip, repository_dir, run_trove_command, trove_commit};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn root_commit(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    run_trove_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    write_file(FileSpec::new(
        repository_dir.path().join("a.txt"),
        "hello".to_string(),
    ));
    run_trove_command(repository_dir.path(), &["add", "a.txt"])
        .assert()
        .success();

    trove_commit(repository_dir.path(), "Initial commit\n\nWith a body")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("[main (root-commit) "))
        .stdout(predicate::str::ends_with("] Initial commit\n"));

    let tip = get_branch_tip(repository_dir.path(), "main").expect("main has a commit");
    let record = run_trove_command(repository_dir.path(), &["cat-file", "-p", &tip])
        .assert()
        .success();
    let record = String::from_utf8(record.get_output().stdout.clone())?;

    // the fixed commit date is 2023-01-01 12:00:00 UTC
    assert!(record.starts_with("timestamp 1672574400 +0000\n"));
    assert!(!record.contains("parent "));
    assert!(record.ends_with("\nInitial commit\n\nWith a body\n"));

    Ok(())
}

#[rstest]
fn committing_empties_the_staging_area(repository_dir: TempDir) {
    run_trove_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    write_file(FileSpec::new(
        repository_dir.path().join("a.txt"),
        "hello".to_string(),
    ));
    run_trove_command(repository_dir.path(), &["add", "a.txt"])
        .assert()
        .success();
    trove_commit(repository_dir.path(), "first").assert().success();

    trove_commit(repository_dir.path(), "second")
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing to commit"));
}

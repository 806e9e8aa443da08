use crate::common::command::{get_branch_tip, init_repository_dir, run_trove_command};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn clone_copies_the_repository(init_repository_dir: TempDir) {
    let target = TempDir::new().expect("Failed to create temp dir");
    let destination = target.path().join("copy");
    let destination_arg = destination.to_str().expect("temp paths are UTF-8");

    run_trove_command(init_repository_dir.path(), &["clone", destination_arg])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(format!(
            "Cloned repository to {destination_arg} ("
        )));

    assert_eq!(
        std::fs::read_to_string(destination.join("a/b/3.txt")).unwrap(),
        "three"
    );
    assert_eq!(
        get_branch_tip(&destination, "main"),
        get_branch_tip(init_repository_dir.path(), "main")
    );

    run_trove_command(&destination, &["log", "--oneline"])
        .assert()
        .success()
        .stdout(predicate::str::ends_with(" Initial commit\n"));
}

#[rstest]
fn clone_into_an_existing_destination_fails(init_repository_dir: TempDir) {
    let target = TempDir::new().expect("Failed to create temp dir");
    let destination_arg = target.path().to_str().expect("temp paths are UTF-8");

    run_trove_command(init_repository_dir.path(), &["clone", destination_arg])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[rstest]
fn clone_into_the_repository_itself_fails(init_repository_dir: TempDir) {
    run_trove_command(init_repository_dir.path(), &["clone", "inner"])
        .assert()
        .failure();

    assert!(!init_repository_dir.path().join("inner").exists());
}

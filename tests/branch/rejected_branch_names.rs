use crate::common::command::{init_repository_dir, run_trove_command};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn creating_an_existing_branch_fails(init_repository_dir: TempDir) {
    run_trove_command(init_repository_dir.path(), &["branch", "main"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("branch 'main' already exists"));
}

#[rstest]
#[case("bad..name")]
#[case("ends.lock")]
#[case("with space")]
#[case("/leading")]
#[case("trailing/")]
#[case("HEAD")]
fn invalid_branch_names_are_rejected(init_repository_dir: TempDir, #[case] name: &str) {
    run_trove_command(init_repository_dir.path(), &["branch", name])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid branch name"));

    assert!(!init_repository_dir.path().join(".trove/refs").join(name).exists());
}

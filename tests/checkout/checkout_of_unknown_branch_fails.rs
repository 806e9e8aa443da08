use crate::common::command::{get_current_branch, init_repository_dir, run_trove_command};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn checkout_of_unknown_branch_fails(init_repository_dir: TempDir) {
    run_trove_command(init_repository_dir.path(), &["checkout", "nowhere"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("branch 'nowhere' does not exist"));

    assert_eq!(get_current_branch(init_repository_dir.path()), "main");
}

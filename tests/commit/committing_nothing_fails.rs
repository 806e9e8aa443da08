use crate::common::command::{
    get_branch_tip, init_repository_dir, repository_dir, run_trove_command, trove_commit,
};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn committing_nothing_fails(repository_dir: TempDir) {
    run_trove_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    trove_commit(repository_dir.path(), "empty")
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing to commit"));

    assert_eq!(get_branch_tip(repository_dir.path(), "main"), None);
}

#[rstest]
fn failed_commit_keeps_the_existing_tip(init_repository_dir: TempDir) {
    let tip = get_branch_tip(init_repository_dir.path(), "main");

    trove_commit(init_repository_dir.path(), "empty")
        .assert()
        .failure();

    assert_eq!(get_branch_tip(init_repository_dir.path(), "main"), tip);
}

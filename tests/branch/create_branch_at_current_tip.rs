use crate::common::command::{
    get_branch_tip, init_repository_dir, repository_dir, run_trove_command,
};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn create_branch_at_current_tip(init_repository_dir: TempDir) {
    let tip = get_branch_tip(init_repository_dir.path(), "main").expect("main has a commit");

    run_trove_command(init_repository_dir.path(), &["branch", "feature"])
        .assert()
        .success()
        .stdout(format!("Created branch feature at {}\n", &tip[..7]));

    assert_eq!(get_branch_tip(init_repository_dir.path(), "feature"), Some(tip));
}

#[rstest]
fn hierarchical_branch_names_nest_under_refs(init_repository_dir: TempDir) {
    run_trove_command(init_repository_dir.path(), &["branch", "feature/login"])
        .assert()
        .success();

    assert!(
        init_repository_dir
            .path()
            .join(".trove/refs/feature/login")
            .is_file()
    );
    pretty_assertions::assert_eq!(
        get_branch_tip(init_repository_dir.path(), "feature/login"),
        get_branch_tip(init_repository_dir.path(), "main")
    );
}

#[rstest]
fn branch_created_before_any_commit_has_no_tip(repository_dir: TempDir) {
    run_trove_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    run_trove_command(repository_dir.path(), &["branch", "early"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Created branch early (no commits yet)",
        ));

    assert_eq!(get_branch_tip(repository_dir.path(), "early"), None);
}

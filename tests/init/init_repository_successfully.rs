use crate::common::command::{get_branch_tip, get_current_branch, repository_dir, run_trove_command};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn init_repository_successfully(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir_absolute_path = repository_dir.path().canonicalize()?.display().to_string();

    run_trove_command(repository_dir.path(), &["init"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Initialized empty trove repository in",
        ))
        .stdout(predicate::str::contains(dir_absolute_path));

    let trove_dir = repository_dir.path().join(".trove");
    assert!(trove_dir.join("objects").is_dir());
    assert!(trove_dir.join("index").is_file());
    assert_eq!(std::fs::read_to_string(trove_dir.join("ignore"))?, ".trove\n");

    assert_eq!(get_current_branch(repository_dir.path()), "main");
    assert_eq!(get_branch_tip(repository_dir.path(), "main"), None);

    Ok(())
}

#[rstest]
fn init_at_a_new_path_creates_it(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    run_trove_command(repository_dir.path(), &["init", "nested/project"])
        .assert()
        .success();

    let project = repository_dir.path().join("nested").join("project");
    assert_eq!(get_current_branch(&project), "main");

    Ok(())
}

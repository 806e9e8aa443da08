use crate::common::command::{repository_dir, run_trove_command};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
#[case(&["add", "x.txt"])]
#[case(&["commit", "-m", "msg"])]
#[case(&["log"])]
#[case(&["branch"])]
fn commands_outside_a_repository_fail(
    repository_dir: TempDir,
    #[case] args: &[&str],
) -> Result<(), Box<dyn std::error::Error>> {
    run_trove_command(repository_dir.path(), args)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a trove repository"));

    assert!(!repository_dir.path().join(".trove").exists());

    Ok(())
}

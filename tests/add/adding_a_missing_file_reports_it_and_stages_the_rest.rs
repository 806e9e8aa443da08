use crate::common::command::{repository_dir, run_trove_command, trove_commit};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn adding_a_missing_file_reports_it_and_stages_the_rest(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_trove_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    write_file(FileSpec::new(
        repository_dir.path().join("present.txt"),
        "here".to_string(),
    ));

    run_trove_command(repository_dir.path(), &["add", "ghost.txt", "present.txt"])
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "Added 1 file(s) to the staging area",
        ))
        .stderr(predicate::str::contains("ghost.txt does not exist"));

    // the file that did exist was staged and can be committed
    trove_commit(repository_dir.path(), "partial")
        .assert()
        .success();

    Ok(())
}

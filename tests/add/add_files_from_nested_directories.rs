use crate::common::command::{repository_dir, run_trove_command, trove_commit};
use crate::common::file::{FileSpec, write_file, write_generated_files};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn add_files_from_nested_directories(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_trove_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    let nested = repository_dir.path().join("src").join("deep");
    let generated = write_generated_files(&nested, 3);
    write_file(FileSpec::new(
        repository_dir.path().join("top.txt"),
        "top".to_string(),
    ));

    run_trove_command(repository_dir.path(), &["add", "."])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Added 4 file(s) to the staging area",
        ));

    // every staged file ends up in the commit record
    trove_commit(repository_dir.path(), "nested")
        .assert()
        .success();
    let record = run_trove_command(repository_dir.path(), &["cat-file", "-p", "HEAD"])
        .assert()
        .success();
    let record = String::from_utf8(record.get_output().stdout.clone())?;

    assert!(record.contains(" top.txt\n"));
    for file in generated {
        let relative = file.path.strip_prefix(repository_dir.path())?;
        assert!(
            record.contains(&format!(" {}\n", relative.display())),
            "{} missing from {record}",
            relative.display()
        );
    }
    assert!(!record.contains(".trove"));

    Ok(())
}

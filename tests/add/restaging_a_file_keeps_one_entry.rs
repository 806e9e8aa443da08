use crate::common::command::{repository_dir, run_trove_command, trove_commit};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
fn restaging_a_file_keeps_one_entry(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_trove_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    let file = repository_dir.path().join("a.txt");
    write_file(FileSpec::new(file.clone(), "first".to_string()));
    run_trove_command(repository_dir.path(), &["add", "a.txt"])
        .assert()
        .success();

    write_file(FileSpec::new(file, "second".to_string()));
    run_trove_command(repository_dir.path(), &["add", "a.txt"])
        .assert()
        .success();

    trove_commit(repository_dir.path(), "restaged")
        .assert()
        .success();

    let expected_digest = run_trove_command(repository_dir.path(), &["hash-object", "a.txt"])
        .assert()
        .success();
    let expected_digest = String::from_utf8(expected_digest.get_output().stdout.clone())?;

    let record = run_trove_command(repository_dir.path(), &["cat-file", "-p", "HEAD"])
        .assert()
        .success();
    let record = String::from_utf8(record.get_output().stdout.clone())?;
    let file_lines = record
        .lines()
        .filter(|line| line.starts_with("file "))
        .collect::<Vec<_>>();

    pretty_assertions::assert_eq!(
        file_lines,
        vec![format!("file {} a.txt", expected_digest.trim())]
    );

    Ok(())
}

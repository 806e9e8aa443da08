use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

pub const COMMIT_DATE: &str = "2023-01-01 12:00:00 +0000";

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// Initialized repository whose `main` holds one commit with three files
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_trove_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    write_file(FileSpec::new(
        repository_dir.path().join("1.txt"),
        "one".to_string(),
    ));
    write_file(FileSpec::new(
        repository_dir.path().join("a").join("2.txt"),
        "two".to_string(),
    ));
    write_file(FileSpec::new(
        repository_dir.path().join("a").join("b").join("3.txt"),
        "three".to_string(),
    ));

    run_trove_command(repository_dir.path(), &["add", "."])
        .assert()
        .success();

    trove_commit(repository_dir.path(), "Initial commit")
        .assert()
        .success();

    repository_dir
}

/// Initialized repository with four commits on `main`, one new file each
#[fixture]
pub fn repository_with_multiple_commits(repository_dir: TempDir) -> TempDir {
    run_trove_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    for (i, message) in ["First", "Second", "Third", "Fourth"].iter().enumerate() {
        write_file(FileSpec::new(
            repository_dir.path().join(format!("file{}.txt", i + 1)),
            format!("content {}", i + 1),
        ));
        run_trove_command(repository_dir.path(), &["add", "."])
            .assert()
            .success();
        trove_commit(repository_dir.path(), &format!("{message} commit"))
            .assert()
            .success();
    }

    repository_dir
}

pub fn run_trove_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("trove").expect("Failed to find trove binary");
    cmd.envs(vec![("NO_PAGER", "1")]);
    cmd.env_remove("TROVE_COMMIT_DATE");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn trove_commit(dir: &Path, message: &str) -> Command {
    let mut cmd = run_trove_command(dir, &["commit", "-m", message]);
    cmd.env("TROVE_COMMIT_DATE", COMMIT_DATE); // %Y-%m-%d %H:%M:%S %z
    cmd
}

/// Stage `paths` and commit them in one go
pub fn add_and_commit(dir: &Path, paths: &[&str], message: &str) -> String {
    let mut args = vec!["add"];
    args.extend_from_slice(paths);
    run_trove_command(dir, &args).assert().success();

    trove_commit(dir, message).assert().success();

    get_branch_tip(dir, &get_current_branch(dir)).expect("branch has a tip after committing")
}

pub fn get_current_branch(dir: &Path) -> String {
    std::fs::read_to_string(dir.join(".trove").join("HEAD"))
        .expect("Failed to read HEAD")
        .trim()
        .to_string()
}

/// Tip digest of a branch, `None` while it has no commits
pub fn get_branch_tip(dir: &Path, branch: &str) -> Option<String> {
    let content = std::fs::read_to_string(dir.join(".trove").join("refs").join(branch))
        .unwrap_or_else(|e| panic!("Failed to read ref {branch}: {e}"));
    let content = content.trim();

    (!content.is_empty()).then(|| content.to_string())
}

/// Parent digest of a commit, read through `cat-file -p`
pub fn get_parent_commit_id(dir: &Path, commit_id: &str) -> Option<String> {
    let output = run_trove_command(dir, &["cat-file", "-p", commit_id])
        .output()
        .expect("Failed to run cat-file");
    let stdout = String::from_utf8(output.stdout).expect("commit records are UTF-8");

    stdout
        .lines()
        .find_map(|line| line.strip_prefix("parent "))
        .map(str::to_string)
}

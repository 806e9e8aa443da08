use crate::common::command::{add_and_commit, repository_dir, run_trove_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use rstest::{fixture, rstest};

/// `main` holds a.txt and b.txt; `feature` adds c.txt and edits b.txt on top
#[fixture]
fn diverged_repository(repository_dir: TempDir) -> TempDir {
    let dir = repository_dir.path();
    run_trove_command(dir, &["init"]).assert().success();

    write_file(FileSpec::new(dir.join("a.txt"), "x".to_string()));
    write_file(FileSpec::new(dir.join("b.txt"), "y".to_string()));
    add_and_commit(dir, &["a.txt", "b.txt"], "first");

    run_trove_command(dir, &["branch", "feature"])
        .assert()
        .success();
    run_trove_command(dir, &["checkout", "feature"])
        .assert()
        .success();

    write_file(FileSpec::new(dir.join("c.txt"), "z".to_string()));
    add_and_commit(dir, &["c.txt"], "second");

    repository_dir
}

#[rstest]
fn new_file_on_a_branch_is_the_only_change(diverged_repository: TempDir) {
    run_trove_command(diverged_repository.path(), &["diff", "main", "feature"])
        .assert()
        .success()
        .stdout("Diff between main and feature:\nAdded: c.txt\n");
}

#[rstest]
fn swapping_the_sides_reports_a_removal(diverged_repository: TempDir) {
    run_trove_command(diverged_repository.path(), &["diff", "feature", "main"])
        .assert()
        .success()
        .stdout("Diff between feature and main:\nRemoved: c.txt\n");
}

#[rstest]
#[case("A", "Added: c.txt\n")]
#[case("M", "Modified: b.txt\n")]
#[case("AM", "Modified: b.txt\nAdded: c.txt\n")]
#[case("D", "")]
fn diff_filter_limits_the_reported_kinds(
    diverged_repository: TempDir,
    #[case] filter: &str,
    #[case] expected: &str,
) {
    let dir = diverged_repository.path();
    write_file(FileSpec::new(dir.join("b.txt"), "y, edited".to_string()));
    add_and_commit(dir, &["b.txt"], "third");

    let filter_arg = format!("--diff-filter={filter}");
    run_trove_command(dir, &["diff", "main", "feature", &filter_arg])
        .assert()
        .success()
        .stdout(format!("Diff between main and feature:\n{expected}"));
}

#[rstest]
fn unknown_diff_filter_is_rejected(diverged_repository: TempDir) {
    run_trove_command(
        diverged_repository.path(),
        &["diff", "main", "feature", "--diff-filter=X"],
    )
    .assert()
    .failure();
}

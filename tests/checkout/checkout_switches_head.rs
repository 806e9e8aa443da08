use crate::common::command::{
    add_and_commit, get_branch_tip, get_current_branch, init_repository_dir, run_trove_command,
};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
fn checkout_switches_head(init_repository_dir: TempDir) {
    run_trove_command(init_repository_dir.path(), &["branch", "feature"])
        .assert()
        .success();

    run_trove_command(init_repository_dir.path(), &["checkout", "feature"])
        .assert()
        .success()
        .stdout("Switched to branch 'feature'\n");
    assert_eq!(get_current_branch(init_repository_dir.path()), "feature");

    run_trove_command(init_repository_dir.path(), &["checkout", "feature"])
        .assert()
        .success()
        .stdout("Already on 'feature'\n");
}

#[rstest]
fn commits_after_checkout_advance_the_new_branch(init_repository_dir: TempDir) {
    let main_tip = get_branch_tip(init_repository_dir.path(), "main");
    run_trove_command(init_repository_dir.path(), &["branch", "feature"])
        .assert()
        .success();
    run_trove_command(init_repository_dir.path(), &["checkout", "feature"])
        .assert()
        .success();

    write_file(FileSpec::new(
        init_repository_dir.path().join("c.txt"),
        "c".to_string(),
    ));
    let feature_tip = add_and_commit(init_repository_dir.path(), &["c.txt"], "on feature");

    assert_eq!(get_branch_tip(init_repository_dir.path(), "main"), main_tip);
    assert_ne!(Some(feature_tip), main_tip);
}

#[rstest]
fn checkout_leaves_working_files_alone(init_repository_dir: TempDir) {
    run_trove_command(init_repository_dir.path(), &["branch", "other"])
        .assert()
        .success();
    write_file(FileSpec::new(
        init_repository_dir.path().join("1.txt"),
        "edited but not staged".to_string(),
    ));

    run_trove_command(init_repository_dir.path(), &["checkout", "other"])
        .assert()
        .success();

    assert_eq!(
        std::fs::read_to_string(init_repository_dir.path().join("1.txt")).unwrap(),
        "edited but not staged"
    );
}

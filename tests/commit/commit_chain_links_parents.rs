use crate::common::command::{
    get_branch_tip, get_parent_commit_id, repository_with_multiple_commits,
};
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
fn commit_chain_links_parents(repository_with_multiple_commits: TempDir) {
    let dir = repository_with_multiple_commits.path();
    let mut chain = vec![];
    let mut current = get_branch_tip(dir, "main");

    while let Some(oid) = current {
        current = get_parent_commit_id(dir, &oid);
        chain.push(oid);
    }

    assert_eq!(chain.len(), 4);
    let unique = chain.iter().collect::<std::collections::HashSet<_>>();
    assert_eq!(unique.len(), 4);
}

mod commit_chain_links_parents;
mod committing_nothing_fails;
mod root_commit;

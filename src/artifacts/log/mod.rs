//! Commit history traversal
//!
//! - `rev_list`: Parent-link walk from a tip commit to the root, used by `log`
//!   and by anything else that needs to see a branch's history

pub mod rev_list;

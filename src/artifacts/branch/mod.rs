//! Branch names and revision parsing
//!
//! - `branch_name`: Validated branch names
//! - `revision`: Revision expressions (`main`, `@`, `main^`, `main~2`, digests)

pub mod branch_name;
pub mod revision;

/// Branch checked out by a freshly initialized repository
pub const DEFAULT_BRANCH: &str = "main";

/// Name that always stands for the current branch
pub const HEAD_REF_NAME: &str = "HEAD";

pub const INVALID_BRANCH_NAME_REGEX: &str =
    r"^\.|\/\.|\.\.|^\/|\/$|\.lock$|@\{|[\x00-\x20\*:\?\[\\~\^\x7f]";
pub const PARENT_REGEX: &str = r"^(.+)\^$";
pub const ANCESTOR_REGEX: &str = r"^(.+)\~(\d+)$";
pub const REF_ALIASES: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "@" => "HEAD",
};

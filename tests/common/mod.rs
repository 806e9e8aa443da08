#![allow(dead_code)]

pub mod command;
pub mod file;

/// Every 64-character lowercase hex token in `output`
pub fn find_digests(output: &str) -> Vec<String> {
    let re = regex::Regex::new(r"\b[0-9a-f]{64}\b").expect("valid digest regex");
    re.find_iter(output)
        .map(|m| m.as_str().to_string())
        .collect()
}

//! Ignore rules
//!
//! `add` consults an [`IgnorePredicate`] before staging a path. The default
//! predicate reads `.trove/ignore`: one glob pattern per line, blank lines and
//! `#` comments skipped. A pattern matches a path when it matches the path itself
//! or any of its parent directories, so `build` also ignores `build/out.o`.
//! Wildcards cross directory separators: `*.log` ignores `nested/app.log` too.

use anyhow::Context;
use glob::{MatchOptions, Pattern};
use std::path::Path;

/// Decides whether a workspace-relative path is left out of staging
pub trait IgnorePredicate {
    fn should_ignore(&self, path: &Path) -> bool;
}

impl<F> IgnorePredicate for F
where
    F: Fn(&Path) -> bool,
{
    fn should_ignore(&self, path: &Path) -> bool {
        self(path)
    }
}

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

#[derive(Debug, Clone, Default)]
pub struct IgnoreRules {
    patterns: Vec<Pattern>,
}

impl IgnoreRules {
    pub fn parse(content: &str) -> Self {
        let patterns = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(|line| match Pattern::new(line.trim_end_matches('/')) {
                Ok(pattern) => Some(pattern),
                Err(err) => {
                    tracing::warn!(pattern = line, %err, "skipping invalid ignore pattern");
                    None
                }
            })
            .collect();

        IgnoreRules { patterns }
    }

    /// Load rules from an ignore file; a missing file means no rules
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read ignore file {:?}", path))?;

        Ok(Self::parse(&content))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl IgnorePredicate for IgnoreRules {
    fn should_ignore(&self, path: &Path) -> bool {
        path.ancestors()
            .filter(|candidate| !candidate.as_os_str().is_empty())
            .any(|candidate| {
                self.patterns
                    .iter()
                    .any(|pattern| pattern.matches_path_with(candidate, MATCH_OPTIONS))
            })
    }
}

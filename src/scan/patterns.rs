// src/scan/patterns.rs

use anyhow::{Context, Result};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

/// Patterns added by [`crate::scan::Scanner::add_default_excludes`]:
/// version-control metadata and editor droppings.
pub const DEFAULT_EXCLUDES: &[&str] = &[
    // Miscellaneous typical temporary files
    "**/*~",
    "**/#*#",
    "**/.#*",
    "**/%*%",
    "**/._*",
    "**/.DS_Store",
    // CVS
    "**/CVS",
    "**/CVS/**",
    "**/.cvsignore",
    // Subversion
    "**/.svn",
    "**/.svn/**",
    // Bazaar
    "**/.bzr",
    "**/.bzr/**",
    // Mercurial
    "**/.hg",
    "**/.hg/**",
    "**/.hgignore",
    // git
    "**/.git",
    "**/.git/**",
    "**/.gitignore",
    "**/.gitattributes",
    "**/.gitmodules",
];

/// Normalize an Ant-style pattern for glob compilation.
///
/// Backslashes become `/`, and a trailing `/` matches everything below it
/// (`src/` is `src/**`).
pub fn normalize_pattern(pattern: &str) -> String {
    let mut pat = pattern.trim().replace('\\', "/");
    if pat.ends_with('/') {
        pat.push_str("**");
    }
    pat
}

/// Compiled include/exclude filter over `/`-separated relative paths.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    include_set: GlobSet,
    exclude_set: Option<GlobSet>,
}

impl PatternMatcher {
    /// Compile the given patterns. No includes means "everything".
    pub fn new(includes: &[String], excludes: &[String]) -> Result<Self> {
        let include_set = if includes.is_empty() {
            build_globset(&["**".to_string()])?
        } else {
            build_globset(includes).context("building include globset")?
        };

        let exclude_set = if excludes.is_empty() {
            None
        } else {
            Some(build_globset(excludes).context("building exclude globset")?)
        };

        Ok(Self {
            include_set,
            exclude_set,
        })
    }

    pub fn is_included(&self, rel_path: &str) -> bool {
        if !self.include_set.is_match(rel_path) {
            return false;
        }
        if let Some(exclude) = &self.exclude_set {
            if exclude.is_match(rel_path) {
                return false;
            }
        }
        true
    }
}

/// Build a GlobSet where `*` and `?` never cross a `/`.
fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        let glob = GlobBuilder::new(pat)
            .literal_separator(true)
            .build()
            .with_context(|| format!("invalid glob pattern: {pat}"))?;
        builder.add(glob);
    }
    Ok(builder.build()?)
}

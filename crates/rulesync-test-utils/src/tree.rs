//! [`CanonicalTree`] builder for canonical source layouts.

use crate::TestRepo;
use rulesync_fs::MemoryFs;

/// Default base directory for in-memory trees.
pub const DEFAULT_BASE: &str = "/repo";

/// A set of canonical (and optionally native) files under one base
/// directory, built into a [`MemoryFs`] or written to a [`TestRepo`].
///
/// # Example
///
/// ```rust
/// use rulesync_test_utils::CanonicalTree;
///
/// let fs = CanonicalTree::new()
///     .root_rule("# Project\n")
///     .rule("ts.md", "globs: [\"**/*.ts\"]", "Strict.\n")
///     .ignore(&["dist/"])
///     .build();
/// assert!(fs.get("/repo/.rulesync/rules/ts.md").is_some());
/// ```
#[derive(Debug, Clone)]
pub struct CanonicalTree {
    base: String,
    files: Vec<(String, String)>,
}

impl Default for CanonicalTree {
    fn default() -> Self {
        Self::new()
    }
}

impl CanonicalTree {
    pub fn new() -> Self {
        Self::at(DEFAULT_BASE)
    }

    pub fn at(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            files: Vec::new(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Any file, relative to the base directory.
    pub fn file(mut self, relative_path: &str, content: impl Into<String>) -> Self {
        self.files.push((relative_path.to_string(), content.into()));
        self
    }

    /// `.rulesync/rules/<name>` with raw YAML frontmatter lines.
    pub fn rule(self, name: &str, frontmatter: &str, body: &str) -> Self {
        let content = if frontmatter.is_empty() {
            body.to_string()
        } else {
            format!("---\n{frontmatter}\n---\n\n{body}")
        };
        self.file(&format!(".rulesync/rules/{name}"), content)
    }

    /// `.rulesync/rules/overview.md` marked as the root rule.
    pub fn root_rule(self, body: &str) -> Self {
        self.rule("overview.md", "root: true", body)
    }

    /// `.rulesync/commands/<name>` with a description.
    pub fn command(self, name: &str, description: &str, body: &str) -> Self {
        self.file(
            &format!(".rulesync/commands/{name}"),
            format!("---\ndescription: {description}\n---\n\n{body}"),
        )
    }

    /// `.rulesyncignore` with one pattern per line.
    pub fn ignore(self, patterns: &[&str]) -> Self {
        let content: String = patterns.iter().map(|p| format!("{p}\n")).collect();
        self.file(".rulesyncignore", content)
    }

    /// `.rulesync/.mcp.json` with raw JSON.
    pub fn mcp(self, json: &str) -> Self {
        self.file(".rulesync/.mcp.json", json)
    }

    /// Build an in-memory filesystem holding the tree under [`Self::base`].
    pub fn build(&self) -> MemoryFs {
        let fs = MemoryFs::new();
        for (relative, content) in &self.files {
            fs.insert(format!("{}/{relative}", self.base), content.clone());
        }
        fs
    }

    /// Write the tree into a fresh temporary directory (ignoring [`Self::base`]).
    pub fn materialize(&self) -> TestRepo {
        let repo = TestRepo::new();
        for (relative, content) in &self.files {
            repo.write(relative, content);
        }
        repo
    }
}

//! Classification heuristics.
//!
//! Pure, order-sensitive functions that resolve ambiguous native structure
//! into one canonical variant, and the inverse functions that choose a native
//! representation for a canonical rule. Each tool's heuristic lives in its
//! own module with its precedence documented on the function.

pub mod augment;
pub mod cursor;
pub mod kiro;
pub mod permissions;
pub mod windsurf;

use rulesync_meta::RuleFrontmatter;

/// Glob a canonical rule uses to mean "every file".
pub const ALL_FILES_GLOB: &str = "**/*";

/// Whether a canonical rule is meant to be active everywhere: the root rule
/// or a rule whose only glob is [`ALL_FILES_GLOB`].
pub fn applies_everywhere(frontmatter: &RuleFrontmatter) -> bool {
    frontmatter.root || (frontmatter.globs.len() == 1 && frontmatter.globs[0] == ALL_FILES_GLOB)
}

/// `vec!["**/*"]`
pub fn all_files() -> Vec<String> {
    vec![ALL_FILES_GLOB.to_string()]
}

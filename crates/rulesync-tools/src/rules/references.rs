//! Reference sections in root memory files.
//!
//! Tools that only read one root file (`CLAUDE.md`, `AGENTS.md`, ...) learn
//! about the other rules through a list appended to that file:
//!
//! ```markdown
//! Please also reference the following documents as needed:
//!
//! - @.claude/memories/typescript.md: TypeScript conventions (applies to: **/*.ts)
//! ```

use super::{NativeRuleMeta, RuleAdapter, ToolRule};
use rulesync_fs::NormalizedPath;
use rulesync_meta::{FileLocation, RulesyncRule};

/// First line of every reference section.
pub const MARKER: &str = "Please also reference the following documents as needed:";

/// Render the section for the given non-root rules.
///
/// `entries` pairs each rule's native path (relative to the base directory)
/// with its canonical rule.
pub fn render_section(entries: &[(String, &RulesyncRule)]) -> String {
    let mut out = format!("{MARKER}\n\n");
    for (path, rule) in entries {
        out.push_str(&format!("- @{path}"));
        let description = rule.frontmatter.description.trim();
        if !description.is_empty() {
            out.push_str(&format!(": {description}"));
        }
        if !rule.frontmatter.globs.is_empty() {
            out.push_str(&format!(" (applies to: {})", rule.frontmatter.globs.join(", ")));
        }
        out.push('\n');
    }
    out
}

/// Remove a reference section (marker line and everything after it).
pub fn strip(body: &str) -> String {
    let start = body
        .match_indices(MARKER)
        .map(|(idx, _)| idx)
        .find(|&idx| idx == 0 || body[..idx].ends_with('\n'));
    match start {
        None => body.to_string(),
        Some(idx) => {
            let kept = body[..idx].trim_end();
            if kept.is_empty() {
                String::new()
            } else {
                format!("{kept}\n")
            }
        }
    }
}

/// Append the section to the root native rule, creating a root file that
/// holds only the section when the collection has no root rule.
///
/// `rules` and `natives` are parallel; nothing is appended when there are
/// no non-root rules.
pub(super) fn attach(
    adapter: &RuleAdapter,
    rules: &[RulesyncRule],
    mut natives: Vec<ToolRule>,
    base_dir: &NormalizedPath,
) -> Vec<ToolRule> {
    let Some(root_file) = adapter.root_file else {
        return natives;
    };

    let entries: Vec<(String, &RulesyncRule)> = rules
        .iter()
        .zip(&natives)
        .filter(|(_, native)| !native.root)
        .map(|(rule, native)| (native.location.relative_path(), rule))
        .collect();
    if entries.is_empty() {
        return natives;
    }
    let section = render_section(&entries);

    match natives.iter_mut().find(|native| native.root) {
        Some(root) => {
            let body = root.body.trim_end();
            root.body = if body.is_empty() {
                section
            } else {
                format!("{body}\n\n{section}")
            };
        }
        None => natives.insert(
            0,
            ToolRule {
                target: adapter.target,
                location: FileLocation::from_relative(base_dir.clone(), root_file),
                root: true,
                meta: NativeRuleMeta::Plain,
                body: section,
            },
        ),
    }
    natives
}

//! Claude Code `permissions.deny` ↔ ignore patterns.
//!
//! Claude Code expresses file exclusion indirectly through permission
//! strings shaped `Verb(pattern)`. Only `Edit`/`Read` entries carry file
//! patterns; everything else (`Bash(...)`, `WebFetch`, `mcp__*`, bare tool
//! names) is kept as an inert passthrough note.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static PERMISSION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z_][A-Za-z0-9_\-]*)(?:\((.*)\))?$").expect("valid regex")
});

/// Deny rules always written ahead of user patterns.
pub const SECURITY_DEFAULTS: &[&str] = &[
    "Read(.env*)",
    "Edit(.env*)",
    "Read(*.key)",
    "Edit(*.key)",
    "Read(*.pem)",
    "Edit(*.pem)",
    "Bash(rm -rf:*)",
    "Bash(sudo:*)",
    "Bash(git push --force:*)",
];

/// Verb of a permission entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verb {
    Edit,
    Read,
    Bash,
    WebFetch,
    /// `mcp__server__tool` style entries
    Mcp(String),
    /// Any other tool name
    Tool(String),
}

/// A parsed permission string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permission {
    pub verb: Verb,
    pub pattern: Option<String>,
}

impl Permission {
    pub fn parse(entry: &str) -> Self {
        let entry = entry.trim();
        let Some(caps) = PERMISSION_REGEX.captures(entry) else {
            return Self {
                verb: Verb::Tool(entry.to_string()),
                pattern: None,
            };
        };

        let name = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        let verb = match name {
            "Edit" => Verb::Edit,
            "Read" => Verb::Read,
            "Bash" => Verb::Bash,
            "WebFetch" => Verb::WebFetch,
            mcp if mcp.starts_with("mcp__") => Verb::Mcp(mcp.to_string()),
            other => Verb::Tool(other.to_string()),
        };
        let pattern = caps
            .get(2)
            .map(|m| m.as_str().trim().to_string())
            .filter(|p| !p.is_empty());

        Self { verb, pattern }
    }

    /// The file pattern, for `Edit`/`Read` entries only.
    pub fn file_pattern(&self) -> Option<&str> {
        match self.verb {
            Verb::Edit | Verb::Read => self.pattern.as_deref(),
            _ => None,
        }
    }
}

/// Split deny entries into ignore patterns and passthrough notes.
///
/// Entries equal to one of the [`SECURITY_DEFAULTS`] are skipped, since
/// [`to_deny`] writes them back on every generation. Patterns keep
/// first-occurrence order without duplicates.
pub fn to_ignore(deny: &[String]) -> (Vec<String>, Vec<String>) {
    let mut patterns = Vec::new();
    let mut seen = HashSet::new();
    let mut notes = Vec::new();

    for entry in deny {
        if SECURITY_DEFAULTS.contains(&entry.trim()) {
            continue;
        }
        match Permission::parse(entry).file_pattern() {
            Some(pattern) => {
                if seen.insert(pattern.to_string()) {
                    patterns.push(pattern.to_string());
                }
            }
            None => notes.push(entry.trim().to_string()),
        }
    }

    (patterns, notes)
}

/// Deny entry for one ignore pattern.
///
/// Paths and globs become `Edit(pattern)`; anything else passes through.
pub fn deny_entry(pattern: &str) -> String {
    if pattern.contains('/') || pattern.contains(['*', '?', '[']) {
        format!("Edit({pattern})")
    } else {
        pattern.to_string()
    }
}

/// Build the deny list for ignore patterns.
///
/// [`SECURITY_DEFAULTS`] are prepended unconditionally; negated patterns
/// have no deny equivalent and are dropped; duplicates keep the first
/// occurrence.
pub fn to_deny(patterns: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    SECURITY_DEFAULTS
        .iter()
        .map(|s| s.to_string())
        .chain(
            patterns
                .iter()
                .map(|p| p.trim())
                .filter(|p| !p.is_empty() && !p.starts_with('!'))
                .map(deny_entry),
        )
        .filter(|entry| seen.insert(entry.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[rstest]
    #[case("Edit(src/**)", Verb::Edit, Some("src/**"))]
    #[case("Read(.env)", Verb::Read, Some(".env"))]
    #[case("Bash(rm -rf /*)", Verb::Bash, Some("rm -rf /*"))]
    #[case("WebFetch", Verb::WebFetch, None)]
    #[case("mcp__github__create_issue", Verb::Mcp("mcp__github__create_issue".into()), None)]
    #[case("Glob", Verb::Tool("Glob".into()), None)]
    #[case("not a permission!", Verb::Tool("not a permission!".into()), None)]
    fn test_parse(#[case] entry: &str, #[case] verb: Verb, #[case] pattern: Option<&str>) {
        let permission = Permission::parse(entry);
        assert_eq!(permission.verb, verb);
        assert_eq!(permission.pattern.as_deref(), pattern);
    }

    #[test]
    fn test_only_edit_and_read_become_patterns() {
        let deny = strings(&["Edit(src/**)", "WebFetch", "Bash(rm -rf /*)"]);
        let (patterns, notes) = to_ignore(&deny);

        assert_eq!(patterns, strings(&["src/**"]));
        assert_eq!(notes, strings(&["WebFetch", "Bash(rm -rf /*)"]));
    }

    #[test]
    fn test_to_ignore_dedupes_read_and_edit() {
        let (patterns, _) = to_ignore(&strings(&["Read(.secrets)", "Edit(.secrets)", "Edit(dist/)"]));
        assert_eq!(patterns, strings(&[".secrets", "dist/"]));
    }

    #[test]
    fn test_to_ignore_skips_security_defaults() {
        let deny = to_deny(&strings(&["dist/**", "*.key"]));
        let (patterns, notes) = to_ignore(&deny);

        assert_eq!(patterns, strings(&["dist/**"]));
        assert!(notes.is_empty());
    }

    #[test]
    fn test_to_ignore_keeps_near_defaults() {
        let (patterns, notes) = to_ignore(&strings(&["Read(.env.local)", "Bash(sudo rm:*)"]));
        assert_eq!(patterns, strings(&[".env.local"]));
        assert_eq!(notes, strings(&["Bash(sudo rm:*)"]));
    }

    #[rstest]
    #[case("src/generated", "Edit(src/generated)")]
    #[case("*.log", "Edit(*.log)")]
    #[case("file?.txt", "Edit(file?.txt)")]
    #[case("[ab].md", "Edit([ab].md)")]
    #[case("node_modules", "node_modules")]
    fn test_deny_entry(#[case] pattern: &str, #[case] expected: &str) {
        assert_eq!(deny_entry(pattern), expected);
    }

    #[test]
    fn test_to_deny_prepends_defaults_and_dedupes() {
        let deny = to_deny(&strings(&["*.key", "secrets/**", "!keep/**", "secrets/**"]));

        let defaults = strings(SECURITY_DEFAULTS);
        assert_eq!(&deny[..defaults.len()], &defaults[..]);
        assert_eq!(&deny[defaults.len()..], &strings(&["Edit(secrets/**)"])[..]);
    }

    #[test]
    fn test_to_deny_with_no_patterns_is_defaults() {
        assert_eq!(to_deny(&[]), strings(SECURITY_DEFAULTS));
    }
}

//! Cross-adapter behavior over every tool.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;
use rulesync_fs::{FileSystem, MemoryFs, NormalizedPath};
use rulesync_meta::layout::{IGNORE_FILE, RULES_DIR};
use rulesync_meta::{FileLocation, RuleFrontmatter, RulesyncIgnore, RulesyncRule, Targets, ToolTarget};
use rulesync_tools::classify::permissions;
use rulesync_tools::{ToolRegistry, ignore_adapter, rule_adapter};

fn base() -> NormalizedPath {
    NormalizedPath::new("/repo")
}

fn plain_rule(stem: &str, body: &str) -> RulesyncRule {
    RulesyncRule::new_unchecked(
        FileLocation::new(base(), RULES_DIR, format!("{stem}.md")),
        RuleFrontmatter {
            targets: Some(Targets::Wildcard),
            ..Default::default()
        },
        body,
    )
}

proptest! {
    #[test]
    fn prop_plain_rule_survives_every_adapter(
        stem in "[a-z][a-z0-9_]{0,12}",
        text in "[a-zA-Z0-9 .,#\n-]{0,80}",
        leading_rule in any::<bool>(),
    ) {
        let body = if leading_rule { format!("---\n{text}\n---\n") } else { text };
        let rule = plain_rule(&stem, &body);
        for target in ToolTarget::ALL {
            let adapter = rule_adapter(target);
            let native = adapter.from_canonical(&rule, &base());
            let content = adapter.render(&native);
            let reparsed = adapter
                .from_content(&base(), &native.location.relative_path(), &content)
                .unwrap();
            let back = adapter.to_canonical(&reparsed);

            prop_assert_eq!(&back.frontmatter, &rule.frontmatter, "{}", target);
            prop_assert_eq!(back.stem(), stem.as_str());
            prop_assert_eq!(&back.body, &body, "{}", target);
        }
    }
}

#[rstest]
#[case(ToolTarget::ClaudeCode, "CLAUDE.md")]
#[case(ToolTarget::GeminiCli, "GEMINI.md")]
#[case(ToolTarget::Copilot, ".github/copilot-instructions.md")]
#[case(ToolTarget::AugmentCodeLegacy, ".augment-guidelines")]
fn test_root_rule_round_trip(#[case] target: ToolTarget, #[case] root_file: &str) {
    let adapter = rule_adapter(target);
    let root = RulesyncRule::new_unchecked(
        FileLocation::new(base(), RULES_DIR, "overview.md"),
        RuleFrontmatter {
            root: true,
            ..Default::default()
        },
        "# Project\n",
    );

    let natives = adapter.from_canonical_set(std::slice::from_ref(&root), &base());
    assert_eq!(natives.len(), 1);
    assert_eq!(natives[0].location.relative_path(), root_file);

    let back = adapter.to_canonical(&natives[0]);
    assert!(back.is_root());
    assert_eq!(back.body, "# Project\n");
    assert_eq!(back.location.file_name, "overview.md");
}

#[test]
fn test_native_paths_from_filesystem() {
    let fs = MemoryFs::new()
        .with_file("/repo/CLAUDE.md", "root")
        .with_file("/repo/.claude/memories/b.md", "b")
        .with_file("/repo/.claude/memories/a.md", "a")
        .with_file("/repo/.claude/memories/notes.txt", "skip");

    let adapter = rule_adapter(ToolTarget::ClaudeCode);
    let paths = adapter.native_paths(&fs, &base()).unwrap();
    assert_eq!(
        paths,
        vec!["CLAUDE.md", ".claude/memories/a.md", ".claude/memories/b.md"]
    );

    let rule = adapter.from_file(&fs, &base(), &paths[1]).unwrap();
    assert_eq!(rule.body, "a");
    assert!(fs.file_exists(&base().join(&paths[0])));
}

#[test]
fn test_permission_ignore_isolation() {
    let deny: Vec<String> = ["Edit(src/**)", "WebFetch", "Bash(rm -rf /*)"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let (patterns, notes) = permissions::to_ignore(&deny);

    assert_eq!(patterns, vec!["src/**"]);
    assert_eq!(notes, vec!["WebFetch", "Bash(rm -rf /*)"]);
}

#[test]
fn test_claude_ignore_through_settings_file() {
    let adapter = ignore_adapter(ToolTarget::ClaudeCode).unwrap();
    let canonical = RulesyncIgnore {
        location: FileLocation::new(base(), "", IGNORE_FILE),
        patterns: vec!["dist/".into(), "secrets.txt".into()],
        notes: Vec::new(),
    };
    let native = adapter.from_canonical(&canonical, &base());
    let content = adapter.render(&native, None).unwrap();

    let reparsed = adapter
        .from_content(&base(), ".claude/settings.json", &content)
        .unwrap();
    let back = adapter.to_canonical(&reparsed);

    assert!(back.patterns.contains(&"dist/".to_string()));
    assert!(!back.patterns.contains(&"secrets.txt".to_string()));
    assert!(back.notes.contains(&"secrets.txt".to_string()));
}

#[test]
fn test_registry_matches_target_list() {
    let registry = ToolRegistry::with_builtins();
    assert_eq!(registry.list(), ToolTarget::ALL.to_vec());
}

//! End-to-end integration tests on the local filesystem.
//!
//! Each test exercises the complete flow: TOML config -> canonical files ->
//! generated tool files -> import back into a fresh canonical tree.

use pretty_assertions::assert_eq;
use rulesync_core::{SyncConfig, SyncEngine};
use rulesync_fs::LocalFs;
use rulesync_meta::ToolTarget;
use rulesync_test_utils::{CanonicalTree, TestRepo};
use serde_json::Value;
use std::fs;

fn config_for(repo: &TestRepo, targets: &str) -> SyncConfig {
    let toml = format!(
        "baseDirs = [{:?}]\ntargets = [{targets}]\nfeatures = [\"*\"]\n",
        repo.base_dir()
    );
    SyncConfig::from_toml_str(&toml).unwrap()
}

fn sample_tree() -> CanonicalTree {
    CanonicalTree::new()
        .root_rule("# Project\n\nMonorepo.\n")
        .rule(
            "typescript.md",
            "description: TypeScript conventions\nglobs: [\"**/*.ts\"]",
            "Prefer `unknown` over `any`.\n",
        )
        .command("review.md", "Review the diff", "Review $ARGUMENTS\n")
        .ignore(&["dist/", "*.log"])
        .mcp(
            r#"{"mcpServers": {
                "fs": {"command": "npx", "args": ["-y", "mcp-fs"]},
                "docs": {"type": "sse", "url": "https://docs.example.com/sse", "targets": ["cursor"]}
            }}"#,
        )
}

#[test]
fn test_generate_claude_code() {
    let repo = sample_tree().materialize();
    repo.write(".claude/settings.json", r#"{"model": "opus"}"#);

    let fs = LocalFs::new();
    let engine = SyncEngine::new(&fs, config_for(&repo, "\"claudecode\""));
    let report = engine.generate().unwrap();
    assert!(report.is_clean(), "{:?}", report.errors().collect::<Vec<_>>());

    repo.assert_file_contains("CLAUDE.md", "# Project");
    repo.assert_file_contains("CLAUDE.md", "@.claude/memories/typescript.md");
    repo.assert_file_contains(".claude/memories/typescript.md", "Prefer `unknown`");
    repo.assert_file_contains(".claude/commands/review.md", "description: Review the diff");

    let settings: Value = serde_json::from_str(&repo.read(".claude/settings.json")).unwrap();
    assert_eq!(settings["model"], "opus");
    let deny: Vec<&str> = settings["permissions"]["deny"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(Value::as_str)
        .collect();
    assert!(deny.contains(&"Edit(dist/)"));
    assert!(deny.contains(&"Edit(*.log)"));

    let mcp: Value = serde_json::from_str(&repo.read(".mcp.json")).unwrap();
    assert_eq!(mcp["mcpServers"]["fs"]["type"], "stdio");
    assert!(mcp["mcpServers"].get("docs").is_none());
}

#[test]
fn test_generate_cursor() {
    let repo = sample_tree().materialize();
    let fs = LocalFs::new();
    let engine = SyncEngine::new(&fs, config_for(&repo, "\"cursor\""));
    engine.generate().unwrap();

    repo.assert_file_contains(".cursor/rules/overview.mdc", "alwaysApply: true");
    repo.assert_file_contains(".cursor/rules/typescript.mdc", "globs: **/*.ts");
    assert_eq!(repo.read(".cursorignore"), "dist/\n*.log\n");

    let mcp: Value = serde_json::from_str(&repo.read(".cursor/mcp.json")).unwrap();
    assert_eq!(mcp["mcpServers"]["docs"]["url"], "https://docs.example.com/sse");
    assert!(!repo.read(".cursor/mcp.json").contains("targets"));
}

#[test]
fn test_generate_codex_preserves_config() {
    let repo = sample_tree().materialize();
    repo.write(".codex/config.toml", "model = \"o3\"\n");

    let fs = LocalFs::new();
    let engine = SyncEngine::new(&fs, config_for(&repo, "\"codexcli\""));
    assert!(engine.generate().unwrap().is_clean());

    let config: toml::Table = repo.read(".codex/config.toml").parse().unwrap();
    assert_eq!(config["model"].as_str(), Some("o3"));
    assert_eq!(config["mcp_servers"]["fs"]["command"].as_str(), Some("npx"));
    repo.assert_file_contains("AGENTS.md", "@.codex/memories/typescript.md");
    repo.assert_file_exists(".codex/prompts/review.md");
}

#[test]
fn test_import_gemini_into_empty_tree() {
    let repo = TestRepo::new();
    repo.write("GEMINI.md", "# Gemini root\n");
    repo.write(".gemini/memories/style.md", "Use tabs.\n");
    repo.write(
        ".gemini/commands/fix.toml",
        "description = \"Fix an issue\"\nprompt = \"Fix {{args}}\"\n",
    );
    repo.write(".geminiignore", "build/\n");
    repo.write(
        ".gemini/settings.json",
        r#"{"theme": "dark", "mcpServers": {"docs": {"httpUrl": "https://d.dev/mcp", "timeout": 5000}}}"#,
    );

    let fs = LocalFs::new();
    let engine = SyncEngine::new(&fs, config_for(&repo, ""));
    let report = engine.import(ToolTarget::GeminiCli).unwrap();
    assert!(report.is_clean(), "{:?}", report.errors().collect::<Vec<_>>());

    repo.assert_file_contains(".rulesync/rules/overview.md", "root: true");
    repo.assert_file_contains(".rulesync/rules/overview.md", "# Gemini root");
    repo.assert_file_contains(".rulesync/rules/style.md", "Use tabs.");
    repo.assert_file_contains(".rulesync/commands/fix.md", "Fix $ARGUMENTS");
    assert_eq!(repo.read(".rulesyncignore"), "build/\n");

    let mcp: Value = serde_json::from_str(&repo.read(".rulesync/.mcp.json")).unwrap();
    assert_eq!(mcp["mcpServers"]["docs"]["type"], "http");
    assert_eq!(mcp["mcpServers"]["docs"]["timeout"], 5000);
}

#[test]
fn test_malformed_merged_file_is_left_alone() {
    let repo = sample_tree().materialize();
    repo.write(".gemini/settings.json", "{ not json");

    let fs = LocalFs::new();
    let engine = SyncEngine::new(&fs, config_for(&repo, "\"geminicli\""));
    let report = engine.generate().unwrap();

    assert_eq!(report.errors().count(), 1);
    assert_eq!(repo.read(".gemini/settings.json"), "{ not json");
    repo.assert_file_exists("GEMINI.md");
    repo.assert_file_exists(".geminiignore");
}

#[test]
fn test_generate_then_import_round_trip() {
    let repo = sample_tree().materialize();
    let fs = LocalFs::new();
    let engine = SyncEngine::new(&fs, config_for(&repo, "\"windsurf\""));
    engine.generate().unwrap();

    fs::remove_dir_all(repo.root().join(".rulesync")).unwrap();
    fs::remove_file(repo.root().join(".rulesyncignore")).unwrap();
    engine.import(ToolTarget::Windsurf).unwrap();

    let imported = repo.read(".rulesync/rules/typescript.md");
    assert!(imported.contains("description: TypeScript conventions"));
    assert!(imported.contains("**/*.ts"));
    assert_eq!(repo.read(".rulesyncignore"), "dist/\n*.log\n");
}

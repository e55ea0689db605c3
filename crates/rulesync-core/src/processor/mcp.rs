//! MCP: `.rulesync/.mcp.json` ⇄ a tool's MCP configuration file.
//!
//! Servers are filtered by their own `targets`; the file is written only
//! when at least one server applies to the tool.

use super::{FeatureProcessor, LoadOutcome, WriteReport, check_targets, read_existing, require_adapter};
use crate::Result;
use rulesync_fs::{FileSystem, NormalizedPath};
use rulesync_meta::layout::MCP_FILE;
use rulesync_meta::{Feature, FileLocation, RulesyncMcp, ToolTarget};
use rulesync_tools::{McpAdapter, ToolMcp, mcp_adapter};

pub struct McpProcessor<'a> {
    fs: &'a dyn FileSystem,
    base_dir: NormalizedPath,
    adapter: McpAdapter,
}

impl<'a> McpProcessor<'a> {
    pub fn new(fs: &'a dyn FileSystem, base_dir: impl Into<NormalizedPath>, target: ToolTarget) -> Result<Self> {
        Ok(Self {
            fs,
            base_dir: base_dir.into(),
            adapter: require_adapter(target, Feature::Mcp, mcp_adapter(target))?,
        })
    }
}

impl FeatureProcessor for McpProcessor<'_> {
    type Canonical = RulesyncMcp;
    type Native = ToolMcp;

    const FEATURE: Feature = Feature::Mcp;

    fn target(&self) -> ToolTarget {
        self.adapter.target
    }

    fn load_rulesync_files(&self) -> Result<LoadOutcome<RulesyncMcp>> {
        let mut outcome = LoadOutcome::default();
        let location = FileLocation::from_relative(self.base_dir.clone(), MCP_FILE);
        let path = location.path();
        if self.fs.file_exists(&path) {
            let result = self
                .fs
                .read_file(&path)
                .map_err(rulesync_meta::Error::from)
                .and_then(|content| RulesyncMcp::from_content(location, &content));
            outcome.record(&path, result);
        }
        for mcp in &outcome.entities {
            for (_, targets) in mcp.targets() {
                check_targets(&mcp.location, Some(targets))?;
            }
        }
        Ok(outcome)
    }

    fn load_tool_files(&self) -> Result<LoadOutcome<ToolMcp>> {
        let mut outcome = LoadOutcome::default();
        for relative in self.adapter.native_paths(self.fs, &self.base_dir) {
            let path = self.base_dir.join(&relative);
            let result = self
                .adapter
                .from_file(self.fs, &self.base_dir, &relative)
                .map_err(|e| e.to_string())
                .and_then(|native| {
                    self.adapter
                        .validate(&native)
                        .map(|()| native)
                        .map_err(|e| format!("Invalid {path}: {e}"))
                });
            outcome.record(&path, result);
        }
        Ok(outcome)
    }

    fn convert_rulesync_to_tool(&self, entities: &[RulesyncMcp]) -> Vec<ToolMcp> {
        entities
            .iter()
            .map(|mcp| self.adapter.from_canonical(mcp, &self.base_dir))
            .filter(|native| {
                let keep = !native.servers.is_empty();
                if !keep {
                    tracing::debug!(tool = %self.adapter.target, "No MCP servers apply");
                }
                keep
            })
            .collect()
    }

    fn convert_tool_to_rulesync(&self, natives: &[ToolMcp]) -> Vec<RulesyncMcp> {
        natives.iter().map(|native| self.adapter.to_canonical(native)).collect()
    }

    fn write_tool_files(&self, natives: &[ToolMcp]) -> WriteReport {
        let mut report = WriteReport::default();
        for native in natives {
            let content = if self.adapter.is_merged() {
                read_existing(self.fs, &native.location.path())
                    .and_then(|existing| Ok(self.adapter.render(native, existing.as_deref())?))
            } else {
                self.adapter.render(native, None).map_err(Into::into)
            };
            report.write(self.fs, &native.location, content);
        }
        report
    }

    fn write_rulesync_files(&self, entities: &[RulesyncMcp]) -> WriteReport {
        let mut report = WriteReport::default();
        for mcp in entities {
            report.write(self.fs, &mcp.location, mcp.to_file_content().map_err(Into::into));
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, InvariantError};
    use pretty_assertions::assert_eq;
    use rulesync_fs::MemoryFs;
    use serde_json::Value;

    const CANONICAL: &str = r#"{
  "mcpServers": {
    "everywhere": { "command": "mcp-a" },
    "wildcard": { "command": "mcp-b", "targets": ["*"] },
    "cursor-only": { "type": "sse", "url": "https://docs.example.com/sse", "targets": ["cursor"] }
  }
}"#;

    fn server_names(fs: &MemoryFs, path: &str, key: &str) -> Vec<String> {
        let value: Value = serde_json::from_str(&fs.get(path).unwrap()).unwrap();
        value[key].as_object().unwrap().keys().cloned().collect()
    }

    fn generate(fs: &MemoryFs, target: ToolTarget) -> WriteReport {
        let processor = McpProcessor::new(fs, "/repo", target).unwrap();
        let entities = processor.load_rulesync_files().unwrap().entities;
        processor.write_tool_files(&processor.convert_rulesync_to_tool(&entities))
    }

    #[test]
    fn test_server_target_filtering() {
        let fs = MemoryFs::new().with_file("/repo/.rulesync/.mcp.json", CANONICAL);

        generate(&fs, ToolTarget::Cursor);
        generate(&fs, ToolTarget::ClaudeCode);

        assert_eq!(
            server_names(&fs, "/repo/.cursor/mcp.json", "mcpServers"),
            vec!["cursor-only", "everywhere", "wildcard"]
        );
        assert_eq!(
            server_names(&fs, "/repo/.mcp.json", "mcpServers"),
            vec!["everywhere", "wildcard"]
        );
        assert!(!fs.get("/repo/.cursor/mcp.json").unwrap().contains("targets"));
    }

    #[test]
    fn test_no_applicable_servers_writes_nothing() {
        let fs = MemoryFs::new().with_file(
            "/repo/.rulesync/.mcp.json",
            r#"{"mcpServers": {"x": {"command": "x", "targets": ["cursor"]}}}"#,
        );
        let report = generate(&fs, ToolTarget::Roo);
        assert!(report.written.is_empty());
        assert!(fs.get("/repo/.roo/mcp.json").is_none());
    }

    #[test]
    fn test_unknown_server_target_aborts() {
        let fs = MemoryFs::new().with_file(
            "/repo/.rulesync/.mcp.json",
            r#"{"mcpServers": {"x": {"command": "x", "targets": ["zed"]}}}"#,
        );
        let processor = McpProcessor::new(&fs, "/repo", ToolTarget::Cursor).unwrap();
        assert!(matches!(
            processor.load_rulesync_files(),
            Err(Error::Invariant(InvariantError::UnknownTargets { .. }))
        ));
    }

    #[test]
    fn test_invalid_canonical_is_recorded() {
        let fs = MemoryFs::new().with_file("/repo/.rulesync/.mcp.json", "{ nope");
        let processor = McpProcessor::new(&fs, "/repo", ToolTarget::Cursor).unwrap();
        let outcome = processor.load_rulesync_files().unwrap();
        assert!(outcome.entities.is_empty());
        assert_eq!(outcome.errors.len(), 1);
    }

    #[test]
    fn test_gemini_settings_merged() {
        let fs = MemoryFs::new()
            .with_file("/repo/.rulesync/.mcp.json", CANONICAL)
            .with_file("/repo/.gemini/settings.json", r#"{"theme": "dark"}"#);
        let report = generate(&fs, ToolTarget::GeminiCli);
        assert_eq!(report.written, vec![".gemini/settings.json"]);

        let value: Value = serde_json::from_str(&fs.get("/repo/.gemini/settings.json").unwrap()).unwrap();
        assert_eq!(value["theme"], "dark");
        assert_eq!(value["mcpServers"]["everywhere"]["command"], "mcp-a");
    }

    #[test]
    fn test_import_roo() {
        let fs = MemoryFs::new().with_file(
            "/repo/.roo/mcp.json",
            r#"{"mcpServers": {"docs": {"type": "streamable-http", "url": "https://d.dev/mcp", "timeout": 30}}}"#,
        );
        let processor = McpProcessor::new(&fs, "/repo", ToolTarget::Roo).unwrap();
        let natives = processor.load_tool_files().unwrap().entities;
        let report = processor.write_rulesync_files(&processor.convert_tool_to_rulesync(&natives));
        assert_eq!(report.written, vec![".rulesync/.mcp.json"]);

        let value: Value = serde_json::from_str(&fs.get("/repo/.rulesync/.mcp.json").unwrap()).unwrap();
        assert_eq!(value["mcpServers"]["docs"]["type"], "http");
        assert_eq!(value["mcpServers"]["docs"]["timeout"], 30000);
    }
}

//! MCP adapters.
//!
//! Native server entries are kept as raw JSON values ([`ToolMcp`]); the
//! per-tool [`spec::McpConfigSpec`] decides how they translate to and from
//! canonical [`McpServer`]s and how the file around them is written.

pub mod opencode;
pub mod spec;
pub mod translate;

use crate::{Error, Result, merge};
use rulesync_fs::{FileSystem, NormalizedPath};
use rulesync_meta::layout::MCP_FILE;
use rulesync_meta::validation::{ValidationError, ValidationResult};
use rulesync_meta::{FileLocation, McpServer, RulesyncMcp, ToolTarget, applies_to};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

pub use spec::{McpConfigSpec, McpFileFormat, mcp_config_spec};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct McpAdapter {
    pub target: ToolTarget,
    pub spec: McpConfigSpec,
}

/// A tool's MCP servers, as native JSON entries keyed by server name.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolMcp {
    pub target: ToolTarget,
    pub location: FileLocation,
    pub servers: BTreeMap<String, Value>,
}

/// MCP adapter for a tool; `None` when the tool has no MCP support.
pub fn mcp_adapter(target: ToolTarget) -> Option<McpAdapter> {
    mcp_config_spec(target).map(|spec| McpAdapter { target, spec })
}

impl McpAdapter {
    /// Whether writing must preserve the rest of an existing file.
    pub fn is_merged(&self) -> bool {
        self.spec.merged
    }

    pub fn native_paths(&self, fs: &dyn FileSystem, base_dir: &NormalizedPath) -> Vec<String> {
        if fs.file_exists(&base_dir.join(self.spec.project_path)) {
            vec![self.spec.project_path.to_string()]
        } else {
            Vec::new()
        }
    }

    pub fn from_file(
        &self,
        fs: &dyn FileSystem,
        base_dir: &NormalizedPath,
        relative_path: &str,
    ) -> Result<ToolMcp> {
        let content = fs.read_file(&base_dir.join(relative_path))?;
        self.from_content(base_dir, relative_path, &content)
    }

    /// Parse a native file. Every server entry must translate.
    pub fn from_content(
        &self,
        base_dir: &NormalizedPath,
        relative_path: &str,
        content: &str,
    ) -> Result<ToolMcp> {
        let location = FileLocation::from_relative(base_dir.clone(), relative_path);
        let path = location.path().to_native();

        let servers = match self.spec.format {
            McpFileFormat::Json | McpFileFormat::OpenCode => self
                .json_servers(content)
                .map_err(|message| Error::parse(&path, message))?,
            McpFileFormat::CodexToml => self
                .toml_servers(content)
                .map_err(|message| Error::parse(&path, message))?,
        };

        for (name, entry) in &servers {
            if self.translate_back(entry).is_none() {
                return Err(Error::parse(
                    &path,
                    format!("server '{name}' has neither a command nor a recognizable url"),
                ));
            }
        }

        Ok(ToolMcp {
            target: self.target,
            location,
            servers,
        })
    }

    /// Native entries for every server that applies to this tool.
    pub fn from_canonical(&self, mcp: &RulesyncMcp, base_dir: &NormalizedPath) -> ToolMcp {
        let servers = mcp
            .servers
            .iter()
            .filter(|(_, server)| applies_to(server.targets.as_ref(), self.target))
            .map(|(name, server)| (name.clone(), self.translate(server)))
            .collect();
        ToolMcp {
            target: self.target,
            location: FileLocation::from_relative(base_dir.clone(), self.spec.project_path),
            servers,
        }
    }

    /// Canonical server set. Fields the tool lacks come back unset.
    pub fn to_canonical(&self, native: &ToolMcp) -> RulesyncMcp {
        let servers = native
            .servers
            .iter()
            .filter_map(|(name, entry)| {
                let server = self.translate_back(entry);
                if server.is_none() {
                    tracing::debug!(tool = %self.target, server = %name, "Skipping untranslatable MCP server");
                }
                server.map(|s| (name.clone(), s))
            })
            .collect();
        RulesyncMcp {
            location: FileLocation::from_relative(native.location.base_dir.clone(), MCP_FILE),
            servers,
        }
    }

    pub fn validate(&self, native: &ToolMcp) -> ValidationResult {
        for (name, entry) in &native.servers {
            let field = format!("{}.{name}", self.spec.servers_key);
            if name.trim().is_empty() {
                return Err(ValidationError::new(self.spec.servers_key, "server names must not be empty"));
            }
            if !entry.is_object() {
                return Err(ValidationError::new(field, "must be an object"));
            }
            if entry.get("targets").is_some() {
                return Err(ValidationError::new(field, "must not carry targets"));
            }
        }
        Ok(())
    }

    /// File content; `existing` is the current file when the format is merged.
    pub fn render(&self, native: &ToolMcp, existing: Option<&str>) -> Result<String> {
        let path = native.location.path().to_native();
        let servers: Map<String, Value> = native
            .servers
            .iter()
            .map(|(name, entry)| (name.clone(), entry.clone()))
            .collect();
        let existing = existing.filter(|_| self.spec.merged);

        match self.spec.format {
            McpFileFormat::Json | McpFileFormat::OpenCode => {
                let mut root = merge::merge_json(existing, &[self.spec.servers_key], Value::Object(servers))
                    .map_err(|message| Error::parse(&path, message))?;
                if self.spec.format == McpFileFormat::OpenCode
                    && let Value::Object(map) = &mut root
                    && !map.contains_key(opencode::SCHEMA_KEY)
                {
                    map.insert(opencode::SCHEMA_KEY.into(), Value::from(opencode::SCHEMA_URL));
                }
                merge::to_json_string(&root).map_err(|message| Error::serialize(path, message))
            }
            McpFileFormat::CodexToml => {
                let table = toml::Value::try_from(Value::Object(servers))
                    .map_err(|e| Error::serialize(&path, e))?;
                merge::merge_toml(existing, self.spec.servers_key, table)
                    .map_err(|message| Error::parse(path, message))
            }
        }
    }

    fn translate(&self, server: &McpServer) -> Value {
        match self.spec.format {
            McpFileFormat::OpenCode => opencode::to_opencode_json(server),
            McpFileFormat::Json | McpFileFormat::CodexToml => translate::to_tool_json(server, &self.spec),
        }
    }

    fn translate_back(&self, entry: &Value) -> Option<McpServer> {
        match self.spec.format {
            McpFileFormat::OpenCode => opencode::from_opencode_json(entry),
            McpFileFormat::Json | McpFileFormat::CodexToml => translate::from_tool_json(entry, &self.spec),
        }
    }

    fn json_servers(&self, content: &str) -> std::result::Result<BTreeMap<String, Value>, String> {
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        let root: Value = serde_json::from_str(content).map_err(|e| format!("invalid JSON: {e}"))?;
        let Value::Object(root) = root else {
            return Err("top level must be a JSON object".to_string());
        };
        match root.get(self.spec.servers_key) {
            None | Some(Value::Null) => Ok(BTreeMap::new()),
            Some(Value::Object(map)) => Ok(map.iter().map(|(k, v)| (k.clone(), v.clone())).collect()),
            Some(_) => Err(format!("'{}' must be an object", self.spec.servers_key)),
        }
    }

    fn toml_servers(&self, content: &str) -> std::result::Result<BTreeMap<String, Value>, String> {
        let table: toml::Table = content.parse().map_err(|e| format!("invalid TOML: {e}"))?;
        let Some(servers) = table.get(self.spec.servers_key) else {
            return Ok(BTreeMap::new());
        };
        let Some(servers) = servers.as_table() else {
            return Err(format!("'{}' must be a table", self.spec.servers_key));
        };
        servers
            .iter()
            .map(|(name, entry)| {
                serde_json::to_value(entry)
                    .map(|value| (name.clone(), value))
                    .map_err(|e| e.to_string())
            })
            .collect()
    }
}

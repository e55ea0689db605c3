//! Per-tool MCP configuration specs.
//!
//! The single table describing where each tool keeps its MCP servers and
//! how it spells them: file path, servers key, URL field names, `type`
//! discriminator values and the optional extra fields it understands.
//!
//! # Adding a tool
//!
//! 1. Add a `fn <tool>_mcp_spec() -> McpConfigSpec` below.
//! 2. Add the target to the `match` in [`mcp_config_spec`].

use rulesync_meta::ToolTarget;

/// How the servers are embedded in the tool's file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum McpFileFormat {
    /// A JSON object holding the servers under `servers_key`.
    Json,
    /// `opencode.json`: `local`/`remote` entries under `mcp`.
    OpenCode,
    /// `.codex/config.toml`: one `[mcp_servers.<name>]` table per server.
    CodexToml,
}

/// Unit a tool uses for its `timeout` field. Canonical timeouts are milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeoutUnit {
    Millis,
    Seconds,
}

impl TimeoutUnit {
    pub fn from_millis(&self, ms: u64) -> u64 {
        match self {
            Self::Millis => ms,
            Self::Seconds => ms.div_ceil(1000),
        }
    }

    pub fn to_millis(&self, value: u64) -> u64 {
        match self {
            Self::Millis => value,
            Self::Seconds => value.saturating_mul(1000),
        }
    }
}

/// `type` values a tool writes for each transport.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct McpTypeValues {
    pub stdio: Option<&'static str>,
    pub http: Option<&'static str>,
    pub sse: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct McpFieldMappings {
    /// Field holding a streamable HTTP URL (`url`, `serverUrl`, `httpUrl`).
    pub http_url_field: &'static str,
    /// Field holding an SSE URL when it differs from `http_url_field`.
    pub sse_url_field: Option<&'static str>,
    pub requires_type_field: bool,
    pub type_values: McpTypeValues,
}

/// Optional server fields a tool understands. Everything else is dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct McpExtras {
    pub cwd: bool,
    pub timeout: Option<TimeoutUnit>,
    pub disabled: bool,
    /// Field name for auto-approved tool names (`alwaysAllow`, `autoApprove`).
    pub always_allow_field: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct McpConfigSpec {
    pub servers_key: &'static str,
    /// File relative to the base directory.
    pub project_path: &'static str,
    pub format: McpFileFormat,
    /// The file holds other settings; only `servers_key` is managed.
    pub merged: bool,
    pub field_mappings: McpFieldMappings,
    pub extras: McpExtras,
}

/// MCP spec for a tool; `None` when the tool has no MCP support.
pub fn mcp_config_spec(target: ToolTarget) -> Option<McpConfigSpec> {
    use ToolTarget::*;
    match target {
        AmazonQCli => Some(amazonq_mcp_spec()),
        ClaudeCode => Some(claude_mcp_spec()),
        Cline => Some(cline_mcp_spec()),
        CodexCli => Some(codex_mcp_spec()),
        Copilot => Some(copilot_mcp_spec()),
        Cursor => Some(cursor_mcp_spec()),
        GeminiCli => Some(gemini_mcp_spec(".gemini/settings.json")),
        Junie => Some(junie_mcp_spec()),
        Kiro => Some(kiro_mcp_spec()),
        OpenCode => Some(opencode_mcp_spec()),
        QwenCode => Some(gemini_mcp_spec(".qwen/settings.json")),
        Roo => Some(roo_mcp_spec()),
        Windsurf => Some(windsurf_mcp_spec()),
        AgentsMd | AugmentCode | AugmentCodeLegacy => None,
    }
}

const URL_ONLY: McpFieldMappings = McpFieldMappings {
    http_url_field: "url",
    sse_url_field: None,
    requires_type_field: false,
    type_values: McpTypeValues {
        stdio: None,
        http: None,
        sse: None,
    },
};

fn dedicated(servers_key: &'static str, project_path: &'static str) -> McpConfigSpec {
    McpConfigSpec {
        servers_key,
        project_path,
        format: McpFileFormat::Json,
        merged: false,
        field_mappings: URL_ONLY,
        extras: McpExtras::default(),
    }
}

fn amazonq_mcp_spec() -> McpConfigSpec {
    McpConfigSpec {
        field_mappings: McpFieldMappings {
            requires_type_field: true,
            type_values: McpTypeValues {
                stdio: None, // inferred from command
                http: Some("http"),
                sse: None,
            },
            ..URL_ONLY
        },
        extras: McpExtras {
            timeout: Some(TimeoutUnit::Millis),
            disabled: true,
            always_allow_field: Some("autoApprove"),
            ..McpExtras::default()
        },
        ..dedicated("mcpServers", ".amazonq/mcp.json")
    }
}

fn claude_mcp_spec() -> McpConfigSpec {
    McpConfigSpec {
        field_mappings: McpFieldMappings {
            requires_type_field: true,
            type_values: McpTypeValues {
                stdio: Some("stdio"),
                http: Some("http"),
                sse: Some("sse"),
            },
            ..URL_ONLY
        },
        ..dedicated("mcpServers", ".mcp.json")
    }
}

fn cline_mcp_spec() -> McpConfigSpec {
    McpConfigSpec {
        extras: McpExtras {
            timeout: Some(TimeoutUnit::Seconds),
            disabled: true,
            always_allow_field: Some("alwaysAllow"),
            ..McpExtras::default()
        },
        ..dedicated("mcpServers", ".cline/mcp.json")
    }
}

fn codex_mcp_spec() -> McpConfigSpec {
    McpConfigSpec {
        format: McpFileFormat::CodexToml,
        merged: true,
        ..dedicated("mcp_servers", ".codex/config.toml")
    }
}

fn copilot_mcp_spec() -> McpConfigSpec {
    McpConfigSpec {
        field_mappings: McpFieldMappings {
            requires_type_field: true,
            type_values: McpTypeValues {
                stdio: Some("stdio"),
                http: Some("http"),
                sse: Some("sse"),
            },
            ..URL_ONLY
        },
        ..dedicated("servers", ".vscode/mcp.json")
    }
}

fn cursor_mcp_spec() -> McpConfigSpec {
    // Cursor infers the transport from the fields present
    dedicated("mcpServers", ".cursor/mcp.json")
}

fn gemini_mcp_spec(project_path: &'static str) -> McpConfigSpec {
    McpConfigSpec {
        merged: true,
        field_mappings: McpFieldMappings {
            http_url_field: "httpUrl",
            sse_url_field: Some("url"),
            ..URL_ONLY
        },
        extras: McpExtras {
            cwd: true,
            timeout: Some(TimeoutUnit::Millis),
            ..McpExtras::default()
        },
        ..dedicated("mcpServers", project_path)
    }
}

fn junie_mcp_spec() -> McpConfigSpec {
    dedicated("mcpServers", ".junie/mcp/mcp.json")
}

fn kiro_mcp_spec() -> McpConfigSpec {
    McpConfigSpec {
        extras: McpExtras {
            disabled: true,
            always_allow_field: Some("autoApprove"),
            ..McpExtras::default()
        },
        ..dedicated("mcpServers", ".kiro/settings/mcp.json")
    }
}

fn opencode_mcp_spec() -> McpConfigSpec {
    McpConfigSpec {
        format: McpFileFormat::OpenCode,
        merged: true,
        extras: McpExtras {
            disabled: true,
            ..McpExtras::default()
        },
        ..dedicated("mcp", "opencode.json")
    }
}

fn roo_mcp_spec() -> McpConfigSpec {
    McpConfigSpec {
        field_mappings: McpFieldMappings {
            requires_type_field: true,
            type_values: McpTypeValues {
                stdio: Some("stdio"),
                http: Some("streamable-http"),
                sse: Some("sse"),
            },
            ..URL_ONLY
        },
        extras: McpExtras {
            timeout: Some(TimeoutUnit::Seconds),
            disabled: true,
            always_allow_field: Some("alwaysAllow"),
            ..McpExtras::default()
        },
        ..dedicated("mcpServers", ".roo/mcp.json")
    }
}

fn windsurf_mcp_spec() -> McpConfigSpec {
    McpConfigSpec {
        field_mappings: McpFieldMappings {
            http_url_field: "serverUrl",
            ..URL_ONLY
        },
        ..dedicated("mcpServers", ".windsurf/mcp.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_copilot_uses_servers_key() {
        let spec = mcp_config_spec(ToolTarget::Copilot).unwrap();
        assert_eq!(spec.servers_key, "servers");
        assert_eq!(spec.project_path, ".vscode/mcp.json");
    }

    #[test]
    fn test_merged_files() {
        let merged: Vec<ToolTarget> = ToolTarget::ALL
            .iter()
            .copied()
            .filter(|t| mcp_config_spec(*t).is_some_and(|s| s.merged))
            .collect();
        assert_eq!(
            merged,
            vec![
                ToolTarget::CodexCli,
                ToolTarget::GeminiCli,
                ToolTarget::OpenCode,
                ToolTarget::QwenCode
            ]
        );
    }

    #[test]
    fn test_tools_without_mcp() {
        assert!(mcp_config_spec(ToolTarget::AgentsMd).is_none());
        assert!(mcp_config_spec(ToolTarget::AugmentCode).is_none());
    }

    #[test]
    fn test_timeout_units() {
        assert_eq!(TimeoutUnit::Seconds.from_millis(1500), 2);
        assert_eq!(TimeoutUnit::Seconds.to_millis(2), 2000);
        assert_eq!(TimeoutUnit::Millis.from_millis(1500), 1500);
    }

    #[test]
    fn test_every_spec_has_distinct_path() {
        let mut paths: Vec<&str> = ToolTarget::ALL
            .iter()
            .filter_map(|t| mcp_config_spec(*t))
            .map(|s| s.project_path)
            .collect();
        let total = paths.len();
        paths.sort();
        paths.dedup();
        assert_eq!(paths.len(), total);
    }
}

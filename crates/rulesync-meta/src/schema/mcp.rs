//! Canonical MCP server set - `.rulesync/.mcp.json`
//!
//! ```json
//! {
//!   "mcpServers": {
//!     "github": { "command": "npx", "args": ["-y", "@mcp/github"], "env": { "TOKEN": "x" } },
//!     "docs": { "type": "sse", "url": "https://docs.example.com/sse", "targets": ["cursor"] }
//!   }
//! }
//! ```
//!
//! Two layers: [`McpServerEntry`] is the loose on-disk JSON shape (accepting
//! both `url` and `httpUrl`), [`McpServer`] the resolved value every adapter
//! works from.

use crate::validation::{ValidationError, ValidationResult, validate_targets};
use crate::{Error, FileLocation, Result, Targets};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// MCP transport protocols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum McpTransport {
    Stdio,
    Sse,
    Http,
}

impl McpTransport {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stdio => "stdio",
            Self::Sse => "sse",
            Self::Http => "http",
        }
    }
}

/// Transport-specific part of a server definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum McpTransportConfig {
    /// Local process communication via stdin/stdout.
    Stdio {
        command: String,
        args: Vec<String>,
        env: BTreeMap<String, String>,
    },
    /// Streamable HTTP.
    Http {
        url: String,
        headers: BTreeMap<String, String>,
    },
    /// Server-Sent Events.
    Sse {
        url: String,
        headers: BTreeMap<String, String>,
    },
}

impl McpTransportConfig {
    pub fn kind(&self) -> McpTransport {
        match self {
            Self::Stdio { .. } => McpTransport::Stdio,
            Self::Http { .. } => McpTransport::Http,
            Self::Sse { .. } => McpTransport::Sse,
        }
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Stdio { .. } => None,
            Self::Http { url, .. } | Self::Sse { url, .. } => Some(url),
        }
    }
}

/// A resolved MCP server definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct McpServer {
    pub transport: McpTransportConfig,
    pub cwd: Option<String>,
    /// Timeout in milliseconds.
    pub timeout: Option<u64>,
    pub disabled: Option<bool>,
    /// Tool names approved without prompting.
    pub always_allow: Vec<String>,
    /// Conversion-time metadata; never written to a native file.
    pub targets: Option<Targets>,
}

impl McpServer {
    pub fn new(transport: McpTransportConfig) -> Self {
        Self {
            transport,
            cwd: None,
            timeout: None,
            disabled: None,
            always_allow: Vec::new(),
            targets: None,
        }
    }

    pub fn stdio(command: impl Into<String>, args: Vec<String>) -> Self {
        Self::new(McpTransportConfig::Stdio {
            command: command.into(),
            args,
            env: BTreeMap::new(),
        })
    }

    pub fn with_targets(mut self, targets: Targets) -> Self {
        self.targets = Some(targets);
        self
    }

    /// Resolve a loose JSON entry.
    ///
    /// An explicit `type` wins; otherwise `command` means stdio and either
    /// `httpUrl` or `url` means streamable HTTP.
    pub fn from_entry(name: &str, entry: McpServerEntry) -> std::result::Result<Self, ValidationError> {
        let kind = match entry.kind.as_deref() {
            Some("stdio") => McpTransport::Stdio,
            Some("sse") => McpTransport::Sse,
            Some("http" | "streamable-http") => McpTransport::Http,
            Some(other) => {
                return Err(ValidationError::new(
                    format!("mcpServers.{name}.type"),
                    format!("unknown transport '{other}'"),
                ));
            }
            None if entry.command.is_some() => McpTransport::Stdio,
            None if entry.http_url.is_some() || entry.url.is_some() => McpTransport::Http,
            None => {
                return Err(ValidationError::new(
                    format!("mcpServers.{name}"),
                    "needs either a command or a url",
                ));
            }
        };

        let url = entry.http_url.or(entry.url).unwrap_or_default();
        let transport = match kind {
            McpTransport::Stdio => McpTransportConfig::Stdio {
                command: entry.command.unwrap_or_default(),
                args: entry.args,
                env: entry.env,
            },
            McpTransport::Http => McpTransportConfig::Http {
                url,
                headers: entry.headers,
            },
            McpTransport::Sse => McpTransportConfig::Sse {
                url,
                headers: entry.headers,
            },
        };

        Ok(Self {
            transport,
            cwd: entry.cwd,
            timeout: entry.timeout,
            disabled: entry.disabled,
            always_allow: entry.always_allow,
            targets: entry.targets,
        })
    }

    /// Canonical JSON entry, with an explicit `type`.
    pub fn to_entry(&self) -> McpServerEntry {
        let mut entry = McpServerEntry {
            kind: Some(self.transport.kind().as_str().to_string()),
            cwd: self.cwd.clone(),
            timeout: self.timeout,
            disabled: self.disabled,
            always_allow: self.always_allow.clone(),
            targets: self.targets.clone(),
            ..Default::default()
        };
        match &self.transport {
            McpTransportConfig::Stdio { command, args, env } => {
                entry.command = Some(command.clone());
                entry.args = args.clone();
                entry.env = env.clone();
            }
            McpTransportConfig::Http { url, headers } | McpTransportConfig::Sse { url, headers } => {
                entry.url = Some(url.clone());
                entry.headers = headers.clone();
            }
        }
        entry
    }

    pub fn validate(&self, name: &str) -> ValidationResult {
        if name.trim().is_empty() {
            return Err(ValidationError::new("mcpServers", "server names must not be empty"));
        }
        match &self.transport {
            McpTransportConfig::Stdio { command, .. } if command.trim().is_empty() => {
                return Err(ValidationError::new(
                    format!("mcpServers.{name}.command"),
                    "stdio servers need a command",
                ));
            }
            McpTransportConfig::Http { url, .. } | McpTransportConfig::Sse { url, .. }
                if !(url.starts_with("http://") || url.starts_with("https://")) =>
            {
                return Err(ValidationError::new(
                    format!("mcpServers.{name}.url"),
                    "must start with http:// or https://",
                ));
            }
            _ => {}
        }
        validate_targets(&format!("mcpServers.{name}.targets"), self.targets.as_ref())
    }
}

/// On-disk shape of one canonical server entry.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct McpServerEntry {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_url: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwd: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub always_allow: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub targets: Option<Targets>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct McpFile {
    #[serde(default)]
    mcp_servers: BTreeMap<String, McpServerEntry>,
}

/// The canonical MCP server set, keyed and sorted by server name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RulesyncMcp {
    pub location: FileLocation,
    pub servers: BTreeMap<String, McpServer>,
}

impl RulesyncMcp {
    pub fn new(
        location: FileLocation,
        servers: BTreeMap<String, McpServer>,
        validate: bool,
    ) -> std::result::Result<Self, ValidationError> {
        let mcp = Self { location, servers };
        if validate {
            mcp.validate()?;
        }
        Ok(mcp)
    }

    pub fn from_content(location: FileLocation, content: &str) -> Result<Self> {
        let path = location.path().to_native();
        let file: McpFile =
            serde_json::from_str(content).map_err(|e| Error::parse(&path, "json", e))?;

        let mut servers = BTreeMap::new();
        for (name, entry) in file.mcp_servers {
            let server =
                McpServer::from_entry(&name, entry).map_err(|e| Error::invalid(&path, e))?;
            servers.insert(name, server);
        }

        Self::new(location, servers, true).map_err(|e| Error::invalid(path, e))
    }

    pub fn validate(&self) -> ValidationResult {
        self.servers
            .iter()
            .try_for_each(|(name, server)| server.validate(name))
    }

    /// Every server's `targets`, paired with its name.
    pub fn targets(&self) -> impl Iterator<Item = (&str, &Targets)> {
        self.servers
            .iter()
            .filter_map(|(name, s)| s.targets.as_ref().map(|t| (name.as_str(), t)))
    }

    pub fn to_file_content(&self) -> Result<String> {
        let file = McpFile {
            mcp_servers: self
                .servers
                .iter()
                .map(|(name, server)| (name.clone(), server.to_entry()))
                .collect(),
        };
        Ok(serde_json::to_string_pretty(&file)? + "\n")
    }
}

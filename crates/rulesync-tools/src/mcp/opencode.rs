//! OpenCode's `mcp` entries.
//!
//! ```json
//! {
//!   "$schema": "https://opencode.ai/config.json",
//!   "mcp": {
//!     "fs": { "type": "local", "command": ["npx", "mcp-fs"], "environment": {}, "enabled": true },
//!     "docs": { "type": "remote", "url": "https://docs.example.com/mcp" }
//!   }
//! }
//! ```

use super::translate::{string_list, string_map};
use rulesync_meta::{McpServer, McpTransportConfig};
use serde_json::{Map, Value, json};

pub const SCHEMA_KEY: &str = "$schema";
pub const SCHEMA_URL: &str = "https://opencode.ai/config.json";

pub fn to_opencode_json(server: &McpServer) -> Value {
    let mut obj = Map::new();
    match &server.transport {
        McpTransportConfig::Stdio { command, args, env } => {
            let mut argv = vec![command.clone()];
            argv.extend(args.iter().cloned());
            obj.insert("type".into(), json!("local"));
            obj.insert("command".into(), json!(argv));
            if !env.is_empty() {
                obj.insert("environment".into(), json!(env));
            }
        }
        McpTransportConfig::Http { url, headers } | McpTransportConfig::Sse { url, headers } => {
            obj.insert("type".into(), json!("remote"));
            obj.insert("url".into(), json!(url));
            if !headers.is_empty() {
                obj.insert("headers".into(), json!(headers));
            }
        }
    }
    if let Some(disabled) = server.disabled {
        obj.insert("enabled".into(), json!(!disabled));
    }
    Value::Object(obj)
}

/// `None` for entries that are neither `local` with a command nor `remote` with a URL.
pub fn from_opencode_json(value: &Value) -> Option<McpServer> {
    let obj = value.as_object()?;
    let transport = match obj.get("type").and_then(Value::as_str) {
        Some("remote") => McpTransportConfig::Http {
            url: obj.get("url")?.as_str()?.to_string(),
            headers: string_map(obj.get("headers")),
        },
        Some("local") | None => {
            let mut argv = string_list(obj.get("command")).into_iter();
            McpTransportConfig::Stdio {
                command: argv.next()?,
                args: argv.collect(),
                env: string_map(obj.get("environment")),
            }
        }
        Some(_) => return None,
    };

    let mut server = McpServer::new(transport);
    server.disabled = obj.get("enabled").and_then(Value::as_bool).map(|enabled| !enabled);
    Some(server)
}

//! Translation between canonical MCP servers and tool-native JSON entries.
//!
//! Handles URL field naming (`url`, `serverUrl`, `httpUrl`), the optional
//! `type` discriminator and the per-tool extra fields. Canonical `targets`
//! are conversion metadata and never emitted.

use super::spec::{McpConfigSpec, McpFieldMappings};
use rulesync_meta::{McpServer, McpTransportConfig};
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;

/// Convert a canonical server into the JSON entry a tool expects.
pub fn to_tool_json(server: &McpServer, spec: &McpConfigSpec) -> Value {
    let mut obj = Map::new();
    let fm = &spec.field_mappings;

    match &server.transport {
        McpTransportConfig::Stdio { command, args, env } => {
            if fm.requires_type_field
                && let Some(type_val) = fm.type_values.stdio
            {
                obj.insert("type".into(), json!(type_val));
            }
            obj.insert("command".into(), json!(command));
            if !args.is_empty() {
                obj.insert("args".into(), json!(args));
            }
            if !env.is_empty() {
                obj.insert("env".into(), json!(env));
            }
        }
        McpTransportConfig::Http { url, headers } => {
            if fm.requires_type_field
                && let Some(type_val) = fm.type_values.http
            {
                obj.insert("type".into(), json!(type_val));
            }
            obj.insert(fm.http_url_field.into(), json!(url));
            if !headers.is_empty() {
                obj.insert("headers".into(), json!(headers));
            }
        }
        McpTransportConfig::Sse { url, headers } => {
            if fm.requires_type_field
                && let Some(type_val) = fm.type_values.sse
            {
                obj.insert("type".into(), json!(type_val));
            }
            let url_field = fm.sse_url_field.unwrap_or(fm.http_url_field);
            obj.insert(url_field.into(), json!(url));
            if !headers.is_empty() {
                obj.insert("headers".into(), json!(headers));
            }
        }
    }

    let extras = &spec.extras;
    if extras.cwd
        && let Some(cwd) = &server.cwd
    {
        obj.insert("cwd".into(), json!(cwd));
    }
    if let (Some(unit), Some(ms)) = (extras.timeout, server.timeout) {
        obj.insert("timeout".into(), json!(unit.from_millis(ms)));
    }
    if extras.disabled
        && let Some(disabled) = server.disabled
    {
        obj.insert("disabled".into(), json!(disabled));
    }
    if let Some(field) = extras.always_allow_field
        && !server.always_allow.is_empty()
    {
        obj.insert(field.into(), json!(server.always_allow));
    }

    Value::Object(obj)
}

/// Parse a tool-native JSON entry back into a canonical server.
///
/// Returns `None` when the entry is not an object or has neither a
/// `command` nor a recognizable URL field.
pub fn from_tool_json(value: &Value, spec: &McpConfigSpec) -> Option<McpServer> {
    let obj = value.as_object()?;
    let fm = &spec.field_mappings;
    let type_str = obj.get("type").and_then(Value::as_str);

    let transport = if obj.contains_key("command") {
        McpTransportConfig::Stdio {
            command: obj.get("command")?.as_str()?.to_string(),
            args: string_list(obj.get("args")),
            env: string_map(obj.get("env")),
        }
    } else if let Some(url) = obj.get(fm.http_url_field).and_then(Value::as_str) {
        // The URL field only disambiguates when SSE has a field of its own.
        let sse_field_same = fm.sse_url_field.is_none_or(|f| f == fm.http_url_field);
        let is_sse_by_type = type_str.is_some_and(|t| is_sse_type(t, fm));
        if is_sse_by_type && sse_field_same {
            McpTransportConfig::Sse {
                url: url.to_string(),
                headers: string_map(obj.get("headers")),
            }
        } else {
            McpTransportConfig::Http {
                url: url.to_string(),
                headers: string_map(obj.get("headers")),
            }
        }
    } else if let Some(sse_field) = fm.sse_url_field
        && let Some(url) = obj.get(sse_field).and_then(Value::as_str)
    {
        McpTransportConfig::Sse {
            url: url.to_string(),
            headers: string_map(obj.get("headers")),
        }
    } else {
        return None;
    };

    let extras = &spec.extras;
    let mut server = McpServer::new(transport);
    if extras.cwd {
        server.cwd = obj.get("cwd").and_then(Value::as_str).map(String::from);
    }
    if let Some(unit) = extras.timeout {
        server.timeout = obj
            .get("timeout")
            .and_then(Value::as_u64)
            .map(|v| unit.to_millis(v));
    }
    if extras.disabled {
        server.disabled = obj.get("disabled").and_then(Value::as_bool);
    }
    if let Some(field) = extras.always_allow_field {
        server.always_allow = string_list(obj.get(field));
    }
    Some(server)
}

fn is_sse_type(type_str: &str, fm: &McpFieldMappings) -> bool {
    type_str == "sse" || fm.type_values.sse == Some(type_str)
}

pub(super) fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|arr| {
            arr.iter()
                .filter_map(|v| v.as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default()
}

pub(super) fn string_map(value: Option<&Value>) -> BTreeMap<String, String> {
    value
        .and_then(Value::as_object)
        .map(|map| {
            map.iter()
                .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcp::spec::mcp_config_spec;
    use pretty_assertions::assert_eq;
    use rulesync_meta::{Targets, ToolTarget};

    fn spec(target: ToolTarget) -> McpConfigSpec {
        mcp_config_spec(target).unwrap()
    }

    fn http(url: &str) -> McpServer {
        McpServer::new(McpTransportConfig::Http {
            url: url.into(),
            headers: BTreeMap::new(),
        })
    }

    fn sse(url: &str) -> McpServer {
        McpServer::new(McpTransportConfig::Sse {
            url: url.into(),
            headers: BTreeMap::new(),
        })
    }

    #[test]
    fn test_claude_stdio_has_type() {
        let mut server = McpServer::stdio("npx", vec!["-y".into(), "some-server".into()]);
        if let McpTransportConfig::Stdio { env, .. } = &mut server.transport {
            env.insert("KEY".into(), "value".into());
        }
        let json = to_tool_json(&server, &spec(ToolTarget::ClaudeCode));
        assert_eq!(
            json,
            json!({"type": "stdio", "command": "npx", "args": ["-y", "some-server"], "env": {"KEY": "value"}})
        );
    }

    #[test]
    fn test_targets_never_emitted() {
        let server = McpServer::stdio("mcp-fs", vec![]).with_targets(Targets::only(["cursor"]));
        let json = to_tool_json(&server, &spec(ToolTarget::Cursor));
        assert_eq!(json, json!({"command": "mcp-fs"}));
    }

    #[test]
    fn test_windsurf_uses_server_url() {
        let json = to_tool_json(&http("https://example.com/mcp"), &spec(ToolTarget::Windsurf));
        assert_eq!(json, json!({"serverUrl": "https://example.com/mcp"}));
        assert_eq!(
            from_tool_json(&json, &spec(ToolTarget::Windsurf)),
            Some(http("https://example.com/mcp"))
        );
    }

    #[test]
    fn test_gemini_distinguishes_by_field() {
        let gemini = spec(ToolTarget::GeminiCli);
        assert_eq!(
            to_tool_json(&http("https://a.dev/mcp"), &gemini),
            json!({"httpUrl": "https://a.dev/mcp"})
        );
        assert_eq!(
            to_tool_json(&sse("https://a.dev/sse"), &gemini),
            json!({"url": "https://a.dev/sse"})
        );
        assert_eq!(
            from_tool_json(&json!({"url": "https://a.dev/sse"}), &gemini),
            Some(sse("https://a.dev/sse"))
        );
    }

    #[test]
    fn test_roo_streamable_http_and_seconds() {
        let roo = spec(ToolTarget::Roo);
        let mut server = http("https://a.dev/mcp");
        server.timeout = Some(1500);
        server.disabled = Some(true);
        server.always_allow = vec!["read".into()];

        let json = to_tool_json(&server, &roo);
        assert_eq!(
            json,
            json!({
                "type": "streamable-http",
                "url": "https://a.dev/mcp",
                "timeout": 2,
                "disabled": true,
                "alwaysAllow": ["read"]
            })
        );

        let back = from_tool_json(&json, &roo).unwrap();
        assert_eq!(back.timeout, Some(2000));
        assert_eq!(back.transport, http("https://a.dev/mcp").transport);
    }

    #[test]
    fn test_sse_by_type_when_fields_match() {
        let claude = spec(ToolTarget::ClaudeCode);
        let json = to_tool_json(&sse("https://a.dev/sse"), &claude);
        assert_eq!(json, json!({"type": "sse", "url": "https://a.dev/sse"}));
        assert_eq!(from_tool_json(&json, &claude), Some(sse("https://a.dev/sse")));
    }

    #[test]
    fn test_extras_dropped_for_plain_tools() {
        let mut server = McpServer::stdio("x", vec![]);
        server.cwd = Some("/tmp".into());
        server.timeout = Some(1000);
        server.disabled = Some(false);
        let json = to_tool_json(&server, &spec(ToolTarget::Cursor));
        assert_eq!(json, json!({"command": "x"}));
    }

    #[test]
    fn test_unrecognizable_entry() {
        assert!(from_tool_json(&json!({"name": "x"}), &spec(ToolTarget::Cursor)).is_none());
        assert!(from_tool_json(&json!("x"), &spec(ToolTarget::Cursor)).is_none());
    }
}

//! Key-level merges into shared settings files.
//!
//! Several tools keep the managed section inside a file that also holds
//! user settings (`.claude/settings.json`, `.gemini/settings.json`,
//! `opencode.json`, `.codex/config.toml`). Only the managed key is
//! replaced; an existing file that cannot be parsed is an error and is
//! never overwritten.

use serde_json::{Map, Value};

/// Set `value` at `key_path` inside an existing JSON object document.
///
/// Missing or blank `existing` starts from `{}`. Intermediate objects are
/// created as needed.
pub fn merge_json(existing: Option<&str>, key_path: &[&str], value: Value) -> Result<Value, String> {
    let mut root = match existing.filter(|s| !s.trim().is_empty()) {
        Some(content) => serde_json::from_str::<Value>(content)
            .map_err(|e| format!("existing file is not valid JSON: {e}"))?,
        None => Value::Object(Map::new()),
    };

    let Some((last, parents)) = key_path.split_last() else {
        return Ok(value);
    };

    let mut current = &mut root;
    for key in parents {
        let Value::Object(map) = current else {
            return Err(format!("expected a JSON object above '{key}'"));
        };
        current = map
            .entry(key.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
    }
    let Value::Object(map) = current else {
        return Err(format!("expected a JSON object above '{last}'"));
    };
    map.insert(last.to_string(), value);

    Ok(root)
}

/// Pretty JSON with a trailing newline.
pub fn to_json_string(value: &Value) -> Result<String, String> {
    serde_json::to_string_pretty(value)
        .map(|s| s + "\n")
        .map_err(|e| e.to_string())
}

/// Replace a top-level table in an existing TOML document.
pub fn merge_toml(existing: Option<&str>, key: &str, value: toml::Value) -> Result<String, String> {
    let mut table = match existing.filter(|s| !s.trim().is_empty()) {
        Some(content) => content
            .parse::<toml::Table>()
            .map_err(|e| format!("existing file is not valid TOML: {e}"))?,
        None => toml::Table::new(),
    };
    table.insert(key.to_string(), value);
    toml::to_string(&table).map_err(|e| e.to_string())
}

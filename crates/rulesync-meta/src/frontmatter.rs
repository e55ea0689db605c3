//! `---`-delimited frontmatter codec.
//!
//! Canonical files carry YAML frontmatter parsed with `serde_yaml`. Several
//! native formats use frontmatter that only looks like YAML (Cursor writes
//! `globs: **/*.ts` unquoted, which YAML reads as an alias), so a lenient
//! line-based `key: value` reader and writer live here as well.

use serde::Serialize;
use serde::de::DeserializeOwned;

const DELIMITER: &str = "---";

/// Split content into its raw frontmatter block (if any) and body.
///
/// Exactly one newline following the closing delimiter is consumed, so
/// [`render`] followed by `split` returns the original body.
pub fn split(content: &str) -> (Option<&str>, &str) {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let Some(rest) = content
        .strip_prefix("---\n")
        .or_else(|| content.strip_prefix("---\r\n"))
    else {
        return (None, content);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == DELIMITER {
            let raw = &rest[..offset];
            let after = &rest[offset + line.len()..];
            let body = after
                .strip_prefix("\r\n")
                .or_else(|| after.strip_prefix('\n'))
                .unwrap_or(after);
            return (Some(raw), body);
        }
        offset += line.len();
    }

    (None, content)
}

/// Parse YAML frontmatter into `T` and return it with the body.
///
/// Missing or empty frontmatter is parsed as an empty mapping, so types with
/// required fields still report them as missing.
pub fn parse_yaml<T: DeserializeOwned>(content: &str) -> Result<(T, String), serde_yaml::Error> {
    let (raw, body) = split(content);
    let raw = raw.filter(|r| !r.trim().is_empty()).unwrap_or("{}");
    let value = serde_yaml::from_str(raw)?;
    Ok((value, body.to_string()))
}

/// Render `---\n<yaml>---\n\n<body>`.
pub fn render<T: Serialize>(frontmatter: &T, body: &str) -> Result<String, serde_yaml::Error> {
    let yaml = serde_yaml::to_string(frontmatter)?;
    Ok(format!("{DELIMITER}\n{yaml}{DELIMITER}\n\n{body}"))
}

/// Read `key: value` pairs from a raw frontmatter block without a YAML parser.
///
/// Lines without a colon, comments and blank lines are skipped. Surrounding
/// matching quotes are removed from values.
pub fn parse_pairs(raw: &str) -> Vec<(String, String)> {
    raw.lines()
        .filter_map(|line| {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                return None;
            }
            let (key, value) = trimmed.split_once(':')?;
            Some((key.trim().to_string(), unquote(value.trim()).to_string()))
        })
        .collect()
}

/// Look up a key in parsed pairs (last occurrence wins).
pub fn pair<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .rev()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// Render `key: value` pairs verbatim, followed by the body.
///
/// Returns the body alone when there are no pairs, unless [`split`] would
/// read the start of the body as frontmatter; an empty block is written
/// ahead of it then.
pub fn render_pairs(pairs: &[(&str, String)], body: &str) -> String {
    if pairs.is_empty() {
        return match split(body) {
            (Some(_), _) => format!("{DELIMITER}\n{DELIMITER}\n\n{body}"),
            (None, _) => body.to_string(),
        };
    }
    let mut out = String::from("---\n");
    for (key, value) in pairs {
        if value.is_empty() {
            out.push_str(&format!("{key}:\n"));
        } else {
            out.push_str(&format!("{key}: {value}\n"));
        }
    }
    out.push_str("---\n\n");
    out.push_str(body);
    out
}

/// Split a comma-separated glob value, tolerating a YAML flow list.
///
/// Commas inside `{...}`, `[...]` or a quoted item belong to the item, so
/// brace globs such as `src/*.{ts,tsx}` stay whole.
pub fn split_list(value: &str) -> Vec<String> {
    let value = value.trim();
    let value = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .unwrap_or(value);

    let mut items = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;
    for (idx, ch) in value.char_indices() {
        match (quote, ch) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') if value[start..idx].trim().is_empty() => quote = Some(ch),
            (None, '{' | '[') => depth += 1,
            (None, '}' | ']') => depth = depth.saturating_sub(1),
            (None, ',') if depth == 0 => {
                items.push(&value[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    items.push(&value[start..]);

    items
        .into_iter()
        .map(|item| unquote(item.trim()).to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde::Deserialize;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Sample {
        #[serde(default)]
        description: String,
        #[serde(default)]
        globs: Vec<String>,
    }

    #[test]
    fn test_split_without_frontmatter() {
        let (raw, body) = split("# Title\n\nbody\n");
        assert_eq!(raw, None);
        assert_eq!(body, "# Title\n\nbody\n");
    }

    #[test]
    fn test_split_unterminated_frontmatter_is_body() {
        let content = "---\ndescription: x\n# no closing\n";
        let (raw, body) = split(content);
        assert_eq!(raw, None);
        assert_eq!(body, content);
    }

    #[test]
    fn test_split_strips_single_blank_line() {
        let (raw, body) = split("---\na: 1\n---\n\n\nbody");
        assert_eq!(raw, Some("a: 1\n"));
        assert_eq!(body, "\nbody");
    }

    #[test]
    fn test_split_crlf() {
        let (raw, body) = split("---\r\na: 1\r\n---\r\n\r\nbody");
        assert_eq!(raw, Some("a: 1\r\n"));
        assert_eq!(body, "body");
    }

    #[test]
    fn test_render_then_parse_preserves_body() {
        let fm = Sample {
            description: "Style".into(),
            globs: vec!["**/*.rs".into()],
        };
        let body = "# Style\n\nUse rustfmt.\n";

        let rendered = render(&fm, body).unwrap();
        let (parsed, parsed_body): (Sample, String) = parse_yaml(&rendered).unwrap();

        assert_eq!(parsed, fm);
        assert_eq!(parsed_body, body);
    }

    #[test]
    fn test_parse_yaml_empty_frontmatter_uses_defaults() {
        let (parsed, body): (Sample, String) = parse_yaml("---\n---\nbody").unwrap();
        assert_eq!(parsed, Sample::default());
        assert_eq!(body, "body");
    }

    #[test]
    fn test_parse_yaml_rejects_malformed() {
        let result: Result<(Sample, String), _> = parse_yaml("---\nglobs: [unclosed\n---\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_pairs_lenient() {
        let pairs = parse_pairs("description: \"Type: strict\"\nglobs: **/*.ts,**/*.tsx\nalwaysApply: false\n");
        assert_eq!(pair(&pairs, "description"), Some("Type: strict"));
        assert_eq!(pair(&pairs, "globs"), Some("**/*.ts,**/*.tsx"));
        assert_eq!(pair(&pairs, "alwaysApply"), Some("false"));
        assert_eq!(pair(&pairs, "missing"), None);
    }

    #[test]
    fn test_split_list_forms() {
        assert_eq!(split_list("**/*.ts, **/*.tsx"), vec!["**/*.ts", "**/*.tsx"]);
        assert_eq!(split_list("[\"src/**\", 'lib/**']"), vec!["src/**", "lib/**"]);
        assert!(split_list("").is_empty());
    }

    #[test]
    fn test_split_list_keeps_brace_and_class_groups() {
        assert_eq!(
            split_list("src/**/*.{ts,tsx},lib/[a,b]/*.rs"),
            vec!["src/**/*.{ts,tsx}", "lib/[a,b]/*.rs"]
        );
        assert_eq!(split_list("[\"a,b/**\", c/**]"), vec!["a,b/**", "c/**"]);
    }

    #[test]
    fn test_render_pairs() {
        let out = render_pairs(&[("description", String::new()), ("alwaysApply", "true".into())], "body");
        assert_eq!(out, "---\ndescription:\nalwaysApply: true\n---\n\nbody");
        assert_eq!(render_pairs(&[], "body"), "body");
    }

    #[test]
    fn test_render_pairs_guards_leading_thematic_break() {
        let body = "---\nIntro\n---\nRest\n";
        let out = render_pairs(&[], body);
        assert_eq!(out, "---\n---\n\n---\nIntro\n---\nRest\n");
        assert_eq!(split(&out), (Some(""), body));
    }
}

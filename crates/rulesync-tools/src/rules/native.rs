//! Native rule frontmatter, per format.
//!
//! Native frontmatter is read with the lenient `key: value` reader since
//! most tools accept unquoted globs that YAML rejects.

use super::RuleFormat;
use crate::classify::augment::{self, AugmentRuleType};
use crate::classify::cursor::CursorFields;
use crate::classify::kiro::{self, KiroInclusion};
use crate::classify::windsurf::{self, WindsurfTrigger};
use rulesync_meta::frontmatter::{self, pair, parse_pairs, render_pairs, split_list};

/// Format-specific activation fields of a native rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NativeRuleMeta {
    Plain,
    Cursor(CursorFields),
    Copilot {
        description: String,
        apply_to: Vec<String>,
    },
    Augment {
        rule_type: AugmentRuleType,
        description: String,
    },
    Windsurf {
        trigger: WindsurfTrigger,
        globs: Vec<String>,
        description: String,
    },
    Kiro {
        inclusion: KiroInclusion,
        file_match_pattern: Option<String>,
    },
}

pub(super) fn parse(format: RuleFormat, stem: &str, content: &str) -> Result<(NativeRuleMeta, String), String> {
    if format == RuleFormat::Plain {
        return Ok((NativeRuleMeta::Plain, content.to_string()));
    }

    let (raw, body) = frontmatter::split(content);
    let pairs = parse_pairs(raw.unwrap_or_default());
    let text = |key: &str| pair(&pairs, key).unwrap_or_default().to_string();

    let meta = match format {
        RuleFormat::Plain => NativeRuleMeta::Plain,
        RuleFormat::Cursor => NativeRuleMeta::Cursor(CursorFields {
            description: text("description"),
            globs: split_list(&text("globs")),
            always_apply: match pair(&pairs, "alwaysApply") {
                None | Some("") | Some("false") => false,
                Some("true") => true,
                Some(other) => return Err(format!("alwaysApply must be true or false, got '{other}'")),
            },
        }),
        RuleFormat::Copilot => NativeRuleMeta::Copilot {
            description: text("description"),
            apply_to: split_list(&text("applyTo")),
        },
        RuleFormat::Augment => {
            let explicit = non_empty(pair(&pairs, "type"))
                .map(str::parse::<AugmentRuleType>)
                .transpose()?;
            let description = text("description");
            NativeRuleMeta::Augment {
                rule_type: augment::classify(explicit, stem, &description),
                description,
            }
        }
        RuleFormat::Windsurf => {
            let explicit = non_empty(pair(&pairs, "trigger"))
                .map(str::parse::<WindsurfTrigger>)
                .transpose()?;
            let globs = split_list(&text("globs"));
            let description = text("description");
            NativeRuleMeta::Windsurf {
                trigger: windsurf::classify(explicit, &globs, &description),
                globs,
                description,
            }
        }
        RuleFormat::Kiro => {
            let explicit = non_empty(pair(&pairs, "inclusion"))
                .map(str::parse::<KiroInclusion>)
                .transpose()?;
            let pattern = non_empty(pair(&pairs, "fileMatchPattern")).map(str::to_string);
            NativeRuleMeta::Kiro {
                inclusion: kiro::classify(explicit, pattern.as_deref()),
                file_match_pattern: pattern,
            }
        }
    };

    Ok((meta, body.to_string()))
}

pub(super) fn render(meta: &NativeRuleMeta, body: &str) -> String {
    let pairs: Vec<(&str, String)> = match meta {
        NativeRuleMeta::Plain => return body.to_string(),
        NativeRuleMeta::Cursor(fields) => vec![
            ("description", fields.description.clone()),
            ("globs", fields.globs.join(",")),
            ("alwaysApply", fields.always_apply.to_string()),
        ],
        NativeRuleMeta::Copilot {
            description,
            apply_to,
        } => {
            let mut pairs = Vec::new();
            if !description.is_empty() {
                pairs.push(("description", description.clone()));
            }
            if !apply_to.is_empty() {
                pairs.push(("applyTo", quoted(&apply_to.join(","))));
            }
            pairs
        }
        NativeRuleMeta::Augment {
            rule_type,
            description,
        } => {
            let mut pairs = vec![("type", rule_type.as_str().to_string())];
            if !description.is_empty() {
                pairs.push(("description", description.clone()));
            }
            pairs
        }
        NativeRuleMeta::Windsurf {
            trigger,
            globs,
            description,
        } => {
            let mut pairs = vec![("trigger", trigger.as_str().to_string())];
            if !globs.is_empty() {
                pairs.push(("globs", globs.join(",")));
            }
            if !description.is_empty() {
                pairs.push(("description", description.clone()));
            }
            pairs
        }
        NativeRuleMeta::Kiro {
            inclusion,
            file_match_pattern,
        } => {
            let mut pairs = vec![("inclusion", inclusion.as_str().to_string())];
            if let Some(pattern) = file_match_pattern {
                pairs.push(("fileMatchPattern", quoted(pattern)));
            }
            pairs
        }
    };
    render_pairs(&pairs, body)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn quoted(value: &str) -> String {
    format!("\"{value}\"")
}

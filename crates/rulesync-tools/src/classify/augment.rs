//! Augment Code rule types.

use super::applies_everywhere;
use rulesync_meta::RuleFrontmatter;
use std::str::FromStr;

/// Activation type written as `type:` in `.augment/rules/*.md`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AugmentRuleType {
    Always,
    Manual,
    Auto,
}

impl AugmentRuleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Manual => "manual",
            Self::Auto => "auto",
        }
    }
}

impl FromStr for AugmentRuleType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "always" => Ok(Self::Always),
            "manual" => Ok(Self::Manual),
            "auto" => Ok(Self::Auto),
            other => Err(format!("unknown augment rule type '{other}'")),
        }
    }
}

/// Type encoded as a `-always`, `-manual` or `-auto` filename suffix.
pub fn from_suffix(stem: &str) -> Option<AugmentRuleType> {
    [
        ("-always", AugmentRuleType::Always),
        ("-manual", AugmentRuleType::Manual),
        ("-auto", AugmentRuleType::Auto),
    ]
    .into_iter()
    .find(|(suffix, _)| stem.ends_with(suffix) && stem.len() > suffix.len())
    .map(|(_, ty)| ty)
}

/// Classify a native rule.
///
/// Precedence: explicit `type` > filename suffix > non-empty description
/// (auto) > manual.
pub fn classify(explicit: Option<AugmentRuleType>, stem: &str, description: &str) -> AugmentRuleType {
    explicit
        .or_else(|| from_suffix(stem))
        .unwrap_or(if description.trim().is_empty() {
            AugmentRuleType::Manual
        } else {
            AugmentRuleType::Auto
        })
}

/// Type for a canonical rule: everywhere → always, description → auto,
/// otherwise manual.
pub fn from_canonical(frontmatter: &RuleFrontmatter) -> AugmentRuleType {
    if applies_everywhere(frontmatter) {
        AugmentRuleType::Always
    } else if !frontmatter.description.trim().is_empty() {
        AugmentRuleType::Auto
    } else {
        AugmentRuleType::Manual
    }
}

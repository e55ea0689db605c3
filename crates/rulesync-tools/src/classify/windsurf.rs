//! Windsurf rule triggers.

use super::applies_everywhere;
use rulesync_meta::RuleFrontmatter;
use std::str::FromStr;

/// `trigger:` value in `.windsurf/rules/*.md`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindsurfTrigger {
    AlwaysOn,
    Manual,
    ModelDecision,
    Glob,
}

impl WindsurfTrigger {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AlwaysOn => "always_on",
            Self::Manual => "manual",
            Self::ModelDecision => "model_decision",
            Self::Glob => "glob",
        }
    }
}

impl FromStr for WindsurfTrigger {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "always_on" => Ok(Self::AlwaysOn),
            "manual" => Ok(Self::Manual),
            "model_decision" => Ok(Self::ModelDecision),
            "glob" => Ok(Self::Glob),
            other => Err(format!("unknown windsurf trigger '{other}'")),
        }
    }
}

/// Classify a native rule.
///
/// Precedence: explicit `trigger` > non-empty globs (glob) > description
/// (model_decision) > manual.
pub fn classify(explicit: Option<WindsurfTrigger>, globs: &[String], description: &str) -> WindsurfTrigger {
    if let Some(trigger) = explicit {
        trigger
    } else if !globs.is_empty() {
        WindsurfTrigger::Glob
    } else if !description.trim().is_empty() {
        WindsurfTrigger::ModelDecision
    } else {
        WindsurfTrigger::Manual
    }
}

/// Trigger for a canonical rule: everywhere → always_on, then the same
/// order as [`classify`].
pub fn from_canonical(frontmatter: &RuleFrontmatter) -> WindsurfTrigger {
    if applies_everywhere(frontmatter) {
        WindsurfTrigger::AlwaysOn
    } else {
        classify(None, &frontmatter.globs, &frontmatter.description)
    }
}

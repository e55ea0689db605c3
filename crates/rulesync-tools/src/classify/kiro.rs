//! Kiro steering inclusion modes.

use super::applies_everywhere;
use rulesync_meta::RuleFrontmatter;
use std::str::FromStr;

/// `inclusion:` value in `.kiro/steering/*.md`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KiroInclusion {
    Always,
    FileMatch,
    Manual,
}

impl KiroInclusion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::FileMatch => "fileMatch",
            Self::Manual => "manual",
        }
    }
}

impl FromStr for KiroInclusion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "always" => Ok(Self::Always),
            "fileMatch" => Ok(Self::FileMatch),
            "manual" => Ok(Self::Manual),
            other => Err(format!("unknown kiro inclusion '{other}'")),
        }
    }
}

/// Classify a native steering file.
///
/// Precedence: explicit `inclusion` > `fileMatchPattern` present
/// (fileMatch) > always. Steering files without frontmatter are always
/// included.
pub fn classify(explicit: Option<KiroInclusion>, file_match_pattern: Option<&str>) -> KiroInclusion {
    match (explicit, file_match_pattern) {
        (Some(inclusion), _) => inclusion,
        (None, Some(pattern)) if !pattern.trim().is_empty() => KiroInclusion::FileMatch,
        _ => KiroInclusion::Always,
    }
}

/// Inclusion for a canonical rule: everywhere → always, globs → fileMatch,
/// otherwise manual.
pub fn from_canonical(frontmatter: &RuleFrontmatter) -> KiroInclusion {
    if applies_everywhere(frontmatter) {
        KiroInclusion::Always
    } else if !frontmatter.globs.is_empty() {
        KiroInclusion::FileMatch
    } else {
        KiroInclusion::Manual
    }
}

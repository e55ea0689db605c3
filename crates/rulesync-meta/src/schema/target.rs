//! Tool identifiers, feature domains and entity targeting

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Unknown identifier in a target or feature list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {id}")]
pub struct ParseIdError {
    pub kind: &'static str,
    pub id: String,
}

/// Every downstream tool rulesync can generate for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ToolTarget {
    AgentsMd,
    AmazonQCli,
    AugmentCode,
    AugmentCodeLegacy,
    ClaudeCode,
    Cline,
    CodexCli,
    Copilot,
    Cursor,
    GeminiCli,
    Junie,
    Kiro,
    OpenCode,
    QwenCode,
    Roo,
    Windsurf,
}

impl ToolTarget {
    /// All targets, in identifier order.
    pub const ALL: [ToolTarget; 16] = [
        Self::AgentsMd,
        Self::AmazonQCli,
        Self::AugmentCode,
        Self::AugmentCodeLegacy,
        Self::ClaudeCode,
        Self::Cline,
        Self::CodexCli,
        Self::Copilot,
        Self::Cursor,
        Self::GeminiCli,
        Self::Junie,
        Self::Kiro,
        Self::OpenCode,
        Self::QwenCode,
        Self::Roo,
        Self::Windsurf,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AgentsMd => "agentsmd",
            Self::AmazonQCli => "amazonqcli",
            Self::AugmentCode => "augmentcode",
            Self::AugmentCodeLegacy => "augmentcode-legacy",
            Self::ClaudeCode => "claudecode",
            Self::Cline => "cline",
            Self::CodexCli => "codexcli",
            Self::Copilot => "copilot",
            Self::Cursor => "cursor",
            Self::GeminiCli => "geminicli",
            Self::Junie => "junie",
            Self::Kiro => "kiro",
            Self::OpenCode => "opencode",
            Self::QwenCode => "qwencode",
            Self::Roo => "roo",
            Self::Windsurf => "windsurf",
        }
    }
}

impl fmt::Display for ToolTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolTarget {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ParseIdError {
                kind: "tool target",
                id: s.to_string(),
            })
    }
}

/// The four feature domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Feature {
    Rules,
    Ignore,
    Commands,
    Mcp,
}

impl Feature {
    pub const ALL: [Feature; 4] = [Self::Rules, Self::Ignore, Self::Commands, Self::Mcp];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rules => "rules",
            Self::Ignore => "ignore",
            Self::Commands => "commands",
            Self::Mcp => "mcp",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Feature {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| ParseIdError {
                kind: "feature",
                id: s.to_string(),
            })
    }
}

/// Which tools an entity applies to.
///
/// Serialized as a string list: `["*"]` is the wildcard, anything else an
/// explicit set. Deserialization is lenient (an empty list or a wildcard
/// mixed with ids parses as `Only`) so such files fail validation with a
/// descriptive message instead of a parse error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Targets {
    Wildcard,
    Only(BTreeSet<String>),
}

impl Targets {
    pub const WILDCARD: &'static str = "*";

    /// Explicit target set from tool identifiers.
    pub fn only<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Only(ids.into_iter().map(Into::into).collect())
    }

    /// Whether `target` participates.
    pub fn includes(&self, target: ToolTarget) -> bool {
        match self {
            Self::Wildcard => true,
            Self::Only(ids) => ids.contains(target.as_str()),
        }
    }

    /// Explicit ids that name no known tool.
    pub fn unknown_ids(&self) -> Vec<String> {
        match self {
            Self::Wildcard => Vec::new(),
            Self::Only(ids) => ids
                .iter()
                .filter(|id| id.as_str() != Self::WILDCARD && id.parse::<ToolTarget>().is_err())
                .cloned()
                .collect(),
        }
    }
}

/// Target filtering: absent targets mean "applies everywhere".
pub fn applies_to(targets: Option<&Targets>, target: ToolTarget) -> bool {
    targets.is_none_or(|t| t.includes(target))
}

impl Serialize for Targets {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Wildcard => [Self::WILDCARD].serialize(serializer),
            Self::Only(ids) => ids.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Targets {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let ids = Vec::<String>::deserialize(deserializer)?;
        if ids.len() == 1 && ids[0] == Self::WILDCARD {
            Ok(Self::Wildcard)
        } else {
            Ok(Self::Only(ids.into_iter().collect()))
        }
    }
}

//! Core types for the tool registry

use rulesync_meta::{Feature, ToolTarget};

/// A tool and the features it supports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolRegistration {
    pub target: ToolTarget,
    /// Display name (e.g., "Claude Code")
    pub name: &'static str,
    pub features: &'static [Feature],
}

impl ToolRegistration {
    pub const fn new(target: ToolTarget, name: &'static str, features: &'static [Feature]) -> Self {
        Self {
            target,
            name,
            features,
        }
    }

    pub fn supports(&self, feature: Feature) -> bool {
        self.features.contains(&feature)
    }
}

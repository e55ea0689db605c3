//! Tool registry storage

use super::ToolRegistration;
use rulesync_meta::{Feature, ToolTarget};
use std::collections::BTreeMap;

/// Lookup of tool registrations by target.
#[derive(Debug, Clone, Default)]
pub struct ToolRegistry {
    tools: BTreeMap<ToolTarget, ToolRegistration>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry pre-populated with all built-in tools.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for reg in super::builtins::builtin_registrations() {
            registry.register(reg);
        }
        registry
    }

    /// Register a tool, replacing any earlier registration for its target.
    pub fn register(&mut self, reg: ToolRegistration) {
        self.tools.insert(reg.target, reg);
    }

    pub fn get(&self, target: ToolTarget) -> Option<&ToolRegistration> {
        self.tools.get(&target)
    }

    pub fn contains(&self, target: ToolTarget) -> bool {
        self.tools.contains_key(&target)
    }

    /// Whether `target` is registered with `feature`.
    pub fn supports(&self, target: ToolTarget, feature: Feature) -> bool {
        self.get(target).is_some_and(|reg| reg.supports(feature))
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// All registered targets, in identifier order.
    pub fn list(&self) -> Vec<ToolTarget> {
        self.tools.keys().copied().collect()
    }
}

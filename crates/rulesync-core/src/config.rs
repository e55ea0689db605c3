//! Sync configuration.
//!
//! ```toml
//! baseDirs = [".", "packages/app"]
//! targets = ["claudecode", "cursor"]
//! features = ["*"]
//! ```
//!
//! Finding and merging configuration files is left to the caller.

use crate::{Error, Result};
use rulesync_meta::{Feature, ToolTarget};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

const WILDCARD: &str = "*";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SyncConfig {
    /// Project roots to sync, relative to the working directory.
    pub base_dirs: Vec<String>,
    /// Tool ids, or `"*"` for every tool.
    pub targets: Vec<String>,
    /// Feature ids, or `"*"` for every feature.
    pub features: Vec<String>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            base_dirs: vec![".".to_string()],
            targets: vec![WILDCARD.to_string()],
            features: vec![WILDCARD.to_string()],
        }
    }
}

impl SyncConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        if config.base_dirs.is_empty() {
            return Err(Error::config("baseDirs must not be empty"));
        }
        Ok(config)
    }

    /// Builder-style target selection.
    pub fn with_targets(mut self, targets: &[ToolTarget]) -> Self {
        self.targets = targets.iter().map(|t| t.as_str().to_string()).collect();
        self
    }

    /// Builder-style feature selection.
    pub fn with_features(mut self, features: &[Feature]) -> Self {
        self.features = features.iter().map(|f| f.as_str().to_string()).collect();
        self
    }

    pub fn with_base_dirs(mut self, base_dirs: &[&str]) -> Self {
        self.base_dirs = base_dirs.iter().map(|d| d.to_string()).collect();
        self
    }

    /// Selected tools, wildcard expanded, in identifier order.
    pub fn resolved_targets(&self) -> Result<Vec<ToolTarget>> {
        resolve(&self.targets, "targets", &ToolTarget::ALL)
    }

    /// Selected features, wildcard expanded.
    pub fn resolved_features(&self) -> Result<Vec<Feature>> {
        resolve(&self.features, "features", &Feature::ALL)
    }
}

fn resolve<T>(ids: &[String], field: &str, all: &[T]) -> Result<Vec<T>>
where
    T: FromStr + Copy + Ord,
{
    let mut resolved = Vec::new();
    for id in ids {
        if id == WILDCARD {
            resolved.extend_from_slice(all);
            continue;
        }
        let value = id
            .parse::<T>()
            .map_err(|_| Error::config(format!("unknown id '{id}' in {field}")))?;
        resolved.push(value);
    }
    resolved.sort();
    resolved.dedup();
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = SyncConfig::from_toml_str("").unwrap();
        assert_eq!(config, SyncConfig::default());
        assert_eq!(config.resolved_targets().unwrap().len(), ToolTarget::ALL.len());
        assert_eq!(config.resolved_features().unwrap(), Feature::ALL.to_vec());
    }

    #[test]
    fn test_explicit_lists() {
        let config = SyncConfig::from_toml_str(
            "baseDirs = [\"a\"]\ntargets = [\"cursor\", \"claudecode\", \"cursor\"]\nfeatures = [\"mcp\"]\n",
        )
        .unwrap();

        assert_eq!(config.base_dirs, vec!["a"]);
        assert_eq!(
            config.resolved_targets().unwrap(),
            vec![ToolTarget::ClaudeCode, ToolTarget::Cursor]
        );
        assert_eq!(config.resolved_features().unwrap(), vec![Feature::Mcp]);
    }

    #[test]
    fn test_unknown_ids_rejected() {
        let config = SyncConfig::default().with_features(&[]);
        assert!(config.resolved_features().unwrap().is_empty());

        let config = SyncConfig {
            targets: vec!["vscode".into()],
            ..SyncConfig::default()
        };
        let err = config.resolved_targets().unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
        assert!(err.to_string().contains("vscode"));
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(
            SyncConfig::from_toml_str("targets = "),
            Err(Error::TomlDe(_))
        ));
        assert!(matches!(
            SyncConfig::from_toml_str("baseDirs = []"),
            Err(Error::Config { .. })
        ));
    }
}

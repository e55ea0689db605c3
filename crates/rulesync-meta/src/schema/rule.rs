//! Canonical rule - `.rulesync/rules/*.md`
//!
//! ```markdown
//! ---
//! root: false
//! targets: ["*"]
//! description: TypeScript conventions
//! globs: ["**/*.ts"]
//! cursor:
//!   ruleType: specificFiles
//! ---
//!
//! Prefer `unknown` over `any`.
//! ```

use crate::frontmatter;
use crate::validation::{ValidationError, ValidationResult, validate_targets};
use crate::{Error, FileLocation, Result, Targets};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Rule frontmatter.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleFrontmatter {
    /// The single overview rule of a collection.
    #[serde(default)]
    pub root: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub targets: Option<Targets>,
    #[serde(default)]
    pub description: String,
    /// Ordered file globs the rule applies to.
    #[serde(default)]
    pub globs: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<CursorHints>,
}

/// Cursor-specific hints.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CursorHints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_type: Option<CursorRuleType>,
}

/// The four Cursor rule activation modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CursorRuleType {
    Always,
    Manual,
    SpecificFiles,
    Intelligently,
}

impl RuleFrontmatter {
    pub fn validate(&self) -> ValidationResult {
        validate_targets("targets", self.targets.as_ref())?;
        if let Some(idx) = self.globs.iter().position(|g| g.trim().is_empty()) {
            return Err(ValidationError::new(format!("globs[{idx}]"), "must not be empty"));
        }
        if let Some(tags) = &self.tags
            && tags.iter().any(|t| t.trim().is_empty())
        {
            return Err(ValidationError::new("tags", "must not contain empty tags"));
        }
        Ok(())
    }

    /// The rule's Cursor mode hint, if any.
    pub fn cursor_rule_type(&self) -> Option<CursorRuleType> {
        self.cursor.as_ref().and_then(|c| c.rule_type)
    }
}

/// A canonical rule file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RulesyncRule {
    pub location: FileLocation,
    pub frontmatter: RuleFrontmatter,
    /// Opaque markdown, copied verbatim.
    pub body: String,
}

impl RulesyncRule {
    /// Build a rule, checking the frontmatter first when `validate` is set.
    pub fn new(
        location: FileLocation,
        frontmatter: RuleFrontmatter,
        body: impl Into<String>,
        validate: bool,
    ) -> std::result::Result<Self, ValidationError> {
        let rule = Self::new_unchecked(location, frontmatter, body);
        if validate {
            rule.validate()?;
        }
        Ok(rule)
    }

    /// Build a rule without validation; call [`Self::validate`] later.
    pub fn new_unchecked(
        location: FileLocation,
        frontmatter: RuleFrontmatter,
        body: impl Into<String>,
    ) -> Self {
        Self {
            location,
            frontmatter,
            body: body.into(),
        }
    }

    /// Parse and validate a canonical rule file's content.
    pub fn from_content(location: FileLocation, content: &str) -> Result<Self> {
        let (frontmatter, body) = frontmatter::parse_yaml::<RuleFrontmatter>(content)
            .map_err(|e| Error::parse(location.path().to_native(), "yaml frontmatter", e))?;
        let path = location.path().to_native();
        Self::new(location, frontmatter, body, true).map_err(|e| Error::invalid(path, e))
    }

    pub fn validate(&self) -> ValidationResult {
        self.frontmatter.validate()
    }

    pub fn is_root(&self) -> bool {
        self.frontmatter.root
    }

    /// File name without the `.md` extension.
    pub fn stem(&self) -> &str {
        self.location.stem(crate::layout::MARKDOWN_EXT)
    }

    pub fn to_file_content(&self) -> Result<String> {
        Ok(frontmatter::render(&self.frontmatter, &self.body)?)
    }
}

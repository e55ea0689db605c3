//! Canonical slash-command - `.rulesync/commands/*.md`

use crate::frontmatter;
use crate::validation::{ValidationError, ValidationResult, validate_targets};
use crate::{Error, FileLocation, Result, Targets};
use serde::{Deserialize, Serialize};

/// Command frontmatter. `description` is required by the schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandFrontmatter {
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub targets: Option<Targets>,
}

/// A canonical command file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RulesyncCommand {
    pub location: FileLocation,
    pub frontmatter: CommandFrontmatter,
    pub body: String,
}

impl RulesyncCommand {
    pub fn new(
        location: FileLocation,
        frontmatter: CommandFrontmatter,
        body: impl Into<String>,
        validate: bool,
    ) -> std::result::Result<Self, ValidationError> {
        let command = Self::new_unchecked(location, frontmatter, body);
        if validate {
            command.validate()?;
        }
        Ok(command)
    }

    pub fn new_unchecked(
        location: FileLocation,
        frontmatter: CommandFrontmatter,
        body: impl Into<String>,
    ) -> Self {
        Self {
            location,
            frontmatter,
            body: body.into(),
        }
    }

    pub fn from_content(location: FileLocation, content: &str) -> Result<Self> {
        let (frontmatter, body) = frontmatter::parse_yaml::<CommandFrontmatter>(content)
            .map_err(|e| Error::parse(location.path().to_native(), "yaml frontmatter", e))?;
        let path = location.path().to_native();
        Self::new(location, frontmatter, body, true).map_err(|e| Error::invalid(path, e))
    }

    pub fn validate(&self) -> ValidationResult {
        validate_targets("targets", self.frontmatter.targets.as_ref())
    }

    /// File name without the `.md` extension.
    pub fn stem(&self) -> &str {
        self.location.stem(crate::layout::MARKDOWN_EXT)
    }

    pub fn to_file_content(&self) -> Result<String> {
        Ok(frontmatter::render(&self.frontmatter, &self.body)?)
    }
}

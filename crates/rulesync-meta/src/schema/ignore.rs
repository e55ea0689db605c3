//! Canonical ignore file - `.rulesyncignore`

use crate::validation::{ValidationError, ValidationResult};
use crate::{Error, FileLocation, Result};

/// Prefix of an inert passthrough note in serialized ignore content.
pub const NOTE_PREFIX: &str = "# permission: ";

/// Ordered gitignore-syntax patterns.
///
/// Order is significant: later negations override earlier exclusions.
/// Comments and blank lines are dropped on parse. Passthrough notes carry
/// permission entries that have no pattern meaning; they are serialized as
/// comments and never treated as patterns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RulesyncIgnore {
    pub location: FileLocation,
    pub patterns: Vec<String>,
    pub notes: Vec<String>,
}

impl RulesyncIgnore {
    pub fn new(
        location: FileLocation,
        patterns: Vec<String>,
        notes: Vec<String>,
        validate: bool,
    ) -> std::result::Result<Self, ValidationError> {
        let ignore = Self {
            location,
            patterns,
            notes,
        };
        if validate {
            ignore.validate()?;
        }
        Ok(ignore)
    }

    pub fn from_content(location: FileLocation, content: &str) -> Result<Self> {
        let (patterns, notes) = parse_lines(content);
        let path = location.path().to_native();
        Self::new(location, patterns, notes, true).map_err(|e| Error::invalid(path, e))
    }

    pub fn validate(&self) -> ValidationResult {
        for (idx, pattern) in self.patterns.iter().enumerate() {
            if pattern.trim().is_empty() {
                return Err(ValidationError::new(
                    format!("patterns[{idx}]"),
                    "must not be empty",
                ));
            }
            if pattern.contains('\n') || pattern.contains('\r') {
                return Err(ValidationError::new(
                    format!("patterns[{idx}]"),
                    "must be a single line",
                ));
            }
        }
        Ok(())
    }

    pub fn to_file_content(&self) -> String {
        let mut out = String::new();
        for pattern in &self.patterns {
            out.push_str(pattern);
            out.push('\n');
        }
        for note in &self.notes {
            out.push_str(NOTE_PREFIX);
            out.push_str(note);
            out.push('\n');
        }
        out
    }
}

/// Split gitignore content into patterns and passthrough notes.
pub fn parse_lines(content: &str) -> (Vec<String>, Vec<String>) {
    let mut patterns = Vec::new();
    let mut notes = Vec::new();
    for line in content.lines() {
        let trimmed = line.trim();
        if let Some(note) = trimmed.strip_prefix(NOTE_PREFIX.trim_end()) {
            let note = note.trim();
            if !note.is_empty() {
                notes.push(note.to_string());
            }
        } else if !trimmed.is_empty() && !trimmed.starts_with('#') {
            patterns.push(trimmed.to_string());
        }
    }
    (patterns, notes)
}

//! Schema validation results

use crate::schema::Targets;

/// A schema violation on a single entity.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Dotted path of the offending field (e.g. `mcpServers.github.url`)
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Outcome of a deferred `validate()` call.
pub type ValidationResult = std::result::Result<(), ValidationError>;

/// Shared check for the `targets` field of every canonical entity.
///
/// Absent targets are valid. Present targets must be the lone wildcard or a
/// non-empty explicit set that does not mention the wildcard.
pub fn validate_targets(field: &str, targets: Option<&Targets>) -> ValidationResult {
    match targets {
        None | Some(Targets::Wildcard) => Ok(()),
        Some(Targets::Only(ids)) if ids.is_empty() => {
            Err(ValidationError::new(field, "must not be empty"))
        }
        Some(Targets::Only(ids)) if ids.contains(Targets::WILDCARD) => Err(ValidationError::new(
            field,
            "the wildcard cannot be combined with explicit targets",
        )),
        Some(Targets::Only(ids)) => match ids.iter().find(|id| id.trim().is_empty()) {
            Some(_) => Err(ValidationError::new(field, "contains an empty identifier")),
            None => Ok(()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn only(ids: &[&str]) -> Targets {
        Targets::Only(ids.iter().map(|s| s.to_string()).collect::<BTreeSet<_>>())
    }

    #[test]
    fn test_absent_and_wildcard_are_valid() {
        assert!(validate_targets("targets", None).is_ok());
        assert!(validate_targets("targets", Some(&Targets::Wildcard)).is_ok());
        assert!(validate_targets("targets", Some(&only(&["cursor"]))).is_ok());
    }

    #[test]
    fn test_empty_set_is_invalid() {
        let err = validate_targets("targets", Some(&only(&[]))).unwrap_err();
        assert_eq!(err.field, "targets");
    }

    #[test]
    fn test_mixed_wildcard_is_invalid() {
        let err = validate_targets("targets", Some(&only(&["*", "cursor"]))).unwrap_err();
        assert!(err.message.contains("wildcard"));
    }
}

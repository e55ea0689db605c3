//! Cursor rule activation modes.
//!
//! A `.mdc` file expresses activation implicitly through `description`,
//! `globs` and `alwaysApply`; the canonical model wants one explicit
//! [`CursorRuleType`].

use super::applies_everywhere;
use rulesync_meta::{CursorRuleType, RuleFrontmatter};

/// The three activation fields of a Cursor `.mdc` file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CursorFields {
    pub description: String,
    pub globs: Vec<String>,
    pub always_apply: bool,
}

/// Classify native fields. First match wins:
///
/// 1. `alwaysApply` → always
/// 2. globs exactly `["*"]` → manual
/// 3. description and globs both present → manual
/// 4. globs → specificFiles
/// 5. description → intelligently
/// 6. otherwise → manual
pub fn classify(fields: &CursorFields) -> CursorRuleType {
    let has_description = !fields.description.trim().is_empty();
    let has_globs = !fields.globs.is_empty();

    if fields.always_apply {
        CursorRuleType::Always
    } else if (fields.globs.len() == 1 && fields.globs[0] == "*") || (has_description && has_globs)
    {
        CursorRuleType::Manual
    } else if has_globs {
        CursorRuleType::SpecificFiles
    } else if has_description {
        CursorRuleType::Intelligently
    } else {
        CursorRuleType::Manual
    }
}

/// Native fields for a mode. Direct table lookup.
pub fn native_fields(mode: CursorRuleType, description: &str, globs: &[String]) -> CursorFields {
    match mode {
        CursorRuleType::Always => CursorFields {
            description: description.to_string(),
            globs: Vec::new(),
            always_apply: true,
        },
        CursorRuleType::Manual => CursorFields::default(),
        CursorRuleType::SpecificFiles => CursorFields {
            description: String::new(),
            globs: globs.to_vec(),
            always_apply: false,
        },
        CursorRuleType::Intelligently => CursorFields {
            description: description.to_string(),
            globs: Vec::new(),
            always_apply: false,
        },
    }
}

/// Mode for a canonical rule: the `cursor.ruleType` hint, else inferred.
pub fn mode_for(frontmatter: &RuleFrontmatter) -> CursorRuleType {
    frontmatter
        .cursor_rule_type()
        .unwrap_or_else(|| infer_mode(frontmatter))
}

/// Inference without a hint: everywhere → always, globs → specificFiles,
/// description → intelligently, otherwise manual.
pub fn infer_mode(frontmatter: &RuleFrontmatter) -> CursorRuleType {
    if applies_everywhere(frontmatter) {
        CursorRuleType::Always
    } else if !frontmatter.globs.is_empty() {
        CursorRuleType::SpecificFiles
    } else if !frontmatter.description.trim().is_empty() {
        CursorRuleType::Intelligently
    } else {
        CursorRuleType::Manual
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn fields(description: &str, globs: &[&str], always_apply: bool) -> CursorFields {
        CursorFields {
            description: description.to_string(),
            globs: globs.iter().map(|g| g.to_string()).collect(),
            always_apply,
        }
    }

    #[rstest]
    #[case(fields("", &["**/*"], true), CursorRuleType::Always)]
    #[case(fields("X", &["src/**"], true), CursorRuleType::Always)]
    #[case(fields("", &["*"], false), CursorRuleType::Manual)]
    #[case(fields("X", &["*"], false), CursorRuleType::Manual)]
    #[case(fields("X", &["**/*.ts"], false), CursorRuleType::Manual)]
    #[case(fields("", &["**/*.ts"], false), CursorRuleType::SpecificFiles)]
    #[case(fields("X", &[], false), CursorRuleType::Intelligently)]
    #[case(fields("  ", &[], false), CursorRuleType::Manual)]
    #[case(fields("", &[], false), CursorRuleType::Manual)]
    fn test_classify(#[case] input: CursorFields, #[case] expected: CursorRuleType) {
        assert_eq!(classify(&input), expected);
    }

    #[rstest]
    #[case(CursorRuleType::Always)]
    #[case(CursorRuleType::SpecificFiles)]
    #[case(CursorRuleType::Intelligently)]
    #[case(CursorRuleType::Manual)]
    fn test_native_fields_classify_back(#[case] mode: CursorRuleType) {
        let globs = vec!["src/**/*.rs".to_string()];
        let native = native_fields(mode, "Rust style", &globs);
        assert_eq!(classify(&native), mode);
    }

    #[test]
    fn test_hint_overrides_inference() {
        let mut frontmatter = RuleFrontmatter {
            globs: vec!["src/**".into()],
            ..Default::default()
        };
        assert_eq!(mode_for(&frontmatter), CursorRuleType::SpecificFiles);

        frontmatter.cursor = Some(rulesync_meta::CursorHints {
            rule_type: Some(CursorRuleType::Intelligently),
        });
        assert_eq!(mode_for(&frontmatter), CursorRuleType::Intelligently);
    }

    #[rstest]
    #[case(true, &[], "", CursorRuleType::Always)]
    #[case(false, &["**/*"], "", CursorRuleType::Always)]
    #[case(false, &["src/**"], "X", CursorRuleType::SpecificFiles)]
    #[case(false, &[], "X", CursorRuleType::Intelligently)]
    #[case(false, &[], "", CursorRuleType::Manual)]
    fn test_infer_mode(
        #[case] root: bool,
        #[case] globs: &[&str],
        #[case] description: &str,
        #[case] expected: CursorRuleType,
    ) {
        let frontmatter = RuleFrontmatter {
            root,
            description: description.into(),
            globs: globs.iter().map(|g| g.to_string()).collect(),
            ..Default::default()
        };
        assert_eq!(infer_mode(&frontmatter), expected);
    }
}

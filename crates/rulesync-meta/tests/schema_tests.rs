use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;
use rulesync_meta::validation::validate_targets;
use rulesync_meta::{FileLocation, RuleFrontmatter, RulesyncRule, Targets, ToolTarget, applies_to};

fn rule_location(name: &str) -> FileLocation {
    FileLocation::new("/project", ".rulesync/rules", name)
}

#[rstest]
#[case("---\ntargets: []\n---\nbody", "targets")]
#[case("---\ntargets: [\"*\", cursor]\n---\nbody", "targets")]
#[case("---\ntags: [\"\"]\n---\nbody", "tags")]
fn test_invalid_rule_frontmatter(#[case] content: &str, #[case] field: &str) {
    let err = RulesyncRule::from_content(rule_location("bad.md"), content).unwrap_err();
    match err {
        rulesync_meta::Error::Invalid { source, path } => {
            assert_eq!(source.field, field);
            assert!(path.ends_with("bad.md"));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn test_minimal_rule_uses_defaults() {
    let rule = RulesyncRule::from_content(rule_location("a.md"), "---\nroot: false\n---\n").unwrap();
    assert_eq!(rule.frontmatter, RuleFrontmatter::default());
    assert_eq!(rule.body, "");
}

#[rstest]
#[case(None, true)]
#[case(Some(Targets::Wildcard), true)]
#[case(Some(Targets::only(["cursor"])), true)]
#[case(Some(Targets::only(["claudecode", "copilot"])), false)]
fn test_applies_to_from_crate_root(#[case] targets: Option<Targets>, #[case] expected: bool) {
    assert_eq!(applies_to(targets.as_ref(), ToolTarget::Cursor), expected);
}

fn target_subset() -> impl Strategy<Value = Vec<ToolTarget>> {
    proptest::sample::subsequence(ToolTarget::ALL.to_vec(), 1..=ToolTarget::ALL.len())
}

proptest! {
    #[test]
    fn test_explicit_targets_round_trip_through_yaml(subset in target_subset()) {
        let targets = Targets::only(subset.iter().map(|t| t.as_str()));
        let yaml = serde_yaml::to_string(&targets).unwrap();
        let parsed: Targets = serde_yaml::from_str(&yaml).unwrap();

        prop_assert_eq!(&parsed, &targets);
        prop_assert!(validate_targets("targets", Some(&parsed)).is_ok());
        prop_assert!(parsed.unknown_ids().is_empty());
        for target in ToolTarget::ALL {
            prop_assert_eq!(parsed.includes(target), subset.contains(&target));
        }
    }
}

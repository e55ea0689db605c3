use proptest::prelude::*;
use rulesync_fs::NormalizedPath;

proptest! {
    #[test]
    fn test_normalization_invariants(s in "\\PC*") {
        let path = NormalizedPath::new(&s);
        let as_str = path.as_str();

        prop_assert!(!as_str.contains('\\'));

        // A leading UNC prefix is the only double slash kept
        let tail = as_str.strip_prefix("//").unwrap_or(as_str);
        prop_assert!(!tail.contains("//"));

        if as_str != "." {
            prop_assert!(!as_str.split('/').any(|segment| segment == "."));
        }

        let roundtripped = NormalizedPath::new(path.to_native());
        prop_assert_eq!(path, roundtripped);
    }

    #[test]
    fn test_join_is_normalized(a in "[a-z./]{0,12}", b in "[a-z._]{1,8}") {
        let joined = NormalizedPath::new(&a).join(&b);
        prop_assert!(!joined.as_str().contains('\\'));
        prop_assert_eq!(joined.clone(), NormalizedPath::new(joined.as_str()));
    }
}

//! Property tests for namespace identifier derivation.

use proptest::prelude::*;

use barrelsmith::domain::entities::{ExportStyle, ModuleEntry};
use barrelsmith::domain::value_objects::namespace::is_valid_identifier;
use barrelsmith::domain::value_objects::{check_collisions, namespace_identifier, pascal_case};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Identifier derivation never panics on arbitrary filenames.
    #[test]
    fn property_pascal_case_never_panics(s in "(?s).{0,64}") {
        let _ = pascal_case(&s);
        let _ = namespace_identifier(&s);
    }

    /// PROPERTY: Accepted identifiers are valid and contain no separators.
    #[test]
    fn property_accepted_identifiers_are_valid(
        stem in "[a-z0-9][a-z0-9_.-]{0,20}"
    ) {
        let filename = format!("{stem}.ts");
        if let Ok(name) = namespace_identifier(&filename) {
            prop_assert!(is_valid_identifier(&name));
            prop_assert!(!name.contains(['-', '_', '.']));
        }
    }

    /// PROPERTY: Separator choice does not change the derived name.
    #[test]
    fn property_separators_are_interchangeable(
        parts in proptest::collection::vec("[a-z][a-z0-9]{0,6}", 1..4)
    ) {
        let dashed = format!("{}.ts", parts.join("-"));
        let underscored = format!("{}.ts", parts.join("_"));
        prop_assert_eq!(pascal_case(&dashed), pascal_case(&underscored));

        if parts.len() > 1 {
            let modules = vec![
                ModuleEntry::file(dashed, ExportStyle::Namespace),
                ModuleEntry::file(underscored, ExportStyle::Namespace),
            ];
            prop_assert!(check_collisions(&modules).is_err());
        }
    }

    /// PROPERTY: Star exports never collide.
    #[test]
    fn property_star_exports_never_collide(
        names in proptest::collection::vec("[a-z][a-z_-]{0,8}", 0..8)
    ) {
        let modules: Vec<_> = names
            .iter()
            .map(|n| ModuleEntry::file(format!("{n}.ts"), ExportStyle::Star))
            .collect();
        prop_assert!(check_collisions(&modules).is_ok());
    }
}

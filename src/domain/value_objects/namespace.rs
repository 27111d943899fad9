//! Namespace identifiers for `export * as Name from ...` lines

use std::collections::HashMap;

use crate::domain::entities::{ExportStyle, ModuleEntry};
use crate::error::{BarrelError, BarrelResult};

/// Strip the last extension (`foo.test.ts` -> `foo.test`)
pub fn strip_extension(filename: &str) -> &str {
    match filename.rfind('.') {
        Some(idx) if idx > 0 && idx + 1 < filename.len() => &filename[..idx],
        Some(0) => "",
        _ => filename,
    }
}

/// PascalCase of the filename stem, splitting on `-`, `_` and `.`
pub fn pascal_case(filename: &str) -> String {
    strip_extension(filename)
        .split(['-', '_', '.'])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// Whether `name` is a plain JavaScript identifier
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Validated namespace identifier for a filename
pub fn namespace_identifier(filename: &str) -> BarrelResult<String> {
    let derived = pascal_case(filename);
    if !is_valid_identifier(&derived) {
        return Err(BarrelError::InvalidIdentifier {
            filename: filename.to_string(),
            derived,
        });
    }
    Ok(derived)
}

/// Fail if two namespace-style modules derive the same identifier.
///
/// Star-style modules introduce no identifier and are ignored.
pub fn check_collisions(modules: &[ModuleEntry]) -> BarrelResult<()> {
    let mut seen: HashMap<String, &str> = HashMap::new();
    for module in modules
        .iter()
        .filter(|m| m.style == ExportStyle::Namespace)
    {
        let derived = namespace_identifier(&module.filename)?;
        if let Some(existing) = seen.get(derived.as_str()) {
            if *existing != module.filename {
                return Err(BarrelError::NamespaceCollision {
                    first: existing.to_string(),
                    second: module.filename.clone(),
                    derived,
                });
            }
        }
        seen.insert(derived, &module.filename);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn module(filename: &str, style: ExportStyle) -> ModuleEntry {
        ModuleEntry::file(filename, style)
    }

    #[test]
    fn converts_kebab_snake_and_dotted() {
        assert_eq!(pascal_case("foo-bar.ts"), "FooBar");
        assert_eq!(pascal_case("foo_bar.ts"), "FooBar");
        assert_eq!(pascal_case("foo.bar.ts"), "FooBar");
        assert_eq!(pascal_case("foo-bar_baz.ts"), "FooBarBaz");
    }

    #[test]
    fn keeps_existing_casing() {
        assert_eq!(pascal_case("auth.ts"), "Auth");
        assert_eq!(pascal_case("FooBar.ts"), "FooBar");
        assert_eq!(pascal_case("myModule.mts"), "MyModule");
    }

    #[test]
    fn directory_names_have_no_extension() {
        assert_eq!(pascal_case("user-profile"), "UserProfile");
    }

    #[test]
    fn leading_digit_is_invalid() {
        let err = namespace_identifier("123-foo.ts").unwrap_err();
        assert!(matches!(err, BarrelError::InvalidIdentifier { ref derived, .. } if derived == "123Foo"));
    }

    #[test]
    fn dotfile_stem_is_invalid() {
        assert!(namespace_identifier(".env").is_err());
    }

    #[test]
    fn no_collision_between_distinct_names() {
        let modules = vec![
            module("foo-bar.ts", ExportStyle::Namespace),
            module("baz-qux.ts", ExportStyle::Namespace),
        ];
        assert!(check_collisions(&modules).is_ok());
    }

    #[test]
    fn kebab_and_snake_collide() {
        let modules = vec![
            module("foo-bar.ts", ExportStyle::Namespace),
            module("foo_bar.ts", ExportStyle::Namespace),
        ];
        let err = check_collisions(&modules).unwrap_err();
        match err {
            BarrelError::NamespaceCollision {
                first,
                second,
                derived,
            } => {
                assert_eq!(first, "foo-bar.ts");
                assert_eq!(second, "foo_bar.ts");
                assert_eq!(derived, "FooBar");
            }
            other => panic!("expected collision, got {other:?}"),
        }
    }

    #[test]
    fn star_modules_are_exempt() {
        let modules = vec![
            module("foo-bar.ts", ExportStyle::Star),
            module("foo_bar.ts", ExportStyle::Star),
        ];
        assert!(check_collisions(&modules).is_ok());
    }

    #[test]
    fn star_module_with_bad_identifier_is_fine() {
        let modules = vec![module("1-legacy.ts", ExportStyle::Star)];
        assert!(check_collisions(&modules).is_ok());
    }

    #[test]
    fn mixed_styles_only_check_namespaces() {
        let modules = vec![
            module("foo-bar.ts", ExportStyle::Star),
            module("foo_bar.ts", ExportStyle::Namespace),
        ];
        assert!(check_collisions(&modules).is_ok());
    }
}

//! Property tests for barrel rendering.

use proptest::prelude::*;

use barrelsmith::domain::entities::{ExportStyle, ModuleEntry};
use barrelsmith::domain::services::{module_specifier, render_barrel};
use barrelsmith::domain::value_objects::{is_owned, ExtensionMode, OWNERSHIP_HEADER};

fn filename() -> impl Strategy<Value = String> {
    (
        "[a-z][a-z0-9_-]{0,12}",
        prop_oneof![Just(".ts"), Just(".tsx"), Just(".mts"), Just(".cts")],
    )
        .prop_map(|(stem, ext)| format!("{stem}{ext}"))
}

fn module() -> impl Strategy<Value = ModuleEntry> {
    (
        filename(),
        prop_oneof![Just(ExportStyle::Star), Just(ExportStyle::Namespace)],
        any::<bool>(),
    )
        .prop_map(|(name, style, is_dir)| {
            if is_dir {
                ModuleEntry::directory(name.replace('.', "-"), style)
            } else {
                ModuleEntry::file(name, style)
            }
        })
}

fn mode() -> impl Strategy<Value = ExtensionMode> {
    prop_oneof![
        Just(ExtensionMode::None),
        Just(ExtensionMode::Js),
        Just(ExtensionMode::Ts)
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Rendering is deterministic.
    #[test]
    fn property_render_is_deterministic(
        modules in proptest::collection::vec(module(), 0..12),
        mode in mode()
    ) {
        prop_assert_eq!(render_barrel(&modules, mode), render_barrel(&modules, mode));
    }

    /// PROPERTY: Output is the header plus one newline-terminated line per module.
    #[test]
    fn property_render_shape(
        modules in proptest::collection::vec(module(), 0..12),
        mode in mode()
    ) {
        let rendered = render_barrel(&modules, mode);
        prop_assert!(rendered.starts_with(OWNERSHIP_HEADER));
        prop_assert!(is_owned(&rendered));
        prop_assert!(rendered.ends_with('\n'));

        let body = &rendered[OWNERSHIP_HEADER.len()..];
        prop_assert_eq!(body.lines().count(), modules.len());
        for (line, module) in body.lines().zip(&modules) {
            prop_assert!(line.starts_with("export * "));
            prop_assert!(line.ends_with("';"));
            let specifier = format!("'{}'", module_specifier(module, mode));
            prop_assert!(line.contains(&specifier));
        }
    }

    /// PROPERTY: Specifiers are always relative to the barrel's directory.
    #[test]
    fn property_specifier_is_relative(module in module(), mode in mode()) {
        let specifier = module_specifier(&module, mode);
        prop_assert!(specifier.starts_with("./"));
        if module.is_directory || mode == ExtensionMode::None {
            prop_assert_eq!(specifier, format!("./{}", module.specifier));
        }
    }
}

//! Test fixtures - reusable content constants for tests.

#![allow(dead_code)]

/// One star-style rule over `src/**`, no formatter, no extensions
pub const STAR_CONFIG: &str = r#"extensions = "none"
formatter = false

[[rules]]
dirs = "src/**"
"#;

/// Namespace exports for `src/services`
pub const NAMESPACE_CONFIG: &str = r#"extensions = "none"
formatter = false

[[rules]]
dirs = "src/services"
default_style = "namespace"
"#;

/// Node16 resolution that requires `.js` specifiers
pub const NODE16_TSCONFIG: &str = r#"{
  // comments are allowed
  "compilerOptions": {
    "module": "node16",
    "moduleResolution": "node16",
  },
}
"#;

pub const HEADER: &str = "// @generated by barrelsmith. Do not edit by hand.\n";

pub const HAND_WRITTEN_BARREL: &str = "export { a } from './a';\n";

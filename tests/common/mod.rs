//! Common test utilities for barrelsmith scenario tests.
//!
//! This module provides:
//! - `TestEnv`: Isolated project in a temp directory plus CLI helpers
//! - Assertion macros: `assert_barrel!`, `assert_output_contains!`
//! - Fixtures: Reusable config and source content

#[macro_use]
pub mod assertions;
pub mod env;
pub mod fixtures;

#[allow(unused_imports)]
pub use assertions::*;
pub use env::*;
pub use fixtures::*;

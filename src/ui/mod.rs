//! Terminal presentation for the CLI
//!
//! Views render to `String`s so they can be asserted on; commands decide
//! where the text goes.

pub mod components;
pub mod context;
pub mod format;
pub mod json;
pub mod primitives;
pub mod terminal;
pub mod theme;
pub mod views;

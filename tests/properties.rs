//! Property tests for barrelsmith.
//!
//! Properties use randomized input generation to explore edge cases and
//! protect invariants like "never panics" and "deterministic output".
//!
//! Run with: `cargo test --test properties`

#[path = "properties/renderer.rs"]
mod renderer;

#[path = "properties/naming.rs"]
mod naming;

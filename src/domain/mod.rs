//! Domain Layer
//!
//! The generation engine: pure business logic that reaches the disk only
//! through ports.
//!
//! ## Structure
//!
//! - `entities/` - Module entries, scan results, actions, plan results, scan cache
//! - `value_objects/` - Header, extension mode, globs, namespace names, fingerprints
//! - `services/` - Scanner, renderer, writer planning, planner/executor
//! - `ports/` - Interface definitions for infrastructure
//!
//! ## Design Principles
//!
//! 1. **No direct I/O** - File access goes through the `FileSystem` port
//! 2. **Deterministic output** - Rendering depends only on its inputs
//! 3. **Ports & Adapters** - Change notifications arrive through `ChangeSource`

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;

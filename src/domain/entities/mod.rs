//! Domain Entities
//!
//! - `ModuleEntry` / `ScanResult` - What a directory re-exports
//! - `Action` - Planned outcome for one barrel file
//! - `PlanResult` - Actions and per-directory errors of a pass
//! - `ScanCache` - Rendered barrels keyed by file list

mod action;
mod module_entry;
mod plan_result;
mod scan_cache;

pub use action::{Action, ActionKind, ConflictReason, SkipReason};
pub use module_entry::{ExportStyle, ModuleEntry, ScanResult};
pub use plan_result::{PlanError, PlanResult};
pub use scan_cache::{CacheEntry, ScanCache, SCAN_CACHE_VERSION};

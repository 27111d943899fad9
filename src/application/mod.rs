//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain generation rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `GenerateUseCase` - plan with cache, write, save cache, format
//! - `CheckUseCase` - plan only, report stale barrels
//! - `DoctorUseCase` - project health checks
//! - `WatchUseCase` - continuous regeneration

pub mod check;
pub mod doctor;
pub mod generate;
pub mod watch;

pub use check::{CheckOptions, CheckResult, CheckUseCase, StaleBarrel};
pub use doctor::{CheckCategory, DoctorCheck, DoctorReport, DoctorUseCase};
pub use generate::{GenerateOptions, GenerateResult, GenerateUseCase};
pub use watch::{
    start_watching, PassSummary, Regeneration, SelfWriteTracker, SharedConfig, WatchEvent,
    WatchHandle, WatchOptions, WatchUseCase,
};

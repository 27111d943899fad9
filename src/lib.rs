//! barrelsmith - generate and maintain TypeScript barrel files
//!
//! A barrel is an `index.ts` that re-exports the modules of its directory.
//! barrelsmith scans the directories selected by config rules, renders one
//! barrel per directory and writes only files it owns (marked by a header
//! line). A watch mode keeps barrels current as files change.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Re-exports for convenience
pub use application::watch::start_watching;
pub use application::{
    CheckUseCase, DoctorUseCase, GenerateUseCase, Regeneration, WatchEvent, WatchHandle,
    WatchOptions, WatchUseCase,
};
pub use config::{load_config, LoadedConfig, ResolvedConfig};
pub use domain::entities::{Action, ActionKind, PlanResult};
pub use domain::services::{detect_extension_mode, execute, plan, plan_cached};
pub use error::{BarrelError, BarrelResult};

//! Watch Use Case
//!
//! Keeps barrels in sync while files change:
//! - Change notification through the `ChangeSource` port (notify in production)
//! - Self-write suppression (`SelfWriteTracker`)
//! - Event routing to rule directories or a config reload (`Router`)
//! - Debouncing (100ms default) with drop-on-busy (`Debouncer`)
//! - Full replanning on each fire (`WatchUseCase`)
//!
//! ## Usage
//!
//! ```ignore
//! let use_case = WatchUseCase::new(&cwd, config, WatchOptions::default());
//! use_case.start(running, |event| println!("{}", event.to_json()))?;
//! ```

mod debounce;
mod event;
mod router;
mod session;
mod tracker;
mod use_case;


pub use debounce::Debouncer;
pub use event::{
    WatchEvent, WatchOptions, DEBOUNCE_MS, SELF_WRITE_SETTLE_MS, SELF_WRITE_TTL_MS,
};
pub use router::{Routed, Router};
pub use session::{
    replace, shared_config, snapshot, start_watching, Regeneration, SharedConfig, WatchHandle,
};
pub use tracker::SelfWriteTracker;
pub use use_case::{ConfigReloader, PassSummary, WatchUseCase};

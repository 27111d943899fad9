//! Infrastructure Layer
//!
//! Adapters for the domain ports plus the external formatter:
//! - `fs` - local disk implementation of `FileSystem`
//! - `repositories` - scan cache persistence
//! - `watcher` - notify-backed `ChangeSource`
//! - `formatter` - biome/dprint/prettier/oxfmt detection and invocation

pub mod formatter;
pub mod fs;
pub mod repositories;
pub mod watcher;

pub use fs::LocalFs;
pub use repositories::JsonCacheRepository;
pub use watcher::NotifyChangeSource;

//! Repository Implementations
//!
//! Persistence for state carried between runs.

mod scan_cache;

pub use scan_cache::{JsonCacheRepository, CACHE_RELATIVE_PATH};

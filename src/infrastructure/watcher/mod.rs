//! Change Source Implementations

mod notify_source;

pub use notify_source::NotifyChangeSource;

/// Paths the watch session never reacts to
pub const DEFAULT_IGNORE: &[&str] = &["**/node_modules/**", "**/.git/**"];

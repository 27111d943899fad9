//! Watch event types and options

use std::path::PathBuf;
use std::time::Duration;

use crate::infrastructure::watcher::DEFAULT_IGNORE;

/// Debounce duration in milliseconds
pub const DEBOUNCE_MS: u64 = 100;

/// How long a tracked self-write waits for its event before it is discarded
pub const SELF_WRITE_TTL_MS: u64 = 5_000;

/// How long events on a fully consumed self-write are still suppressed
pub const SELF_WRITE_SETTLE_MS: u64 = 250;

/// Watch options
#[derive(Debug, Clone)]
pub struct WatchOptions {
    /// Explicit config path; when unset the default config names in the root are watched
    pub config_path: Option<PathBuf>,
    pub debounce: Duration,
    /// Globs (relative to the root) the change source drops
    pub ignore: Vec<String>,
    /// Run the formatter on written barrels. Off by default: a formatter that
    /// rewrites the rendered text makes every later pass an update.
    pub format: bool,
    /// Read and write the scan cache
    pub use_cache: bool,
    /// Output as NDJSON
    pub json: bool,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            config_path: None,
            debounce: Duration::from_millis(DEBOUNCE_MS),
            ignore: DEFAULT_IGNORE.iter().map(|s| s.to_string()).collect(),
            format: false,
            use_cache: true,
            json: false,
        }
    }
}

impl WatchOptions {
    pub fn with_config_path(mut self, path: Option<PathBuf>) -> Self {
        self.config_path = path;
        self
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn with_format(mut self, format: bool) -> Self {
        self.format = format;
        self
    }

    pub fn with_cache(mut self, use_cache: bool) -> Self {
        self.use_cache = use_cache;
        self
    }

    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }
}

/// Watch event types for NDJSON output
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WatchEvent {
    /// Initial generation done, subscription live
    WatchStarted {
        root: String,
        config: String,
        rules: usize,
    },
    /// Debounced changes resolved to rule directories
    ChangesDetected { directories: Vec<String> },
    /// A regeneration pass finished
    RegenerationComplete {
        written: Vec<String>,
        skipped: usize,
        conflicts: usize,
        errors: usize,
        elapsed_ms: u64,
    },
    /// The config file changed and was reloaded
    ConfigReloaded { rules: usize },
    /// A pass or reload failed; the session keeps running
    Error { message: String },
    /// Watch stopped
    Shutdown,
}

impl WatchEvent {
    /// Convert to JSON string with "command": "watch" field included
    pub fn to_json(&self) -> String {
        let mut value =
            serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({"event": "error"}));
        if let Some(obj) = value.as_object_mut() {
            obj.insert("command".to_string(), serde_json::json!("watch"));
        }
        serde_json::to_string(&value).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn is_error(&self) -> bool {
        matches!(self, WatchEvent::Error { .. })
    }
}

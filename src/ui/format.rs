//! Small text helpers shared by the views

use std::path::Path;
use std::time::Duration;

use barrelsmith::domain::value_objects::globs::relative_slash_path;

/// `850ms` below one second, `1.2s` above
pub fn format_duration(elapsed: Duration) -> String {
    let ms = elapsed.as_millis();
    if ms < 1000 {
        format!("{ms}ms")
    } else {
        format!("{:.1}s", elapsed.as_secs_f64())
    }
}

/// `1 file`, `2 files`
pub fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

/// Path relative to `cwd` with forward slashes, absolute when outside it
pub fn display_path(cwd: &Path, path: &Path) -> String {
    relative_slash_path(cwd, path).unwrap_or_else(|| path.display().to_string())
}

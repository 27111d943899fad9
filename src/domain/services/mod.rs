//! Domain Services
//!
//! Generation engine logic. Everything here reaches the disk only through
//! the `FileSystem` port and is tested against `MockFileSystem`.

mod extension_detector;
mod planner;
mod renderer;
mod scanner;
mod writer;

pub use extension_detector::{
    detect_extension_mode, mode_from_options, strip_jsonc, tsconfig_mtime, TSCONFIG_FILE,
};
pub use planner::{execute, plan, plan_cached, resolve_extension_mode};
pub use renderer::{export_line, module_specifier, render_barrel};
pub use scanner::{DirectoryScan, Scanner};
pub use writer::plan_write;

//! Configuration module for barrelsmith
//!
//! Resolution order:
//! 1. `--config <path>` when given
//! 2. `barrelsmith.toml`, then `.barrelsmith.toml`, in the working directory
//! 3. Environment variables (`BARRELSMITH_EXTENSIONS`, `BARRELSMITH_FORMATTER`)
//!    override the file's values
//!
//! Unset keys fall back to built-in defaults.

mod loader;
mod types;

pub use loader::{
    find_config, load_config, parse_with_warnings, with_env_overrides, ConfigWarning,
    LoadedConfig, CONFIG_FILE_NAMES,
};
pub use types::{
    default_exclude, FormatterSetting, FormatterTool, ModuleGlob, ModuleSpec, RawConfig,
    RawRule, ResolvedConfig, ResolvedRule, DEFAULT_BARREL_FILE, DEFAULT_MODULE_GLOB,
};

/// Written by `barrelsmith init`
pub const STARTER_CONFIG: &str = r#"# barrelsmith configuration
# "auto" reads tsconfig.json; otherwise "none", ".js" or ".ts"
extensions = "auto"
exclude = ["*.test.*", "*.spec.*", "*.stories.*", "*.d.ts"]
barrel_file = "index.ts"
# "auto", "biome", "dprint", "prettier", "oxfmt" or false
formatter = "auto"

[[rules]]
dirs = "src/**"
modules = ["./*"]
"#;

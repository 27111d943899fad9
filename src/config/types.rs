//! Configuration type definitions
//!
//! `RawConfig` mirrors the TOML file with optional fields. `ResolvedConfig`
//! has every default filled in and is what the planner consumes.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::domain::entities::ExportStyle;
use crate::domain::value_objects::{ConfigFingerprint, ExtensionSetting};
use crate::error::{BarrelError, BarrelResult};

/// Default barrel filename
pub const DEFAULT_BARREL_FILE: &str = "index.ts";

/// Default module glob of a rule
pub const DEFAULT_MODULE_GLOB: &str = "./*";

/// Exclusions applied when the config does not set `exclude`
pub fn default_exclude() -> Vec<String> {
    ["*.test.*", "*.spec.*", "*.stories.*", "*.d.ts"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// A concrete formatter tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatterTool {
    Biome,
    Dprint,
    Prettier,
    Oxfmt,
}

impl FormatterTool {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormatterTool::Biome => "biome",
            FormatterTool::Dprint => "dprint",
            FormatterTool::Prettier => "prettier",
            FormatterTool::Oxfmt => "oxfmt",
        }
    }
}

impl fmt::Display for FormatterTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `formatter = "auto" | "<tool>" | false`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatterSetting {
    #[default]
    Auto,
    Disabled,
    Tool(FormatterTool),
}

impl FromStr for FormatterSetting {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" | "true" => Ok(FormatterSetting::Auto),
            "false" | "off" | "none" => Ok(FormatterSetting::Disabled),
            "biome" => Ok(FormatterSetting::Tool(FormatterTool::Biome)),
            "dprint" => Ok(FormatterSetting::Tool(FormatterTool::Dprint)),
            "prettier" => Ok(FormatterSetting::Tool(FormatterTool::Prettier)),
            "oxfmt" => Ok(FormatterSetting::Tool(FormatterTool::Oxfmt)),
            other => Err(format!(
                "unknown formatter '{other}' (expected auto, biome, dprint, prettier, oxfmt or false)"
            )),
        }
    }
}

impl fmt::Display for FormatterSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatterSetting::Auto => f.write_str("auto"),
            FormatterSetting::Disabled => f.write_str("false"),
            FormatterSetting::Tool(tool) => write!(f, "{tool}"),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FormatterSettingDe {
    Flag(bool),
    Name(String),
}

impl<'de> Deserialize<'de> for FormatterSetting {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match FormatterSettingDe::deserialize(deserializer)? {
            FormatterSettingDe::Flag(true) => Ok(FormatterSetting::Auto),
            FormatterSettingDe::Flag(false) => Ok(FormatterSetting::Disabled),
            FormatterSettingDe::Name(name) => name.parse().map_err(serde::de::Error::custom),
        }
    }
}

impl Serialize for FormatterSetting {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            FormatterSetting::Disabled => serializer.serialize_bool(false),
            FormatterSetting::Auto => serializer.serialize_str("auto"),
            FormatterSetting::Tool(tool) => serializer.serialize_str(tool.as_str()),
        }
    }
}

/// A `modules` entry: a bare glob, or a table with its own style
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ModuleSpec {
    Pattern(String),
    Table {
        include: String,
        #[serde(default)]
        style: Option<ExportStyle>,
    },
}

/// A `[[rules]]` table as written
#[derive(Debug, Clone, Deserialize)]
pub struct RawRule {
    pub dirs: String,
    #[serde(default)]
    pub default_style: Option<ExportStyle>,
    #[serde(default)]
    pub modules: Option<Vec<ModuleSpec>>,
}

/// The config file as written
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfig {
    #[serde(default)]
    pub extensions: ExtensionSetting,
    #[serde(default)]
    pub exclude: Option<Vec<String>>,
    #[serde(default)]
    pub barrel_file: Option<String>,
    #[serde(default)]
    pub formatter: FormatterSetting,
    #[serde(default)]
    pub rules: Vec<RawRule>,
}

/// A module glob with its style decided
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleGlob {
    pub include: String,
    pub style: ExportStyle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedRule {
    pub dirs: String,
    pub modules: Vec<ModuleGlob>,
    pub default_style: ExportStyle,
}

impl ResolvedRule {
    /// A rule with the default `./*` star module glob
    pub fn new(dirs: impl Into<String>) -> Self {
        Self {
            dirs: dirs.into(),
            modules: vec![ModuleGlob {
                include: DEFAULT_MODULE_GLOB.to_string(),
                style: ExportStyle::Star,
            }],
            default_style: ExportStyle::Star,
        }
    }

    pub fn with_modules(mut self, modules: Vec<ModuleGlob>) -> Self {
        self.modules = modules;
        self
    }
}

/// Configuration with all defaults applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedConfig {
    pub extensions: ExtensionSetting,
    pub exclude: Vec<String>,
    pub barrel_file: String,
    pub formatter: FormatterSetting,
    pub rules: Vec<ResolvedRule>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            extensions: ExtensionSetting::Auto,
            exclude: default_exclude(),
            barrel_file: DEFAULT_BARREL_FILE.to_string(),
            formatter: FormatterSetting::Auto,
            rules: Vec::new(),
        }
    }
}

impl ResolvedConfig {
    /// Fingerprint of the canonical JSON form
    pub fn fingerprint(&self) -> ConfigFingerprint {
        ConfigFingerprint::of(self)
    }
}

impl RawConfig {
    /// Fill in defaults and validate. `path` is only used for error messages.
    pub fn resolve(self, path: &Path) -> BarrelResult<ResolvedConfig> {
        let barrel_file = self
            .barrel_file
            .unwrap_or_else(|| DEFAULT_BARREL_FILE.to_string());
        if barrel_file.is_empty() || barrel_file.contains(['/', '\\']) {
            return Err(BarrelError::ConfigInvalid {
                path: path.to_path_buf(),
                message: format!("barrel_file must be a plain filename, got '{barrel_file}'"),
            });
        }

        let mut rules = Vec::with_capacity(self.rules.len());
        for (index, rule) in self.rules.into_iter().enumerate() {
            if rule.dirs.trim().is_empty() {
                return Err(BarrelError::ConfigInvalid {
                    path: path.to_path_buf(),
                    message: format!("rules[{index}].dirs must not be empty"),
                });
            }
            let default_style = rule.default_style.unwrap_or_default();
            let specs = rule
                .modules
                .unwrap_or_else(|| vec![ModuleSpec::Pattern(DEFAULT_MODULE_GLOB.to_string())]);
            let modules = specs
                .into_iter()
                .map(|spec| match spec {
                    ModuleSpec::Pattern(include) => ModuleGlob {
                        include,
                        style: default_style,
                    },
                    ModuleSpec::Table { include, style } => ModuleGlob {
                        include,
                        style: style.unwrap_or(default_style),
                    },
                })
                .collect();
            rules.push(ResolvedRule {
                dirs: rule.dirs,
                modules,
                default_style,
            });
        }

        Ok(ResolvedConfig {
            extensions: self.extensions,
            exclude: self.exclude.unwrap_or_else(default_exclude),
            barrel_file,
            formatter: self.formatter,
            rules,
        })
    }
}

//! Extension mode value objects
//!
//! `ExtensionMode` is what the renderer consumes. `ExtensionSetting` is what a
//! config file asks for, where `auto` defers to tsconfig detection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How generated import specifiers carry file extensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ExtensionMode {
    /// `./auth`
    #[default]
    #[serde(rename = "none")]
    None,
    /// `./auth.js`, `./util.mjs`, `./legacy.cjs`
    #[serde(rename = ".js")]
    Js,
    /// `./auth.ts`, original extension kept verbatim
    #[serde(rename = ".ts")]
    Ts,
}

impl ExtensionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtensionMode::None => "none",
            ExtensionMode::Js => ".js",
            ExtensionMode::Ts => ".ts",
        }
    }
}

impl fmt::Display for ExtensionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configured extension policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExtensionSetting {
    #[default]
    #[serde(rename = "auto")]
    Auto,
    #[serde(rename = "none")]
    None,
    #[serde(rename = ".js")]
    Js,
    #[serde(rename = ".ts")]
    Ts,
}

impl ExtensionSetting {
    /// The fixed mode, or `None` when detection is required
    pub fn fixed(&self) -> Option<ExtensionMode> {
        match self {
            ExtensionSetting::Auto => None,
            ExtensionSetting::None => Some(ExtensionMode::None),
            ExtensionSetting::Js => Some(ExtensionMode::Js),
            ExtensionSetting::Ts => Some(ExtensionMode::Ts),
        }
    }
}

impl FromStr for ExtensionSetting {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "auto" => Ok(ExtensionSetting::Auto),
            "none" => Ok(ExtensionSetting::None),
            ".js" | "js" => Ok(ExtensionSetting::Js),
            ".ts" | "ts" => Ok(ExtensionSetting::Ts),
            other => Err(format!(
                "unknown extension mode '{other}' (expected auto, none, .js or .ts)"
            )),
        }
    }
}

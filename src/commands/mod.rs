//! Subcommand implementations
//!
//! Each command loads the config, runs one use case and renders the result
//! either as text or as NDJSON.

pub mod check;
pub mod doctor;
pub mod generate;
pub mod init;
pub mod watch;

use std::path::Path;

use barrelsmith::config::{load_config, LoadedConfig};
use barrelsmith::domain::entities::PlanResult;
use barrelsmith::error::BarrelError;
use serde_json::{json, Value};

use crate::ui::context::UiContext;
use crate::ui::format::display_path;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

/// Exit code for configuration errors in `check`
pub const EXIT_CONFIG_ERROR: i32 = 2;

/// Load the config, printing warnings for unknown keys
pub fn load_or_report(
    cwd: &Path,
    explicit: Option<&Path>,
    command: &str,
    ui: &UiContext,
) -> Result<LoadedConfig, BarrelError> {
    match load_config(cwd, explicit) {
        Ok(loaded) => {
            if !ui.json {
                for warning in &loaded.warnings {
                    eprintln!(
                        "  {} {}",
                        Icon::Warning.colored(ui.color, ui.unicode),
                        warning
                    );
                }
            }
            Ok(loaded)
        }
        Err(e) => {
            report_config_error(&e, command, ui);
            Err(e)
        }
    }
}

fn report_config_error(error: &BarrelError, command: &str, ui: &UiContext) {
    if ui.json {
        let kind = match error {
            BarrelError::ConfigNotFound { .. } => "config_not_found",
            BarrelError::ConfigInvalid { .. } => "config_invalid",
            _ => "config_error",
        };
        let _ = crate::ui::json::emit(
            command,
            &json!({ "event": "error", "kind": kind, "message": error.to_string() }),
        );
        return;
    }

    let fail = Icon::Error.colored(ui.color, ui.unicode);
    match error {
        BarrelError::ConfigNotFound { cwd, searched } => {
            eprintln!("{fail} No config found in {}", cwd.display());
            eprintln!("  Searched: {}", searched.join(", "));
            eprintln!(
                "  Run {} to create one",
                ColoredText::plain("barrelsmith init").bold().render(ui.color)
            );
        }
        BarrelError::ConfigInvalid { path, message } => {
            eprintln!("{fail} Invalid config at {}", path.display());
            eprintln!("  {message}");
        }
        other => eprintln!("{fail} {other}"),
    }
}

/// Actions and errors of a plan as JSON
pub fn plan_json(plan: &PlanResult, cwd: &Path) -> (Vec<Value>, Vec<Value>) {
    let actions = plan
        .actions
        .iter()
        .map(|action| {
            let mut value = json!({
                "kind": action.kind(),
                "path": display_path(cwd, action.path()),
            });
            if let (Some(reason), Some(map)) = (action.reason(), value.as_object_mut()) {
                map.insert("reason".to_string(), Value::String(reason));
            }
            value
        })
        .collect();
    let errors = plan
        .errors
        .iter()
        .map(|e| {
            json!({
                "directory": display_path(cwd, &e.directory),
                "message": e.error.to_string(),
            })
        })
        .collect();
    (actions, errors)
}

use std::path::Path;

use anyhow::Result;
use barrelsmith::application::{CheckOptions, CheckUseCase};
use barrelsmith::infrastructure::LocalFs;
use serde_json::json;

use super::{load_or_report, plan_json, EXIT_CONFIG_ERROR};
use crate::ui::context::UiContext;
use crate::ui::format::display_path;
use crate::ui::views::check::render_check;

/// Exit 0 when every barrel is current, 1 when stale or failing, 2 on config errors
pub fn cmd_check(cwd: &Path, config_path: Option<&Path>, diff: bool, ui: &UiContext) -> Result<()> {
    let Ok(loaded) = load_or_report(cwd, config_path, "check", ui) else {
        std::process::exit(EXIT_CONFIG_ERROR);
    };

    let result =
        CheckUseCase::new(LocalFs::new(), cwd).execute(&loaded.config, CheckOptions { diff })?;

    if ui.json {
        let (_, errors) = plan_json(&result.plan, cwd);
        let stale: Vec<String> = result
            .stale_paths()
            .map(|path| display_path(cwd, path))
            .collect();
        crate::ui::json::emit(
            "check",
            &json!({
                "event": "complete",
                "up_to_date": result.is_up_to_date(),
                "total": result.plan.actions.len(),
                "stale": stale,
                "errors": errors,
            }),
        )?;
    } else {
        print!("{}", render_check(&result, cwd, ui.color, ui.unicode));
    }

    if !result.is_up_to_date() || result.plan.has_errors() {
        std::process::exit(1);
    }
    Ok(())
}

use std::path::Path;

use anyhow::Result;
use barrelsmith::application::{GenerateOptions, GenerateUseCase};
use barrelsmith::infrastructure::LocalFs;
use serde_json::json;

use super::{load_or_report, plan_json};
use crate::ui::context::UiContext;
use crate::ui::views::generate::{render_generate, render_loaded_config};

pub fn cmd_generate(
    cwd: &Path,
    config_path: Option<&Path>,
    dry_run: bool,
    no_cache: bool,
    ui: &UiContext,
) -> Result<()> {
    let Ok(loaded) = load_or_report(cwd, config_path, "generate", ui) else {
        std::process::exit(1);
    };
    let config = loaded.config;

    if !ui.json {
        print!("{}", render_loaded_config(config.rules.len(), ui.color, ui.unicode));
    }

    let options = GenerateOptions {
        dry_run,
        use_cache: !no_cache,
        ..GenerateOptions::default()
    };
    let result = GenerateUseCase::new(LocalFs::new(), cwd).execute(&config, &options)?;

    if ui.json {
        let (actions, errors) = plan_json(&result.plan, cwd);
        crate::ui::json::emit(
            "generate",
            &json!({
                "event": "complete",
                "dry_run": dry_run,
                "actions": actions,
                "written": result.written.len(),
                "errors": errors,
                "formatted_with": result.formatted_with.map(|tool| tool.to_string()),
                "elapsed_ms": result.elapsed.as_millis() as u64,
            }),
        )?;
    } else {
        if !dry_run {
            println!();
        }
        print!(
            "{}",
            render_generate(&result, cwd, dry_run, ui.color, ui.unicode)
        );
    }

    if !result.is_success() {
        std::process::exit(1);
    }
    Ok(())
}

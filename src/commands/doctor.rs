use std::path::Path;

use anyhow::Result;
use barrelsmith::application::{DoctorUseCase, GenerateOptions, GenerateUseCase};
use barrelsmith::config::load_config;
use barrelsmith::infrastructure::LocalFs;
use serde_json::json;

use crate::ui::context::UiContext;
use crate::ui::format::plural;
use crate::ui::primitives::icon::Icon;
use crate::ui::views::doctor::{render_doctor_header, render_doctor_report};

/// Exit 1 when any check fails
pub fn cmd_doctor(cwd: &Path, config_path: Option<&Path>, fix: bool, ui: &UiContext) -> Result<()> {
    let loaded = load_config(cwd, config_path);
    let report = DoctorUseCase::new(LocalFs::new(), cwd).run(&loaded);

    if ui.json {
        crate::ui::json::emit(
            "doctor",
            &json!({
                "event": "report",
                "checks": report.checks,
                "passed": report.passed(),
                "failed": report.failed(),
                "suggestions": report.suggestions(),
            }),
        )?;
    } else {
        print!("{}", render_doctor_header(ui.color, ui.unicode));
        print!("{}", render_doctor_report(&report, ui.color, ui.unicode));
    }

    if fix && report.stale {
        if let Ok(loaded) = &loaded {
            if !ui.json {
                println!(
                    "\n  {} Running generate to fix stale barrels...",
                    Icon::Info.colored(ui.color, ui.unicode)
                );
            }
            let result = GenerateUseCase::new(LocalFs::new(), cwd)
                .execute(&loaded.config, &GenerateOptions::default())?;
            if ui.json {
                crate::ui::json::emit(
                    "doctor",
                    &json!({ "event": "fixed", "written": result.written.len() }),
                )?;
            } else {
                println!(
                    "  {} Fixed: {} written\n",
                    Icon::Success.colored(ui.color, ui.unicode),
                    plural(result.written.len(), "file")
                );
            }
        }
    }

    if report.has_failures() {
        std::process::exit(1);
    }
    Ok(())
}

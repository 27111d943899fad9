//! Init command - write a starter `barrelsmith.toml`

use std::path::Path;

use anyhow::{bail, Context, Result};
use barrelsmith::config::{CONFIG_FILE_NAMES, STARTER_CONFIG};
use barrelsmith::infrastructure::fs::atomic_write;
use serde_json::json;

use crate::ui::context::UiContext;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

pub fn cmd_init(cwd: &Path, force: bool, ui: &UiContext) -> Result<()> {
    let target = cwd.join(CONFIG_FILE_NAMES[0]);
    let existing = CONFIG_FILE_NAMES
        .iter()
        .map(|name| cwd.join(name))
        .find(|path| path.exists());

    if let Some(existing) = existing.filter(|_| !force) {
        if ui.json {
            let _ = crate::ui::json::emit(
                "init",
                &json!({
                    "event": "error",
                    "kind": "already_exists",
                    "path": existing.display().to_string(),
                }),
            );
        }
        bail!(
            "{} already exists. Use --force to overwrite.",
            existing.display()
        );
    }

    atomic_write(&target, STARTER_CONFIG.as_bytes())
        .with_context(|| format!("failed to write {}", target.display()))?;
    tracing::info!(path = %target.display(), "wrote starter config");

    if ui.json {
        crate::ui::json::emit(
            "init",
            &json!({ "event": "created", "path": target.display().to_string() }),
        )?;
        return Ok(());
    }

    let bold = |s: &str| ColoredText::plain(s).bold().render(ui.color);
    println!(
        "\n  {} Created {}",
        Icon::Success.colored(ui.color, ui.unicode),
        CONFIG_FILE_NAMES[0]
    );
    println!("\n  Next steps:");
    println!("    1. Edit the config to define your rules");
    println!("    2. Run {} to create barrel files", bold("barrelsmith generate"));
    println!("    3. Run {} to validate your setup\n", bold("barrelsmith doctor"));
    Ok(())
}

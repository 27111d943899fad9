use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use barrelsmith::application::{WatchEvent, WatchOptions, WatchUseCase};

use super::load_or_report;
use crate::ui::context::UiContext;
use crate::ui::views::watch::{render_watch_event, render_watch_header};

pub fn cmd_watch(
    cwd: &Path,
    config_path: Option<&Path>,
    format: bool,
    no_cache: bool,
    ui: &UiContext,
) -> Result<()> {
    let Ok(loaded) = load_or_report(cwd, config_path, "watch", ui) else {
        std::process::exit(1);
    };

    let options = WatchOptions::default()
        .with_config_path(config_path.map(Path::to_path_buf))
        .with_format(format)
        .with_cache(!no_cache)
        .with_json(ui.json);
    let config_label = loaded
        .path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| loaded.path.display().to_string());
    let use_case =
        WatchUseCase::new(cwd, loaded.config, options).with_config_label(config_label);

    let running = Arc::new(AtomicBool::new(true));
    let running_clone = running.clone();
    ctrlc::set_handler(move || {
        running_clone.store(false, Ordering::SeqCst);
    })
    .context("failed to set Ctrl+C handler")?;

    if !ui.json {
        print!(
            "{}",
            render_watch_header(&use_case.cwd().display().to_string(), ui.color, ui.unicode)
        );
    }

    let json = ui.json;
    let (color, unicode) = (ui.color, ui.unicode);
    use_case.start(running, move |event| {
        if json {
            println!("{}", event.to_json());
            return;
        }
        let timestamp = chrono::Local::now().format("%H:%M:%S").to_string();
        let rendered = render_watch_event(&timestamp, &event, color, unicode);
        match event {
            WatchEvent::Error { .. } => eprint!("{rendered}"),
            _ => print!("{rendered}"),
        }
    })?;

    Ok(())
}

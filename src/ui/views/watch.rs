use barrelsmith::application::WatchEvent;

use crate::ui::format::{format_duration, plural};
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

pub fn render_watch_header(root: &str, supports_color: bool, supports_unicode: bool) -> String {
    let title = ColoredText::info("barrelsmith watch")
        .bold()
        .render(supports_color);
    format!(
        "{} {}\nRoot: {}\nHint: Press Ctrl+C to stop\n\n",
        Icon::Watch.colored(supports_color, supports_unicode),
        title,
        root
    )
}

/// One event as `[HH:MM:SS] <icon> <text>`; regenerations list each written file
pub fn render_watch_event(
    timestamp: &str,
    event: &WatchEvent,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let prefix = ColoredText::dim(format!("[{timestamp}]")).render(supports_color);
    let icon = |icon: Icon| icon.colored(supports_color, supports_unicode);

    match event {
        WatchEvent::WatchStarted { config, rules, .. } => format!(
            "{prefix} {} Watching for changes ({}, {})\n",
            icon(Icon::Watch),
            config,
            plural(*rules, "rule")
        ),
        WatchEvent::ChangesDetected { directories } => format!(
            "{prefix} {} Changed: {}\n",
            icon(Icon::Arrow),
            directories.join(", ")
        ),
        WatchEvent::RegenerationComplete {
            written,
            skipped,
            conflicts,
            errors,
            elapsed_ms,
        } => {
            let elapsed = format_duration(std::time::Duration::from_millis(*elapsed_ms));
            let mut out = String::new();
            for path in written {
                out.push_str(&format!(
                    "{prefix} {} {}  {}\n",
                    ColoredText::warning("UPDATE").render(supports_color),
                    ColoredText::dim(path.as_str()).render(supports_color),
                    ColoredText::dim(elapsed.as_str()).render(supports_color)
                ));
            }
            let status = if *errors > 0 || *conflicts > 0 {
                Icon::Warning
            } else {
                Icon::Success
            };
            let mut parts = vec![
                format!("{} written", written.len()),
                format!("{skipped} up-to-date"),
            ];
            if *conflicts > 0 {
                parts.push(plural(*conflicts, "conflict"));
            }
            if *errors > 0 {
                parts.push(plural(*errors, "error"));
            }
            out.push_str(&format!(
                "{prefix} {} Regenerated: {}\n",
                icon(status),
                parts.join(", ")
            ));
            out
        }
        WatchEvent::ConfigReloaded { rules } => format!(
            "{prefix} {} Config reloaded ({})\n",
            icon(Icon::Success),
            plural(*rules, "rule")
        ),
        WatchEvent::Error { message } => {
            format!("{prefix} {} Error: {}\n", icon(Icon::Error), message)
        }
        WatchEvent::Shutdown => format!("\n{prefix} {} Watch stopped.\n", icon(Icon::Watch)),
    }
}

use std::path::Path;

use barrelsmith::application::GenerateResult;
use barrelsmith::domain::entities::{Action, ActionKind, PlanError, PlanResult};

use crate::ui::format::{display_path, format_duration, plural};
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

/// `  CREATE    src/index.ts`, with the reason for skips and conflicts
pub fn render_action(action: &Action, cwd: &Path, supports_color: bool) -> String {
    let kind = action.kind();
    let label = paint(kind, format!("{:<9}", kind.label())).render(supports_color);
    let path = ColoredText::dim(display_path(cwd, action.path())).render(supports_color);

    match action.reason() {
        Some(reason) => format!("  {label} {path} ({reason})\n"),
        None => format!("  {label} {path}\n"),
    }
}

fn paint(kind: ActionKind, text: String) -> ColoredText {
    match kind {
        ActionKind::Create => ColoredText::success(text),
        ActionKind::Update => ColoredText::warning(text),
        ActionKind::Skip => ColoredText::dim(text),
        ActionKind::Conflict => ColoredText::error(text),
    }
}

pub fn render_plan_error(
    error: &PlanError,
    cwd: &Path,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    format!(
        "  {} {}: {}\n",
        Icon::Error.colored(supports_color, supports_unicode),
        display_path(cwd, &error.directory),
        error.error
    )
}

/// `3 created, 1 updated, 2 up-to-date, 1 conflicts`; empty kinds are left out
pub fn render_summary(plan: &PlanResult, supports_color: bool) -> String {
    let parts = [
        (ActionKind::Create, "created"),
        (ActionKind::Update, "updated"),
        (ActionKind::Skip, "up-to-date"),
        (ActionKind::Conflict, "conflicts"),
    ];
    let rendered: Vec<String> = parts
        .into_iter()
        .filter_map(|(kind, label)| {
            let count = plan.count(kind);
            (count > 0).then(|| paint(kind, format!("{count} {label}")).render(supports_color))
        })
        .collect();

    if rendered.is_empty() {
        "no barrels".to_string()
    } else {
        rendered.join(", ")
    }
}

pub fn render_loaded_config(rules: usize, supports_color: bool, supports_unicode: bool) -> String {
    format!(
        "\n  {} Loaded config ({})\n",
        Icon::Success.colored(supports_color, supports_unicode),
        plural(rules, "rule")
    )
}

pub fn render_generate(
    result: &GenerateResult,
    cwd: &Path,
    dry_run: bool,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut out = String::new();
    let plan = &result.plan;

    if dry_run {
        out.push_str(&format!(
            "  {} Dry run: no files will be written\n\n",
            Icon::Info.colored(supports_color, supports_unicode)
        ));
    }

    for action in &plan.actions {
        out.push_str(&render_action(action, cwd, supports_color));
    }

    if plan.has_errors() {
        out.push('\n');
        for error in &plan.errors {
            out.push_str(&render_plan_error(error, cwd, supports_color, supports_unicode));
        }
    }

    if let Some(tool) = result.formatted_with {
        out.push_str(&format!(
            "\n  {} Formatted {} with {}\n",
            Icon::Success.colored(supports_color, supports_unicode),
            plural(result.written.len(), "file"),
            tool
        ));
    }

    let timer = ColoredText::dim(if supports_unicode { "⏱" } else { "in" }).render(supports_color);
    if dry_run {
        let stale = plan.stale().count();
        let mut parts = Vec::new();
        if stale > 0 {
            parts.push(format!("{stale} would change"));
        }
        let skipped = plan.count(ActionKind::Skip);
        if skipped > 0 {
            parts.push(ColoredText::dim(format!("{skipped} up-to-date")).render(supports_color));
        }
        let conflicts = plan.count(ActionKind::Conflict);
        if conflicts > 0 {
            parts.push(ColoredText::error(plural(conflicts, "conflict")).render(supports_color));
        }
        if parts.is_empty() {
            parts.push("no barrels".to_string());
        }
        out.push_str(&format!("\n  {}\n", parts.join(", ")));
    } else {
        out.push_str(&format!(
            "\n  {}  {} {}\n",
            render_summary(plan, supports_color),
            timer,
            format_duration(result.elapsed)
        ));
    }

    out
}

use std::path::Path;

use barrelsmith::application::CheckResult;
use barrelsmith::domain::entities::ActionKind;

use crate::ui::components::diff::render_barrel_diff;
use crate::ui::format::{display_path, plural};
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;
use crate::ui::views::generate::{render_action, render_plan_error};

fn is_are(count: usize) -> &'static str {
    if count == 1 {
        "is"
    } else {
        "are"
    }
}

pub fn render_check(
    result: &CheckResult,
    cwd: &Path,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut out = String::new();
    let plan = &result.plan;
    let stale: Vec<_> = plan.stale().collect();

    if stale.is_empty() {
        let total = plan.actions.len();
        out.push_str(&format!(
            "\n  {} All {} {} up-to-date\n",
            Icon::Success.colored(supports_color, supports_unicode),
            plural(total, "barrel"),
            is_are(total)
        ));
    } else {
        out.push_str(&format!(
            "\n  {} {} {} stale\n\n",
            Icon::Error.colored(supports_color, supports_unicode),
            plural(stale.len(), "barrel"),
            is_are(stale.len())
        ));
        for action in &stale {
            out.push_str(&render_action(action, cwd, supports_color));
        }
    }

    if !result.stale.is_empty() {
        out.push('\n');
        for barrel in &result.stale {
            let old = match barrel.kind {
                ActionKind::Create => None,
                _ => Some(barrel.old.as_str()),
            };
            out.push_str(&render_barrel_diff(
                &display_path(cwd, &barrel.path),
                old,
                &barrel.new,
                supports_color,
            ));
        }
    }

    if plan.has_errors() {
        out.push('\n');
        for error in &plan.errors {
            out.push_str(&render_plan_error(error, cwd, supports_color, supports_unicode));
        }
    }

    if !stale.is_empty() || plan.has_errors() {
        out.push_str(&format!(
            "\n  Run {} to fix.\n",
            ColoredText::plain("barrelsmith generate")
                .bold()
                .render(supports_color)
        ));
    }

    out
}

use barrelsmith::application::{CheckCategory, DoctorCheck, DoctorReport};

use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

pub fn render_doctor_header(supports_color: bool, supports_unicode: bool) -> String {
    format!(
        "\n{} {}\n",
        Icon::Doctor.colored(supports_color, supports_unicode),
        ColoredText::info("barrelsmith doctor").bold().render(supports_color)
    )
}

fn render_check(check: &DoctorCheck, supports_color: bool, supports_unicode: bool) -> String {
    match check {
        DoctorCheck::Pass { message, .. } => format!(
            "    {} {}\n",
            Icon::Success.colored(supports_color, supports_unicode),
            message
        ),
        DoctorCheck::Fail { message, fix, .. } => {
            let mut line = format!(
                "    {} {}\n",
                Icon::Error.colored(supports_color, supports_unicode),
                message
            );
            if let Some(fix) = fix {
                line.push_str(&format!(
                    "      {} {}\n",
                    Icon::Arrow.colored(supports_color, supports_unicode),
                    fix
                ));
            }
            line
        }
        DoctorCheck::Suggestion { message, .. } => format!(
            "    {} {}\n",
            Icon::Suggest.colored(supports_color, supports_unicode),
            message
        ),
    }
}

/// Checks grouped by category in a fixed order, then a summary line
pub fn render_doctor_report(
    report: &DoctorReport,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut sections = Vec::new();
    for category in CheckCategory::ALL {
        let mut section = String::new();
        for check in report.in_category(category) {
            section.push_str(&render_check(check, supports_color, supports_unicode));
        }
        if !section.is_empty() {
            let header = ColoredText::plain(category.label())
                .bold()
                .render(supports_color);
            sections.push(format!("  {header}\n{section}"));
        }
    }

    let mut summary = Vec::new();
    if report.passed() > 0 {
        summary.push(ColoredText::success(format!("{} passed", report.passed())).render(supports_color));
    }
    if report.failed() > 0 {
        summary.push(ColoredText::error(format!("{} failed", report.failed())).render(supports_color));
    }
    if report.suggestions() > 0 {
        summary.push(
            ColoredText::info(format!("{} suggestions", report.suggestions()))
                .render(supports_color),
        );
    }

    format!("\n{}\n  {}\n", sections.join("\n"), summary.join(", "))
}

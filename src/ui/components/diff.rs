use crossterm::style::Stylize;
use similar::{ChangeTag, TextDiff};

use crate::ui::theme;

/// Lines of unchanged context around each hunk
const CONTEXT_LINES: usize = 3;

/// Unified diff of one barrel file; a missing file diffs against `/dev/null`
pub fn render_barrel_diff(path: &str, old: Option<&str>, new: &str, supports_color: bool) -> String {
    let diff = TextDiff::from_lines(old.unwrap_or(""), new);
    let mut out = String::new();

    let from = match old {
        Some(_) => format!("--- a/{path}"),
        None => "--- /dev/null".to_string(),
    };
    push_line(&mut out, &from, Style::Header, supports_color);
    push_line(&mut out, &format!("+++ b/{path}"), Style::Header, supports_color);

    for group in diff.grouped_ops(CONTEXT_LINES) {
        let (Some(first), Some(last)) = (group.first(), group.last()) else {
            continue;
        };
        let old_start = first.old_range().start;
        let new_start = first.new_range().start;
        let old_len = last.old_range().end - old_start;
        let new_len = last.new_range().end - new_start;
        let hunk = format!(
            "@@ -{},{} +{},{} @@",
            old_start + 1,
            old_len,
            new_start + 1,
            new_len
        );
        push_line(&mut out, &hunk, Style::Hunk, supports_color);

        for op in &group {
            for change in diff.iter_changes(op) {
                let (sign, style) = match change.tag() {
                    ChangeTag::Delete => ("-", Style::Removed),
                    ChangeTag::Insert => ("+", Style::Added),
                    ChangeTag::Equal => (" ", Style::Context),
                };
                let value = change.value().trim_end_matches('\n');
                push_line(&mut out, &format!("{sign}{value}"), style, supports_color);
            }
        }
    }

    out
}

#[derive(Debug, Clone, Copy)]
enum Style {
    Header,
    Hunk,
    Added,
    Removed,
    Context,
}

fn push_line(out: &mut String, line: &str, style: Style, supports_color: bool) {
    if supports_color {
        let color = match style {
            Style::Header | Style::Hunk => theme::colors::INFO,
            Style::Added => theme::colors::SUCCESS,
            Style::Removed => theme::colors::ERROR,
            Style::Context => theme::colors::DIM,
        };
        out.push_str(&format!("{}", line.with(color)));
    } else {
        out.push_str(line);
    }
    out.push('\n');
}

//! Elastic console rendering of a diff report, with ANSI colors keyed by
//! change status. Width accounting skips escape sequences so colored cells
//! still align.

use std::borrow::Cow;
use std::fmt::Write as _;

use crate::classify::ChangeFlags;
use crate::diff::DiffResult;

const ANSI_RESET: &str = "\u{1b}[0m";
const ANSI_CHANGED: &str = "\u{1b}[36m";
const ANSI_ADDED: &str = "\u{1b}[32m";
const ANSI_DELETED: &str = "\u{1b}[35m";
const ANSI_CHANGED_DELETED: &str = "\u{1b}[95m";

/// Render a diff result as an aligned console table, coloring each cell by
/// its change status.
pub fn render_table(result: &DiffResult) -> String {
    let rows = result
        .rows
        .iter()
        .map(|row| {
            row.cells
                .iter()
                .map(|cell| match status_color(cell.flags) {
                    Some(color) => format!("{color}{}{ANSI_RESET}", cell.value),
                    None => cell.value.clone(),
                })
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();
    render_grid(&result.columns, &rows)
}

/// Render plain headers and rows as an aligned table with a separator line
/// under the header.
pub fn render_grid(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| display_width(h)).collect();
    for row in rows {
        for (idx, cell) in row.iter().enumerate().take(widths.len()) {
            widths[idx] = widths[idx].max(display_width(cell));
        }
    }

    let mut output = String::new();
    push_row(&mut output, headers, &widths);
    let separator = widths
        .iter()
        .map(|w| "-".repeat(*w))
        .collect::<Vec<String>>();
    push_row(&mut output, &separator, &widths);
    for row in rows {
        push_row(&mut output, row, &widths);
    }
    output
}

pub fn print_grid(headers: &[String], rows: &[Vec<String>]) {
    print!("{}", render_grid(headers, rows));
}

/// Same presentation priority as the HTML renderer: combined
/// changed+deleted, then deleted, then added, then changed.
fn status_color(flags: ChangeFlags) -> Option<&'static str> {
    if flags.changed && flags.deleted {
        Some(ANSI_CHANGED_DELETED)
    } else if flags.deleted {
        Some(ANSI_DELETED)
    } else if flags.added {
        Some(ANSI_ADDED)
    } else if flags.changed {
        Some(ANSI_CHANGED)
    } else {
        None
    }
}

fn push_row(output: &mut String, cells: &[String], widths: &[usize]) {
    let mut line = String::new();
    for (idx, cell) in cells.iter().enumerate().take(widths.len()) {
        if idx > 0 {
            line.push_str("  ");
        }
        let clean = sanitize_cell(cell);
        let padding = widths[idx].saturating_sub(display_width(clean.as_ref()));
        line.push_str(clean.as_ref());
        for _ in 0..padding {
            line.push(' ');
        }
    }
    let _ = writeln!(output, "{}", line.trim_end());
}

/// Character count excluding ANSI escape sequences (e.g. `\x1b[35m`).
fn display_width(value: &str) -> usize {
    let mut width = 0usize;
    let mut in_escape = false;
    for ch in value.chars() {
        if in_escape {
            if ch == 'm' {
                in_escape = false;
            }
        } else if ch == '\u{1b}' {
            in_escape = true;
        } else {
            width += 1;
        }
    }
    width
}

fn sanitize_cell(value: &str) -> Cow<'_, str> {
    if value.contains(['\n', '\r', '\t']) {
        Cow::Owned(value.replace(['\n', '\r', '\t'], " "))
    } else {
        Cow::Borrowed(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_grid_aligns_columns() {
        let headers = vec!["_id".to_string(), "someKey".to_string()];
        let rows = vec![
            vec!["1".to_string(), "HANGUP".to_string()],
            vec!["2".to_string(), "RINGING".to_string()],
        ];

        let rendered = render_grid(&headers, &rows);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(
            lines,
            vec![
                "_id  someKey",
                "---  -------",
                "1    HANGUP",
                "2    RINGING",
            ]
        );
    }

    #[test]
    fn display_width_ignores_ansi_sequences() {
        let colored = format!("{ANSI_DELETED}DELETED{ANSI_RESET}");
        assert_eq!(display_width(&colored), 7);
    }

    #[test]
    fn render_grid_normalizes_control_characters() {
        let headers = vec!["note".to_string()];
        let rows = vec![vec!["line1\nline2\tvalue".to_string()]];

        let rendered = render_grid(&headers, &rows);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[2], "line1 line2 value");
    }
}

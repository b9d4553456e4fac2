//! HTML report rendering: a color-coding legend followed by the data table.

use std::borrow::Cow;
use std::fmt::Write as _;

use crate::classify::ChangeFlags;
use crate::diff::DiffResult;

const COLOR_CHANGED: &str = "#008080";
const COLOR_ADDED: &str = "#2e8b57";
const COLOR_DELETED: &str = "#c71585";
const COLOR_CHANGED_DELETED: &str = "#800080";

const LEGEND: &[(&str, &str)] = &[
    ("changed", COLOR_CHANGED),
    ("added", COLOR_ADDED),
    ("deleted", COLOR_DELETED),
    ("changed + deleted", COLOR_CHANGED_DELETED),
];

/// Render a diff result as two HTML tables: the legend, then one header row
/// of schema columns and one row per id with cells colored by change status.
pub fn render_html(result: &DiffResult) -> String {
    let mut html = String::new();

    let _ = writeln!(html, "<table border=\"1\" cellpadding=\"4\">");
    let _ = writeln!(html, "<tr><th colspan=\"2\">Legend</th></tr>");
    for (label, color) in LEGEND {
        let _ = writeln!(
            html,
            "<tr><td style=\"background-color: {color}\">&nbsp;&nbsp;&nbsp;</td><td>{label}</td></tr>"
        );
    }
    let _ = writeln!(html, "</table>");

    let _ = writeln!(html, "<table border=\"1\" cellpadding=\"4\" style=\"width:100%\">");
    let mut header = String::from("<tr>");
    for column in &result.columns {
        let escaped = escape_html(column);
        let _ = write!(header, "<th data-column=\"{escaped}\">{escaped}</th>");
    }
    header.push_str("</tr>");
    let _ = writeln!(html, "{header}");

    for row in &result.rows {
        let mut line = String::from("<tr>");
        for cell in &row.cells {
            let value = escape_html(&cell.value);
            match status_color(cell.flags) {
                Some(color) => {
                    let _ = write!(line, "<td style=\"background-color: {color}\">{value}</td>");
                }
                None => {
                    let _ = write!(line, "<td>{value}</td>");
                }
            }
        }
        line.push_str("</tr>");
        let _ = writeln!(html, "{line}");
    }
    let _ = writeln!(html, "</table>");

    html
}

/// Presentation priority for combined flags: the combined changed+deleted
/// state gets its own color, then deleted, then added, then changed.
fn status_color(flags: ChangeFlags) -> Option<&'static str> {
    if flags.changed && flags.deleted {
        Some(COLOR_CHANGED_DELETED)
    } else if flags.deleted {
        Some(COLOR_DELETED)
    } else if flags.added {
        Some(COLOR_ADDED)
    } else if flags.changed {
        Some(COLOR_CHANGED)
    } else {
        None
    }
}

fn escape_html(text: &str) -> Cow<'_, str> {
    if text.contains(['&', '<', '>', '"']) {
        let mut escaped = String::with_capacity(text.len());
        for ch in text.chars() {
            match ch {
                '&' => escaped.push_str("&amp;"),
                '<' => escaped.push_str("&lt;"),
                '>' => escaped.push_str("&gt;"),
                '"' => escaped.push_str("&quot;"),
                other => escaped.push(other),
            }
        }
        Cow::Owned(escaped)
    } else {
        Cow::Borrowed(text)
    }
}

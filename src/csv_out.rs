//! CSV report rendering over a [`DiffResult`].

use anyhow::{Context, Result};
use csv::{QuoteStyle, WriterBuilder};

use crate::diff::DiffResult;

/// Render a diff result as CSV: a header row of column names and one line
/// per id of resolved display values. Quoting is `Always` for round-trip
/// safety.
pub fn render_csv(result: &DiffResult) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());

    writer
        .write_record(&result.columns)
        .context("Writing CSV header")?;
    for row in &result.rows {
        writer
            .write_record(row.cells.iter().map(|cell| cell.value.as_str()))
            .with_context(|| format!("Writing CSV row for id {}", row.id))?;
    }

    let bytes = writer.into_inner().context("Flushing CSV output")?;
    String::from_utf8(bytes).context("CSV output was not valid UTF-8")
}

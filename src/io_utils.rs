//! Snapshot loading and report output routing.
//!
//! All file I/O flows through this module: snapshot files are read and
//! validated here, rendered reports are written here, and the report format
//! is resolved from the output path extension when not given explicitly.
//! The `-` path convention routes through standard streams, so snapshots
//! can arrive on a pipe (`... | record-delta diff -s - -t after.json`).

use std::{
    fs,
    io::{self, Read, Write},
    path::Path,
};

use anyhow::{Context, Result};

use crate::cli::OutputFormat;
use crate::data::{Snapshot, parse_snapshot};

pub fn is_dash(path: &Path) -> bool {
    path == Path::new("-")
}

/// Read and validate one snapshot from a file or stdin.
pub fn read_snapshot(path: &Path) -> Result<Snapshot> {
    let text = if is_dash(path) {
        let mut buffer = String::new();
        io::stdin()
            .lock()
            .read_to_string(&mut buffer)
            .context("Reading snapshot from stdin")?;
        buffer
    } else {
        fs::read_to_string(path).with_context(|| format!("Reading snapshot file {path:?}"))?
    };
    let snapshot =
        parse_snapshot(&text).with_context(|| format!("Parsing snapshot {path:?}"))?;
    Ok(snapshot)
}

/// Pick the report format: an explicit `--format` wins, then the output
/// extension (`.html`/`.htm`, `.csv`, `.json`), then the console table.
pub fn resolve_format(path: Option<&Path>, provided: Option<OutputFormat>) -> OutputFormat {
    if let Some(format) = provided {
        return format;
    }
    if let Some(path) = path {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm") => {
                return OutputFormat::Html;
            }
            Some(ext) if ext.eq_ignore_ascii_case("csv") => return OutputFormat::Csv,
            Some(ext) if ext.eq_ignore_ascii_case("json") => return OutputFormat::Json,
            _ => {}
        }
    }
    OutputFormat::Table
}

/// Write a rendered report to a file, or to stdout when no path is given.
pub fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(p) if !is_dash(p) => {
            fs::write(p, content).with_context(|| format!("Writing report to {p:?}"))
        }
        _ => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(content.as_bytes()).context("Writing report to stdout")?;
            stdout.flush().context("Flushing stdout")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_format_prefers_explicit_over_extension() {
        let path = Path::new("report.html");
        assert_eq!(
            resolve_format(Some(path), Some(OutputFormat::Csv)),
            OutputFormat::Csv
        );
    }

    #[test]
    fn resolve_format_infers_from_extension() {
        assert_eq!(
            resolve_format(Some(Path::new("out.HTML")), None),
            OutputFormat::Html
        );
        assert_eq!(
            resolve_format(Some(Path::new("out.csv")), None),
            OutputFormat::Csv
        );
        assert_eq!(
            resolve_format(Some(Path::new("out.json")), None),
            OutputFormat::Json
        );
        assert_eq!(
            resolve_format(Some(Path::new("out.txt")), None),
            OutputFormat::Table
        );
        assert_eq!(resolve_format(None, None), OutputFormat::Table);
    }
}

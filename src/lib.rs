pub mod classify;
pub mod cli;
pub mod csv_out;
pub mod data;
pub mod diff;
pub mod error;
pub mod flatten;
pub mod html;
pub mod io_utils;
pub mod matcher;
pub mod schema;
pub mod table;

use std::{env, sync::OnceLock};

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, info};

use crate::cli::{Cli, Commands, OutputFormat};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("record_delta", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Diff(args) => handle_diff(&args),
        Commands::Ids(args) => handle_ids(&args),
    }
}

fn handle_diff(args: &cli::DiffArgs) -> Result<()> {
    let source = io_utils::read_snapshot(&args.source)?;
    let target = io_utils::read_snapshot(&args.target)?;
    info!(
        "Comparing {} source record(s) against {} target record(s)",
        source.len(),
        target.len()
    );

    let result = diff::diff(&source, &target).context("Computing snapshot diff")?;

    let format = io_utils::resolve_format(args.output.as_deref(), args.format);
    let rendered = match format {
        OutputFormat::Html => html::render_html(&result),
        OutputFormat::Csv => csv_out::render_csv(&result)?,
        OutputFormat::Table => table::render_table(&result),
        OutputFormat::Json => {
            let mut json =
                serde_json::to_string_pretty(&result).context("Serializing diff result")?;
            json.push('\n');
            json
        }
    };
    io_utils::write_output(args.output.as_deref(), &rendered)?;

    info!(
        "Report with {} row(s) across {} column(s) rendered as {format:?}",
        result.rows.len(),
        result.columns.len(),
    );
    Ok(())
}

fn handle_ids(args: &cli::IdsArgs) -> Result<()> {
    let snapshot = io_utils::read_snapshot(&args.input)?;
    let flat: Vec<_> = snapshot.iter().map(flatten::flatten).collect();
    let index = matcher::IdentityIndex::build(&flat)
        .with_context(|| format!("Indexing snapshot {:?}", args.input))?;

    let headers = vec![data::ID_COLUMN.to_string(), "fields".to_string()];
    let rows = index
        .ids()
        .map(|id| {
            let fields = index.get(id).map(|record| record.len()).unwrap_or_default();
            vec![id.to_string(), fields.to_string()]
        })
        .collect::<Vec<_>>();
    table::print_grid(&headers, &rows);

    info!("Indexed {} record(s)", index.len());
    Ok(())
}

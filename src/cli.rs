use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(author, version, about = "Diff snapshots of nested records into tabular reports", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Compare two snapshots and render the differences
    Diff(DiffArgs),
    /// List the identity index of a single snapshot
    Ids(IdsArgs),
}

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Source ("before") snapshot: a JSON array of records ('-' for stdin)
    #[arg(short = 's', long = "source")]
    pub source: PathBuf,
    /// Target ("after") snapshot: a JSON array of records ('-' for stdin)
    #[arg(short = 't', long = "target")]
    pub target: PathBuf,
    /// Output file (stdout if omitted)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
    /// Report format (inferred from the output extension when omitted;
    /// console table otherwise)
    #[arg(short = 'f', long = "format", value_enum)]
    pub format: Option<OutputFormat>,
}

#[derive(Debug, Args)]
pub struct IdsArgs {
    /// Snapshot to inspect ('-' for stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum OutputFormat {
    Html,
    Csv,
    Table,
    Json,
}

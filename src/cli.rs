use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Generate Glue catalog and S3 populator SQL files from an ingestion request",
    long_about = None
)]
pub struct Cli {
    #[command(flatten)]
    pub paths: PathArgs,
    /// Defaults to `generate` when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Write catalog and populator SQL files for every configured schema
    Generate,
    /// Show how the fields of one schema are matched to workbook aliases
    Align(AlignArgs),
}

/// Input and output locations. Unset values resolve against the install root
/// (`LAKEHOUSE_SQLGEN_HOME`, or the current directory).
#[derive(Debug, Clone, Default, Args)]
pub struct PathArgs {
    /// Excel workbook with the ingestion details (or a directory of `<sheet>.csv` exports)
    #[arg(long = "excel-file", global = true)]
    pub excel_file: Option<PathBuf>,
    /// Directory containing the tab-delimited schema files
    #[arg(long = "schemas-path", global = true)]
    pub schemas_path: Option<PathBuf>,
    /// Directory for Glue catalog SQL files
    #[arg(long = "catalog-output", global = true)]
    pub catalog_output: Option<PathBuf>,
    /// Directory for S3 populator SQL files
    #[arg(long = "s3-output", global = true)]
    pub s3_output: Option<PathBuf>,
    /// YAML configuration file
    #[arg(long = "config", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct AlignArgs {
    /// Schema identifier (schema file name without extension)
    #[arg(short, long)]
    pub schema: String,
    /// Output format for the alignment report
    #[arg(long, value_enum, default_value = "table")]
    pub format: AlignFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
#[value(rename_all = "kebab-case")]
pub enum AlignFormat {
    #[default]
    Table,
    Json,
}

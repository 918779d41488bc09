//! CLI argument definitions for the FMI report extractor.

use std::path::PathBuf;

use clap::{Args, Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use fmi_output::{DEFAULT_WORKBOOK_NAME, ExportFormat};

#[derive(Parser)]
#[command(
    name = "fmi-extract",
    version,
    about = "Extract Foundation Medicine XML reports into CSV and XLSX tables",
    long_about = "Extract Foundation Medicine XML reports into tabular outputs.\n\n\
                  Reads every *.xml report in the input directory, extracts short variants,\n\
                  copy number alterations, rearrangements, biomarkers and assay/patient data,\n\
                  joins each table to the assay/patient data on report_id and writes one CSV\n\
                  per table plus a combined workbook."
)]
pub struct Cli {
    #[command(flatten)]
    pub extract: ExtractArgs,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct ExtractArgs {
    /// Directory containing the *.xml report files.
    #[arg(long = "input-dir", value_name = "DIR")]
    pub input_dir: PathBuf,

    /// Directory for the generated files (created if missing).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: PathBuf,

    /// Output format to generate.
    #[arg(long = "format", value_enum, default_value = "both")]
    pub format: OutputFormatArg,

    /// File name of the generated workbook.
    #[arg(long = "workbook-name", value_name = "NAME", default_value = DEFAULT_WORKBOOK_NAME)]
    pub workbook_name: String,

    /// Report id to leave out of every table. May be repeated.
    #[arg(long = "exclude-report-id", value_name = "ID")]
    pub exclude_report_ids: Vec<String>,

    /// Also write the run summary as JSON to this path.
    #[arg(long = "summary-json", value_name = "PATH")]
    pub summary_json: Option<PathBuf>,

    /// Disable the progress bar.
    #[arg(long = "no-progress")]
    pub no_progress: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    Csv,
    Xlsx,
    Both,
}

impl From<OutputFormatArg> for ExportFormat {
    fn from(format: OutputFormatArg) -> Self {
        match format {
            OutputFormatArg::Csv => ExportFormat::Csv,
            OutputFormatArg::Xlsx => ExportFormat::Xlsx,
            OutputFormatArg::Both => ExportFormat::Both,
        }
    }
}

/// CLI log level choices.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use crate::model::SeriesInfo;

#[derive(Debug, Parser)]
#[command(
    name = "planestack",
    version,
    about = "Assemble image stacks from multi-series microscopy data"
)]
pub(super) struct Cli {
    /// Log engine decisions at debug level (overridden by RUST_LOG).
    #[arg(long, short, global = true)]
    pub(super) verbose: bool,

    #[command(subcommand)]
    pub(super) command: Commands,
}

#[derive(Debug, Subcommand)]
pub(super) enum Commands {
    /// Prints the geometry of every series, one series per input file.
    Info {
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
        /// Also print the original metadata table.
        #[arg(long)]
        metadata: bool,
    },
    /// Imports the inputs and writes every output stack as a TIFF file.
    Import {
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
        #[arg(long)]
        output_dir: PathBuf,
        #[arg(long)]
        report: Option<PathBuf>,
        #[command(flatten)]
        flags: ImportFlags,
    },
    /// Prints the slice labels the import would produce, without decoding.
    Labels {
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
        #[command(flatten)]
        flags: ImportFlags,
    },
}

/// Import switches; each one set here overrides the options file.
#[derive(Debug, Clone, Args)]
pub(super) struct ImportFlags {
    /// JSON or YAML import options.
    #[arg(long)]
    pub(super) options: Option<PathBuf>,
    #[arg(long)]
    pub(super) concatenate: bool,
    #[arg(long)]
    pub(super) merge_channels: bool,
    #[arg(long = "virtual")]
    pub(super) virtual_stack: bool,
    #[arg(long)]
    pub(super) split_channels: bool,
    #[arg(long)]
    pub(super) split_focal_planes: bool,
    #[arg(long)]
    pub(super) split_timepoints: bool,
    #[arg(long)]
    pub(super) autoscale: bool,
}

#[derive(Debug, Serialize)]
pub(super) struct SourceInfo {
    pub(super) files: Vec<String>,
    pub(super) series: Vec<SeriesInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) metadata: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub(super) struct ImageLabels {
    pub(super) title: String,
    pub(super) labels: Vec<String>,
}

//! Command-line interface.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::experiment::SuiteKind;
use crate::pipeline::PipelineOverride;

#[derive(Parser, Debug)]
#[command(name = "run-digest")]
#[command(about = "Group averages and comparison charts for numbered simulation runs", version)]
pub struct Cli {
    /// Folder holding one sub-directory per experiment variant
    #[arg(short, long, default_value = ".")]
    pub root: PathBuf,

    /// Which comparison to compute
    #[arg(short, long, value_enum, default_value_t = SuiteKind::Performance)]
    pub suite: SuiteKind,

    /// JSON file overriding selected pipeline parameters of the suite
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print the summary and exit without opening the chart window
    #[arg(long)]
    pub no_gui: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Initialise logging; `RUST_LOG` applies when no `-v` is given.
    pub fn init_logging(&self) {
        let mut builder = env_logger::Builder::from_default_env();
        match self.verbose {
            0 => {
                if std::env::var_os("RUST_LOG").is_none() {
                    builder.filter_level(log::LevelFilter::Warn);
                }
            }
            1 => {
                builder.filter_level(log::LevelFilter::Info);
            }
            _ => {
                builder.filter_level(log::LevelFilter::Debug);
            }
        }
        builder.format_timestamp_secs().init();
    }

    pub fn pipeline_override(&self) -> Result<Option<PipelineOverride>> {
        self.config
            .as_deref()
            .map(PipelineOverride::from_json)
            .transpose()
            .context("loading --config")
    }
}

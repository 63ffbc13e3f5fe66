mod app;
mod chart;
mod cli;
mod color;
mod data;
mod experiment;
mod pipeline;
mod report;
mod state;
mod ui;

use anyhow::{anyhow, Result};
use app::RunDigestApp;
use clap::Parser;
use eframe::egui;

use cli::Cli;
use experiment::Suite;
use state::AppState;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.init_logging();

    let pipeline = cli.pipeline_override()?;
    let mut suite = Suite::new(cli.suite);
    if let Some(over) = &pipeline {
        let merged = over.apply_to(&suite.pipeline);
        log::info!("Using pipeline config from --config: {merged:?}");
        suite = suite.with_pipeline(merged);
    }

    let result = suite.run(&cli.root)?;
    report::write_summary(&mut std::io::stdout().lock(), &result)?;

    if cli.no_gui {
        return Ok(());
    }

    let state = AppState::new(cli.root.clone(), cli.suite, pipeline).with_result(result);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 700.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Run Digest – Group Averages",
        options,
        Box::new(move |_cc| Ok(Box::new(RunDigestApp::new(state)))),
    )
    .map_err(|e| anyhow!("chart window failed: {e}"))
}

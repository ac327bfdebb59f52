mod cli;
mod config;
mod render;

use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use grabber_core::DownloadStatus;
use grabber_engine::{AtomicFileWriter, DownloadOrchestrator, EngineHandle};
use grabber_logging::grab_info;

use cli::Cli;
use config::AppConfig;
use render::TerminalNotifier;

/// How often the terminal view is refreshed while a request is in flight.
const TICK: Duration = Duration::from_millis(75);

fn main() -> ExitCode {
    match run() {
        Ok(status) if status == DownloadStatus::Complete => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<DownloadStatus> {
    let cli = Cli::parse();
    let selection = cli.selection()?;
    let config = AppConfig::load(&cli.config)?.with_overrides(&cli);
    grabber_logging::initialize(&config.log_settings());
    grab_info!(
        "api {} output {:?}",
        config.api_base_url,
        config.output_dir
    );

    let engine = EngineHandle::new(config.fetch_settings()).context("starting engine")?;
    let mut orchestrator = DownloadOrchestrator::new(
        engine,
        config.core_settings(),
        Box::new(TerminalNotifier),
        Box::new(AtomicFileWriter::new(config.output_dir.clone())),
    );

    orchestrator.apply_selection(&selection);
    orchestrator.submit();

    loop {
        orchestrator.pump();
        let view = orchestrator.view();
        if orchestrator.consume_dirty() && view.status.is_busy() {
            println!("{}", render::progress_line(&view));
        }
        if !view.status.is_busy() {
            break;
        }
        thread::sleep(TICK);
    }

    let view = orchestrator.view();
    for line in render::summary(&view) {
        println!("{line}");
    }
    Ok(view.status)
}

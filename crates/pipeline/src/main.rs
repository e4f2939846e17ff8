//! EEG Pipeline - Main Entry Point
//!
//! Usage: `eeg-pipeline [CONFIG]`

use anyhow::Result;
use participant_stats::WriterSink;
use pipeline::{init_logging, run, PipelineConfig};
use std::path::PathBuf;
use tracing::info;

fn main() -> Result<()> {
    init_logging()?;

    info!("=== EEG Pipeline v{} ===", env!("CARGO_PKG_VERSION"));

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = PipelineConfig::load(config_path.as_deref())?;
    info!("Sessions directory: {}", config.sessions_dir.display());

    let mut sink = WriterSink::stdout();
    let outcome = run(&config, &mut sink)?;
    info!("Pipeline finished with {} records", outcome.records.num_rows());

    Ok(())
}

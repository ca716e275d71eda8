use std::fs::File;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use vregion::config::Cli;
use vregion::extract::Extractor;
use vregion::fasta::{FastaReader, FastaWriter};
use vregion::logging::RejectLog;
use vregion::pipeline;
use vregion::primer::PrimerSet;

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    // primers and patterns are fixed before any record is read
    info!("loading primer sequences from {}", cli.primers);
    let primer_reader = FastaReader::from_path(&cli.primers)
        .with_context(|| format!("could not open primer file '{}'", cli.primers))?;
    let primers = PrimerSet::load(primer_reader, cli.mismatch)?;

    let reject_log = match &cli.logfile {
        Some(path) => match RejectLog::create(path) {
            Ok(log) => Some(log),
            Err(_) => {
                warn!("could not open '{}' for logging", path);
                None
            }
        },
        None => None,
    };

    let reader = FastaReader::from_path(&cli.input)
        .with_context(|| format!("could not open input file '{}'", cli.input))?;
    let mut writer = FastaWriter::to_path(&cli.output)
        .with_context(|| format!("could not open output file '{}'", cli.output))?;

    let extractor = Arc::new(Extractor::new(
        primers.patterns,
        cli.trim,
        cli.require,
        cli.size_interval(),
        cli.badchars,
    ));

    let report = pipeline::run(
        reader,
        &mut writer,
        extractor,
        cli.numprocs as usize,
        reject_log.as_ref(),
    )?;

    info!(
        "{} of {} records kept",
        report.passed_records, report.total_records
    );

    if let Some(path) = &cli.json {
        let mut f = File::create(path)
            .with_context(|| format!("could not write report to '{}'", path))?;
        serde_json::to_writer_pretty(&mut f, &report)?;
    }

    Ok(())
}

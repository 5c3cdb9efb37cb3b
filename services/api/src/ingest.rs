use clap::Args;
use rwax_oracle::config::AppConfig;
use rwax_oracle::error::AppError;
use rwax_oracle::oracle::{AssetOracle, BatchOutcome, PipelineMode, TracingEventSink};
use rwax_oracle::telemetry;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Args, Debug)]
pub(crate) struct IngestArgs {
    /// Raw listing export, one smashed listing per line
    #[arg(long, default_value = "./data/raw_property.csv")]
    pub(crate) input: PathBuf,
    /// Destination for the JSON asset feed
    #[arg(long, default_value = "./output/rwa_assets.json")]
    pub(crate) output: PathBuf,
    /// Write every assessment and the batch stats instead of only approved records
    #[arg(long)]
    pub(crate) audit: bool,
    /// Evaluate lines on the rayon thread pool
    #[arg(long)]
    pub(crate) parallel: bool,
}

pub(crate) fn run_ingest(args: IngestArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let mode = if args.audit {
        PipelineMode::Audit
    } else {
        PipelineMode::Publish
    };
    let oracle = AssetOracle::new(&config.oracle).with_mode(mode);
    let sink = TracingEventSink;

    let outcome = if args.parallel {
        oracle.from_path_parallel(&args.input, &sink)?
    } else {
        oracle.from_path(&args.input, &sink)?
    };

    write_feed(&args.output, &outcome, mode)?;
    info!(
        output = %args.output.display(),
        records = outcome.records.len(),
        "asset feed written"
    );

    println!(
        "{} listings read, {} assets published to {}",
        outcome.stats.lines_read,
        outcome.records.len(),
        args.output.display()
    );
    Ok(())
}

/// Publish mode writes the bare record array; audit mode writes the full outcome.
pub(crate) fn write_feed(
    path: &Path,
    outcome: &BatchOutcome,
    mode: PipelineMode,
) -> Result<(), AppError> {
    if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut writer = BufWriter::new(File::create(path)?);
    match mode {
        PipelineMode::Publish => serde_json::to_writer_pretty(&mut writer, &outcome.records)?,
        PipelineMode::Audit => serde_json::to_writer_pretty(&mut writer, outcome)?,
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rwax_oracle::config::OracleConfig;
    use rwax_oracle::oracle::InMemoryEventSink;

    const LISTING: &str =
        "MARINA ONE RESIDENCES 2 1000-1500 05 Jan-2024 1.97% Rented 5200 450.0 1.2 Freehold from 1998";

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("rwax-oracle-{name}-{}", std::process::id()))
    }

    #[test]
    fn publish_feed_is_a_record_array() {
        let dir = scratch_dir("publish");
        let path = dir.join("nested").join("feed.json");
        let outcome = AssetOracle::new(&OracleConfig::default())
            .process_lines([LISTING], &InMemoryEventSink::default());

        write_feed(&path, &outcome, PipelineMode::Publish).expect("feed written");

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).expect("feed readable"))
                .expect("valid json");
        let records = written.as_array().expect("array payload");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["financials"]["tokens"]["pt_ticker"], "PT-MAR");

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn audit_feed_carries_stats() {
        let dir = scratch_dir("audit");
        let path = dir.join("audit.json");
        let outcome = AssetOracle::new(&OracleConfig::default())
            .with_mode(PipelineMode::Audit)
            .process_lines([LISTING, "header without anchor"], &InMemoryEventSink::default());

        write_feed(&path, &outcome, PipelineMode::Audit).expect("feed written");

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).expect("feed readable"))
                .expect("valid json");
        assert_eq!(written["stats"]["unparseable"], 1);
        assert_eq!(written["assessments"].as_array().map(Vec::len), Some(1));

        fs::remove_dir_all(dir).ok();
    }
}

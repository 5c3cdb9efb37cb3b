//! Listing ingestion: anchor-based extraction, connectivity scoring, the
//! compliance gate and record assembly, driven line by line over a source.

pub mod assembler;
mod batch;
pub mod compliance;
pub mod domain;
pub mod events;
pub mod extractor;
pub mod scoring;

#[cfg(test)]
mod tests;

pub use assembler::{AssetRecord, RecordAssembler};
pub use batch::{BatchOutcome, BatchStats, ListingAssessment, PipelineMode};
pub use compliance::{ComplianceEngine, ComplianceStatus, ComplianceVerdict, RiskTier};
pub use domain::{Confidence, ContentHash, ExtractedFields, FieldKind, TenureType};
pub use events::{EventSink, InMemoryEventSink, PipelineEvent, SinkError, TracingEventSink};
pub use extractor::FieldExtractor;
pub use scoring::ConnectivityScorer;

use crate::config::OracleConfig;
use batch::LineOutcome;
use rayon::prelude::*;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("failed to open listing source {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to read listing source: {0}")]
    Io(#[from] std::io::Error),
}

/// Runs raw listing lines through extraction, scoring, compliance and assembly.
///
/// Holds configuration only; every batch call returns a fresh [`BatchOutcome`].
#[derive(Debug)]
pub struct AssetOracle {
    min_line_length: usize,
    extractor: FieldExtractor,
    scorer: ConnectivityScorer,
    engine: ComplianceEngine,
    assembler: RecordAssembler,
    mode: PipelineMode,
}

impl AssetOracle {
    pub fn new(config: &OracleConfig) -> Self {
        Self {
            min_line_length: config.min_line_length,
            extractor: FieldExtractor::new(),
            scorer: ConnectivityScorer::from_config(config),
            engine: ComplianceEngine::from_config(config),
            assembler: RecordAssembler::from_config(config),
            mode: PipelineMode::default(),
        }
    }

    pub fn with_extractor(mut self, extractor: FieldExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn with_mode(mut self, mode: PipelineMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> PipelineMode {
        self.mode
    }

    /// Extract, score and evaluate one line; `None` when it has no anchor.
    pub fn assess(&self, raw: &str) -> Option<ListingAssessment> {
        let fields = self.extractor.extract(raw)?;
        let connectivity_score = self
            .scorer
            .score(fields.mrt_distance_m, fields.cbd_distance_km);
        let verdict = self.engine.evaluate(&fields, connectivity_score);

        Some(ListingAssessment {
            fields,
            connectivity_score,
            verdict,
        })
    }

    /// The published record for one line, if it parses and is approved.
    pub fn publish_line(&self, raw: &str) -> Option<AssetRecord> {
        let assessment = self.assess(raw)?;
        self.assembler.assemble(
            &assessment.fields,
            assessment.connectivity_score,
            &assessment.verdict,
        )
    }

    pub fn process_lines<I, S>(&self, lines: I, sink: &dyn EventSink) -> BatchOutcome
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut outcome = BatchOutcome::default();
        for (index, line) in lines.into_iter().enumerate() {
            let line_outcome = self.evaluate_line(line.as_ref());
            self.record(&mut outcome, index + 1, line_outcome, sink);
        }

        self.finish(outcome)
    }

    /// Same as [`process_lines`](Self::process_lines) with lines evaluated on
    /// the rayon pool; results keep input order.
    pub fn process_parallel<S>(&self, lines: &[S], sink: &dyn EventSink) -> BatchOutcome
    where
        S: AsRef<str> + Sync,
    {
        let evaluated: Vec<LineOutcome> = lines
            .par_iter()
            .map(|line| self.evaluate_line(line.as_ref()))
            .collect();

        let mut outcome = BatchOutcome::default();
        for (index, line_outcome) in evaluated.into_iter().enumerate() {
            self.record(&mut outcome, index + 1, line_outcome, sink);
        }

        self.finish(outcome)
    }

    pub fn from_reader<R: Read>(
        &self,
        reader: R,
        sink: &dyn EventSink,
    ) -> Result<BatchOutcome, IngestError> {
        let mut outcome = BatchOutcome::default();

        for (index, chunk) in BufReader::new(reader).split(b'\n').enumerate() {
            let line = decode_line(&chunk?);
            let line_outcome = self.evaluate_line(&line);
            self.record(&mut outcome, index + 1, line_outcome, sink);
        }

        Ok(self.finish(outcome))
    }

    pub fn from_path<P: AsRef<Path>>(
        &self,
        path: P,
        sink: &dyn EventSink,
    ) -> Result<BatchOutcome, IngestError> {
        let file = open_source(path.as_ref())?;
        self.from_reader(file, sink)
    }

    /// Loads the whole source up front, then evaluates it with
    /// [`process_parallel`](Self::process_parallel).
    pub fn from_path_parallel<P: AsRef<Path>>(
        &self,
        path: P,
        sink: &dyn EventSink,
    ) -> Result<BatchOutcome, IngestError> {
        let file = open_source(path.as_ref())?;
        let lines = BufReader::new(file)
            .split(b'\n')
            .map(|chunk| chunk.map(|bytes| decode_line(&bytes)))
            .collect::<Result<Vec<String>, _>>()?;

        Ok(self.process_parallel(&lines, sink))
    }

    fn is_noise(&self, raw: &str) -> bool {
        raw.chars().count() < self.min_line_length
    }

    fn evaluate_line(&self, raw: &str) -> LineOutcome {
        if self.is_noise(raw) {
            return LineOutcome::Noise;
        }

        match self.assess(raw) {
            Some(assessment) => {
                let record = self.assembler.assemble(
                    &assessment.fields,
                    assessment.connectivity_score,
                    &assessment.verdict,
                );
                LineOutcome::Assessed { assessment, record }
            }
            None => LineOutcome::Unparseable,
        }
    }

    fn record(
        &self,
        outcome: &mut BatchOutcome,
        line_number: usize,
        line_outcome: LineOutcome,
        sink: &dyn EventSink,
    ) {
        let event = match &line_outcome {
            LineOutcome::Noise => {
                debug!(line_number, "line below minimum length, skipped as noise");
                None
            }
            LineOutcome::Unparseable => Some(PipelineEvent::Unparseable { line_number }),
            LineOutcome::Assessed { assessment, .. } => Some(PipelineEvent::Assessed {
                line_number,
                data_hash: assessment.fields.content_hash.as_str().to_string(),
                project: assessment.fields.project_name.clone(),
                status: assessment.verdict.status,
                reason: assessment.verdict.reason.clone(),
            }),
        };

        if let Some(event) = event {
            if let Err(err) = sink.publish(event) {
                warn!(line_number, %err, "event sink rejected pipeline event");
            }
        }

        outcome.absorb(line_outcome, self.mode);
    }

    fn finish(&self, outcome: BatchOutcome) -> BatchOutcome {
        let stats = &outcome.stats;
        info!(
            lines = stats.lines_read,
            approved = stats.approved,
            rejected = stats.rejected,
            flagged = stats.flagged,
            unparseable = stats.unparseable,
            noise = stats.noise_skipped,
            "listing batch complete"
        );
        outcome
    }
}

fn open_source(path: &Path) -> Result<std::fs::File, IngestError> {
    let file = std::fs::File::open(path).map_err(|source| IngestError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "analyzing listings with anchor parsing");
    Ok(file)
}

/// Invalid UTF-8 is replaced rather than rejected; a trailing `\r` is dropped.
fn decode_line(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .trim_end_matches('\r')
        .to_string()
}

impl Default for AssetOracle {
    fn default() -> Self {
        Self::new(&OracleConfig::default())
    }
}

use serde::{Deserialize, Serialize};

use super::assembler::AssetRecord;
use super::compliance::{ComplianceStatus, ComplianceVerdict};
use super::domain::ExtractedFields;

/// Controls what a batch returns besides the published records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineMode {
    /// Only approved asset records.
    #[default]
    Publish,
    /// Approved records plus an assessment for every parsed line.
    Audit,
}

/// Extractor, scorer and compliance output for one parsed line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingAssessment {
    pub fields: ExtractedFields,
    pub connectivity_score: f64,
    pub verdict: ComplianceVerdict,
}

/// Aggregate counters for a batch run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchStats {
    pub lines_read: usize,
    pub noise_skipped: usize,
    pub unparseable: usize,
    pub approved: usize,
    pub rejected: usize,
    pub flagged: usize,
}

impl BatchStats {
    pub fn parsed(&self) -> usize {
        self.approved + self.rejected + self.flagged
    }
}

/// Results of one batch invocation; each call owns its own outcome.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct BatchOutcome {
    pub records: Vec<AssetRecord>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub assessments: Vec<ListingAssessment>,
    pub stats: BatchStats,
}

#[derive(Debug)]
pub(crate) enum LineOutcome {
    Noise,
    Unparseable,
    Assessed {
        assessment: ListingAssessment,
        record: Option<AssetRecord>,
    },
}

impl BatchOutcome {
    pub(crate) fn absorb(&mut self, outcome: LineOutcome, mode: PipelineMode) {
        self.stats.lines_read += 1;

        match outcome {
            LineOutcome::Noise => self.stats.noise_skipped += 1,
            LineOutcome::Unparseable => self.stats.unparseable += 1,
            LineOutcome::Assessed { assessment, record } => {
                match assessment.verdict.status {
                    ComplianceStatus::Approved => self.stats.approved += 1,
                    ComplianceStatus::Rejected => self.stats.rejected += 1,
                    ComplianceStatus::Flagged => self.stats.flagged += 1,
                }

                if let Some(record) = record {
                    self.records.push(record);
                }

                if mode == PipelineMode::Audit {
                    self.assessments.push(assessment);
                }
            }
        }
    }
}

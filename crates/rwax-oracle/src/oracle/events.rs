use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::compliance::ComplianceStatus;

/// Typed notification emitted for every non-noise line of a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PipelineEvent {
    Unparseable {
        line_number: usize,
    },
    Assessed {
        line_number: usize,
        data_hash: String,
        project: String,
        status: ComplianceStatus,
        reason: String,
    },
}

impl PipelineEvent {
    pub fn line_number(&self) -> usize {
        match self {
            PipelineEvent::Unparseable { line_number }
            | PipelineEvent::Assessed { line_number, .. } => *line_number,
        }
    }
}

/// Outbound hook for pipeline events (terminal loggers, dashboards, queues).
pub trait EventSink: Send + Sync {
    fn publish(&self, event: PipelineEvent) -> Result<(), SinkError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("event transport unavailable: {0}")]
    Transport(String),
}

/// Writes events to the `tracing` subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn publish(&self, event: PipelineEvent) -> Result<(), SinkError> {
        match &event {
            PipelineEvent::Unparseable { line_number } => {
                debug!(line_number, "no yield anchor, line skipped");
            }
            PipelineEvent::Assessed {
                line_number,
                project,
                status: ComplianceStatus::Approved,
                ..
            } => {
                info!(line_number, %project, "listing approved");
            }
            PipelineEvent::Assessed {
                line_number,
                project,
                status,
                reason,
                ..
            } => {
                warn!(line_number, %project, status = status.label(), %reason, "listing held back");
            }
        }

        Ok(())
    }
}

/// Buffers events in memory; used by the HTTP surface and tests.
#[derive(Debug, Default)]
pub struct InMemoryEventSink {
    events: Mutex<Vec<PipelineEvent>>,
}

impl InMemoryEventSink {
    pub fn events(&self) -> Vec<PipelineEvent> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl EventSink for InMemoryEventSink {
    fn publish(&self, event: PipelineEvent) -> Result<(), SinkError> {
        let mut guard = self
            .events
            .lock()
            .map_err(|_| SinkError::Transport("event buffer poisoned".to_string()))?;
        guard.push(event);
        Ok(())
    }
}

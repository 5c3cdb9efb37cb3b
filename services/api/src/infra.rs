use metrics_exporter_prometheus::PrometheusHandle;
use rwax_oracle::config::OracleConfig;
use rwax_oracle::oracle::{AssetOracle, PipelineMode};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// One configured oracle per pipeline mode, shared across requests.
#[derive(Clone)]
pub(crate) struct OracleHandle {
    publish: Arc<AssetOracle>,
    audit: Arc<AssetOracle>,
}

impl OracleHandle {
    pub(crate) fn new(config: &OracleConfig) -> Self {
        Self {
            publish: Arc::new(AssetOracle::new(config)),
            audit: Arc::new(AssetOracle::new(config).with_mode(PipelineMode::Audit)),
        }
    }

    pub(crate) fn for_mode(&self, mode: PipelineMode) -> &AssetOracle {
        match mode {
            PipelineMode::Publish => &self.publish,
            PipelineMode::Audit => &self.audit,
        }
    }
}

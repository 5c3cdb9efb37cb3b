use crate::config::{OracleConfig, DEFAULT_CBD_WEIGHT, DEFAULT_MRT_WEIGHT};

const MAX_SCORE: f64 = 100.0;
/// Walking distance to an MRT station that costs nothing.
const FREE_MRT_RADIUS_M: f64 = 200.0;
/// Every further step of this many metres costs one unweighted point.
const MRT_STEP_M: f64 = 50.0;
const CBD_POINTS_PER_KM: f64 = 2.0;

/// Relative weights of the MRT and CBD penalties.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectivityWeights {
    mrt: f64,
    cbd: f64,
}

impl ConnectivityWeights {
    /// Non-finite or negative weights fall back to the defaults.
    pub fn new(mrt: f64, cbd: f64) -> Self {
        Self {
            mrt: sanitize(mrt, DEFAULT_MRT_WEIGHT),
            cbd: sanitize(cbd, DEFAULT_CBD_WEIGHT),
        }
    }

    pub fn mrt(&self) -> f64 {
        self.mrt
    }

    pub fn cbd(&self) -> f64 {
        self.cbd
    }
}

impl Default for ConnectivityWeights {
    fn default() -> Self {
        Self::new(DEFAULT_MRT_WEIGHT, DEFAULT_CBD_WEIGHT)
    }
}

fn sanitize(weight: f64, fallback: f64) -> f64 {
    if weight.is_finite() && weight >= 0.0 {
        weight
    } else {
        fallback
    }
}

/// Maps transit and CBD proximity to a 0-100 location quality score.
#[derive(Debug, Clone, Default)]
pub struct ConnectivityScorer {
    weights: ConnectivityWeights,
}

impl ConnectivityScorer {
    pub fn new(weights: ConnectivityWeights) -> Self {
        Self { weights }
    }

    pub fn from_config(config: &OracleConfig) -> Self {
        Self::new(ConnectivityWeights::new(config.mrt_weight, config.cbd_weight))
    }

    pub fn weights(&self) -> ConnectivityWeights {
        self.weights
    }

    /// Score in `[0, 100]` rounded to one decimal; 0 when either distance is unknown.
    pub fn score(&self, mrt_distance_m: Option<f64>, cbd_distance_km: Option<f64>) -> f64 {
        match (mrt_distance_m, cbd_distance_km) {
            (Some(mrt), Some(cbd)) => self.weighted(mrt, cbd).unwrap_or(0.0),
            _ => 0.0,
        }
    }

    fn weighted(&self, mrt_m: f64, cbd_km: f64) -> Option<f64> {
        if !mrt_m.is_finite() || !cbd_km.is_finite() {
            return None;
        }

        let mrt_penalty = ((mrt_m - FREE_MRT_RADIUS_M) / MRT_STEP_M).max(0.0);
        let cbd_penalty = (cbd_km * CBD_POINTS_PER_KM).max(0.0);
        let raw = MAX_SCORE - mrt_penalty * self.weights.mrt - cbd_penalty * self.weights.cbd;
        if !raw.is_finite() {
            return None;
        }

        Some(round_to_tenth(raw.clamp(0.0, MAX_SCORE)))
    }
}

/// Rounds the exact binary value to one decimal, ties to even.
fn round_to_tenth(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}

use serde::{Deserialize, Serialize};

use super::super::domain::{ExtractedFields, TenureType};

const BASE_RISK_SCORE: i8 = 10;
const LEASEHOLD_DEDUCTION: i8 = 2;
const LOW_CONNECTIVITY_DEDUCTION: i8 = 2;
const LOW_YIELD_DEDUCTION: i8 = 1;
const LOW_CONNECTIVITY_THRESHOLD: f64 = 50.0;
const LOW_YIELD_THRESHOLD: f64 = 2.0;

/// Investor-facing risk band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskTier {
    A,
    B,
    C,
}

impl RiskTier {
    /// The highest-risk band whose threshold the score meets wins.
    pub fn from_score(score: i8) -> Self {
        match score {
            s if s <= 5 => RiskTier::C,
            s if s <= 7 => RiskTier::B,
            _ => RiskTier::A,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskTier::A => "A (Low Risk)",
            RiskTier::B => "B (Medium Risk)",
            RiskTier::C => "C (High Risk)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactor {
    Leasehold,
    LowConnectivity,
    LowYield,
}

/// Discrete deduction from the base risk score, kept for audit trails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskDeduction {
    pub factor: RiskFactor,
    pub points: i8,
    pub notes: String,
}

pub(crate) fn score_risk(fields: &ExtractedFields, connectivity: f64) -> (i8, Vec<RiskDeduction>) {
    let mut deductions = Vec::new();

    if fields.tenure == TenureType::Leasehold {
        deductions.push(RiskDeduction {
            factor: RiskFactor::Leasehold,
            points: LEASEHOLD_DEDUCTION,
            notes: "leasehold tenure".to_string(),
        });
    }

    if connectivity < LOW_CONNECTIVITY_THRESHOLD {
        deductions.push(RiskDeduction {
            factor: RiskFactor::LowConnectivity,
            points: LOW_CONNECTIVITY_DEDUCTION,
            notes: format!(
                "connectivity {connectivity:.1} below {LOW_CONNECTIVITY_THRESHOLD:.0}"
            ),
        });
    }

    if fields.yield_apy < LOW_YIELD_THRESHOLD {
        deductions.push(RiskDeduction {
            factor: RiskFactor::LowYield,
            points: LOW_YIELD_DEDUCTION,
            notes: format!(
                "yield {:.2}% below {LOW_YIELD_THRESHOLD:.1}%",
                fields.yield_apy
            ),
        });
    }

    let total: i8 = deductions.iter().map(|deduction| deduction.points).sum();
    (BASE_RISK_SCORE - total, deductions)
}

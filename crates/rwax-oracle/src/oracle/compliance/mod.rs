mod policy;
mod rules;

pub use policy::{ComplianceStatus, EligibilityRule};
pub use rules::{RiskDeduction, RiskFactor, RiskTier};

use super::domain::ExtractedFields;
use crate::config::{OracleConfig, DEFAULT_MINIMUM_LEASE_AGE};
use serde::{Deserialize, Serialize};

/// Legal dials for the eligibility gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompliancePolicy {
    current_year: i32,
    minimum_lease_age: i32,
}

impl CompliancePolicy {
    /// A negative minimum age falls back to the default floor.
    pub fn new(current_year: i32, minimum_lease_age: i32) -> Self {
        let minimum_lease_age = if minimum_lease_age >= 0 {
            minimum_lease_age
        } else {
            DEFAULT_MINIMUM_LEASE_AGE
        };

        Self {
            current_year,
            minimum_lease_age,
        }
    }

    pub fn current_year(&self) -> i32 {
        self.current_year
    }

    pub fn minimum_lease_age(&self) -> i32 {
        self.minimum_lease_age
    }
}

impl From<&OracleConfig> for CompliancePolicy {
    fn from(config: &OracleConfig) -> Self {
        Self::new(config.current_year, config.minimum_lease_age)
    }
}

/// Outcome of the compliance gate plus the independent risk assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceVerdict {
    pub status: ComplianceStatus,
    pub rule: EligibilityRule,
    pub reason: String,
    pub risk_tier: RiskTier,
    pub risk_score: i8,
    pub deductions: Vec<RiskDeduction>,
}

impl ComplianceVerdict {
    pub fn is_approved(&self) -> bool {
        self.status == ComplianceStatus::Approved
    }
}

/// Stateless gate applying tenure/lease-age eligibility and risk tiering.
#[derive(Debug, Clone)]
pub struct ComplianceEngine {
    policy: CompliancePolicy,
}

impl ComplianceEngine {
    pub fn new(policy: CompliancePolicy) -> Self {
        Self { policy }
    }

    pub fn from_config(config: &OracleConfig) -> Self {
        Self::new(CompliancePolicy::from(config))
    }

    pub fn policy(&self) -> &CompliancePolicy {
        &self.policy
    }

    pub fn evaluate(&self, fields: &ExtractedFields, connectivity: f64) -> ComplianceVerdict {
        let rule = policy::decide_eligibility(fields, &self.policy);
        let (risk_score, deductions) = rules::score_risk(fields, connectivity);

        ComplianceVerdict {
            status: rule.status(),
            rule,
            reason: rule.summary(),
            risk_tier: RiskTier::from_score(risk_score),
            risk_score,
            deductions,
        }
    }
}

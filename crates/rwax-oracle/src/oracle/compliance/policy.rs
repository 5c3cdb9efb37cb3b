use serde::{Deserialize, Serialize};

use super::super::domain::{ExtractedFields, TenureType};
use super::CompliancePolicy;

/// Terminal eligibility classification of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComplianceStatus {
    Approved,
    Rejected,
    Flagged,
}

impl ComplianceStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ComplianceStatus::Approved => "APPROVED",
            ComplianceStatus::Rejected => "REJECTED",
            ComplianceStatus::Flagged => "FLAGGED",
        }
    }
}

/// Why a listing landed in its status; renders the human-readable note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum EligibilityRule {
    Unrestricted,
    MatureLease { age: i32 },
    NewLease { age: i32 },
    UnknownLeaseYear,
    UnknownTenure,
}

impl EligibilityRule {
    pub fn status(&self) -> ComplianceStatus {
        match self {
            EligibilityRule::Unrestricted | EligibilityRule::MatureLease { .. } => {
                ComplianceStatus::Approved
            }
            EligibilityRule::NewLease { .. } | EligibilityRule::UnknownTenure => {
                ComplianceStatus::Rejected
            }
            EligibilityRule::UnknownLeaseYear => ComplianceStatus::Flagged,
        }
    }

    pub fn summary(&self) -> String {
        match self {
            EligibilityRule::Unrestricted => "Unrestricted (Freehold)".to_string(),
            EligibilityRule::MatureLease { age } => format!("Safe Leasehold ({age} yrs old)"),
            EligibilityRule::NewLease { age } => format!("Restricted/New EC ({age} yrs old)"),
            EligibilityRule::UnknownLeaseYear => "Unknown Lease Year".to_string(),
            EligibilityRule::UnknownTenure => "Unknown".to_string(),
        }
    }
}

pub(crate) fn decide_eligibility(
    fields: &ExtractedFields,
    policy: &CompliancePolicy,
) -> EligibilityRule {
    match fields.tenure {
        TenureType::FreeholdOrLongLease => EligibilityRule::Unrestricted,
        TenureType::Leasehold if fields.lease_year_known() => {
            let age = policy
                .current_year()
                .saturating_sub(fields.lease_commencement_year);
            if age >= policy.minimum_lease_age() {
                EligibilityRule::MatureLease { age }
            } else {
                EligibilityRule::NewLease { age }
            }
        }
        TenureType::Leasehold => EligibilityRule::UnknownLeaseYear,
        TenureType::Unknown => EligibilityRule::UnknownTenure,
    }
}

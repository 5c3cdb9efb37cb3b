use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Sentinel for identity fields that could not be recovered.
pub const UNKNOWN: &str = "Unknown";
/// Bedroom sentinel when no trailing bedroom token precedes the area range.
pub const UNKNOWN_BEDROOMS: &str = "?";
/// Bedroom value for listings that mark the count as "n.a.".
pub const NOT_APPLICABLE_BEDROOMS: &str = "N/A";

/// Number of hex characters exposed as the public asset id.
pub const SHORT_ID_LEN: usize = 12;

/// Legal land-ownership classification of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TenureType {
    /// Freehold or a 999-year lease; no foreign-ownership age restriction.
    FreeholdOrLongLease,
    Leasehold,
    Unknown,
}

impl TenureType {
    pub fn label(&self) -> &'static str {
        match self {
            TenureType::FreeholdOrLongLease => "Freehold/999yr",
            TenureType::Leasehold => "Leasehold",
            TenureType::Unknown => UNKNOWN,
        }
    }
}

/// Fields the extractor recovers heuristically and may fall back on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    ProjectName,
    Bedrooms,
    AreaRange,
    District,
    MrtDistance,
    CbdDistance,
    Tenure,
    LeaseCommencement,
}

impl FieldKind {
    pub fn ordered() -> [FieldKind; 8] {
        [
            FieldKind::ProjectName,
            FieldKind::Bedrooms,
            FieldKind::AreaRange,
            FieldKind::District,
            FieldKind::MrtDistance,
            FieldKind::CbdDistance,
            FieldKind::Tenure,
            FieldKind::LeaseCommencement,
        ]
    }
}

/// Whether a field value came from the listing or from a fallback sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    Extracted,
    Fallback,
}

/// SHA-256 digest of a raw listing line, used as the idempotent record key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentHash(String);

impl ContentHash {
    pub fn of(raw: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(raw.as_bytes());
        Self(hex::encode(hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn short_id(&self) -> &str {
        &self.0[..SHORT_ID_LEN.min(self.0.len())]
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Best-effort field values recovered from one listing line.
///
/// Every identity field carries either a recovered value or a documented
/// sentinel; `confidence` records which one, so consumers can decide whether
/// to trust a value instead of pattern-matching on sentinel strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedFields {
    pub project_name: String,
    pub bedrooms: String,
    pub area_range: String,
    pub district: String,
    pub yield_apy: f64,
    pub mrt_distance_m: Option<f64>,
    pub cbd_distance_km: Option<f64>,
    pub tenure: TenureType,
    /// Matched tenure text, empty when no tenure token was found.
    pub tenure_raw: String,
    /// Lease commencement year, 0 when unknown.
    pub lease_commencement_year: i32,
    pub content_hash: ContentHash,
    pub confidence: BTreeMap<FieldKind, Confidence>,
}

impl ExtractedFields {
    pub fn confidence_of(&self, field: FieldKind) -> Confidence {
        self.confidence
            .get(&field)
            .copied()
            .unwrap_or(Confidence::Fallback)
    }

    pub fn fallback_fields(&self) -> Vec<FieldKind> {
        FieldKind::ordered()
            .into_iter()
            .filter(|field| self.confidence_of(*field) == Confidence::Fallback)
            .collect()
    }

    pub fn lease_year_known(&self) -> bool {
        self.lease_commencement_year > 0
    }
}

use serde::{Deserialize, Serialize};

use super::compliance::ComplianceVerdict;
use super::domain::ExtractedFields;
use crate::config::{OracleConfig, DEFAULT_SOURCE_TAG, DEFAULT_YT_MATURITY};

/// Valuation placeholder; pricing is discovered by the AMM downstream.
pub const DYNAMIC_VALUATION: &str = "Dynamic (AMM)";
const TICKER_CODE_CHARS: usize = 3;

/// Published oracle payload for one approved listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetRecord {
    pub id: String,
    pub identity: AssetIdentity,
    pub financials: AssetFinancials,
    pub insights: AssetInsights,
    pub proof: AssetProof,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetIdentity {
    pub project: String,
    /// `"<bed>-Bed | <area> sqft"`
    #[serde(rename = "type")]
    pub unit_type: String,
    /// `"D<code>"`
    pub district: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetFinancials {
    pub yield_apy: f64,
    pub est_valuation_sgd: String,
    pub tokens: TokenTickers,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenTickers {
    pub pt_ticker: String,
    pub yt_ticker: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetInsights {
    pub connectivity_score: f64,
    pub risk_rating: String,
    pub compliance_note: String,
    pub mrt_distance: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetProof {
    pub source: String,
    pub data_hash: String,
}

/// Composes extractor, scorer and compliance output into the published record.
///
/// Nothing here re-derives a field; values are copied or formatted only.
#[derive(Debug, Clone)]
pub struct RecordAssembler {
    source_tag: String,
    yt_maturity: String,
}

impl RecordAssembler {
    pub fn new(source_tag: impl Into<String>, yt_maturity: impl Into<String>) -> Self {
        Self {
            source_tag: source_tag.into(),
            yt_maturity: yt_maturity.into(),
        }
    }

    pub fn from_config(config: &OracleConfig) -> Self {
        Self::new(config.source_tag.clone(), config.yt_maturity.clone())
    }

    /// Returns `None` unless the verdict approved the listing.
    pub fn assemble(
        &self,
        fields: &ExtractedFields,
        connectivity_score: f64,
        verdict: &ComplianceVerdict,
    ) -> Option<AssetRecord> {
        if !verdict.is_approved() {
            return None;
        }

        let code = ticker_code(&fields.project_name);

        Some(AssetRecord {
            id: fields.content_hash.short_id().to_string(),
            identity: AssetIdentity {
                project: fields.project_name.clone(),
                unit_type: format!("{}-Bed | {} sqft", fields.bedrooms, fields.area_range),
                district: format!("D{}", fields.district),
            },
            financials: AssetFinancials {
                yield_apy: fields.yield_apy,
                est_valuation_sgd: DYNAMIC_VALUATION.to_string(),
                tokens: TokenTickers {
                    pt_ticker: format!("PT-{code}"),
                    yt_ticker: format!("YT-{code}-{}", self.yt_maturity),
                },
            },
            insights: AssetInsights {
                connectivity_score,
                risk_rating: verdict.risk_tier.label().to_string(),
                compliance_note: verdict.reason.clone(),
                mrt_distance: format_mrt_distance(fields.mrt_distance_m),
            },
            proof: AssetProof {
                source: self.source_tag.clone(),
                data_hash: fields.content_hash.as_str().to_string(),
            },
        })
    }
}

impl Default for RecordAssembler {
    fn default() -> Self {
        Self::new(DEFAULT_SOURCE_TAG, DEFAULT_YT_MATURITY)
    }
}

fn ticker_code(project_name: &str) -> String {
    project_name
        .chars()
        .take(TICKER_CODE_CHARS)
        .collect::<String>()
        .to_uppercase()
}

fn format_mrt_distance(mrt_distance_m: Option<f64>) -> String {
    let metres = mrt_distance_m.map(|value| value.trunc() as i64).unwrap_or(0);
    format!("{metres}m")
}

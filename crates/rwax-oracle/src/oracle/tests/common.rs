use std::collections::BTreeMap;

use crate::config::OracleConfig;
use crate::oracle::domain::{ContentHash, ExtractedFields, TenureType};
use crate::oracle::{AssetOracle, ComplianceEngine};

pub(super) const CURRENT_YEAR: i32 = 2026;

pub(super) const FREEHOLD_LINE: &str =
    "MARINA ONE RESIDENCES 2 1000-1500 05 Jan-2024 1.97% Rented 5200 450.0 1.2 Freehold from 1998";
pub(super) const MATURE_LEASE_LINE: &str =
    "PARC ESTA 3 1000-1500 14 Feb-2024 3.45% Rented 4200 820.0 12.5 99 yrs lease commencing from 2010";
pub(super) const NEW_LEASE_LINE: &str =
    "NORTH GAIA n.a. >3000 27 Mar-2024 1.55% Rented 2100 2400.0 18.2 99 yrs lease commencing from 2019";
pub(super) const UNKNOWN_LEASE_YEAR_LINE: &str =
    "TREASURE AT TAMPINES 4 1500-2000 18 Apr-2024 2.80% Rented 3300 350.0 14.1 99 yrs";
pub(super) const UNKNOWN_TENURE_LINE: &str =
    "KOPAR AT NEWTON 2 500-1000 09 May-2024 4.10% Rented 4100 300.0 4.0";
pub(super) const UNPARSEABLE_LINE: &str = "Project Name BedRm Area District Yield Tenure";
pub(super) const NOISE_LINE: &str = "1.5% x";

pub(super) fn oracle_config() -> OracleConfig {
    OracleConfig {
        current_year: CURRENT_YEAR,
        ..OracleConfig::default()
    }
}

pub(super) fn oracle() -> AssetOracle {
    AssetOracle::new(&oracle_config())
}

pub(super) fn engine() -> ComplianceEngine {
    ComplianceEngine::from_config(&oracle_config())
}

pub(super) fn fields(tenure: TenureType, lease_commencement_year: i32, yield_apy: f64) -> ExtractedFields {
    ExtractedFields {
        project_name: "Fixture Residences".to_string(),
        bedrooms: "3".to_string(),
        area_range: "1000-1500".to_string(),
        district: "10".to_string(),
        yield_apy,
        mrt_distance_m: Some(400.0),
        cbd_distance_km: Some(5.0),
        tenure,
        tenure_raw: String::new(),
        lease_commencement_year,
        content_hash: ContentHash::of("fixture"),
        confidence: BTreeMap::new(),
    }
}

pub(super) fn sample_batch() -> Vec<&'static str> {
    vec![
        FREEHOLD_LINE,
        NOISE_LINE,
        MATURE_LEASE_LINE,
        UNPARSEABLE_LINE,
        NEW_LEASE_LINE,
        UNKNOWN_LEASE_YEAR_LINE,
        UNKNOWN_TENURE_LINE,
    ]
}

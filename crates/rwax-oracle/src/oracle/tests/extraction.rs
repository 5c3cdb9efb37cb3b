use super::common::*;
use crate::oracle::compliance::ComplianceStatus;
use crate::oracle::domain::{Confidence, ContentHash, FieldKind, TenureType};
use crate::oracle::extractor::{
    Anchor, AnchorSelection, AnchorStrategy, FieldExtractor, YieldPercentAnchor,
};

#[test]
fn freehold_listing_flows_through_to_a_published_record() {
    let oracle = oracle();
    let assessment = oracle.assess(FREEHOLD_LINE).expect("freehold line parses");
    let fields = &assessment.fields;

    assert_eq!(fields.project_name, "MARINA ONE RESIDENCES");
    assert_eq!(fields.bedrooms, "2");
    assert_eq!(fields.area_range, "1000-1500");
    assert_eq!(fields.district, "05");
    assert_eq!(fields.yield_apy, 1.97);
    assert_eq!(fields.mrt_distance_m, Some(450.0));
    assert_eq!(fields.cbd_distance_km, Some(1.2));
    assert_eq!(fields.tenure, TenureType::FreeholdOrLongLease);
    assert_eq!(fields.lease_commencement_year, 1998);
    assert!(fields.fallback_fields().is_empty());

    assert_eq!(assessment.connectivity_score, 96.0);
    assert_eq!(assessment.verdict.status, ComplianceStatus::Approved);
    assert_eq!(assessment.verdict.risk_score, 9);

    let record = oracle.publish_line(FREEHOLD_LINE).expect("approved record");
    assert_eq!(record.id, fields.content_hash.short_id());
    assert_eq!(record.identity.project, "MARINA ONE RESIDENCES");
    assert_eq!(record.identity.unit_type, "2-Bed | 1000-1500 sqft");
    assert_eq!(record.identity.district, "D05");
    assert_eq!(record.financials.tokens.pt_ticker, "PT-MAR");
    assert_eq!(record.financials.tokens.yt_ticker, "YT-MAR-28");
    assert_eq!(record.financials.est_valuation_sgd, "Dynamic (AMM)");
    assert_eq!(record.insights.risk_rating, "A (Low Risk)");
    assert_eq!(record.insights.compliance_note, "Unrestricted (Freehold)");
    assert_eq!(record.insights.mrt_distance, "450m");
    assert_eq!(record.proof.source, "URA_API_2026");
    assert_eq!(record.proof.data_hash, ContentHash::of(FREEHOLD_LINE).as_str());
}

#[test]
fn new_lease_listing_is_assessed_but_not_published() {
    let oracle = oracle();
    let assessment = oracle.assess(NEW_LEASE_LINE).expect("new lease line parses");

    assert_eq!(assessment.fields.project_name, "NORTH GAIA");
    assert_eq!(assessment.fields.bedrooms, "N/A");
    assert_eq!(assessment.fields.area_range, ">3000");
    assert_eq!(assessment.fields.district, "27");
    assert_eq!(assessment.connectivity_score, 59.0);
    assert_eq!(assessment.verdict.status, ComplianceStatus::Rejected);
    assert_eq!(assessment.verdict.reason, "Restricted/New EC (7 yrs old)");
    assert_eq!(assessment.verdict.risk_score, 7);
    assert!(oracle.publish_line(NEW_LEASE_LINE).is_none());
}

#[test]
fn mature_lease_listing_is_published() {
    let record = oracle()
        .publish_line(MATURE_LEASE_LINE)
        .expect("mature lease approved");

    assert_eq!(record.identity.project, "PARC ESTA");
    assert_eq!(record.insights.connectivity_score, 82.6);
    assert_eq!(record.insights.compliance_note, "Safe Leasehold (16 yrs old)");
    assert_eq!(record.financials.tokens.pt_ticker, "PT-PAR");
}

#[test]
fn line_without_anchor_is_consistently_unparseable() {
    let extractor = FieldExtractor::new();

    for _ in 0..3 {
        assert!(extractor.extract(UNPARSEABLE_LINE).is_none());
    }
    assert!(oracle().assess(UNPARSEABLE_LINE).is_none());
}

#[test]
fn identical_lines_share_a_content_hash() {
    let extractor = FieldExtractor::new();
    let first = extractor.extract(MATURE_LEASE_LINE).expect("parses");
    let second = extractor.extract(MATURE_LEASE_LINE).expect("parses");
    let other = extractor.extract(NEW_LEASE_LINE).expect("parses");

    assert_eq!(first.content_hash, second.content_hash);
    assert_ne!(first.content_hash, other.content_hash);
    assert_eq!(first.content_hash.as_str().len(), 64);
}

#[test]
fn missing_area_range_falls_back_to_truncated_name() {
    let fields = FieldExtractor::new()
        .extract("SOME VERY LONG PROJECT NAME WITHOUT AREA 3.10% Rented 600.0 9.0 Freehold")
        .expect("anchor present");

    assert_eq!(fields.project_name, "SOME VERY LONG PROJE...");
    assert_eq!(fields.bedrooms, "?");
    assert_eq!(fields.area_range, "Unknown");
    assert_eq!(fields.district, "Unknown");
    assert_eq!(fields.confidence_of(FieldKind::AreaRange), Confidence::Fallback);
    assert_eq!(fields.confidence_of(FieldKind::Tenure), Confidence::Extracted);
    assert_eq!(
        fields.fallback_fields(),
        vec![
            FieldKind::ProjectName,
            FieldKind::Bedrooms,
            FieldKind::AreaRange,
            FieldKind::District,
            FieldKind::LeaseCommencement,
        ]
    );
}

#[test]
fn unknown_tenure_marks_location_fields() {
    let fields = FieldExtractor::new()
        .extract(UNKNOWN_TENURE_LINE)
        .expect("anchor present");

    assert_eq!(fields.tenure, TenureType::Unknown);
    assert!(fields.tenure_raw.is_empty());
    assert_eq!(fields.mrt_distance_m, Some(300.0));
    assert_eq!(fields.cbd_distance_km, Some(4.0));
    assert_eq!(fields.confidence_of(FieldKind::Tenure), Confidence::Fallback);
    assert_eq!(fields.confidence_of(FieldKind::MrtDistance), Confidence::Extracted);
}

#[test]
fn last_anchor_selection_ignores_promotional_percentages() {
    let line = "PROMO 5.5% OFF SKY VISTA 3 1000-1500 12 Jun-2024 3.21% Rented 500.0 6.0 Freehold";

    let first = FieldExtractor::new().extract(line).expect("parses");
    assert_eq!(first.yield_apy, 5.5);
    assert_eq!(first.area_range, "Unknown");

    let last = FieldExtractor::with_anchor(YieldPercentAnchor::new(AnchorSelection::Last))
        .extract(line)
        .expect("parses");
    assert_eq!(last.yield_apy, 3.21);
    assert_eq!(last.project_name, "PROMO 5.5% OFF SKY VISTA");
    assert_eq!(last.bedrooms, "3");
    assert_eq!(last.mrt_distance_m, Some(500.0));
    assert_eq!(last.content_hash, first.content_hash);
}

struct PipeAnchor;

impl AnchorStrategy for PipeAnchor {
    fn locate(&self, text: &str) -> Option<Anchor> {
        let start = text.find('|')?;
        let end = start + 1;
        let yield_apy = text[end..].split_whitespace().next()?.parse().ok()?;
        Some(Anchor {
            start,
            end,
            yield_apy,
        })
    }
}

#[test]
fn custom_anchor_strategy_drives_the_split() {
    let fields = FieldExtractor::with_anchor(PipeAnchor)
        .extract("ALTURA 2 500-1000 18 | 2.75 Rented 700.0 11.0 99 yrs from 2012")
        .expect("pipe anchor present");

    assert_eq!(fields.project_name, "ALTURA");
    assert_eq!(fields.district, "18");
    assert_eq!(fields.yield_apy, 2.75);
    assert_eq!(fields.tenure, TenureType::Leasehold);
    assert_eq!(fields.lease_commencement_year, 2012);
}

#[test]
fn lease_text_mentioning_999_is_published_as_unrestricted() {
    let line = "ALEXANDRA VIEW 2 1000-1500 03 Aug-2024 2.90% Rented 3600 780.0 9.8 99 yrs lease commencing from 1999";
    let oracle = oracle();
    let assessment = oracle.assess(line).expect("line parses");

    assert_eq!(assessment.fields.tenure, TenureType::FreeholdOrLongLease);
    assert_eq!(assessment.fields.lease_commencement_year, 1999);
    assert_eq!(assessment.verdict.reason, "Unrestricted (Freehold)");
    assert_eq!(assessment.verdict.risk_score, 10);

    let record = oracle.publish_line(line).expect("approved record");
    assert_eq!(record.insights.risk_rating, "A (Low Risk)");
    assert_eq!(record.insights.connectivity_score, 85.2);
}

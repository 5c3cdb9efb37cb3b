use std::collections::BTreeMap;

use super::patterns;
use crate::oracle::domain::{Confidence, FieldKind, TenureType};

#[derive(Debug, PartialEq)]
pub(super) struct LocationFields {
    pub(super) mrt_distance_m: Option<f64>,
    pub(super) cbd_distance_km: Option<f64>,
    pub(super) tenure: TenureType,
    pub(super) tenure_raw: String,
    pub(super) lease_commencement_year: i32,
}

/// Recover tenure and transit distances from the text right of the anchor.
///
/// Tenure is matched at the end of the segment; distances are the last two
/// numbers before it, MRT metres then CBD kilometres. Extra numbers between
/// the anchor and the tenure (floor counts, rents) are not disambiguated.
pub(super) fn parse_location(
    segment: &str,
    confidence: &mut BTreeMap<FieldKind, Confidence>,
) -> LocationFields {
    let tenure_match = patterns::tenure().find(segment).map(|matched| {
        let raw = matched.as_str().trim().to_string();
        let tenure = classify(&raw);
        (matched.start(), raw, tenure)
    });

    let (tenure, tenure_raw, lease_commencement_year, distance_text) = match tenure_match {
        Some((start, raw, tenure)) => {
            let year = commencement_year(&raw);
            (tenure, raw, year, &segment[..start])
        }
        None => (TenureType::Unknown, String::new(), 0, segment),
    };

    let (mrt_distance_m, cbd_distance_km) = trailing_distances(distance_text);

    insert(confidence, FieldKind::Tenure, tenure != TenureType::Unknown);
    insert(
        confidence,
        FieldKind::LeaseCommencement,
        lease_commencement_year > 0,
    );
    insert(confidence, FieldKind::MrtDistance, mrt_distance_m.is_some());
    insert(confidence, FieldKind::CbdDistance, cbd_distance_km.is_some());

    LocationFields {
        mrt_distance_m,
        cbd_distance_km,
        tenure,
        tenure_raw,
        lease_commencement_year,
    }
}

/// Any mention of `Freehold` or `999` in the matched text makes it a long lease,
/// including a `99 yrs` lease commencing in a year such as 1999.
fn classify(tenure_raw: &str) -> TenureType {
    if tenure_raw.contains("Freehold") || tenure_raw.contains("999") {
        TenureType::FreeholdOrLongLease
    } else {
        TenureType::Leasehold
    }
}

fn commencement_year(tenure_raw: &str) -> i32 {
    patterns::commencement()
        .captures(tenure_raw)
        .and_then(|captures| captures.get(1))
        .and_then(|year| year.as_str().parse::<i32>().ok())
        .unwrap_or(0)
}

fn trailing_distances(text: &str) -> (Option<f64>, Option<f64>) {
    let numbers: Vec<&str> = patterns::number()
        .find_iter(text)
        .map(|token| token.as_str())
        .collect();

    let [.., mrt, cbd] = numbers.as_slice() else {
        return (None, None);
    };

    match (parse_decimal(mrt), parse_decimal(cbd)) {
        (Some(mrt), Some(cbd)) => (Some(mrt), Some(cbd)),
        _ => (None, None),
    }
}

fn parse_decimal(token: &str) -> Option<f64> {
    token
        .trim_end_matches('.')
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

fn insert(confidence: &mut BTreeMap<FieldKind, Confidence>, field: FieldKind, extracted: bool) {
    confidence.insert(
        field,
        if extracted {
            Confidence::Extracted
        } else {
            Confidence::Fallback
        },
    );
}

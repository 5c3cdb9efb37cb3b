use std::collections::BTreeMap;

use super::patterns;
use crate::oracle::domain::{
    Confidence, FieldKind, NOT_APPLICABLE_BEDROOMS, UNKNOWN, UNKNOWN_BEDROOMS,
};

const NOT_APPLICABLE_MARKER: &str = "n.a.";
const FALLBACK_NAME_CHARS: usize = 20;
const FALLBACK_NAME_SUFFIX: &str = "...";

#[derive(Debug, PartialEq)]
pub(super) struct IdentityFields {
    pub(super) project_name: String,
    pub(super) bedrooms: String,
    pub(super) area_range: String,
    pub(super) district: String,
}

/// Recover name, bedrooms, area band and district from the text left of the anchor.
///
/// The area-range token is the separator: the name (with a trailing bedroom
/// token) precedes it and the district code follows it.
pub(super) fn parse_identity(
    segment: &str,
    confidence: &mut BTreeMap<FieldKind, Confidence>,
) -> IdentityFields {
    let Some(area) = patterns::area_range().find(segment) else {
        return fallback_identity(segment, confidence);
    };

    let (bedrooms, project_name) = split_bedrooms(&segment[..area.start()]);
    let district = patterns::district()
        .captures(&segment[area.end()..])
        .and_then(|captures| captures.get(1))
        .map(|code| code.as_str().to_string());

    mark(confidence, FieldKind::ProjectName, !project_name.is_empty());
    mark(confidence, FieldKind::Bedrooms, bedrooms.is_some());
    mark(confidence, FieldKind::AreaRange, true);
    mark(confidence, FieldKind::District, district.is_some());

    IdentityFields {
        project_name: project_name.to_string(),
        bedrooms: bedrooms.unwrap_or_else(|| UNKNOWN_BEDROOMS.to_string()),
        area_range: area.as_str().to_string(),
        district: district.unwrap_or_else(|| UNKNOWN.to_string()),
    }
}

fn split_bedrooms(name_part: &str) -> (Option<String>, &str) {
    let name_part = name_part.trim_end();

    if let Some(name) = name_part.strip_suffix(NOT_APPLICABLE_MARKER) {
        return (Some(NOT_APPLICABLE_BEDROOMS.to_string()), name.trim());
    }

    match name_part.chars().last() {
        Some(digit) if digit.is_ascii_digit() => {
            let name = &name_part[..name_part.len() - digit.len_utf8()];
            (Some(digit.to_string()), name.trim())
        }
        _ => (None, name_part.trim()),
    }
}

fn fallback_identity(
    segment: &str,
    confidence: &mut BTreeMap<FieldKind, Confidence>,
) -> IdentityFields {
    for field in [
        FieldKind::ProjectName,
        FieldKind::Bedrooms,
        FieldKind::AreaRange,
        FieldKind::District,
    ] {
        mark(confidence, field, false);
    }

    let mut project_name: String = segment.chars().take(FALLBACK_NAME_CHARS).collect();
    project_name.push_str(FALLBACK_NAME_SUFFIX);

    IdentityFields {
        project_name,
        bedrooms: UNKNOWN_BEDROOMS.to_string(),
        area_range: UNKNOWN.to_string(),
        district: UNKNOWN.to_string(),
    }
}

fn mark(confidence: &mut BTreeMap<FieldKind, Confidence>, field: FieldKind, extracted: bool) {
    let level = if extracted {
        Confidence::Extracted
    } else {
        Confidence::Fallback
    };
    confidence.insert(field, level);
}

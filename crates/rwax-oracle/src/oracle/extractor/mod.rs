mod anchor;
mod identity;
mod location;
mod patterns;

pub use anchor::{Anchor, AnchorSelection, AnchorStrategy, YieldPercentAnchor};

use super::domain::{ContentHash, ExtractedFields};
use std::collections::BTreeMap;
use std::fmt;

/// Recovers structured listing fields from one raw, delimiter-less line.
///
/// The anchor splits the trimmed line into an identity segment (left) and a
/// location segment (right). Only a missing anchor makes a line unparseable;
/// every other irregularity degrades to a fallback value.
pub struct FieldExtractor {
    anchor: Box<dyn AnchorStrategy>,
}

impl FieldExtractor {
    pub fn new() -> Self {
        Self::with_anchor(YieldPercentAnchor::default())
    }

    pub fn with_anchor<A: AnchorStrategy + 'static>(anchor: A) -> Self {
        Self {
            anchor: Box::new(anchor),
        }
    }

    pub fn extract(&self, raw: &str) -> Option<ExtractedFields> {
        let text = raw.trim();
        let anchor = self.anchor.locate(text)?;
        let identity_segment = text.get(..anchor.start)?;
        let location_segment = text.get(anchor.end..)?;

        let mut confidence = BTreeMap::new();
        let identity = identity::parse_identity(identity_segment, &mut confidence);
        let location = location::parse_location(location_segment, &mut confidence);

        Some(ExtractedFields {
            project_name: identity.project_name,
            bedrooms: identity.bedrooms,
            area_range: identity.area_range,
            district: identity.district,
            yield_apy: anchor.yield_apy,
            mrt_distance_m: location.mrt_distance_m,
            cbd_distance_km: location.cbd_distance_km,
            tenure: location.tenure,
            tenure_raw: location.tenure_raw,
            lease_commencement_year: location.lease_commencement_year,
            content_hash: ContentHash::of(raw),
            confidence,
        })
    }
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FieldExtractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldExtractor").finish_non_exhaustive()
    }
}

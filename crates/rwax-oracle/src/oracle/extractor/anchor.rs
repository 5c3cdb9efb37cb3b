use super::patterns;

/// Location of the splitting landmark inside a trimmed listing line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    /// Byte offset where the anchor token starts.
    pub start: usize,
    /// Byte offset one past the anchor token.
    pub end: usize,
    pub yield_apy: f64,
}

/// Selects the landmark token that splits a line into identity and location segments.
///
/// Implementations must return byte offsets on `char` boundaries of `text`;
/// the extractor treats anything else as an unparseable line.
pub trait AnchorStrategy: Send + Sync {
    fn locate(&self, text: &str) -> Option<Anchor>;
}

/// Which yield-percentage match wins when a line carries more than one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnchorSelection {
    #[default]
    First,
    Last,
}

/// Default anchor: a yield percentage such as `1.97%`.
#[derive(Debug, Clone, Copy, Default)]
pub struct YieldPercentAnchor {
    selection: AnchorSelection,
}

impl YieldPercentAnchor {
    pub fn new(selection: AnchorSelection) -> Self {
        Self { selection }
    }

    pub fn selection(&self) -> AnchorSelection {
        self.selection
    }
}

impl AnchorStrategy for YieldPercentAnchor {
    fn locate(&self, text: &str) -> Option<Anchor> {
        let mut matches = patterns::yield_anchor().captures_iter(text);
        let captures = match self.selection {
            AnchorSelection::First => matches.next(),
            AnchorSelection::Last => matches.last(),
        }?;

        let token = captures.get(0)?;
        let yield_apy = captures.get(1)?.as_str().parse::<f64>().ok()?;

        Some(Anchor {
            start: token.start(),
            end: token.end(),
            yield_apy,
        })
    }
}

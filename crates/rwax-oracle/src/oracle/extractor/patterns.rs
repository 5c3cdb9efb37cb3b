use regex::Regex;
use std::sync::OnceLock;

static YIELD_ANCHOR: OnceLock<Regex> = OnceLock::new();
static AREA_RANGE: OnceLock<Regex> = OnceLock::new();
static DISTRICT: OnceLock<Regex> = OnceLock::new();
static TENURE: OnceLock<Regex> = OnceLock::new();
static COMMENCEMENT: OnceLock<Regex> = OnceLock::new();
static NUMBER: OnceLock<Regex> = OnceLock::new();

fn compiled(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("static listing pattern compiles"))
}

/// `1.97%`: 1-2 integer digits, 1-2 fractional digits, percent sign.
pub(super) fn yield_anchor() -> &'static Regex {
    compiled(&YIELD_ANCHOR, r"(\d{1,2}\.\d{1,2})%")
}

pub(super) fn area_range() -> &'static Regex {
    compiled(&AREA_RANGE, r"\d{3,5}-\d{3,5}|>3000|<1000")
}

pub(super) fn district() -> &'static Regex {
    compiled(&DISTRICT, r"^\s*(\d{1,2})")
}

/// Tenure keyword, lazy qualifier, optional trailing year; anchored to the end.
pub(super) fn tenure() -> &'static Regex {
    compiled(
        &TENURE,
        r"(?i)(?P<kind>freehold|999 yrs|99 yrs).*?(?:\d{4})?$",
    )
}

pub(super) fn commencement() -> &'static Regex {
    compiled(&COMMENCEMENT, r"from (\d{4})")
}

pub(super) fn number() -> &'static Regex {
    compiled(&NUMBER, r"\d+\.?\d*")
}

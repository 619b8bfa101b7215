//! Round-trip duration parsing.
//!
//! Every consumer of a travel time (sort key, scale denominator, bar width and
//! colour) goes through [`parse_duration`] so they can never disagree about the
//! same string.

use crate::domain::model::RoundTrip;
use regex::Regex;
use std::sync::LazyLock;

const UNAVAILABLE: &str = "N/A";

// Hour form first; leftmost match wins across the alternation.
static DURATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([0-9]+)\s*hours?\s*([0-9]+)?\s*mins?|([0-9]+)\s*mins?")
        .expect("valid duration regex")
});

/// Parses text such as `"12 min"` or `"1 hour 5 mins"` into whole minutes.
///
/// Absent, blank and `"N/A"` input, text with no recognised phrase, and
/// values that overflow are all `Unknown`.
pub fn parse_duration(raw: Option<&str>) -> RoundTrip {
    let Some(text) = raw.map(str::trim).filter(|t| !t.is_empty()) else {
        return RoundTrip::Unknown;
    };
    if text.eq_ignore_ascii_case(UNAVAILABLE) {
        return RoundTrip::Unknown;
    }

    let Some(caps) = DURATION_RE.captures(text) else {
        tracing::debug!("Unrecognised round trip text: {:?}", text);
        return RoundTrip::Unknown;
    };

    let minutes = if let Some(hours) = caps.get(1) {
        let hours: u32 = match hours.as_str().parse() {
            Ok(h) => h,
            Err(_) => return RoundTrip::Unknown,
        };
        let extra: u32 = match caps.get(2).map(|m| m.as_str().parse()) {
            Some(Ok(m)) => m,
            Some(Err(_)) => return RoundTrip::Unknown,
            None => 0,
        };
        hours.checked_mul(60).and_then(|h| h.checked_add(extra))
    } else {
        caps.get(3).and_then(|m| m.as_str().parse().ok())
    };

    minutes.map_or(RoundTrip::Unknown, RoundTrip::Known)
}

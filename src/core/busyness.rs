//! Conversion of raw backend busyness into [`Busyness`].
//!
//! This is the only place that branches on the shape of the raw field.

use crate::domain::model::{Busyness, RawBusyness};

const UNAVAILABLE: &str = "N/A";

/// Normalizes a raw busyness value. Never fails: unrecognised input is `Unknown`.
///
/// Numeric strings are read leniently, the way the backend formats them:
/// `"42%"` is 42. Values are not clamped to `0..=100`.
pub fn normalize_busyness(raw: Option<&RawBusyness>) -> Busyness {
    match raw {
        None => Busyness::Unknown,
        Some(RawBusyness::Number(number)) => from_number(number),
        Some(RawBusyness::Text(text)) => from_text(text),
        Some(RawBusyness::Other(value)) => {
            tracing::debug!("Ignoring busyness of unexpected shape: {}", value);
            Busyness::Unknown
        }
    }
}

fn from_number(number: &serde_json::Number) -> Busyness {
    if let Some(value) = number.as_i64() {
        return Busyness::Known(value);
    }
    match number.as_f64() {
        // `as` saturates on out-of-range floats.
        Some(value) if value.is_finite() => Busyness::Known(value.trunc() as i64),
        _ => Busyness::Unknown,
    }
}

fn from_text(text: &str) -> Busyness {
    let trimmed = text.trim();
    if trimmed.eq_ignore_ascii_case(UNAVAILABLE) {
        return Busyness::Unknown;
    }
    leading_integer(trimmed).map_or(Busyness::Unknown, Busyness::Known)
}

/// Reads an optionally signed run of ASCII digits from the start of `text`,
/// ignoring whatever follows it.
fn leading_integer(text: &str) -> Option<i64> {
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    let magnitude: i64 = rest[..digits_len].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

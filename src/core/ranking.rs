//! Ordering and scaling of a search result set.
//!
//! Places with a known busyness always come first, least busy first. Places
//! without one follow, nearest round trip first, with unparseable travel
//! times last. Both sorts are stable so equal keys keep their input order.

use crate::core::busyness::normalize_busyness;
use crate::core::duration::parse_duration;
use crate::domain::model::{NormalizedPlace, PlaceRecord, RankedResultSet};

/// Derives the normalized fields for one record without touching the input.
pub fn normalize_place(record: &PlaceRecord) -> NormalizedPlace {
    NormalizedPlace {
        id: record.id.clone(),
        name: record.name.clone(),
        address: record.address.clone(),
        rating: record.rating,
        peak_hours: record.peak_hours.clone(),
        trend: record.trend,
        round_trip_text: record.round_trip_raw.clone(),
        coordinates: record.coordinates,
        distance_km: record.distance_km,
        busyness: normalize_busyness(record.busyness_raw.as_ref()),
        round_trip: parse_duration(record.round_trip_raw.as_deref()),
    }
}

pub fn rank_and_scale(places: &[PlaceRecord]) -> RankedResultSet {
    let normalized: Vec<NormalizedPlace> = places.iter().map(normalize_place).collect();

    // Taken over the whole list, not just the unknown-busyness group.
    let max_round_trip_minutes = normalized
        .iter()
        .filter_map(|place| place.round_trip.minutes())
        .max()
        .unwrap_or(0);

    let (mut known, mut unknown): (Vec<_>, Vec<_>) = normalized
        .into_iter()
        .partition(|place| place.busyness.is_known());

    known.sort_by_key(|place| place.busyness);
    unknown.sort_by_key(|place| place.round_trip);

    tracing::debug!(
        "Ranked {} places ({} with busyness, {} without), max round trip {} min",
        known.len() + unknown.len(),
        known.len(),
        unknown.len(),
        max_round_trip_minutes
    );

    known.extend(unknown);
    RankedResultSet {
        ordered_places: known,
        max_round_trip_minutes,
    }
}

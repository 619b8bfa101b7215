//! Presentation policy for ranked places.
//!
//! Band thresholds are inclusive on their lower bound.

use crate::domain::model::{Busyness, NormalizedPlace, RankedResultSet, RoundTrip, Trend};
use serde::Serialize;

const MIN_VISIBLE_FILL: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BusynessBand {
    NotBusy,
    ModeratelyBusy,
    VeryBusy,
}

impl BusynessBand {
    pub fn from_percent(percent: i64) -> Self {
        if percent < 30 {
            BusynessBand::NotBusy
        } else if percent < 70 {
            BusynessBand::ModeratelyBusy
        } else {
            BusynessBand::VeryBusy
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BusynessBand::NotBusy => "Not busy",
            BusynessBand::ModeratelyBusy => "Moderately busy",
            BusynessBand::VeryBusy => "Very busy",
        }
    }
}

/// Colour of the travel-time bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Neutral,
    Low,
    Medium,
    High,
}

fn share_percent(minutes: u32, max_round_trip_minutes: u32) -> f64 {
    f64::from(minutes) * 100.0 / f64::from(max_round_trip_minutes)
}

/// Width of the travel-time bar as a percentage, or `None` for an empty,
/// neutral bar.
pub fn round_trip_fill(round_trip: RoundTrip, max_round_trip_minutes: u32) -> Option<u32> {
    let minutes = round_trip.minutes()?;
    if max_round_trip_minutes == 0 {
        return None;
    }
    if minutes == max_round_trip_minutes {
        return Some(100);
    }
    let percent = share_percent(minutes, max_round_trip_minutes).round() as u32;
    Some(percent.max(MIN_VISIBLE_FILL))
}

pub fn round_trip_severity(round_trip: RoundTrip, max_round_trip_minutes: u32) -> Severity {
    let Some(minutes) = round_trip.minutes() else {
        return Severity::Neutral;
    };
    if max_round_trip_minutes == 0 {
        return Severity::Neutral;
    }
    let percent = share_percent(minutes, max_round_trip_minutes);
    if percent < 33.0 {
        Severity::Low
    } else if percent < 67.0 {
        Severity::Medium
    } else {
        Severity::High
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum BusynessView {
    Unavailable,
    Known {
        percent: i64,
        band: BusynessBand,
        label: &'static str,
        /// Bar width, clamped so anomalous values still draw.
        bar_width: u32,
    },
}

impl From<Busyness> for BusynessView {
    fn from(busyness: Busyness) -> Self {
        match busyness {
            Busyness::Unknown => BusynessView::Unavailable,
            Busyness::Known(percent) => {
                let band = BusynessBand::from_percent(percent);
                BusynessView::Known {
                    percent,
                    band,
                    label: band.label(),
                    bar_width: percent.clamp(0, 100) as u32,
                }
            }
        }
    }
}

/// Everything a renderer needs for one result, already formatted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceCard {
    pub id: String,
    pub name: String,
    pub address: String,
    pub rating_label: String,
    pub distance_label: Option<String>,
    pub busyness: BusynessView,
    pub trend: Option<Trend>,
    pub peak_hours: Option<String>,
    pub round_trip_label: String,
    pub round_trip_minutes: Option<u32>,
    pub round_trip_fill: Option<u32>,
    pub round_trip_severity: Severity,
}

impl PlaceCard {
    pub fn new(place: &NormalizedPlace, max_round_trip_minutes: u32) -> Self {
        let round_trip_label = match place.round_trip_text.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() && !text.eq_ignore_ascii_case("N/A") => {
                text.to_string()
            }
            _ => "N/A".to_string(),
        };

        Self {
            id: place.id.clone(),
            name: place.name.clone(),
            address: place.address.clone(),
            rating_label: place
                .rating
                .map_or_else(|| "No rating".to_string(), |r| format!("{:.1}", r)),
            distance_label: place.distance_km.map(|d| format!("{} km away", d)),
            busyness: place.busyness.into(),
            trend: place.trend,
            peak_hours: (!place.peak_hours.is_empty()).then(|| place.peak_hours.join(", ")),
            round_trip_label,
            round_trip_minutes: place.round_trip.minutes(),
            round_trip_fill: round_trip_fill(place.round_trip, max_round_trip_minutes),
            round_trip_severity: round_trip_severity(place.round_trip, max_round_trip_minutes),
        }
    }
}

pub fn build_cards(ranked: &RankedResultSet) -> Vec<PlaceCard> {
    ranked
        .ordered_places
        .iter()
        .map(|place| PlaceCard::new(place, ranked.max_round_trip_minutes))
        .collect()
}

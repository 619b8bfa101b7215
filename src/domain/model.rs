use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchParams {
    pub query: String,
    pub location: Coordinates,
}

/// Busyness exactly as the backend sent it.
///
/// The backend is inconsistent about this field: it has been observed as a
/// number, as `"42%"`, and as the sentinel `"N/A"`. Anything else JSON can
/// express lands in `Other`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawBusyness {
    Number(serde_json::Number),
    Text(String),
    Other(serde_json::Value),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Increasing,
    Decreasing,
}

/// One place as produced by the search collaborator.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlaceRecord {
    pub id: String,
    pub name: String,
    pub address: String,
    pub rating: Option<f64>,
    pub busyness_raw: Option<RawBusyness>,
    pub peak_hours: Vec<String>,
    pub trend: Option<Trend>,
    pub round_trip_raw: Option<String>,
    pub coordinates: Option<Coordinates>,
    pub distance_km: Option<f64>,
}

/// Current crowdedness as a percentage.
///
/// `Known` sorts before `Unknown`; known values compare by percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(tag = "state", content = "percent", rename_all = "lowercase")]
pub enum Busyness {
    Known(i64),
    Unknown,
}

impl Busyness {
    pub fn is_known(&self) -> bool {
        matches!(self, Busyness::Known(_))
    }

    pub fn percent(&self) -> Option<i64> {
        match self {
            Busyness::Known(percent) => Some(*percent),
            Busyness::Unknown => None,
        }
    }
}

/// Round-trip travel time in whole minutes.
///
/// Variant order is load-bearing: the derived `Ord` places every `Known`
/// duration before `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(tag = "state", content = "minutes", rename_all = "lowercase")]
pub enum RoundTrip {
    Known(u32),
    Unknown,
}

impl RoundTrip {
    pub fn minutes(&self) -> Option<u32> {
        match self {
            RoundTrip::Known(minutes) => Some(*minutes),
            RoundTrip::Unknown => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedPlace {
    pub id: String,
    pub name: String,
    pub address: String,
    pub rating: Option<f64>,
    pub peak_hours: Vec<String>,
    pub trend: Option<Trend>,
    pub round_trip_text: Option<String>,
    pub coordinates: Option<Coordinates>,
    pub distance_km: Option<f64>,
    pub busyness: Busyness,
    pub round_trip: RoundTrip,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RankedResultSet {
    pub ordered_places: Vec<NormalizedPlace>,
    pub max_round_trip_minutes: u32,
}

impl RankedResultSet {
    pub fn len(&self) -> usize {
        self.ordered_places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered_places.is_empty()
    }
}

use crate::domain::model::{Coordinates, PlaceRecord, RawBusyness, SearchParams, Trend};
use crate::domain::ports::{ConfigProvider, PlaceSearch};
use crate::utils::error::{Result, VibeError};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use std::time::Duration;

/// One shop as the backend serves it.
///
/// Every field is optional and read leniently so that a single odd field
/// never costs the whole record.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendShop {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub address: String,
    #[serde(default)]
    pub busyness: Option<WireBusyness>,
    #[serde(default, deserialize_with = "lenient")]
    pub round_trip: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub rating: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub peak_hours: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub trend: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub coordinates: Option<Coordinates>,
    #[serde(default, deserialize_with = "lenient")]
    pub distance: Option<f64>,
}

/// Busyness is either a bare value or the richer `{current, peak_hours, trend}`
/// object.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WireBusyness {
    Detailed(DetailedBusyness),
    Scalar(RawBusyness),
}

#[derive(Debug, Clone, Deserialize)]
pub struct DetailedBusyness {
    pub current: Option<RawBusyness>,
    #[serde(default)]
    pub peak_hours: Vec<String>,
    pub trend: Option<String>,
}

/// Reads a field as `T`, or `None` when it has any other shape.
fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

fn parse_trend(raw: Option<&str>) -> Option<Trend> {
    match raw?.trim().to_ascii_lowercase().as_str() {
        "increasing" => Some(Trend::Increasing),
        "decreasing" => Some(Trend::Decreasing),
        _ => None,
    }
}

impl From<BackendShop> for PlaceRecord {
    fn from(shop: BackendShop) -> Self {
        let (busyness_raw, nested_peaks, nested_trend) = match shop.busyness {
            Some(WireBusyness::Detailed(detail)) => {
                (detail.current, detail.peak_hours, detail.trend)
            }
            Some(WireBusyness::Scalar(raw)) => (Some(raw), Vec::new(), None),
            None => (None, Vec::new(), None),
        };

        let peak_hours = shop.peak_hours.unwrap_or(nested_peaks);
        let trend = parse_trend(shop.trend.as_deref().or(nested_trend.as_deref()));

        PlaceRecord {
            id: shop.id,
            name: shop.name,
            address: shop.address,
            rating: shop.rating,
            busyness_raw,
            peak_hours,
            trend,
            round_trip_raw: shop.round_trip,
            coordinates: shop.coordinates,
            distance_km: shop.distance,
        }
    }
}

/// Maps a backend response body into place records.
///
/// The body must be an array. Entries that are not shop objects are skipped
/// with a warning; every other entry becomes a record.
pub fn places_from_json(body: serde_json::Value) -> Result<Vec<PlaceRecord>> {
    let serde_json::Value::Array(items) = body else {
        return Err(VibeError::UnexpectedPayload {
            message: format!("expected a JSON array, got {}", json_kind(&body)),
        });
    };

    let mut places = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<BackendShop>(item) {
            Ok(shop) => places.push(shop.into()),
            Err(e) => tracing::warn!("Skipping malformed shop at index {}: {}", index, e),
        }
    }
    Ok(places)
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// Searches the backend's `GET {base_url}/shops` endpoint.
pub struct HttpPlaceSearch {
    client: Client,
    base_url: String,
}

impl HttpPlaceSearch {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        Self::new(config.api_base_url(), config.request_timeout())
    }

    fn shops_url(&self) -> String {
        format!("{}/shops", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl PlaceSearch for HttpPlaceSearch {
    async fn search(&self, params: &SearchParams) -> Result<Vec<PlaceRecord>> {
        let url = self.shops_url();
        tracing::debug!("Making API request to: {}", url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("lat", params.location.lat.to_string()),
                ("lon", params.location.lng.to_string()),
                ("shop_type", params.query.clone()),
            ])
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            return Err(VibeError::SearchFailed {
                status: status.as_u16(),
                url,
            });
        }

        let body: serde_json::Value = response.json().await?;
        let places = places_from_json(body)?;
        tracing::debug!("Backend returned {} shops", places.len());
        Ok(places)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn params() -> SearchParams {
        SearchParams {
            query: "coffee shops".to_string(),
            location: Coordinates {
                lat: 37.5,
                lng: -122.25,
            },
        }
    }

    #[test]
    fn test_backend_shape_maps_to_place_records() {
        let body = json!([
            {"id": "place_0", "name": "Brew Point", "address": "123 Bean St",
             "busyness": "10%", "round_trip": "15 mins", "can_order": true},
            {"id": "place_1", "name": "Café Nova", "address": "456 Roast Rd",
             "busyness": "N/A", "round_trip": "N/A", "can_order": false},
            {"id": 7, "name": "Bean Scene", "busyness": 3, "round_trip": null}
        ]);

        let places = places_from_json(body).unwrap();

        assert_eq!(places.len(), 3);
        assert_eq!(places[0].id, "place_0");
        assert_eq!(
            places[0].busyness_raw,
            Some(RawBusyness::Text("10%".to_string()))
        );
        assert_eq!(places[0].round_trip_raw.as_deref(), Some("15 mins"));
        assert_eq!(places[2].id, "7");
        assert_eq!(places[2].address, "");
        assert!(matches!(places[2].busyness_raw, Some(RawBusyness::Number(_))));
        assert_eq!(places[2].round_trip_raw, None);
    }

    #[test]
    fn test_detailed_busyness_object_is_unpacked() {
        let body = json!([
            {"id": "a", "name": "A", "address": "x",
             "busyness": {"current": 55, "peak_hours": ["7-9 AM"], "trend": "increasing"}},
            {"id": "b", "name": "B", "address": "y",
             "busyness": {"current": "N/A", "peak_hours": []}}
        ]);

        let places = places_from_json(body).unwrap();

        assert!(matches!(places[0].busyness_raw, Some(RawBusyness::Number(_))));
        assert_eq!(places[0].peak_hours, vec!["7-9 AM".to_string()]);
        assert_eq!(places[0].trend, Some(Trend::Increasing));
        assert_eq!(
            places[1].busyness_raw,
            Some(RawBusyness::Text("N/A".to_string()))
        );
        assert_eq!(places[1].trend, None);
    }

    #[test]
    fn test_odd_fields_degrade_without_dropping_the_record() {
        let body = json!([{"id": "a", "name": null, "round_trip": 12,
                           "rating": "great", "trend": "sideways"}]);

        let places = places_from_json(body).unwrap();

        assert_eq!(places[0].name, "");
        assert_eq!(places[0].round_trip_raw, None);
        assert_eq!(places[0].rating, None);
        assert_eq!(places[0].trend, None);
    }

    #[test]
    fn test_non_array_body_is_rejected() {
        let result = places_from_json(json!({"detail": "Not Found"}));
        assert!(matches!(result, Err(VibeError::UnexpectedPayload { .. })));
    }

    #[test]
    fn test_non_object_entries_are_skipped() {
        let places = places_from_json(json!([42, {"id": "ok"}, "junk"])).unwrap();
        assert_eq!(places.len(), 1);
        assert_eq!(places[0].id, "ok");
    }

    #[tokio::test]
    async fn test_search_sends_location_and_query() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/shops")
                .query_param("lat", "37.5")
                .query_param("lon", "-122.25")
                .query_param("shop_type", "coffee shops");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!([
                    {"id": "shop1", "name": "Brew Point", "address": "123 Bean St",
                     "busyness": "10%", "round_trip": "15 mins"}
                ]));
        });

        let search = HttpPlaceSearch::new(server.url("/api/"), Duration::from_secs(5)).unwrap();
        let places = search.search(&params()).await.unwrap();

        api_mock.assert();
        assert_eq!(places.len(), 1);
        assert_eq!(places[0].name, "Brew Point");
    }

    #[tokio::test]
    async fn test_search_reports_http_failure() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/api/shops");
            then.status(500);
        });

        let search = HttpPlaceSearch::new(server.url("/api"), Duration::from_secs(5)).unwrap();
        let result = search.search(&params()).await;

        api_mock.assert();
        match result {
            Err(VibeError::SearchFailed { status, url }) => {
                assert_eq!(status, 500);
                assert!(url.ends_with("/api/shops"));
            }
            other => panic!("expected SearchFailed, got {:?}", other),
        }
    }
}

use crate::domain::model::{Coordinates, PlaceRecord, SearchParams};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// The places-search backend. One call per search, no retries.
#[async_trait]
pub trait PlaceSearch: Send + Sync {
    async fn search(&self, params: &SearchParams) -> Result<Vec<PlaceRecord>>;
}

/// A position reported by a location capability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationFix {
    pub coordinates: Coordinates,
    pub captured_at: DateTime<Utc>,
}

/// The device-location capability. Answers at most once per call.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn current_position(&self) -> Result<LocationFix>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocationOptions {
    pub timeout: Duration,
    pub maximum_age: Duration,
}

impl Default for LocationOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            maximum_age: Duration::from_secs(5 * 60),
        }
    }
}

pub trait ConfigProvider: Send + Sync {
    fn api_base_url(&self) -> &str;
    fn request_timeout(&self) -> Duration;
    fn location_options(&self) -> LocationOptions;
    fn coordinates(&self) -> Option<Coordinates>;
}

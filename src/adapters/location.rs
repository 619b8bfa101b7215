use crate::domain::model::Coordinates;
use crate::domain::ports::{ConfigProvider, LocationFix, LocationProvider};
use crate::utils::error::{Result, VibeError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Location capability backed by coordinates from configuration.
#[derive(Debug, Clone)]
pub struct StaticLocation {
    coordinates: Option<Coordinates>,
    captured_at: DateTime<Utc>,
}

impl StaticLocation {
    pub fn new(coordinates: Option<Coordinates>) -> Self {
        Self {
            coordinates,
            captured_at: Utc::now(),
        }
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        Self::new(config.coordinates())
    }

    /// A fix captured earlier, subject to the caller's maximum-age policy.
    pub fn cached(coordinates: Coordinates, captured_at: DateTime<Utc>) -> Self {
        Self {
            coordinates: Some(coordinates),
            captured_at,
        }
    }
}

#[async_trait]
impl LocationProvider for StaticLocation {
    async fn current_position(&self) -> Result<LocationFix> {
        let coordinates = self
            .coordinates
            .ok_or_else(|| VibeError::LocationUnavailable {
                message: "no coordinates configured".to_string(),
            })?;
        Ok(LocationFix {
            coordinates,
            captured_at: self.captured_at,
        })
    }
}

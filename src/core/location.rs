//! Single-shot resolution of the user's position.

use crate::domain::model::Coordinates;
use crate::domain::ports::{LocationFix, LocationOptions, LocationProvider};
use crate::utils::error::{Result, VibeError};
use chrono::Utc;

#[derive(Debug, Clone, PartialEq)]
pub enum LocationState {
    Loading,
    Located(Coordinates),
    Failed(String),
}

impl LocationState {
    pub fn coordinates(&self) -> Option<Coordinates> {
        match self {
            LocationState::Located(coordinates) => Some(*coordinates),
            _ => None,
        }
    }

    pub fn status_label(&self) -> &'static str {
        match self {
            LocationState::Loading => "Getting your location...",
            LocationState::Located(_) => "Location found",
            LocationState::Failed(_) => "Location access needed",
        }
    }
}

/// Asks the provider once, bounded by `options.timeout`, and rejects fixes
/// older than `options.maximum_age`.
pub async fn locate<P>(provider: &P, options: LocationOptions) -> Result<Coordinates>
where
    P: LocationProvider + ?Sized,
{
    let fix = tokio::time::timeout(options.timeout, provider.current_position())
        .await
        .map_err(|_| VibeError::LocationTimeout {
            seconds: options.timeout.as_secs(),
        })??;

    check_freshness(&fix, options)?;
    Ok(fix.coordinates)
}

fn check_freshness(fix: &LocationFix, options: LocationOptions) -> Result<()> {
    let age = Utc::now().signed_duration_since(fix.captured_at);
    // A timestamp from the future has a negative age and counts as fresh.
    if let Ok(age_std) = age.to_std() {
        if age_std > options.maximum_age {
            return Err(VibeError::StaleLocation {
                age_seconds: age.num_seconds(),
                max_age_seconds: options.maximum_age.as_secs(),
            });
        }
    }
    Ok(())
}

/// A pending location lookup. Starts out `Loading` and is consumed by
/// [`LocationRequest::resolve`], so it yields exactly one outcome.
pub struct LocationRequest<'a, P: LocationProvider + ?Sized> {
    provider: &'a P,
    options: LocationOptions,
}

impl<'a, P: LocationProvider + ?Sized> LocationRequest<'a, P> {
    pub fn new(provider: &'a P, options: LocationOptions) -> Self {
        Self { provider, options }
    }

    pub fn state(&self) -> LocationState {
        LocationState::Loading
    }

    pub async fn resolve(self) -> LocationState {
        match locate(self.provider, self.options).await {
            Ok(coordinates) => {
                tracing::debug!(
                    "Location found at {:.4}, {:.4}",
                    coordinates.lat,
                    coordinates.lng
                );
                LocationState::Located(coordinates)
            }
            Err(e) => {
                tracing::warn!("Location unavailable: {}", e);
                LocationState::Failed(e.to_string())
            }
        }
    }
}

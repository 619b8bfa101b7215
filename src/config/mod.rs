#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

use crate::adapters::output::OutputFormat;
use crate::domain::model::Coordinates;
use crate::domain::ports::{ConfigProvider, LocationOptions};
use crate::utils::error::{Result, VibeError};
use crate::utils::validation::{
    validate_coordinates, validate_positive_number, validate_url, Validate,
};
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Values given on the command line. They win over the settings file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub api_base_url: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub format: Option<OutputFormat>,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_base_url: String,
    pub request_timeout: Duration,
    pub location: LocationOptions,
    pub coordinates: Option<Coordinates>,
    pub format: OutputFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            location: LocationOptions::default(),
            coordinates: None,
            format: OutputFormat::default(),
        }
    }
}

fn pair(lat: Option<f64>, lng: Option<f64>, what: &str) -> Result<Option<Coordinates>> {
    match (lat, lng) {
        (Some(lat), Some(lng)) => Ok(Some(Coordinates { lat, lng })),
        (None, None) => Ok(None),
        _ => Err(VibeError::ConfigError {
            message: format!("{} latitude and longitude must be given together", what),
        }),
    }
}

impl Settings {
    pub fn resolve(file: Option<&TomlConfig>, overrides: &Overrides) -> Result<Self> {
        let defaults = Settings::default();
        let file = file.cloned().unwrap_or_default();

        let from_flags = pair(overrides.lat, overrides.lng, "Command line")?;
        let from_file = pair(file.location.lat, file.location.lng, "Configured")?;

        let location = LocationOptions {
            timeout: file
                .location
                .timeout_seconds
                .map_or(defaults.location.timeout, Duration::from_secs),
            maximum_age: file
                .location
                .maximum_age_seconds
                .map_or(defaults.location.maximum_age, Duration::from_secs),
        };

        Ok(Self {
            api_base_url: overrides
                .api_base_url
                .clone()
                .or(file.backend.base_url)
                .unwrap_or(defaults.api_base_url),
            request_timeout: file
                .backend
                .timeout_seconds
                .map_or(defaults.request_timeout, Duration::from_secs),
            location,
            coordinates: from_flags.or(from_file),
            format: overrides
                .format
                .or(file.output.format)
                .unwrap_or(defaults.format),
        })
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_url("api_base_url", &self.api_base_url)?;
        validate_positive_number("request_timeout", self.request_timeout.as_secs(), 1)?;
        validate_positive_number("location.timeout_seconds", self.location.timeout.as_secs(), 1)?;
        if let Some(coordinates) = self.coordinates {
            validate_coordinates("location", coordinates.lat, coordinates.lng)?;
        }
        Ok(())
    }
}

impl ConfigProvider for Settings {
    fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    fn location_options(&self) -> LocationOptions {
        self.location
    }

    fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }
}

pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::{Settings, TomlConfig};

pub use crate::adapters::{http::HttpPlaceSearch, location::StaticLocation, output::OutputFormat};
pub use crate::core::{
    normalize_busyness, parse_duration, rank_and_scale, LocationRequest, LocationState,
    SearchEngine, SearchOutcome,
};
pub use crate::domain::model::{Busyness, PlaceRecord, RankedResultSet, RoundTrip};
pub use crate::utils::error::{Result, VibeError};

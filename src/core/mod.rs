pub mod busyness;
pub mod display;
pub mod duration;
pub mod engine;
pub mod location;
pub mod ranking;

pub use busyness::normalize_busyness;
pub use duration::parse_duration;
pub use engine::{DisabledReason, SearchEngine, SearchOutcome};
pub use location::{LocationRequest, LocationState};
pub use ranking::{normalize_place, rank_and_scale};

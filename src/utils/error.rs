use thiserror::Error;

#[derive(Error, Debug)]
pub enum VibeError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Search backend returned {status} for {url}")]
    SearchFailed { status: u16, url: String },

    #[error("Unexpected search payload: {message}")]
    UnexpectedPayload { message: String },

    #[error("CSV rendering error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Location unavailable: {message}")]
    LocationUnavailable { message: String },

    #[error("Location request timed out after {seconds}s")]
    LocationTimeout { seconds: u64 },

    #[error("Cached location is {age_seconds}s old (limit {max_age_seconds}s)")]
    StaleLocation {
        age_seconds: i64,
        max_age_seconds: u64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Location,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl VibeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            VibeError::ApiError(_) | VibeError::SearchFailed { .. } => ErrorCategory::Network,
            VibeError::ConfigError { .. }
            | VibeError::InvalidConfigValueError { .. }
            | VibeError::MissingConfigError { .. }
            | VibeError::TomlError(_) => ErrorCategory::Configuration,
            VibeError::LocationUnavailable { .. }
            | VibeError::LocationTimeout { .. }
            | VibeError::StaleLocation { .. } => ErrorCategory::Location,
            VibeError::CsvError(_)
            | VibeError::SerializationError(_)
            | VibeError::UnexpectedPayload { .. } => ErrorCategory::Data,
            VibeError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // A failed search degrades to an empty result list.
            ErrorCategory::Network => ErrorSeverity::Low,
            ErrorCategory::Location => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check that the search backend is running and reachable",
            ErrorCategory::Configuration => "Check the configuration file and command line flags",
            ErrorCategory::Location => {
                "Pass --lat/--lng or set [location] in the configuration file"
            }
            ErrorCategory::Data => "Check that the input is a JSON array of places",
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            VibeError::SearchFailed { .. } | VibeError::ApiError(_) => {
                "Failed to search places. Please try again.".to_string()
            }
            VibeError::LocationUnavailable { .. }
            | VibeError::LocationTimeout { .. }
            | VibeError::StaleLocation { .. } => "Location access needed".to_string(),
            VibeError::MissingConfigError { field } => {
                format!("Missing required setting: {}", field)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, VibeError>;

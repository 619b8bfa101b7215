use crate::adapters::output::OutputFormat;
use crate::utils::error::{Result, VibeError};
use crate::utils::validation::{
    validate_coordinates, validate_positive_number, validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env placeholder regex"));

/// Settings file. Every section and key is optional; missing values fall back
/// to command line flags or built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub location: LocationConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BackendConfig {
    pub base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocationConfig {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub timeout_seconds: Option<u64>,
    pub maximum_age_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    pub format: Option<OutputFormat>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(VibeError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);
        Ok(toml::from_str(&processed)?)
    }

    /// Replaces `${VAR}` with the variable's value. Unset variables are left
    /// as written.
    fn substitute_env_vars(content: &str) -> String {
        ENV_PLACEHOLDER_RE
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        if let Some(base_url) = &self.backend.base_url {
            validate_url("backend.base_url", base_url)?;
        }
        if let Some(timeout) = self.backend.timeout_seconds {
            validate_positive_number("backend.timeout_seconds", timeout, 1)?;
        }
        if let Some(timeout) = self.location.timeout_seconds {
            validate_positive_number("location.timeout_seconds", timeout, 1)?;
        }

        match (self.location.lat, self.location.lng) {
            (Some(lat), Some(lng)) => validate_coordinates("location", lat, lng)?,
            (None, None) => {}
            (Some(_), None) => {
                return Err(VibeError::MissingConfigError {
                    field: "location.lng".to_string(),
                })
            }
            (None, Some(_)) => {
                return Err(VibeError::MissingConfigError {
                    field: "location.lat".to_string(),
                })
            }
        }

        Ok(())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

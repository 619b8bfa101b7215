use crate::adapters::output::OutputFormat;
use crate::config::{Overrides, Settings, TomlConfig};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "vibecheck", version)]
#[command(about = "Find nearby places, least busy first")]
pub struct CliConfig {
    /// TOML settings file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Search the backend for places near you
    Search(SearchArgs),
    /// Rank a JSON file of places without calling the backend
    Rank(RankArgs),
}

#[derive(Debug, Clone, Args)]
pub struct SearchArgs {
    /// What to look for, e.g. "coffee shops"
    pub query: String,

    #[arg(long, env = "VIBECHECK_LAT", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    #[arg(long, env = "VIBECHECK_LNG", allow_negative_numbers = true)]
    pub lng: Option<f64>,

    #[arg(long, env = "VIBECHECK_API_URL")]
    pub api_base_url: Option<String>,

    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
}

#[derive(Debug, Clone, Args)]
pub struct RankArgs {
    /// JSON array of places in the backend's shape
    #[arg(long)]
    pub input: PathBuf,

    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
}

impl CliConfig {
    pub fn overrides(&self) -> Overrides {
        match &self.command {
            Command::Search(args) => Overrides {
                api_base_url: args.api_base_url.clone(),
                lat: args.lat,
                lng: args.lng,
                format: args.format,
            },
            Command::Rank(args) => Overrides {
                format: args.format,
                ..Default::default()
            },
        }
    }

    /// Loads the settings file, if any, and layers the flags on top.
    pub fn settings(&self) -> Result<Settings> {
        let file = match &self.config {
            Some(path) => {
                tracing::debug!("Loading settings from {}", path.display());
                let file = TomlConfig::from_file(path)?;
                file.validate()?;
                Some(file)
            }
            None => None,
        };
        Settings::resolve(file.as_ref(), &self.overrides())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Coordinates;
    use crate::utils::error::VibeError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_search_command() {
        let cli = CliConfig::try_parse_from([
            "vibecheck",
            "search",
            "coffee shops",
            "--lat",
            "37.39",
            "--lng",
            "-122.04",
            "--format",
            "json",
            "--verbose",
        ])
        .unwrap();

        assert!(cli.verbose);
        let Command::Search(args) = &cli.command else {
            panic!("expected search command");
        };
        assert_eq!(args.query, "coffee shops");

        let settings = cli.settings().unwrap();
        assert_eq!(
            settings.coordinates,
            Some(Coordinates {
                lat: 37.39,
                lng: -122.04
            })
        );
        assert_eq!(settings.format, OutputFormat::Json);
    }

    #[test]
    fn test_parse_rank_command() {
        let cli =
            CliConfig::try_parse_from(["vibecheck", "rank", "--input", "places.json"]).unwrap();

        let Command::Rank(args) = &cli.command else {
            panic!("expected rank command");
        };
        assert_eq!(args.input, PathBuf::from("places.json"));
        assert_eq!(cli.overrides(), Overrides::default());
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let result = CliConfig::try_parse_from([
            "vibecheck",
            "rank",
            "--input",
            "x.json",
            "--format",
            "xml",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_settings_file_is_layered_under_flags() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(
            b"[backend]\nbase_url = \"http://file.example.com/api\"\n\n[location]\nlat = 1.0\nlng = 2.0\n",
        )
        .unwrap();
        let path = file.path().to_string_lossy().to_string();

        let cli = CliConfig::try_parse_from([
            "vibecheck",
            "--config",
            path.as_str(),
            "search",
            "tea",
            "--api-base-url",
            "http://flag.example.com/api",
        ])
        .unwrap();
        let settings = cli.settings().unwrap();

        assert_eq!(settings.api_base_url, "http://flag.example.com/api");
        assert_eq!(settings.coordinates, Some(Coordinates { lat: 1.0, lng: 2.0 }));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_invalid_settings_file_is_rejected_even_when_flags_override_it() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[location]\nlat = 95.0\nlng = 0.0\n").unwrap();
        let path = file.path().to_string_lossy().to_string();

        let cli = CliConfig::try_parse_from([
            "vibecheck",
            "--config",
            path.as_str(),
            "search",
            "tea",
            "--lat",
            "1.0",
            "--lng",
            "2.0",
        ])
        .unwrap();

        assert!(matches!(
            cli.settings(),
            Err(VibeError::InvalidConfigValueError { field, .. }) if field == "location.lat"
        ));
    }
}

use anyhow::Context;
use clap::Parser;
use std::io::Write;
use vibecheck::adapters::http::{places_from_json, HttpPlaceSearch};
use vibecheck::adapters::location::StaticLocation;
use vibecheck::adapters::output::render;
use vibecheck::config::cli::{CliConfig, Command};
use vibecheck::config::Settings;
use vibecheck::core::{rank_and_scale, DisabledReason, LocationRequest, SearchEngine, SearchOutcome};
use vibecheck::domain::ports::ConfigProvider;
use vibecheck::utils::error::VibeError;
use vibecheck::utils::{logger, validation::Validate};

fn load_settings(cli: &CliConfig) -> Result<Settings, VibeError> {
    let settings = cli.settings()?;
    settings.validate()?;
    Ok(settings)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting vibecheck");

    let settings = match load_settings(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!(
                "Configuration failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("{}", e.user_friendly_message());
            eprintln!("Suggestion: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };
    tracing::debug!("Settings: {:?}", settings);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        Command::Search(args) => {
            let search = HttpPlaceSearch::from_config(&settings)?;
            let provider = StaticLocation::from_config(&settings);

            let request = LocationRequest::new(&provider, settings.location_options());
            tracing::info!("{}", request.state().status_label());
            let location = request.resolve().await;
            tracing::info!("{}", location.status_label());

            let engine = SearchEngine::new(search);
            match engine.run(&args.query, &location).await {
                SearchOutcome::Completed { query, ranked } => {
                    render(settings.format, &query, &ranked, &mut out)?;
                }
                SearchOutcome::Disabled(DisabledReason::EmptyQuery) => {
                    eprintln!("Enter something to search for");
                }
                SearchOutcome::Disabled(DisabledReason::NoLocation) => {
                    eprintln!("{}", location.status_label());
                    eprintln!("Pass --lat and --lng or set [location] in the settings file");
                }
            }
        }
        Command::Rank(args) => {
            let content = std::fs::read_to_string(&args.input)
                .with_context(|| format!("Failed to read {}", args.input.display()))?;
            let body: serde_json::Value = serde_json::from_str(&content)
                .with_context(|| format!("{} is not valid JSON", args.input.display()))?;

            let places = places_from_json(body)?;
            tracing::info!("Ranking {} places from {}", places.len(), args.input.display());

            let ranked = rank_and_scale(&places);
            let label = args.input.display().to_string();
            render(settings.format, &label, &ranked, &mut out)?;
        }
    }

    out.flush()?;
    Ok(())
}

use std::collections::HashSet;
use std::process::ExitCode;
use std::sync::Arc;

use retire_match::config::{LoggingSettings, Settings};
use retire_match::core::Matcher;
use retire_match::models::RankResponse;
use retire_match::services::{load_reference_or_embedded, load_request, load_towns, CatalogError};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn init_tracing(logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

fn main() -> ExitCode {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load();
    init_tracing(settings.as_ref().map(|s| &s.logging).unwrap_or(&LoggingSettings::default()));

    let settings = match settings {
        Ok(settings) => settings,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    info!("Configuration loaded successfully");

    if let Some(workers) = settings.matching.workers {
        if let Err(e) = rayon::ThreadPoolBuilder::new().num_threads(workers).build_global() {
            warn!("Could not size scoring pool to {} workers: {}", workers, e);
        }
    }

    match run(&settings) {
        Ok(response) => match serde_json::to_string_pretty(&response) {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!("Failed to serialize response: {}", e);
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            error!("Ranking failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(settings: &Settings) -> Result<RankResponse, CatalogError> {
    let reference = Arc::new(load_reference_or_embedded(settings.reference.path.as_deref()));

    let weights = settings.weights();
    let matcher = Matcher::new(weights, reference).with_top_factor_limit(settings.matching.top_factor_limit);
    info!("Matcher initialized with weights: {:?}", weights);

    let catalog = load_towns(&settings.catalog.towns_path)?;
    let request = load_request(&settings.catalog.request_path)?;
    info!(
        "Loaded {} towns ({} skipped) from {}",
        catalog.towns.len(),
        catalog.skipped,
        settings.catalog.towns_path
    );

    let excluded: HashSet<&str> = request.exclude_town_ids.iter().map(String::as_str).collect();
    let candidates: Vec<_> = catalog
        .towns
        .into_iter()
        .filter(|town| !excluded.contains(town.id.as_str()))
        .collect();

    let limit = settings.effective_limit(request.limit);
    info!(
        "Ranking {} towns for user {}, limit: {}",
        candidates.len(),
        request.preference.id.as_deref().unwrap_or("anonymous"),
        limit
    );

    let matches = matcher.rank_towns(&request.preference, &candidates, limit);

    Ok(RankResponse {
        total_results: matches.len(),
        matches,
        skipped_records: catalog.skipped,
        cancelled: false,
    })
}

use std::fs;
use std::path::Path;

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};
use validator::Validate;

use crate::models::{RankRequest, Town};

/// Errors that can occur when loading the town catalog or a rank request
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid catalog format: {0}")]
    InvalidFormat(String),
}

/// Towns parsed from a catalog file
#[derive(Debug, Default)]
pub struct Catalog {
    pub towns: Vec<Town>,
    /// Records that could not be parsed as a town
    pub skipped: usize,
}

fn read(path: &Path) -> Result<String, CatalogError> {
    fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Load a town catalog from a JSON file
pub fn load_towns<P: AsRef<Path>>(path: P) -> Result<Catalog, CatalogError> {
    let catalog = parse_towns(&read(path.as_ref())?)?;
    debug!(
        "Loaded {} towns from {} ({} skipped)",
        catalog.towns.len(),
        path.as_ref().display(),
        catalog.skipped
    );
    Ok(catalog)
}

/// Parse a catalog: a JSON array of town records, or an object wrapping one
/// under `towns` or `documents`. Records may nest their fields under `data`.
///
/// Each record is parsed on its own; a malformed record is logged, counted
/// and skipped. Records that parse but fail range validation are kept, since
/// the scorers treat out-of-range facts as malformed sub-facets.
pub fn parse_towns(json: &str) -> Result<Catalog, CatalogError> {
    let root: Value = serde_json::from_str(json)?;

    let records = match &root {
        Value::Array(records) => records,
        Value::Object(_) => root
            .get("towns")
            .or_else(|| root.get("documents"))
            .and_then(|d| d.as_array())
            .ok_or_else(|| CatalogError::InvalidFormat("Missing towns array".into()))?,
        _ => return Err(CatalogError::InvalidFormat("Expected an array of towns".into())),
    };

    let mut catalog = Catalog::default();
    for (index, record) in records.iter().enumerate() {
        let data = record.get("data").unwrap_or(record);
        match serde_json::from_value::<Town>(data.clone()) {
            Ok(town) => {
                if let Err(e) = town.validate() {
                    warn!("Town {} ({}) has out-of-range values: {}", town.id, town.name, e);
                }
                catalog.towns.push(town);
            }
            Err(e) => {
                warn!("Skipping catalog record {}: {}", index, e);
                catalog.skipped += 1;
            }
        }
    }

    Ok(catalog)
}

/// Load a rank request from a JSON file
pub fn load_request<P: AsRef<Path>>(path: P) -> Result<RankRequest, CatalogError> {
    parse_request(&read(path.as_ref())?)
}

/// Parse a rank request. Validation failures are logged rather than
/// rejected: the affected category scores its minimum instead.
pub fn parse_request(json: &str) -> Result<RankRequest, CatalogError> {
    let request: RankRequest = serde_json::from_str(json)?;
    if let Err(e) = request.validate() {
        warn!("Rank request has invalid values: {}", e);
    }
    Ok(request)
}

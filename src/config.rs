use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::models::CategoryWeights;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub reference: ReferenceSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_limit")]
    pub default_limit: u16,
    #[serde(default = "default_max_limit")]
    pub max_limit: u16,
    #[serde(default = "default_top_factor_limit")]
    pub top_factor_limit: usize,
    /// Scoring threads; the hardware concurrency when unset
    pub workers: Option<usize>,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
            top_factor_limit: default_top_factor_limit(),
            workers: None,
        }
    }
}

fn default_limit() -> u16 { 20 }
fn default_max_limit() -> u16 { 100 }
fn default_top_factor_limit() -> usize { 5 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_region_weight")]
    pub region: f64,
    #[serde(default = "default_climate_weight")]
    pub climate: f64,
    #[serde(default = "default_culture_weight")]
    pub culture: f64,
    #[serde(default = "default_hobbies_weight")]
    pub hobbies: f64,
    #[serde(default = "default_administration_weight")]
    pub administration: f64,
    #[serde(default = "default_budget_weight")]
    pub budget: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            region: default_region_weight(),
            climate: default_climate_weight(),
            culture: default_culture_weight(),
            hobbies: default_hobbies_weight(),
            administration: default_administration_weight(),
            budget: default_budget_weight(),
        }
    }
}

impl From<&WeightsConfig> for CategoryWeights {
    fn from(config: &WeightsConfig) -> Self {
        Self {
            region: config.region,
            climate: config.climate,
            culture: config.culture,
            hobbies: config.hobbies,
            administration: config.administration,
            budget: config.budget,
        }
    }
}

fn default_region_weight() -> f64 { 20.0 }
fn default_climate_weight() -> f64 { 15.0 }
fn default_culture_weight() -> f64 { 15.0 }
fn default_hobbies_weight() -> f64 { 10.0 }
fn default_administration_weight() -> f64 { 20.0 }
fn default_budget_weight() -> f64 { 20.0 }

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogSettings {
    #[serde(default = "default_towns_path")]
    pub towns_path: String,
    #[serde(default = "default_request_path")]
    pub request_path: String,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            towns_path: default_towns_path(),
            request_path: default_request_path(),
        }
    }
}

fn default_towns_path() -> String { "data/towns.json".to_string() }
fn default_request_path() -> String { "data/request.json".to_string() }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReferenceSettings {
    /// TOML file replacing the embedded reference table
    pub path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with RETIRE__)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., RETIRE__MATCHING__MAX_LIMIT -> matching.max_limit
            .add_source(environment())
            .build()?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?;

        settings.try_deserialize()
    }

    /// Category weights for the matcher
    pub fn weights(&self) -> CategoryWeights {
        CategoryWeights::from(&self.scoring.weights)
    }

    /// Requested result count, defaulted and capped by the matching settings
    pub fn effective_limit(&self, requested: Option<u16>) -> usize {
        let limit = requested.unwrap_or(self.matching.default_limit);
        usize::from(limit.clamp(1, self.matching.max_limit.max(1)))
    }
}

fn environment() -> Environment {
    Environment::with_prefix("RETIRE")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights() {
        let weights = WeightsConfig::default();
        assert_eq!(weights.region, 20.0);
        assert_eq!(weights.climate, 15.0);
        assert_eq!(weights.culture, 15.0);
        assert_eq!(weights.hobbies, 10.0);
        assert_eq!(weights.administration, 20.0);
        assert_eq!(weights.budget, 20.0);
        assert_eq!(CategoryWeights::from(&weights), CategoryWeights::default());
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "json");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let settings: Settings = Config::builder()
            .add_source(File::from_str(
                "[scoring.weights]\nbudget = 40.0\n[matching]\nmax_limit = 10\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.scoring.weights.budget, 40.0);
        assert_eq!(settings.scoring.weights.region, 20.0);
        assert_eq!(settings.matching.default_limit, 20);
        assert_eq!(settings.catalog.towns_path, "data/towns.json");
        assert!(settings.reference.path.is_none());
    }

    #[test]
    fn test_effective_limit() {
        let mut settings = Settings::default();
        settings.matching.max_limit = 10;
        assert_eq!(settings.effective_limit(None), 10);
        assert_eq!(settings.effective_limit(Some(3)), 3);
        assert_eq!(settings.effective_limit(Some(0)), 1);
        assert_eq!(settings.effective_limit(Some(500)), 10);
    }
}

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::constants::{
    ACME_ENDPOINT, ACME_SUPPLIER, CONFIDENCE_LEVEL_FACTOR, PAPERFLIES_ENDPOINT, PAPERFLIES_SUPPLIER,
    PATAGONIA_ENDPOINT, PATAGONIA_SUPPLIER,
};
use crate::error::{HotelError, Result};
use crate::pipeline::pipeline_config::ErrorHandlingStrategy;

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";
pub const CONFIG_PATH_ENV: &str = "HOTEL_RECONCILER_CONFIG";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub suppliers: SupplierConfig,
    pub merger: MergerConfig,
    pub logging: LoggingConfig,
    pub reconcile: ReconcileConfig,
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct SupplierConfig {
    /// Supplier name -> endpoint URL
    pub endpoints: BTreeMap<String, String>,
}

impl Default for SupplierConfig {
    fn default() -> Self {
        let endpoints = [
            (ACME_SUPPLIER, ACME_ENDPOINT),
            (PATAGONIA_SUPPLIER, PATAGONIA_ENDPOINT),
            (PAPERFLIES_SUPPLIER, PAPERFLIES_ENDPOINT),
        ]
        .into_iter()
        .map(|(name, url)| (name.to_string(), url.to_string()))
        .collect();
        Self { endpoints }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MergerConfig {
    /// Factor name -> (source -> score)
    pub bias_factors: BTreeMap<String, BTreeMap<String, f64>>,
}

impl Default for MergerConfig {
    fn default() -> Self {
        let confidence = [ACME_SUPPLIER, PATAGONIA_SUPPLIER, PAPERFLIES_SUPPLIER]
            .into_iter()
            .map(|name| (name.to_string(), 0.9))
            .collect();
        let mut bias_factors = BTreeMap::new();
        bias_factors.insert(CONFIDENCE_LEVEL_FACTOR.to_string(), confidence);
        Self { bias_factors }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub dir: String,
    pub level: String,
    pub console: bool,
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: "logs".to_string(),
            level: "info".to_string(),
            console: true,
            file_prefix: "hotel_reconciler.log".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReconcileConfig {
    pub continue_on_error: bool,
    pub enrich_from_raw_store: bool,
    pub concurrent: bool,
    pub timeout_ms: u64,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            continue_on_error: true,
            enrich_from_raw_store: true,
            concurrent: false,
            timeout_ms: 30_000,
        }
    }
}

impl ReconcileConfig {
    pub fn error_handling(&self) -> ErrorHandlingStrategy {
        if self.continue_on_error {
            ErrorHandlingStrategy::ContinueOnError
        } else {
            ErrorHandlingStrategy::StopOnFirstError
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Socket address for the Prometheus exporter; metrics are not exported when unset
    pub listen: Option<String>,
}

impl Config {
    /// Load from `path`, falling back to `HOTEL_RECONCILER_CONFIG` and then `config.toml`.
    /// A missing default file yields the built-in defaults.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let explicit = path
            .map(str::to_string)
            .or_else(|| std::env::var(CONFIG_PATH_ENV).ok());

        match explicit {
            Some(path) => Self::from_file(&path),
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => Self::from_file(DEFAULT_CONFIG_PATH),
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &str) -> Result<Self> {
        let config_content = fs::read_to_string(path).map_err(|e| {
            HotelError::Config(format!("Failed to read config file '{}': {}", path, e))
        })?;
        Self::from_toml_str(&config_content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, endpoint) in &self.suppliers.endpoints {
            url::Url::parse(endpoint).map_err(|e| {
                HotelError::Config(format!("Supplier '{}' has an invalid endpoint '{}': {}", name, endpoint, e))
            })?;
        }

        for (factor, scores) in &self.merger.bias_factors {
            if let Some((source, score)) = scores.iter().find(|(_, score)| !score.is_finite()) {
                return Err(HotelError::Config(format!(
                    "Bias factor '{}' has a non-finite score {} for source '{}'",
                    factor, score, source
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_the_three_mock_suppliers() {
        let config = Config::default();
        assert_eq!(config.suppliers.endpoints.len(), 3);
        assert_eq!(
            config.merger.bias_factors[CONFIDENCE_LEVEL_FACTOR][PATAGONIA_SUPPLIER],
            0.9
        );
        assert!(config.reconcile.continue_on_error);
    }

    #[test]
    fn partial_toml_keeps_defaults_for_missing_sections() {
        let config = Config::from_toml_str(
            r#"
            [merger.bias_factors.confidence_level]
            acme = 0.6
            paperflies = 0.9

            [reconcile]
            continue_on_error = false
            "#,
        )
        .unwrap();

        assert_eq!(config.merger.bias_factors[CONFIDENCE_LEVEL_FACTOR]["acme"], 0.6);
        assert_eq!(config.reconcile.error_handling(), ErrorHandlingStrategy::StopOnFirstError);
        assert_eq!(config.logging.dir, "logs");
        assert_eq!(config.suppliers.endpoints.len(), 3);
    }

    #[test]
    fn invalid_supplier_endpoint_is_rejected() {
        let result = Config::from_toml_str(
            r#"
            [suppliers]
            acme = "not a url"
            "#,
        );
        assert!(matches!(result, Err(HotelError::Config(_))));
    }

    #[test]
    fn loads_from_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[logging]\nlevel = \"debug\"\nconsole = false").unwrap();

        let config = Config::load(file.path().to_str()).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert!(!config.logging.console);
    }

    #[test]
    fn missing_explicit_file_is_a_config_error() {
        let result = Config::from_file("/definitely/not/here.toml");
        assert!(matches!(result, Err(HotelError::Config(_))));
    }
}

use std::collections::BTreeMap;
use tracing::debug;

use crate::error::BiasError;

/// Per-source confidence scores, one table per bias factor.
///
/// Read-only once built, so a single table can be shared across concurrent
/// group merges behind an `Arc`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BiasTable {
    factors: BTreeMap<String, BTreeMap<String, f64>>,
}

impl BiasTable {
    /// Build from factor name -> (source -> score)
    pub fn new(factors: BTreeMap<String, BTreeMap<String, f64>>) -> Self {
        Self { factors }
    }

    /// Convenience constructor for a single factor
    pub fn single_factor<I, S>(factor: &str, scores: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let table = scores.into_iter().map(|(source, score)| (source.into(), score)).collect();
        let mut factors = BTreeMap::new();
        factors.insert(factor.to_string(), table);
        Self { factors }
    }

    pub fn factor_names(&self) -> Vec<&str> {
        self.factors.keys().map(String::as_str).collect()
    }

    /// Score of `source` under one factor, or the aggregate when `factor` is `None`.
    ///
    /// An unconfigured factor is an error; a source missing under a known factor is absent.
    pub fn score(&self, source: &str, factor: Option<&str>) -> Result<Option<f64>, BiasError> {
        match factor {
            Some(name) => self
                .factors
                .get(name)
                .map(|scores| scores.get(source).copied())
                .ok_or_else(|| BiasError::UnknownFactor(name.to_string())),
            None => Ok(self.aggregate_score(source)),
        }
    }

    /// Mean of the source's scores over every factor that defines it
    pub fn aggregate_score(&self, source: &str) -> Option<f64> {
        let scores: Vec<f64> = self
            .factors
            .values()
            .filter_map(|scores| scores.get(source).copied())
            .collect();

        if scores.is_empty() {
            debug!("No bias scores found for {}", source);
            return None;
        }

        Some(scores.iter().sum::<f64>() / scores.len() as f64)
    }

    /// Signed preference between two sources.
    ///
    /// Negative means the second source is preferred, zero means no preference,
    /// positive means the first is preferred. A source without any score (or no
    /// source at all) loses to one with a score; two unscored sources tie.
    pub fn compare_bias(&self, first: Option<&str>, second: Option<&str>) -> f64 {
        let first_score = first.and_then(|source| self.aggregate_score(source));
        let second_score = second.and_then(|source| self.aggregate_score(source));

        match (first_score, second_score) {
            (None, None) => 0.0,
            (None, Some(_)) => -1.0,
            (Some(_), None) => 1.0,
            (Some(a), Some(b)) => a - b,
        }
    }
}

use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::config::Config;
use crate::domain::Hotel;
use crate::error::{NormalizationError, Result};
use crate::pipeline::pipeline_config::ErrorHandlingStrategy;
use crate::pipeline::processing::bias::BiasTable;
use crate::pipeline::processing::cleaner::HotelCleaner;
use crate::pipeline::processing::merge::MergerRegistry;
use crate::pipeline::processing::normalize::{NormalizationRegistry, NormalizeOutcome};
use crate::pipeline::processing::reconcile::{ReconcileOptions, ReconcileReport, Reconciler};
use crate::pipeline::storage::{HotelStore, RawHotelStore};

/// Result of one normalize, merge and store cycle
#[derive(Debug)]
pub struct RefreshSummary {
    pub normalization_errors: Vec<NormalizationError>,
    pub report: ReconcileReport,
    pub stored: usize,
}

/// Use case tying normalization and reconciliation to the stores
pub struct HotelService {
    normalizer: NormalizationRegistry,
    reconciler: Arc<Reconciler>,
    raw_store: Option<Arc<dyn RawHotelStore>>,
    hotel_store: Arc<dyn HotelStore>,
    error_handling: ErrorHandlingStrategy,
    concurrency: Option<Duration>,
}

impl HotelService {
    pub fn new(
        normalizer: NormalizationRegistry,
        reconciler: Reconciler,
        hotel_store: Arc<dyn HotelStore>,
    ) -> Self {
        let error_handling = reconciler.options().error_handling;
        Self {
            normalizer,
            reconciler: Arc::new(reconciler),
            raw_store: None,
            hotel_store,
            error_handling,
            concurrency: None,
        }
    }

    /// Wire every component from configuration
    pub fn from_config(
        config: &Config,
        raw_store: Arc<dyn RawHotelStore>,
        hotel_store: Arc<dyn HotelStore>,
    ) -> Self {
        let bias = Arc::new(BiasTable::new(config.merger.bias_factors.clone()));
        let reconciler = Reconciler::new(
            MergerRegistry::new(bias),
            ReconcileOptions::from(&config.reconcile),
        )
        .with_raw_store(raw_store.clone());

        let mut service = Self::new(
            NormalizationRegistry::new(Arc::new(HotelCleaner::new())),
            reconciler,
            hotel_store,
        )
        .with_raw_store(raw_store);

        if config.reconcile.concurrent {
            service = service.with_concurrency(Duration::from_millis(config.reconcile.timeout_ms));
        }
        service
    }

    /// Persist normalized records so later runs can enrich from them
    pub fn with_raw_store(mut self, store: Arc<dyn RawHotelStore>) -> Self {
        self.raw_store = Some(store);
        self
    }

    /// Merge groups on the blocking pool with the given run timeout
    pub fn with_concurrency(mut self, timeout: Duration) -> Self {
        self.concurrency = Some(timeout);
        self
    }

    pub fn normalize_hotels(&self, hotels: Vec<Hotel>) -> Result<NormalizeOutcome> {
        let outcome = self.normalizer.normalize_batch(hotels, self.error_handling)?;

        if let Some(store) = &self.raw_store {
            let stored = store.upsert_many(outcome.hotels.clone())?;
            info!("Stored {} normalized raw records", stored);
        }
        Ok(outcome)
    }

    pub async fn merge_hotels(&self, hotels: Vec<Hotel>) -> Result<ReconcileReport> {
        let report = match self.concurrency {
            Some(timeout) => Arc::clone(&self.reconciler).reconcile_concurrent(hotels, timeout).await?,
            None => self.reconciler.reconcile(hotels)?,
        };
        Ok(report)
    }

    /// Normalize, merge and store the merged records
    pub async fn refresh(&self, hotels: Vec<Hotel>) -> Result<RefreshSummary> {
        let outcome = self.normalize_hotels(hotels)?;
        if !outcome.is_clean() {
            warn!("{} records failed normalization", outcome.errors.len());
        }

        let report = self.merge_hotels(outcome.hotels).await?;
        let stored = self.hotel_store.upsert_many(report.merged.clone())?;
        info!("Stored {} merged hotels", stored);

        Ok(RefreshSummary {
            normalization_errors: outcome.errors,
            report,
            stored,
        })
    }
}

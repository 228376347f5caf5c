use std::sync::Arc;
use tracing::{debug, error, warn};

use super::normalizers::{
    AmenitiesNormalizer, AttributeNormalizer, BookingConditionsNormalizer, DescriptionNormalizer,
    ImagesNormalizer, LocationNormalizer, NameNormalizer,
};
use super::NormalizeOutcome;
use crate::domain::{Hotel, HotelField};
use crate::error::NormalizationError;
use crate::observability::metrics;
use crate::pipeline::pipeline_config::ErrorHandlingStrategy;
use crate::pipeline::processing::cleaner::Cleaner;

/// Ordered set of attribute normalizers applied to every record
pub struct NormalizationRegistry {
    normalizers: Vec<Box<dyn AttributeNormalizer>>,
}

impl NormalizationRegistry {
    /// Create a registry with one normalizer per attribute
    pub fn new(cleaner: Arc<dyn Cleaner>) -> Self {
        let normalizers: Vec<Box<dyn AttributeNormalizer>> = vec![
            Box::new(NameNormalizer::new(cleaner.clone())),
            Box::new(DescriptionNormalizer::new(cleaner.clone())),
            Box::new(LocationNormalizer::new(cleaner.clone())),
            Box::new(AmenitiesNormalizer::new(cleaner.clone())),
            Box::new(ImagesNormalizer::new(cleaner.clone())),
            Box::new(BookingConditionsNormalizer::new(cleaner)),
        ];
        Self { normalizers }
    }

    /// A registry with no normalizers; records pass through untouched
    pub fn empty() -> Self {
        Self { normalizers: Vec::new() }
    }

    /// Register a normalizer, replacing any existing one for the same field
    pub fn register(&mut self, normalizer: Box<dyn AttributeNormalizer>) {
        let field = normalizer.field();
        match self.normalizers.iter().position(|n| n.field() == field) {
            Some(index) => self.normalizers[index] = normalizer,
            None => self.normalizers.push(normalizer),
        }
    }

    /// Fields covered, in application order
    pub fn fields(&self) -> Vec<HotelField> {
        self.normalizers.iter().map(|n| n.field()).collect()
    }

    /// Apply every normalizer once, in order
    pub fn normalize(&self, hotel: Hotel) -> Result<Hotel, NormalizationError> {
        let hotel_id = hotel.hotel_id.clone();
        let source = hotel.source.clone();

        self.normalizers.iter().try_fold(hotel, |hotel, normalizer| {
            normalizer.normalize(hotel).map_err(|e| NormalizationError {
                hotel_id: hotel_id.clone(),
                source_id: source.clone(),
                field: normalizer.field(),
                reason: e.to_string(),
            })
        })
    }

    /// Normalize records in input order.
    ///
    /// With `StopOnFirstError` the first failure is returned; otherwise failed
    /// records are dropped and their errors collected.
    pub fn normalize_batch(
        &self,
        hotels: Vec<Hotel>,
        strategy: ErrorHandlingStrategy,
    ) -> Result<NormalizeOutcome, NormalizationError> {
        let total = hotels.len();
        let mut outcome = NormalizeOutcome::default();

        for hotel in hotels {
            match self.normalize(hotel) {
                Ok(normalized) => {
                    metrics::normalize::record_normalized(&normalized.source);
                    outcome.hotels.push(normalized);
                }
                Err(e) => {
                    metrics::normalize::record_failed(e.field.as_str());
                    if strategy.stops_on_error() {
                        error!("Normalization aborted: {}", e);
                        return Err(e);
                    }
                    warn!("Skipping record: {}", e);
                    outcome.errors.push(e);
                }
            }
        }

        metrics::normalize::batch_processed(total);
        debug!(
            "Normalized {} of {} records ({} failed)",
            outcome.hotels.len(),
            total,
            outcome.errors.len()
        );
        Ok(outcome)
    }
}

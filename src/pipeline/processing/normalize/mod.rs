pub mod normalizers;
pub mod registry;

pub use normalizers::AttributeNormalizer;
pub use registry::NormalizationRegistry;

use crate::domain::Hotel;
use crate::error::NormalizationError;

/// Result of normalizing a batch under `ContinueOnError`.
///
/// `hotels` keeps input order minus the records that failed.
#[derive(Debug, Default)]
pub struct NormalizeOutcome {
    pub hotels: Vec<Hotel>,
    pub errors: Vec<NormalizationError>,
}

impl NormalizeOutcome {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

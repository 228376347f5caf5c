use anyhow::Result;

use crate::domain::{Hotel, HotelField};

/// One normalizer per hotel attribute
pub trait AttributeNormalizer: Send + Sync {
    /// The attribute this normalizer rewrites
    fn field(&self) -> HotelField;

    /// Return the hotel with this normalizer's attribute cleaned.
    /// Absent attributes pass through unchanged.
    fn normalize(&self, hotel: Hotel) -> Result<Hotel>;

    /// Get a human-readable name for this normalizer
    fn name(&self) -> &str;
}

use anyhow::Result;
use std::sync::Arc;

use super::base::AttributeNormalizer;
use crate::domain::{Hotel, HotelField};
use crate::pipeline::processing::cleaner::Cleaner;

/// Cleans the textual location fields; coordinates are left untouched
pub struct LocationNormalizer {
    cleaner: Arc<dyn Cleaner>,
}

impl LocationNormalizer {
    pub fn new(cleaner: Arc<dyn Cleaner>) -> Self {
        Self { cleaner }
    }

    fn clean(&self, value: Option<String>) -> Option<String> {
        value.map(|v| self.cleaner.clean_text(&v))
    }
}

impl AttributeNormalizer for LocationNormalizer {
    fn field(&self) -> HotelField {
        HotelField::Location
    }

    fn normalize(&self, mut hotel: Hotel) -> Result<Hotel> {
        if let Some(mut location) = hotel.location.take() {
            location.address = self.clean(location.address);
            location.city = self.clean(location.city);
            location.country = self.clean(location.country);
            location.postal_code = self.clean(location.postal_code);
            hotel.location = Some(location);
        }
        Ok(hotel)
    }

    fn name(&self) -> &str {
        "location"
    }
}

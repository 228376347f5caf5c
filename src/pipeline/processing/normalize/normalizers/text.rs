use anyhow::Result;
use std::sync::Arc;

use super::base::AttributeNormalizer;
use crate::domain::{Hotel, HotelField};
use crate::pipeline::processing::cleaner::Cleaner;

/// Cleans the hotel name.
///
/// A name written entirely outside the cleaner's character set (a non-Latin
/// script, say) would clean to nothing; the trimmed original is kept instead.
pub struct NameNormalizer {
    cleaner: Arc<dyn Cleaner>,
}

impl NameNormalizer {
    pub fn new(cleaner: Arc<dyn Cleaner>) -> Self {
        Self { cleaner }
    }
}

impl AttributeNormalizer for NameNormalizer {
    fn field(&self) -> HotelField {
        HotelField::Name
    }

    fn normalize(&self, mut hotel: Hotel) -> Result<Hotel> {
        let cleaned = self.cleaner.clean_text(&hotel.name);
        hotel.name = if cleaned.is_empty() {
            hotel.name.trim().to_string()
        } else {
            cleaned
        };
        Ok(hotel)
    }

    fn name(&self) -> &str {
        "name"
    }
}

pub struct DescriptionNormalizer {
    cleaner: Arc<dyn Cleaner>,
}

impl DescriptionNormalizer {
    pub fn new(cleaner: Arc<dyn Cleaner>) -> Self {
        Self { cleaner }
    }
}

impl AttributeNormalizer for DescriptionNormalizer {
    fn field(&self) -> HotelField {
        HotelField::Description
    }

    fn normalize(&self, mut hotel: Hotel) -> Result<Hotel> {
        hotel.description = hotel
            .description
            .map(|description| self.cleaner.clean_text(&description));
        Ok(hotel)
    }

    fn name(&self) -> &str {
        "description"
    }
}

pub struct BookingConditionsNormalizer {
    cleaner: Arc<dyn Cleaner>,
}

impl BookingConditionsNormalizer {
    pub fn new(cleaner: Arc<dyn Cleaner>) -> Self {
        Self { cleaner }
    }
}

impl AttributeNormalizer for BookingConditionsNormalizer {
    fn field(&self) -> HotelField {
        HotelField::BookingConditions
    }

    fn normalize(&self, mut hotel: Hotel) -> Result<Hotel> {
        hotel.booking_conditions = hotel.booking_conditions.map(|conditions| {
            conditions
                .iter()
                .map(|condition| self.cleaner.clean_text(condition))
                .collect()
        });
        Ok(hotel)
    }

    fn name(&self) -> &str {
        "booking_conditions"
    }
}

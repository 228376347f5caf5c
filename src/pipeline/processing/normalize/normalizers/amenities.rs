use anyhow::Result;
use std::sync::Arc;

use super::base::AttributeNormalizer;
use crate::domain::{Hotel, HotelField};
use crate::pipeline::processing::cleaner::Cleaner;

/// Splits camel-cased amenity names and lowercases both amenity lists
pub struct AmenitiesNormalizer {
    cleaner: Arc<dyn Cleaner>,
}

impl AmenitiesNormalizer {
    pub fn new(cleaner: Arc<dyn Cleaner>) -> Self {
        Self { cleaner }
    }

    fn clean_all(&self, values: Option<Vec<String>>) -> Option<Vec<String>> {
        values.map(|list| list.iter().map(|a| self.cleaner.clean_amenity(a)).collect())
    }
}

impl AttributeNormalizer for AmenitiesNormalizer {
    fn field(&self) -> HotelField {
        HotelField::Amenities
    }

    fn normalize(&self, mut hotel: Hotel) -> Result<Hotel> {
        if let Some(mut amenities) = hotel.amenities.take() {
            amenities.general = self.clean_all(amenities.general);
            amenities.room = self.clean_all(amenities.room);
            hotel.amenities = Some(amenities);
        }
        Ok(hotel)
    }

    fn name(&self) -> &str {
        "amenities"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Amenities;
    use crate::pipeline::processing::cleaner::HotelCleaner;

    #[test]
    fn amenities_split_and_lowercased() {
        let mut hotel = Hotel::new("iJhz", 5432, "Beach Villas", "acme");
        hotel.amenities = Some(Amenities {
            general: Some(vec!["Pool".into(), "BusinessCenter".into(), " DryCleaning ".into()]),
            room: None,
        });

        let hotel = AmenitiesNormalizer::new(Arc::new(HotelCleaner::new()))
            .normalize(hotel)
            .unwrap();
        let amenities = hotel.amenities.unwrap();

        assert_eq!(
            amenities.general,
            Some(vec!["pool".to_string(), "business center".to_string(), "dry cleaning".to_string()])
        );
        assert_eq!(amenities.room, None);
    }
}

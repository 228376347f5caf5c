use serde_json::Value;

use super::base::{location_or_none, optional_f64, optional_str, required_i64, required_str, string_list, Supplier};
use crate::constants::ACME_SUPPLIER;
use crate::domain::{Amenities, Hotel, Location};
use crate::error::Result;

/// Acme publishes PascalCase keys and a single facilities list
pub struct AcmeSupplier {
    endpoint: String,
}

impl AcmeSupplier {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

impl Supplier for AcmeSupplier {
    fn name(&self) -> &str {
        ACME_SUPPLIER
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn parse(&self, item: &Value) -> Result<Hotel> {
        let mut hotel = Hotel::new(
            required_str(item, "Id")?,
            required_i64(item, "DestinationId")?,
            required_str(item, "Name")?,
            ACME_SUPPLIER,
        );

        hotel.description = optional_str(item, "Description");
        hotel.location = location_or_none(Location {
            address: optional_str(item, "Address"),
            city: optional_str(item, "City"),
            country: optional_str(item, "Country"),
            postal_code: optional_str(item, "PostalCode"),
            latitude: optional_f64(item, "Latitude"),
            longitude: optional_f64(item, "Longitude"),
        });
        hotel.amenities = string_list(Some(item), "Facilities").map(|general| Amenities {
            general: Some(general),
            room: None,
        });

        Ok(hotel)
    }
}

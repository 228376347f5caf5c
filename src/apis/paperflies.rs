use serde_json::Value;

use super::base::{
    image_list, location_or_none, optional_str, required_i64, required_str, string_list, Supplier,
};
use crate::constants::PAPERFLIES_SUPPLIER;
use crate::domain::{Amenities, Hotel, HotelImages, Location};
use crate::error::Result;

/// Paperflies nests location, amenities and images, and carries booking conditions
pub struct PaperfliesSupplier {
    endpoint: String,
}

impl PaperfliesSupplier {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

impl Supplier for PaperfliesSupplier {
    fn name(&self) -> &str {
        PAPERFLIES_SUPPLIER
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn parse(&self, item: &Value) -> Result<Hotel> {
        let mut hotel = Hotel::new(
            required_str(item, "hotel_id")?,
            required_i64(item, "destination_id")?,
            required_str(item, "hotel_name")?,
            PAPERFLIES_SUPPLIER,
        );

        hotel.description = optional_str(item, "details");

        if let Some(location) = item.get("location") {
            hotel.location = location_or_none(Location {
                address: optional_str(location, "address"),
                country: optional_str(location, "country"),
                ..Location::default()
            });
        }

        let amenities = item.get("amenities");
        let general = string_list(amenities, "general");
        let room = string_list(amenities, "room");
        if general.is_some() || room.is_some() {
            hotel.amenities = Some(Amenities { general, room });
        }

        let images = item.get("images");
        let rooms = image_list(images, "rooms", "link", "caption")?;
        let site = image_list(images, "site", "link", "caption")?;
        if rooms.is_some() || site.is_some() {
            hotel.images = Some(HotelImages {
                rooms,
                site,
                amenities: None,
            });
        }

        hotel.booking_conditions = string_list(Some(item), "booking_conditions");
        Ok(hotel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_paperflies_item() {
        let item = json!({
            "hotel_id": "iJhz",
            "destination_id": 5432,
            "hotel_name": "Beach Villas Singapore",
            "location": {
                "address": "8 Sentosa Gateway, Beach Villas, 098269",
                "country": "Singapore"
            },
            "details": "Surrounded by tropical gardens, these upscale villas in elegant Colonial-style buildings are part of the Resorts World Sentosa complex.",
            "amenities": {
                "general": ["outdoor pool", "indoor pool", "business center", "childcare"],
                "room": ["tv", "coffee machine", "kettle", "hair dryer", "iron"]
            },
            "images": {
                "rooms": [
                    { "link": "https://d2ey9sqrvkqdfs.cloudfront.net/0qZF/2.jpg", "caption": "Double room" }
                ],
                "site": [
                    { "link": "https://d2ey9sqrvkqdfs.cloudfront.net/0qZF/1.jpg", "caption": "Front" }
                ]
            },
            "booking_conditions": [
                "All children are welcome.",
                "Pets are not allowed."
            ]
        });

        let hotel = PaperfliesSupplier::new("https://example.com/paperflies").parse(&item).unwrap();

        assert_eq!(hotel.source, "paperflies");
        assert_eq!(hotel.location.unwrap().country.as_deref(), Some("Singapore"));
        let amenities = hotel.amenities.unwrap();
        assert_eq!(amenities.room.unwrap().len(), 5);
        let images = hotel.images.unwrap();
        assert_eq!(images.site.unwrap()[0].description.as_deref(), Some("Front"));
        assert_eq!(hotel.booking_conditions.unwrap().len(), 2);
    }

    #[test]
    fn image_without_link_rejects_item() {
        let item = json!({
            "hotel_id": "iJhz",
            "destination_id": 5432,
            "hotel_name": "Beach Villas Singapore",
            "images": { "rooms": [{ "caption": "Double room" }] }
        });

        assert!(PaperfliesSupplier::new("https://example.com/paperflies").parse(&item).is_err());
    }
}

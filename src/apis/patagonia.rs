use serde_json::Value;

use super::base::{
    image_list, location_or_none, optional_f64, optional_str, required_i64, required_str, string_list,
    Supplier,
};
use crate::constants::PATAGONIA_SUPPLIER;
use crate::domain::{Amenities, Hotel, HotelImages, Location};
use crate::error::Result;

pub struct PatagoniaSupplier {
    endpoint: String,
}

impl PatagoniaSupplier {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

impl Supplier for PatagoniaSupplier {
    fn name(&self) -> &str {
        PATAGONIA_SUPPLIER
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn parse(&self, item: &Value) -> Result<Hotel> {
        let mut hotel = Hotel::new(
            required_str(item, "id")?,
            required_i64(item, "destination")?,
            required_str(item, "name")?,
            PATAGONIA_SUPPLIER,
        );

        hotel.description = optional_str(item, "info");
        hotel.location = location_or_none(Location {
            address: optional_str(item, "address"),
            latitude: optional_f64(item, "lat"),
            longitude: optional_f64(item, "lng"),
            ..Location::default()
        });
        hotel.amenities = string_list(Some(item), "amenities").map(|general| Amenities {
            general: Some(general),
            room: None,
        });

        let images = item.get("images");
        let rooms = image_list(images, "rooms", "url", "description")?;
        let amenities = image_list(images, "amenities", "url", "description")?;
        if rooms.is_some() || amenities.is_some() {
            hotel.images = Some(HotelImages {
                rooms,
                site: None,
                amenities,
            });
        }

        Ok(hotel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_patagonia_item() {
        let item = json!({
            "id": "iJhz",
            "destination": 5432,
            "name": "Beach Villas Singapore",
            "lat": 1.264751,
            "lng": 103.824006,
            "address": "8 Sentosa Gateway, Beach Villas, 098269",
            "info": "Located at the western tip of Resorts World Sentosa",
            "amenities": ["Aircon", "Tv", "Coffee machine", "Kettle", "Hair dryer", "Iron", "Tub"],
            "images": {
                "rooms": [
                    { "url": "https://d2ey9sqrvkqdfs.cloudfront.net/0qZF/2.jpg", "description": "Double room" },
                    { "url": "https://d2ey9sqrvkqdfs.cloudfront.net/0qZF/3.jpg", "description": "Double room" }
                ],
                "amenities": [
                    { "url": "https://d2ey9sqrvkqdfs.cloudfront.net/0qZF/0.jpg", "description": "RTB Restaurant" }
                ]
            }
        });

        let hotel = PatagoniaSupplier::new("https://example.com/patagonia").parse(&item).unwrap();

        assert_eq!(hotel.source, "patagonia");
        assert_eq!(hotel.description.as_deref(), Some("Located at the western tip of Resorts World Sentosa"));
        let location = hotel.location.unwrap();
        assert_eq!(location.city, None);
        assert_eq!(location.longitude, Some(103.824006));
        let images = hotel.images.unwrap();
        assert_eq!(images.rooms.unwrap().len(), 2);
        assert_eq!(images.amenities.unwrap()[0].description.as_deref(), Some("RTB Restaurant"));
        assert_eq!(images.site, None);
    }

    #[test]
    fn null_info_and_missing_images() {
        let item = json!({
            "id": "f8c9",
            "destination": 1122,
            "name": "Hilton Tokyo Shinjuku",
            "info": null
        });

        let hotel = PatagoniaSupplier::new("https://example.com/patagonia").parse(&item).unwrap();
        assert_eq!(hotel.description, None);
        assert_eq!(hotel.images, None);
    }
}

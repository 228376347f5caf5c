use anyhow::Result;
use std::sync::Arc;

use super::base::AttributeNormalizer;
use crate::domain::{Hotel, HotelField, Image};
use crate::pipeline::processing::cleaner::Cleaner;

/// Cleans captions of room and amenity images.
///
/// Site image captions are deliberately left as supplied.
pub struct ImagesNormalizer {
    cleaner: Arc<dyn Cleaner>,
}

impl ImagesNormalizer {
    pub fn new(cleaner: Arc<dyn Cleaner>) -> Self {
        Self { cleaner }
    }

    fn clean_captions(&self, images: Option<Vec<Image>>) -> Option<Vec<Image>> {
        images.map(|list| {
            list.into_iter()
                .map(|mut image| {
                    image.description = image
                        .description
                        .map(|caption| self.cleaner.clean_caption(&caption));
                    image
                })
                .collect()
        })
    }
}

impl AttributeNormalizer for ImagesNormalizer {
    fn field(&self) -> HotelField {
        HotelField::Images
    }

    fn normalize(&self, mut hotel: Hotel) -> Result<Hotel> {
        if let Some(mut images) = hotel.images.take() {
            images.rooms = self.clean_captions(images.rooms);
            images.amenities = self.clean_captions(images.amenities);
            hotel.images = Some(images);
        }
        Ok(hotel)
    }

    fn name(&self) -> &str {
        "images"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::HotelImages;
    use crate::pipeline::processing::cleaner::HotelCleaner;

    fn image(link: &str, caption: &str) -> Image {
        Image {
            link: link.to_string(),
            description: Some(caption.to_string()),
        }
    }

    #[test]
    fn room_and_amenity_captions_cleaned_site_untouched() {
        let mut hotel = Hotel::new("iJhz", 5432, "Beach Villas", "patagonia");
        hotel.images = Some(HotelImages {
            rooms: Some(vec![image("https://example.com/2.jpg", " Double  Room ")]),
            site: Some(vec![image("https://example.com/1.jpg", " Front ")]),
            amenities: Some(vec![image("https://example.com/0.jpg", "RTB*Lobby")]),
        });

        let hotel = ImagesNormalizer::new(Arc::new(HotelCleaner::new()))
            .normalize(hotel)
            .unwrap();
        let images = hotel.images.unwrap();

        assert_eq!(images.rooms.unwrap()[0].description.as_deref(), Some("double room"));
        assert_eq!(images.amenities.unwrap()[0].description.as_deref(), Some("rtb lobby"));
        assert_eq!(images.site.unwrap()[0].description.as_deref(), Some(" Front "));
    }
}

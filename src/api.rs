//! Read side: canonical hotels filtered by id and destination.

use serde::Serialize;
use tracing::debug;

use crate::domain::{Amenities, Hotel, HotelImages, Location};
use crate::error::{HotelError, Result};
use crate::pipeline::storage::HotelStore;

/// Public projection of a merged hotel; the source tag is internal
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HotelResponse {
    pub hotel_id: String,
    pub destination_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub location: Option<Location>,
    pub amenities: Option<Amenities>,
    pub images: Option<HotelImages>,
    pub booking_conditions: Option<Vec<String>>,
}

impl From<Hotel> for HotelResponse {
    fn from(hotel: Hotel) -> Self {
        Self {
            hotel_id: hotel.hotel_id,
            destination_id: hotel.destination_id,
            name: hotel.name,
            description: hotel.description,
            location: hotel.location,
            amenities: hotel.amenities,
            images: hotel.images,
            booking_conditions: hotel.booking_conditions,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HotelsResponse {
    pub hotels: Vec<HotelResponse>,
}

impl HotelsResponse {
    /// The hotels as an indented JSON array
    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.hotels)?)
    }
}

/// `None` matches every hotel
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HotelsFilter {
    pub hotel_ids: Option<Vec<String>>,
    pub destination_ids: Option<Vec<i64>>,
}

impl HotelsFilter {
    /// Parse comma-separated command-line values, where `none` means no filter
    pub fn from_args(hotel_ids: &str, destination_ids: &str) -> Result<Self> {
        let hotel_ids = split_arg(hotel_ids).map(|ids| ids.into_iter().map(str::to_string).collect());
        let destination_ids = split_arg(destination_ids)
            .map(|ids| {
                ids.into_iter()
                    .map(|id| {
                        id.parse::<i64>().map_err(|_| HotelError::InvalidField {
                            field: "destination_ids".to_string(),
                            message: format!("'{}' is not an integer", id),
                        })
                    })
                    .collect::<Result<Vec<_>>>()
            })
            .transpose()?;

        Ok(Self {
            hotel_ids,
            destination_ids,
        })
    }
}

fn split_arg(value: &str) -> Option<Vec<&str>> {
    if value.trim().eq_ignore_ascii_case("none") {
        return None;
    }
    Some(
        value
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect(),
    )
}

/// Lookup of one hotel; a destination, when given, must also match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotelFilter {
    pub hotel_id: String,
    pub destination_id: Option<i64>,
}

impl HotelFilter {
    pub fn new(hotel_id: impl Into<String>, destination_id: Option<i64>) -> Self {
        Self {
            hotel_id: hotel_id.into(),
            destination_id,
        }
    }
}

pub fn get_hotel(store: &dyn HotelStore, filter: &HotelFilter) -> Result<Option<HotelResponse>> {
    let hotel = store
        .find(&filter.hotel_id)?
        .filter(|hotel| filter.destination_id.map_or(true, |id| hotel.destination_id == id));

    if hotel.is_none() {
        debug!("No hotel matched {:?}", filter);
    }
    Ok(hotel.map(HotelResponse::from))
}

pub fn get_hotels(store: &dyn HotelStore, filter: &HotelsFilter) -> Result<HotelsResponse> {
    let hotels = store.find_all(filter.hotel_ids.as_deref(), filter.destination_ids.as_deref())?;
    debug!("Query {:?} matched {} hotels", filter, hotels.len());
    Ok(HotelsResponse {
        hotels: hotels.into_iter().map(HotelResponse::from).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::storage::InMemoryHotelStore;

    fn store() -> InMemoryHotelStore {
        let store = InMemoryHotelStore::new();
        store
            .upsert_many(vec![
                Hotel::new("iJhz", 5432, "Beach Villas Singapore", "merged"),
                Hotel::new("SjyX", 5432, "InterContinental Singapore Robertson Quay", "merged"),
                Hotel::new("f8c9", 1122, "Hilton Shinjuku", "merged"),
            ])
            .unwrap();
        store
    }

    #[test]
    fn none_means_no_filter() {
        let filter = HotelsFilter::from_args("none", "NONE").unwrap();
        assert_eq!(filter, HotelsFilter::default());
        assert_eq!(get_hotels(&store(), &filter).unwrap().hotels.len(), 3);
    }

    #[test]
    fn filters_by_ids_and_destinations() {
        let filter = HotelsFilter::from_args("iJhz,f8c9", "5432").unwrap();
        let response = get_hotels(&store(), &filter).unwrap();
        assert_eq!(response.hotels.len(), 1);
        assert_eq!(response.hotels[0].hotel_id, "iJhz");
    }

    #[test]
    fn bad_destination_id_is_rejected() {
        assert!(HotelsFilter::from_args("none", "5432,abc").is_err());
    }

    #[test]
    fn single_hotel_lookup_by_id() {
        let hotel = get_hotel(&store(), &HotelFilter::new("f8c9", None)).unwrap().unwrap();
        assert_eq!(hotel.name, "Hilton Shinjuku");
        assert!(get_hotel(&store(), &HotelFilter::new("nope", None)).unwrap().is_none());
    }

    #[test]
    fn single_hotel_lookup_checks_destination() {
        let store = store();
        assert!(get_hotel(&store, &HotelFilter::new("f8c9", Some(1122))).unwrap().is_some());
        assert!(get_hotel(&store, &HotelFilter::new("f8c9", Some(5432))).unwrap().is_none());
    }

    #[test]
    fn absent_fields_are_written_as_null() {
        let filter = HotelsFilter::from_args("iJhz", "none").unwrap();
        let json = get_hotels(&store(), &filter).unwrap().to_pretty_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value[0]["description"], serde_json::Value::Null);
        assert!(value[0].as_object().unwrap().contains_key("images"));
    }

    #[test]
    fn response_json_omits_source() {
        let filter = HotelsFilter::from_args("iJhz", "none").unwrap();
        let json = get_hotels(&store(), &filter).unwrap().to_pretty_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value[0]["hotel_id"], "iJhz");
        assert!(value[0].get("source").is_none());
    }
}

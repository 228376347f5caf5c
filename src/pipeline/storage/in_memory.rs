use std::sync::{Arc, Mutex};
use tracing::debug;

use super::traits::{HotelStore, RawHotelStore, StoreResult};
use crate::domain::Hotel;
use crate::error::StoreError;

/// In-memory raw record store for development/testing
#[derive(Clone, Default)]
pub struct InMemoryRawHotelStore {
    hotels: Arc<Mutex<Vec<Hotel>>>,
}

impl InMemoryRawHotelStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RawHotelStore for InMemoryRawHotelStore {
    fn upsert(&self, hotel: Hotel) -> StoreResult<()> {
        if hotel.is_merged() {
            return Err(StoreError::InvalidRecord(format!(
                "merged record '{}' cannot be stored as raw data",
                hotel.hotel_id
            )));
        }

        let mut hotels = self.hotels.lock()?;
        match hotels
            .iter_mut()
            .find(|h| h.hotel_id == hotel.hotel_id && h.source == hotel.source)
        {
            Some(existing) => *existing = hotel,
            None => {
                debug!("Stored raw hotel {} from {}", hotel.hotel_id, hotel.source);
                hotels.push(hotel);
            }
        }
        Ok(())
    }

    fn find_all(&self, hotel_ids: &[String]) -> StoreResult<Vec<Hotel>> {
        let hotels = self.hotels.lock()?;
        Ok(hotels
            .iter()
            .filter(|h| hotel_ids.contains(&h.hotel_id))
            .cloned()
            .collect())
    }

    fn len(&self) -> StoreResult<usize> {
        Ok(self.hotels.lock()?.len())
    }
}

/// In-memory canonical store keyed by hotel id, in first-insertion order
#[derive(Clone, Default)]
pub struct InMemoryHotelStore {
    hotels: Arc<Mutex<Vec<Hotel>>>,
}

impl InMemoryHotelStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HotelStore for InMemoryHotelStore {
    fn upsert(&self, hotel: Hotel) -> StoreResult<()> {
        let mut hotels = self.hotels.lock()?;
        match hotels.iter_mut().find(|h| h.hotel_id == hotel.hotel_id) {
            Some(existing) => *existing = hotel,
            None => hotels.push(hotel),
        }
        Ok(())
    }

    fn find(&self, hotel_id: &str) -> StoreResult<Option<Hotel>> {
        let hotels = self.hotels.lock()?;
        Ok(hotels.iter().find(|h| h.hotel_id == hotel_id).cloned())
    }

    fn find_all(
        &self,
        hotel_ids: Option<&[String]>,
        destination_ids: Option<&[i64]>,
    ) -> StoreResult<Vec<Hotel>> {
        let hotels = self.hotels.lock()?;
        Ok(hotels
            .iter()
            .filter(|h| hotel_ids.map_or(true, |ids| ids.contains(&h.hotel_id)))
            .filter(|h| destination_ids.map_or(true, |ids| ids.contains(&h.destination_id)))
            .cloned()
            .collect())
    }

    fn len(&self) -> StoreResult<usize> {
        Ok(self.hotels.lock()?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_store_keeps_one_record_per_id_and_source() {
        let store = InMemoryRawHotelStore::new();
        store.upsert(Hotel::new("iJhz", 5432, "Beach", "acme")).unwrap();
        store.upsert(Hotel::new("iJhz", 5432, "Beach Villas", "patagonia")).unwrap();
        store.upsert(Hotel::new("iJhz", 5432, "Beach Villas SG", "acme")).unwrap();
        store.upsert(Hotel::new("SjyX", 5432, "InterContinental", "acme")).unwrap();

        assert_eq!(store.len().unwrap(), 3);
        let found = store.find_all(&["iJhz".to_string()]).unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].source, "acme");
        assert_eq!(found[0].name, "Beach Villas SG");
    }

    #[test]
    fn raw_store_rejects_merged_records() {
        let store = InMemoryRawHotelStore::new();
        let result = store.upsert(Hotel::new("iJhz", 5432, "Beach", "merged"));
        assert!(matches!(result, Err(StoreError::InvalidRecord(_))));
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn hotel_store_filters_combine() {
        let store = InMemoryHotelStore::new();
        store
            .upsert_many(vec![
                Hotel::new("iJhz", 5432, "Beach Villas", "merged"),
                Hotel::new("SjyX", 5432, "InterContinental", "merged"),
                Hotel::new("f8c9", 1122, "Hilton Tokyo", "merged"),
            ])
            .unwrap();

        assert_eq!(store.find_all(None, None).unwrap().len(), 3);
        assert_eq!(store.find_all(None, Some(&[5432])).unwrap().len(), 2);

        let ids = vec!["iJhz".to_string(), "f8c9".to_string()];
        let found = store.find_all(Some(&ids), Some(&[5432])).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].hotel_id, "iJhz");
    }

    #[test]
    fn hotel_store_upsert_replaces() {
        let store = InMemoryHotelStore::new();
        store.upsert(Hotel::new("iJhz", 5432, "Beach", "merged")).unwrap();
        store.upsert(Hotel::new("iJhz", 5432, "Beach Villas", "merged")).unwrap();

        assert_eq!(store.len().unwrap(), 1);
        assert_eq!(store.find("iJhz").unwrap().unwrap().name, "Beach Villas");
        assert_eq!(store.find("none").unwrap(), None);
    }
}

use crate::domain::Hotel;
use crate::error::StoreError;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Normalized per-supplier records, one per `(hotel_id, source)`.
///
/// Reconciliation only reads from it; the normalization step writes.
pub trait RawHotelStore: Send + Sync {
    /// Insert or replace the record for the hotel's `(hotel_id, source)`
    fn upsert(&self, hotel: Hotel) -> StoreResult<()>;

    fn upsert_many(&self, hotels: Vec<Hotel>) -> StoreResult<usize> {
        let count = hotels.len();
        for hotel in hotels {
            self.upsert(hotel)?;
        }
        Ok(count)
    }

    /// Every stored record whose id is in `hotel_ids`, in insertion order
    fn find_all(&self, hotel_ids: &[String]) -> StoreResult<Vec<Hotel>>;

    fn len(&self) -> StoreResult<usize>;

    fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }
}

/// Canonical merged records, one per `hotel_id`
pub trait HotelStore: Send + Sync {
    fn upsert(&self, hotel: Hotel) -> StoreResult<()>;

    fn upsert_many(&self, hotels: Vec<Hotel>) -> StoreResult<usize> {
        let count = hotels.len();
        for hotel in hotels {
            self.upsert(hotel)?;
        }
        Ok(count)
    }

    fn find(&self, hotel_id: &str) -> StoreResult<Option<Hotel>>;

    /// Records matching both filters; `None` matches everything
    fn find_all(
        &self,
        hotel_ids: Option<&[String]>,
        destination_ids: Option<&[i64]>,
    ) -> StoreResult<Vec<Hotel>>;

    fn len(&self) -> StoreResult<usize>;
}

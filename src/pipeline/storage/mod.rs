pub mod in_memory;
pub mod traits;

pub use in_memory::{InMemoryHotelStore, InMemoryRawHotelStore};
pub use traits::{HotelStore, RawHotelStore, StoreResult};

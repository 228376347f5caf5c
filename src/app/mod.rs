pub mod hotel_service;
pub mod ports;

pub use hotel_service::{HotelService, RefreshSummary};

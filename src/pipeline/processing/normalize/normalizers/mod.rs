// Base trait for attribute normalizers
pub mod base;

// Individual normalizer implementations
pub mod amenities;
pub mod images;
pub mod location;
pub mod text;

// Re-export the main components
pub use amenities::AmenitiesNormalizer;
pub use base::AttributeNormalizer;
pub use images::ImagesNormalizer;
pub use location::LocationNormalizer;
pub use text::{BookingConditionsNormalizer, DescriptionNormalizer, NameNormalizer};

//! Per-attribute reconciliation of one entity's candidate values.

pub mod amenities;
pub mod booking_conditions;
pub mod images;
pub mod location;
pub mod registry;
pub mod text;

pub use amenities::AmenitiesMerger;
pub use booking_conditions::BookingConditionsMerger;
pub use images::ImagesMerger;
pub use location::LocationMerger;
pub use registry::{FieldMerger, MergerRegistry};
pub use text::TextMerger;

use crate::domain::{HotelField, SourceTagged};
use crate::error::MergeError;

/// Reduces the source-tagged values of one attribute for one entity.
///
/// Candidates without a value are skipped. `Ok(None)` means no candidate
/// supplied the attribute; it is never returned for an error.
pub trait AttributeMerger: Send + Sync {
    type Value;

    fn field(&self) -> HotelField;

    fn merge(
        &self,
        candidates: &[SourceTagged<'_, Self::Value>],
    ) -> Result<Option<Self::Value>, MergeError>;
}

/// Append every element not already present, keeping first-seen order
pub(crate) fn extend_unique<'a, I>(merged: &mut Vec<String>, values: I)
where
    I: IntoIterator<Item = &'a String>,
{
    for value in values {
        if !merged.contains(value) {
            merged.push(value.clone());
        }
    }
}

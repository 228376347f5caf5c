use super::{extend_unique, AttributeMerger};
use crate::domain::{Amenities, HotelField, SourceTagged};
use crate::error::MergeError;

/// Ordered, duplicate-free union of the general and room amenity lists
#[derive(Debug, Clone, Copy, Default)]
pub struct AmenitiesMerger;

impl AmenitiesMerger {
    pub fn new() -> Self {
        Self
    }
}

fn union<'a>(lists: impl Iterator<Item = Option<&'a Vec<String>>>) -> Option<Vec<String>> {
    let mut merged: Option<Vec<String>> = None;
    for list in lists.flatten() {
        extend_unique(merged.get_or_insert_with(Vec::new), list);
    }
    merged
}

impl AttributeMerger for AmenitiesMerger {
    type Value = Amenities;

    fn field(&self) -> HotelField {
        HotelField::Amenities
    }

    fn merge(&self, candidates: &[SourceTagged<'_, Amenities>]) -> Result<Option<Amenities>, MergeError> {
        let present: Vec<&Amenities> = candidates.iter().filter_map(|c| c.value).collect();
        if present.is_empty() {
            return Ok(None);
        }

        Ok(Some(Amenities {
            general: union(present.iter().map(|a| a.general.as_ref())),
            room: union(present.iter().map(|a| a.room.as_ref())),
        }))
    }
}

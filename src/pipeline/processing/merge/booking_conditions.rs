use super::{extend_unique, AttributeMerger};
use crate::domain::{HotelField, SourceTagged};
use crate::error::MergeError;

/// Ordered union of booking conditions; empty strings are dropped
#[derive(Debug, Clone, Copy, Default)]
pub struct BookingConditionsMerger;

impl BookingConditionsMerger {
    pub fn new() -> Self {
        Self
    }
}

impl AttributeMerger for BookingConditionsMerger {
    type Value = Vec<String>;

    fn field(&self) -> HotelField {
        HotelField::BookingConditions
    }

    fn merge(
        &self,
        candidates: &[SourceTagged<'_, Vec<String>>],
    ) -> Result<Option<Vec<String>>, MergeError> {
        let mut merged: Option<Vec<String>> = None;
        for conditions in candidates.iter().filter_map(|c| c.value) {
            let target = merged.get_or_insert_with(Vec::new);
            extend_unique(target, conditions.iter().filter(|c| !c.is_empty()));
        }
        Ok(merged)
    }
}

use super::AttributeMerger;
use crate::domain::{HotelField, Location, SourceTagged};
use crate::error::MergeError;

/// Field-by-field union of locations.
///
/// The first non-absent value fills a field; later text values replace it
/// only when strictly longer. Coordinates keep the first value seen.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocationMerger;

impl LocationMerger {
    pub fn new() -> Self {
        Self
    }
}

fn keep_longer(current: &mut Option<String>, candidate: &Option<String>) {
    match (current.as_ref(), candidate) {
        (_, None) => {}
        (None, Some(value)) => *current = Some(value.clone()),
        (Some(existing), Some(value)) => {
            if value.chars().count() > existing.chars().count() {
                *current = Some(value.clone());
            }
        }
    }
}

fn keep_first(current: &mut Option<f64>, candidate: Option<f64>) {
    if current.is_none() {
        *current = candidate;
    }
}

impl AttributeMerger for LocationMerger {
    type Value = Location;

    fn field(&self) -> HotelField {
        HotelField::Location
    }

    fn merge(&self, candidates: &[SourceTagged<'_, Location>]) -> Result<Option<Location>, MergeError> {
        let mut merged: Option<Location> = None;

        for location in candidates.iter().filter_map(|c| c.value) {
            let target = merged.get_or_insert_with(Location::default);
            keep_longer(&mut target.address, &location.address);
            keep_longer(&mut target.city, &location.city);
            keep_longer(&mut target.country, &location.country);
            keep_longer(&mut target.postal_code, &location.postal_code);
            keep_first(&mut target.latitude, location.latitude);
            keep_first(&mut target.longitude, location.longitude);
        }

        Ok(merged)
    }
}

use std::collections::BTreeMap;
use std::sync::Arc;

use super::{
    AmenitiesMerger, AttributeMerger, BookingConditionsMerger, ImagesMerger, LocationMerger,
    TextMerger,
};
use crate::domain::{Hotel, HotelField, SourceTagged};
use crate::error::MergeError;
use crate::pipeline::processing::bias::BiasTable;

/// One merger per attribute kind.
///
/// Each variant knows how to read its attribute off every record of a group
/// and write the merged value onto the output record.
#[derive(Debug, Clone)]
pub enum FieldMerger {
    Name(TextMerger),
    Description(TextMerger),
    Location(LocationMerger),
    Amenities(AmenitiesMerger),
    Images(ImagesMerger),
    BookingConditions(BookingConditionsMerger),
}

fn tagged<'a, T>(group: &'a [Hotel], value: impl Fn(&'a Hotel) -> Option<&'a T>) -> Vec<SourceTagged<'a, T>> {
    group
        .iter()
        .map(|hotel| SourceTagged::new(value(hotel), &hotel.source))
        .collect()
}

impl FieldMerger {
    pub fn field(&self) -> HotelField {
        match self {
            FieldMerger::Name(_) => HotelField::Name,
            FieldMerger::Description(_) => HotelField::Description,
            FieldMerger::Location(_) => HotelField::Location,
            FieldMerger::Amenities(_) => HotelField::Amenities,
            FieldMerger::Images(_) => HotelField::Images,
            FieldMerger::BookingConditions(_) => HotelField::BookingConditions,
        }
    }

    /// Merge this attribute across `group` and store the result on `target`
    pub fn apply(&self, group: &[Hotel], target: &mut Hotel) -> Result<(), MergeError> {
        match self {
            FieldMerger::Name(merger) => {
                let candidates = tagged(group, |h| Some(&h.name).filter(|name| !name.is_empty()));
                target.name = merger
                    .merge(&candidates)?
                    .ok_or_else(|| MergeError::new(HotelField::Name, "no record in the group has a name"))?;
            }
            FieldMerger::Description(merger) => {
                target.description = merger.merge(&tagged(group, |h| h.description.as_ref()))?;
            }
            FieldMerger::Location(merger) => {
                target.location = merger.merge(&tagged(group, |h| h.location.as_ref()))?;
            }
            FieldMerger::Amenities(merger) => {
                target.amenities = merger.merge(&tagged(group, |h| h.amenities.as_ref()))?;
            }
            FieldMerger::Images(merger) => {
                target.images = merger.merge(&tagged(group, |h| h.images.as_ref()))?;
            }
            FieldMerger::BookingConditions(merger) => {
                target.booking_conditions = merger.merge(&tagged(group, |h| h.booking_conditions.as_ref()))?;
            }
        }
        Ok(())
    }
}

/// Mapping from attribute to the merger that reconciles it
#[derive(Debug, Clone, Default)]
pub struct MergerRegistry {
    mergers: BTreeMap<HotelField, FieldMerger>,
}

impl MergerRegistry {
    /// Registry with a merger for every attribute
    pub fn new(bias: Arc<BiasTable>) -> Self {
        let mut registry = Self::default();
        registry.register(FieldMerger::Name(TextMerger::name(bias.clone())));
        registry.register(FieldMerger::Description(TextMerger::description(bias)));
        registry.register(FieldMerger::Location(LocationMerger::new()));
        registry.register(FieldMerger::Amenities(AmenitiesMerger::new()));
        registry.register(FieldMerger::Images(ImagesMerger::new()));
        registry.register(FieldMerger::BookingConditions(BookingConditionsMerger::new()));
        registry
    }

    /// Register a merger, replacing any existing one for the same attribute
    pub fn register(&mut self, merger: FieldMerger) {
        self.mergers.insert(merger.field(), merger);
    }

    pub fn get(&self, field: HotelField) -> Option<&FieldMerger> {
        self.mergers.get(&field)
    }

    pub fn fields(&self) -> Vec<HotelField> {
        self.mergers.keys().copied().collect()
    }

    /// Mergers in attribute order
    pub fn iter(&self) -> impl Iterator<Item = &FieldMerger> {
        self.mergers.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Amenities, Image, HotelImages};

    fn registry() -> MergerRegistry {
        MergerRegistry::new(Arc::new(BiasTable::single_factor(
            "confidence_level",
            [("acme", 0.9), ("paperflies", 0.6)],
        )))
    }

    #[test]
    fn default_registry_covers_every_field() {
        assert_eq!(registry().fields(), HotelField::ALL.to_vec());
    }

    #[test]
    fn apply_writes_merged_value_onto_target() {
        let mut acme = Hotel::new("iJhz", 5432, "Beach Villas", "acme");
        acme.amenities = Some(Amenities {
            general: Some(vec!["pool".into()]),
            room: None,
        });
        let mut paperflies = Hotel::new("iJhz", 5432, "Beach Villas Singapore", "paperflies");
        paperflies.amenities = Some(Amenities {
            general: Some(vec!["pool".into(), "wifi".into()]),
            room: Some(vec!["tv".into()]),
        });
        let group = vec![acme, paperflies];
        let mut target = Hotel::new("iJhz", 5432, "", "merged");

        for merger in registry().iter() {
            merger.apply(&group, &mut target).unwrap();
        }

        assert_eq!(target.name, "Beach Villas");
        let amenities = target.amenities.unwrap();
        assert_eq!(amenities.general, Some(vec!["pool".to_string(), "wifi".to_string()]));
        assert_eq!(amenities.room, Some(vec!["tv".to_string()]));
        assert_eq!(target.description, None);
    }

    #[test]
    fn empty_names_are_not_candidates() {
        let group = vec![Hotel::new("iJhz", 5432, "", "acme")];
        let mut target = Hotel::new("iJhz", 5432, "", "merged");
        let err = registry()
            .get(HotelField::Name)
            .unwrap()
            .apply(&group, &mut target)
            .unwrap_err();
        assert_eq!(err.field, HotelField::Name);
    }

    #[test]
    fn image_error_propagates_from_apply() {
        let mut hotel = Hotel::new("iJhz", 5432, "Beach Villas", "patagonia");
        hotel.images = Some(HotelImages {
            amenities: Some(vec![Image {
                link: "not a url".into(),
                description: None,
            }]),
            ..HotelImages::default()
        });
        let mut target = Hotel::new("iJhz", 5432, "", "merged");

        let result = registry()
            .get(HotelField::Images)
            .unwrap()
            .apply(&[hotel], &mut target);
        assert!(result.is_err());
    }

    #[test]
    fn register_replaces_by_field() {
        let mut registry = registry();
        registry.register(FieldMerger::Location(LocationMerger::new()));
        assert_eq!(registry.fields().len(), 6);
    }
}

use std::collections::HashMap;

use super::AttributeMerger;
use crate::domain::{validate_link, HotelField, HotelImages, Image, SourceTagged};
use crate::error::MergeError;

/// Deduplicates each image list by link, keeping the longest description.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImagesMerger;

impl ImagesMerger {
    pub fn new() -> Self {
        Self
    }

    fn merge_list<'a>(
        &self,
        lists: impl Iterator<Item = Option<&'a Vec<Image>>>,
    ) -> Result<Option<Vec<Image>>, MergeError> {
        let mut merged: Option<Vec<Image>> = None;
        let mut by_link: HashMap<&str, usize> = HashMap::new();

        for list in lists.flatten() {
            let kept = merged.get_or_insert_with(Vec::new);
            for image in list {
                validate_link(&image.link).map_err(|reason| MergeError::new(HotelField::Images, reason))?;

                match by_link.get(image.link.as_str()).copied() {
                    None => {
                        by_link.insert(image.link.as_str(), kept.len());
                        kept.push(image.clone());
                    }
                    Some(position) => {
                        let existing = &mut kept[position];
                        if let Some(description) = &image.description {
                            let longer = existing
                                .description
                                .as_ref()
                                .map_or(true, |current| description.chars().count() > current.chars().count());
                            if longer {
                                existing.description = Some(description.clone());
                            }
                        }
                    }
                }
            }
        }

        Ok(merged)
    }
}

impl AttributeMerger for ImagesMerger {
    type Value = HotelImages;

    fn field(&self) -> HotelField {
        HotelField::Images
    }

    fn merge(&self, candidates: &[SourceTagged<'_, HotelImages>]) -> Result<Option<HotelImages>, MergeError> {
        let present: Vec<&HotelImages> = candidates.iter().filter_map(|c| c.value).collect();
        if present.is_empty() {
            return Ok(None);
        }

        Ok(Some(HotelImages {
            rooms: self.merge_list(present.iter().map(|i| i.rooms.as_ref()))?,
            site: self.merge_list(present.iter().map(|i| i.site.as_ref()))?,
            amenities: self.merge_list(present.iter().map(|i| i.amenities.as_ref()))?,
        }))
    }
}

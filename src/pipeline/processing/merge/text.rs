use std::sync::Arc;

use super::AttributeMerger;
use crate::domain::{HotelField, SourceTagged};
use crate::error::MergeError;
use crate::pipeline::processing::bias::BiasTable;

/// Merges a scalar text attribute (name or description).
///
/// The candidate from the most trusted source wins. Between equally trusted
/// sources the strictly longer value wins, so the earlier candidate keeps a tie.
#[derive(Debug, Clone)]
pub struct TextMerger {
    field: HotelField,
    bias: Arc<BiasTable>,
}

impl TextMerger {
    pub fn new(field: HotelField, bias: Arc<BiasTable>) -> Self {
        Self { field, bias }
    }

    pub fn name(bias: Arc<BiasTable>) -> Self {
        Self::new(HotelField::Name, bias)
    }

    pub fn description(bias: Arc<BiasTable>) -> Self {
        Self::new(HotelField::Description, bias)
    }
}

impl AttributeMerger for TextMerger {
    type Value = String;

    fn field(&self) -> HotelField {
        self.field
    }

    fn merge(&self, candidates: &[SourceTagged<'_, String>]) -> Result<Option<String>, MergeError> {
        let mut best: Option<(&String, &str)> = None;

        for candidate in candidates {
            let Some(value) = candidate.value else {
                continue;
            };

            best = match best {
                Some((current, source)) if !current.is_empty() => {
                    let compare = self.bias.compare_bias(Some(source), Some(candidate.source));
                    if compare < 0.0
                        || (compare == 0.0 && value.chars().count() > current.chars().count())
                    {
                        Some((value, candidate.source))
                    } else {
                        Some((current, source))
                    }
                }
                _ => Some((value, candidate.source)),
            };
        }

        Ok(best.map(|(value, _)| value.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bias() -> Arc<BiasTable> {
        Arc::new(BiasTable::single_factor(
            "confidence_level",
            [("acme", 0.9), ("patagonia", 0.9), ("paperflies", 0.6)],
        ))
    }

    fn tagged<'a>(value: &'a String, source: &'a str) -> SourceTagged<'a, String> {
        SourceTagged::new(Some(value), source)
    }

    #[test]
    fn higher_bias_wins_over_longer_value() {
        let short = "Hotel A".to_string();
        let long = "Hotel Alpha".to_string();
        let merger = TextMerger::name(bias());

        let merged = merger
            .merge(&[tagged(&long, "paperflies"), tagged(&short, "acme")])
            .unwrap();
        assert_eq!(merged.as_deref(), Some("Hotel A"));

        let merged = merger
            .merge(&[tagged(&short, "paperflies"), tagged(&long, "acme")])
            .unwrap();
        assert_eq!(merged.as_deref(), Some("Hotel Alpha"));
    }

    #[test]
    fn longer_value_wins_on_equal_bias() {
        let short = "Villas".to_string();
        let long = "Beach Villas".to_string();
        let merged = TextMerger::name(bias())
            .merge(&[tagged(&short, "acme"), tagged(&long, "patagonia")])
            .unwrap();
        assert_eq!(merged.as_deref(), Some("Beach Villas"));
    }

    #[test]
    fn equal_length_tie_keeps_first() {
        let first = "Villas A".to_string();
        let second = "Villas B".to_string();
        let merged = TextMerger::description(bias())
            .merge(&[tagged(&first, "acme"), tagged(&second, "patagonia")])
            .unwrap();
        assert_eq!(merged.as_deref(), Some("Villas A"));
    }

    #[test]
    fn empty_best_is_replaced_regardless_of_bias() {
        let empty = String::new();
        let text = "Beach".to_string();
        let merged = TextMerger::description(bias())
            .merge(&[tagged(&empty, "acme"), tagged(&text, "paperflies")])
            .unwrap();
        assert_eq!(merged.as_deref(), Some("Beach"));
    }

    #[test]
    fn unscored_source_loses_to_scored_one() {
        let scored = "Beach".to_string();
        let unscored = "Beach Villas Singapore".to_string();
        let merged = TextMerger::description(bias())
            .merge(&[tagged(&scored, "paperflies"), tagged(&unscored, "unknown")])
            .unwrap();
        assert_eq!(merged.as_deref(), Some("Beach"));
    }

    #[test]
    fn absent_values_are_skipped() {
        let text = "Beach".to_string();
        let merged = TextMerger::description(bias())
            .merge(&[SourceTagged::new(None, "acme"), tagged(&text, "paperflies")])
            .unwrap();
        assert_eq!(merged.as_deref(), Some("Beach"));
    }

    #[test]
    fn no_candidates_gives_absent_value_for_every_field() {
        let candidates: Vec<SourceTagged<'_, String>> = vec![SourceTagged::new(None, "acme")];
        assert_eq!(TextMerger::description(bias()).merge(&candidates), Ok(None));
        assert_eq!(TextMerger::name(bias()).merge(&candidates), Ok(None));
        assert_eq!(TextMerger::name(bias()).merge(&[]), Ok(None));
    }

    #[test]
    fn merged_value_alone_is_returned_unchanged() {
        let value = "Beach Villas Singapore".to_string();
        let merged = TextMerger::name(bias()).merge(&[tagged(&value, "merged")]).unwrap();
        assert_eq!(merged, Some(value));
    }
}

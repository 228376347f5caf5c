use thiserror::Error;

use crate::domain::HotelField;

#[derive(Error, Debug)]
pub enum HotelError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid field '{field}': {message}")]
    InvalidField { field: String, message: String },

    #[error("API error: {message}")]
    Api { message: String },

    #[error(transparent)]
    Normalization(#[from] NormalizationError),

    #[error(transparent)]
    Merge(#[from] MergeError),

    #[error(transparent)]
    Bias(#[from] BiasError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, HotelError>;

/// A single attribute of a single record could not be cleaned.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("failed to normalize field '{field}' of hotel '{hotel_id}' from '{source_id}': {reason}")]
pub struct NormalizationError {
    pub hotel_id: String,
    pub source_id: String,
    pub field: HotelField,
    pub reason: String,
}

/// A single attribute of a single entity group could not be reconciled.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("failed to merge field '{field}' of hotel '{}': {reason}", .hotel_id.as_deref().unwrap_or("<unknown>"))]
pub struct MergeError {
    pub hotel_id: Option<String>,
    pub field: HotelField,
    pub reason: String,
}

impl MergeError {
    pub fn new(field: HotelField, reason: impl Into<String>) -> Self {
        Self {
            hotel_id: None,
            field,
            reason: reason.into(),
        }
    }

    /// Attach the identity key of the group being merged.
    pub fn for_hotel(mut self, hotel_id: impl Into<String>) -> Self {
        self.hotel_id = Some(hotel_id.into());
        self
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BiasError {
    #[error("bias factor '{0}' is not configured")]
    UnknownFactor(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("store lock poisoned: {0}")]
    Poisoned(String),

    #[error("invalid record: {0}")]
    InvalidRecord(String),
}

impl<T> From<std::sync::PoisonError<T>> for StoreError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        StoreError::Poisoned(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_error_names_hotel_and_field() {
        let err = MergeError::new(HotelField::Images, "missing link").for_hotel("iJhz");
        assert_eq!(
            err.to_string(),
            "failed to merge field 'images' of hotel 'iJhz': missing link"
        );
    }

    #[test]
    fn merge_error_without_hotel_is_still_printable() {
        let err = MergeError::new(HotelField::Name, "no name");
        assert!(err.to_string().contains("<unknown>"));
    }

    #[test]
    fn component_errors_convert_into_hotel_error() {
        let err: HotelError = BiasError::UnknownFactor("speed".into()).into();
        assert!(matches!(err, HotelError::Bias(BiasError::UnknownFactor(_))));
    }
}

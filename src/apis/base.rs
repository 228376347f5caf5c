use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::app::ports::HttpClientPort;
use crate::domain::{Hotel, Image, Location};
use crate::error::{HotelError, Result};
use crate::observability::metrics;

/// A hotel data supplier: where to fetch from and how to read one item
#[async_trait]
pub trait Supplier: Send + Sync {
    fn name(&self) -> &str;

    fn endpoint(&self) -> &str;

    /// Convert one item of the supplier's payload into a hotel record
    fn parse(&self, item: &Value) -> Result<Hotel>;

    /// Fetch the endpoint and parse every item.
    ///
    /// Items that fail to parse are logged and dropped.
    async fn fetch(&self, http: &dyn HttpClientPort) -> Result<Vec<Hotel>> {
        let url = self.endpoint();
        info!("Fetching data from {}", url);

        let response = http.get(url).await.map_err(|message| HotelError::Api {
            message: format!("request to {} failed: {}", url, message),
        })?;

        if response.status != 200 {
            return Err(HotelError::Api {
                message: format!("{} returned status {}", url, response.status),
            });
        }

        let body: Value = serde_json::from_slice(&response.bytes)?;
        let Value::Array(items) = body else {
            return Err(HotelError::Api {
                message: format!("{} did not return a JSON array", url),
            });
        };

        let mut hotels = Vec::with_capacity(items.len());
        for item in &items {
            match self.parse(item) {
                Ok(hotel) => hotels.push(hotel),
                Err(e) => {
                    metrics::suppliers::item_rejected(self.name());
                    warn!("Failed to parse item from {}: {}", self.name(), e);
                }
            }
        }

        debug!("Parsed {} of {} items from {}", hotels.len(), items.len(), self.name());
        Ok(hotels)
    }
}

pub(crate) fn required_str(item: &Value, key: &str) -> Result<String> {
    match item.get(key) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Null) | None => Err(HotelError::MissingField(key.to_string())),
        Some(other) => Err(HotelError::InvalidField {
            field: key.to_string(),
            message: format!("expected a string, got {}", other),
        }),
    }
}

pub(crate) fn required_i64(item: &Value, key: &str) -> Result<i64> {
    match item.get(key) {
        Some(Value::Number(n)) => n.as_i64().ok_or_else(|| HotelError::InvalidField {
            field: key.to_string(),
            message: format!("{} is not an integer", n),
        }),
        Some(Value::String(s)) => s.trim().parse().map_err(|_| HotelError::InvalidField {
            field: key.to_string(),
            message: format!("'{}' is not an integer", s),
        }),
        Some(Value::Null) | None => Err(HotelError::MissingField(key.to_string())),
        Some(other) => Err(HotelError::InvalidField {
            field: key.to_string(),
            message: format!("expected an integer, got {}", other),
        }),
    }
}

/// Optional text; values of another type are dropped with a warning
pub(crate) fn optional_str(item: &Value, key: &str) -> Option<String> {
    match item.get(key) {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Null) | None => None,
        Some(other) => {
            warn!("Ignoring non-string value for '{}': {}", key, other);
            None
        }
    }
}

/// Optional coordinate given as a number or numeric string
pub(crate) fn optional_f64(item: &Value, key: &str) -> Option<f64> {
    match item.get(key) {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) if s.trim().is_empty() => None,
        Some(Value::String(s)) => s.trim().parse().ok().or_else(|| {
            warn!("Ignoring non-numeric value for '{}': {}", key, s);
            None
        }),
        Some(Value::Null) | None => None,
        Some(other) => {
            warn!("Ignoring non-numeric value for '{}': {}", key, other);
            None
        }
    }
}

/// Optional list of strings; non-string entries are dropped with a warning
pub(crate) fn string_list(item: Option<&Value>, key: &str) -> Option<Vec<String>> {
    match item.and_then(|i| i.get(key)) {
        Some(Value::Array(values)) => Some(
            values
                .iter()
                .filter_map(|v| match v {
                    Value::String(s) => Some(s.clone()),
                    other => {
                        warn!("Ignoring non-string entry in '{}': {}", key, other);
                        None
                    }
                })
                .collect(),
        ),
        Some(Value::Null) | None => None,
        Some(other) => {
            warn!("Ignoring non-list value for '{}': {}", key, other);
            None
        }
    }
}

/// Optional list of images read from `link_key`/`description_key` objects
pub(crate) fn image_list(
    item: Option<&Value>,
    key: &str,
    link_key: &str,
    description_key: &str,
) -> Result<Option<Vec<Image>>> {
    let Some(entries) = item.and_then(|i| i.get(key)).and_then(Value::as_array) else {
        return Ok(None);
    };

    entries
        .iter()
        .map(|entry| Image::new(required_str(entry, link_key)?, optional_str(entry, description_key)))
        .collect::<Result<Vec<_>>>()
        .map(Some)
}

/// Drop a location with nothing in it
pub(crate) fn location_or_none(location: Location) -> Option<Location> {
    let location = location.sanitized();
    (!location.is_empty()).then_some(location)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn destination_id_accepts_number_or_numeric_string() {
        assert_eq!(required_i64(&json!({ "d": 5432 }), "d").unwrap(), 5432);
        assert_eq!(required_i64(&json!({ "d": " 5432" }), "d").unwrap(), 5432);
        assert!(matches!(required_i64(&json!({}), "d"), Err(HotelError::MissingField(_))));
        assert!(required_i64(&json!({ "d": "abc" }), "d").is_err());
    }

    #[test]
    fn non_string_values_are_dropped() {
        let item = json!({ "name": 42, "tags": ["pool", 3, "wifi"] });
        assert_eq!(optional_str(&item, "name"), None);
        assert_eq!(
            string_list(Some(&item), "tags"),
            Some(vec!["pool".to_string(), "wifi".to_string()])
        );
    }

    #[test]
    fn coordinates_accept_blank_strings() {
        let item = json!({ "lat": "", "lng": 103.8, "alt": "1.5" });
        assert_eq!(optional_f64(&item, "lat"), None);
        assert_eq!(optional_f64(&item, "lng"), Some(103.8));
        assert_eq!(optional_f64(&item, "alt"), Some(1.5));
    }

    #[test]
    fn image_list_rejects_bad_links() {
        let good = json!({ "rooms": [{ "url": "https://x.example/1.jpg", "description": "Double" }] });
        let images = image_list(Some(&good), "rooms", "url", "description").unwrap().unwrap();
        assert_eq!(images[0].description.as_deref(), Some("Double"));

        let bad = json!({ "rooms": [{ "url": "nope" }] });
        assert!(image_list(Some(&bad), "rooms", "url", "description").is_err());
        assert_eq!(image_list(None, "rooms", "url", "description").unwrap(), None);
    }

    #[test]
    fn empty_location_becomes_absent() {
        assert_eq!(location_or_none(Location::default()), None);
        let location = Location {
            city: Some(String::new()),
            country: Some("SG".into()),
            ..Location::default()
        };
        assert_eq!(location_or_none(location).unwrap().city, None);
    }
}

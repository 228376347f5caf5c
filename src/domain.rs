use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::constants::MERGED_SOURCE;
use crate::error::{HotelError, Result};

/// The attributes that take part in normalization and reconciliation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HotelField {
    Name,
    Description,
    Location,
    Amenities,
    Images,
    BookingConditions,
}

impl HotelField {
    pub const ALL: [HotelField; 6] = [
        HotelField::Name,
        HotelField::Description,
        HotelField::Location,
        HotelField::Amenities,
        HotelField::Images,
        HotelField::BookingConditions,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HotelField::Name => "name",
            HotelField::Description => "description",
            HotelField::Location => "location",
            HotelField::Amenities => "amenities",
            HotelField::Images => "images",
            HotelField::BookingConditions => "booking_conditions",
        }
    }
}

impl fmt::Display for HotelField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One hotel as described by a single supplier, or the merged result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotel {
    pub hotel_id: String,
    pub destination_id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub amenities: Option<Amenities>,
    #[serde(default)]
    pub images: Option<HotelImages>,
    #[serde(default)]
    pub booking_conditions: Option<Vec<String>>,
    pub source: String,
}

impl Hotel {
    /// A record with only the required attributes populated
    pub fn new(
        hotel_id: impl Into<String>,
        destination_id: i64,
        name: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            hotel_id: hotel_id.into(),
            destination_id,
            name: name.into(),
            description: None,
            location: None,
            amenities: None,
            images: None,
            booking_conditions: None,
            source: source.into(),
        }
    }

    pub fn is_merged(&self) -> bool {
        self.source == MERGED_SOURCE
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default, deserialize_with = "blank_string_as_none")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "blank_string_as_none")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "blank_string_as_none")]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "blank_string_as_none")]
    pub postal_code: Option<String>,
    #[serde(default, deserialize_with = "blank_number_as_none")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "blank_number_as_none")]
    pub longitude: Option<f64>,
}

impl Location {
    /// Turn empty strings into absent values; `Location` values built in code
    /// should pass through here so they match deserialized ones.
    pub fn sanitized(self) -> Self {
        fn keep(value: Option<String>) -> Option<String> {
            value.filter(|s| !s.is_empty())
        }

        Self {
            address: keep(self.address),
            city: keep(self.city),
            country: keep(self.country),
            postal_code: keep(self.postal_code),
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.address.is_none()
            && self.city.is_none()
            && self.country.is_none()
            && self.postal_code.is_none()
            && self.latitude.is_none()
            && self.longitude.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Amenities {
    #[serde(default)]
    pub general: Option<Vec<String>>,
    #[serde(default)]
    pub room: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HotelImages {
    #[serde(default)]
    pub rooms: Option<Vec<Image>>,
    #[serde(default)]
    pub site: Option<Vec<Image>>,
    #[serde(default)]
    pub amenities: Option<Vec<Image>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub link: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Image {
    /// Build an image entry, rejecting links that are not absolute URLs
    pub fn new(link: impl Into<String>, description: Option<String>) -> Result<Self> {
        let link = link.into();
        validate_link(&link).map_err(|message| HotelError::InvalidField {
            field: "images.link".to_string(),
            message,
        })?;
        Ok(Self { link, description })
    }
}

/// Check that an image link is a well-formed absolute URL
pub fn validate_link(link: &str) -> std::result::Result<(), String> {
    if link.trim().is_empty() {
        return Err("image link is empty".to_string());
    }
    url::Url::parse(link)
        .map(|_| ())
        .map_err(|e| format!("image link '{}' is not a valid URL: {}", link, e))
}

/// An attribute value paired with the supplier that produced it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceTagged<'a, T> {
    pub value: Option<&'a T>,
    pub source: &'a str,
}

impl<'a, T> SourceTagged<'a, T> {
    pub fn new(value: Option<&'a T>, source: &'a str) -> Self {
        Self { value, source }
    }
}

fn blank_string_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

fn blank_number_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrString::Number(n)) => Ok(Some(n)),
        Some(NumberOrString::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(NumberOrString::Text(s)) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

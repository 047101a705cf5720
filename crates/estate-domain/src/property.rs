//! Property listing domain types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pagination::Sort;

/// Error returned when a string names none of an enum's variants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {value:?}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// Lower-case and unify separators so `"Semi Furnished"`, `"semi_furnished"`
/// and `"Semi-Furnished"` compare equal.
pub(crate) fn normalize(s: &str) -> String {
    s.trim()
        .chars()
        .map(|c| match c {
            ' ' | '_' => '-',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

/// Category of a listed property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum PropertyType {
    Apartment,
    House,
    Villa,
    Plot,
    Commercial,
}

impl PropertyType {
    pub const ALL: [Self; 5] = [
        Self::Apartment,
        Self::House,
        Self::Villa,
        Self::Plot,
        Self::Commercial,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Apartment => "Apartment",
            Self::House => "House",
            Self::Villa => "Villa",
            Self::Plot => "Plot",
            Self::Commercial => "Commercial",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        Self::ALL
            .into_iter()
            .find(|v| normalize(v.as_str()) == wanted)
            .ok_or_else(|| UnknownVariant {
                kind: "property type",
                value: s.to_owned(),
            })
    }
}

impl TryFrom<String> for PropertyType {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Furnishing level of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Furnished {
    #[serde(rename = "Unfurnished")]
    Unfurnished,
    #[serde(rename = "Semi-Furnished")]
    SemiFurnished,
    #[serde(rename = "Fully-Furnished")]
    FullyFurnished,
}

impl Furnished {
    pub const ALL: [Self; 3] = [Self::Unfurnished, Self::SemiFurnished, Self::FullyFurnished];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unfurnished => "Unfurnished",
            Self::SemiFurnished => "Semi-Furnished",
            Self::FullyFurnished => "Fully-Furnished",
        }
    }
}

impl fmt::Display for Furnished {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Furnished {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        Self::ALL
            .into_iter()
            .find(|v| normalize(v.as_str()) == wanted)
            .ok_or_else(|| UnknownVariant {
                kind: "furnished status",
                value: s.to_owned(),
            })
    }
}

impl TryFrom<String> for Furnished {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Amenity a property can advertise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Amenity {
    Parking,
    Garden,
    Security,
    Gym,
    Pool,
    Elevator,
}

impl Amenity {
    pub const ALL: [Self; 6] = [
        Self::Parking,
        Self::Garden,
        Self::Security,
        Self::Gym,
        Self::Pool,
        Self::Elevator,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Parking => "Parking",
            Self::Garden => "Garden",
            Self::Security => "Security",
            Self::Gym => "Gym",
            Self::Pool => "Pool",
            Self::Elevator => "Elevator",
        }
    }
}

impl fmt::Display for Amenity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Amenity {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        Self::ALL
            .into_iter()
            .find(|v| normalize(v.as_str()) == wanted)
            .ok_or_else(|| UnknownVariant {
                kind: "amenity",
                value: s.to_owned(),
            })
    }
}

impl TryFrom<String> for Amenity {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Sort order for the `GET /api/properties` listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertySortBy {
    Price(Sort),
    CreatedAt(Sort),
}

impl Default for PropertySortBy {
    fn default() -> Self {
        Self::CreatedAt(Sort::Desc)
    }
}

impl PropertySortBy {
    /// Parse the `sortBy` query value. Unknown values yield `None` so the
    /// caller can fall back to [`PropertySortBy::default`].
    pub fn from_query(s: &str) -> Option<Self> {
        match s.trim() {
            "price-asc" => Some(Self::Price(Sort::Asc)),
            "price-desc" => Some(Self::Price(Sort::Desc)),
            "latest" | "newest" | "created-at-desc" => Some(Self::CreatedAt(Sort::Desc)),
            "oldest" | "created-at-asc" => Some(Self::CreatedAt(Sort::Asc)),
            _ => None,
        }
    }
}

/// Errors from parsing a `"lat,lng"` pair.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordinatesError {
    #[error("expected \"latitude,longitude\"")]
    Format,
    #[error("latitude must be within -90..=90")]
    Latitude,
    #[error("longitude must be within -180..=180")]
    Longitude,
}

/// Geographic position of a property.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinatesError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(CoordinatesError::Latitude);
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinatesError::Longitude);
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

impl FromStr for Coordinates {
    type Err = CoordinatesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lng) = s.split_once(',').ok_or(CoordinatesError::Format)?;
        let latitude = lat
            .trim()
            .parse::<f64>()
            .map_err(|_| CoordinatesError::Format)?;
        let longitude = lng
            .trim()
            .parse::<f64>()
            .map_err(|_| CoordinatesError::Format)?;
        Self::new(latitude, longitude)
    }
}

use serde::{Deserialize, Serialize};

use crate::property::{Amenity, PropertyType};

/// Account role. Stored as `u8` inside access tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    User,
    Admin,
}

impl UserRole {
    pub fn as_u8(self) -> u8 {
        match self {
            Self::User => 0,
            Self::Admin => 1,
        }
    }

    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::User),
            1 => Some(Self::Admin),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }

    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "user" => Some(Self::User),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    pub fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

/// Loyalty tier derived from a user's reward points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RewardTier {
    Bronze,
    Silver,
    Gold,
    Platinum,
}

impl RewardTier {
    /// Thresholds are exclusive: 1000 points is still Bronze.
    pub fn from_points(points: i64) -> Self {
        match points {
            p if p > 10_000 => Self::Platinum,
            p if p > 5_000 => Self::Gold,
            p if p > 1_000 => Self::Silver,
            _ => Self::Bronze,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Search preferences saved on a user profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    pub property_types: Vec<PropertyType>,
    pub locations: Vec<String>,
    pub price_range: Option<PriceRange>,
    pub amenities: Vec<Amenity>,
}

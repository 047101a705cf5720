use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::property::{UnknownVariant, normalize};

/// Category of a point of interest near a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum PlaceKind {
    School,
    Hospital,
    Mall,
    Metro,
    Park,
    Restaurant,
}

impl PlaceKind {
    pub const ALL: [Self; 6] = [
        Self::School,
        Self::Hospital,
        Self::Mall,
        Self::Metro,
        Self::Park,
        Self::Restaurant,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::School => "School",
            Self::Hospital => "Hospital",
            Self::Mall => "Mall",
            Self::Metro => "Metro",
            Self::Park => "Park",
            Self::Restaurant => "Restaurant",
        }
    }
}

impl fmt::Display for PlaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlaceKind {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        Self::ALL
            .into_iter()
            .find(|v| normalize(v.as_str()) == wanted)
            .ok_or_else(|| UnknownVariant {
                kind: "place type",
                value: s.to_owned(),
            })
    }
}

impl TryFrom<String> for PlaceKind {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

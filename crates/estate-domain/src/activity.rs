//! Notification and verification-document vocabularies.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::property::{UnknownVariant, normalize};

/// What a notification is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum NotificationKind {
    #[serde(rename = "Price Drop")]
    PriceDrop,
    #[serde(rename = "New Listing")]
    NewListing,
    Review,
    Message,
}

impl NotificationKind {
    pub const ALL: [Self; 4] = [Self::PriceDrop, Self::NewListing, Self::Review, Self::Message];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::PriceDrop => "Price Drop",
            Self::NewListing => "New Listing",
            Self::Review => "Review",
            Self::Message => "Message",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationKind {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        Self::ALL
            .into_iter()
            .find(|v| normalize(v.as_str()) == wanted)
            .ok_or_else(|| UnknownVariant {
                kind: "notification type",
                value: s.to_owned(),
            })
    }
}

impl TryFrom<String> for NotificationKind {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Kind of document submitted for identity verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum DocumentKind {
    #[serde(rename = "ID")]
    Id,
    Address,
    Income,
}

impl DocumentKind {
    pub const ALL: [Self; 3] = [Self::Id, Self::Address, Self::Income];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::Address => "Address",
            Self::Income => "Income",
        }
    }
}

impl FromStr for DocumentKind {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        Self::ALL
            .into_iter()
            .find(|v| normalize(v.as_str()) == wanted)
            .ok_or_else(|| UnknownVariant {
                kind: "document type",
                value: s.to_owned(),
            })
    }
}

impl TryFrom<String> for DocumentKind {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Review state of a verification document. New uploads start as `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum DocumentStatus {
    #[default]
    Pending,
    Verified,
    Rejected,
}

impl DocumentStatus {
    pub const ALL: [Self; 3] = [Self::Pending, Self::Verified, Self::Rejected];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Verified => "Verified",
            Self::Rejected => "Rejected",
        }
    }
}

impl FromStr for DocumentStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        Self::ALL
            .into_iter()
            .find(|v| normalize(v.as_str()) == wanted)
            .ok_or_else(|| UnknownVariant {
                kind: "document status",
                value: s.to_owned(),
            })
    }
}

impl TryFrom<String> for DocumentStatus {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

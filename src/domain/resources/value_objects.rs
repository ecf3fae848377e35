use derive_more::{Constructor, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display as StrumDisplay, EnumIter, EnumString};

/// Value Object - instant in UTC milliseconds
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    From,
    Into,
    Deref,
    Constructor,
    Serialize,
    Deserialize,
)]
pub struct Timestamp(u64);

impl Timestamp {
    pub fn value(&self) -> u64 {
        self.0
    }

    pub fn from_millis(value: u64) -> Self {
        Self(value)
    }
}

/// Value Object - a calendar day, represented as its UTC midnight in
/// milliseconds. Construct through `time::start_of_day` so the invariant
/// actually holds.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    From,
    Into,
    Serialize,
    Deserialize,
)]
pub struct Day(u64);

impl Day {
    pub fn value(&self) -> u64 {
        self.0
    }

    pub fn as_timestamp(&self) -> Timestamp {
        Timestamp::from_millis(self.0)
    }
}

/// Value Object - stable resource identifier, the canonical key for all
/// set membership and matrix column lookups
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deref, Display, Serialize, Deserialize)]
#[display(fmt = "ResourceId({})", _0)]
pub struct ResourceId(String);

impl ResourceId {
    pub fn new(id: String) -> Result<Self, String> {
        if id.is_empty() {
            return Err("Resource id cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ResourceId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Value Object - resource kind with full autogeneration
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    StrumDisplay,
    EnumIter,
    EnumString,
    AsRefStr,
    Serialize,
    Deserialize,
)]
pub enum ResourceKind {
    #[strum(serialize = "project")]
    #[serde(rename = "project")]
    Project,

    #[strum(serialize = "organization")]
    #[serde(rename = "organization")]
    Organization,
}

/// Value Object - display color hint, assigned externally (hex string)
#[derive(Debug, Clone, PartialEq, Eq, Deref, Display, Serialize, Deserialize)]
#[display(fmt = "{}", _0)]
pub struct Color(String);

impl Color {
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Color {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

use std::fmt;

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

/// Universe object identifier.
///
/// Ordering is significant: candidate sets iterate in ascending id order, which
/// is what every deterministic tie-break in the evaluator relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct ObjectId(pub u32);

/// Empire identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct EmpireId(pub u32);

/// Ship design identifier, references the content registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct DesignId(pub u32);

impl ObjectId {
    /// Create an object ID from a specific value.
    pub fn from_raw(id: u32) -> Self {
        Self(id)
    }

    /// Convert a resolved formula value into an object id.
    ///
    /// Negative, fractional-overflowing or non-finite values name no object.
    pub fn from_value(value: f64) -> Option<Self> {
        whole_number(value).map(Self)
    }
}

impl EmpireId {
    pub fn from_raw(id: u32) -> Self {
        Self(id)
    }

    /// Convert a resolved formula value into an empire id.
    pub fn from_value(value: f64) -> Option<Self> {
        whole_number(value).map(Self)
    }
}

impl DesignId {
    pub fn from_raw(id: u32) -> Self {
        Self(id)
    }

    /// Convert a resolved formula value into a design id.
    pub fn from_value(value: f64) -> Option<Self> {
        whole_number(value).map(Self)
    }
}

fn whole_number(value: f64) -> Option<u32> {
    if !value.is_finite() || value < 0.0 || value > f64::from(u32::MAX) {
        return None;
    }
    Some(value.trunc() as u32)
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for EmpireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for DesignId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

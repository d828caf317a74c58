//! Location areas and their allowed districts.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::LocationError;

/// A backend-defined region with a closed list of valid districts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct LocationArea {
    #[serde(deserialize_with = "crate::utils::string_or_number")]
    pub id: String,
    pub name: String,
    /// Allowed districts, in display order
    #[serde(default)]
    pub strict: Vec<String>,
}

impl LocationArea {
    /// Validate a district name against this area's list (exact match)
    pub fn district(&self, name: &str) -> Result<District, LocationError> {
        self.strict
            .iter()
            .find(|d| d.as_str() == name)
            .map(|d| District(d.clone()))
            .ok_or_else(|| LocationError::DistrictNotInArea {
                area: self.id.clone(),
                district: name.to_string(),
            })
    }

    /// Loose lookup used for geocoder hints: case and surrounding
    /// whitespace are ignored, and the canonical spelling is returned.
    pub fn match_district(&self, hint: &str) -> Option<District> {
        let hint = hint.trim();
        if hint.is_empty() {
            return None;
        }
        let hint = hint.to_lowercase();
        self.strict
            .iter()
            .find(|d| d.to_lowercase() == hint)
            .map(|d| District(d.clone()))
    }

    pub fn contains(&self, district: &District) -> bool {
        self.strict.iter().any(|d| d == district.as_str())
    }

    /// All districts of this area as validated values
    pub fn districts(&self) -> impl Iterator<Item = District> + '_ {
        self.strict.iter().map(|d| District(d.clone()))
    }
}

/// A district name that was validated against a `LocationArea`.
///
/// Deserialization accepts any string so stored records can be read back;
/// the resolver re-validates them against the catalog when hydrating.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct District(String);

impl District {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for District {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

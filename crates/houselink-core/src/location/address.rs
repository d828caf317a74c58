//! Coordinates and the composed address handed to parent forms.

use serde::{Deserialize, Serialize};

use super::District;

/// A validated map coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Returns `None` unless both values are finite and within WGS84 bounds.
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);
        valid.then_some(Self { latitude, longitude })
    }

    /// Address used when reverse geocoding yields nothing: `"lat, lng"` at 6 decimals
    pub fn fallback_label(&self) -> String {
        format!("{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

/// Structured address composed from area/district selection, manual text
/// and reverse geocoding. This is also the persisted `location` shape of
/// properties and user profiles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct ResolvedAddress {
    /// Id of the selected `LocationArea`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_id: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    /// Primary display string
    #[serde(default)]
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub building_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district: Option<District>,

    // Advisory fields from the geocoder; never validated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neighborhood: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district_hint: Option<String>,
}

impl ResolvedAddress {
    pub fn coordinate(&self) -> Option<Coordinate> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Coordinate::new(lat, lng),
            _ => None,
        }
    }

    pub fn has_street(&self) -> bool {
        self.street.as_deref().is_some_and(|s| !s.trim().is_empty())
    }

    /// Area, district, street and a map coordinate are all present.
    pub fn is_complete(&self) -> bool {
        self.location_id.is_some()
            && self.district.is_some()
            && self.has_street()
            && self.coordinate().is_some()
    }

    /// Single-line summary, e.g. "23 Setthathirath Road, Chanthabuly, Vientiane"
    pub fn summary(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        match (self.building_number.as_deref(), self.street.as_deref()) {
            (Some(number), Some(street)) if !street.is_empty() => parts.push(format!("{} {}", number, street)),
            (_, Some(street)) if !street.is_empty() => parts.push(street.to_string()),
            _ if !self.address.is_empty() => parts.push(self.address.clone()),
            _ => {}
        }
        if let Some(ref district) = self.district {
            parts.push(district.to_string());
        }
        if let Some(ref city) = self.city {
            if !city.is_empty() {
                parts.push(city.clone());
            }
        }
        parts.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_validation() {
        assert!(Coordinate::new(17.9757, 102.6331).is_some());
        assert!(Coordinate::new(f64::NAN, 102.0).is_none());
        assert!(Coordinate::new(17.0, f64::INFINITY).is_none());
        assert!(Coordinate::new(f64::NEG_INFINITY, 0.0).is_none());
        assert!(Coordinate::new(91.0, 0.0).is_none());
        assert!(Coordinate::new(0.0, -181.0).is_none());
    }

    #[test]
    fn test_fallback_label() {
        let c = Coordinate::new(17.9757, 102.6331).unwrap();
        assert_eq!(c.fallback_label(), "17.975700, 102.633100");
    }

    #[test]
    fn test_summary() {
        let json = r#"{"address": "Setthathirath Road", "street": "Setthathirath Road", "buildingNumber": "23", "district": "Chanthabuly", "city": "Vientiane"}"#;
        let address: ResolvedAddress = serde_json::from_str(json).unwrap();
        assert_eq!(address.summary(), "23 Setthathirath Road, Chanthabuly, Vientiane");
        assert!(!address.is_complete());
    }
}

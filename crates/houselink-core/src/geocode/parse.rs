//! Parsing of Mapbox geocoding responses.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use super::GeocodeResult;

#[derive(Debug, Deserialize)]
pub(crate) struct FeatureCollection {
    #[serde(default)]
    pub(crate) features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Feature {
    #[serde(default)]
    pub(crate) place_name: String,
    #[serde(default)]
    pub(crate) text: Option<String>,
    #[serde(default)]
    pub(crate) place_type: Vec<String>,
    #[serde(default)]
    pub(crate) context: Vec<ContextEntry>,
}

/// One entry of a feature's `context`, e.g. `{"id": "place.123", "text": "Vientiane"}`
#[derive(Debug, Deserialize)]
pub(crate) struct ContextEntry {
    pub(crate) id: String,
    pub(crate) text: String,
}

impl ContextEntry {
    /// Layer name, the part of the id before the first dot
    fn kind(&self) -> &str {
        self.id.split('.').next().unwrap_or_default()
    }
}

static BUILDING_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s+(.+)$").expect("valid regex"));

/// Split "23 Setthathirath Road" into `(Some("23"), "Setthathirath Road")`.
/// Without leading digits the whole fragment is the street.
pub fn split_building_number(fragment: &str) -> (Option<String>, String) {
    let fragment = fragment.trim();
    match BUILDING_NUMBER_RE.captures(fragment) {
        Some(caps) => (
            caps.get(1).map(|m| m.as_str().to_string()),
            caps.get(2).map(|m| m.as_str().trim().to_string()).unwrap_or_default(),
        ),
        None => (None, fragment.to_string()),
    }
}

impl Feature {
    fn context_text(&self, kind: &str) -> Option<String> {
        self.context
            .iter()
            .find(|c| c.kind() == kind)
            .map(|c| c.text.clone())
            .filter(|t| !t.trim().is_empty())
    }

    fn is_type(&self, kind: &str) -> bool {
        self.place_type.iter().any(|t| t == kind)
    }

    pub(crate) fn into_result(self) -> GeocodeResult {
        let primary = self
            .place_name
            .split(',')
            .next()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .or_else(|| self.text.clone());

        let (building_number, street) = match primary {
            Some(ref fragment) => {
                let (number, street) = split_building_number(fragment);
                (number, Some(street).filter(|s| !s.is_empty()))
            }
            None => (None, None),
        };

        let own_text = || self.text.clone().filter(|t| !t.trim().is_empty());
        let neighborhood = self
            .context_text("neighborhood")
            .or_else(|| self.context_text("locality"))
            .or_else(|| if self.is_type("neighborhood") { own_text() } else { None });
        let city = self
            .context_text("place")
            .or_else(|| if self.is_type("place") { own_text() } else { None });
        let district_hint = self
            .context_text("district")
            .or_else(|| self.context_text("locality"));

        GeocodeResult {
            street,
            building_number,
            neighborhood,
            city,
            province: self.context_text("region"),
            country: self.context_text("country"),
            postal_code: self.context_text("postcode"),
            district_hint,
            place_name: self.place_name,
        }
    }
}

/// Parse a geocoding response body; `None` when it has no features.
pub(crate) fn parse_response(body: &str) -> Result<Option<GeocodeResult>, serde_json::Error> {
    let collection: FeatureCollection = serde_json::from_str(body)?;
    Ok(collection.features.into_iter().next().map(Feature::into_result))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_building_number() {
        assert_eq!(
            split_building_number("23 Setthathirath Road"),
            (Some("23".to_string()), "Setthathirath Road".to_string())
        );
        assert_eq!(split_building_number("Setthathirath Road"), (None, "Setthathirath Road".to_string()));
        assert_eq!(split_building_number("  101   Samsenthai "), (Some("101".to_string()), "Samsenthai".to_string()));
        assert_eq!(split_building_number("23"), (None, "23".to_string()));
        assert_eq!(split_building_number("Road 23"), (None, "Road 23".to_string()));
    }

    #[test]
    fn test_parse_address_feature() {
        let body = r#"{
            "type": "FeatureCollection",
            "features": [{
                "id": "address.1",
                "place_type": ["address"],
                "text": "Setthathirath Road",
                "address": "23",
                "place_name": "23 Setthathirath Road, Ban Mixay, Vientiane, Vientiane Prefecture 01000, Laos",
                "context": [
                    {"id": "neighborhood.9", "text": "Ban Mixay"},
                    {"id": "locality.8", "text": "Chanthabuly"},
                    {"id": "postcode.7", "text": "01000"},
                    {"id": "place.6", "text": "Vientiane"},
                    {"id": "region.5", "text": "Vientiane Prefecture", "short_code": "LA-VT"},
                    {"id": "country.4", "text": "Laos", "short_code": "la"}
                ]
            }]
        }"#;
        let result = parse_response(body).unwrap().unwrap();
        assert_eq!(result.building_number.as_deref(), Some("23"));
        assert_eq!(result.street.as_deref(), Some("Setthathirath Road"));
        assert_eq!(result.neighborhood.as_deref(), Some("Ban Mixay"));
        assert_eq!(result.city.as_deref(), Some("Vientiane"));
        assert_eq!(result.province.as_deref(), Some("Vientiane Prefecture"));
        assert_eq!(result.postal_code.as_deref(), Some("01000"));
        assert_eq!(result.country.as_deref(), Some("Laos"));
        assert_eq!(result.district_hint.as_deref(), Some("Chanthabuly"));
    }

    #[test]
    fn test_parse_place_feature_without_context() {
        let body = r#"{"features": [{"place_type": ["place"], "text": "Vang Vieng", "place_name": "Vang Vieng, Vientiane Province, Laos"}]}"#;
        let result = parse_response(body).unwrap().unwrap();
        assert_eq!(result.street.as_deref(), Some("Vang Vieng"));
        assert!(result.building_number.is_none());
        assert_eq!(result.city.as_deref(), Some("Vang Vieng"));
        assert!(result.neighborhood.is_none());
    }

    #[test]
    fn test_parse_empty_features() {
        assert!(parse_response(r#"{"features": []}"#).unwrap().is_none());
        assert!(parse_response(r#"{}"#).unwrap().is_none());
        assert!(parse_response("not json").is_err());
    }
}

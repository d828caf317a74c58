//! Mapbox reverse geocoding client.

use std::time::Duration;

use anyhow::Result;
use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use crate::config::MapboxConfig;
use crate::location::Coordinate;

use super::{parse, GeocodeError, GeocodeResult, Geocoder};

/// Only the top feature is used
const RESULT_LIMIT: &str = "1";

/// Reverse geocoder backed by the Mapbox Geocoding API (v5).
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Debug, Clone)]
pub struct MapboxGeocoder {
    client: Client,
    base_url: String,
    access_token: Option<String>,
    language: String,
    country: Option<String>,
    types: Vec<String>,
}

impl MapboxGeocoder {
    pub fn new(config: &MapboxConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            access_token: config.access_token.clone().filter(|t| !t.is_empty()),
            language: config.language.clone(),
            country: config.country.clone(),
            types: config.types.clone(),
        })
    }

    /// `GET /geocoding/v5/mapbox.places/{lng},{lat}.json?access_token=..&language=..`
    fn endpoint(&self, coordinate: Coordinate) -> Result<Url, GeocodeError> {
        let token = self.access_token.as_deref().ok_or(GeocodeError::MissingToken)?;
        let mut url = Url::parse(&format!(
            "{}/geocoding/v5/mapbox.places/{},{}.json",
            self.base_url, coordinate.longitude, coordinate.latitude
        ))?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("access_token", token);
            query.append_pair("language", &self.language);
            if let Some(ref country) = self.country {
                query.append_pair("country", country);
            }
            if !self.types.is_empty() {
                query.append_pair("types", &self.types.join(","));
            }
            query.append_pair("limit", RESULT_LIMIT);
        }
        Ok(url)
    }

    /// Reverse geocode, surfacing the reason for a failed lookup.
    /// `Ok(None)` means the service answered but found nothing.
    pub async fn try_reverse_geocode(&self, coordinate: Coordinate) -> Result<Option<GeocodeResult>, GeocodeError> {
        let url = self.endpoint(coordinate)?;
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let result = parse::parse_response(&body)?;
        debug!(
            latitude = coordinate.latitude,
            longitude = coordinate.longitude,
            found = result.is_some(),
            "Reverse geocode completed"
        );
        Ok(result)
    }
}

impl Geocoder for MapboxGeocoder {
    async fn reverse_geocode(&self, coordinate: Coordinate) -> Option<GeocodeResult> {
        match self.try_reverse_geocode(coordinate).await {
            Ok(result) => result,
            Err(e) => {
                warn!(
                    error = %e,
                    latitude = coordinate.latitude,
                    longitude = coordinate.longitude,
                    "Reverse geocode failed"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(token: Option<&str>) -> MapboxConfig {
        MapboxConfig {
            access_token: token.map(str::to_string),
            base_url: "https://api.mapbox.com/".to_string(),
            language: "en".to_string(),
            country: Some("la".to_string()),
            types: vec!["address".to_string(), "neighborhood".to_string()],
            timeout_secs: 5,
        }
    }

    #[test]
    fn test_endpoint_shape() {
        let geocoder = MapboxGeocoder::new(&config(Some("pk.test"))).unwrap();
        let url = geocoder.endpoint(Coordinate::new(17.9757, 102.6331).unwrap()).unwrap();
        assert_eq!(url.path(), "/geocoding/v5/mapbox.places/102.6331,17.9757.json");

        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("access_token".to_string(), "pk.test".to_string())));
        assert!(pairs.contains(&("country".to_string(), "la".to_string())));
        assert!(pairs.contains(&("types".to_string(), "address,neighborhood".to_string())));
        assert!(pairs.contains(&("limit".to_string(), "1".to_string())));
    }

    #[test]
    fn test_missing_token() {
        let geocoder = MapboxGeocoder::new(&config(Some(""))).unwrap();
        let err = geocoder.endpoint(Coordinate::new(0.0, 0.0).unwrap()).unwrap_err();
        assert!(matches!(err, GeocodeError::MissingToken));
    }
}

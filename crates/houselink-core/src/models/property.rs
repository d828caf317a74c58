//! Property listing models.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::location::ResolvedAddress;

/// Kind of property being listed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    House,
    Apartment,
    Condo,
    Townhouse,
    Land,
    Commercial,
}

impl PropertyType {
    pub const ALL: [PropertyType; 6] = [
        PropertyType::House,
        PropertyType::Apartment,
        PropertyType::Condo,
        PropertyType::Townhouse,
        PropertyType::Land,
        PropertyType::Commercial,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::House => "house",
            PropertyType::Apartment => "apartment",
            PropertyType::Condo => "condo",
            PropertyType::Townhouse => "townhouse",
            PropertyType::Land => "land",
            PropertyType::Commercial => "commercial",
        }
    }
}

/// Moderation / lifecycle status of a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyStatus {
    Pending,
    Approved,
    Rejected,
    Sold,
    Rented,
}

impl PropertyStatus {
    pub const ALL: [PropertyStatus; 5] = [
        PropertyStatus::Pending,
        PropertyStatus::Approved,
        PropertyStatus::Rejected,
        PropertyStatus::Sold,
        PropertyStatus::Rented,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyStatus::Pending => "pending",
            PropertyStatus::Approved => "approved",
            PropertyStatus::Rejected => "rejected",
            PropertyStatus::Sold => "sold",
            PropertyStatus::Rented => "rented",
        }
    }

    /// Whether the listing is publicly visible
    pub fn is_published(&self) -> bool {
        matches!(self, PropertyStatus::Approved)
    }
}

/// Sale or rental listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Sale,
    Rent,
}

impl TransactionType {
    pub const ALL: [TransactionType; 2] = [TransactionType::Sale, TransactionType::Rent];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Sale => "sale",
            TransactionType::Rent => "rent",
        }
    }
}

/// Error returned when a string does not name a known variant
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown value: {0}")]
pub struct UnknownVariant(pub String);

impl FromStr for PropertyType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

impl FromStr for PropertyStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

impl FromStr for TransactionType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl fmt::Display for PropertyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A property listing as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    pub status: PropertyStatus,
    #[serde(rename = "transaction")]
    pub transaction_type: TransactionType,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default)]
    pub bedrooms: Option<u32>,
    #[serde(default)]
    pub bathrooms: Option<u32>,
    #[serde(default)]
    pub size_sqm: Option<f64>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub location: ResolvedAddress,
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Property {
    /// Build an edit draft pre-filled from this listing
    pub fn to_draft(&self) -> PropertyDraft {
        PropertyDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            property_type: self.property_type,
            transaction_type: self.transaction_type,
            price: self.price,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            size_sqm: self.size_sqm,
            images: self.images.clone(),
            location: self.location.clone(),
        }
    }

    /// Price with the transaction suffix, e.g. "1,200 / month" for rentals
    pub fn price_display(&self) -> String {
        let amount = crate::utils::format_thousands(&self.price.round().to_string());
        match self.transaction_type {
            TransactionType::Sale => amount,
            TransactionType::Rent => format!("{} / month", amount),
        }
    }
}

/// Create/update payload for a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDraft {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    #[serde(rename = "transaction")]
    pub transaction_type: TransactionType,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bathrooms: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_sqm: Option<f64>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub location: ResolvedAddress,
}

impl PropertyDraft {
    /// An empty draft, as a create form starts out
    pub fn new(property_type: PropertyType, transaction_type: TransactionType) -> Self {
        Self {
            title: String::new(),
            description: None,
            property_type,
            transaction_type,
            price: Decimal::ZERO,
            bedrooms: None,
            bathrooms: None,
            size_sqm: None,
            images: Vec::new(),
            location: ResolvedAddress::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_from_str() {
        assert_eq!("pending".parse::<PropertyStatus>(), Ok(PropertyStatus::Pending));
        assert_eq!("SALE".parse::<TransactionType>(), Ok(TransactionType::Sale));
        assert_eq!(" land ".parse::<PropertyType>(), Ok(PropertyType::Land));
        assert!("castle".parse::<PropertyType>().is_err());
    }

    #[test]
    fn test_parse_property() {
        let json = r#"{
            "id": "p-1",
            "title": "Riverside villa",
            "type": "house",
            "status": "approved",
            "transaction": "rent",
            "price": 1200,
            "bedrooms": 3,
            "images": ["https://cdn.example.com/1.jpg"],
            "location": {
                "locationId": "vte",
                "latitude": 17.9757,
                "longitude": 102.6331,
                "address": "Setthathirath Road",
                "district": "Chanthabuly"
            },
            "createdAt": "2026-01-02T03:04:05Z"
        }"#;
        let property: Property = serde_json::from_str(json).unwrap();
        assert_eq!(property.property_type, PropertyType::House);
        assert_eq!(property.transaction_type, TransactionType::Rent);
        assert_eq!(property.price, Decimal::from(1200));
        assert_eq!(property.location.district.as_ref().map(|d| d.as_str()), Some("Chanthabuly"));
        assert_eq!(property.price_display(), "1,200 / month");
        assert!(property.status.is_published());
    }

    #[test]
    fn test_draft_serializes_wire_names() {
        let mut draft = PropertyDraft::new(PropertyType::Condo, TransactionType::Sale);
        draft.title = "Condo".to_string();
        draft.price = Decimal::from(95000);
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["type"], "condo");
        assert_eq!(value["transaction"], "sale");
        assert_eq!(value["price"], 95000.0);
        assert!(value.get("bedrooms").is_none());
    }
}

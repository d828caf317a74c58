//! Client-side completeness checks run before submitting a form.
//!
//! Every rule is evaluated, so the caller can show one dialog listing all
//! problems instead of failing on the first.

use std::fmt;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{PropertyDraft, UserDraft};

/// Minimum number of images a listing must carry
pub const MIN_PROPERTY_IMAGES: usize = 1;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Title is required")]
    MissingTitle,

    #[error("Price must be greater than zero")]
    PriceNotPositive,

    #[error("At least one image is required")]
    MissingImages,

    #[error("Location area is required")]
    MissingLocationArea,

    #[error("District is required")]
    MissingDistrict,

    #[error("Street is required")]
    MissingStreet,

    #[error("Pick the location on the map")]
    MissingCoordinate,

    #[error("Name is required")]
    MissingName,

    #[error("A valid email address is required")]
    InvalidEmail,
}

/// All rules a submission violated, in the order they were checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub errors: Vec<ValidationError>,
}

impl ValidationReport {
    fn check(&mut self, ok: bool, error: ValidationError) {
        if !ok {
            self.errors.push(error);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn contains(&self, error: ValidationError) -> bool {
        self.errors.contains(&error)
    }

    pub fn into_result(self) -> Result<(), ValidationReport> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.errors.iter().map(|e| e.to_string()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ValidationReport {}

impl PropertyDraft {
    pub fn validate(&self) -> Result<(), ValidationReport> {
        let mut report = ValidationReport::default();
        let location = &self.location;

        report.check(!self.title.trim().is_empty(), ValidationError::MissingTitle);
        report.check(self.price > Decimal::ZERO, ValidationError::PriceNotPositive);
        report.check(self.images.len() >= MIN_PROPERTY_IMAGES, ValidationError::MissingImages);
        report.check(location.location_id.is_some(), ValidationError::MissingLocationArea);
        report.check(location.district.is_some(), ValidationError::MissingDistrict);
        report.check(location.has_street(), ValidationError::MissingStreet);
        report.check(location.coordinate().is_some(), ValidationError::MissingCoordinate);

        report.into_result()
    }
}

impl UserDraft {
    pub fn validate(&self) -> Result<(), ValidationReport> {
        let mut report = ValidationReport::default();

        report.check(!self.name.trim().is_empty(), ValidationError::MissingName);
        report.check(looks_like_email(&self.email), ValidationError::InvalidEmail);

        report.into_result()
    }
}

/// Minimal shape check: something before and after a single `@`, and a dot in the domain
fn looks_like_email(email: &str) -> bool {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.contains('@') && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PropertyType, TransactionType};

    fn complete_draft() -> PropertyDraft {
        let mut draft = PropertyDraft::new(PropertyType::House, TransactionType::Sale);
        draft.title = "Family home".to_string();
        draft.price = Decimal::from(120_000);
        draft.images = vec!["https://cdn.example.com/a.jpg".to_string()];
        draft.location = serde_json::from_value(serde_json::json!({
            "locationId": "vte",
            "district": "Sisattanak",
            "street": "Khouvieng Road",
            "latitude": 17.96,
            "longitude": 102.61,
            "address": "Khouvieng Road"
        }))
        .unwrap();
        draft
    }

    #[test]
    fn test_complete_draft_passes() {
        assert_eq!(complete_draft().validate(), Ok(()));
    }

    #[test]
    fn test_empty_draft_reports_every_rule() {
        let draft = PropertyDraft::new(PropertyType::Land, TransactionType::Rent);
        let report = draft.validate().unwrap_err();
        assert_eq!(
            report.errors,
            vec![
                ValidationError::MissingTitle,
                ValidationError::PriceNotPositive,
                ValidationError::MissingImages,
                ValidationError::MissingLocationArea,
                ValidationError::MissingDistrict,
                ValidationError::MissingStreet,
                ValidationError::MissingCoordinate,
            ]
        );
        assert!(report.to_string().starts_with("Title is required; Price must"));
    }

    #[test]
    fn test_blank_street_and_missing_images() {
        let mut draft = complete_draft();
        draft.images.clear();
        draft.location.street = Some("  ".to_string());
        let report = draft.validate().unwrap_err();
        assert_eq!(report.errors, vec![ValidationError::MissingImages, ValidationError::MissingStreet]);
    }

    #[test]
    fn test_location_without_coordinate() {
        let mut draft = complete_draft();
        draft.location.longitude = None;
        let report = draft.validate().unwrap_err();
        assert!(report.contains(ValidationError::MissingCoordinate));
        assert_eq!(report.errors.len(), 1);
    }

    #[test]
    fn test_user_draft_rules() {
        let ok = UserDraft {
            name: "Noy".to_string(),
            email: "noy@example.com".to_string(),
            ..Default::default()
        };
        assert!(ok.validate().is_ok());

        let bad = UserDraft {
            name: " ".to_string(),
            email: "noy@".to_string(),
            ..Default::default()
        };
        assert_eq!(
            bad.validate().unwrap_err().errors,
            vec![ValidationError::MissingName, ValidationError::InvalidEmail]
        );
    }

    #[test]
    fn test_looks_like_email() {
        assert!(looks_like_email("a@b.la"));
        assert!(!looks_like_email("a.b.la"));
        assert!(!looks_like_email("@b.la"));
        assert!(!looks_like_email("a@b@c.la"));
        assert!(!looks_like_email("a@la."));
    }
}

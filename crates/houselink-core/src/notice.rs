//! Localized user-facing messages for failed actions.
//!
//! Backend errors carry no structured taxonomy: one known backend message
//! is recognised verbatim, validation reports are listed rule by rule, and
//! everything else becomes a generic failure notice.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::api::ApiError;
use crate::validation::{ValidationError, ValidationReport};

/// Backend message returned when registering an email that is already taken
pub const EMAIL_EXISTS_MESSAGE: &str = "Email already exists";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Lo,
}

impl Locale {
    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Lo => "lo",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "lo" => Ok(Locale::Lo),
            other => Err(format!("unsupported locale: {}", other)),
        }
    }
}

fn email_exists(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "This email is already registered.",
        Locale::Lo => "ອີເມວນີ້ຖືກລົງທະບຽນແລ້ວ.",
    }
}

fn generic_failure(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "Something went wrong. Please try again.",
        Locale::Lo => "ເກີດຂໍ້ຜິດພາດ. ກະລຸນາລອງໃໝ່.",
    }
}

fn validation_heading(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "Please fix the following:",
        Locale::Lo => "ກະລຸນາແກ້ໄຂລາຍການຕໍ່ໄປນີ້:",
    }
}

/// Message for a single violated form rule
pub fn validation_message(error: ValidationError, locale: Locale) -> String {
    match locale {
        Locale::En => error.to_string(),
        Locale::Lo => match error {
            ValidationError::MissingTitle => "ກະລຸນາໃສ່ຫົວຂໍ້",
            ValidationError::PriceNotPositive => "ລາຄາຕ້ອງຫຼາຍກວ່າສູນ",
            ValidationError::MissingImages => "ກະລຸນາເພີ່ມຮູບຢ່າງໜ້ອຍໜຶ່ງຮູບ",
            ValidationError::MissingLocationArea => "ກະລຸນາເລືອກແຂວງ",
            ValidationError::MissingDistrict => "ກະລຸນາເລືອກເມືອງ",
            ValidationError::MissingStreet => "ກະລຸນາໃສ່ຊື່ຖະໜົນ",
            ValidationError::MissingCoordinate => "ກະລຸນາເລືອກສະຖານທີ່ເທິງແຜນທີ່",
            ValidationError::MissingName => "ກະລຸນາໃສ່ຊື່",
            ValidationError::InvalidEmail => "ກະລຸນາໃສ່ອີເມວທີ່ຖືກຕ້ອງ",
        }
        .to_string(),
    }
}

/// One dialog's worth of text for a validation report
pub fn validation_summary(report: &ValidationReport, locale: Locale) -> String {
    let mut lines = vec![validation_heading(locale).to_string()];
    lines.extend(report.errors.iter().map(|e| format!("- {}", validation_message(*e, locale))));
    lines.join("\n")
}

/// Turn any failure from a user action into the message shown to the user
pub fn user_message(error: &anyhow::Error, locale: Locale) -> String {
    if let Some(report) = error.downcast_ref::<ValidationReport>() {
        return validation_summary(report, locale);
    }
    let known = error
        .downcast_ref::<ApiError>()
        .and_then(ApiError::backend_message)
        .is_some_and(|m| m == EMAIL_EXISTS_MESSAGE);
    if known {
        email_exists(locale).to_string()
    } else {
        generic_failure(locale).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_known_backend_message() {
        let err: anyhow::Error = ApiError::from_status(StatusCode::CONFLICT, r#"{"message":"Email already exists"}"#).into();
        assert_eq!(user_message(&err, Locale::En), "This email is already registered.");
        assert_eq!(user_message(&err, Locale::Lo), "ອີເມວນີ້ຖືກລົງທະບຽນແລ້ວ.");
    }

    #[test]
    fn test_other_errors_are_generic() {
        let near_miss: anyhow::Error = ApiError::Rejected("email already exists".to_string()).into();
        assert_eq!(user_message(&near_miss, Locale::En), generic_failure(Locale::En));

        let other = anyhow::anyhow!("connection reset");
        assert_eq!(user_message(&other, Locale::Lo), generic_failure(Locale::Lo));
    }

    #[test]
    fn test_context_wrapped_api_error_still_recognised() {
        let err = anyhow::Error::from(ApiError::Rejected(EMAIL_EXISTS_MESSAGE.to_string()))
            .context("Failed to create user");
        assert_eq!(user_message(&err, Locale::En), email_exists(Locale::En));
    }

    #[test]
    fn test_validation_summary() {
        let report = ValidationReport {
            errors: vec![ValidationError::MissingImages, ValidationError::MissingDistrict],
        };
        let err = anyhow::Error::from(report);
        assert_eq!(
            user_message(&err, Locale::En),
            "Please fix the following:\n- At least one image is required\n- District is required"
        );
    }

    #[test]
    fn test_locale_parse() {
        assert_eq!("LO".parse::<Locale>(), Ok(Locale::Lo));
        assert!("fr".parse::<Locale>().is_err());
    }
}

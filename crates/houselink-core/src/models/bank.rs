//! Bank partner and financing request models.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::property::UnknownVariant;

/// A bank partner offering mortgages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bank {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub interest_rate: Option<Decimal>,
    #[serde(default)]
    pub contact_phone: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankDraft {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub interest_rate: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BankRequestStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl BankRequestStatus {
    pub const ALL: [BankRequestStatus; 3] = [
        BankRequestStatus::Pending,
        BankRequestStatus::Approved,
        BankRequestStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BankRequestStatus::Pending => "pending",
            BankRequestStatus::Approved => "approved",
            BankRequestStatus::Rejected => "rejected",
        }
    }
}

impl FromStr for BankRequestStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

impl fmt::Display for BankRequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A user's financing request to a bank partner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankRequest {
    pub id: String,
    pub bank_id: String,
    pub user_id: String,
    #[serde(default)]
    pub property_id: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(default)]
    pub status: BankRequestStatus,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankRequestDraft {
    pub bank_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_id: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bank_request() {
        let json = r#"{"id": "r1", "bankId": "b1", "userId": "u1", "amount": 50000.5, "status": "approved"}"#;
        let request: BankRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.status, BankRequestStatus::Approved);
        assert_eq!(request.amount.to_string(), "50000.5");
        assert!(request.property_id.is_none());
    }

    #[test]
    fn test_parse_bank_without_rate() {
        let json = r#"{"id": "b1", "name": "BCEL"}"#;
        let bank: Bank = serde_json::from_str(json).unwrap();
        assert!(bank.interest_rate.is_none());
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("Rejected".parse::<BankRequestStatus>(), Ok(BankRequestStatus::Rejected));
        assert!("closed".parse::<BankRequestStatus>().is_err());
    }
}

//! User account and profile models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::location::ResolvedAddress;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Agent,
    #[default]
    User,
}

impl UserRole {
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }
}

/// A marketplace account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default)]
    pub avatar: Option<String>,
    /// Profile address, composed with the same resolver as listings
    #[serde(default)]
    pub location: Option<ResolvedAddress>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn to_draft(&self) -> UserDraft {
        UserDraft {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            role: Some(self.role),
            avatar: self.avatar.clone(),
            password: None,
            location: self.location.clone(),
        }
    }
}

/// Create/update payload for a user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Only sent when creating a user or changing the password
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<ResolvedAddress>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_user_defaults() {
        let json = r#"{"id": "u1", "name": "Noy", "email": "noy@example.com"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.role, UserRole::User);
        assert!(user.location.is_none());
        assert!(!user.role.is_admin());
    }

    #[test]
    fn test_draft_omits_password_when_unset() {
        let user = User {
            id: "u1".to_string(),
            name: "Noy".to_string(),
            email: "noy@example.com".to_string(),
            phone: None,
            role: UserRole::Admin,
            avatar: None,
            location: None,
            created_at: None,
        };
        let value = serde_json::to_value(user.to_draft()).unwrap();
        assert!(value.get("password").is_none());
        assert_eq!(value["role"], "admin");
    }
}

//! Site-wide settings managed from the admin screens.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    /// Keys this client does not model are kept and written back untouched
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_keys_survive_round_trip() {
        let json = r#"{"siteName": "Houselink", "bannerText": "Hello", "maintenance": false}"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.site_name.as_deref(), Some("Houselink"));
        assert_eq!(settings.extra.len(), 2);

        let value = serde_json::to_value(&settings).unwrap();
        assert_eq!(value["bannerText"], "Hello");
        assert_eq!(value["maintenance"], false);
    }

    #[test]
    fn test_absent_fields_not_written_back() {
        let settings: Settings = serde_json::from_str(r#"{"siteName": "Houselink"}"#).unwrap();
        let value = serde_json::to_value(&settings).unwrap();
        assert_eq!(value, serde_json::json!({ "siteName": "Houselink" }));
    }
}

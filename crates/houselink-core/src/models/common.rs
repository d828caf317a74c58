//! Response envelopes and pagination shared by every resource.

use serde::{Deserialize, Serialize};

/// Single-object envelope: `{"data": {...}, "message": "..."}`
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
    #[serde(default)]
    pub message: Option<String>,
}

/// List envelope: `{"data": [...], "total": 42, "page": 1, "perPage": 10}`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEnvelope<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub per_page: Option<u32>,
}

/// One page of a listing, as handed to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> u32 {
        if self.per_page == 0 {
            return 0;
        }
        let pages = self.total.div_ceil(u64::from(self.per_page));
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }
}

impl<T> ListEnvelope<T> {
    /// Fill in pagination the backend omitted from what was requested
    pub fn into_page(self, requested_page: u32, requested_per_page: u32) -> Page<T> {
        let total = self.total.unwrap_or(self.data.len() as u64);
        Page {
            items: self.data,
            total,
            page: self.page.unwrap_or(requested_page),
            per_page: self.per_page.unwrap_or(requested_per_page),
        }
    }
}

/// Result of an image upload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadedImage {
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages() {
        let page = Page { items: vec![1, 2], total: 21, page: 1, per_page: 10 };
        assert_eq!(page.total_pages(), 3);
        assert!(page.has_next());

        let last = Page { items: vec![1], total: 21, page: 3, per_page: 10 };
        assert!(!last.has_next());

        let empty: Page<i32> = Page { items: vec![], total: 0, page: 1, per_page: 0 };
        assert_eq!(empty.total_pages(), 0);
    }

    #[test]
    fn test_list_envelope_defaults_to_request() {
        let json = r#"{"data": [1, 2, 3]}"#;
        let envelope: ListEnvelope<i32> = serde_json::from_str(json).unwrap();
        let page = envelope.into_page(2, 25);
        assert_eq!(page.total, 3);
        assert_eq!(page.page, 2);
        assert_eq!(page.per_page, 25);
    }

    #[test]
    fn test_list_envelope_with_meta() {
        let json = r#"{"data": ["a"], "total": 40, "page": 4, "perPage": 10}"#;
        let envelope: ListEnvelope<String> = serde_json::from_str(json).unwrap();
        let page = envelope.into_page(1, 10);
        assert_eq!(page.total, 40);
        assert_eq!(page.page, 4);
        assert_eq!(page.items, vec!["a".to_string()]);
    }
}

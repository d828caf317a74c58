//! Admin property list filters and their URL query representation.

use rust_decimal::Decimal;
use url::form_urlencoded;

use crate::models::{PropertyStatus, PropertyType, TransactionType};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PER_PAGE: u32 = 10;

/// Select-box value meaning "no filter"
const ALL: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyFilter {
    pub keyword: Option<String>,
    pub property_type: Option<PropertyType>,
    pub status: Option<PropertyStatus>,
    pub transaction: Option<TransactionType>,
    pub location: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub page: u32,
    pub per_page: u32,
}

impl Default for PropertyFilter {
    fn default() -> Self {
        Self {
            keyword: None,
            property_type: None,
            status: None,
            transaction: None,
            location: None,
            min_price: None,
            max_price: None,
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case(ALL) {
        None
    } else {
        Some(value.to_string())
    }
}

fn positive(value: &str) -> Option<u32> {
    value.trim().parse::<u32>().ok().filter(|n| *n > 0)
}

impl PropertyFilter {
    /// Parse a query string (with or without the leading `?`).
    /// Unknown keys and malformed values are ignored.
    pub fn from_query(query: &str) -> Self {
        let mut filter = Self::default();
        let query = query.strip_prefix('?').unwrap_or(query);

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "keyword" => filter.keyword = non_empty(&value),
                "type" => filter.property_type = non_empty(&value).and_then(|v| v.parse().ok()),
                "status" => filter.status = non_empty(&value).and_then(|v| v.parse().ok()),
                "transaction" => filter.transaction = non_empty(&value).and_then(|v| v.parse().ok()),
                "location" => filter.location = non_empty(&value),
                "minPrice" => filter.min_price = non_empty(&value).and_then(|v| v.parse().ok()),
                "maxPrice" => filter.max_price = non_empty(&value).and_then(|v| v.parse().ok()),
                "page" => filter.page = positive(&value).unwrap_or(DEFAULT_PAGE),
                "perPage" => filter.per_page = positive(&value).unwrap_or(DEFAULT_PER_PAGE),
                _ => {}
            }
        }
        filter
    }

    /// Key/value pairs for everything set, skipping default paging
    fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(ref keyword) = self.keyword {
            pairs.push(("keyword", keyword.clone()));
        }
        if let Some(t) = self.property_type {
            pairs.push(("type", t.as_str().to_string()));
        }
        if let Some(s) = self.status {
            pairs.push(("status", s.as_str().to_string()));
        }
        if let Some(t) = self.transaction {
            pairs.push(("transaction", t.as_str().to_string()));
        }
        if let Some(ref location) = self.location {
            pairs.push(("location", location.clone()));
        }
        if let Some(min) = self.min_price {
            pairs.push(("minPrice", min.normalize().to_string()));
        }
        if let Some(max) = self.max_price {
            pairs.push(("maxPrice", max.normalize().to_string()));
        }
        if self.page != DEFAULT_PAGE {
            pairs.push(("page", self.page.to_string()));
        }
        if self.per_page != DEFAULT_PER_PAGE {
            pairs.push(("perPage", self.per_page.to_string()));
        }
        pairs
    }

    /// Serialize back to a query string (no leading `?`)
    pub fn to_query(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in self.pairs() {
            serializer.append_pair(key, &value);
        }
        serializer.finish()
    }

    /// Parameters for the backend list call; paging is always sent
    pub fn to_api_params(&self) -> Vec<(&'static str, String)> {
        let mut params: Vec<_> = self
            .pairs()
            .into_iter()
            .filter(|(key, _)| *key != "page" && *key != "perPage")
            .collect();
        params.push(("page", self.page.to_string()));
        params.push(("perPage", self.per_page.to_string()));
        params
    }

    pub fn is_filtered(&self) -> bool {
        let unfiltered = Self {
            page: self.page,
            per_page: self.per_page,
            ..Self::default()
        };
        *self != unfiltered
    }

    // Changing any filter shows results from the first page

    pub fn set_keyword(&mut self, keyword: &str) {
        self.keyword = non_empty(keyword);
        self.page = DEFAULT_PAGE;
    }

    pub fn set_property_type(&mut self, property_type: Option<PropertyType>) {
        self.property_type = property_type;
        self.page = DEFAULT_PAGE;
    }

    pub fn set_status(&mut self, status: Option<PropertyStatus>) {
        self.status = status;
        self.page = DEFAULT_PAGE;
    }

    pub fn set_transaction(&mut self, transaction: Option<TransactionType>) {
        self.transaction = transaction;
        self.page = DEFAULT_PAGE;
    }

    pub fn set_location(&mut self, location: &str) {
        self.location = non_empty(location);
        self.page = DEFAULT_PAGE;
    }

    pub fn set_price_range(&mut self, min: Option<Decimal>, max: Option<Decimal>) {
        self.min_price = min;
        self.max_price = max;
        self.page = DEFAULT_PAGE;
    }

    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(DEFAULT_PAGE);
    }

    pub fn set_per_page(&mut self, per_page: u32) {
        self.per_page = if per_page == 0 { DEFAULT_PER_PAGE } else { per_page };
        self.page = DEFAULT_PAGE;
    }

    /// Drop every filter but keep the page size
    pub fn reset(&mut self) {
        *self = Self {
            per_page: self.per_page,
            ..Self::default()
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_serialize() {
        let filter = PropertyFilter::from_query("?status=pending&transaction=sale");
        assert_eq!(filter.status, Some(PropertyStatus::Pending));
        assert_eq!(filter.transaction, Some(TransactionType::Sale));
        assert_eq!(filter.page, 1);
        assert_eq!(filter.to_query(), "status=pending&transaction=sale");
    }

    #[test]
    fn test_defaults_omitted() {
        assert_eq!(PropertyFilter::default().to_query(), "");
        let filter = PropertyFilter::from_query("page=1&perPage=10&type=all&keyword=");
        assert_eq!(filter, PropertyFilter::default());
        assert!(!filter.is_filtered());
    }

    #[test]
    fn test_lenient_parsing() {
        let filter = PropertyFilter::from_query("type=castle&page=-3&perPage=abc&minPrice=cheap&maxPrice=250000&foo=bar");
        assert_eq!(filter.property_type, None);
        assert_eq!(filter.page, DEFAULT_PAGE);
        assert_eq!(filter.per_page, DEFAULT_PER_PAGE);
        assert_eq!(filter.min_price, None);
        assert_eq!(filter.max_price, Some(Decimal::from(250_000)));
    }

    #[test]
    fn test_keyword_is_encoded() {
        let mut filter = PropertyFilter::default();
        filter.set_keyword("river view & pool");
        assert_eq!(filter.to_query(), "keyword=river+view+%26+pool");
        assert_eq!(PropertyFilter::from_query(&filter.to_query()), filter);
    }

    #[test]
    fn test_filter_change_resets_page() {
        let mut filter = PropertyFilter::from_query("page=4&perPage=20");
        assert_eq!(filter.page, 4);

        filter.set_status(Some(PropertyStatus::Approved));
        assert_eq!(filter.page, 1);
        assert_eq!(filter.to_query(), "status=approved&perPage=20");

        filter.set_page(3);
        filter.set_price_range(Some(Decimal::from(1000)), None);
        assert_eq!(filter.page, 1);
    }

    #[test]
    fn test_api_params_always_page() {
        let mut filter = PropertyFilter::default();
        filter.set_property_type(Some(PropertyType::Condo));
        assert_eq!(
            filter.to_api_params(),
            vec![
                ("type", "condo".to_string()),
                ("page", "1".to_string()),
                ("perPage", "10".to_string()),
            ]
        );
    }

    #[test]
    fn test_reset_keeps_page_size() {
        let mut filter = PropertyFilter::from_query("keyword=villa&perPage=25&page=2");
        filter.reset();
        assert_eq!(filter.keyword, None);
        assert_eq!(filter.page, 1);
        assert_eq!(filter.per_page, 25);
    }
}

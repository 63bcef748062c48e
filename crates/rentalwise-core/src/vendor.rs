//! Request parameters and typed responses for the vendor's availability,
//! pricing and listing endpoints.

use serde::{Deserialize, Serialize};

/// Filters accepted by `GET /properties` and `GET /properties/search`.
///
/// Serialized field order is the query-string order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_in: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_out: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guests: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bathrooms: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub amenities: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// Per-date availability entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityDate {
    pub date: String,
    #[serde(default)]
    pub available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_stay: Option<u32>,
}

/// Response of the availability and calendar endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    #[serde(default)]
    pub property_id: String,
    #[serde(default)]
    pub available: bool,
    #[serde(default)]
    pub dates: Vec<AvailabilityDate>,
}

impl Availability {
    /// Dates in the response that are not bookable.
    pub fn blocked_dates(&self) -> impl Iterator<Item = &str> {
        self.dates
            .iter()
            .filter(|d| !d.available)
            .map(|d| d.date.as_str())
    }
}

/// Pricing quote for a stay.
///
/// The vendor does not document this shape; every known field is optional
/// and anything else is kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingQuote {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nightly_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nights: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cleaning_fee: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_fee: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taxes: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Pagination metadata of list endpoints. Missing fields read as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageMeta {
    pub page: u32,
    pub limit: u32,
    pub total: u32,
    pub total_pages: u32,
}

/// `{ "data": [...], "meta": {...} }` envelope of paginated list endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<PageMeta>,
}

impl<T> Page<T> {
    /// Returns `true` when the metadata reports pages after this one.
    #[must_use]
    pub fn has_next_page(&self) -> bool {
        self.meta.is_some_and(|m| m.page < m.total_pages)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn search_params_serialize_in_declared_order_without_empty_fields() {
        let params = SearchParams {
            check_in: Some("2026-11-01".to_string()),
            guests: Some(2),
            amenities: vec!["wifi".to_string(), "pool".to_string()],
            ..SearchParams::default()
        };
        let value = serde_json::to_value(&params).unwrap();
        let keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, ["checkIn", "guests", "amenities"]);
    }

    #[test]
    fn pricing_quote_keeps_unknown_fields() {
        let quote: PricingQuote = serde_json::from_value(json!({
            "total": 482.0,
            "currency": "USD",
            "discount": 20
        }))
        .unwrap();
        assert_eq!(quote.total, Some(482.0));
        assert_eq!(quote.extra.get("discount"), Some(&json!(20)));
    }

    #[test]
    fn availability_lists_blocked_dates() {
        let availability: Availability = serde_json::from_value(json!({
            "propertyId": "p1",
            "available": false,
            "dates": [
                {"date": "2026-11-01", "available": true, "price": 120},
                {"date": "2026-11-02", "available": false, "price": 120}
            ]
        }))
        .unwrap();
        assert_eq!(
            availability.blocked_dates().collect::<Vec<_>>(),
            ["2026-11-02"]
        );
    }

    #[test]
    fn page_reports_next_page_from_meta() {
        let page: Page<u32> = serde_json::from_value(json!({
            "data": [1, 2],
            "meta": {"page": 1, "limit": 2, "total": 3, "totalPages": 2}
        }))
        .unwrap();
        assert!(page.has_next_page());

        let last: Page<u32> = serde_json::from_value(json!({"data": []})).unwrap();
        assert!(!last.has_next_page());
    }

    #[test]
    fn availability_tolerates_null_price() {
        let availability: Availability = serde_json::from_value(json!({
            "dates": [{"date": "2026-11-01", "available": true, "price": null}]
        }))
        .unwrap();
        assert_eq!(availability.dates[0].price, None);
    }

    #[test]
    fn sparse_meta_reads_missing_fields_as_zero() {
        let page: Page<u32> = serde_json::from_value(json!({
            "data": [1],
            "meta": {"page": 1, "total": 1}
        }))
        .unwrap();
        let meta = page.meta.unwrap();
        assert_eq!(meta.total_pages, 0);
        assert!(!page.has_next_page());
    }
}

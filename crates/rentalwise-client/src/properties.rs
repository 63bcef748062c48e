//! Property, availability and pricing endpoints.
//!
//! Property payloads are returned raw because their shape varies between
//! vendor deployments; pass them through [`crate::normalize`].

use reqwest::Method;
use rentalwise_core::{Availability, PricingQuote, SearchParams};

use crate::client::{RequestOptions, VendorClient};
use crate::error::VendorError;
use crate::params::QueryParams;

impl VendorClient {
    /// Lists properties, optionally filtered.
    ///
    /// # Errors
    ///
    /// - [`VendorError::Http`] on non-2xx responses or network failure.
    /// - [`VendorError::Deserialize`] if the body is not JSON.
    pub async fn list_properties(
        &self,
        params: Option<&SearchParams>,
    ) -> Result<serde_json::Value, VendorError> {
        let query = match params {
            Some(p) => QueryParams::from_serialize(p)?,
            None => QueryParams::new(),
        };
        self.request_json(Method::GET, &["properties"], &query, RequestOptions::default())
            .await
    }

    /// Fetches a single property by id.
    ///
    /// # Errors
    ///
    /// - [`VendorError::Http`] on non-2xx responses (404 for unknown ids) or
    ///   network failure.
    /// - [`VendorError::Deserialize`] if the body is not JSON.
    pub async fn get_property(&self, property_id: &str) -> Result<serde_json::Value, VendorError> {
        self.request_json(
            Method::GET,
            &["properties", property_id],
            &QueryParams::new(),
            RequestOptions::default(),
        )
        .await
    }

    /// Searches properties.
    ///
    /// # Errors
    ///
    /// Same as [`Self::list_properties`].
    pub async fn search_properties(
        &self,
        params: &SearchParams,
    ) -> Result<serde_json::Value, VendorError> {
        let query = QueryParams::from_serialize(params)?;
        self.request_json(
            Method::GET,
            &["properties", "search"],
            &query,
            RequestOptions::default(),
        )
        .await
    }

    /// Checks whether a property is bookable between two `YYYY-MM-DD` dates.
    ///
    /// # Errors
    ///
    /// - [`VendorError::Http`] on non-2xx responses or network failure.
    /// - [`VendorError::Deserialize`] if the body does not match [`Availability`].
    pub async fn check_availability(
        &self,
        property_id: &str,
        check_in: &str,
        check_out: &str,
    ) -> Result<Availability, VendorError> {
        let query = QueryParams::new()
            .with("checkIn", check_in)
            .with("checkOut", check_out);
        self.request_typed(
            Method::GET,
            &["properties", property_id, "availability"],
            &query,
            RequestOptions::default(),
        )
        .await
    }

    /// Per-day availability for one month (`YYYY-MM`).
    ///
    /// # Errors
    ///
    /// Same as [`Self::check_availability`].
    pub async fn get_calendar_availability(
        &self,
        property_id: &str,
        month: &str,
    ) -> Result<Availability, VendorError> {
        self.request_typed(
            Method::GET,
            &["properties", property_id, "calendar"],
            &QueryParams::new().with("month", month),
            RequestOptions::default(),
        )
        .await
    }

    /// Price breakdown for a prospective stay.
    ///
    /// # Errors
    ///
    /// - [`VendorError::Http`] on non-2xx responses or network failure.
    /// - [`VendorError::Deserialize`] if the body is not a JSON object.
    pub async fn get_pricing_quote(
        &self,
        property_id: &str,
        check_in: &str,
        check_out: &str,
        guests: u32,
    ) -> Result<PricingQuote, VendorError> {
        let query = QueryParams::new()
            .with("checkIn", check_in)
            .with("checkOut", check_out)
            .with("guests", guests);
        self.request_typed(
            Method::GET,
            &["properties", property_id, "quote"],
            &query,
            RequestOptions::default(),
        )
        .await
    }
}

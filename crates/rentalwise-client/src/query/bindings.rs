//! Ready-made queries for the read endpoints.
//!
//! Each binding issues its first request immediately. Fetches go through
//! the client's retry policy, and property payloads are normalized before
//! they reach the state.

use std::sync::Arc;

use futures::FutureExt;
use rentalwise_core::{Availability, CanonicalProperty, PricingQuote, SearchParams};

use super::Query;
use crate::client::VendorClient;
use crate::error::VendorError;
use crate::normalize::{normalize_list, normalize_one};
use crate::retry::retry_with_policy;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityParams {
    pub property_id: String,
    pub check_in: String,
    pub check_out: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteParams {
    pub property_id: String,
    pub check_in: String,
    pub check_out: String,
    pub guests: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarParams {
    pub property_id: String,
    /// `YYYY-MM`.
    pub month: String,
}

fn filled(values: &[&str]) -> bool {
    values.iter().all(|v| !v.trim().is_empty())
}

/// Normalized property list, re-fetched whenever the search parameters change.
pub fn properties_query(
    client: Arc<VendorClient>,
    params: Option<SearchParams>,
) -> Query<Option<SearchParams>, Vec<CanonicalProperty>> {
    let query = Query::new(
        move |params: Option<SearchParams>| {
            let client = Arc::clone(&client);
            async move {
                let payload = retry_with_policy(&client.retry_policy(), || {
                    client.list_properties(params.as_ref())
                })
                .await?;
                Ok::<_, VendorError>(normalize_list(&payload))
            }
            .boxed()
        },
        "Failed to fetch properties",
    );
    query.set_params(params);
    query
}

/// A single normalized property. Stays idle while the id is `None` or blank.
pub fn property_query(
    client: Arc<VendorClient>,
    property_id: Option<String>,
) -> Query<Option<String>, CanonicalProperty> {
    let query = Query::new(
        move |property_id: Option<String>| {
            let client = Arc::clone(&client);
            async move {
                let id = property_id.unwrap_or_default();
                let payload =
                    retry_with_policy(&client.retry_policy(), || client.get_property(&id)).await?;
                Ok::<_, VendorError>(normalize_one(&payload))
            }
            .boxed()
        },
        "Failed to fetch property",
    )
    .with_ready(|id| id.as_deref().is_some_and(|id| filled(&[id])));
    query.set_params(property_id);
    query
}

/// Availability for a stay. Stays idle until all three fields are filled in.
pub fn availability_query(
    client: Arc<VendorClient>,
    params: AvailabilityParams,
) -> Query<AvailabilityParams, Availability> {
    let query = Query::new(
        move |p: AvailabilityParams| {
            let client = Arc::clone(&client);
            async move {
                retry_with_policy(&client.retry_policy(), || {
                    client.check_availability(&p.property_id, &p.check_in, &p.check_out)
                })
                .await
            }
            .boxed()
        },
        "Failed to check availability",
    )
    .with_ready(|p| filled(&[p.property_id.as_str(), p.check_in.as_str(), p.check_out.as_str()]));
    query.set_params(params);
    query
}

/// Pricing quote for a stay. Stays idle until the property and dates are set.
pub fn pricing_quote_query(
    client: Arc<VendorClient>,
    params: QuoteParams,
) -> Query<QuoteParams, PricingQuote> {
    let query = Query::new(
        move |p: QuoteParams| {
            let client = Arc::clone(&client);
            async move {
                retry_with_policy(&client.retry_policy(), || {
                    client.get_pricing_quote(&p.property_id, &p.check_in, &p.check_out, p.guests)
                })
                .await
            }
            .boxed()
        },
        "Failed to fetch pricing quote",
    )
    .with_ready(|p| filled(&[p.property_id.as_str(), p.check_in.as_str(), p.check_out.as_str()]));
    query.set_params(params);
    query
}

/// Per-day availability for one month.
pub fn calendar_query(
    client: Arc<VendorClient>,
    params: CalendarParams,
) -> Query<CalendarParams, Availability> {
    let query = Query::new(
        move |p: CalendarParams| {
            let client = Arc::clone(&client);
            async move {
                retry_with_policy(&client.retry_policy(), || {
                    client.get_calendar_availability(&p.property_id, &p.month)
                })
                .await
            }
            .boxed()
        },
        "Failed to fetch calendar",
    )
    .with_ready(|p| filled(&[p.property_id.as_str(), p.month.as_str()]));
    query.set_params(params);
    query
}

//! Client for the RentalWise property-management API.
//!
//! [`VendorClient`] performs authenticated requests; [`normalize`] turns the
//! vendor's loosely-shaped property payloads into [`CanonicalProperty`]
//! records; [`query`] wraps both in observable, supersession-safe state.
//!
//! [`CanonicalProperty`]: rentalwise_core::CanonicalProperty

pub mod client;
pub mod error;
mod field_helpers;
pub mod normalize;
pub mod params;
mod properties;
pub mod query;
mod reservations;
pub mod retry;

pub use client::{RequestOptions, VendorClient};
pub use error::VendorError;
pub use normalize::{extract_items, normalize_list, normalize_one};
pub use params::QueryParams;
pub use query::{
    availability_query, calendar_query, pricing_quote_query, properties_query, property_query,
    AvailabilityParams, CalendarParams, PropertySearch, Query, QueryState,
    QuoteParams, ReservationActions,
};
pub use retry::retry_with_policy;

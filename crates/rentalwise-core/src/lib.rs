pub mod booking;
mod config;
pub mod property;
pub mod reservation;
pub mod vendor;
mod vendor_config;

use thiserror::Error;

pub use booking::{
    amenity_label, calculate_nights, format_date, format_price, parse_stay_date,
    validate_date_range, validate_date_range_from, DateRangeError,
};
pub use config::{is_configured, resolve_config, resolve_config_from_env};
pub use property::CanonicalProperty;
pub use reservation::{
    GuestInfo, ReservationDraft, ReservationPricing, ReservationQuery, ReservationStatus,
    ReservationUpdate, VendorReservation,
};
pub use vendor::{Availability, AvailabilityDate, Page, PageMeta, PricingQuote, SearchParams};
pub use vendor_config::{PartnerAuth, RetryPolicy, VendorConfig, VendorEnvironment};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

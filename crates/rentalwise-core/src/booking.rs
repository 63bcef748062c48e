//! Booking helpers shared by the stay search and checkout views: date range
//! validation, night counts, and display formatting for prices, dates and
//! amenity keys.

use chrono::{Local, NaiveDate};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateRangeError {
    #[error("Check-in date cannot be in the past")]
    CheckInInPast,

    #[error("Check-out date must be after check-in date")]
    CheckOutNotAfterCheckIn,

    #[error("invalid date \"{0}\": expected YYYY-MM-DD")]
    InvalidDate(String),
}

/// Parses a `YYYY-MM-DD` stay date.
///
/// # Errors
///
/// Returns [`DateRangeError::InvalidDate`] if the string is not a calendar date.
pub fn parse_stay_date(raw: &str) -> Result<NaiveDate, DateRangeError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| DateRangeError::InvalidDate(raw.to_string()))
}

/// Validates a stay against the local calendar date.
///
/// # Errors
///
/// See [`validate_date_range_from`].
pub fn validate_date_range(check_in: NaiveDate, check_out: NaiveDate) -> Result<(), DateRangeError> {
    validate_date_range_from(check_in, check_out, Local::now().date_naive())
}

/// Validates a stay relative to `today`.
///
/// Check-in today is allowed; check-out must be strictly after check-in.
///
/// # Errors
///
/// - [`DateRangeError::CheckInInPast`] if `check_in` is before `today`.
/// - [`DateRangeError::CheckOutNotAfterCheckIn`] if `check_out <= check_in`.
pub fn validate_date_range_from(
    check_in: NaiveDate,
    check_out: NaiveDate,
    today: NaiveDate,
) -> Result<(), DateRangeError> {
    if check_in < today {
        return Err(DateRangeError::CheckInInPast);
    }
    if check_out <= check_in {
        return Err(DateRangeError::CheckOutNotAfterCheckIn);
    }
    Ok(())
}

/// Number of nights between two dates, regardless of argument order.
#[must_use]
pub fn calculate_nights(check_in: NaiveDate, check_out: NaiveDate) -> u32 {
    let days = (check_out - check_in).num_days().unsigned_abs();
    u32::try_from(days).unwrap_or(u32::MAX)
}

/// Formats a price the way the storefront shows it: currency symbol, thousands
/// separators, and cents only when non-zero (`$1,250`, `$99.5`).
#[must_use]
pub fn format_price(amount: f64, currency: &str) -> String {
    let prefix = match currency.to_ascii_uppercase().as_str() {
        "USD" => "$".to_string(),
        "EUR" => "€".to_string(),
        "GBP" => "£".to_string(),
        "CAD" => "CA$".to_string(),
        "AUD" => "A$".to_string(),
        other => format!("{other}\u{a0}"),
    };

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = group_thousands(cents / 100);
    let fraction = cents % 100;

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    if fraction == 0 {
        format!("{sign}{prefix}{whole}")
    } else {
        let digits = format!("{fraction:02}");
        format!("{sign}{prefix}{whole}.{}", digits.trim_end_matches('0'))
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Formats a date for display, e.g. `Oct 19, 2026`.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Maps a vendor amenity key to its display label. Unknown keys are returned as-is.
#[must_use]
pub fn amenity_label(amenity: &str) -> String {
    let label = match amenity.to_ascii_lowercase().as_str() {
        "wifi" => "WiFi",
        "ac" => "Air Conditioning",
        "kitchen" => "Kitchen",
        "parking" => "Parking",
        "pool" => "Pool",
        "gym" => "Gym",
        "washer" => "Washer",
        "dryer" => "Dryer",
        "tv" => "TV",
        "heating" => "Heating",
        "workspace" => "Workspace",
        "pets-allowed" => "Pet Friendly",
        _ => amenity,
    };
    label.to_string()
}

//! Property, availability and pricing command handlers.
//!
//! Every vendor call is wrapped in the configured retry policy. Stay dates are
//! validated locally before any request is sent.

use anyhow::Context;
use chrono::NaiveDate;
use clap::Args;
use rentalwise_client::{normalize_list, normalize_one, retry_with_policy, VendorClient};
use rentalwise_core::{
    calculate_nights, format_date, format_price, parse_stay_date, validate_date_range,
    CanonicalProperty, SearchParams,
};

/// Filters shared by `properties` and `search`.
#[derive(Debug, Clone, Default, Args)]
pub struct SearchArgs {
    /// City, region or free-text location
    #[arg(long)]
    pub location: Option<String>,
    /// Check-in date (YYYY-MM-DD)
    #[arg(long)]
    pub check_in: Option<String>,
    /// Check-out date (YYYY-MM-DD)
    #[arg(long)]
    pub check_out: Option<String>,
    #[arg(long)]
    pub guests: Option<u32>,
    #[arg(long)]
    pub bedrooms: Option<u32>,
    #[arg(long)]
    pub bathrooms: Option<u32>,
    #[arg(long)]
    pub min_price: Option<f64>,
    #[arg(long)]
    pub max_price: Option<f64>,
    /// Required amenity; repeat for several
    #[arg(long = "amenity")]
    pub amenities: Vec<String>,
    #[arg(long)]
    pub page: Option<u32>,
    #[arg(long)]
    pub limit: Option<u32>,
}

/// Check-in and check-out for a stay.
#[derive(Debug, Clone, Args)]
pub struct StayArgs {
    /// Check-in date (YYYY-MM-DD)
    #[arg(long)]
    pub check_in: String,
    /// Check-out date (YYYY-MM-DD)
    #[arg(long)]
    pub check_out: String,
}

impl SearchArgs {
    /// Converts to vendor search parameters, validating the stay when both
    /// dates are given.
    pub(crate) fn to_params(&self) -> anyhow::Result<SearchParams> {
        if let (Some(check_in), Some(check_out)) = (&self.check_in, &self.check_out) {
            validated_stay(check_in, check_out)?;
        }
        Ok(self.params())
    }

    fn params(&self) -> SearchParams {
        SearchParams {
            check_in: self.check_in.clone(),
            check_out: self.check_out.clone(),
            guests: self.guests,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            min_price: self.min_price,
            max_price: self.max_price,
            amenities: self.amenities.clone(),
            location: self.location.clone(),
            page: self.page,
            limit: self.limit,
        }
    }

    fn is_empty(&self) -> bool {
        self.params() == SearchParams::default()
    }
}

/// Parses both dates and checks the range against today.
pub(crate) fn validated_stay(
    check_in: &str,
    check_out: &str,
) -> anyhow::Result<(NaiveDate, NaiveDate)> {
    let check_in = parse_stay_date(check_in)?;
    let check_out = parse_stay_date(check_out)?;
    validate_date_range(check_in, check_out)?;
    Ok((check_in, check_out))
}

/// Accepts `YYYY-MM` and rejects anything that is not a calendar month.
pub(crate) fn validated_month(month: &str) -> anyhow::Result<String> {
    let month = month.trim();
    NaiveDate::parse_from_str(&format!("{month}-01"), "%Y-%m-%d")
        .with_context(|| format!("invalid month \"{month}\": expected YYYY-MM"))?;
    Ok(month.to_string())
}

fn print_property_table(properties: &[CanonicalProperty]) {
    if properties.is_empty() {
        println!("no properties found");
        return;
    }

    let header = format!(
        "{:<18}{:<30}{:<24}{:>10}  {:<8}NAME",
        "ID", "LOCATION", "AMENITIES", "PRICE", "SLEEPS"
    );
    println!("{header}");
    for property in properties {
        let location = truncate(&property.location, 28);
        let amenities = truncate(&property.amenities.join(","), 22);
        println!(
            "{:<18}{:<30}{:<24}{:>10}  {:<8}{}",
            truncate(&property.id, 16),
            location,
            amenities,
            format_price(property.price, "USD"),
            property.guests,
            property.name
        );
    }
}

fn truncate(value: &str, max_chars: usize) -> String {
    if value.chars().count() > max_chars {
        format!("{}...", value.chars().take(max_chars - 3).collect::<String>())
    } else {
        value.to_string()
    }
}

/// `properties`: list and normalize.
pub(crate) async fn run_properties(
    client: &VendorClient,
    search: &SearchArgs,
    json: bool,
) -> anyhow::Result<()> {
    let params = search.to_params()?;
    let filter = (!search.is_empty()).then_some(&params);
    let payload = retry_with_policy(&client.retry_policy(), || client.list_properties(filter))
        .await
        .context("failed to fetch properties")?;
    let properties = normalize_list(&payload);
    tracing::info!(count = properties.len(), "fetched properties");

    if json {
        crate::print_json(&properties)
    } else {
        print_property_table(&properties);
        Ok(())
    }
}

/// `property <id>`: fetch one and print it normalized.
pub(crate) async fn run_property(client: &VendorClient, id: &str) -> anyhow::Result<()> {
    let payload = retry_with_policy(&client.retry_policy(), || client.get_property(id))
        .await
        .with_context(|| format!("failed to fetch property {id}"))?;
    crate::print_json(&normalize_one(&payload))
}

/// `search`: like `properties` but against the search endpoint.
pub(crate) async fn run_search(
    client: &VendorClient,
    search: &SearchArgs,
    json: bool,
) -> anyhow::Result<()> {
    let params = search.to_params()?;
    let payload = retry_with_policy(&client.retry_policy(), || client.search_properties(&params))
        .await
        .context("failed to search properties")?;
    let properties = normalize_list(&payload);

    if json {
        crate::print_json(&properties)
    } else {
        print_property_table(&properties);
        Ok(())
    }
}

pub(crate) async fn run_availability(
    client: &VendorClient,
    id: &str,
    stay: &StayArgs,
) -> anyhow::Result<()> {
    let (check_in, check_out) = validated_stay(&stay.check_in, &stay.check_out)?;
    let availability = retry_with_policy(&client.retry_policy(), || {
        client.check_availability(id, &stay.check_in, &stay.check_out)
    })
    .await
    .with_context(|| format!("failed to check availability for {id}"))?;

    println!(
        "{} to {} ({} nights): {}",
        format_date(check_in),
        format_date(check_out),
        calculate_nights(check_in, check_out),
        if availability.available {
            "available"
        } else {
            "unavailable"
        }
    );
    let blocked: Vec<&str> = availability.blocked_dates().collect();
    if !blocked.is_empty() {
        println!("blocked: {}", blocked.join(", "));
    }
    Ok(())
}

pub(crate) async fn run_calendar(
    client: &VendorClient,
    id: &str,
    month: &str,
) -> anyhow::Result<()> {
    let month = validated_month(month)?;
    let calendar = retry_with_policy(&client.retry_policy(), || {
        client.get_calendar_availability(id, &month)
    })
    .await
    .with_context(|| format!("failed to fetch calendar for {id}"))?;
    crate::print_json(&calendar)
}

pub(crate) async fn run_quote(
    client: &VendorClient,
    id: &str,
    stay: &StayArgs,
    guests: u32,
) -> anyhow::Result<()> {
    validated_stay(&stay.check_in, &stay.check_out)?;
    let quote = retry_with_policy(&client.retry_policy(), || {
        client.get_pricing_quote(id, &stay.check_in, &stay.check_out, guests)
    })
    .await
    .with_context(|| format!("failed to fetch pricing quote for {id}"))?;

    if let Some(total) = quote.total {
        let currency = quote.currency.as_deref().unwrap_or("USD");
        println!("total: {}", format_price(total, currency));
    }
    crate::print_json(&quote)
}

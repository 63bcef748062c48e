use crate::vendor_config::{PartnerAuth, RetryPolicy, VendorConfig, VendorEnvironment};
use crate::ConfigError;

const DEFAULT_API_URL: &str = "https://api.rentalwise.com/v1";

/// Resolve the vendor configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// A missing API key is not an error; check [`is_configured`] before relying
/// on live data.
///
/// # Errors
///
/// Returns `ConfigError` if a numeric setting or the environment tag is malformed.
pub fn resolve_config() -> Result<VendorConfig, ConfigError> {
    dotenvy::dotenv().ok();
    resolve_config_from_env()
}

/// Resolve the vendor configuration from environment variables already in the process.
///
/// Unlike [`resolve_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a numeric setting or the environment tag is malformed.
pub fn resolve_config_from_env() -> Result<VendorConfig, ConfigError> {
    build_vendor_config(|key| std::env::var(key))
}

/// Returns `false` (and logs a warning) when no API key is configured.
///
/// Requests made with an unconfigured key are still attempted; they fail at
/// the HTTP layer with the vendor's authentication error.
#[must_use]
pub fn is_configured(config: &VendorConfig) -> bool {
    if config.api_key.trim().is_empty() {
        tracing::warn!(
            environment = %config.environment,
            "RentalWise API key is not configured; set RENTALWISE_API_KEY in your environment or .env file"
        );
        return false;
    }
    true
}

/// Build the vendor configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can use a plain `HashMap`.
fn build_vendor_config<F>(lookup: F) -> Result<VendorConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    // Blank values are treated the same as unset ones.
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    };

    let or_default =
        |var: &str, default: &str| -> String { optional(var).unwrap_or_else(|| default.to_string()) };

    let parse_u32 = |var: &str, default: u32| -> Result<u32, ConfigError> {
        optional(var).map_or(Ok(default), |raw| {
            raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
        })
    };

    let parse_u64 = |var: &str, default: u64| -> Result<u64, ConfigError> {
        optional(var).map_or(Ok(default), |raw| {
            raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
        })
    };

    let base_url = or_default("RENTALWISE_API_URL", DEFAULT_API_URL);
    let api_key = optional("RENTALWISE_API_KEY").unwrap_or_default();
    let environment = parse_environment(&or_default("RENTALWISE_ENVIRONMENT", "staging"))?;

    let timeout_ms = parse_u64("RENTALWISE_TIMEOUT_MS", 30_000)?;
    let retry = RetryPolicy {
        attempts: parse_u32("RENTALWISE_RETRY_ATTEMPTS", 3)?,
        delay_ms: parse_u64("RENTALWISE_RETRY_DELAY_MS", 1_000)?,
    };

    let partner_auth = PartnerAuth {
        username: optional("RENTALWISE_PARTNER_USERNAME"),
        password: optional("RENTALWISE_PARTNER_PASSWORD"),
    };

    let log_level = or_default("RENTALWISE_LOG_LEVEL", "info");

    Ok(VendorConfig {
        base_url,
        api_key,
        environment,
        timeout_ms,
        retry,
        partner_auth,
        log_level,
    })
}

/// Parse a string into a `VendorEnvironment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything other than `staging` or `production`.
fn parse_environment(s: &str) -> Result<VendorEnvironment, ConfigError> {
    match s.to_ascii_lowercase().as_str() {
        "staging" => Ok(VendorEnvironment::Staging),
        "production" => Ok(VendorEnvironment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "RENTALWISE_ENVIRONMENT".to_string(),
            reason: format!("expected staging or production, got \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

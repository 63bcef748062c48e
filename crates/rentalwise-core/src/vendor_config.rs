use std::time::Duration;

/// Deployment tier of the vendor account the keys belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VendorEnvironment {
    Staging,
    Production,
}

impl std::fmt::Display for VendorEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VendorEnvironment::Staging => write!(f, "staging"),
            VendorEnvironment::Production => write!(f, "production"),
        }
    }
}

/// Fixed-delay retry policy handed to caller-level retry wrappers.
///
/// `attempts` counts retries after the first try, so `attempts = 3` allows at
/// most four requests in total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub delay_ms: u64,
}

impl RetryPolicy {
    /// A policy that never retries.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            attempts: 0,
            delay_ms: 0,
        }
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            delay_ms: 1_000,
        }
    }
}

/// Partner API credentials. Read from the environment but not used by any
/// client operation.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct PartnerAuth {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl std::fmt::Debug for PartnerAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PartnerAuth")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[redacted]"))
            .finish()
    }
}

/// Vendor API configuration, resolved once at startup and passed explicitly
/// to the client.
#[derive(Clone, PartialEq, Eq)]
pub struct VendorConfig {
    pub base_url: String,
    /// Bearer token for the vendor API. Empty when not configured.
    pub api_key: String,
    pub environment: VendorEnvironment,
    pub timeout_ms: u64,
    pub retry: RetryPolicy,
    pub partner_auth: PartnerAuth,
    pub log_level: String,
}

impl std::fmt::Debug for VendorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VendorConfig")
            .field("base_url", &self.base_url)
            .field(
                "api_key",
                &if self.api_key.is_empty() {
                    "[unset]"
                } else {
                    "[redacted]"
                },
            )
            .field("environment", &self.environment)
            .field("timeout_ms", &self.timeout_ms)
            .field("retry", &self.retry)
            .field("partner_auth", &self.partner_auth)
            .field("log_level", &self.log_level)
            .finish()
    }
}

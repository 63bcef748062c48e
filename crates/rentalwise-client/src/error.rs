use thiserror::Error;

/// Errors returned by the RentalWise API client.
#[derive(Debug, Error)]
pub enum VendorError {
    /// A non-2xx response, a vendor-reported error body, or a request that
    /// produced no response at all (`status == 0`).
    #[error("{message}")]
    Http {
        status: u16,
        message: String,
        code: Option<String>,
    },

    /// A 2xx response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The request body could not be serialized to JSON.
    #[error("JSON serialization error for {context}: {source}")]
    Serialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid vendor base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    #[error("API key contains characters not allowed in an HTTP header")]
    InvalidApiKey,

    /// The underlying `reqwest::Client` could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl VendorError {
    /// HTTP status of the failure. `0` means no usable response was received.
    #[must_use]
    pub fn status(&self) -> u16 {
        match self {
            VendorError::Http { status, .. } => *status,
            _ => 0,
        }
    }

    /// Vendor error code from the response body, if one was sent.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        match self {
            VendorError::Http { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    /// Returns `true` for failures worth retrying: no response at all, or a 5xx.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            VendorError::Http { status, .. } => *status == 0 || (500..600).contains(status),
            VendorError::Deserialize { .. }
            | VendorError::Serialize { .. }
            | VendorError::InvalidBaseUrl { .. }
            | VendorError::InvalidApiKey
            | VendorError::Client(_) => false,
        }
    }

    /// Human-readable message for UI state, with `fallback` used when the
    /// error carries no text.
    #[must_use]
    pub fn display_message(&self, fallback: &str) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            fallback.to_string()
        } else {
            message
        }
    }

    pub(crate) fn network(err: &reqwest::Error, timeout_ms: u64) -> Self {
        let message = if err.is_timeout() {
            format!("request timed out after {timeout_ms} ms")
        } else {
            err.to_string()
        };
        VendorError::Http {
            status: 0,
            message,
            code: None,
        }
    }
}

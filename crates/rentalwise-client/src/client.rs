//! HTTP client for the RentalWise REST API.
//!
//! Wraps `reqwest` with bearer authentication, URL composition, and the
//! vendor's error conventions. Endpoint methods live in
//! [`crate::properties`] and [`crate::reservations`]; every one of them goes
//! through [`VendorClient::request_json`].

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode, Url};
use rentalwise_core::{RetryPolicy, VendorConfig};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::VendorError;
use crate::params::QueryParams;

/// Per-request overrides.
///
/// Headers replace same-named defaults (`Authorization`, `Content-Type`) and
/// are added otherwise.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub headers: HeaderMap,
    pub body: Option<serde_json::Value>,
}

impl RequestOptions {
    /// Options carrying `body` serialized as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`VendorError::Serialize`] if `body` cannot be represented as JSON.
    pub fn json<T: Serialize>(body: &T, context: &str) -> Result<Self, VendorError> {
        let body = serde_json::to_value(body).map_err(|e| VendorError::Serialize {
            context: context.to_owned(),
            source: e,
        })?;
        Ok(Self {
            headers: HeaderMap::new(),
            body: Some(body),
        })
    }
}

/// Client for the RentalWise REST API.
///
/// Use [`VendorClient::new`] with a resolved [`VendorConfig`], or
/// [`VendorClient::with_base_url`] to point at a mock server in tests.
/// The client never retries on its own; [`VendorClient::retry_policy`] is
/// exposed for [`crate::retry::retry_with_policy`].
#[derive(Debug, Clone)]
pub struct VendorClient {
    client: Client,
    authorization: HeaderValue,
    base_url: Url,
    timeout_ms: u64,
    retry: RetryPolicy,
}

impl VendorClient {
    /// Creates a client from the resolved vendor configuration.
    ///
    /// # Errors
    ///
    /// Returns [`VendorError::InvalidBaseUrl`] if the configured base URL
    /// cannot be parsed, or [`VendorError::Client`] if the HTTP client cannot
    /// be constructed.
    pub fn new(config: &VendorConfig) -> Result<Self, VendorError> {
        Ok(
            Self::with_base_url(&config.api_key, config.timeout_ms, &config.base_url)?
                .with_retry_policy(config.retry),
        )
    }

    /// Creates a client with an explicit base URL and no retry policy.
    ///
    /// # Errors
    ///
    /// Returns [`VendorError::InvalidBaseUrl`] if `base_url` is not an absolute
    /// http(s) URL, or [`VendorError::Client`] if the HTTP client cannot be
    /// constructed.
    pub fn with_base_url(
        api_key: &str,
        timeout_ms: u64,
        base_url: &str,
    ) -> Result<Self, VendorError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .connect_timeout(Duration::from_millis(timeout_ms.min(10_000)))
            .user_agent("rentalwise-client/0.1")
            .build()
            .map_err(VendorError::Client)?;

        let trimmed = base_url.trim().trim_end_matches('/');
        let parsed = Url::parse(trimmed).map_err(|e| VendorError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() || !matches!(parsed.scheme(), "http" | "https") {
            return Err(VendorError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: "expected an absolute http(s) URL".to_owned(),
            });
        }

        let mut authorization = HeaderValue::from_str(&format!("Bearer {}", api_key.trim()))
            .map_err(|_| VendorError::InvalidApiKey)?;
        authorization.set_sensitive(true);

        Ok(Self {
            client,
            authorization,
            base_url: parsed,
            timeout_ms,
            retry: RetryPolicy::none(),
        })
    }

    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// The retry policy callers should apply around this client's operations.
    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Builds `base_url/segment/...?query`, percent-encoding each segment.
    #[must_use]
    pub fn endpoint_url(&self, segments: &[&str], params: &QueryParams) -> Url {
        let mut url = self.base_url.clone();
        // Base URLs are validated as hierarchical in the constructor.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        params.apply_to(&mut url);
        url
    }

    fn default_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, self.authorization.clone());
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }

    /// Sends a request and returns the JSON body verbatim.
    ///
    /// An empty 2xx body is returned as `null`.
    ///
    /// # Errors
    ///
    /// - [`VendorError::Http`] with the response status for non-2xx responses;
    ///   the message and code come from the JSON body when present.
    /// - [`VendorError::Http`] with status `0` when no response was received
    ///   (connection failure, timeout).
    /// - [`VendorError::Deserialize`] if a 2xx body is not valid JSON.
    pub async fn request_json(
        &self,
        method: Method,
        segments: &[&str],
        params: &QueryParams,
        options: RequestOptions,
    ) -> Result<serde_json::Value, VendorError> {
        let url = self.endpoint_url(segments, params);
        let context = format!("{method} {}", url.path());

        let mut headers = self.default_headers();
        for name in options.headers.keys() {
            headers.remove(name);
        }
        for (name, value) in &options.headers {
            headers.append(name, value.clone());
        }

        let mut request = self.client.request(method, url).headers(headers);
        if let Some(body) = &options.body {
            let bytes = serde_json::to_vec(body).map_err(|e| VendorError::Serialize {
                context: context.clone(),
                source: e,
            })?;
            request = request.body(bytes);
        }

        tracing::debug!(request = %context, "sending RentalWise request");
        let response = request.send().await.map_err(|e| {
            tracing::warn!(request = %context, error = %e, "RentalWise request failed without a response");
            VendorError::network(&e, self.timeout_ms)
        })?;

        self.read_response(response, &context).await
    }

    /// Like [`Self::request_json`], deserializing the body into `T`.
    pub(crate) async fn request_typed<T: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
        params: &QueryParams,
        options: RequestOptions,
    ) -> Result<T, VendorError> {
        let context = format!("{method} /{}", segments.join("/"));
        let body = self.request_json(method, segments, params, options).await?;
        serde_json::from_value(body).map_err(|e| VendorError::Deserialize { context, source: e })
    }

    async fn read_response(
        &self,
        response: reqwest::Response,
        context: &str,
    ) -> Result<serde_json::Value, VendorError> {
        let status = response.status();
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.to_ascii_lowercase().contains("application/json"));

        if !status.is_success() && !is_json {
            tracing::warn!(request = %context, status = status.as_u16(), "RentalWise returned a non-JSON error");
            return Err(status_error(status));
        }

        let body = response
            .text()
            .await
            .map_err(|e| VendorError::network(&e, self.timeout_ms))?;

        if status.is_success() {
            if body.trim().is_empty() {
                return Ok(serde_json::Value::Null);
            }
            return serde_json::from_str(&body).map_err(|e| VendorError::Deserialize {
                context: context.to_owned(),
                source: e,
            });
        }

        let parsed = serde_json::from_str::<serde_json::Value>(&body).ok();
        let err = vendor_error(status, parsed.as_ref());
        tracing::warn!(
            request = %context,
            status = status.as_u16(),
            code = err.code().unwrap_or(""),
            error = %err,
            "RentalWise returned an error response"
        );
        Err(err)
    }
}

/// `HTTP <status>: <reason>` error for responses without a usable body.
fn status_error(status: StatusCode) -> VendorError {
    VendorError::Http {
        status: status.as_u16(),
        message: generic_message(status),
        code: None,
    }
}

fn generic_message(status: StatusCode) -> String {
    format!(
        "HTTP {}: {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Unknown Status")
    )
}

/// Builds the error for a non-2xx JSON response, preferring the vendor's own
/// `message` and `code` fields.
fn vendor_error(status: StatusCode, body: Option<&serde_json::Value>) -> VendorError {
    let message = body
        .and_then(|b| {
            b.get("message")
                .or_else(|| b.get("error"))
                .and_then(serde_json::Value::as_str)
        })
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map_or_else(|| generic_message(status), str::to_owned);

    let code = body.and_then(|b| b.get("code")).and_then(|c| match c {
        serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    });

    VendorError::Http {
        status: status.as_u16(),
        message,
        code,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn test_client(base_url: &str) -> VendorClient {
        VendorClient::with_base_url("test-key", 5_000, base_url)
            .expect("client construction should not fail")
    }

    #[test]
    fn endpoint_url_appends_segments_to_base_path() {
        let client = test_client("https://api.rentalwise.com/v1");
        let url = client.endpoint_url(&["properties", "p1"], &QueryParams::new());
        assert_eq!(url.as_str(), "https://api.rentalwise.com/v1/properties/p1");
    }

    #[test]
    fn endpoint_url_strips_trailing_slash() {
        let client = test_client("https://api.rentalwise.com/v1/");
        let url = client.endpoint_url(&["reservations"], &QueryParams::new());
        assert_eq!(url.as_str(), "https://api.rentalwise.com/v1/reservations");
    }

    #[test]
    fn endpoint_url_on_bare_host() {
        let client = test_client("http://127.0.0.1:8080");
        let url = client.endpoint_url(
            &["properties", "p1", "availability"],
            &QueryParams::new()
                .with("checkIn", "2026-11-01")
                .with("checkOut", "2026-11-04"),
        );
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:8080/properties/p1/availability?checkIn=2026-11-01&checkOut=2026-11-04"
        );
    }

    #[test]
    fn endpoint_url_encodes_path_segments() {
        let client = test_client("https://api.rentalwise.com/v1");
        let url = client.endpoint_url(&["properties", "a/b c"], &QueryParams::new());
        assert_eq!(
            url.as_str(),
            "https://api.rentalwise.com/v1/properties/a%2Fb%20c"
        );
    }

    #[test]
    fn with_base_url_rejects_relative_urls() {
        let err = VendorClient::with_base_url("k", 1_000, "api.rentalwise.com/v1").unwrap_err();
        assert!(
            matches!(err, VendorError::InvalidBaseUrl { .. }),
            "expected InvalidBaseUrl, got: {err:?}"
        );
    }

    #[test]
    fn with_base_url_rejects_non_http_schemes() {
        let err = VendorClient::with_base_url("k", 1_000, "mailto:ops@rentalwise.com").unwrap_err();
        assert!(matches!(err, VendorError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn default_headers_carry_bearer_and_json_content_type() {
        let client = test_client("https://api.rentalwise.com/v1");
        let headers = client.default_headers();
        assert_eq!(headers[AUTHORIZATION], "Bearer test-key");
        assert_eq!(headers[CONTENT_TYPE], "application/json");
    }

    #[test]
    fn new_copies_retry_policy_from_config() {
        let config = VendorConfig {
            base_url: "https://api.rentalwise.com/v1".to_owned(),
            api_key: "k".to_owned(),
            environment: rentalwise_core::VendorEnvironment::Staging,
            timeout_ms: 1_000,
            retry: RetryPolicy {
                attempts: 2,
                delay_ms: 10,
            },
            partner_auth: rentalwise_core::PartnerAuth::default(),
            log_level: "info".to_owned(),
        };
        let client = VendorClient::new(&config).unwrap();
        assert_eq!(client.retry_policy(), config.retry);
    }

    #[test]
    fn vendor_error_prefers_body_message_and_code() {
        let err = vendor_error(
            StatusCode::NOT_FOUND,
            Some(&json!({"message": "Not found", "code": "NOT_FOUND"})),
        );
        assert_eq!(err.status(), 404);
        assert_eq!(err.to_string(), "Not found");
        assert_eq!(err.code(), Some("NOT_FOUND"));
    }

    #[test]
    fn vendor_error_falls_back_to_status_message() {
        let err = vendor_error(StatusCode::BAD_GATEWAY, Some(&json!({"detail": "upstream"})));
        assert_eq!(err.to_string(), "HTTP 502: Bad Gateway");
        assert_eq!(err.code(), None);
    }

    #[test]
    fn vendor_error_accepts_numeric_codes() {
        let err = vendor_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            Some(&json!({"message": "Dates unavailable", "code": 4221})),
        );
        assert_eq!(err.code(), Some("4221"));
    }
}

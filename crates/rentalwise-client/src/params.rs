//! Query-string parameters for vendor requests.
//!
//! Parameters are a flat ordered list of key/value pairs. Empty values are
//! dropped on insertion and array values become repeated keys, so the list
//! can be appended to a URL as-is.

use serde::Serialize;

use crate::error::VendorError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `key=value` unless `value` is empty.
    #[must_use]
    pub fn with(mut self, key: &str, value: impl ToString) -> Self {
        self.push(key, value);
        self
    }

    /// Appends `key=value` unless `value` is empty.
    pub fn push(&mut self, key: &str, value: impl ToString) {
        let value = value.to_string();
        if !value.is_empty() {
            self.pairs.push((key.to_owned(), value));
        }
    }

    /// Flattens a JSON object into parameters.
    ///
    /// `null` and `""` are skipped, arrays become one pair per element, and
    /// scalars are rendered verbatim. Nested objects are not flat parameters
    /// and are skipped. Non-object values yield no parameters.
    #[must_use]
    pub fn from_json(value: &serde_json::Value) -> Self {
        let mut params = Self::new();
        if let Some(map) = value.as_object() {
            for (key, value) in map {
                match value {
                    serde_json::Value::Array(items) => {
                        for item in items {
                            params.push_scalar(key, item);
                        }
                    }
                    other => params.push_scalar(key, other),
                }
            }
        }
        params
    }

    /// Serializes a parameter struct (e.g. `SearchParams`) and flattens it.
    ///
    /// # Errors
    ///
    /// Returns [`VendorError::Serialize`] if `params` cannot be represented as JSON.
    pub fn from_serialize<T: Serialize>(params: &T) -> Result<Self, VendorError> {
        let value = serde_json::to_value(params).map_err(|e| VendorError::Serialize {
            context: "query parameters".to_owned(),
            source: e,
        })?;
        Ok(Self::from_json(&value))
    }

    fn push_scalar(&mut self, key: &str, value: &serde_json::Value) {
        match value {
            serde_json::Value::String(s) => self.push(key, s),
            serde_json::Value::Number(n) => self.push(key, n),
            serde_json::Value::Bool(b) => self.push(key, b),
            serde_json::Value::Null
            | serde_json::Value::Array(_)
            | serde_json::Value::Object(_) => {}
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Appends every pair to `url`'s query string, percent-encoded.
    /// Leaves `url` untouched when there are no pairs.
    pub fn apply_to(&self, url: &mut reqwest::Url) {
        if self.pairs.is_empty() {
            return;
        }
        let mut query = url.query_pairs_mut();
        for (key, value) in &self.pairs {
            query.append_pair(key, value);
        }
    }
}

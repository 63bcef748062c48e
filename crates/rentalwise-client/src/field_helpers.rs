//! Lenient accessors over untyped vendor JSON.
//!
//! Every accessor returns `None` for anything it cannot use (missing keys,
//! `null`, wrong types, empty strings) so callers can chain fallbacks.

use serde_json::Value;

/// Resolves a dotted key path (`"pricing.basePrice"`). Missing intermediate
/// objects and `null` leaves are `None`.
pub(crate) fn lookup<'a>(item: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(item, |value, key| value.as_object()?.get(key))
        .filter(|value| !value.is_null())
}

/// First candidate path whose value `extract` accepts.
pub(crate) fn first_present<'a, T>(
    item: &'a Value,
    paths: &[&str],
    extract: impl Fn(&'a Value) -> Option<T>,
) -> Option<T> {
    paths
        .iter()
        .find_map(|path| lookup(item, path).and_then(&extract))
}

/// Non-blank string.
pub(crate) fn value_as_text(value: &Value) -> Option<String> {
    value
        .as_str()
        .filter(|s| !s.trim().is_empty())
        .map(str::to_owned)
}

/// Non-blank string, or a number rendered as a string.
pub(crate) fn value_as_string(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => Some(n.to_string()),
        other => value_as_text(other),
    }
}

/// Finite number, or a string that parses as one.
pub(crate) fn value_as_f64(value: &Value) -> Option<f64> {
    value
        .as_f64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse::<f64>().ok()))
        .filter(|n| n.is_finite())
}

/// Finite, non-negative amount.
pub(crate) fn value_as_amount(value: &Value) -> Option<f64> {
    value_as_f64(value).filter(|n| *n >= 0.0)
}

/// Non-negative count. Fractional values are floored.
pub(crate) fn value_as_count(value: &Value) -> Option<u32> {
    let n = value_as_amount(value)?.floor();
    if n > f64::from(u32::MAX) {
        return None;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Some(n as u32)
}

/// An image reference: a URL string or an object carrying `url`.
pub(crate) fn value_as_image_url(value: &Value) -> Option<String> {
    match value {
        Value::Object(map) => map.get("url").and_then(value_as_text),
        other => value_as_text(other),
    }
}

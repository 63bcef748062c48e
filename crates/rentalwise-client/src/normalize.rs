//! Normalization of raw vendor property payloads into [`CanonicalProperty`].
//!
//! The vendor returns properties in several shapes depending on endpoint and
//! deployment: bare arrays, `{data: [...]}`, `{properties: [...]}`,
//! `{items: [...]}`, nested or flat location and pricing, images as strings
//! or objects. Every function here is total: any JSON input produces a value
//! and no field is ever left unset.

use rentalwise_core::property::{PLACEHOLDER_IMAGE, UNKNOWN_LOCATION, UNNAMED_PROPERTY};
use rentalwise_core::CanonicalProperty;
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::field_helpers::{
    first_present, lookup, value_as_amount, value_as_count, value_as_image_url, value_as_string,
    value_as_text,
};

const ENVELOPE_KEYS: [&str; 3] = ["data", "properties", "items"];

const DEFAULT_BEDROOMS: u32 = 1;
const DEFAULT_BATHROOMS: u32 = 1;
const DEFAULT_GUESTS: u32 = 2;

/// Finds the list of property-like items in a payload.
///
/// Arrays are returned as-is. For objects, `data`, `properties` and `items`
/// are tried in that order, then the first array-valued field in document
/// order. Anything else yields an empty slice.
#[must_use]
pub fn extract_items(payload: &Value) -> &[Value] {
    match payload {
        Value::Array(items) => items.as_slice(),
        Value::Object(map) => ENVELOPE_KEYS
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_array))
            .or_else(|| map.values().find_map(Value::as_array))
            .map_or(&[][..], Vec::as_slice),
        _ => &[],
    }
}

/// Normalizes every item of a list payload.
#[must_use]
pub fn normalize_list(payload: &Value) -> Vec<CanonicalProperty> {
    let items = extract_items(payload);
    if items.is_empty() && !payload.is_array() {
        tracing::debug!("vendor payload contains no property list");
    }
    items.iter().map(normalize_one).collect()
}

/// Normalizes a single property object.
#[must_use]
pub fn normalize_one(item: &Value) -> CanonicalProperty {
    let image = primary_image(item);
    let images = image_urls(item);
    let images = if images.is_empty() {
        vec![image.clone()]
    } else {
        images
    };

    CanonicalProperty {
        id: property_id(item),
        name: first_present(item, &["name", "title", "propertyName"], value_as_text)
            .unwrap_or_else(|| UNNAMED_PROPERTY.to_owned()),
        location: location(item),
        price: first_present(
            item,
            &[
                "price",
                "basePrice",
                "pricing.basePrice",
                "pricing.price",
                "rate",
                "nightlyRate",
            ],
            value_as_amount,
        )
        .unwrap_or(0.0),
        image,
        images,
        amenities: amenities(item),
        bedrooms: first_present(item, &["bedrooms", "beds", "capacity.bedrooms"], value_as_count)
            .unwrap_or(DEFAULT_BEDROOMS),
        bathrooms: first_present(
            item,
            &["bathrooms", "baths", "capacity.bathrooms"],
            value_as_count,
        )
        .unwrap_or(DEFAULT_BATHROOMS),
        guests: first_present(item, &["guests", "maxGuests", "capacity.guests"], value_as_count)
            .unwrap_or(DEFAULT_GUESTS),
        description: first_present(item, &["description", "desc"], value_as_text)
            .unwrap_or_default(),
    }
}

fn property_id(item: &Value) -> String {
    first_present(item, &["id", "_id", "propertyId"], value_as_string).unwrap_or_else(|| {
        let id = content_id(item);
        tracing::debug!(id = %id, "vendor property has no id; derived one from its content");
        id
    })
}

/// `rw-` followed by the first 16 hex digits of the SHA-256 of the item's JSON.
fn content_id(item: &Value) -> String {
    let digest = Sha256::digest(item.to_string().as_bytes());
    let hex: String = digest[..8].iter().map(|b| format!("{b:02x}")).collect();
    format!("rw-{hex}")
}

fn city_state(item: &Value, city: &str, state: &str) -> Option<String> {
    let city = lookup(item, city).and_then(value_as_text)?;
    let state = lookup(item, state).and_then(value_as_text)?;
    Some(format!("{city}, {state}"))
}

fn location(item: &Value) -> String {
    lookup(item, "location")
        .and_then(value_as_text)
        .or_else(|| city_state(item, "location.city", "location.state"))
        .or_else(|| lookup(item, "location.address").and_then(value_as_text))
        .or_else(|| city_state(item, "city", "state"))
        .or_else(|| lookup(item, "city").and_then(value_as_text))
        .or_else(|| lookup(item, "address").and_then(value_as_text))
        .unwrap_or_else(|| UNKNOWN_LOCATION.to_owned())
}

fn image_entries(item: &Value) -> &[Value] {
    lookup(item, "images")
        .and_then(Value::as_array)
        .map_or(&[][..], Vec::as_slice)
}

fn primary_image(item: &Value) -> String {
    first_present(item, &["image", "primaryImage"], value_as_image_url)
        .or_else(|| {
            image_entries(item)
                .iter()
                .filter(|entry| entry.get("isPrimary").and_then(Value::as_bool) == Some(true))
                .find_map(value_as_image_url)
        })
        .or_else(|| image_entries(item).first().and_then(value_as_image_url))
        .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_owned())
}

fn image_urls(item: &Value) -> Vec<String> {
    image_entries(item)
        .iter()
        .filter_map(value_as_image_url)
        .collect()
}

fn amenity_name(value: &Value) -> Option<String> {
    match value {
        Value::Object(map) => map.get("name").and_then(value_as_text),
        other => value_as_text(other),
    }
}

fn amenities(item: &Value) -> Vec<String> {
    ["amenities", "features"]
        .iter()
        .filter_map(|key| lookup(item, key).and_then(Value::as_array))
        .map(|entries| {
            let mut names: Vec<String> = Vec::with_capacity(entries.len());
            for name in entries.iter().filter_map(amenity_name) {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
            names
        })
        .find(|names| !names.is_empty())
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;

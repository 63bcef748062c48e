use serde::{Deserialize, Serialize};

/// Image shown when a vendor property carries no usable image URL.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.jpg";

/// Name shown when a vendor property has no name-like field.
pub const UNNAMED_PROPERTY: &str = "Unnamed Property";

/// Location shown when a vendor property has no location-like field.
pub const UNKNOWN_LOCATION: &str = "Unknown Location";

/// A rental property normalized from any vendor payload shape.
///
/// Every field is always populated; absent vendor data is replaced by a
/// documented default rather than left empty-and-optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalProperty {
    /// Vendor identifier, or a content-derived `rw-` id when the vendor sent none.
    pub id: String,
    pub name: String,
    /// Human-readable location, e.g. `"Austin, TX"`.
    pub location: String,
    /// Nightly base price in the vendor's currency. Never negative.
    pub price: f64,
    /// Primary image URL.
    pub image: String,
    pub images: Vec<String>,
    /// Amenity keys in vendor order, without duplicates.
    pub amenities: Vec<String>,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub guests: u32,
    pub description: String,
}

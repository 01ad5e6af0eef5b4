//! Address entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use nearby_core::types::{DbId, Timestamp};

/// A row from the `addresses` table. Coordinates are always present:
/// an address without resolved coordinates is never persisted.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Address {
    pub id: DbId,
    pub street: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating or replacing an address.
///
/// Coordinates are optional on input: when either is missing the
/// address store resolves them from the textual fields via the geo
/// provider before persisting.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAddress {
    #[validate(length(min = 1))]
    pub street: String,
    #[validate(length(min = 1))]
    pub city: String,
    #[validate(length(min = 1))]
    pub postal_code: String,
    #[validate(length(min = 1))]
    pub country: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl CreateAddress {
    /// Free-text query string sent to the geocoder.
    pub fn geocode_query(&self) -> String {
        format!(
            "{}, {}, {}, {}",
            self.street, self.city, self.postal_code, self.country
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geocode_query_concatenates_all_fields() {
        let input = CreateAddress {
            street: "123 Test St".into(),
            city: "Testville".into(),
            postal_code: "12345".into(),
            country: "Testland".into(),
            latitude: None,
            longitude: None,
        };
        assert_eq!(input.geocode_query(), "123 Test St, Testville, 12345, Testland");
    }
}

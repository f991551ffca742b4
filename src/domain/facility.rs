use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{Description, EntityName, FacilityCode, TypeConstraintError};

/// Postal address of a facility. Street, city, postal code and country are
/// mandatory; province is optional.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub postal_code: String,
    pub province: Option<String>,
    pub country: String,
}

impl Address {
    /// Builds a complete address, rejecting blank mandatory components.
    pub fn new(
        street: impl Into<String>,
        city: impl Into<String>,
        postal_code: impl Into<String>,
        province: Option<String>,
        country: impl Into<String>,
    ) -> Result<Self, TypeConstraintError> {
        let street = street.into().trim().to_string();
        let city = city.into().trim().to_string();
        let postal_code = postal_code.into().trim().to_string();
        let country = country.into().trim().to_string();
        if street.is_empty() || city.is_empty() || postal_code.is_empty() || country.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self {
            street,
            city,
            postal_code,
            province: province
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            country,
        })
    }
}

/// A site belonging to a client where robotic islands are installed.
/// At most one active facility per client carries `is_primary = true`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct Facility {
    pub id: i32,
    pub client_id: i32,
    pub name: String,
    pub code: Option<String>,
    pub description: Option<String>,
    pub address: Address,
    pub is_primary: bool,
    pub is_active: bool,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewFacility {
    pub client_id: i32,
    pub name: String,
    pub code: Option<String>,
    pub description: Option<String>,
    pub address: Address,
    pub is_primary: bool,
}

impl NewFacility {
    #[must_use]
    pub fn new(
        client_id: i32,
        name: EntityName,
        code: Option<FacilityCode>,
        description: Option<Description>,
        address: Address,
        is_primary: bool,
    ) -> Self {
        Self {
            client_id,
            name: name.into_inner(),
            code: code.map(FacilityCode::into_inner),
            description: description.map(Description::into_inner),
            address,
            is_primary,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct UpdateFacility {
    /// Carried for immutability enforcement; a differing value is rejected.
    pub client_id: i32,
    pub name: String,
    pub code: Option<String>,
    pub description: Option<String>,
    pub address: Address,
    pub is_primary: bool,
}

impl UpdateFacility {
    #[must_use]
    pub fn new(
        client_id: i32,
        name: EntityName,
        code: Option<FacilityCode>,
        description: Option<Description>,
        address: Address,
        is_primary: bool,
    ) -> Self {
        Self {
            client_id,
            name: name.into_inner(),
            code: code.map(FacilityCode::into_inner),
            description: description.map(Description::into_inner),
            address,
            is_primary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_requires_mandatory_components() {
        assert!(Address::new("Via Roma 1", "Milano", "20100", None, "IT").is_ok());
        assert!(Address::new("", "Milano", "20100", None, "IT").is_err());
        assert!(Address::new("Via Roma 1", "Milano", "  ", None, "IT").is_err());
    }

    #[test]
    fn address_drops_blank_province() {
        let address =
            Address::new("Via Roma 1", "Milano", "20100", Some("  ".to_string()), "IT").unwrap();
        assert_eq!(address.province, None);
    }
}

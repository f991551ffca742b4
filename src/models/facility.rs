use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::facility::{
    Address, Facility as DomainFacility, NewFacility as DomainNewFacility,
    UpdateFacility as DomainUpdateFacility,
};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::facilities)]
/// Diesel model for [`crate::domain::facility::Facility`]. The address is
/// flattened into dedicated columns.
pub struct Facility {
    pub id: i32,
    pub client_id: i32,
    pub name: String,
    pub code: Option<String>,
    pub description: Option<String>,
    pub address_street: String,
    pub address_city: String,
    pub address_postal_code: String,
    pub address_province: Option<String>,
    pub address_country: String,
    pub is_primary: bool,
    pub is_active: bool,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::facilities)]
/// Insertable form of [`Facility`].
pub struct NewFacility<'a> {
    pub client_id: i32,
    pub name: &'a str,
    pub code: Option<&'a str>,
    pub description: Option<&'a str>,
    pub address_street: &'a str,
    pub address_city: &'a str,
    pub address_postal_code: &'a str,
    pub address_province: Option<&'a str>,
    pub address_country: &'a str,
    pub is_primary: bool,
    pub is_active: bool,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::facilities)]
/// Data used when updating a [`Facility`] record. The primary flag is
/// managed separately through the atomic set-primary operation.
pub struct UpdateFacility<'a> {
    pub name: &'a str,
    pub code: Option<Option<&'a str>>,
    pub description: Option<Option<&'a str>>,
    pub address_street: &'a str,
    pub address_city: &'a str,
    pub address_postal_code: &'a str,
    pub address_province: Option<Option<&'a str>>,
    pub address_country: &'a str,
}

impl From<Facility> for DomainFacility {
    fn from(facility: Facility) -> Self {
        Self {
            id: facility.id,
            client_id: facility.client_id,
            name: facility.name,
            code: facility.code,
            description: facility.description,
            address: Address {
                street: facility.address_street,
                city: facility.address_city,
                postal_code: facility.address_postal_code,
                province: facility.address_province,
                country: facility.address_country,
            },
            is_primary: facility.is_primary,
            is_active: facility.is_active,
            updated_at: facility.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewFacility> for NewFacility<'a> {
    fn from(facility: &'a DomainNewFacility) -> Self {
        Self {
            client_id: facility.client_id,
            name: facility.name.as_str(),
            code: facility.code.as_deref(),
            description: facility.description.as_deref(),
            address_street: facility.address.street.as_str(),
            address_city: facility.address.city.as_str(),
            address_postal_code: facility.address.postal_code.as_str(),
            address_province: facility.address.province.as_deref(),
            address_country: facility.address.country.as_str(),
            is_primary: facility.is_primary,
            is_active: true,
        }
    }
}

impl<'a> From<&'a DomainUpdateFacility> for UpdateFacility<'a> {
    fn from(facility: &'a DomainUpdateFacility) -> Self {
        Self {
            name: facility.name.as_str(),
            code: Some(facility.code.as_deref()),
            description: Some(facility.description.as_deref()),
            address_street: facility.address.street.as_str(),
            address_city: facility.address.city.as_str(),
            address_postal_code: facility.address.postal_code.as_str(),
            address_province: Some(facility.address.province.as_deref()),
            address_country: facility.address.country.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn facility_into_domain_rebuilds_address() {
        let now: NaiveDateTime = Utc::now().naive_utc();
        let db_facility = Facility {
            id: 3,
            client_id: 1,
            name: "North plant".to_string(),
            code: Some("NP-01".to_string()),
            description: None,
            address_street: "Via Po 12".to_string(),
            address_city: "Torino".to_string(),
            address_postal_code: "10100".to_string(),
            address_province: Some("TO".to_string()),
            address_country: "IT".to_string(),
            is_primary: true,
            is_active: true,
            updated_at: now,
        };
        let domain: DomainFacility = db_facility.into();
        assert_eq!(domain.address.street, "Via Po 12");
        assert_eq!(domain.address.province, Some("TO".to_string()));
        assert!(domain.is_primary);
    }

    #[test]
    fn new_facilities_are_created_active() {
        let address = Address::new("Via Po 12", "Torino", "10100", None, "IT").unwrap();
        let domain = DomainNewFacility {
            client_id: 1,
            name: "North plant".to_string(),
            code: None,
            description: None,
            address,
            is_primary: false,
        };
        let new: NewFacility = (&domain).into();
        assert!(new.is_active);
        assert_eq!(new.address_city, "Torino");
    }
}

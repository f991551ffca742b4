use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{ContactEmail, EntityName, PhoneNumber};

/// A person attached to a client. At most one active contact per client
/// carries `is_primary = true`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct Contact {
    pub id: i32,
    pub client_id: i32,
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub mobile_phone: Option<String>,
    pub role: Option<String>,
    pub is_primary: bool,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewContact {
    pub client_id: i32,
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub mobile_phone: Option<String>,
    pub role: Option<String>,
    pub is_primary: bool,
}

impl NewContact {
    #[must_use]
    pub fn new(
        client_id: i32,
        full_name: EntityName,
        email: Option<ContactEmail>,
        phone: Option<PhoneNumber>,
        mobile_phone: Option<PhoneNumber>,
        role: Option<String>,
        is_primary: bool,
    ) -> Self {
        Self {
            client_id,
            full_name: full_name.into_inner(),
            email: email.map(ContactEmail::into_inner),
            phone: phone.map(PhoneNumber::into_inner),
            mobile_phone: mobile_phone.map(PhoneNumber::into_inner),
            role: role.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()),
            is_primary,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct UpdateContact {
    /// Carried for immutability enforcement; a differing value is rejected.
    pub client_id: i32,
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub mobile_phone: Option<String>,
    pub role: Option<String>,
    pub is_primary: bool,
}

impl UpdateContact {
    #[must_use]
    pub fn new(
        client_id: i32,
        full_name: EntityName,
        email: Option<ContactEmail>,
        phone: Option<PhoneNumber>,
        mobile_phone: Option<PhoneNumber>,
        role: Option<String>,
        is_primary: bool,
    ) -> Self {
        Self {
            client_id,
            full_name: full_name.into_inner(),
            email: email.map(ContactEmail::into_inner),
            phone: phone.map(PhoneNumber::into_inner),
            mobile_phone: mobile_phone.map(PhoneNumber::into_inner),
            role: role.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()),
            is_primary,
        }
    }
}

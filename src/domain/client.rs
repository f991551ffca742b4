use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{ContactEmail, EntityName, PhoneNumber};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct Client {
    pub id: i32,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewClient {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl NewClient {
    #[must_use]
    pub fn new(
        name: EntityName,
        email: Option<ContactEmail>,
        phone: Option<PhoneNumber>,
        address: Option<String>,
    ) -> Self {
        Self {
            name: name.into_inner(),
            email: email.map(ContactEmail::into_inner),
            phone: phone.map(PhoneNumber::into_inner),
            address: address
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct UpdateClient {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl UpdateClient {
    #[must_use]
    pub fn new(
        name: EntityName,
        email: Option<ContactEmail>,
        phone: Option<PhoneNumber>,
        address: Option<String>,
    ) -> Self {
        Self {
            name: name.into_inner(),
            email: email.map(ContactEmail::into_inner),
            phone: phone.map(PhoneNumber::into_inner),
            address: address
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }
}

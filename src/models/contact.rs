use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::contact::{
    Contact as DomainContact, NewContact as DomainNewContact, UpdateContact as DomainUpdateContact,
};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::contacts)]
/// Diesel model for [`crate::domain::contact::Contact`].
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

#[derive(Insertable)]
#[diesel(table_name = crate::schema::contacts)]
/// Insertable form of [`Contact`].
pub struct NewContact<'a> {
    pub client_id: i32,
    pub full_name: &'a str,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub mobile_phone: Option<&'a str>,
    pub role: Option<&'a str>,
    pub is_primary: bool,
    pub is_active: bool,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::contacts)]
/// Data used when updating a [`Contact`] record. The primary flag is
/// managed separately through the atomic set-primary operation.
pub struct UpdateContact<'a> {
    pub full_name: &'a str,
    pub email: Option<Option<&'a str>>,
    pub phone: Option<Option<&'a str>>,
    pub mobile_phone: Option<Option<&'a str>>,
    pub role: Option<Option<&'a str>>,
}

impl From<Contact> for DomainContact {
    fn from(contact: Contact) -> Self {
        Self {
            id: contact.id,
            client_id: contact.client_id,
            full_name: contact.full_name,
            email: contact.email,
            phone: contact.phone,
            mobile_phone: contact.mobile_phone,
            role: contact.role,
            is_primary: contact.is_primary,
            is_active: contact.is_active,
            created_at: contact.created_at,
            updated_at: contact.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewContact> for NewContact<'a> {
    fn from(contact: &'a DomainNewContact) -> Self {
        Self {
            client_id: contact.client_id,
            full_name: contact.full_name.as_str(),
            email: contact.email.as_deref(),
            phone: contact.phone.as_deref(),
            mobile_phone: contact.mobile_phone.as_deref(),
            role: contact.role.as_deref(),
            is_primary: contact.is_primary,
            is_active: true,
        }
    }
}

impl<'a> From<&'a DomainUpdateContact> for UpdateContact<'a> {
    fn from(contact: &'a DomainUpdateContact) -> Self {
        Self {
            full_name: contact.full_name.as_str(),
            email: Some(contact.email.as_deref()),
            phone: Some(contact.phone.as_deref()),
            mobile_phone: Some(contact.mobile_phone.as_deref()),
            role: Some(contact.role.as_deref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn contact_into_domain() {
        let now: NaiveDateTime = Utc::now().naive_utc();
        let db_contact = Contact {
            id: 7,
            client_id: 1,
            full_name: "Anna Bianchi".to_string(),
            email: Some("anna@example.com".to_string()),
            phone: None,
            mobile_phone: Some("+393331234567".to_string()),
            role: Some("Plant manager".to_string()),
            is_primary: true,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        let domain: DomainContact = db_contact.into();
        assert_eq!(domain.id, 7);
        assert_eq!(domain.client_id, 1);
        assert!(domain.is_primary);
        assert!(domain.is_active);
        assert_eq!(domain.mobile_phone, Some("+393331234567".to_string()));
    }

    #[test]
    fn new_contacts_are_created_active() {
        let domain = DomainNewContact {
            client_id: 1,
            full_name: "Marco Verdi".to_string(),
            email: None,
            phone: None,
            mobile_phone: None,
            role: None,
            is_primary: false,
        };
        let new: NewContact = (&domain).into();
        assert!(new.is_active);
        assert!(!new.is_primary);
    }

    #[test]
    fn update_changeset_overwrites_optional_fields() {
        let domain = DomainUpdateContact {
            client_id: 1,
            full_name: "Marco Verdi".to_string(),
            email: None,
            phone: Some("+390211111111".to_string()),
            mobile_phone: None,
            role: None,
            is_primary: false,
        };
        let update: UpdateContact = (&domain).into();
        // A cleared optional field must become an explicit NULL, not a no-op.
        assert_eq!(update.email, Some(None));
        assert_eq!(update.phone, Some(Some("+390211111111")));
    }
}

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::client::{
    Client as DomainClient, NewClient as DomainNewClient, UpdateClient as DomainUpdateClient,
};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::clients)]
/// Diesel model for [`crate::domain::client::Client`].
pub struct Client {
    pub id: i32,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::clients)]
/// Insertable form of [`Client`].
pub struct NewClient<'a> {
    pub name: &'a str,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub address: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::clients)]
/// Data used when updating a [`Client`] record.
pub struct UpdateClient<'a> {
    pub name: &'a str,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub address: Option<&'a str>,
}

impl From<Client> for DomainClient {
    fn from(client: Client) -> Self {
        Self {
            id: client.id,
            name: client.name,
            email: client.email,
            phone: client.phone,
            address: client.address,
            created_at: client.created_at,
            updated_at: client.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewClient> for NewClient<'a> {
    fn from(client: &'a DomainNewClient) -> Self {
        Self {
            name: client.name.as_str(),
            email: client.email.as_deref(),
            phone: client.phone.as_deref(),
            address: client.address.as_deref(),
        }
    }
}

impl<'a> From<&'a DomainUpdateClient> for UpdateClient<'a> {
    fn from(client: &'a DomainUpdateClient) -> Self {
        Self {
            name: client.name.as_str(),
            email: client.email.as_deref(),
            phone: client.phone.as_deref(),
            address: client.address.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn client_into_domain() {
        let now: NaiveDateTime = Utc::now().naive_utc();
        let db_client = Client {
            id: 1,
            name: "Acme Robotics".to_string(),
            email: Some("info@acme.test".to_string()),
            phone: Some("+390212345678".to_string()),
            address: Some("Via Roma 1".to_string()),
            created_at: now,
            updated_at: now,
        };
        let domain: DomainClient = db_client.into();
        assert_eq!(domain.id, 1);
        assert_eq!(domain.name, "Acme Robotics");
        assert_eq!(domain.email, Some("info@acme.test".to_string()));
        assert_eq!(domain.created_at, now);
    }

    #[test]
    fn from_domain_new_borrows_fields() {
        let domain = DomainNewClient {
            name: "Acme".to_string(),
            email: None,
            phone: Some("+390212345678".to_string()),
            address: None,
        };
        let new: NewClient = (&domain).into();
        assert_eq!(new.name, "Acme");
        assert_eq!(new.email, None);
        assert_eq!(new.phone, Some("+390212345678"));
    }
}

use serde::Deserialize;
use validator::Validate;

use crate::domain::client::{NewClient, UpdateClient};
use crate::domain::types::{ContactEmail, EntityName, PhoneNumber};
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
/// Form data for creating or updating a client.
pub struct ClientForm {
    #[validate(length(min = 2, max = 100))]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
}

/// Validated client payload carrying typed values.
pub struct ClientPayload {
    pub name: EntityName,
    pub email: Option<ContactEmail>,
    pub phone: Option<PhoneNumber>,
    pub address: Option<String>,
}

impl TryFrom<ClientForm> for ClientPayload {
    type Error = FormError;

    fn try_from(form: ClientForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let name = EntityName::new(form.name).map_err(|e| FormError::InvalidName(e.to_string()))?;
        let email = match form.email.trim() {
            "" => None,
            raw => Some(ContactEmail::new(raw).map_err(|_| FormError::InvalidEmail)?),
        };
        let phone = match form.phone.trim() {
            "" => None,
            raw => Some(PhoneNumber::new(raw).map_err(|_| FormError::InvalidPhoneNumber)?),
        };
        let address = Some(form.address.trim().to_string()).filter(|s| !s.is_empty());

        Ok(Self {
            name,
            email,
            phone,
            address,
        })
    }
}

impl ClientPayload {
    pub fn into_new(self) -> NewClient {
        NewClient::new(self.name, self.email, self.phone, self.address)
    }

    pub fn into_update(self) -> UpdateClient {
        UpdateClient::new(self.name, self.email, self.phone, self.address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_normalizes_optional_fields() {
        let form = ClientForm {
            name: "  Acme Robotics  ".to_string(),
            email: " Info@Acme.TEST ".to_string(),
            phone: String::new(),
            address: "  ".to_string(),
        };
        let payload = ClientPayload::try_from(form).unwrap();
        assert_eq!(payload.name.as_str(), "Acme Robotics");
        assert_eq!(payload.email.as_ref().unwrap().as_str(), "info@acme.test");
        assert!(payload.phone.is_none());
        assert!(payload.address.is_none());
    }

    #[test]
    fn short_name_is_rejected() {
        let form = ClientForm {
            name: "A".to_string(),
            email: String::new(),
            phone: String::new(),
            address: String::new(),
        };
        assert!(matches!(
            ClientPayload::try_from(form),
            Err(FormError::Validation(_))
        ));
    }
}

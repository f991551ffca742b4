use serde::Deserialize;
use validator::Validate;

use crate::domain::contact::{NewContact, UpdateContact};
use crate::domain::types::{ClientId, ContactEmail, EntityName, PhoneNumber};
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
/// Form data for creating or updating a contact person.
pub struct ContactForm {
    pub client_id: i32,
    #[validate(length(min = 2, max = 100))]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub mobile_phone: String,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub role: String,
    #[serde(default)]
    pub is_primary: bool,
}

/// Validated contact payload carrying typed values.
pub struct ContactPayload {
    pub client_id: ClientId,
    pub full_name: EntityName,
    pub email: Option<ContactEmail>,
    pub phone: Option<PhoneNumber>,
    pub mobile_phone: Option<PhoneNumber>,
    pub role: Option<String>,
    pub is_primary: bool,
}

impl TryFrom<ContactForm> for ContactPayload {
    type Error = FormError;

    fn try_from(form: ContactForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let client_id = ClientId::new(form.client_id).map_err(|_| FormError::InvalidClientId)?;
        let full_name =
            EntityName::new(form.full_name).map_err(|e| FormError::InvalidName(e.to_string()))?;
        let email = match form.email.trim() {
            "" => None,
            raw => Some(ContactEmail::new(raw).map_err(|_| FormError::InvalidEmail)?),
        };
        let phone = match form.phone.trim() {
            "" => None,
            raw => Some(PhoneNumber::new(raw).map_err(|_| FormError::InvalidPhoneNumber)?),
        };
        let mobile_phone = match form.mobile_phone.trim() {
            "" => None,
            raw => Some(PhoneNumber::new(raw).map_err(|_| FormError::InvalidPhoneNumber)?),
        };
        let role = Some(form.role.trim().to_string()).filter(|s| !s.is_empty());

        Ok(Self {
            client_id,
            full_name,
            email,
            phone,
            mobile_phone,
            role,
            is_primary: form.is_primary,
        })
    }
}

impl ContactPayload {
    pub fn into_new(self) -> NewContact {
        NewContact::new(
            self.client_id.get(),
            self.full_name,
            self.email,
            self.phone,
            self.mobile_phone,
            self.role,
            self.is_primary,
        )
    }

    pub fn into_update(self) -> UpdateContact {
        UpdateContact::new(
            self.client_id.get(),
            self.full_name,
            self.email,
            self.phone,
            self.mobile_phone,
            self.role,
            self.is_primary,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_form() -> ContactForm {
        ContactForm {
            client_id: 1,
            full_name: "Anna Bianchi".to_string(),
            email: "anna@example.com".to_string(),
            phone: String::new(),
            mobile_phone: "+39 333 123 4567".to_string(),
            role: " Plant manager ".to_string(),
            is_primary: false,
        }
    }

    #[test]
    fn payload_normalizes_and_types_fields() {
        let payload = ContactPayload::try_from(base_form()).unwrap();
        assert_eq!(payload.client_id.get(), 1);
        assert_eq!(payload.full_name.as_str(), "Anna Bianchi");
        assert!(payload.phone.is_none());
        assert_eq!(
            payload.mobile_phone.as_ref().unwrap().as_str(),
            "+393331234567"
        );
        assert_eq!(payload.role.as_deref(), Some("Plant manager"));
    }

    #[test]
    fn invalid_client_id_is_rejected() {
        let mut form = base_form();
        form.client_id = 0;
        assert!(matches!(
            ContactPayload::try_from(form),
            Err(FormError::InvalidClientId)
        ));
    }

    #[test]
    fn malformed_email_is_rejected() {
        let mut form = base_form();
        form.email = "nope".to_string();
        assert!(matches!(
            ContactPayload::try_from(form),
            Err(FormError::InvalidEmail)
        ));
    }

    #[test]
    fn name_length_bounds_are_enforced() {
        let mut form = base_form();
        form.full_name = "A".to_string();
        assert!(matches!(
            ContactPayload::try_from(form),
            Err(FormError::Validation(_))
        ));
    }
}

use serde::Deserialize;
use validator::Validate;

use crate::domain::facility::{Address, NewFacility, UpdateFacility};
use crate::domain::types::{ClientId, Description, EntityName, FacilityCode};
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
/// Form data for creating or updating a facility.
pub struct FacilityForm {
    pub client_id: i32,
    #[validate(length(min = 2, max = 100))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 50))]
    pub code: String,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub description: String,
    pub street: String,
    pub city: String,
    pub postal_code: String,
    #[serde(default)]
    pub province: String,
    pub country: String,
    #[serde(default)]
    pub is_primary: bool,
}

/// Validated facility payload carrying typed values.
pub struct FacilityPayload {
    pub client_id: ClientId,
    pub name: EntityName,
    pub code: Option<FacilityCode>,
    pub description: Option<Description>,
    pub address: Address,
    pub is_primary: bool,
}

impl TryFrom<FacilityForm> for FacilityPayload {
    type Error = FormError;

    fn try_from(form: FacilityForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let client_id = ClientId::new(form.client_id).map_err(|_| FormError::InvalidClientId)?;
        let name = EntityName::new(form.name).map_err(|e| FormError::InvalidName(e.to_string()))?;
        let code = match form.code.trim() {
            "" => None,
            raw => Some(FacilityCode::new(raw).map_err(|e| FormError::InvalidCode(e.to_string()))?),
        };
        let description = match form.description.trim() {
            "" => None,
            raw => Some(
                Description::new(raw).map_err(|e| FormError::InvalidDescription(e.to_string()))?,
            ),
        };
        let province = Some(form.province.trim().to_string()).filter(|s| !s.is_empty());
        let address = Address::new(
            form.street,
            form.city,
            form.postal_code,
            province,
            form.country,
        )
        .map_err(|_| FormError::IncompleteAddress)?;

        Ok(Self {
            client_id,
            name,
            code,
            description,
            address,
            is_primary: form.is_primary,
        })
    }
}

impl FacilityPayload {
    pub fn into_new(self) -> NewFacility {
        NewFacility::new(
            self.client_id.get(),
            self.name,
            self.code,
            self.description,
            self.address,
            self.is_primary,
        )
    }

    pub fn into_update(self) -> UpdateFacility {
        UpdateFacility::new(
            self.client_id.get(),
            self.name,
            self.code,
            self.description,
            self.address,
            self.is_primary,
        )
    }
}

use crate::{
    db::{DbConnection, DbPool},
    domain::{
        client::{Client, NewClient, UpdateClient},
        contact::{Contact, NewContact, UpdateContact},
        facility::{Facility, NewFacility, UpdateFacility},
        intervention::{
            DetailsSection, GeneralSection, InterventionStatus, NewIntervention, NewWorkDay,
            SignaturesSection, TechnicalIntervention, WorkDay,
        },
        settings::CardVariant,
        types::{ClientId, ContactId, FacilityId, InterventionId},
    },
    repository::errors::{RepositoryError, RepositoryResult},
};

pub mod client;
pub mod contact;
pub mod errors;
pub mod facility;
pub mod intervention;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod settings;

#[derive(Debug, Clone)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

#[derive(Debug, Clone)]
pub struct ClientListQuery {
    pub search: Option<String>,
    pub pagination: Option<Pagination>,
}

impl ClientListQuery {
    pub fn new() -> Self {
        Self {
            search: None,
            pagination: None,
        }
    }

    pub fn search(mut self, needle: impl Into<String>) -> Self {
        self.search = Some(needle.into());
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

impl Default for ClientListQuery {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub struct ContactListQuery {
    pub client_id: ClientId,
    pub include_inactive: bool,
    pub pagination: Option<Pagination>,
}

impl ContactListQuery {
    pub fn new(client_id: ClientId) -> Self {
        Self {
            client_id,
            include_inactive: false,
            pagination: None,
        }
    }

    pub fn include_inactive(mut self) -> Self {
        self.include_inactive = true;
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[derive(Debug, Clone)]
pub struct FacilityListQuery {
    pub client_id: ClientId,
    pub include_inactive: bool,
    pub pagination: Option<Pagination>,
}

impl FacilityListQuery {
    pub fn new(client_id: ClientId) -> Self {
        Self {
            client_id,
            include_inactive: false,
            pagination: None,
        }
    }

    pub fn include_inactive(mut self) -> Self {
        self.include_inactive = true;
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[derive(Debug, Clone)]
pub struct InterventionListQuery {
    pub client_id: Option<ClientId>,
    pub status: Option<InterventionStatus>,
    pub pagination: Option<Pagination>,
}

impl InterventionListQuery {
    pub fn new() -> Self {
        Self {
            client_id: None,
            status: None,
            pagination: None,
        }
    }

    pub fn client(mut self, client_id: ClientId) -> Self {
        self.client_id = Some(client_id);
        self
    }

    pub fn status(mut self, status: InterventionStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

impl Default for InterventionListQuery {
    fn default() -> Self {
        Self::new()
    }
}

pub trait ClientReader {
    fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>>;
    fn list_clients(&self, query: ClientListQuery) -> RepositoryResult<(usize, Vec<Client>)>;
}

pub trait ClientWriter {
    fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client>;
    fn update_client(&self, client_id: ClientId, updates: &UpdateClient)
    -> RepositoryResult<Client>;
    fn delete_client(&self, client_id: ClientId) -> RepositoryResult<()>;
}

pub trait ContactReader {
    fn get_contact_by_id(&self, id: ContactId) -> RepositoryResult<Option<Contact>>;
    fn list_contacts(&self, query: ContactListQuery) -> RepositoryResult<Vec<Contact>>;
    fn get_primary_contact(&self, client_id: ClientId) -> RepositoryResult<Option<Contact>>;
    /// Global uniqueness probe over all contacts, both phone columns included.
    fn find_contact_by_email(
        &self,
        email: &str,
        exclude: Option<ContactId>,
    ) -> RepositoryResult<Option<Contact>>;
    fn find_contact_by_phone(
        &self,
        phone: &str,
        exclude: Option<ContactId>,
    ) -> RepositoryResult<Option<Contact>>;
}

pub trait ContactWriter {
    /// Creates a contact, transactionally forcing the primary flag when the
    /// client has no active primary yet and reassigning it when the caller
    /// explicitly requests primary.
    fn create_contact(&self, new_contact: &NewContact) -> RepositoryResult<Contact>;
    fn update_contact(
        &self,
        contact_id: ContactId,
        updates: &UpdateContact,
    ) -> RepositoryResult<Contact>;
    /// Atomically clears the previous primary contact of the client and
    /// marks the given one primary.
    fn set_primary_contact(
        &self,
        client_id: ClientId,
        contact_id: ContactId,
    ) -> RepositoryResult<()>;
    /// Soft-deletes the contact, clearing both active and primary flags.
    fn deactivate_contact(&self, contact_id: ContactId) -> RepositoryResult<Contact>;
}

pub trait FacilityReader {
    fn get_facility_by_id(&self, id: FacilityId) -> RepositoryResult<Option<Facility>>;
    fn list_facilities(&self, query: FacilityListQuery) -> RepositoryResult<Vec<Facility>>;
    fn get_primary_facility(&self, client_id: ClientId) -> RepositoryResult<Option<Facility>>;
    /// Duplicate-name probe scoped to one client's active facilities.
    fn find_facility_by_name(
        &self,
        client_id: ClientId,
        name: &str,
        exclude: Option<FacilityId>,
    ) -> RepositoryResult<Option<Facility>>;
}

pub trait FacilityWriter {
    fn create_facility(&self, new_facility: &NewFacility) -> RepositoryResult<Facility>;
    fn update_facility(
        &self,
        facility_id: FacilityId,
        updates: &UpdateFacility,
    ) -> RepositoryResult<Facility>;
    fn set_primary_facility(
        &self,
        client_id: ClientId,
        facility_id: FacilityId,
    ) -> RepositoryResult<()>;
    fn deactivate_facility(&self, facility_id: FacilityId) -> RepositoryResult<Facility>;
}

pub trait InterventionReader {
    fn get_intervention_by_id(
        &self,
        id: InterventionId,
    ) -> RepositoryResult<Option<TechnicalIntervention>>;
    fn list_interventions(
        &self,
        query: InterventionListQuery,
    ) -> RepositoryResult<(usize, Vec<TechnicalIntervention>)>;
}

pub trait InterventionWriter {
    fn create_intervention(
        &self,
        new_intervention: &NewIntervention,
    ) -> RepositoryResult<TechnicalIntervention>;
    fn update_general(
        &self,
        id: InterventionId,
        section: &GeneralSection,
    ) -> RepositoryResult<TechnicalIntervention>;
    fn update_details(
        &self,
        id: InterventionId,
        section: &DetailsSection,
    ) -> RepositoryResult<TechnicalIntervention>;
    fn replace_work_days(
        &self,
        id: InterventionId,
        work_days: &[NewWorkDay],
    ) -> RepositoryResult<Vec<WorkDay>>;
    fn update_signatures(
        &self,
        id: InterventionId,
        section: &SignaturesSection,
    ) -> RepositoryResult<TechnicalIntervention>;
    fn set_status(
        &self,
        id: InterventionId,
        status: InterventionStatus,
    ) -> RepositoryResult<TechnicalIntervention>;
    fn delete_intervention(&self, id: InterventionId) -> RepositoryResult<()>;
}

pub trait SettingsReader {
    fn get_card_variant(&self, list_key: &str) -> RepositoryResult<Option<CardVariant>>;
}

pub trait SettingsWriter {
    fn set_card_variant(&self, list_key: &str, variant: CardVariant) -> RepositoryResult<()>;
}

/// Diesel-backed implementation of every repository trait.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub(crate) fn conn(&self) -> Result<DbConnection, RepositoryError> {
        Ok(self.pool.get()?)
    }
}

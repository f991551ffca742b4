//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::client::{Client, NewClient, UpdateClient};
use crate::domain::contact::{Contact, NewContact, UpdateContact};
use crate::domain::facility::{Facility, NewFacility, UpdateFacility};
use crate::domain::intervention::{
    DetailsSection, GeneralSection, InterventionStatus, NewIntervention, NewWorkDay,
    SignaturesSection, TechnicalIntervention, WorkDay,
};
use crate::domain::settings::CardVariant;
use crate::domain::types::{ClientId, ContactId, FacilityId, InterventionId};
use crate::repository::{
    ClientListQuery, ClientReader, ClientWriter, ContactListQuery, ContactReader, ContactWriter,
    FacilityListQuery, FacilityReader, FacilityWriter, InterventionListQuery, InterventionReader,
    InterventionWriter, SettingsReader, SettingsWriter, errors::RepositoryResult,
};

mock! {
    pub Repository {}

    impl ClientReader for Repository {
        fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>>;
        fn list_clients(&self, query: ClientListQuery) -> RepositoryResult<(usize, Vec<Client>)>;
    }

    impl ClientWriter for Repository {
        fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client>;
        fn update_client(
            &self,
            client_id: ClientId,
            updates: &UpdateClient,
        ) -> RepositoryResult<Client>;
        fn delete_client(&self, client_id: ClientId) -> RepositoryResult<()>;
    }

    impl ContactReader for Repository {
        fn get_contact_by_id(&self, id: ContactId) -> RepositoryResult<Option<Contact>>;
        fn list_contacts(&self, query: ContactListQuery) -> RepositoryResult<Vec<Contact>>;
        fn get_primary_contact(&self, client_id: ClientId) -> RepositoryResult<Option<Contact>>;
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

    impl ContactWriter for Repository {
        fn create_contact(&self, new_contact: &NewContact) -> RepositoryResult<Contact>;
        fn update_contact(
            &self,
            contact_id: ContactId,
            updates: &UpdateContact,
        ) -> RepositoryResult<Contact>;
        fn set_primary_contact(
            &self,
            client_id: ClientId,
            contact_id: ContactId,
        ) -> RepositoryResult<()>;
        fn deactivate_contact(&self, contact_id: ContactId) -> RepositoryResult<Contact>;
    }

    impl FacilityReader for Repository {
        fn get_facility_by_id(&self, id: FacilityId) -> RepositoryResult<Option<Facility>>;
        fn list_facilities(&self, query: FacilityListQuery) -> RepositoryResult<Vec<Facility>>;
        fn get_primary_facility(&self, client_id: ClientId) -> RepositoryResult<Option<Facility>>;
        fn find_facility_by_name(
            &self,
            client_id: ClientId,
            name: &str,
            exclude: Option<FacilityId>,
        ) -> RepositoryResult<Option<Facility>>;
    }

    impl FacilityWriter for Repository {
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

    impl InterventionReader for Repository {
        fn get_intervention_by_id(
            &self,
            id: InterventionId,
        ) -> RepositoryResult<Option<TechnicalIntervention>>;
        fn list_interventions(
            &self,
            query: InterventionListQuery,
        ) -> RepositoryResult<(usize, Vec<TechnicalIntervention>)>;
    }

    impl InterventionWriter for Repository {
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

    impl SettingsReader for Repository {
        fn get_card_variant(&self, list_key: &str) -> RepositoryResult<Option<CardVariant>>;
    }

    impl SettingsWriter for Repository {
        fn set_card_variant(&self, list_key: &str, variant: CardVariant) -> RepositoryResult<()>;
    }
}

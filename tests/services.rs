//! End-to-end service tests over a real SQLite store, covering the
//! single-primary invariant, the status state machine and the batch
//! summaries.

use qreport::domain::client::NewClient;
use qreport::domain::intervention::{
    CustomerData, GeneralSection, InterventionStatus, RobotData, WorkLocation,
};
use qreport::domain::types::{ClientId, ContactId, FacilityId, InterventionId};
use qreport::forms::contact::ContactForm;
use qreport::forms::facility::FacilityForm;
use qreport::repository::{
    ClientWriter, ContactListQuery, ContactReader, DieselRepository, FacilityListQuery,
    FacilityReader,
};
use qreport::services::{ServiceError, contacts, facilities, interventions};

mod common;

fn setup(name: &str) -> (common::TestDb, DieselRepository, ClientId) {
    let test_db = common::TestDb::new(name);
    let repo = DieselRepository::new(test_db.pool());
    let client = repo
        .create_client(&NewClient {
            name: "Acme Robotics".to_string(),
            email: None,
            phone: None,
            address: None,
        })
        .unwrap();
    let client_id = ClientId::new(client.id).unwrap();
    (test_db, repo, client_id)
}

fn contact_form(client_id: ClientId, name: &str, is_primary: bool) -> ContactForm {
    ContactForm {
        client_id: client_id.get(),
        full_name: name.to_string(),
        email: String::new(),
        phone: String::new(),
        mobile_phone: String::new(),
        role: String::new(),
        is_primary,
    }
}

fn facility_form(client_id: ClientId, name: &str, is_primary: bool) -> FacilityForm {
    FacilityForm {
        client_id: client_id.get(),
        name: name.to_string(),
        code: String::new(),
        description: String::new(),
        street: "Via Po 12".to_string(),
        city: "Torino".to_string(),
        postal_code: "10100".to_string(),
        province: String::new(),
        country: "IT".to_string(),
        is_primary,
    }
}

fn assert_single_primary(repo: &DieselRepository, client_id: ClientId) {
    let contacts = repo
        .list_contacts(ContactListQuery::new(client_id))
        .unwrap();
    assert!(contacts.iter().filter(|c| c.is_primary).count() <= 1);

    let facilities = repo
        .list_facilities(FacilityListQuery::new(client_id))
        .unwrap();
    assert!(facilities.iter().filter(|f| f.is_primary).count() <= 1);
}

#[test]
fn invariant_holds_across_a_long_mutation_sequence() {
    let (_db, repo, client_id) = setup("invariant_holds_across_sequence.db");

    let anna = contacts::create_contact(&repo, contact_form(client_id, "Anna Bianchi", false))
        .unwrap();
    assert!(anna.is_primary);
    assert_single_primary(&repo, client_id);

    let marco = contacts::create_contact(&repo, contact_form(client_id, "Marco Verdi", false))
        .unwrap();
    assert!(!marco.is_primary);
    assert_single_primary(&repo, client_id);

    // Promote Marco, demote him again, deactivate Anna.
    let marco_id = ContactId::new(marco.id).unwrap();
    let promoted = contacts::update_contact(&repo, marco_id, contact_form(client_id, "Marco Verdi", true))
        .unwrap();
    assert!(promoted.is_primary);
    assert_single_primary(&repo, client_id);

    let demoted = contacts::update_contact(
        &repo,
        marco_id,
        contact_form(client_id, "Marco Verdi", false),
    )
    .unwrap();
    assert!(!demoted.is_primary);
    assert_single_primary(&repo, client_id);

    let anna_id = ContactId::new(anna.id).unwrap();
    let anna_now = repo.get_contact_by_id(anna_id).unwrap().unwrap();
    assert!(anna_now.is_primary);

    contacts::deactivate_contact(&repo, anna_id).unwrap();
    assert_single_primary(&repo, client_id);

    // Marco is the only active contact left and must hold the flag.
    let marco_now = repo.get_contact_by_id(marco_id).unwrap().unwrap();
    assert!(marco_now.is_primary);
}

#[test]
fn demoting_sole_primary_facility_fails_and_keeps_the_flag() {
    let (_db, repo, client_id) = setup("demoting_sole_primary_facility_fails.db");

    let plant = facilities::create_facility(&repo, facility_form(client_id, "North plant", false))
        .unwrap();
    assert!(plant.is_primary);

    let plant_id = FacilityId::new(plant.id).unwrap();
    let result = facilities::update_facility(
        &repo,
        plant_id,
        facility_form(client_id, "North plant", false),
    );
    assert!(matches!(result, Err(ServiceError::InvalidState(_))));

    let unchanged = repo.get_facility_by_id(plant_id).unwrap().unwrap();
    assert!(unchanged.is_primary);
}

#[test]
fn demoting_primary_facility_promotes_exactly_one_other() {
    let (_db, repo, client_id) = setup("demoting_primary_facility_promotes.db");

    let north = facilities::create_facility(&repo, facility_form(client_id, "North plant", false))
        .unwrap();
    facilities::create_facility(&repo, facility_form(client_id, "South plant", false)).unwrap();
    facilities::create_facility(&repo, facility_form(client_id, "East plant", false)).unwrap();

    let north_id = FacilityId::new(north.id).unwrap();
    let demoted = facilities::update_facility(
        &repo,
        north_id,
        facility_form(client_id, "North plant", false),
    )
    .unwrap();
    assert!(!demoted.is_primary);

    let all = repo
        .list_facilities(FacilityListQuery::new(client_id))
        .unwrap();
    let primaries: Vec<&str> = all
        .iter()
        .filter(|f| f.is_primary)
        .map(|f| f.name.as_str())
        .collect();
    // The substitute is the first other active facility in stable order.
    assert_eq!(primaries, vec!["South plant"]);
}

#[test]
fn deactivating_last_primary_contact_is_refused() {
    let (_db, repo, client_id) = setup("deactivating_last_primary_contact.db");

    let anna = contacts::create_contact(&repo, contact_form(client_id, "Anna Bianchi", false))
        .unwrap();

    let result = contacts::deactivate_contact(&repo, ContactId::new(anna.id).unwrap());
    assert!(matches!(result, Err(ServiceError::InvalidState(_))));

    let unchanged = repo
        .get_contact_by_id(ContactId::new(anna.id).unwrap())
        .unwrap()
        .unwrap();
    assert!(unchanged.is_active);
    assert!(unchanged.is_primary);
}

#[test]
fn duplicate_contact_email_is_a_conflict() {
    let (_db, repo, client_id) = setup("duplicate_contact_email_conflict.db");

    let mut form = contact_form(client_id, "Anna Bianchi", false);
    form.email = "anna@example.com".to_string();
    contacts::create_contact(&repo, form).unwrap();

    let mut duplicate = contact_form(client_id, "Marco Verdi", false);
    duplicate.email = "Anna@Example.com".to_string();
    let result = contacts::create_contact(&repo, duplicate);
    assert!(matches!(result, Err(ServiceError::Conflict(_))));
}

#[test]
fn status_machine_is_enforced_unless_debug_mode() {
    let (_db, repo, client_id) = setup("status_machine_enforced.db");

    let report = interventions::create_intervention(
        &repo,
        client_id,
        GeneralSection {
            customer_data: CustomerData {
                name: "Acme".to_string(),
                ..CustomerData::default()
            },
            robot_data: RobotData {
                serial_number: "RX-100".to_string(),
                ..RobotData::default()
            },
            work_location: WorkLocation::default(),
        },
    )
    .unwrap();
    let id = InterventionId::new(report.id).unwrap();

    interventions::change_status(&repo, id, InterventionStatus::InProgress, false).unwrap();
    interventions::change_status(&repo, id, InterventionStatus::Completed, false).unwrap();

    let result = interventions::change_status(&repo, id, InterventionStatus::InProgress, false);
    assert!(matches!(
        result,
        Err(ServiceError::InvalidStatusTransition { .. })
    ));

    let reopened =
        interventions::change_status(&repo, id, InterventionStatus::InProgress, true).unwrap();
    assert_eq!(reopened.status, InterventionStatus::InProgress);
}

#[test]
fn batch_delete_reports_partial_failures() {
    let (_db, repo, client_id) = setup("batch_delete_partial_failures.db");

    let general = GeneralSection::default();
    let a = interventions::create_intervention(&repo, client_id, general.clone()).unwrap();
    let b = interventions::create_intervention(&repo, client_id, general.clone()).unwrap();
    let c = interventions::create_intervention(&repo, client_id, general).unwrap();

    // The middle report moves to Completed and refuses deletion
    // without the force flag.
    let b_id = InterventionId::new(b.id).unwrap();
    interventions::change_status(&repo, b_id, InterventionStatus::InProgress, false).unwrap();
    interventions::change_status(&repo, b_id, InterventionStatus::Completed, false).unwrap();

    let ids = [
        InterventionId::new(a.id).unwrap(),
        b_id,
        InterventionId::new(c.id).unwrap(),
    ];
    let outcome = interventions::batch_delete_interventions(&repo, &ids, false, false);

    assert_eq!(outcome.success_count + outcome.failure_count, 3);
    assert_eq!(outcome.success_count, 2);
    assert_eq!(outcome.errors.iter().filter(|e| e.id == b.id).count(), 1);
    assert!(!outcome.is_total_failure());

    // Forcing deletes the survivor too.
    let outcome = interventions::batch_delete_interventions(&repo, &[b_id], true, false);
    assert_eq!(outcome.success_count, 1);
}

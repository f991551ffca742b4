use chrono::NaiveDate;
use qreport::domain::client::{NewClient, UpdateClient};
use qreport::domain::contact::NewContact;
use qreport::domain::facility::{Address, NewFacility};
use qreport::domain::intervention::{
    CustomerData, DetailsSection, GeneralSection, InterventionStatus, NewIntervention, NewWorkDay,
    RobotData, Signature, SignaturesSection, WorkLocation,
};
use qreport::domain::settings::CardVariant;
use qreport::domain::types::{ClientId, ContactId, FacilityId, InterventionId};
use qreport::repository::{
    ClientListQuery, ClientReader, ClientWriter, ContactListQuery, ContactReader, ContactWriter,
    DieselRepository, FacilityListQuery, FacilityReader, FacilityWriter, InterventionListQuery,
    InterventionReader, InterventionWriter, SettingsReader, SettingsWriter,
};

mod common;

fn new_client(name: &str) -> NewClient {
    NewClient {
        name: name.to_string(),
        email: None,
        phone: None,
        address: None,
    }
}

fn new_contact(client_id: i32, name: &str, is_primary: bool) -> NewContact {
    NewContact {
        client_id,
        full_name: name.to_string(),
        email: None,
        phone: None,
        mobile_phone: None,
        role: None,
        is_primary,
    }
}

fn new_facility(client_id: i32, name: &str, is_primary: bool) -> NewFacility {
    NewFacility {
        client_id,
        name: name.to_string(),
        code: None,
        description: None,
        address: Address::new("Via Po 12", "Torino", "10100", None, "IT").unwrap(),
        is_primary,
    }
}

fn new_intervention(client_id: i32) -> NewIntervention {
    NewIntervention {
        client_id,
        customer_data: CustomerData {
            name: "Acme".to_string(),
            ..CustomerData::default()
        },
        robot_data: RobotData {
            serial_number: "RX-100".to_string(),
            ..RobotData::default()
        },
        work_location: WorkLocation::default(),
    }
}

#[test]
fn test_client_repository_crud() {
    let test_db = common::TestDb::new("test_client_repository_crud.db");
    let repo = DieselRepository::new(test_db.pool());

    let alice = repo.create_client(&new_client("Alice Industries")).unwrap();
    let bob = repo.create_client(&new_client("Bob Machining")).unwrap();

    let (total, items) = repo.list_clients(ClientListQuery::new()).unwrap();
    assert_eq!(total, 2);
    assert_eq!(items.len(), 2);

    let (search_total, search_items) = repo
        .list_clients(ClientListQuery::new().search("Bob"))
        .unwrap();
    assert_eq!(search_total, 1);
    assert_eq!(search_items[0].name, "Bob Machining");

    let updates = UpdateClient {
        name: "Bobby Machining".to_string(),
        email: Some("bobby@example.com".to_string()),
        phone: None,
        address: None,
    };
    let bob_id = ClientId::new(bob.id).unwrap();
    let updated = repo.update_client(bob_id, &updates).unwrap();
    assert_eq!(updated.name, "Bobby Machining");
    assert_eq!(updated.email.as_deref(), Some("bobby@example.com"));

    let alice_id = ClientId::new(alice.id).unwrap();
    repo.delete_client(alice_id).unwrap();
    assert!(repo.get_client_by_id(alice_id).unwrap().is_none());
}

#[test]
fn test_first_contact_becomes_primary() {
    let test_db = common::TestDb::new("test_first_contact_becomes_primary.db");
    let repo = DieselRepository::new(test_db.pool());
    let client = repo.create_client(&new_client("Acme")).unwrap();

    let first = repo
        .create_contact(&new_contact(client.id, "Anna Bianchi", false))
        .unwrap();
    assert!(first.is_primary);

    let second = repo
        .create_contact(&new_contact(client.id, "Marco Verdi", false))
        .unwrap();
    assert!(!second.is_primary);
}

#[test]
fn test_create_as_primary_reassigns_the_flag() {
    let test_db = common::TestDb::new("test_create_as_primary_reassigns_the_flag.db");
    let repo = DieselRepository::new(test_db.pool());
    let client = repo.create_client(&new_client("Acme")).unwrap();
    let client_id = ClientId::new(client.id).unwrap();

    let first = repo
        .create_contact(&new_contact(client.id, "Anna Bianchi", false))
        .unwrap();
    let second = repo
        .create_contact(&new_contact(client.id, "Marco Verdi", true))
        .unwrap();
    assert!(second.is_primary);

    let first_after = repo
        .get_contact_by_id(ContactId::new(first.id).unwrap())
        .unwrap()
        .unwrap();
    assert!(!first_after.is_primary);

    let primaries = repo
        .list_contacts(ContactListQuery::new(client_id))
        .unwrap()
        .into_iter()
        .filter(|c| c.is_primary)
        .count();
    assert_eq!(primaries, 1);
}

#[test]
fn test_set_primary_contact_is_exclusive() {
    let test_db = common::TestDb::new("test_set_primary_contact_is_exclusive.db");
    let repo = DieselRepository::new(test_db.pool());
    let client = repo.create_client(&new_client("Acme")).unwrap();
    let client_id = ClientId::new(client.id).unwrap();

    let a = repo
        .create_contact(&new_contact(client.id, "Anna Bianchi", false))
        .unwrap();
    let b = repo
        .create_contact(&new_contact(client.id, "Marco Verdi", false))
        .unwrap();
    let c = repo
        .create_contact(&new_contact(client.id, "Luca Neri", false))
        .unwrap();

    for target in [b.id, c.id, a.id] {
        repo.set_primary_contact(client_id, ContactId::new(target).unwrap())
            .unwrap();

        let contacts = repo.list_contacts(ContactListQuery::new(client_id)).unwrap();
        let primaries: Vec<i32> = contacts
            .iter()
            .filter(|contact| contact.is_primary)
            .map(|contact| contact.id)
            .collect();
        assert_eq!(primaries, vec![target]);
    }
}

#[test]
fn test_set_primary_rejects_inactive_or_foreign_contacts() {
    let test_db = common::TestDb::new("test_set_primary_rejects_inactive.db");
    let repo = DieselRepository::new(test_db.pool());
    let client = repo.create_client(&new_client("Acme")).unwrap();
    let other = repo.create_client(&new_client("Beta")).unwrap();
    let client_id = ClientId::new(client.id).unwrap();

    let contact = repo
        .create_contact(&new_contact(client.id, "Anna Bianchi", false))
        .unwrap();
    let foreign = repo
        .create_contact(&new_contact(other.id, "Marco Verdi", false))
        .unwrap();

    // A contact of another client is not an eligible target.
    assert!(
        repo.set_primary_contact(client_id, ContactId::new(foreign.id).unwrap())
            .is_err()
    );

    // Neither is a deactivated one.
    repo.deactivate_contact(ContactId::new(contact.id).unwrap())
        .unwrap();
    assert!(
        repo.set_primary_contact(client_id, ContactId::new(contact.id).unwrap())
            .is_err()
    );
}

#[test]
fn test_deactivate_contact_clears_both_flags() {
    let test_db = common::TestDb::new("test_deactivate_contact_clears_both_flags.db");
    let repo = DieselRepository::new(test_db.pool());
    let client = repo.create_client(&new_client("Acme")).unwrap();

    let contact = repo
        .create_contact(&new_contact(client.id, "Anna Bianchi", false))
        .unwrap();
    assert!(contact.is_primary);

    let deactivated = repo
        .deactivate_contact(ContactId::new(contact.id).unwrap())
        .unwrap();
    assert!(!deactivated.is_active);
    assert!(!deactivated.is_primary);

    let client_id = ClientId::new(client.id).unwrap();
    assert!(repo.get_primary_contact(client_id).unwrap().is_none());
    assert!(
        repo.list_contacts(ContactListQuery::new(client_id))
            .unwrap()
            .is_empty()
    );
    assert_eq!(
        repo.list_contacts(ContactListQuery::new(client_id).include_inactive())
            .unwrap()
            .len(),
        1
    );
}

#[test]
fn test_contact_uniqueness_probes() {
    let test_db = common::TestDb::new("test_contact_uniqueness_probes.db");
    let repo = DieselRepository::new(test_db.pool());
    let client = repo.create_client(&new_client("Acme")).unwrap();

    let mut contact = new_contact(client.id, "Anna Bianchi", false);
    contact.email = Some("anna@example.com".to_string());
    contact.mobile_phone = Some("+393331234567".to_string());
    let created = repo.create_contact(&contact).unwrap();

    assert!(
        repo.find_contact_by_email("anna@example.com", None)
            .unwrap()
            .is_some()
    );
    assert!(
        repo.find_contact_by_email("anna@example.com", Some(ContactId::new(created.id).unwrap()))
            .unwrap()
            .is_none()
    );
    // The probe sees the number regardless of which phone column holds it.
    assert!(
        repo.find_contact_by_phone("+393331234567", None)
            .unwrap()
            .is_some()
    );
    assert!(repo.find_contact_by_phone("+390200000000", None).unwrap().is_none());
}

#[test]
fn test_facility_primary_lifecycle() {
    let test_db = common::TestDb::new("test_facility_primary_lifecycle.db");
    let repo = DieselRepository::new(test_db.pool());
    let client = repo.create_client(&new_client("Acme")).unwrap();
    let client_id = ClientId::new(client.id).unwrap();

    let north = repo
        .create_facility(&new_facility(client.id, "North plant", false))
        .unwrap();
    assert!(north.is_primary);

    let south = repo
        .create_facility(&new_facility(client.id, "South plant", false))
        .unwrap();
    assert!(!south.is_primary);

    repo.set_primary_facility(client_id, FacilityId::new(south.id).unwrap())
        .unwrap();
    let primary = repo.get_primary_facility(client_id).unwrap().unwrap();
    assert_eq!(primary.id, south.id);

    assert!(
        repo.find_facility_by_name(client_id, "North plant", None)
            .unwrap()
            .is_some()
    );
    assert!(
        repo.find_facility_by_name(client_id, "North plant", Some(FacilityId::new(north.id).unwrap()))
            .unwrap()
            .is_none()
    );

    let deactivated = repo
        .deactivate_facility(FacilityId::new(south.id).unwrap())
        .unwrap();
    assert!(!deactivated.is_active);
    assert!(!deactivated.is_primary);
    assert_eq!(
        repo.list_facilities(FacilityListQuery::new(client_id))
            .unwrap()
            .len(),
        1
    );
}

#[test]
fn test_intervention_sections_round_trip() {
    let test_db = common::TestDb::new("test_intervention_sections_round_trip.db");
    let repo = DieselRepository::new(test_db.pool());
    let client = repo.create_client(&new_client("Acme")).unwrap();

    let created = repo.create_intervention(&new_intervention(client.id)).unwrap();
    assert_eq!(created.status, InterventionStatus::Draft);
    assert!(created.work_days.is_empty());
    let id = InterventionId::new(created.id).unwrap();

    let general = GeneralSection {
        customer_data: CustomerData {
            name: "Beta Robotics".to_string(),
            contact_person: Some("Anna Bianchi".to_string()),
            ..CustomerData::default()
        },
        robot_data: RobotData {
            serial_number: "RX-200".to_string(),
            hours_counter: Some(1250),
            ..RobotData::default()
        },
        work_location: WorkLocation {
            site_name: Some("North plant".to_string()),
            ..WorkLocation::default()
        },
    };
    let updated = repo.update_general(id, &general).unwrap();
    assert_eq!(updated.customer_data.name, "Beta Robotics");
    assert_eq!(updated.robot_data.hours_counter, Some(1250));

    let details = DetailsSection {
        technicians: vec!["Rossi".to_string(), "Bianchi".to_string()],
        intervention_description: "Replaced gripper".to_string(),
        materials: Some("Gripper kit".to_string()),
        external_report: None,
    };
    let updated = repo.update_details(id, &details).unwrap();
    assert_eq!(updated.technicians.len(), 2);
    assert_eq!(updated.materials.as_deref(), Some("Gripper kit"));

    let days = vec![
        NewWorkDay {
            date: NaiveDate::from_ymd_opt(2025, 11, 3).unwrap(),
            start_time: None,
            end_time: None,
            hours: 8.0,
            notes: Some("travel".to_string()),
        },
        NewWorkDay {
            date: NaiveDate::from_ymd_opt(2025, 11, 4).unwrap(),
            start_time: None,
            end_time: None,
            hours: 6.5,
            notes: None,
        },
    ];
    let stored_days = repo.replace_work_days(id, &days).unwrap();
    assert_eq!(stored_days.len(), 2);

    let signatures = SignaturesSection {
        technician_signature: Some(Signature {
            signer_name: "Rossi".to_string(),
            image_path: Some("sig/t.png".to_string()),
        }),
        customer_signature: None,
        is_complete: false,
    };
    let updated = repo.update_signatures(id, &signatures).unwrap();
    assert_eq!(
        updated.technician_signature.as_ref().unwrap().signer_name,
        "Rossi"
    );

    let reloaded = repo.get_intervention_by_id(id).unwrap().unwrap();
    assert_eq!(reloaded.work_days.len(), 2);
    assert_eq!(reloaded.work_days[0].hours, 8.0);
    assert_eq!(reloaded.customer_data.name, "Beta Robotics");

    let moved = repo.set_status(id, InterventionStatus::InProgress).unwrap();
    assert_eq!(moved.status, InterventionStatus::InProgress);

    let (total, items) = repo
        .list_interventions(InterventionListQuery::new().status(InterventionStatus::InProgress))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].work_days.len(), 2);

    repo.delete_intervention(id).unwrap();
    assert!(repo.get_intervention_by_id(id).unwrap().is_none());
    assert!(repo.delete_intervention(id).is_err());
}

#[test]
fn test_card_variant_upsert() {
    let test_db = common::TestDb::new("test_card_variant_upsert.db");
    let repo = DieselRepository::new(test_db.pool());

    assert!(repo.get_card_variant("contacts").unwrap().is_none());

    repo.set_card_variant("contacts", CardVariant::Compact).unwrap();
    assert_eq!(
        repo.get_card_variant("contacts").unwrap(),
        Some(CardVariant::Compact)
    );

    repo.set_card_variant("contacts", CardVariant::Minimal).unwrap();
    assert_eq!(
        repo.get_card_variant("contacts").unwrap(),
        Some(CardVariant::Minimal)
    );
}

//! Editor coordinator driven against the real SQLite repository and the
//! file-backed signature store.

use chrono::NaiveDate;
use qreport::domain::client::NewClient;
use qreport::domain::intervention::{
    CustomerData, GeneralSection, NewWorkDay, RobotData, WorkLocation,
};
use qreport::domain::types::{ClientId, InterventionId};
use qreport::repository::{ClientWriter, DieselRepository, InterventionReader};
use qreport::screens::editor::tabs::EditorTab;
use qreport::screens::editor::{ExitDecision, InterventionEditor};
use qreport::signatures::FsSignatureStore;

mod common;

fn setup(name: &str) -> (common::TestDb, DieselRepository, InterventionId, tempfile::TempDir) {
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

    let report = qreport::services::interventions::create_intervention(
        &repo,
        ClientId::new(client.id).unwrap(),
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

    let signatures_dir = tempfile::tempdir().unwrap();
    (
        test_db,
        repo,
        InterventionId::new(report.id).unwrap(),
        signatures_dir,
    )
}

#[test]
fn tab_switches_persist_only_the_leaving_tab() {
    let (_db, repo, id, dir) = setup("editor_tab_switches_persist.db");
    let store = FsSignatureStore::new(dir.path());

    let mut editor = InterventionEditor::load(&repo, id).unwrap();

    editor.general.draft.customer_name = "Beta Robotics".to_string();
    editor.details.draft.description = "Replaced gripper".to_string();

    editor.select_tab(&repo, &store, EditorTab::WorkDays).unwrap();

    let stored = repo.get_intervention_by_id(id).unwrap().unwrap();
    assert_eq!(stored.customer_data.name, "Beta Robotics");
    // The Details tab was not the one being left, so its draft is unsaved.
    assert!(stored.intervention_description.is_empty());
    assert!(editor.details.is_dirty());

    editor.work_days.draft.days.push(NewWorkDay {
        date: NaiveDate::from_ymd_opt(2025, 11, 3).unwrap(),
        start_time: None,
        end_time: None,
        hours: 8.0,
        notes: None,
    });
    editor.work_days.draft.showing_detail = true;

    editor.select_tab(&repo, &store, EditorTab::Details).unwrap();

    let stored = repo.get_intervention_by_id(id).unwrap().unwrap();
    assert_eq!(stored.work_days.len(), 1);
    assert!(!editor.work_days.draft.showing_detail);
}

#[test]
fn signature_flow_writes_image_files() {
    let (_db, repo, id, dir) = setup("editor_signature_flow.db");
    let store = FsSignatureStore::new(dir.path());

    let mut editor = InterventionEditor::load(&repo, id).unwrap();
    editor
        .select_tab(&repo, &store, EditorTab::Signatures)
        .unwrap();

    editor.signatures.draft.technician_name = "Rossi".to_string();
    editor.signatures.draft.customer_name = "Bianchi".to_string();
    editor.signatures.draft.technician_image = Some(b"technician-strokes".to_vec());
    editor.signatures.draft.customer_image = Some(b"customer-strokes".to_vec());

    editor.select_tab(&repo, &store, EditorTab::General).unwrap();

    let stored = repo.get_intervention_by_id(id).unwrap().unwrap();
    let technician = stored.technician_signature.unwrap();
    let customer = stored.customer_signature.unwrap();
    assert_eq!(technician.signer_name, "Rossi");
    assert_eq!(
        std::fs::read(technician.image_path.unwrap()).unwrap(),
        b"technician-strokes"
    );
    assert_eq!(
        std::fs::read(customer.image_path.unwrap()).unwrap(),
        b"customer-strokes"
    );

    assert_eq!(editor.request_exit(), ExitDecision::Exit);
}

//! Tabbed intervention editor coordinator.
//!
//! Four independently-stateful sub-forms are bound to one report. On every
//! tab switch only the tab being left is saved; the switch is aborted when
//! that save fails. Saves run strictly sequentially: each one is completed
//! before the selection moves, so no two section writes are ever in flight
//! at once.

use crate::domain::intervention::{Signature, SignaturesSection, TechnicalIntervention};
use crate::domain::types::InterventionId;
use crate::repository::{InterventionReader, InterventionWriter};
use crate::services::{ServiceError, ServiceResult, interventions};
use crate::signatures::SignatureStore;

pub mod tabs;

use tabs::{
    DetailsDraft, EditorTab, FormTab, GeneralDraft, SignaturesDraft, WorkDaysDraft,
};

/// What back navigation should do next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExitDecision {
    /// No unsaved changes; leave immediately.
    Exit,
    /// At least one tab is dirty; ask the user to save or discard.
    ConfirmationRequired,
}

pub struct InterventionEditor {
    intervention_id: InterventionId,
    pub selected_tab: EditorTab,
    /// Tab interaction is disabled while an auto-save is in flight.
    pub is_tab_switching: bool,
    pub general: FormTab<GeneralDraft>,
    pub details: FormTab<DetailsDraft>,
    pub work_days: FormTab<WorkDaysDraft>,
    pub signatures: FormTab<SignaturesDraft>,
}

impl InterventionEditor {
    /// Loads the report and snapshots every tab from it.
    pub fn load<R>(repo: &R, intervention_id: InterventionId) -> ServiceResult<Self>
    where
        R: InterventionReader + ?Sized,
    {
        let intervention = interventions::get_intervention_by_id(repo, intervention_id)?
            .ok_or(ServiceError::NotFound)?;

        Ok(Self::from_intervention(intervention_id, &intervention))
    }

    fn from_intervention(
        intervention_id: InterventionId,
        intervention: &TechnicalIntervention,
    ) -> Self {
        Self {
            intervention_id,
            selected_tab: EditorTab::General,
            is_tab_switching: false,
            general: FormTab::new(GeneralDraft::from_intervention(intervention)),
            details: FormTab::new(DetailsDraft::from_intervention(intervention)),
            work_days: FormTab::new(WorkDaysDraft::from_intervention(intervention)),
            signatures: FormTab::new(SignaturesDraft::from_intervention(intervention)),
        }
    }

    pub fn tab_is_dirty(&self, tab: EditorTab) -> bool {
        match tab {
            EditorTab::General => self.general.is_dirty(),
            EditorTab::Details => self.details.is_dirty(),
            // Structural rule: the WorkDays tab counts as dirty while its
            // detail sub-view is open, not on field comparison.
            EditorTab::WorkDays => self.work_days.draft.showing_detail,
            EditorTab::Signatures => self.signatures.is_dirty(),
        }
    }

    /// Combined dirty flag across all four tabs.
    pub fn is_any_dirty(&self) -> bool {
        [
            EditorTab::General,
            EditorTab::Details,
            EditorTab::WorkDays,
            EditorTab::Signatures,
        ]
        .into_iter()
        .any(|tab| self.tab_is_dirty(tab))
    }

    /// Switches to `target`, auto-saving the tab being left. The switch is
    /// aborted when the save fails; the switching flag is cleared on every
    /// path.
    pub fn select_tab<R, S>(
        &mut self,
        repo: &R,
        store: &S,
        target: EditorTab,
    ) -> ServiceResult<()>
    where
        R: InterventionWriter + ?Sized,
        S: SignatureStore + ?Sized,
    {
        if target == self.selected_tab {
            return Ok(());
        }

        self.is_tab_switching = true;
        let result = self.auto_save_tab(repo, store, self.selected_tab);
        if result.is_ok() {
            self.selected_tab = target;
        }
        self.is_tab_switching = false;

        result
    }

    /// Decides whether back navigation can leave immediately.
    pub fn request_exit(&self) -> ExitDecision {
        if self.is_any_dirty() {
            ExitDecision::ConfirmationRequired
        } else {
            ExitDecision::Exit
        }
    }

    /// "Save and exit" from the confirmation dialog: saves only the
    /// currently selected tab. A failed save does not block navigation;
    /// the error is logged and the caller leaves anyway.
    pub fn exit_saving_current<R, S>(&mut self, repo: &R, store: &S)
    where
        R: InterventionWriter + ?Sized,
        S: SignatureStore + ?Sized,
    {
        if let Err(err) = self.auto_save_tab(repo, store, self.selected_tab) {
            log::error!(
                "Failed to save intervention {} on exit, leaving anyway: {err}",
                self.intervention_id
            );
        }
    }

    fn auto_save_tab<R, S>(&mut self, repo: &R, store: &S, tab: EditorTab) -> ServiceResult<()>
    where
        R: InterventionWriter + ?Sized,
        S: SignatureStore + ?Sized,
    {
        if !self.tab_is_dirty(tab) {
            return Ok(());
        }

        match tab {
            EditorTab::General => self.save_general_tab(repo),
            EditorTab::Details => self.save_details_tab(repo),
            EditorTab::WorkDays => self.save_work_days_tab(repo),
            EditorTab::Signatures => self.save_signatures_tab(repo, store),
        }
    }

    fn save_general_tab<R>(&mut self, repo: &R) -> ServiceResult<()>
    where
        R: InterventionWriter + ?Sized,
    {
        if let Err(message) = self.general.draft.validate_save() {
            self.general.error = Some(message.clone());
            return Err(ServiceError::Validation(message));
        }

        let section = self.general.draft.to_section();
        match interventions::save_general(repo, self.intervention_id, &section) {
            Ok(_) => {
                self.general.mark_saved();
                Ok(())
            }
            Err(err) => {
                self.general.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    fn save_details_tab<R>(&mut self, repo: &R) -> ServiceResult<()>
    where
        R: InterventionWriter + ?Sized,
    {
        if let Err(message) = self.details.draft.validate_save() {
            self.details.error = Some(message.clone());
            return Err(ServiceError::Validation(message));
        }

        let section = self.details.draft.to_section();
        match interventions::save_details(repo, self.intervention_id, &section) {
            Ok(_) => {
                self.details.mark_saved();
                Ok(())
            }
            Err(err) => {
                self.details.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    fn save_work_days_tab<R>(&mut self, repo: &R) -> ServiceResult<()>
    where
        R: InterventionWriter + ?Sized,
    {
        if let Err(message) = self.work_days.draft.validate_save() {
            self.work_days.error = Some(message.clone());
            return Err(ServiceError::Validation(message));
        }

        match interventions::save_work_days(repo, self.intervention_id, &self.work_days.draft.days)
        {
            Ok(_) => {
                // Leaving the tab closes the detail sub-view.
                self.work_days.draft.showing_detail = false;
                self.work_days.mark_saved();
                Ok(())
            }
            Err(err) => {
                self.work_days.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    fn save_signatures_tab<R, S>(&mut self, repo: &R, store: &S) -> ServiceResult<()>
    where
        R: InterventionWriter + ?Sized,
        S: SignatureStore + ?Sized,
    {
        if let Err(message) = self.signatures.draft.validate_save() {
            self.signatures.error = Some(message.clone());
            return Err(ServiceError::Validation(message));
        }

        let id = self.intervention_id;

        let technician_path = match &self.signatures.draft.technician_image {
            Some(bytes) => match store.save_technician_signature(id, bytes) {
                Ok(path) => Some(path),
                Err(err) => {
                    let err = ServiceError::from(err);
                    self.signatures.error = Some(err.to_string());
                    return Err(err);
                }
            },
            None => self.signatures.draft.technician_path.clone(),
        };
        let customer_path = match &self.signatures.draft.customer_image {
            Some(bytes) => match store.save_customer_signature(id, bytes) {
                Ok(path) => Some(path),
                Err(err) => {
                    let err = ServiceError::from(err);
                    self.signatures.error = Some(err.to_string());
                    return Err(err);
                }
            },
            None => self.signatures.draft.customer_path.clone(),
        };

        let section = SignaturesSection {
            technician_signature: build_signature(
                &self.signatures.draft.technician_name,
                technician_path.clone(),
            ),
            customer_signature: build_signature(
                &self.signatures.draft.customer_name,
                customer_path.clone(),
            ),
            is_complete: self.signatures.draft.ready,
        };

        match interventions::save_signatures(repo, id, &section) {
            Ok(_) => {
                let draft = &mut self.signatures.draft;
                draft.technician_image = None;
                draft.customer_image = None;
                draft.technician_path = technician_path;
                draft.customer_path = customer_path;
                self.signatures.mark_saved();
                Ok(())
            }
            Err(err) => {
                self.signatures.error = Some(err.to_string());
                Err(err)
            }
        }
    }
}

fn build_signature(name: &str, path: Option<String>) -> Option<Signature> {
    let trimmed = name.trim();
    if trimmed.is_empty() && path.is_none() {
        return None;
    }
    Some(Signature {
        signer_name: trimmed.to_string(),
        image_path: path,
    })
}

//! Sub-form state for the tabbed intervention editor.
//!
//! Every tab owns a draft plus the snapshot of the last saved values;
//! dirtiness is a field-wise comparison between the two, never derived
//! from the persisted record.

use crate::domain::intervention::{
    DetailsSection, GeneralSection, MAX_TECHNICIANS, NewWorkDay, TechnicalIntervention,
};

/// The four sub-forms of the intervention editor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditorTab {
    General,
    Details,
    WorkDays,
    Signatures,
}

/// Draft/snapshot pair with the tab-scoped error banner.
#[derive(Debug)]
pub struct FormTab<T> {
    pub draft: T,
    original: T,
    pub error: Option<String>,
}

impl<T: Clone + PartialEq> FormTab<T> {
    pub fn new(value: T) -> Self {
        Self {
            draft: value.clone(),
            original: value,
            error: None,
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.draft != self.original
    }

    /// Promotes the draft to the new snapshot after a successful save.
    pub fn mark_saved(&mut self) {
        self.original = self.draft.clone();
        self.error = None;
    }
}

fn blank_to_none(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Text-input backed draft of the General tab.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct GeneralDraft {
    pub customer_name: String,
    pub customer_address: String,
    pub contact_person: String,
    pub customer_phone: String,
    pub robot_serial: String,
    pub robot_model: String,
    pub software_version: String,
    pub hours_counter: String,
    pub site_name: String,
    pub site_address: String,
    pub site_notes: String,
}

impl GeneralDraft {
    pub fn from_intervention(intervention: &TechnicalIntervention) -> Self {
        Self {
            customer_name: intervention.customer_data.name.clone(),
            customer_address: intervention.customer_data.address.clone().unwrap_or_default(),
            contact_person: intervention
                .customer_data
                .contact_person
                .clone()
                .unwrap_or_default(),
            customer_phone: intervention.customer_data.phone.clone().unwrap_or_default(),
            robot_serial: intervention.robot_data.serial_number.clone(),
            robot_model: intervention.robot_data.model.clone().unwrap_or_default(),
            software_version: intervention
                .robot_data
                .software_version
                .clone()
                .unwrap_or_default(),
            hours_counter: intervention
                .robot_data
                .hours_counter
                .map(|h| h.to_string())
                .unwrap_or_default(),
            site_name: intervention.work_location.site_name.clone().unwrap_or_default(),
            site_address: intervention
                .work_location
                .address
                .clone()
                .unwrap_or_default(),
            site_notes: intervention.work_location.notes.clone().unwrap_or_default(),
        }
    }

    /// Auto-save validation: length bounds and number formats only, nothing
    /// is required yet.
    pub fn validate_save(&self) -> Result<(), String> {
        if self.customer_name.trim().chars().count() > 100 {
            return Err("customer name must be at most 100 characters".to_string());
        }
        if self.robot_serial.trim().chars().count() > 50 {
            return Err("robot serial must be at most 50 characters".to_string());
        }
        if !self.hours_counter.trim().is_empty() {
            match self.hours_counter.trim().parse::<i32>() {
                Ok(hours) if hours >= 0 => {}
                _ => return Err("hours counter must be a non-negative number".to_string()),
            }
        }
        Ok(())
    }

    /// Builds the section payload; call after [`Self::validate_save`].
    pub fn to_section(&self) -> GeneralSection {
        GeneralSection {
            customer_data: crate::domain::intervention::CustomerData {
                name: self.customer_name.trim().to_string(),
                address: blank_to_none(&self.customer_address),
                contact_person: blank_to_none(&self.contact_person),
                phone: blank_to_none(&self.customer_phone),
            },
            robot_data: crate::domain::intervention::RobotData {
                serial_number: self.robot_serial.trim().to_string(),
                model: blank_to_none(&self.robot_model),
                software_version: blank_to_none(&self.software_version),
                hours_counter: self.hours_counter.trim().parse().ok(),
            },
            work_location: crate::domain::intervention::WorkLocation {
                site_name: blank_to_none(&self.site_name),
                address: blank_to_none(&self.site_address),
                notes: blank_to_none(&self.site_notes),
            },
        }
    }
}

/// Draft of the Details tab.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct DetailsDraft {
    pub technicians: Vec<String>,
    pub description: String,
    pub materials: String,
    pub external_report: String,
}

impl DetailsDraft {
    pub fn from_intervention(intervention: &TechnicalIntervention) -> Self {
        Self {
            technicians: intervention.technicians.clone(),
            description: intervention.intervention_description.clone(),
            materials: intervention.materials.clone().unwrap_or_default(),
            external_report: intervention.external_report.clone().unwrap_or_default(),
        }
    }

    pub fn validate_save(&self) -> Result<(), String> {
        if self.technicians.len() > MAX_TECHNICIANS {
            return Err(format!(
                "at most {MAX_TECHNICIANS} technicians can be assigned"
            ));
        }
        if self.technicians.iter().any(|t| t.trim().is_empty()) {
            return Err("technician names cannot be blank".to_string());
        }
        Ok(())
    }

    pub fn to_section(&self) -> DetailsSection {
        DetailsSection {
            technicians: self
                .technicians
                .iter()
                .map(|t| t.trim().to_string())
                .collect(),
            intervention_description: self.description.trim().to_string(),
            materials: blank_to_none(&self.materials),
            external_report: blank_to_none(&self.external_report),
        }
    }
}

/// Draft of the WorkDays tab. Unlike the other tabs, its dirtiness is
/// structural: the tab counts as dirty while the detail sub-view is open.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct WorkDaysDraft {
    pub days: Vec<NewWorkDay>,
    pub showing_detail: bool,
}

impl WorkDaysDraft {
    pub fn from_intervention(intervention: &TechnicalIntervention) -> Self {
        Self {
            days: intervention
                .work_days
                .iter()
                .map(|day| NewWorkDay {
                    date: day.date,
                    start_time: day.start_time,
                    end_time: day.end_time,
                    hours: day.hours,
                    notes: day.notes.clone(),
                })
                .collect(),
            showing_detail: false,
        }
    }

    pub fn validate_save(&self) -> Result<(), String> {
        for day in &self.days {
            if day.hours < 0.0 || day.hours > 24.0 {
                return Err("work day hours must be between 0 and 24".to_string());
            }
        }
        Ok(())
    }
}

/// Draft of the Signatures tab. Captured strokes arrive as encoded image
/// bytes and are stored on save; previously stored paths are kept as-is.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct SignaturesDraft {
    pub technician_name: String,
    pub customer_name: String,
    pub technician_image: Option<Vec<u8>>,
    pub customer_image: Option<Vec<u8>>,
    pub technician_path: Option<String>,
    pub customer_path: Option<String>,
    /// Marks the report ready for sign-off, tightening save validation.
    pub ready: bool,
}

impl SignaturesDraft {
    pub fn from_intervention(intervention: &TechnicalIntervention) -> Self {
        let (technician_name, technician_path) = match &intervention.technician_signature {
            Some(signature) => (signature.signer_name.clone(), signature.image_path.clone()),
            None => (String::new(), None),
        };
        let (customer_name, customer_path) = match &intervention.customer_signature {
            Some(signature) => (signature.signer_name.clone(), signature.image_path.clone()),
            None => (String::new(), None),
        };
        Self {
            technician_name,
            customer_name,
            technician_image: None,
            customer_image: None,
            technician_path,
            customer_path,
            ready: intervention.is_complete,
        }
    }

    /// Signer names are validated for length only; they become required
    /// once the ready flag is set.
    pub fn validate_save(&self) -> Result<(), String> {
        if self.technician_name.trim().chars().count() > 100
            || self.customer_name.trim().chars().count() > 100
        {
            return Err("signer names must be at most 100 characters".to_string());
        }
        if self.ready {
            if self.technician_name.trim().is_empty() {
                return Err("technician signer name is required".to_string());
            }
            if self.customer_name.trim().is_empty() {
                return Err("customer signer name is required".to_string());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_tab_dirtiness_is_field_wise() {
        let mut tab = FormTab::new(GeneralDraft::default());
        assert!(!tab.is_dirty());

        tab.draft.customer_name = "Acme".to_string();
        assert!(tab.is_dirty());

        tab.mark_saved();
        assert!(!tab.is_dirty());
        assert!(tab.error.is_none());
    }

    #[test]
    fn general_save_validation_is_permissive() {
        // An empty header is saveable; only bounds are checked.
        assert!(GeneralDraft::default().validate_save().is_ok());

        let mut draft = GeneralDraft::default();
        draft.hours_counter = "not-a-number".to_string();
        assert!(draft.validate_save().is_err());

        draft.hours_counter = "1250".to_string();
        assert!(draft.validate_save().is_ok());
    }

    #[test]
    fn signature_names_are_only_required_when_ready() {
        let mut draft = SignaturesDraft::default();
        assert!(draft.validate_save().is_ok());

        draft.ready = true;
        assert!(draft.validate_save().is_err());

        draft.technician_name = "Rossi".to_string();
        draft.customer_name = "Bianchi".to_string();
        assert!(draft.validate_save().is_ok());
    }

    #[test]
    fn details_draft_caps_technicians() {
        let mut draft = DetailsDraft::default();
        draft.technicians = (0..7).map(|i| format!("Tech {i}")).collect();
        assert!(draft.validate_save().is_err());

        draft.technicians.truncate(6);
        assert!(draft.validate_save().is_ok());
    }
}

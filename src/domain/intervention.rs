use std::fmt::Display;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum number of technicians assignable to one intervention.
pub const MAX_TECHNICIANS: usize = 6;

/// Lifecycle state of a technical intervention report.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum InterventionStatus {
    Draft,
    InProgress,
    PendingReview,
    Completed,
    Archived,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown intervention status: {0}")]
pub struct ParseInterventionStatusError(pub String);

impl InterventionStatus {
    /// Whether moving from `self` to `next` is a legal lifecycle edge.
    /// A same-state transition is always allowed (treated as a no-op).
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        use InterventionStatus::*;

        if self == next {
            return true;
        }
        matches!(
            (self, next),
            (Draft, InProgress)
                | (Draft, Archived)
                | (InProgress, PendingReview)
                | (InProgress, Completed)
                | (InProgress, Draft)
                | (InProgress, Archived)
                | (PendingReview, InProgress)
                | (PendingReview, Completed)
                | (PendingReview, Draft)
                | (Completed, Archived)
                | (Archived, InProgress)
        )
    }

    /// Whether a report in this state may be deleted. Completed and archived
    /// reports, as well as reports under review, require the force flag.
    #[must_use]
    pub fn can_delete(self, force: bool) -> bool {
        use InterventionStatus::*;

        match self {
            Draft | InProgress => true,
            PendingReview | Completed | Archived => force,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            InterventionStatus::Draft => "DRAFT",
            InterventionStatus::InProgress => "IN_PROGRESS",
            InterventionStatus::PendingReview => "PENDING_REVIEW",
            InterventionStatus::Completed => "COMPLETED",
            InterventionStatus::Archived => "ARCHIVED",
        }
    }
}

impl Display for InterventionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for InterventionStatus {
    type Error = ParseInterventionStatusError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "DRAFT" => Ok(InterventionStatus::Draft),
            "IN_PROGRESS" => Ok(InterventionStatus::InProgress),
            "PENDING_REVIEW" => Ok(InterventionStatus::PendingReview),
            "COMPLETED" => Ok(InterventionStatus::Completed),
            "ARCHIVED" => Ok(InterventionStatus::Archived),
            other => Err(ParseInterventionStatusError(other.to_string())),
        }
    }
}

/// Customer details captured on the report header.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct CustomerData {
    pub name: String,
    pub address: Option<String>,
    pub contact_person: Option<String>,
    pub phone: Option<String>,
}

/// Robotic island the intervention was performed on.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct RobotData {
    pub serial_number: String,
    pub model: Option<String>,
    pub software_version: Option<String>,
    pub hours_counter: Option<i32>,
}

/// Where the work took place, when different from the customer address.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct WorkLocation {
    pub site_name: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
}

/// A signature block: signer name plus the opaque path of the stored image.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Signature {
    pub signer_name: String,
    pub image_path: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WorkDay {
    pub id: i32,
    pub intervention_id: i32,
    pub date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub hours: f32,
    pub notes: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NewWorkDay {
    pub date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub hours: f32,
    pub notes: Option<String>,
}

/// Aggregate root for a technician intervention report.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TechnicalIntervention {
    pub id: i32,
    pub client_id: i32,
    pub customer_data: CustomerData,
    pub robot_data: RobotData,
    pub work_location: WorkLocation,
    pub technicians: Vec<String>,
    pub intervention_description: String,
    pub materials: Option<String>,
    pub external_report: Option<String>,
    pub work_days: Vec<WorkDay>,
    pub technician_signature: Option<Signature>,
    pub customer_signature: Option<Signature>,
    pub is_complete: bool,
    pub status: InterventionStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewIntervention {
    pub client_id: i32,
    pub customer_data: CustomerData,
    pub robot_data: RobotData,
    pub work_location: WorkLocation,
}

/// Header fields edited on the General tab.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct GeneralSection {
    pub customer_data: CustomerData,
    pub robot_data: RobotData,
    pub work_location: WorkLocation,
}

/// Narrative fields edited on the Details tab.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct DetailsSection {
    pub technicians: Vec<String>,
    pub intervention_description: String,
    pub materials: Option<String>,
    pub external_report: Option<String>,
}

/// Signature fields edited on the Signatures tab.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct SignaturesSection {
    pub technician_signature: Option<Signature>,
    pub customer_signature: Option<Signature>,
    pub is_complete: bool,
}

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use diesel::prelude::*;
use thiserror::Error;

use crate::domain::intervention::{
    CustomerData, DetailsSection, GeneralSection, InterventionStatus,
    NewIntervention as DomainNewIntervention, NewWorkDay as DomainNewWorkDay,
    ParseInterventionStatusError, RobotData, Signature, SignaturesSection, TechnicalIntervention,
    WorkDay as DomainWorkDay, WorkLocation,
};

/// Failure decoding a stored row into its domain representation.
#[derive(Debug, Error)]
pub enum ModelConversionError {
    #[error("malformed JSON column: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Status(#[from] ParseInterventionStatusError),
}

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::interventions)]
/// Diesel model for [`TechnicalIntervention`]. Structured sub-objects are
/// stored as JSON text columns; work days live in their own table.
pub struct Intervention {
    pub id: i32,
    pub client_id: i32,
    pub customer_data: String,
    pub robot_data: String,
    pub work_location: String,
    pub technicians: String,
    pub intervention_description: String,
    pub materials: Option<String>,
    pub external_report: Option<String>,
    pub technician_signature: Option<String>,
    pub customer_signature: Option<String>,
    pub is_complete: bool,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::interventions)]
/// Insertable form of [`Intervention`]. New reports always start as drafts.
pub struct NewIntervention {
    pub client_id: i32,
    pub customer_data: String,
    pub robot_data: String,
    pub work_location: String,
    pub technicians: String,
    pub intervention_description: String,
    pub is_complete: bool,
    pub status: String,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::interventions)]
/// Changeset covering the General tab section.
pub struct GeneralChangeset {
    pub customer_data: String,
    pub robot_data: String,
    pub work_location: String,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::interventions)]
/// Changeset covering the Details tab section.
pub struct DetailsChangeset {
    pub technicians: String,
    pub intervention_description: String,
    pub materials: Option<Option<String>>,
    pub external_report: Option<Option<String>>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::interventions)]
/// Changeset covering the Signatures tab section.
pub struct SignaturesChangeset {
    pub technician_signature: Option<Option<String>>,
    pub customer_signature: Option<Option<String>>,
    pub is_complete: bool,
}

impl TryFrom<Intervention> for TechnicalIntervention {
    type Error = ModelConversionError;

    /// Decodes the JSON columns; the caller attaches work days separately.
    fn try_from(row: Intervention) -> Result<Self, Self::Error> {
        let customer_data: CustomerData = serde_json::from_str(&row.customer_data)?;
        let robot_data: RobotData = serde_json::from_str(&row.robot_data)?;
        let work_location: WorkLocation = serde_json::from_str(&row.work_location)?;
        let technicians: Vec<String> = serde_json::from_str(&row.technicians)?;
        let technician_signature: Option<Signature> = row
            .technician_signature
            .as_deref()
            .map(serde_json::from_str)
            .transpose()?;
        let customer_signature: Option<Signature> = row
            .customer_signature
            .as_deref()
            .map(serde_json::from_str)
            .transpose()?;
        let status = InterventionStatus::try_from(row.status.as_str())?;

        Ok(Self {
            id: row.id,
            client_id: row.client_id,
            customer_data,
            robot_data,
            work_location,
            technicians,
            intervention_description: row.intervention_description,
            materials: row.materials,
            external_report: row.external_report,
            work_days: Vec::new(),
            technician_signature,
            customer_signature,
            is_complete: row.is_complete,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl TryFrom<&DomainNewIntervention> for NewIntervention {
    type Error = ModelConversionError;

    fn try_from(new: &DomainNewIntervention) -> Result<Self, Self::Error> {
        Ok(Self {
            client_id: new.client_id,
            customer_data: serde_json::to_string(&new.customer_data)?,
            robot_data: serde_json::to_string(&new.robot_data)?,
            work_location: serde_json::to_string(&new.work_location)?,
            technicians: "[]".to_string(),
            intervention_description: String::new(),
            is_complete: false,
            status: InterventionStatus::Draft.as_str().to_string(),
        })
    }
}

impl TryFrom<&GeneralSection> for GeneralChangeset {
    type Error = ModelConversionError;

    fn try_from(section: &GeneralSection) -> Result<Self, Self::Error> {
        Ok(Self {
            customer_data: serde_json::to_string(&section.customer_data)?,
            robot_data: serde_json::to_string(&section.robot_data)?,
            work_location: serde_json::to_string(&section.work_location)?,
        })
    }
}

impl TryFrom<&DetailsSection> for DetailsChangeset {
    type Error = ModelConversionError;

    fn try_from(section: &DetailsSection) -> Result<Self, Self::Error> {
        Ok(Self {
            technicians: serde_json::to_string(&section.technicians)?,
            intervention_description: section.intervention_description.clone(),
            materials: Some(section.materials.clone()),
            external_report: Some(section.external_report.clone()),
        })
    }
}

impl TryFrom<&SignaturesSection> for SignaturesChangeset {
    type Error = ModelConversionError;

    fn try_from(section: &SignaturesSection) -> Result<Self, Self::Error> {
        let technician_signature = section
            .technician_signature
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;
        let customer_signature = section
            .customer_signature
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;
        Ok(Self {
            technician_signature: Some(technician_signature),
            customer_signature: Some(customer_signature),
            is_complete: section.is_complete,
        })
    }
}

#[derive(Debug, Clone, Identifiable, Queryable, Associations)]
#[diesel(table_name = crate::schema::work_days)]
#[diesel(belongs_to(Intervention, foreign_key = intervention_id))]
/// Diesel model for [`DomainWorkDay`].
pub struct WorkDay {
    pub id: i32,
    pub intervention_id: i32,
    pub date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub hours: f32,
    pub notes: Option<String>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::work_days)]
/// Insertable form of [`WorkDay`].
pub struct NewWorkDay<'a> {
    pub intervention_id: i32,
    pub date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub hours: f32,
    pub notes: Option<&'a str>,
}

impl From<WorkDay> for DomainWorkDay {
    fn from(day: WorkDay) -> Self {
        Self {
            id: day.id,
            intervention_id: day.intervention_id,
            date: day.date,
            start_time: day.start_time,
            end_time: day.end_time,
            hours: day.hours,
            notes: day.notes,
        }
    }
}

impl<'a> NewWorkDay<'a> {
    pub fn from_domain(intervention_id: i32, day: &'a DomainNewWorkDay) -> Self {
        Self {
            intervention_id,
            date: day.date,
            start_time: day.start_time,
            end_time: day.end_time,
            hours: day.hours,
            notes: day.notes.as_deref(),
        }
    }
}

//! Services governing the lifecycle of technical intervention reports.

use crate::domain::intervention::{
    DetailsSection, GeneralSection, InterventionStatus, MAX_TECHNICIANS, NewIntervention,
    NewWorkDay, SignaturesSection, TechnicalIntervention, WorkDay,
};
use crate::domain::types::{ClientId, InterventionId};
use crate::repository::{
    ClientReader, InterventionListQuery, InterventionReader, InterventionWriter,
};
use crate::services::{BatchOutcome, ServiceError, ServiceResult};

/// Fetches an intervention with its work days.
pub fn get_intervention_by_id<R>(
    repo: &R,
    id: InterventionId,
) -> ServiceResult<Option<TechnicalIntervention>>
where
    R: InterventionReader + ?Sized,
{
    repo.get_intervention_by_id(id).map_err(ServiceError::from)
}

/// Retrieves the total count and the requested page of interventions.
pub fn list_interventions<R>(
    repo: &R,
    query: InterventionListQuery,
) -> ServiceResult<(usize, Vec<TechnicalIntervention>)>
where
    R: InterventionReader + ?Sized,
{
    repo.list_interventions(query).map_err(ServiceError::from)
}

/// Opens a new draft report for the given client.
pub fn create_intervention<R>(
    repo: &R,
    client_id: ClientId,
    general: GeneralSection,
) -> ServiceResult<TechnicalIntervention>
where
    R: ClientReader + InterventionReader + InterventionWriter + ?Sized,
{
    repo.get_client_by_id(client_id)?
        .ok_or(ServiceError::NotFound)?;

    let new_intervention = NewIntervention {
        client_id: client_id.get(),
        customer_data: general.customer_data.clone(),
        robot_data: general.robot_data.clone(),
        work_location: general.work_location.clone(),
    };

    repo.create_intervention(&new_intervention).map_err(|err| {
        log::error!("Failed to create intervention: {err}");
        ServiceError::from(err)
    })
}

/// Persists the General tab section.
pub fn save_general<R>(
    repo: &R,
    id: InterventionId,
    section: &GeneralSection,
) -> ServiceResult<TechnicalIntervention>
where
    R: InterventionWriter + ?Sized,
{
    repo.update_general(id, section).map_err(|err| {
        log::error!("Failed to save intervention {id} header: {err}");
        ServiceError::from(err)
    })
}

/// Persists the Details tab section. The technician cap is a hard limit,
/// enforced even by the permissive auto-save path.
pub fn save_details<R>(
    repo: &R,
    id: InterventionId,
    section: &DetailsSection,
) -> ServiceResult<TechnicalIntervention>
where
    R: InterventionWriter + ?Sized,
{
    if section.technicians.len() > MAX_TECHNICIANS {
        return Err(ServiceError::Validation(format!(
            "at most {MAX_TECHNICIANS} technicians can be assigned"
        )));
    }
    if section.technicians.iter().any(|t| t.trim().is_empty()) {
        return Err(ServiceError::Validation(
            "technician names cannot be blank".to_string(),
        ));
    }

    repo.update_details(id, section).map_err(|err| {
        log::error!("Failed to save intervention {id} details: {err}");
        ServiceError::from(err)
    })
}

/// Replaces the recorded work days.
pub fn save_work_days<R>(
    repo: &R,
    id: InterventionId,
    work_days: &[NewWorkDay],
) -> ServiceResult<Vec<WorkDay>>
where
    R: InterventionWriter + ?Sized,
{
    for day in work_days {
        if day.hours < 0.0 || day.hours > 24.0 {
            return Err(ServiceError::Validation(
                "work day hours must be between 0 and 24".to_string(),
            ));
        }
    }

    repo.replace_work_days(id, work_days).map_err(|err| {
        log::error!("Failed to save intervention {id} work days: {err}");
        ServiceError::from(err)
    })
}

/// Persists the Signatures tab section.
pub fn save_signatures<R>(
    repo: &R,
    id: InterventionId,
    section: &SignaturesSection,
) -> ServiceResult<TechnicalIntervention>
where
    R: InterventionWriter + ?Sized,
{
    repo.update_signatures(id, section).map_err(|err| {
        log::error!("Failed to save intervention {id} signatures: {err}");
        ServiceError::from(err)
    })
}

/// Moves a report to the requested status. A same-state request is a no-op
/// success and issues no write; `debug_mode` bypasses transition checks.
pub fn change_status<R>(
    repo: &R,
    id: InterventionId,
    requested: InterventionStatus,
    debug_mode: bool,
) -> ServiceResult<TechnicalIntervention>
where
    R: InterventionReader + InterventionWriter + ?Sized,
{
    let current = repo
        .get_intervention_by_id(id)?
        .ok_or(ServiceError::NotFound)?;

    if current.status == requested {
        return Ok(current);
    }

    if !debug_mode && !current.status.can_transition_to(requested) {
        return Err(ServiceError::InvalidStatusTransition {
            current: current.status,
            requested,
        });
    }

    repo.set_status(id, requested).map_err(|err| {
        log::error!("Failed to move intervention {id} to {requested}: {err}");
        ServiceError::from(err)
    })
}

/// Applies a status change to every report independently.
pub fn batch_change_status<R>(
    repo: &R,
    ids: &[InterventionId],
    requested: InterventionStatus,
    debug_mode: bool,
) -> BatchOutcome
where
    R: InterventionReader + InterventionWriter + ?Sized,
{
    let mut outcome = BatchOutcome::default();
    for &id in ids {
        match change_status(repo, id, requested, debug_mode) {
            Ok(_) => outcome.record_success(),
            Err(err) => outcome.record_failure(id.get(), err),
        }
    }
    outcome
}

/// Deletes a report, honoring delete eligibility unless `debug_mode` is set.
pub fn delete_intervention<R>(
    repo: &R,
    id: InterventionId,
    force: bool,
    debug_mode: bool,
) -> ServiceResult<()>
where
    R: InterventionReader + InterventionWriter + ?Sized,
{
    let existing = repo
        .get_intervention_by_id(id)?
        .ok_or(ServiceError::NotFound)?;

    if !debug_mode && !existing.status.can_delete(force) {
        return Err(ServiceError::InvalidState(format!(
            "interventions in status {} cannot be deleted without confirmation",
            existing.status
        )));
    }

    repo.delete_intervention(id).map_err(|err| {
        log::error!("Failed to delete intervention {id}: {err}");
        ServiceError::from(err)
    })
}

/// Deletes a set of reports one by one, aggregating per-item failures.
pub fn batch_delete_interventions<R>(
    repo: &R,
    ids: &[InterventionId],
    force: bool,
    debug_mode: bool,
) -> BatchOutcome
where
    R: InterventionReader + InterventionWriter + ?Sized,
{
    let mut outcome = BatchOutcome::default();
    for &id in ids {
        match delete_intervention(repo, id, force, debug_mode) {
            Ok(()) => outcome.record_success(),
            Err(err) => {
                log::error!("Failed to delete intervention {id}: {err}");
                outcome.record_failure(id.get(), err);
            }
        }
    }
    outcome
}

/// Full-submit validation: unlike the permissive auto-save path, every
/// section must be filled in before a report can be completed.
fn validate_for_completion(intervention: &TechnicalIntervention) -> ServiceResult<()> {
    let mut missing: Vec<&str> = Vec::new();

    if intervention.customer_data.name.trim().is_empty() {
        missing.push("customer name");
    }
    if intervention.robot_data.serial_number.trim().is_empty() {
        missing.push("robot serial number");
    }
    if intervention.intervention_description.trim().is_empty() {
        missing.push("intervention description");
    }
    if intervention.technicians.is_empty() {
        missing.push("at least one technician");
    }
    if intervention.work_days.is_empty() {
        missing.push("at least one work day");
    }
    let signed = |signature: &Option<crate::domain::intervention::Signature>| {
        signature
            .as_ref()
            .is_some_and(|s| !s.signer_name.trim().is_empty() && s.image_path.is_some())
    };
    if !signed(&intervention.technician_signature) {
        missing.push("technician signature");
    }
    if !signed(&intervention.customer_signature) {
        missing.push("customer signature");
    }

    if intervention.technicians.len() > MAX_TECHNICIANS {
        return Err(ServiceError::Validation(format!(
            "at most {MAX_TECHNICIANS} technicians can be assigned"
        )));
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ServiceError::Validation(format!(
            "report is incomplete: missing {}",
            missing.join(", ")
        )))
    }
}

/// Runs the strict full-submit validation and moves the report to
/// `Completed`, marking it complete.
pub fn complete_intervention<R>(
    repo: &R,
    id: InterventionId,
    debug_mode: bool,
) -> ServiceResult<TechnicalIntervention>
where
    R: InterventionReader + InterventionWriter + ?Sized,
{
    let intervention = repo
        .get_intervention_by_id(id)?
        .ok_or(ServiceError::NotFound)?;

    if !debug_mode {
        validate_for_completion(&intervention)?;
        if !intervention
            .status
            .can_transition_to(InterventionStatus::Completed)
        {
            return Err(ServiceError::InvalidStatusTransition {
                current: intervention.status,
                requested: InterventionStatus::Completed,
            });
        }
    }

    let section = SignaturesSection {
        technician_signature: intervention.technician_signature.clone(),
        customer_signature: intervention.customer_signature.clone(),
        is_complete: true,
    };
    repo.update_signatures(id, &section)?;

    repo.set_status(id, InterventionStatus::Completed)
        .map_err(|err| {
            log::error!("Failed to complete intervention {id}: {err}");
            ServiceError::from(err)
        })
}

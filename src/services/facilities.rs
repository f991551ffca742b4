//! Services maintaining the facilities of a client.
//!
//! Same single-primary discipline as the contact services, plus a
//! duplicate-name check scoped to the client's active facilities.

use crate::domain::facility::Facility;
use crate::domain::types::{ClientId, FacilityId};
use crate::forms::facility::{FacilityForm, FacilityPayload};
use crate::repository::{ClientReader, FacilityListQuery, FacilityReader, FacilityWriter};
use crate::services::{ServiceError, ServiceResult};

/// Fetches a facility by its identifier.
pub fn get_facility_by_id<R>(repo: &R, facility_id: FacilityId) -> ServiceResult<Option<Facility>>
where
    R: FacilityReader + ?Sized,
{
    repo.get_facility_by_id(facility_id)
        .map_err(ServiceError::from)
}

/// Lists the facilities of a client, active ones only by default.
pub fn list_facilities<R>(repo: &R, query: FacilityListQuery) -> ServiceResult<Vec<Facility>>
where
    R: FacilityReader + ?Sized,
{
    repo.list_facilities(query).map_err(ServiceError::from)
}

fn ensure_name_unique<R>(
    repo: &R,
    payload: &FacilityPayload,
    exclude: Option<FacilityId>,
) -> ServiceResult<()>
where
    R: FacilityReader + ?Sized,
{
    if repo
        .find_facility_by_name(payload.client_id, payload.name.as_str(), exclude)?
        .is_some()
    {
        return Err(ServiceError::Conflict(format!(
            "facility {} already exists for this client",
            payload.name
        )));
    }
    Ok(())
}

fn first_other_active<R>(
    repo: &R,
    client_id: ClientId,
    exclude: FacilityId,
) -> ServiceResult<Option<Facility>>
where
    R: FacilityReader + ?Sized,
{
    let facilities = repo.list_facilities(FacilityListQuery::new(client_id))?;
    Ok(facilities.into_iter().find(|f| f.id != exclude.get()))
}

/// Validates the form and creates the facility. The repository forces the
/// primary flag when the client has no active primary yet.
pub fn create_facility<R>(repo: &R, form: FacilityForm) -> ServiceResult<Facility>
where
    R: ClientReader + FacilityReader + FacilityWriter + ?Sized,
{
    let payload = FacilityPayload::try_from(form)?;

    repo.get_client_by_id(payload.client_id)?
        .ok_or(ServiceError::NotFound)?;

    ensure_name_unique(repo, &payload, None)?;

    let new_facility = payload.into_new();
    repo.create_facility(&new_facility).map_err(|err| {
        log::error!("Failed to create facility: {err}");
        ServiceError::from(err)
    })
}

/// Validates the form and applies it to an existing facility, reconciling
/// the primary flag when it changed.
pub fn update_facility<R>(
    repo: &R,
    facility_id: FacilityId,
    form: FacilityForm,
) -> ServiceResult<Facility>
where
    R: FacilityReader + FacilityWriter + ?Sized,
{
    let payload = FacilityPayload::try_from(form)?;

    let existing = repo
        .get_facility_by_id(facility_id)?
        .ok_or(ServiceError::NotFound)?;

    if existing.client_id != payload.client_id.get() {
        return Err(ServiceError::InvalidState(
            "a facility cannot be moved to another client".to_string(),
        ));
    }

    ensure_name_unique(repo, &payload, Some(facility_id))?;

    let client_id = payload.client_id;
    let wants_primary = payload.is_primary;

    // Demotion needs a substitute; refuse before writing anything.
    let substitute = if existing.is_primary && !wants_primary {
        let Some(substitute) = first_other_active(repo, client_id, facility_id)? else {
            return Err(ServiceError::InvalidState(
                "cannot remove the last active primary facility".to_string(),
            ));
        };
        Some(substitute)
    } else {
        None
    };

    let updates = payload.into_update();
    repo.update_facility(facility_id, &updates).map_err(|err| {
        log::error!("Failed to update facility {facility_id}: {err}");
        ServiceError::from(err)
    })?;

    if wants_primary && !existing.is_primary {
        repo.set_primary_facility(client_id, facility_id)?;
    } else if let Some(substitute) = substitute {
        repo.set_primary_facility(client_id, FacilityId::new(substitute.id)?)?;
    }

    repo.get_facility_by_id(facility_id)?
        .ok_or(ServiceError::NotFound)
}

/// Soft-deletes a facility. A primary facility is only deactivated when
/// another active facility exists to take over the flag.
pub fn deactivate_facility<R>(repo: &R, facility_id: FacilityId) -> ServiceResult<Facility>
where
    R: FacilityReader + FacilityWriter + ?Sized,
{
    let existing = repo
        .get_facility_by_id(facility_id)?
        .ok_or(ServiceError::NotFound)?;

    if !existing.is_active {
        return Ok(existing);
    }

    if existing.is_primary {
        let client_id = ClientId::new(existing.client_id)?;
        let Some(substitute) = first_other_active(repo, client_id, facility_id)? else {
            return Err(ServiceError::InvalidState(
                "cannot deactivate the last active primary facility".to_string(),
            ));
        };

        let deactivated = repo.deactivate_facility(facility_id)?;
        repo.set_primary_facility(client_id, FacilityId::new(substitute.id)?)?;
        return Ok(deactivated);
    }

    repo.deactivate_facility(facility_id)
        .map_err(ServiceError::from)
}

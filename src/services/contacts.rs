//! Services maintaining the contact book of a client.
//!
//! Enforces the single-primary invariant: at most one active contact per
//! client carries the primary flag, and the flag is reassigned rather than
//! dropped whenever the current holder is demoted or deactivated.

use crate::domain::contact::Contact;
use crate::domain::types::{ClientId, ContactId};
use crate::forms::contact::{ContactForm, ContactPayload};
use crate::repository::{
    ClientReader, ContactListQuery, ContactReader, ContactWriter,
};
use crate::services::{BatchOutcome, ServiceError, ServiceResult};

/// Fetches a contact by its identifier.
pub fn get_contact_by_id<R>(repo: &R, contact_id: ContactId) -> ServiceResult<Option<Contact>>
where
    R: ContactReader + ?Sized,
{
    repo.get_contact_by_id(contact_id)
        .map_err(ServiceError::from)
}

/// Lists the contacts of a client, active ones only by default.
pub fn list_contacts<R>(repo: &R, query: ContactListQuery) -> ServiceResult<Vec<Contact>>
where
    R: ContactReader + ?Sized,
{
    repo.list_contacts(query).map_err(ServiceError::from)
}

/// Rejects emails and phone numbers already used by another contact.
/// Uniqueness is global, not scoped to the client; both phone columns are
/// checked against both submitted numbers.
fn ensure_contact_unique<R>(
    repo: &R,
    payload: &ContactPayload,
    exclude: Option<ContactId>,
) -> ServiceResult<()>
where
    R: ContactReader + ?Sized,
{
    if let Some(email) = &payload.email
        && repo.find_contact_by_email(email.as_str(), exclude)?.is_some()
    {
        return Err(ServiceError::Conflict(format!(
            "email {email} is already in use"
        )));
    }

    for phone in [&payload.phone, &payload.mobile_phone].into_iter().flatten() {
        if repo
            .find_contact_by_phone(phone.as_str(), exclude)?
            .is_some()
        {
            return Err(ServiceError::Conflict(format!(
                "phone number {phone} is already in use"
            )));
        }
    }

    Ok(())
}

/// First active contact of the client other than `exclude`, in stable id
/// order. Used to pick the substitute primary.
fn first_other_active<R>(
    repo: &R,
    client_id: ClientId,
    exclude: ContactId,
) -> ServiceResult<Option<Contact>>
where
    R: ContactReader + ?Sized,
{
    let contacts = repo.list_contacts(ContactListQuery::new(client_id))?;
    Ok(contacts.into_iter().find(|c| c.id != exclude.get()))
}

/// Validates the form and creates the contact. The repository forces the
/// primary flag when the client has no active primary yet.
pub fn create_contact<R>(repo: &R, form: ContactForm) -> ServiceResult<Contact>
where
    R: ClientReader + ContactReader + ContactWriter + ?Sized,
{
    let payload = ContactPayload::try_from(form)?;

    repo.get_client_by_id(payload.client_id)?
        .ok_or(ServiceError::NotFound)?;

    ensure_contact_unique(repo, &payload, None)?;

    let new_contact = payload.into_new();
    repo.create_contact(&new_contact).map_err(|err| {
        log::error!("Failed to create contact: {err}");
        ServiceError::from(err)
    })
}

/// Validates the form and applies it to an existing contact, reconciling
/// the primary flag when it changed.
pub fn update_contact<R>(
    repo: &R,
    contact_id: ContactId,
    form: ContactForm,
) -> ServiceResult<Contact>
where
    R: ContactReader + ContactWriter + ?Sized,
{
    let payload = ContactPayload::try_from(form)?;

    let existing = repo
        .get_contact_by_id(contact_id)?
        .ok_or(ServiceError::NotFound)?;

    if existing.client_id != payload.client_id.get() {
        return Err(ServiceError::InvalidState(
            "a contact cannot be moved to another client".to_string(),
        ));
    }

    ensure_contact_unique(repo, &payload, Some(contact_id))?;

    let client_id = payload.client_id;
    let wants_primary = payload.is_primary;

    // Demotion needs a substitute; refuse before writing anything.
    let substitute = if existing.is_primary && !wants_primary {
        let Some(substitute) = first_other_active(repo, client_id, contact_id)? else {
            return Err(ServiceError::InvalidState(
                "cannot remove the last active primary contact".to_string(),
            ));
        };
        Some(substitute)
    } else {
        None
    };

    let updates = payload.into_update();
    repo.update_contact(contact_id, &updates).map_err(|err| {
        log::error!("Failed to update contact {contact_id}: {err}");
        ServiceError::from(err)
    })?;

    if wants_primary && !existing.is_primary {
        repo.set_primary_contact(client_id, contact_id)?;
    } else if let Some(substitute) = substitute {
        repo.set_primary_contact(client_id, ContactId::new(substitute.id)?)?;
    }

    repo.get_contact_by_id(contact_id)?
        .ok_or(ServiceError::NotFound)
}

/// Soft-deletes a contact. A primary contact is only deactivated when
/// another active contact exists to take over the flag.
pub fn deactivate_contact<R>(repo: &R, contact_id: ContactId) -> ServiceResult<Contact>
where
    R: ContactReader + ContactWriter + ?Sized,
{
    let existing = repo
        .get_contact_by_id(contact_id)?
        .ok_or(ServiceError::NotFound)?;

    if !existing.is_active {
        return Ok(existing);
    }

    if existing.is_primary {
        let client_id = ClientId::new(existing.client_id)?;
        let Some(substitute) = first_other_active(repo, client_id, contact_id)? else {
            return Err(ServiceError::InvalidState(
                "cannot deactivate the last active primary contact".to_string(),
            ));
        };

        let deactivated = repo.deactivate_contact(contact_id)?;
        repo.set_primary_contact(client_id, ContactId::new(substitute.id)?)?;
        return Ok(deactivated);
    }

    repo.deactivate_contact(contact_id)
        .map_err(ServiceError::from)
}

/// Soft-deletes a set of contacts one by one, aggregating per-item failures.
pub fn bulk_deactivate_contacts<R>(repo: &R, contact_ids: &[ContactId]) -> BatchOutcome
where
    R: ContactReader + ContactWriter + ?Sized,
{
    let mut outcome = BatchOutcome::default();
    for &contact_id in contact_ids {
        match deactivate_contact(repo, contact_id) {
            Ok(_) => outcome.record_success(),
            Err(err) => {
                log::error!("Failed to deactivate contact {contact_id}: {err}");
                outcome.record_failure(contact_id.get(), err);
            }
        }
    }
    outcome
}

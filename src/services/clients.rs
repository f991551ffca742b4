//! Services handling client administration workflows.

use crate::domain::client::Client;
use crate::domain::types::ClientId;
use crate::forms::client::{ClientForm, ClientPayload};
use crate::repository::{ClientListQuery, ClientReader, ClientWriter};
use crate::services::{ServiceError, ServiceResult};

/// Fetches a client by its identifier.
pub fn get_client_by_id<R>(repo: &R, client_id: ClientId) -> ServiceResult<Option<Client>>
where
    R: ClientReader + ?Sized,
{
    repo.get_client_by_id(client_id).map_err(ServiceError::from)
}

/// Retrieves the total count and the requested page of clients.
pub fn list_clients<R>(repo: &R, query: ClientListQuery) -> ServiceResult<(usize, Vec<Client>)>
where
    R: ClientReader + ?Sized,
{
    repo.list_clients(query).map_err(ServiceError::from)
}

/// Validates the incoming form and persists a new client.
pub fn create_client<R>(repo: &R, form: ClientForm) -> ServiceResult<Client>
where
    R: ClientWriter + ?Sized,
{
    let payload = ClientPayload::try_from(form)?;
    let new_client = payload.into_new();

    repo.create_client(&new_client).map_err(|err| {
        log::error!("Failed to create client: {err}");
        ServiceError::from(err)
    })
}

/// Applies the validated form to an existing client.
pub fn update_client<R>(repo: &R, client_id: ClientId, form: ClientForm) -> ServiceResult<Client>
where
    R: ClientReader + ClientWriter + ?Sized,
{
    let payload = ClientPayload::try_from(form)?;

    repo.get_client_by_id(client_id)?
        .ok_or(ServiceError::NotFound)?;

    let updates = payload.into_update();
    repo.update_client(client_id, &updates).map_err(|err| {
        log::error!("Failed to update client {client_id}: {err}");
        ServiceError::from(err)
    })
}

/// Removes a client together with its contacts, facilities and reports.
pub fn delete_client<R>(repo: &R, client_id: ClientId) -> ServiceResult<()>
where
    R: ClientReader + ClientWriter + ?Sized,
{
    repo.get_client_by_id(client_id)?
        .ok_or(ServiceError::NotFound)?;

    repo.delete_client(client_id).map_err(|err| {
        log::error!("Failed to delete client {client_id}: {err}");
        ServiceError::from(err)
    })
}

//! Repository implementation for clients.

use chrono::Utc;
use diesel::prelude::*;

use crate::{
    domain::{
        client::{Client, NewClient, UpdateClient},
        types::ClientId,
    },
    models::client::{
        Client as DbClient, NewClient as DbNewClient, UpdateClient as DbUpdateClient,
    },
    repository::{ClientListQuery, ClientReader, ClientWriter, DieselRepository, errors::RepositoryResult},
};

impl ClientReader for DieselRepository {
    fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>> {
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let client = clients::table
            .find(id.get())
            .first::<DbClient>(&mut conn)
            .optional()?;

        Ok(client.map(Into::into))
    }

    fn list_clients(&self, query: ClientListQuery) -> RepositoryResult<(usize, Vec<Client>)> {
        use crate::schema::clients;

        let mut conn = self.conn()?;

        let mut items = clients::table.into_boxed();
        let mut count = clients::table.into_boxed();

        if let Some(needle) = &query.search {
            let pattern = format!("%{needle}%");
            items = items.filter(
                clients::name
                    .like(pattern.clone())
                    .or(clients::email.like(pattern.clone()))
                    .or(clients::phone.like(pattern.clone()))
                    .or(clients::address.like(pattern.clone())),
            );
            count = count.filter(
                clients::name
                    .like(pattern.clone())
                    .or(clients::email.like(pattern.clone()))
                    .or(clients::phone.like(pattern.clone()))
                    .or(clients::address.like(pattern)),
            );
        }

        let total: i64 = count.count().get_result(&mut conn)?;

        items = items.order(clients::name.asc());
        if let Some(pagination) = &query.pagination {
            let page = pagination.page.max(1);
            items = items
                .limit(pagination.per_page as i64)
                .offset(((page - 1) * pagination.per_page) as i64);
        }

        let clients = items
            .load::<DbClient>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok((total as usize, clients))
    }
}

impl ClientWriter for DieselRepository {
    fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client> {
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let db_new_client: DbNewClient = new_client.into();

        let created = diesel::insert_into(clients::table)
            .values(&db_new_client)
            .get_result::<DbClient>(&mut conn)?;

        Ok(created.into())
    }

    fn update_client(
        &self,
        client_id: ClientId,
        updates: &UpdateClient,
    ) -> RepositoryResult<Client> {
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let db_updates: DbUpdateClient = updates.into();

        let updated = diesel::update(clients::table.find(client_id.get()))
            .set((&db_updates, clients::updated_at.eq(Utc::now().naive_utc())))
            .get_result::<DbClient>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_client(&self, client_id: ClientId) -> RepositoryResult<()> {
        use crate::schema::{contacts, facilities, interventions, work_days};

        let mut conn = self.conn()?;

        conn.transaction::<(), diesel::result::Error, _>(|conn| {
            let intervention_ids: Vec<i32> = interventions::table
                .filter(interventions::client_id.eq(client_id.get()))
                .select(interventions::id)
                .load(conn)?;

            diesel::delete(
                work_days::table.filter(work_days::intervention_id.eq_any(intervention_ids)),
            )
            .execute(conn)?;
            diesel::delete(
                interventions::table.filter(interventions::client_id.eq(client_id.get())),
            )
            .execute(conn)?;
            diesel::delete(contacts::table.filter(contacts::client_id.eq(client_id.get())))
                .execute(conn)?;
            diesel::delete(facilities::table.filter(facilities::client_id.eq(client_id.get())))
                .execute(conn)?;
            diesel::delete(crate::schema::clients::table.find(client_id.get())).execute(conn)?;
            Ok(())
        })?;

        Ok(())
    }
}

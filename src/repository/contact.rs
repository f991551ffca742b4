//! Repository implementation for client contacts.
//!
//! The single-primary invariant is enforced here: creation and the
//! set-primary operation run inside one transaction so a reader can never
//! observe two active primary contacts for the same client.

use chrono::Utc;
use diesel::prelude::*;

use crate::{
    domain::{
        contact::{Contact, NewContact, UpdateContact},
        types::{ClientId, ContactId},
    },
    models::contact::{
        Contact as DbContact, NewContact as DbNewContact, UpdateContact as DbUpdateContact,
    },
    repository::{
        ContactListQuery, ContactReader, ContactWriter, DieselRepository,
        errors::{RepositoryError, RepositoryResult},
    },
};

impl ContactReader for DieselRepository {
    fn get_contact_by_id(&self, id: ContactId) -> RepositoryResult<Option<Contact>> {
        use crate::schema::contacts;

        let mut conn = self.conn()?;
        let contact = contacts::table
            .find(id.get())
            .first::<DbContact>(&mut conn)
            .optional()?;

        Ok(contact.map(Into::into))
    }

    fn list_contacts(&self, query: ContactListQuery) -> RepositoryResult<Vec<Contact>> {
        use crate::schema::contacts;

        let mut conn = self.conn()?;

        let mut items = contacts::table
            .filter(contacts::client_id.eq(query.client_id.get()))
            .into_boxed();

        if !query.include_inactive {
            items = items.filter(contacts::is_active.eq(true));
        }

        items = items.order(contacts::id.asc());
        if let Some(pagination) = &query.pagination {
            let page = pagination.page.max(1);
            items = items
                .limit(pagination.per_page as i64)
                .offset(((page - 1) * pagination.per_page) as i64);
        }

        Ok(items
            .load::<DbContact>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    fn get_primary_contact(&self, client_id: ClientId) -> RepositoryResult<Option<Contact>> {
        use crate::schema::contacts;

        let mut conn = self.conn()?;
        let contact = contacts::table
            .filter(contacts::client_id.eq(client_id.get()))
            .filter(contacts::is_primary.eq(true))
            .filter(contacts::is_active.eq(true))
            .first::<DbContact>(&mut conn)
            .optional()?;

        Ok(contact.map(Into::into))
    }

    fn find_contact_by_email(
        &self,
        email: &str,
        exclude: Option<ContactId>,
    ) -> RepositoryResult<Option<Contact>> {
        use crate::schema::contacts;

        let mut conn = self.conn()?;

        let mut query = contacts::table
            .filter(contacts::email.eq(email))
            .into_boxed();
        if let Some(exclude) = exclude {
            query = query.filter(contacts::id.ne(exclude.get()));
        }

        let contact = query.first::<DbContact>(&mut conn).optional()?;
        Ok(contact.map(Into::into))
    }

    fn find_contact_by_phone(
        &self,
        phone: &str,
        exclude: Option<ContactId>,
    ) -> RepositoryResult<Option<Contact>> {
        use crate::schema::contacts;

        let mut conn = self.conn()?;

        let mut query = contacts::table
            .filter(
                contacts::phone
                    .eq(phone)
                    .or(contacts::mobile_phone.eq(phone)),
            )
            .into_boxed();
        if let Some(exclude) = exclude {
            query = query.filter(contacts::id.ne(exclude.get()));
        }

        let contact = query.first::<DbContact>(&mut conn).optional()?;
        Ok(contact.map(Into::into))
    }
}

impl ContactWriter for DieselRepository {
    fn create_contact(&self, new_contact: &NewContact) -> RepositoryResult<Contact> {
        use crate::schema::contacts;

        let mut conn = self.conn()?;

        let created = conn.transaction::<DbContact, diesel::result::Error, _>(|conn| {
            let primaries: i64 = contacts::table
                .filter(contacts::client_id.eq(new_contact.client_id))
                .filter(contacts::is_primary.eq(true))
                .filter(contacts::is_active.eq(true))
                .count()
                .get_result(conn)?;

            let mut db_new_contact: DbNewContact = new_contact.into();
            if primaries == 0 {
                // First active contact of the client always becomes primary.
                db_new_contact.is_primary = true;
            } else if db_new_contact.is_primary {
                diesel::update(
                    contacts::table
                        .filter(contacts::client_id.eq(new_contact.client_id))
                        .filter(contacts::is_primary.eq(true)),
                )
                .set(contacts::is_primary.eq(false))
                .execute(conn)?;
            }

            diesel::insert_into(contacts::table)
                .values(&db_new_contact)
                .get_result::<DbContact>(conn)
        })?;

        Ok(created.into())
    }

    fn update_contact(
        &self,
        contact_id: ContactId,
        updates: &UpdateContact,
    ) -> RepositoryResult<Contact> {
        use crate::schema::contacts;

        let mut conn = self.conn()?;
        let db_updates: DbUpdateContact = updates.into();

        let updated = diesel::update(contacts::table.find(contact_id.get()))
            .set((&db_updates, contacts::updated_at.eq(Utc::now().naive_utc())))
            .get_result::<DbContact>(&mut conn)?;

        Ok(updated.into())
    }

    fn set_primary_contact(
        &self,
        client_id: ClientId,
        contact_id: ContactId,
    ) -> RepositoryResult<()> {
        use crate::schema::contacts;

        let mut conn = self.conn()?;

        conn.transaction::<(), RepositoryError, _>(|conn| {
            let target = contacts::table
                .find(contact_id.get())
                .filter(contacts::client_id.eq(client_id.get()))
                .filter(contacts::is_active.eq(true))
                .first::<DbContact>(conn)
                .optional()?;
            if target.is_none() {
                return Err(RepositoryError::NotFound);
            }

            diesel::update(
                contacts::table
                    .filter(contacts::client_id.eq(client_id.get()))
                    .filter(contacts::is_primary.eq(true))
                    .filter(contacts::id.ne(contact_id.get())),
            )
            .set(contacts::is_primary.eq(false))
            .execute(conn)?;

            diesel::update(contacts::table.find(contact_id.get()))
                .set((
                    contacts::is_primary.eq(true),
                    contacts::updated_at.eq(Utc::now().naive_utc()),
                ))
                .execute(conn)?;

            Ok(())
        })
    }

    fn deactivate_contact(&self, contact_id: ContactId) -> RepositoryResult<Contact> {
        use crate::schema::contacts;

        let mut conn = self.conn()?;

        let updated = diesel::update(contacts::table.find(contact_id.get()))
            .set((
                contacts::is_active.eq(false),
                contacts::is_primary.eq(false),
                contacts::updated_at.eq(Utc::now().naive_utc()),
            ))
            .get_result::<DbContact>(&mut conn)?;

        Ok(updated.into())
    }
}

//! Repository implementation for client facilities.
//!
//! Mirrors the contact repository: creation and set-primary run inside a
//! transaction to uphold the single-primary invariant.

use chrono::Utc;
use diesel::prelude::*;

use crate::{
    domain::{
        facility::{Facility, NewFacility, UpdateFacility},
        types::{ClientId, FacilityId},
    },
    models::facility::{
        Facility as DbFacility, NewFacility as DbNewFacility, UpdateFacility as DbUpdateFacility,
    },
    repository::{
        DieselRepository, FacilityListQuery, FacilityReader, FacilityWriter,
        errors::{RepositoryError, RepositoryResult},
    },
};

impl FacilityReader for DieselRepository {
    fn get_facility_by_id(&self, id: FacilityId) -> RepositoryResult<Option<Facility>> {
        use crate::schema::facilities;

        let mut conn = self.conn()?;
        let facility = facilities::table
            .find(id.get())
            .first::<DbFacility>(&mut conn)
            .optional()?;

        Ok(facility.map(Into::into))
    }

    fn list_facilities(&self, query: FacilityListQuery) -> RepositoryResult<Vec<Facility>> {
        use crate::schema::facilities;

        let mut conn = self.conn()?;

        let mut items = facilities::table
            .filter(facilities::client_id.eq(query.client_id.get()))
            .into_boxed();

        if !query.include_inactive {
            items = items.filter(facilities::is_active.eq(true));
        }

        items = items.order(facilities::id.asc());
        if let Some(pagination) = &query.pagination {
            let page = pagination.page.max(1);
            items = items
                .limit(pagination.per_page as i64)
                .offset(((page - 1) * pagination.per_page) as i64);
        }

        Ok(items
            .load::<DbFacility>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    fn get_primary_facility(&self, client_id: ClientId) -> RepositoryResult<Option<Facility>> {
        use crate::schema::facilities;

        let mut conn = self.conn()?;
        let facility = facilities::table
            .filter(facilities::client_id.eq(client_id.get()))
            .filter(facilities::is_primary.eq(true))
            .filter(facilities::is_active.eq(true))
            .first::<DbFacility>(&mut conn)
            .optional()?;

        Ok(facility.map(Into::into))
    }

    fn find_facility_by_name(
        &self,
        client_id: ClientId,
        name: &str,
        exclude: Option<FacilityId>,
    ) -> RepositoryResult<Option<Facility>> {
        use crate::schema::facilities;

        let mut conn = self.conn()?;

        let mut query = facilities::table
            .filter(facilities::client_id.eq(client_id.get()))
            .filter(facilities::name.eq(name))
            .filter(facilities::is_active.eq(true))
            .into_boxed();
        if let Some(exclude) = exclude {
            query = query.filter(facilities::id.ne(exclude.get()));
        }

        let facility = query.first::<DbFacility>(&mut conn).optional()?;
        Ok(facility.map(Into::into))
    }
}

impl FacilityWriter for DieselRepository {
    fn create_facility(&self, new_facility: &NewFacility) -> RepositoryResult<Facility> {
        use crate::schema::facilities;

        let mut conn = self.conn()?;

        let created = conn.transaction::<DbFacility, diesel::result::Error, _>(|conn| {
            let primaries: i64 = facilities::table
                .filter(facilities::client_id.eq(new_facility.client_id))
                .filter(facilities::is_primary.eq(true))
                .filter(facilities::is_active.eq(true))
                .count()
                .get_result(conn)?;

            let mut db_new_facility: DbNewFacility = new_facility.into();
            if primaries == 0 {
                // First active facility of the client always becomes primary.
                db_new_facility.is_primary = true;
            } else if db_new_facility.is_primary {
                diesel::update(
                    facilities::table
                        .filter(facilities::client_id.eq(new_facility.client_id))
                        .filter(facilities::is_primary.eq(true)),
                )
                .set(facilities::is_primary.eq(false))
                .execute(conn)?;
            }

            diesel::insert_into(facilities::table)
                .values(&db_new_facility)
                .get_result::<DbFacility>(conn)
        })?;

        Ok(created.into())
    }

    fn update_facility(
        &self,
        facility_id: FacilityId,
        updates: &UpdateFacility,
    ) -> RepositoryResult<Facility> {
        use crate::schema::facilities;

        let mut conn = self.conn()?;
        let db_updates: DbUpdateFacility = updates.into();

        let updated = diesel::update(facilities::table.find(facility_id.get()))
            .set((
                &db_updates,
                facilities::updated_at.eq(Utc::now().naive_utc()),
            ))
            .get_result::<DbFacility>(&mut conn)?;

        Ok(updated.into())
    }

    fn set_primary_facility(
        &self,
        client_id: ClientId,
        facility_id: FacilityId,
    ) -> RepositoryResult<()> {
        use crate::schema::facilities;

        let mut conn = self.conn()?;

        conn.transaction::<(), RepositoryError, _>(|conn| {
            let target = facilities::table
                .find(facility_id.get())
                .filter(facilities::client_id.eq(client_id.get()))
                .filter(facilities::is_active.eq(true))
                .first::<DbFacility>(conn)
                .optional()?;
            if target.is_none() {
                return Err(RepositoryError::NotFound);
            }

            diesel::update(
                facilities::table
                    .filter(facilities::client_id.eq(client_id.get()))
                    .filter(facilities::is_primary.eq(true))
                    .filter(facilities::id.ne(facility_id.get())),
            )
            .set(facilities::is_primary.eq(false))
            .execute(conn)?;

            diesel::update(facilities::table.find(facility_id.get()))
                .set((
                    facilities::is_primary.eq(true),
                    facilities::updated_at.eq(Utc::now().naive_utc()),
                ))
                .execute(conn)?;

            Ok(())
        })
    }

    fn deactivate_facility(&self, facility_id: FacilityId) -> RepositoryResult<Facility> {
        use crate::schema::facilities;

        let mut conn = self.conn()?;

        let updated = diesel::update(facilities::table.find(facility_id.get()))
            .set((
                facilities::is_active.eq(false),
                facilities::is_primary.eq(false),
                facilities::updated_at.eq(Utc::now().naive_utc()),
            ))
            .get_result::<DbFacility>(&mut conn)?;

        Ok(updated.into())
    }
}

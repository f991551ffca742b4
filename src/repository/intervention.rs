//! Repository implementation for technical interventions and work days.

use chrono::Utc;
use diesel::prelude::*;

use crate::{
    domain::{
        intervention::{
            DetailsSection, GeneralSection, InterventionStatus, NewIntervention, NewWorkDay,
            SignaturesSection, TechnicalIntervention, WorkDay,
        },
        types::InterventionId,
    },
    models::intervention::{
        DetailsChangeset, GeneralChangeset, Intervention as DbIntervention,
        NewIntervention as DbNewIntervention, NewWorkDay as DbNewWorkDay,
        SignaturesChangeset, WorkDay as DbWorkDay,
    },
    repository::{
        DieselRepository, InterventionListQuery, InterventionReader, InterventionWriter,
        errors::{RepositoryError, RepositoryResult},
    },
};

fn load_work_days(
    conn: &mut crate::db::DbConnection,
    intervention_id: i32,
) -> Result<Vec<WorkDay>, diesel::result::Error> {
    use crate::schema::work_days;

    Ok(work_days::table
        .filter(work_days::intervention_id.eq(intervention_id))
        .order((work_days::date.asc(), work_days::id.asc()))
        .load::<DbWorkDay>(conn)?
        .into_iter()
        .map(Into::into)
        .collect())
}

impl DieselRepository {
    fn hydrate(
        &self,
        conn: &mut crate::db::DbConnection,
        row: DbIntervention,
    ) -> RepositoryResult<TechnicalIntervention> {
        let id = row.id;
        let mut intervention = TechnicalIntervention::try_from(row)?;
        intervention.work_days = load_work_days(conn, id)?;
        Ok(intervention)
    }
}

impl InterventionReader for DieselRepository {
    fn get_intervention_by_id(
        &self,
        id: InterventionId,
    ) -> RepositoryResult<Option<TechnicalIntervention>> {
        use crate::schema::interventions;

        let mut conn = self.conn()?;
        let row = interventions::table
            .find(id.get())
            .first::<DbIntervention>(&mut conn)
            .optional()?;

        match row {
            Some(row) => Ok(Some(self.hydrate(&mut conn, row)?)),
            None => Ok(None),
        }
    }

    fn list_interventions(
        &self,
        query: InterventionListQuery,
    ) -> RepositoryResult<(usize, Vec<TechnicalIntervention>)> {
        use crate::schema::{interventions, work_days};

        let mut conn = self.conn()?;

        let mut items = interventions::table.into_boxed();
        let mut count = interventions::table.into_boxed();

        if let Some(client_id) = query.client_id {
            items = items.filter(interventions::client_id.eq(client_id.get()));
            count = count.filter(interventions::client_id.eq(client_id.get()));
        }
        if let Some(status) = query.status {
            items = items.filter(interventions::status.eq(status.as_str()));
            count = count.filter(interventions::status.eq(status.as_str()));
        }

        let total: i64 = count.count().get_result(&mut conn)?;

        items = items.order(interventions::created_at.desc());
        if let Some(pagination) = &query.pagination {
            let page = pagination.page.max(1);
            items = items
                .limit(pagination.per_page as i64)
                .offset(((page - 1) * pagination.per_page) as i64);
        }

        let rows = items.load::<DbIntervention>(&mut conn)?;
        let ids: Vec<i32> = rows.iter().map(|row| row.id).collect();

        let days = work_days::table
            .filter(work_days::intervention_id.eq_any(ids))
            .order((work_days::date.asc(), work_days::id.asc()))
            .load::<DbWorkDay>(&mut conn)?;

        let interventions = rows
            .into_iter()
            .map(|row| {
                let id = row.id;
                let mut intervention = TechnicalIntervention::try_from(row)
                    .map_err(RepositoryError::from)?;
                intervention.work_days = days
                    .iter()
                    .filter(|day| day.intervention_id == id)
                    .cloned()
                    .map(Into::into)
                    .collect();
                Ok(intervention)
            })
            .collect::<Result<Vec<_>, RepositoryError>>()?;

        Ok((total as usize, interventions))
    }
}

impl InterventionWriter for DieselRepository {
    fn create_intervention(
        &self,
        new_intervention: &NewIntervention,
    ) -> RepositoryResult<TechnicalIntervention> {
        use crate::schema::interventions;

        let mut conn = self.conn()?;
        let db_new: DbNewIntervention = new_intervention.try_into()?;

        let row = diesel::insert_into(interventions::table)
            .values(&db_new)
            .get_result::<DbIntervention>(&mut conn)?;

        self.hydrate(&mut conn, row)
    }

    fn update_general(
        &self,
        id: InterventionId,
        section: &GeneralSection,
    ) -> RepositoryResult<TechnicalIntervention> {
        use crate::schema::interventions;

        let mut conn = self.conn()?;
        let changeset: GeneralChangeset = section.try_into()?;

        let row = diesel::update(interventions::table.find(id.get()))
            .set((
                &changeset,
                interventions::updated_at.eq(Utc::now().naive_utc()),
            ))
            .get_result::<DbIntervention>(&mut conn)?;

        self.hydrate(&mut conn, row)
    }

    fn update_details(
        &self,
        id: InterventionId,
        section: &DetailsSection,
    ) -> RepositoryResult<TechnicalIntervention> {
        use crate::schema::interventions;

        let mut conn = self.conn()?;
        let changeset: DetailsChangeset = section.try_into()?;

        let row = diesel::update(interventions::table.find(id.get()))
            .set((
                &changeset,
                interventions::updated_at.eq(Utc::now().naive_utc()),
            ))
            .get_result::<DbIntervention>(&mut conn)?;

        self.hydrate(&mut conn, row)
    }

    fn replace_work_days(
        &self,
        id: InterventionId,
        new_work_days: &[NewWorkDay],
    ) -> RepositoryResult<Vec<WorkDay>> {
        use crate::schema::{interventions, work_days};

        let mut conn = self.conn()?;

        conn.transaction::<Vec<WorkDay>, RepositoryError, _>(|conn| {
            let exists: i64 = interventions::table
                .filter(interventions::id.eq(id.get()))
                .count()
                .get_result(conn)?;
            if exists == 0 {
                return Err(RepositoryError::NotFound);
            }

            diesel::delete(work_days::table.filter(work_days::intervention_id.eq(id.get())))
                .execute(conn)?;

            let insertables: Vec<DbNewWorkDay> = new_work_days
                .iter()
                .map(|day| DbNewWorkDay::from_domain(id.get(), day))
                .collect();
            diesel::insert_into(work_days::table)
                .values(&insertables)
                .execute(conn)?;

            diesel::update(interventions::table.find(id.get()))
                .set(interventions::updated_at.eq(Utc::now().naive_utc()))
                .execute(conn)?;

            Ok(load_work_days(conn, id.get())?)
        })
    }

    fn update_signatures(
        &self,
        id: InterventionId,
        section: &SignaturesSection,
    ) -> RepositoryResult<TechnicalIntervention> {
        use crate::schema::interventions;

        let mut conn = self.conn()?;
        let changeset: SignaturesChangeset = section.try_into()?;

        let row = diesel::update(interventions::table.find(id.get()))
            .set((
                &changeset,
                interventions::updated_at.eq(Utc::now().naive_utc()),
            ))
            .get_result::<DbIntervention>(&mut conn)?;

        self.hydrate(&mut conn, row)
    }

    fn set_status(
        &self,
        id: InterventionId,
        status: InterventionStatus,
    ) -> RepositoryResult<TechnicalIntervention> {
        use crate::schema::interventions;

        let mut conn = self.conn()?;

        let row = diesel::update(interventions::table.find(id.get()))
            .set((
                interventions::status.eq(status.as_str()),
                interventions::updated_at.eq(Utc::now().naive_utc()),
            ))
            .get_result::<DbIntervention>(&mut conn)?;

        self.hydrate(&mut conn, row)
    }

    fn delete_intervention(&self, id: InterventionId) -> RepositoryResult<()> {
        use crate::schema::{interventions, work_days};

        let mut conn = self.conn()?;

        conn.transaction::<(), RepositoryError, _>(|conn| {
            diesel::delete(work_days::table.filter(work_days::intervention_id.eq(id.get())))
                .execute(conn)?;
            let affected =
                diesel::delete(interventions::table.find(id.get())).execute(conn)?;
            if affected == 0 {
                return Err(RepositoryError::NotFound);
            }
            Ok(())
        })
    }
}

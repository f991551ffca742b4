//! Repository implementation for persisted list display preferences.

use diesel::prelude::*;

use crate::{
    domain::settings::CardVariant,
    models::settings::ListSetting,
    repository::{
        DieselRepository, SettingsReader, SettingsWriter,
        errors::{RepositoryError, RepositoryResult},
    },
};

impl SettingsReader for DieselRepository {
    fn get_card_variant(&self, list_key: &str) -> RepositoryResult<Option<CardVariant>> {
        use crate::schema::list_settings;

        let mut conn = self.conn()?;
        let setting = list_settings::table
            .find(list_key)
            .first::<ListSetting>(&mut conn)
            .optional()?;

        setting
            .map(|s| {
                CardVariant::try_from(s.card_variant.as_str())
                    .map_err(|e| RepositoryError::ValidationError(e.to_string()))
            })
            .transpose()
    }
}

impl SettingsWriter for DieselRepository {
    fn set_card_variant(&self, list_key: &str, variant: CardVariant) -> RepositoryResult<()> {
        use crate::schema::list_settings;

        let mut conn = self.conn()?;
        let setting = ListSetting {
            list_key: list_key.to_string(),
            card_variant: variant.as_str().to_string(),
        };

        diesel::insert_into(list_settings::table)
            .values(&setting)
            .on_conflict(list_settings::list_key)
            .do_update()
            .set(list_settings::card_variant.eq(variant.as_str()))
            .execute(&mut conn)?;

        Ok(())
    }
}

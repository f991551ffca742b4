use diesel::prelude::*;

#[derive(Debug, Clone, Queryable, Insertable)]
#[diesel(table_name = crate::schema::list_settings)]
/// Persisted card-display preference for one list screen.
pub struct ListSetting {
    pub list_key: String,
    pub card_variant: String,
}

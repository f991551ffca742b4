//! State holder for the contact list screen.
//!
//! The unfiltered collection is kept in memory and the visible projection
//! is recomputed on every query, filter or sort change, always in the same
//! order: status filter, text search, sort.

use std::collections::BTreeSet;

use crate::domain::contact::Contact;
use crate::domain::settings::CardVariant;
use crate::domain::types::{ClientId, ContactId};
use crate::repository::{ContactListQuery, ContactReader, ContactWriter, SettingsReader, SettingsWriter};
use crate::screens::{ListMode, OR_SEARCH_MIN_CHARS};
use crate::services::settings::{cycle_card_variant, load_card_variant};
use crate::services::{BatchOutcome, ServiceError, ServiceResult, contacts};

pub const CONTACT_LIST_KEY: &str = "contacts";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ContactStatusFilter {
    #[default]
    Active,
    Inactive,
    All,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ContactSortOrder {
    /// Primary contact first, then case-insensitive name.
    #[default]
    Name,
    CreatedRecent,
    CreatedOldest,
}

pub struct ContactListState {
    client_id: ClientId,
    all: Vec<Contact>,
    /// Recomputed projection shown by the list.
    pub visible: Vec<Contact>,
    pub query: String,
    pub status_filter: ContactStatusFilter,
    pub sort: ContactSortOrder,
    pub card_variant: CardVariant,
    pub mode: ListMode,
    pub selected: BTreeSet<i32>,
    pub error: Option<String>,
}

impl ContactListState {
    pub fn new(client_id: ClientId) -> Self {
        Self {
            client_id,
            all: Vec::new(),
            visible: Vec::new(),
            query: String::new(),
            status_filter: ContactStatusFilter::default(),
            sort: ContactSortOrder::default(),
            card_variant: CardVariant::default(),
            mode: ListMode::default(),
            selected: BTreeSet::new(),
            error: None,
        }
    }

    /// Loads the full collection and the persisted display preference,
    /// then recomputes the projection.
    pub fn load<R>(&mut self, repo: &R) -> ServiceResult<()>
    where
        R: ContactReader + SettingsReader + ?Sized,
    {
        let contacts = contacts::list_contacts(
            repo,
            ContactListQuery::new(self.client_id).include_inactive(),
        )
        .inspect_err(|err| {
            self.error = Some(err.to_string());
        })?;

        self.all = contacts;
        self.card_variant = load_card_variant(repo, CONTACT_LIST_KEY);
        self.error = None;
        self.recompute();
        Ok(())
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.recompute();
    }

    pub fn set_status_filter(&mut self, filter: ContactStatusFilter) {
        self.status_filter = filter;
        self.recompute();
    }

    pub fn set_sort(&mut self, sort: ContactSortOrder) {
        self.sort = sort;
        self.recompute();
    }

    pub fn cycle_card_variant<R>(&mut self, repo: &R)
    where
        R: SettingsWriter + ?Sized,
    {
        self.card_variant = cycle_card_variant(repo, CONTACT_LIST_KEY, self.card_variant);
    }

    pub fn enter_selection_mode(&mut self) {
        self.mode = ListMode::Selection;
        self.selected.clear();
    }

    pub fn exit_selection_mode(&mut self) {
        self.mode = ListMode::Browse;
        self.selected.clear();
    }

    /// Toggles a row in the current selection. Ignored while browsing.
    pub fn toggle_selected(&mut self, contact_id: i32) {
        if self.mode != ListMode::Selection {
            return;
        }
        if !self.selected.remove(&contact_id) {
            self.selected.insert(contact_id);
        }
    }

    /// Soft-deletes the selected contacts one by one and reloads. Per-item
    /// failures are aggregated in the returned summary.
    pub fn delete_selected<R>(&mut self, repo: &R) -> ServiceResult<BatchOutcome>
    where
        R: ContactReader + ContactWriter + SettingsReader + ?Sized,
    {
        let ids = self
            .selected
            .iter()
            .copied()
            .map(ContactId::new)
            .collect::<Result<Vec<_>, _>>()
            .map_err(ServiceError::from)?;

        let outcome = contacts::bulk_deactivate_contacts(repo, &ids);
        if outcome.is_total_failure() {
            self.error = Some(format!("failed to delete {} contacts", outcome.failure_count));
        }

        self.exit_selection_mode();
        self.load(repo)?;
        Ok(outcome)
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    fn recompute(&mut self) {
        let mut contacts: Vec<Contact> = self
            .all
            .iter()
            .filter(|contact| match self.status_filter {
                ContactStatusFilter::Active => contact.is_active,
                ContactStatusFilter::Inactive => !contact.is_active,
                ContactStatusFilter::All => true,
            })
            .filter(|contact| matches_query(contact, &self.query))
            .cloned()
            .collect();

        match self.sort {
            ContactSortOrder::Name => contacts.sort_by(|a, b| {
                b.is_primary
                    .cmp(&a.is_primary)
                    .then_with(|| a.full_name.to_lowercase().cmp(&b.full_name.to_lowercase()))
            }),
            ContactSortOrder::CreatedRecent => {
                contacts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            }
            ContactSortOrder::CreatedOldest => {
                contacts.sort_by(|a, b| a.created_at.cmp(&b.created_at));
            }
        }

        self.visible = contacts;
    }
}

fn matches_query(contact: &Contact, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }

    let name_hit = contact.full_name.to_lowercase().contains(&needle);
    if needle.chars().count() < OR_SEARCH_MIN_CHARS {
        return name_hit;
    }

    let field_hit = |field: &Option<String>| {
        field
            .as_ref()
            .is_some_and(|value| value.to_lowercase().contains(&needle))
    };

    name_hit
        || field_hit(&contact.email)
        || field_hit(&contact.phone)
        || field_hit(&contact.mobile_phone)
        || field_hit(&contact.role)
}

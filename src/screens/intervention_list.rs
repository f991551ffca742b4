//! State holder for the intervention list screen.
//!
//! Same fixed pipeline as the contact list: status filter, text search,
//! sort. Batch actions run through the intervention services and report a
//! partial-failure summary.

use std::collections::BTreeSet;

use crate::domain::intervention::{InterventionStatus, TechnicalIntervention};
use crate::domain::settings::CardVariant;
use crate::domain::types::InterventionId;
use crate::repository::{
    InterventionListQuery, InterventionReader, InterventionWriter, SettingsReader, SettingsWriter,
};
use crate::screens::{ListMode, OR_SEARCH_MIN_CHARS};
use crate::services::settings::{cycle_card_variant, load_card_variant};
use crate::services::{BatchOutcome, ServiceError, ServiceResult, interventions};

pub const INTERVENTION_LIST_KEY: &str = "interventions";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum InterventionSortOrder {
    #[default]
    CreatedRecent,
    CreatedOldest,
    /// Case-insensitive customer name.
    CustomerName,
}

pub struct InterventionListState {
    all: Vec<TechnicalIntervention>,
    /// Recomputed projection shown by the list.
    pub visible: Vec<TechnicalIntervention>,
    pub query: String,
    pub status_filter: Option<InterventionStatus>,
    pub sort: InterventionSortOrder,
    pub card_variant: CardVariant,
    pub mode: ListMode,
    pub selected: BTreeSet<i32>,
    pub error: Option<String>,
    debug_mode: bool,
}

impl InterventionListState {
    pub fn new(debug_mode: bool) -> Self {
        Self {
            all: Vec::new(),
            visible: Vec::new(),
            query: String::new(),
            status_filter: None,
            sort: InterventionSortOrder::default(),
            card_variant: CardVariant::default(),
            mode: ListMode::default(),
            selected: BTreeSet::new(),
            error: None,
            debug_mode,
        }
    }

    /// Loads the full collection and the persisted display preference,
    /// then recomputes the projection.
    pub fn load<R>(&mut self, repo: &R) -> ServiceResult<()>
    where
        R: InterventionReader + SettingsReader + ?Sized,
    {
        let (_, items) = interventions::list_interventions(repo, InterventionListQuery::new())
            .inspect_err(|err| {
                self.error = Some(err.to_string());
            })?;

        self.all = items;
        self.card_variant = load_card_variant(repo, INTERVENTION_LIST_KEY);
        self.error = None;
        self.recompute();
        Ok(())
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.recompute();
    }

    pub fn set_status_filter(&mut self, filter: Option<InterventionStatus>) {
        self.status_filter = filter;
        self.recompute();
    }

    pub fn set_sort(&mut self, sort: InterventionSortOrder) {
        self.sort = sort;
        self.recompute();
    }

    pub fn cycle_card_variant<R>(&mut self, repo: &R)
    where
        R: SettingsWriter + ?Sized,
    {
        self.card_variant = cycle_card_variant(repo, INTERVENTION_LIST_KEY, self.card_variant);
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
    pub fn toggle_selected(&mut self, intervention_id: i32) {
        if self.mode != ListMode::Selection {
            return;
        }
        if !self.selected.remove(&intervention_id) {
            self.selected.insert(intervention_id);
        }
    }

    fn selected_ids(&self) -> ServiceResult<Vec<InterventionId>> {
        self.selected
            .iter()
            .copied()
            .map(InterventionId::new)
            .collect::<Result<Vec<_>, _>>()
            .map_err(ServiceError::from)
    }

    /// Applies a status change to the selection, item by item, and reloads.
    pub fn change_status_of_selected<R>(
        &mut self,
        repo: &R,
        requested: InterventionStatus,
    ) -> ServiceResult<BatchOutcome>
    where
        R: InterventionReader + InterventionWriter + SettingsReader + ?Sized,
    {
        let ids = self.selected_ids()?;
        let outcome = interventions::batch_change_status(repo, &ids, requested, self.debug_mode);
        if outcome.is_total_failure() {
            self.error = Some(format!(
                "failed to update {} interventions",
                outcome.failure_count
            ));
        }

        self.exit_selection_mode();
        self.load(repo)?;
        Ok(outcome)
    }

    /// Deletes the selection, item by item, and reloads.
    pub fn delete_selected<R>(&mut self, repo: &R, force: bool) -> ServiceResult<BatchOutcome>
    where
        R: InterventionReader + InterventionWriter + SettingsReader + ?Sized,
    {
        let ids = self.selected_ids()?;
        let outcome = interventions::batch_delete_interventions(repo, &ids, force, self.debug_mode);
        if outcome.is_total_failure() {
            self.error = Some(format!(
                "failed to delete {} interventions",
                outcome.failure_count
            ));
        }

        self.exit_selection_mode();
        self.load(repo)?;
        Ok(outcome)
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    fn recompute(&mut self) {
        let mut items: Vec<TechnicalIntervention> = self
            .all
            .iter()
            .filter(|item| {
                self.status_filter
                    .is_none_or(|status| item.status == status)
            })
            .filter(|item| matches_query(item, &self.query))
            .cloned()
            .collect();

        match self.sort {
            InterventionSortOrder::CreatedRecent => {
                items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            }
            InterventionSortOrder::CreatedOldest => {
                items.sort_by(|a, b| a.created_at.cmp(&b.created_at));
            }
            InterventionSortOrder::CustomerName => items.sort_by(|a, b| {
                a.customer_data
                    .name
                    .to_lowercase()
                    .cmp(&b.customer_data.name.to_lowercase())
            }),
        }

        self.visible = items;
    }
}

fn matches_query(item: &TechnicalIntervention, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }

    let name_hit = item.customer_data.name.to_lowercase().contains(&needle);
    if needle.chars().count() < OR_SEARCH_MIN_CHARS {
        return name_hit;
    }

    name_hit
        || item
            .robot_data
            .serial_number
            .to_lowercase()
            .contains(&needle)
        || item
            .intervention_description
            .to_lowercase()
            .contains(&needle)
        || item
            .technicians
            .iter()
            .any(|t| t.to_lowercase().contains(&needle))
}

//! Per-screen state holders.
//!
//! Each screen owns its state exclusively: a loaded collection, the current
//! filter/search/sort settings and a recomputed visible projection, or the
//! tabbed editor state. There are no process-wide singletons; a state
//! holder lives as long as its logical screen session.

pub mod contact_list;
pub mod editor;
pub mod intervention_list;

/// Queries shorter than this match the display name only; from this length
/// on, the search widens to an OR over the secondary fields.
pub(crate) const OR_SEARCH_MIN_CHARS: usize = 3;

/// Whether a list is browsing or collecting a selection for a batch action.
/// Row-level actions are disabled while selecting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ListMode {
    #[default]
    Browse,
    Selection,
}

//! Services for the persisted list display preferences.
//!
//! Reads fall back to the default variant; writes are best-effort and never
//! surface a failure to the caller.

use crate::domain::settings::CardVariant;
use crate::repository::{SettingsReader, SettingsWriter};

/// Loads the stored card variant for a list, defaulting on a miss. A read
/// failure is logged and degrades to the default variant.
pub fn load_card_variant<R>(repo: &R, list_key: &str) -> CardVariant
where
    R: SettingsReader + ?Sized,
{
    match repo.get_card_variant(list_key) {
        Ok(variant) => variant.unwrap_or_default(),
        Err(err) => {
            log::error!("Failed to load card variant for {list_key}: {err}");
            CardVariant::default()
        }
    }
}

/// Advances the variant cycle for a list and persists the result
/// best-effort. The new variant is returned even when the write failed.
pub fn cycle_card_variant<R>(repo: &R, list_key: &str, current: CardVariant) -> CardVariant
where
    R: SettingsWriter + ?Sized,
{
    let next = current.next();
    if let Err(err) = repo.set_card_variant(list_key, next) {
        log::error!("Failed to persist card variant for {list_key}: {err}");
    }
    next
}

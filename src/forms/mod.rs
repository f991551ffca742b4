//! Form definitions backing the entity editors.

use thiserror::Error;
use validator::ValidationErrors;

pub mod client;
pub mod contact;
pub mod facility;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid client id")]
    InvalidClientId,

    #[error("invalid name: {0}")]
    InvalidName(String),

    #[error("invalid email address")]
    InvalidEmail,

    #[error("invalid phone number")]
    InvalidPhoneNumber,

    #[error("invalid facility code: {0}")]
    InvalidCode(String),

    #[error("invalid description: {0}")]
    InvalidDescription(String),

    #[error("incomplete address")]
    IncompleteAddress,
}

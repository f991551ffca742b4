use std::fmt::Display;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How list cards are rendered. Cycling moves FULL -> COMPACT -> MINIMAL
/// and wraps back to FULL.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum CardVariant {
    #[default]
    Full,
    Compact,
    Minimal,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown card variant: {0}")]
pub struct ParseCardVariantError(pub String);

impl CardVariant {
    /// The next variant in the display cycle.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            CardVariant::Full => CardVariant::Compact,
            CardVariant::Compact => CardVariant::Minimal,
            CardVariant::Minimal => CardVariant::Full,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CardVariant::Full => "FULL",
            CardVariant::Compact => "COMPACT",
            CardVariant::Minimal => "MINIMAL",
        }
    }
}

impl Display for CardVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for CardVariant {
    type Error = ParseCardVariantError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "FULL" => Ok(CardVariant::Full),
            "COMPACT" => Ok(CardVariant::Compact),
            "MINIMAL" => Ok(CardVariant::Minimal),
            other => Err(ParseCardVariantError(other.to_string())),
        }
    }
}

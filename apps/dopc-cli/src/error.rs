//! # App Error Type
//!
//! Unified error type for one calculator run, and how each failure is shown.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Config?      ── ConfigError ──────────────┐                            │
//! │  Form?        ── FieldErrors ──────────────┤                            │
//! │  Venue fetch? ── VenueError ───────────────┼──► AppError                │
//! │  Pricing?     ── CoreError ────────────────┤      │                     │
//! │  Stale?       ── Superseded ───────────────┘      ├─► user_message()    │
//! │                                                   └─► exit_code()       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use dopc_core::{CoreError, FieldErrors};
use dopc_venue::VenueError;

use crate::config::ConfigError;

/// Result type alias for app operations.
pub type AppResult<T> = Result<T, AppError>;

/// Exit code for a run that priced the order.
pub const EXIT_OK: u8 = 0;
/// Exit code when the venue could not be fetched or does not deliver.
pub const EXIT_CALCULATION_FAILED: u8 = 1;
/// Exit code for bad form input or configuration.
pub const EXIT_INVALID_INPUT: u8 = 2;

#[derive(Debug, Error)]
pub enum AppError {
    /// One or more form fields did not validate.
    #[error("{0}")]
    Input(FieldErrors),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Venue(#[from] VenueError),

    /// A newer calculation started before this one finished.
    #[error("Calculation superseded by a newer request")]
    Superseded,

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<FieldErrors> for AppError {
    fn from(errors: FieldErrors) -> Self {
        AppError::Input(errors)
    }
}

impl AppError {
    /// Text shown to the user.
    ///
    /// Field errors come one per line as `<field>: <message>`.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Input(errors) => errors
                .iter()
                .map(|(field, error)| format!("{}: {}", field, error))
                .collect::<Vec<_>>()
                .join("\n"),
            AppError::Venue(VenueError::NotFound { .. }) => {
                "Venue not found. Check the venue slug.".to_string()
            }
            other => other.to_string(),
        }
    }

    /// Process exit code for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Input(_) | AppError::Config(_) => EXIT_INVALID_INPUT,
            AppError::Core(CoreError::Validation(_) | CoreError::InvalidForm(_)) => {
                EXIT_INVALID_INPUT
            }
            AppError::Core(_) | AppError::Venue(_) | AppError::Superseded => {
                EXIT_CALCULATION_FAILED
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Error Types
//!
//! Domain-specific error types for dopc-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  dopc-core errors (this file)                                          │
//! │  ├── ValidationError  - One malformed or missing input field           │
//! │  ├── FieldErrors      - Every failing field of a form, at once         │
//! │  └── CoreError        - Parse or delivery-availability failure         │
//! │                                                                         │
//! │  dopc-venue errors (separate crate)                                    │
//! │  └── VenueError       - NotFound / fetch / decode failures             │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── AppError         - What the user sees                             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → AppError → terminal               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Messages are shown to the user verbatim, next to the offending field
//! 3. Callers branch on [`ErrorKind`], never on message text

use std::fmt;

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// The `field` is the human label of the input ("Cart value",
/// "User latitude", ...). Every message ends up in front of the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or whitespace only.
    #[error("{field} is required.")]
    Required { field: String },

    /// Currency text is not `10` or `10.55` shaped.
    #[error("{field} must be like 10 or 10.55")]
    InvalidCurrency { field: String },

    /// Text does not parse to a finite number.
    #[error("{field} must be a number.")]
    NotANumber { field: String },

    /// Numeric value is outside its allowed bounds.
    #[error("{field} must be between {min} and {max}.")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value does not fit the integer representation.
    #[error("{field} is too large.")]
    TooLarge { field: String },
}

/// Convenience type alias for validation results.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Form Fields
// =============================================================================

/// The four inputs of the price calculator form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FormField {
    VenueSlug,
    CartValue,
    UserLatitude,
    UserLongitude,
}

impl FormField {
    /// Human label used in messages.
    pub const fn label(&self) -> &'static str {
        match self {
            FormField::VenueSlug => "Venue slug",
            FormField::CartValue => "Cart value",
            FormField::UserLatitude => "User latitude",
            FormField::UserLongitude => "User longitude",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Every field error of one form submission, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: Vec<(FormField, ValidationError)>,
}

impl FieldErrors {
    pub fn new() -> Self {
        FieldErrors::default()
    }

    /// Records an error for `field`. A field keeps its first error only.
    pub fn push(&mut self, field: FormField, error: ValidationError) {
        if self.get(field).is_none() {
            self.errors.push((field, error));
        }
    }

    /// Returns the error recorded for `field`, if any.
    pub fn get(&self, field: FormField) -> Option<&ValidationError> {
        self.errors
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, e)| e)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &ValidationError)> {
        self.errors.iter().map(|(f, e)| (*f, e))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (_, error)) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

// =============================================================================
// Core Error
// =============================================================================

/// Coarse error classification for callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or missing user input; shown next to the field.
    Parse,

    /// Valid input, but the venue does not deliver that far.
    DeliveryNotAvailable,
}

/// Core calculation errors.
///
/// Every variant aborts the calculation; no partial result is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A single input failed to parse.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// One or more fields of a whole form failed to parse.
    #[error("{0}")]
    InvalidForm(FieldErrors),

    /// Distance falls in the venue's unavailable tier.
    ///
    /// ## User Workflow
    /// ```text
    /// Distance: 1 234 m
    ///      │
    ///      ▼
    /// Tiers: [0,500) [500,1000) [1000,∞ unavailable)
    ///      │
    ///      ▼
    /// DeliveryNotAvailable { distance: 1234, limit: 1000 }
    /// ```
    #[error("Delivery is not available for distance {distance} m (limit starts at {limit} m).")]
    DeliveryNotAvailable { distance: u64, limit: u64 },

    /// No tier covers the distance. The venue's tier data has a gap.
    #[error("Could not match distance range.")]
    NoMatchingRange { distance: u64 },

    /// A price component does not fit in i64 cents.
    #[error("Price is too large to calculate.")]
    AmountOverflow,
}

impl CoreError {
    /// Classifies the error so callers can branch without string matching.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::Validation(_) | CoreError::InvalidForm(_) | CoreError::AmountOverflow => {
                ErrorKind::Parse
            }
            CoreError::DeliveryNotAvailable { .. } | CoreError::NoMatchingRange { .. } => {
                ErrorKind::DeliveryNotAvailable
            }
        }
    }
}

impl From<FieldErrors> for CoreError {
    fn from(errors: FieldErrors) -> Self {
        CoreError::InvalidForm(errors)
    }
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

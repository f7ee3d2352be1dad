//! # Error Types
//!
//! Domain-specific error types for costwise-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  costwise-core errors (this file)                                      │
//! │  ├── CoreError        - Engine errors (InvalidInput / MissingReference) │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  costwise-db errors (separate crate)                                   │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── AppError         - What the user sees (code + message)            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → AppError → stderr / exit code     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine only ever fails for two reasons: the input cannot be computed
//! at all ([`ErrorKind::InvalidInput`]) or a referenced item does not exist
//! ([`ErrorKind::MissingReference`]). Numeric values that are merely
//! unusual (negative costs, huge markups) are never errors.

use thiserror::Error;

// =============================================================================
// Error Kind
// =============================================================================

/// Coarse classification of engine errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rejected before computation: zero quantity, empty selection, ...
    InvalidInput,
    /// A requested source item cannot be found.
    MissingReference,
}

// =============================================================================
// Core Error
// =============================================================================

/// Costing engine errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A referenced item cannot be found.
    ///
    /// ## When This Occurs
    /// - Attaching a component whose id is not in the record store
    /// - Pricing or allocating an item that was deleted meanwhile
    #[error("Item not found: {0}")]
    ItemNotFound(i64),

    /// Portfolio allocation was requested without any selected item.
    #[error("Portfolio selection is empty")]
    EmptyPortfolio,

    /// The selected items expect no monthly units at all, so there is
    /// nothing to distribute the operating costs over.
    #[error("Portfolio has no expected monthly units (total: {total_units})")]
    NoPortfolioUnits { total_units: f64 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Returns the coarse error classification.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::ItemNotFound(_) => ErrorKind::MissingReference,
            CoreError::EmptyPortfolio
            | CoreError::NoPortfolioUnits { .. }
            | CoreError::Validation(_) => ErrorKind::InvalidInput,
        }
    }

    /// True for every error rejected before computation.
    pub fn is_invalid_input(&self) -> bool {
        self.kind() == ErrorKind::InvalidInput
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Used for early validation before engine logic runs, and by the calling
/// layer before persisting user input.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Value is not a finite number.
    #[error("{field} must be a finite number")]
    NotFinite { field: String },

    /// Value is not allowed in this position.
    #[error("{field} is not allowed: {reason}")]
    NotAllowed { field: String, reason: String },
}

impl ValidationError {
    pub(crate) fn required(field: &str) -> Self {
        ValidationError::Required {
            field: field.to_string(),
        }
    }

    pub(crate) fn must_be_positive(field: &str) -> Self {
        ValidationError::MustBePositive {
            field: field.to_string(),
        }
    }

    pub(crate) fn not_allowed(field: &str, reason: impl Into<String>) -> Self {
        ValidationError::NotAllowed {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(CoreError::ItemNotFound(42).to_string(), "Item not found: 42");
        assert_eq!(
            CoreError::EmptyPortfolio.to_string(),
            "Portfolio selection is empty"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::required("name");
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::must_be_positive("quantity needed");
        assert_eq!(err.to_string(), "quantity needed must be positive");
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(CoreError::ItemNotFound(1).kind(), ErrorKind::MissingReference);
        assert!(CoreError::EmptyPortfolio.is_invalid_input());
        assert!(CoreError::NoPortfolioUnits { total_units: 0.0 }.is_invalid_input());
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::required("name").into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert_eq!(core_err.kind(), ErrorKind::InvalidInput);
    }
}

//! # Error Types
//!
//! Domain-specific error types for trimbook-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  trimbook-core errors (this file)                                      │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Field-level input failures                     │
//! │                                                                         │
//! │  trimbook-db errors (separate crate)                                   │
//! │  ├── DbError          - Database operation failures                    │
//! │  └── StoreError       - Bookkeeper/report surface (wraps both)         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → Caller               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (entity, id, quantities)
//! 3. Errors are enum variants, never String
//! 4. Validation runs before any write; a failed check leaves no state behind

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations raised before anything is
/// persisted. They should be caught and translated to user-friendly messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A referenced entity belongs to a different salon than the record
    /// referencing it.
    ///
    /// ## When This Occurs
    /// - A shave references a barber, hairstyle, or cash register from
    ///   another salon
    /// - A payment references a barber outside the payment's salon
    /// - An item use crosses salon boundaries through its item or shave
    #[error("{entity} {entity_id} does not belong to salon {salon_id}")]
    SalonMismatch {
        entity: &'static str,
        entity_id: String,
        salon_id: String,
    },

    /// Insufficient stock to record an item use.
    ///
    /// ## When This Occurs
    /// - Recording a use with quantity greater than `Item.current_stock`
    ///
    /// ## Recovery
    /// Record a purchase first, or lower the quantity. Stock is never
    /// driven negative by a use.
    #[error("Insufficient stock for {item}: available {available}, requested {requested}")]
    InsufficientStock {
        item: String,
        available: i64,
        requested: i64,
    },

    /// Items can only be attached to a COMPLETED shave.
    ///
    /// ## When This Occurs
    /// - Recording an item use against a scheduled, in-progress, or
    ///   cancelled shave
    #[error("Shave {shave_id} is {status}, items can only be used on a completed shave")]
    ShaveNotCompleted { shave_id: String, status: String },

    /// A normalized amount left the representable cents range.
    ///
    /// ## When This Occurs
    /// - `amount × exchange_rate` overflows the signed 64-bit cents range,
    ///   or the decimal result cannot be converted back to cents
    #[error("Amount out of range after normalization: {value}")]
    AmountOutOfRange { value: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when a field on an incoming record doesn't meet
/// requirements. Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or greater.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// A date range where the start falls after the end.
    #[error("{field} start must not be after its end")]
    InvalidPeriod { field: String },

    /// Invalid format (e.g., invalid currency code).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
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
        let err = CoreError::InsufficientStock {
            item: "Shaving Foam".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for Shaving Foam: available 3, requested 5"
        );
    }

    #[test]
    fn test_salon_mismatch_message() {
        let err = CoreError::SalonMismatch {
            entity: "barber",
            entity_id: "b-1".to_string(),
            salon_id: "s-1".to_string(),
        };
        assert_eq!(err.to_string(), "barber b-1 does not belong to salon s-1");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::MustBePositive {
            field: "amount".to_string(),
        };
        assert_eq!(err.to_string(), "amount must be positive");

        let err = ValidationError::InvalidPeriod {
            field: "payment period".to_string(),
        };
        assert_eq!(err.to_string(), "payment period start must not be after its end");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}

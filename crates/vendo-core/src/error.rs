//! # Error Types
//!
//! Field-validation error types for vendo-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                 │
//! │                                                                     │
//! │  vendo-core errors                                                  │
//! │  ├── ValidationError  - Product field validation (this file)        │
//! │  └── OrderError       - Order workflow failures (order module)      │
//! │                                                                     │
//! │  vendo-db errors (separate crate)                                   │
//! │  └── DbError          - Database operation failures                 │
//! │                                                                     │
//! │  pos-api errors (app)                                               │
//! │  └── ApiError         - HTTP status + body mapping                  │
//! │                                                                     │
//! │  Flow: ValidationError/OrderError → ApiError → HTTP response        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. `thiserror` derive macros, never manual impls
//! 2. Errors carry context (field name, bounds)
//! 3. Errors are enum variants, never bare Strings

use thiserror::Error;

/// Input validation errors for product fields.
///
/// Raised before any storage work happens; each maps to a 400 response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: &'static str },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    /// Invalid format (e.g., SKU with forbidden characters).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat {
        field: &'static str,
        reason: &'static str,
    },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
    },
}

/// Result type alias for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================

//! # Validation Module
//!
//! Field validation for the product management endpoints.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                              │
//! │                                                                     │
//! │  Layer 1: HTTP handler (Rust)                                       │
//! │  ├── Type validation (deserialization)                              │
//! │  └── THIS MODULE: field rules before any storage work               │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 2: Database (SQLite)                                         │
//! │  ├── NOT NULL constraints                                           │
//! │  └── UNIQUE sku index                                               │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Order-line validation (quantity, stock) lives in the [`crate::order`]
//! engine, not here - it needs the resolved product.

use crate::error::{ValidationError, ValidationResult};

// =============================================================================
// String Validators
// =============================================================================

/// Validates a SKU (Stock Keeping Unit).
///
/// ## Rules
/// - Must not be empty
/// - At most 50 characters
/// - Only alphanumeric characters, hyphens and underscores
///
/// ## Example
/// ```rust
/// use vendo_core::validation::validate_sku;
///
/// assert!(validate_sku("COKE-330").is_ok());
/// assert!(validate_sku("").is_err());
/// ```
pub fn validate_sku(sku: &str) -> ValidationResult<()> {
    let sku = sku.trim();

    if sku.is_empty() {
        return Err(ValidationError::Required { field: "sku" });
    }

    if sku.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "sku",
            max: 50,
        });
    }

    if !sku
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "sku",
            reason: "must contain only letters, numbers, hyphens, and underscores",
        });
    }

    Ok(())
}

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - At most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required { field: "name" });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name",
            max: 200,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price in cents.
///
/// ## Rules
/// - Must be non-negative when present (zero allowed: free items)
///
/// ## Example
/// ```rust
/// use vendo_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents(Some(1099)).is_ok());
/// assert!(validate_price_cents(None).is_ok());     // nullable price
/// assert!(validate_price_cents(Some(-100)).is_err());
/// ```
pub fn validate_price_cents(cents: Option<i64>) -> ValidationResult<()> {
    if let Some(cents) = cents {
        if cents < 0 {
            return Err(ValidationError::OutOfRange {
                field: "price",
                min: 0,
                max: i64::MAX,
            });
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_sku() {
        assert!(validate_sku("COKE-330").is_ok());
        assert!(validate_sku("ABC123").is_ok());
        assert!(validate_sku("product_1").is_ok());

        assert!(validate_sku("").is_err());
        assert!(validate_sku("   ").is_err());
        assert!(validate_sku("has space").is_err());
        assert!(validate_sku(&"A".repeat(100)).is_err());
    }

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Coca-Cola 330ml").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_price_cents() {
        assert!(validate_price_cents(Some(0)).is_ok());
        assert!(validate_price_cents(Some(1099)).is_ok());
        assert!(validate_price_cents(None).is_ok());
        assert!(validate_price_cents(Some(-100)).is_err());
    }
}

//! # Validation Module
//!
//! Input checks for callers that build [`NewProduct`] values.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Caller (THIS MODULE)                                         │
//! │  └── Format and range checks before a write                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: ProductRepository                                            │
//! │  └── No checks; statements go straight to SQLite                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  └── Foreign key product.store_id → store.id                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use stockroom_core::validation::{validate_article, validate_quantity};
//!
//! validate_article("W-100").unwrap();
//! validate_quantity(5).unwrap();
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::NewProduct;
use crate::{MAX_ARTICLE_LEN, MAX_PRODUCT_NAME_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates an article code.
///
/// ## Rules
/// - Must not be empty
/// - At most [`MAX_ARTICLE_LEN`] characters
/// - Only alphanumeric characters, hyphens, underscores
///
/// ```rust
/// use stockroom_core::validation::validate_article;
///
/// assert!(validate_article("W-100").is_ok());
/// assert!(validate_article("").is_err());
/// assert!(validate_article("W 100").is_err());
/// ```
pub fn validate_article(article: &str) -> ValidationResult<()> {
    let article = article.trim();

    if article.is_empty() {
        return Err(ValidationError::Required {
            field: "article".to_string(),
        });
    }

    if article.chars().count() > MAX_ARTICLE_LEN {
        return Err(ValidationError::TooLong {
            field: "article".to_string(),
            max: MAX_ARTICLE_LEN,
        });
    }

    if !article
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "article".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a product name: non-empty, at most [`MAX_PRODUCT_NAME_LEN`] characters.
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_PRODUCT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_PRODUCT_NAME_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a stock quantity. Zero is allowed (sold out).
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty < 0 {
        return Err(ValidationError::Negative {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a unit price. Zero is allowed (free items).
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Record Validators
// =============================================================================

/// Runs every field check on a [`NewProduct`], stopping at the first failure.
pub fn validate_new_product(product: &NewProduct) -> ValidationResult<()> {
    validate_product_name(&product.name)?;
    validate_article(&product.article)?;
    validate_price(product.price)?;
    validate_quantity(product.quantity)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn widget() -> NewProduct {
        NewProduct {
            name: "Widget".to_string(),
            article: "W-100".to_string(),
            price: Money::from_cents(999),
            quantity: 5,
            description: Some("basic widget".to_string()),
        }
    }

    #[test]
    fn test_validate_article() {
        assert!(validate_article("W-100").is_ok());
        assert!(validate_article("ABC123").is_ok());
        assert!(validate_article("part_1").is_ok());

        assert!(validate_article("").is_err());
        assert!(validate_article("   ").is_err());
        assert!(validate_article("has space").is_err());
        assert!(validate_article(&"A".repeat(51)).is_err());
    }

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Widget").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name(&"A".repeat(201)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(0).is_ok());
        assert!(validate_quantity(5).is_ok());
        assert!(validate_quantity(-1).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::zero()).is_ok());
        assert!(validate_price(Money::from_cents(999)).is_ok());
        assert!(validate_price(Money::from_cents(-1)).is_err());
    }

    #[test]
    fn test_validate_new_product() {
        assert!(validate_new_product(&widget()).is_ok());

        let mut bad = widget();
        bad.article = String::new();
        assert!(matches!(
            validate_new_product(&bad),
            Err(ValidationError::Required { field }) if field == "article"
        ));

        let mut bad = widget();
        bad.quantity = -3;
        assert!(matches!(
            validate_new_product(&bad),
            Err(ValidationError::Negative { field }) if field == "quantity"
        ));
    }
}

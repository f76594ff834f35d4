//! # Domain Types
//!
//! Records handed across the data-access boundary.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   NewProduct    │   │    Product      │   │     Store       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  name           │──►│  id (db)        │   │  id (db)        │       │
//! │  │  article        │   │  + NewProduct   │   │  name           │       │
//! │  │  price          │   │  store_id ──────┼──►│  address        │       │
//! │  │  quantity       │   │   (nullable)    │   │                 │       │
//! │  │  description    │   │                 │   │                 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity
//! - `id`: integer primary key assigned by the database
//! - `article`: human-facing SKU, expected unique but not enforced

use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A product row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Primary key, generated by the database.
    pub id: i64,

    /// Display name.
    pub name: String,

    /// Business identifier (SKU-like).
    pub article: String,

    /// Unit price.
    pub price: Money,

    /// Units in stock.
    pub quantity: i64,

    pub description: Option<String>,

    /// Store this product is assigned to, `None` when unassigned.
    pub store_id: Option<i64>,
}

impl Product {
    /// Whether the product is assigned to any store.
    #[inline]
    pub fn is_in_store(&self) -> bool {
        self.store_id.is_some()
    }

    /// Value of the units on hand (price × quantity), `None` when it does
    /// not fit in `Money`.
    #[inline]
    pub fn stock_value(&self) -> Option<Money> {
        self.price.checked_multiply_quantity(self.quantity)
    }

    /// Returns true when the mutable fields equal `fields`.
    pub fn has_fields(&self, fields: &NewProduct) -> bool {
        self.name == fields.name
            && self.article == fields.article
            && self.price == fields.price
            && self.quantity == fields.quantity
            && self.description == fields.description
    }
}

// =============================================================================
// New Product
// =============================================================================

/// The mutable fields of a product, used for inserts and full updates.
///
/// Carries neither an id nor a store assignment: ids come from the database
/// and store assignment has its own operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub article: String,
    pub price: Money,
    pub quantity: i64,
    pub description: Option<String>,
}

impl From<Product> for NewProduct {
    fn from(product: Product) -> Self {
        NewProduct {
            name: product.name,
            article: product.article,
            price: product.price,
            quantity: product.quantity,
            description: product.description,
        }
    }
}

// =============================================================================
// Store
// =============================================================================

/// A store a product may be assigned to. Read-only from this layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    pub id: i64,
    pub name: String,
    pub address: Option<String>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn widget() -> Product {
        Product {
            id: 7,
            name: "Widget".to_string(),
            article: "W-100".to_string(),
            price: Money::from_cents(999),
            quantity: 5,
            description: Some("basic widget".to_string()),
            store_id: None,
        }
    }

    #[test]
    fn test_stock_value() {
        assert_eq!(widget().stock_value(), Some(Money::from_cents(4995)));
    }

    #[test]
    fn test_stock_value_overflow_is_none() {
        let mut product = widget();
        product.price = Money::from_cents(10_000_000_000);
        product.quantity = 1_000_000_000;

        assert_eq!(product.stock_value(), None);
    }

    #[test]
    fn test_is_in_store() {
        let mut product = widget();
        assert!(!product.is_in_store());

        product.store_id = Some(3);
        assert!(product.is_in_store());
    }

    #[test]
    fn test_new_product_from_product_drops_identity() {
        let product = widget();
        let fields = NewProduct::from(product.clone());

        assert_eq!(fields.article, "W-100");
        assert!(product.has_fields(&fields));
    }

    #[test]
    fn test_has_fields_detects_difference() {
        let product = widget();
        let mut fields = NewProduct::from(product.clone());
        fields.quantity = 6;

        assert!(!product.has_fields(&fields));
    }
}

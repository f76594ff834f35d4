//! # stockroom-core: Domain Types for Stockroom
//!
//! Plain records for products and stores, an integer `Money` type for prices,
//! and caller-side validation. Nothing in here touches a database.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockroom Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Service layer (callers, not in this repo)          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ stockroom-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                  │   │
//! │  │   │   types   │  │   money   │  │ validation│                  │   │
//! │  │   │  Product  │  │   Money   │  │   rules   │                  │   │
//! │  │   │   Store   │  │           │  │  checks   │                  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 stockroom-db (Database Layer)                   │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Records (Product, NewProduct, Store)
//! - [`money`] - Money type with integer arithmetic
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation for callers
//!
//! ## Example Usage
//!
//! ```rust
//! use stockroom_core::{Money, NewProduct};
//!
//! let widget = NewProduct {
//!     name: "Widget".to_string(),
//!     article: "W-100".to_string(),
//!     price: Money::from_cents(999),
//!     quantity: 5,
//!     description: Some("basic widget".to_string()),
//! };
//!
//! assert_eq!(widget.price.to_string(), "$9.99");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Longest article code accepted by [`validation::validate_article`].
pub const MAX_ARTICLE_LEN: usize = 50;

/// Longest product name accepted by [`validation::validate_product_name`].
pub const MAX_PRODUCT_NAME_LEN: usize = 200;

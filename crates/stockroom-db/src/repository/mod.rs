//! # Repository Module
//!
//! Database repository implementations for Stockroom.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Caller                                                                │
//! │       │  db.products().find_by_article("W-100")                        │
//! │       ▼                                                                 │
//! │  ProductRepository                                                     │
//! │  ├── get_by_id / get_all / find_by_article                             │
//! │  ├── save / update / delete                                            │
//! │  └── store assignment and store lookup                                 │
//! │       │                                                                 │
//! │       │  one parameterized SQL statement per call                      │
//! │       ▼                                                                 │
//! │  rows::decode_product / rows::decode_store                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - Product CRUD and store assignment

pub mod product;
pub mod rows;

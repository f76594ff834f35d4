//! Row decoding.
//!
//! Result rows are turned into records by explicit column name lookups so a
//! schema change shows up as a decode error naming the missing column.

use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use stockroom_core::{Money, Product, Store};

/// Decodes one `product` row.
pub fn decode_product(row: &SqliteRow) -> Result<Product, sqlx::Error> {
    Ok(Product {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        article: row.try_get("article")?,
        price: row.try_get::<Money, _>("price")?,
        quantity: row.try_get("quantity")?,
        description: row.try_get("description")?,
        store_id: row.try_get("store_id")?,
    })
}

/// Decodes one `store` row.
pub fn decode_store(row: &SqliteRow) -> Result<Store, sqlx::Error> {
    Ok(Store {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        address: row.try_get("address")?,
    })
}

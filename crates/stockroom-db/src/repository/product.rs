//! # Product Repository
//!
//! Database operations for products and their store assignment.
//!
//! ## Key Operations
//! - CRUD keyed by integer id
//! - Lookup by article
//! - Store assignment, release, and the product → store join
//!
//! ## Missing Rows
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Operation                     │  No matching row                       │
//! │  ──────────────────────────────┼─────────────────────────────────────── │
//! │  get_by_id                     │  Err(DbError::NotFound)                │
//! │  find_by_article               │  Ok(None)                              │
//! │  get_store_where_is_product    │  Ok(None) (also when unassigned)       │
//! │  update / delete /             │  Ok(0) rows affected                   │
//! │  release / assign              │                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Single-row lookups return the lowest matching id when several rows match.

use sqlx::sqlite::SqliteRow;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::rows::{decode_product, decode_store};
use stockroom_core::{NewProduct, Product, Store};

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// repo.save(&new_product).await?;
/// let product = repo.find_by_article("W-100").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Product)` - Product found
    /// * `Err(DbError::NotFound)` - No product with this id
    pub async fn get_by_id(&self, product_id: i64) -> DbResult<Product> {
        debug!(product_id, "Fetching product");

        sqlx::query(
            r#"
            SELECT id, name, article, price, quantity, description, store_id
            FROM product
            WHERE id = ?1
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(product_id)
        .try_map(|row: SqliteRow| decode_product(&row))
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("Product", product_id))
    }

    /// Lists every product, ordered by id.
    pub async fn get_all(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query(
            r#"
            SELECT id, name, article, price, quantity, description, store_id
            FROM product
            ORDER BY id
            "#,
        )
        .try_map(|row: SqliteRow| decode_product(&row))
        .fetch_all(&self.pool)
        .await?;

        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    /// Inserts a new product.
    ///
    /// The row starts without a store. The generated id is not returned;
    /// look the product up by article when it is needed.
    ///
    /// ## Returns
    /// * `Err(DbError::CheckViolation)` etc. - rejected by a schema constraint
    pub async fn save(&self, product: &NewProduct) -> DbResult<()> {
        debug!(article = %product.article, "Inserting product");

        sqlx::query(
            r#"
            INSERT INTO product (name, article, price, quantity, description)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&product.name)
        .bind(&product.article)
        .bind(product.price)
        .bind(product.quantity)
        .bind(&product.description)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Replaces name, article, price, quantity and description.
    ///
    /// `store_id` is left untouched.
    ///
    /// ## Returns
    /// * `Ok(1)` - Product updated
    /// * `Ok(0)` - No product with this id (not an error)
    pub async fn update(&self, product_id: i64, product: &NewProduct) -> DbResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE product SET
                name = ?1,
                article = ?2,
                price = ?3,
                quantity = ?4,
                description = ?5
            WHERE id = ?6
            "#,
        )
        .bind(&product.name)
        .bind(&product.article)
        .bind(product.price)
        .bind(product.quantity)
        .bind(&product.description)
        .bind(product_id)
        .execute(&self.pool)
        .await?;

        let rows = result.rows_affected();
        debug!(product_id, rows, "Updated product");
        Ok(rows)
    }

    /// Deletes a product. Deleting a missing id affects zero rows.
    pub async fn delete(&self, product_id: i64) -> DbResult<u64> {
        let result = sqlx::query("DELETE FROM product WHERE id = ?1")
            .bind(product_id)
            .execute(&self.pool)
            .await?;

        let rows = result.rows_affected();
        debug!(product_id, rows, "Deleted product");
        Ok(rows)
    }

    /// Gets a product by its article.
    ///
    /// Articles are not unique in the schema; duplicates resolve to the
    /// lowest id.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn find_by_article(&self, article: &str) -> DbResult<Option<Product>> {
        debug!(article = %article, "Looking up product by article");

        let product = sqlx::query(
            r#"
            SELECT id, name, article, price, quantity, description, store_id
            FROM product
            WHERE article = ?1
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(article)
        .try_map(|row: SqliteRow| decode_product(&row))
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Lists products assigned to `store_id`, ordered by id.
    pub async fn get_all_products_in_store(&self, store_id: i64) -> DbResult<Vec<Product>> {
        let products = sqlx::query(
            r#"
            SELECT id, name, article, price, quantity, description, store_id
            FROM product
            WHERE store_id = ?1
            ORDER BY id
            "#,
        )
        .bind(store_id)
        .try_map(|row: SqliteRow| decode_product(&row))
        .fetch_all(&self.pool)
        .await?;

        debug!(store_id, count = products.len(), "Listed products in store");
        Ok(products)
    }

    /// Lists products without a store, ordered by id.
    pub async fn get_all_products_not_in_store(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query(
            r#"
            SELECT id, name, article, price, quantity, description, store_id
            FROM product
            WHERE store_id IS NULL
            ORDER BY id
            "#,
        )
        .try_map(|row: SqliteRow| decode_product(&row))
        .fetch_all(&self.pool)
        .await?;

        debug!(count = products.len(), "Listed unassigned products");
        Ok(products)
    }

    /// Gets the store a product is assigned to.
    ///
    /// ## Returns
    /// * `Ok(Some(Store))` - Product exists and has a store
    /// * `Ok(None)` - Product missing, or not assigned to any store
    pub async fn get_store_where_is_product(&self, product_id: i64) -> DbResult<Option<Store>> {
        debug!(product_id, "Looking up store for product");

        let store = sqlx::query(
            r#"
            SELECT s.id, s.name, s.address
            FROM store s
            INNER JOIN product p ON s.id = p.store_id
            WHERE p.id = ?1
            ORDER BY s.id
            LIMIT 1
            "#,
        )
        .bind(product_id)
        .try_map(|row: SqliteRow| decode_store(&row))
        .fetch_optional(&self.pool)
        .await?;

        Ok(store)
    }

    /// Detaches a product from its store.
    ///
    /// ## Returns
    /// * `Ok(0)` - No product with this id (not an error)
    pub async fn release_product_from_store(&self, product_id: i64) -> DbResult<u64> {
        let result = sqlx::query("UPDATE product SET store_id = NULL WHERE id = ?1")
            .bind(product_id)
            .execute(&self.pool)
            .await?;

        let rows = result.rows_affected();
        debug!(product_id, rows, "Released product from store");
        Ok(rows)
    }

    /// Assigns a product to a store.
    ///
    /// The store is not looked up first; an unknown `store_id` is rejected
    /// by the foreign key.
    ///
    /// ## Returns
    /// * `Ok(0)` - No product with this id (not an error)
    /// * `Err(DbError::ForeignKeyViolation)` - No store with this id
    pub async fn assign_store_for_product(&self, product_id: i64, store_id: i64) -> DbResult<u64> {
        let result = sqlx::query("UPDATE product SET store_id = ?1 WHERE id = ?2")
            .bind(store_id)
            .bind(product_id)
            .execute(&self.pool)
            .await?;

        let rows = result.rows_affected();
        debug!(product_id, store_id, rows, "Assigned product to store");
        Ok(rows)
    }

    /// Counts products (for diagnostics and seeding).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM product")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use std::collections::HashSet;
    use stockroom_core::Money;

    async fn setup() -> (Database, ProductRepository) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();
        (db, repo)
    }

    async fn insert_store(db: &Database, name: &str) -> i64 {
        sqlx::query("INSERT INTO store (name, address) VALUES (?1, ?2)")
            .bind(name)
            .bind(format!("{} high street", name))
            .execute(db.pool())
            .await
            .unwrap()
            .last_insert_rowid()
    }

    fn new_product(name: &str, article: &str, cents: i64, quantity: i64) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            article: article.to_string(),
            price: Money::from_cents(cents),
            quantity,
            description: Some(format!("{} description", name)),
        }
    }

    fn widget() -> NewProduct {
        NewProduct {
            name: "Widget".to_string(),
            article: "W-100".to_string(),
            price: Money::from_cents(999),
            quantity: 5,
            description: Some("basic widget".to_string()),
        }
    }

    /// Saves and returns the stored row, looked up by article.
    async fn save_and_fetch(repo: &ProductRepository, product: &NewProduct) -> Product {
        repo.save(product).await.unwrap();
        repo.find_by_article(&product.article)
            .await
            .unwrap()
            .expect("saved product should be found by article")
    }

    #[tokio::test]
    async fn test_widget_found_by_article() {
        let (_db, repo) = setup().await;

        repo.save(&widget()).await.unwrap();
        let found = repo.find_by_article("W-100").await.unwrap().unwrap();

        assert_eq!(found.name, "Widget");
        assert_eq!(found.article, "W-100");
        assert_eq!(found.price, Money::from_cents(999));
        assert_eq!(found.quantity, 5);
        assert_eq!(found.description.as_deref(), Some("basic widget"));
        assert_eq!(found.store_id, None);
    }

    #[tokio::test]
    async fn test_save_round_trips_through_get_by_id() {
        let (_db, repo) = setup().await;
        let fields = new_product("Gadget", "G-7", 1250, 12);

        let saved = save_and_fetch(&repo, &fields).await;
        let fetched = repo.get_by_id(saved.id).await.unwrap();

        assert!(fetched.has_fields(&fields));
        assert_eq!(fetched, saved);
    }

    #[tokio::test]
    async fn test_save_without_description() {
        let (_db, repo) = setup().await;
        let mut fields = new_product("Plain", "P-1", 100, 1);
        fields.description = None;

        let saved = save_and_fetch(&repo, &fields).await;
        assert_eq!(saved.description, None);
    }

    #[tokio::test]
    async fn test_get_by_id_missing_is_not_found() {
        let (_db, repo) = setup().await;

        let err = repo.get_by_id(404).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::NotFound { ref entity, ref id } if entity == "Product" && id == "404"
        ));
    }

    #[tokio::test]
    async fn test_find_by_article_missing_is_none() {
        let (_db, repo) = setup().await;
        repo.save(&widget()).await.unwrap();

        assert!(repo.find_by_article("NOPE-1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_article_resolves_to_lowest_id() {
        let (_db, repo) = setup().await;

        repo.save(&new_product("First", "DUP-1", 100, 1)).await.unwrap();
        repo.save(&new_product("Second", "DUP-1", 200, 2)).await.unwrap();

        let all = repo.get_all().await.unwrap();
        let lowest = all.iter().map(|p| p.id).min().unwrap();

        let found = repo.find_by_article("DUP-1").await.unwrap().unwrap();
        assert_eq!(found.id, lowest);
        assert_eq!(found.name, "First");
    }

    #[tokio::test]
    async fn test_get_all_empty_and_ordered() {
        let (_db, repo) = setup().await;
        assert!(repo.get_all().await.unwrap().is_empty());

        repo.save(&new_product("A", "A-1", 100, 1)).await.unwrap();
        repo.save(&new_product("B", "B-1", 200, 2)).await.unwrap();
        repo.save(&new_product("C", "C-1", 300, 3)).await.unwrap();

        let all = repo.get_all().await.unwrap();
        let articles: Vec<&str> = all.iter().map(|p| p.article.as_str()).collect();
        assert_eq!(articles, vec!["A-1", "B-1", "C-1"]);
        assert!(all.windows(2).all(|w| w[0].id < w[1].id));
        assert_eq!(repo.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_update_replaces_fields_and_keeps_store() {
        let (db, repo) = setup().await;
        let store_id = insert_store(&db, "Downtown").await;
        let saved = save_and_fetch(&repo, &widget()).await;
        repo.assign_store_for_product(saved.id, store_id).await.unwrap();

        let replacement = NewProduct {
            name: "Widget Pro".to_string(),
            article: "W-200".to_string(),
            price: Money::from_cents(1999),
            quantity: 2,
            description: None,
        };
        let rows = repo.update(saved.id, &replacement).await.unwrap();
        assert_eq!(rows, 1);

        let updated = repo.get_by_id(saved.id).await.unwrap();
        assert!(updated.has_fields(&replacement));
        assert_eq!(updated.store_id, Some(store_id));
        assert!(repo.find_by_article("W-100").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_missing_id_is_silent() {
        let (_db, repo) = setup().await;
        repo.save(&widget()).await.unwrap();

        let rows = repo.update(404, &new_product("Ghost", "G-0", 1, 1)).await.unwrap();
        assert_eq!(rows, 0);
        assert!(repo.find_by_article("G-0").await.unwrap().is_none());
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let (_db, repo) = setup().await;
        let saved = save_and_fetch(&repo, &widget()).await;

        assert_eq!(repo.delete(saved.id).await.unwrap(), 1);
        assert!(repo.get_by_id(saved.id).await.unwrap_err().is_not_found());

        // Already gone: no error, nothing affected.
        assert_eq!(repo.delete(saved.id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_assign_and_release_store() {
        let (db, repo) = setup().await;
        let store_id = insert_store(&db, "Harbor").await;
        let saved = save_and_fetch(&repo, &widget()).await;

        assert!(repo.get_store_where_is_product(saved.id).await.unwrap().is_none());

        assert_eq!(repo.assign_store_for_product(saved.id, store_id).await.unwrap(), 1);
        let store = repo.get_store_where_is_product(saved.id).await.unwrap().unwrap();
        assert_eq!(store.id, store_id);
        assert_eq!(store.name, "Harbor");
        assert_eq!(store.address.as_deref(), Some("Harbor high street"));

        assert_eq!(repo.release_product_from_store(saved.id).await.unwrap(), 1);
        assert!(repo.get_store_where_is_product(saved.id).await.unwrap().is_none());
        assert_eq!(repo.get_by_id(saved.id).await.unwrap().store_id, None);
    }

    #[tokio::test]
    async fn test_store_lookup_for_missing_product_is_none() {
        let (db, repo) = setup().await;
        insert_store(&db, "Harbor").await;

        assert!(repo.get_store_where_is_product(404).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_release_and_assign_missing_product_are_silent() {
        let (db, repo) = setup().await;
        let store_id = insert_store(&db, "Harbor").await;

        assert_eq!(repo.release_product_from_store(404).await.unwrap(), 0);
        assert_eq!(repo.assign_store_for_product(404, store_id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_assign_unknown_store_is_foreign_key_violation() {
        let (_db, repo) = setup().await;
        let saved = save_and_fetch(&repo, &widget()).await;

        let err = repo.assign_store_for_product(saved.id, 9999).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
        assert!(err.is_constraint_violation());

        assert_eq!(repo.get_by_id(saved.id).await.unwrap().store_id, None);
    }

    #[tokio::test]
    async fn test_save_negative_quantity_is_check_violation() {
        let (_db, repo) = setup().await;

        let err = repo
            .save(&new_product("Broken", "X-1", 100, -1))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::CheckViolation { .. }));
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_in_store_and_not_in_store_partition() {
        let (db, repo) = setup().await;
        let north = insert_store(&db, "North").await;
        let south = insert_store(&db, "South").await;

        for i in 0..6 {
            repo.save(&new_product(&format!("Item {}", i), &format!("IT-{}", i), 100 + i, i))
                .await
                .unwrap();
        }
        let all = repo.get_all().await.unwrap();
        repo.assign_store_for_product(all[0].id, north).await.unwrap();
        repo.assign_store_for_product(all[1].id, north).await.unwrap();
        repo.assign_store_for_product(all[2].id, south).await.unwrap();

        let in_north = repo.get_all_products_in_store(north).await.unwrap();
        let in_south = repo.get_all_products_in_store(south).await.unwrap();
        let unassigned = repo.get_all_products_not_in_store().await.unwrap();

        assert_eq!(in_north.len(), 2);
        assert_eq!(in_south.len(), 1);
        assert_eq!(unassigned.len(), 3);
        assert!(in_north.iter().all(|p| p.store_id == Some(north)));
        assert!(unassigned.iter().all(|p| p.store_id.is_none()));

        let assigned: HashSet<i64> = in_north.iter().chain(&in_south).map(|p| p.id).collect();
        let free: HashSet<i64> = unassigned.iter().map(|p| p.id).collect();
        assert!(assigned.is_disjoint(&free));

        let everything: HashSet<i64> = all.iter().map(|p| p.id).collect();
        let union: HashSet<i64> = assigned.union(&free).copied().collect();
        assert_eq!(union, everything);
    }

    #[tokio::test]
    async fn test_products_in_empty_store() {
        let (db, repo) = setup().await;
        let store_id = insert_store(&db, "Empty").await;
        repo.save(&widget()).await.unwrap();

        assert!(repo.get_all_products_in_store(store_id).await.unwrap().is_empty());
        assert!(repo.get_all_products_in_store(9999).await.unwrap().is_empty());
    }
}

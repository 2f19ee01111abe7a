//! # Item Repository
//!
//! Read access to inventory items, purchases, and uses.
//!
//! `current_stock` is derived state. The only writer is
//! [`adjust_stock`], which the bookkeeper calls inside the same
//! transaction as the purchase or use row that justifies the delta, so a
//! stock figure can never land without its paper trail.

use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use trimbook_core::{Item, ItemPurchase, ItemUsed};

/// Read-side repository for inventory.
#[derive(Debug, Clone)]
pub struct ItemRepository {
    pool: SqlitePool,
}

impl ItemRepository {
    /// Creates a new ItemRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ItemRepository { pool }
    }

    /// Gets an item by ID.
    pub async fn get(&self, id: &str) -> DbResult<Option<Item>> {
        let mut conn = self.pool.acquire().await?;
        fetch_item(&mut conn, id).await
    }

    /// Lists a salon's items, sorted by name.
    pub async fn list(&self, salon_id: &str) -> DbResult<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>(
            r#"
            SELECT id, salon_id, name, price_cents, currency_id, exchange_rate_micros,
                   price_default_cents, current_stock, created_at, updated_at
            FROM items
            WHERE salon_id = ?1
            ORDER BY name
            "#,
        )
        .bind(salon_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Lists items with stock strictly below `threshold`, emptiest first.
    pub async fn low_stock(&self, salon_id: &str, threshold: i64) -> DbResult<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>(
            r#"
            SELECT id, salon_id, name, price_cents, currency_id, exchange_rate_micros,
                   price_default_cents, current_stock, created_at, updated_at
            FROM items
            WHERE salon_id = ?1 AND current_stock < ?2
            ORDER BY current_stock
            "#,
        )
        .bind(salon_id)
        .bind(threshold)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Gets a purchase by ID.
    pub async fn get_purchase(&self, id: &str) -> DbResult<Option<ItemPurchase>> {
        let mut conn = self.pool.acquire().await?;
        fetch_purchase(&mut conn, id).await
    }

    /// Lists an item's purchases, newest first.
    pub async fn purchases_for_item(&self, item_id: &str) -> DbResult<Vec<ItemPurchase>> {
        let purchases = sqlx::query_as::<_, ItemPurchase>(
            r#"
            SELECT id, salon_id, item_id, cash_register_id, quantity, unit_price_cents,
                   currency_id, exchange_rate_micros, total_price_cents, amount_default_cents,
                   supplier, purchased_on, created_at, updated_at
            FROM item_purchases
            WHERE item_id = ?1
            ORDER BY purchased_on DESC
            "#,
        )
        .bind(item_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(purchases)
    }

    /// Gets a use record by ID.
    pub async fn get_use(&self, id: &str) -> DbResult<Option<ItemUsed>> {
        let mut conn = self.pool.acquire().await?;
        fetch_use(&mut conn, id).await
    }

    /// Lists the items consumed during a shave.
    pub async fn uses_for_shave(&self, shave_id: &str) -> DbResult<Vec<ItemUsed>> {
        let uses = sqlx::query_as::<_, ItemUsed>(
            r#"
            SELECT id, salon_id, item_id, shave_id, barber_id, quantity, note,
                   used_on, created_at, updated_at
            FROM item_uses
            WHERE shave_id = ?1
            ORDER BY used_on
            "#,
        )
        .bind(shave_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(uses)
    }
}

/// Fetches an item inside an existing transaction or connection.
pub(crate) async fn fetch_item(conn: &mut SqliteConnection, id: &str) -> DbResult<Option<Item>> {
    let item = sqlx::query_as::<_, Item>(
        r#"
        SELECT id, salon_id, name, price_cents, currency_id, exchange_rate_micros,
               price_default_cents, current_stock, created_at, updated_at
        FROM items
        WHERE id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(item)
}

/// Fetches a purchase inside an existing transaction or connection.
pub(crate) async fn fetch_purchase(
    conn: &mut SqliteConnection,
    id: &str,
) -> DbResult<Option<ItemPurchase>> {
    let purchase = sqlx::query_as::<_, ItemPurchase>(
        r#"
        SELECT id, salon_id, item_id, cash_register_id, quantity, unit_price_cents,
               currency_id, exchange_rate_micros, total_price_cents, amount_default_cents,
               supplier, purchased_on, created_at, updated_at
        FROM item_purchases
        WHERE id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(purchase)
}

/// Fetches a use record inside an existing transaction or connection.
pub(crate) async fn fetch_use(
    conn: &mut SqliteConnection,
    id: &str,
) -> DbResult<Option<ItemUsed>> {
    let used = sqlx::query_as::<_, ItemUsed>(
        r#"
        SELECT id, salon_id, item_id, shave_id, barber_id, quantity, note,
               used_on, created_at, updated_at
        FROM item_uses
        WHERE id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(used)
}

/// Shifts an item's stock by `delta` (positive for purchases, negative
/// for uses) inside the caller's transaction.
pub(crate) async fn adjust_stock(
    conn: &mut SqliteConnection,
    item_id: &str,
    delta: i64,
) -> DbResult<()> {
    let result = sqlx::query(
        r#"
        UPDATE items
        SET current_stock = current_stock + ?2, updated_at = ?3
        WHERE id = ?1
        "#,
    )
    .bind(item_id)
    .bind(delta)
    .bind(Utc::now())
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::not_found("Item", item_id));
    }

    Ok(())
}

/// Helper to generate a new item ID.
pub fn generate_item_id() -> String {
    Uuid::new_v4().to_string()
}

/// Helper to generate a new purchase ID.
pub fn generate_item_purchase_id() -> String {
    Uuid::new_v4().to_string()
}

/// Helper to generate a new use ID.
pub fn generate_item_use_id() -> String {
    Uuid::new_v4().to_string()
}

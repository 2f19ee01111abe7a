//! # Client Repository
//!
//! Database operations for client records.
//!
//! Clients are deliberately minimal: a name and contact details. A shave
//! may reference one, but nothing financial hangs off the client itself.

use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult, StoreResult};
use trimbook_core::validation::validate_name;
use trimbook_core::Client;

/// Repository for client operations.
#[derive(Debug, Clone)]
pub struct ClientRepository {
    pool: SqlitePool,
}

impl ClientRepository {
    /// Creates a new ClientRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ClientRepository { pool }
    }

    /// Creates a client.
    pub async fn create(
        &self,
        salon_id: &str,
        name: &str,
        phone: Option<String>,
        address: Option<String>,
    ) -> StoreResult<Client> {
        validate_name(name)?;

        debug!(salon_id = %salon_id, name = %name, "Creating client");

        let now = Utc::now();
        let client = Client {
            id: generate_client_id(),
            salon_id: salon_id.to_string(),
            name: name.trim().to_string(),
            phone,
            address,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            r#"
            INSERT INTO clients (id, salon_id, name, phone, address, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&client.id)
        .bind(&client.salon_id)
        .bind(&client.name)
        .bind(&client.phone)
        .bind(&client.address)
        .bind(client.created_at)
        .bind(client.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(client)
    }

    /// Gets a client by ID.
    pub async fn get(&self, id: &str) -> DbResult<Option<Client>> {
        let mut conn = self.pool.acquire().await?;
        fetch_client(&mut conn, id).await
    }

    /// Lists a salon's clients, sorted by name.
    pub async fn list(&self, salon_id: &str) -> DbResult<Vec<Client>> {
        let clients = sqlx::query_as::<_, Client>(
            r#"
            SELECT id, salon_id, name, phone, address, created_at, updated_at
            FROM clients
            WHERE salon_id = ?1
            ORDER BY name
            "#,
        )
        .bind(salon_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(clients)
    }

    /// Updates a client's name and contact details.
    pub async fn update(&self, client: &Client) -> StoreResult<()> {
        validate_name(&client.name)?;

        debug!(id = %client.id, "Updating client");

        let now = Utc::now();
        let result = sqlx::query(
            r#"
            UPDATE clients SET
                name = ?2,
                phone = ?3,
                address = ?4,
                updated_at = ?5
            WHERE id = ?1
            "#,
        )
        .bind(&client.id)
        .bind(client.name.trim())
        .bind(&client.phone)
        .bind(&client.address)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Client", &client.id).into());
        }

        Ok(())
    }
}

/// Fetches a client inside an existing transaction or connection.
pub(crate) async fn fetch_client(
    conn: &mut SqliteConnection,
    id: &str,
) -> DbResult<Option<Client>> {
    let client = sqlx::query_as::<_, Client>(
        r#"
        SELECT id, salon_id, name, phone, address, created_at, updated_at
        FROM clients
        WHERE id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(client)
}

/// Helper to generate a new client ID.
pub fn generate_client_id() -> String {
    Uuid::new_v4().to_string()
}

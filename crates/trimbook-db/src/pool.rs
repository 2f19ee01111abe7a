//! # Database Pool Management
//!
//! SQLite connection pool setup and the [`Database`] handle the rest of the
//! crate hangs off.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  DbConfig::new("./trimbook.db")      or DbConfig::in_memory()           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::new(config).await                                            │
//! │       ├── open pool (WAL, NORMAL sync, foreign keys ON)                 │
//! │       ├── run embedded migrations                                       │
//! │       └── create the shared write lock                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  db.shaves() / db.reports() ...     reads, any free connection          │
//! │  db.bookkeeper() / db.ledger()      writes, lock + one transaction      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why WAL
//! The bookkeeper holds a write transaction for the whole unit of work
//! (mutation, stock delta, recompute). Under the default rollback journal
//! that would stall every report for the duration; under WAL readers keep
//! reading the last committed state while the writer works.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::bookkeeper::Bookkeeper;
use crate::error::{DbError, DbResult};
use crate::ledger::RegisterLedger;
use crate::migrations;
use crate::reports::Reports;
use crate::repository::barber::BarberRepository;
use crate::repository::catalog::CatalogRepository;
use crate::repository::client::ClientRepository;
use crate::repository::item::ItemRepository;
use crate::repository::payment::PaymentRepository;
use crate::repository::register::RegisterRepository;
use crate::repository::salon::SalonRepository;
use crate::repository::shave::ShaveRepository;
use crate::repository::transaction::TransactionRepository;

// =============================================================================
// Configuration
// =============================================================================

/// Pool settings, built up with the usual chained setters.
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::new("./data/trimbook.db").max_connections(8);
/// let db = Database::new(config).await?;
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Where the SQLite file lives. Created on first open.
    pub database_path: PathBuf,

    /// Pool ceiling. 5 by default; an embedded single-process app rarely
    /// needs more.
    pub max_connections: u32,

    /// Connections kept warm when idle. Default 1.
    pub min_connections: u32,

    /// How long to wait for a free connection before giving up.
    /// Default 30 seconds.
    pub connect_timeout: Duration,

    /// How long an idle connection survives before the pool drops it.
    /// Default 10 minutes.
    pub idle_timeout: Duration,

    /// Apply embedded migrations during [`Database::new`]. Default true;
    /// disable only when the caller wants to control migration timing.
    pub run_migrations: bool,
}

impl DbConfig {
    /// Configuration pointing at a database file, with defaults for the rest.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            run_migrations: true,
        }
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the minimum number of connections.
    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    /// Sets the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets whether to run migrations on connect.
    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// An isolated `:memory:` database, the fixture every async test uses.
    ///
    /// Capped at a single connection: each connection to `:memory:` is its
    /// own empty database, so a second one would see no tables.
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(":memory:"),
            max_connections: 1,
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(60),
            run_migrations: true,
        }
    }
}

// =============================================================================
// Database
// =============================================================================

/// The handle everything else is reached through.
///
/// ## Design: One Pool, One Write Lock
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Database                                                               │
/// │                                                                         │
/// │  pool:       SqlitePool          shared by every repository            │
/// │  write_lock: Arc<Mutex<()>>      shared by Bookkeeper + RegisterLedger │
/// │                                                                         │
/// │  db.shaves().get(id)          ── pool ──►  reads run in parallel       │
/// │  db.bookkeeper().create_*()   ── lock ──►  financial writes run one    │
/// │  db.ledger().update_balance() ── lock ──►  at a time, each inside a    │
/// │                                            single SQLite transaction   │
/// │                                                                         │
/// │  The lock exists because a balance recompute reads several tables      │
/// │  and then writes the result back. Two interleaved recomputes could     │
/// │  otherwise commit a stale total over a fresh one.                      │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
///
/// Cloning is cheap; clones share the pool and the lock.
///
/// ## Usage
/// ```rust,ignore
/// let db = Database::new(DbConfig::new("./trimbook.db")).await?;
///
/// let salon = db.salons().get(&salon_id).await?;
/// let shave = db.bookkeeper().create_shave(new_shave).await?;
/// ```
#[derive(Debug, Clone)]
pub struct Database {
    /// The SQLite connection pool.
    pool: SqlitePool,

    /// Serializes every balance-affecting write across the process.
    write_lock: Arc<Mutex<()>>,
}

impl Database {
    /// Opens (creating if needed) the database and prepares it for use.
    ///
    /// Configures SQLite with WAL journaling, NORMAL synchronous, and
    /// foreign keys on, builds the pool, then applies embedded migrations
    /// unless the config disables them.
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(
            path = %config.database_path.display(),
            "Initializing database connection"
        );

        // mode=rwc: open read/write, create the file when missing
        let connect_url = format!("sqlite://{}?mode=rwc", config.database_path.display());

        let connect_options = SqliteConnectOptions::from_str(&connect_url)
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
            // Readers see the last commit while the bookkeeper writes
            .journal_mode(SqliteJournalMode::Wal)
            // NORMAL is durable enough under WAL; a crash can only lose
            // the last commit, never corrupt
            .synchronous(SqliteSynchronous::Normal)
            // Off by default in SQLite; the schema leans on FK enforcement
            .foreign_keys(true)
            .create_if_missing(true);

        debug!("Connection options configured");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(Some(config.idle_timeout))
            .connect_with(connect_options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        info!(
            max_connections = config.max_connections,
            "Database pool created"
        );

        let db = Database {
            pool,
            write_lock: Arc::new(Mutex::new(())),
        };

        if config.run_migrations {
            db.run_migrations().await?;
        }

        Ok(db)
    }

    /// Applies pending migrations.
    ///
    /// Runs automatically from [`Database::new`]; call directly only when
    /// `DbConfig.run_migrations` was disabled. Idempotent either way.
    pub async fn run_migrations(&self) -> DbResult<()> {
        info!("Running database migrations");
        migrations::run_migrations(&self.pool).await?;
        info!("Migrations complete");
        Ok(())
    }

    /// The raw pool, for queries no repository covers.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Returns the salon repository (salons and their currencies).
    ///
    /// ## Example
    /// ```rust,ignore
    /// let currency = db.salons().default_currency(&salon_id).await?;
    /// ```
    pub fn salons(&self) -> SalonRepository {
        SalonRepository::new(self.pool.clone())
    }

    /// Returns the client repository.
    pub fn clients(&self) -> ClientRepository {
        ClientRepository::new(self.pool.clone())
    }

    /// Returns the barber repository (barbers and commission rules).
    pub fn barbers(&self) -> BarberRepository {
        BarberRepository::new(self.pool.clone())
    }

    /// Returns the catalog repository (hairstyles and tariff history).
    pub fn catalog(&self) -> CatalogRepository {
        CatalogRepository::new(self.pool.clone())
    }

    /// Returns the cash register repository.
    pub fn registers(&self) -> RegisterRepository {
        RegisterRepository::new(self.pool.clone())
    }

    /// Returns the shave repository (reads only, writes go through the bookkeeper).
    pub fn shaves(&self) -> ShaveRepository {
        ShaveRepository::new(self.pool.clone())
    }

    /// Returns the payment repository (reads only).
    pub fn payments(&self) -> PaymentRepository {
        PaymentRepository::new(self.pool.clone())
    }

    /// Returns the transaction repository (reads only).
    pub fn transactions(&self) -> TransactionRepository {
        TransactionRepository::new(self.pool.clone())
    }

    /// Returns the item repository (items, purchases, uses; reads only).
    pub fn items(&self) -> ItemRepository {
        ItemRepository::new(self.pool.clone())
    }

    /// Returns the bookkeeper, the single entry point for financial writes.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let shave = db.bookkeeper().create_shave(new_shave).await?;
    /// ```
    pub fn bookkeeper(&self) -> Bookkeeper {
        Bookkeeper::new(self.pool.clone(), Arc::clone(&self.write_lock))
    }

    /// Returns the register ledger for balance reads and recomputation.
    pub fn ledger(&self) -> RegisterLedger {
        RegisterLedger::new(self.pool.clone(), Arc::clone(&self.write_lock))
    }

    /// Returns the report service (salon-wide financial summaries).
    pub fn reports(&self) -> Reports {
        Reports::new(self.pool.clone())
    }

    /// Closes the pool. Call on shutdown; every operation afterwards fails.
    pub async fn close(&self) {
        info!("Closing database connection pool");
        self.pool.close().await;
    }

    /// True when the database still answers a trivial query.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_database_comes_up_migrated() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        assert!(db.health_check().await);

        let (total, applied) = migrations::migration_status(db.pool()).await.unwrap();
        assert_eq!(total, applied);
        assert!(total >= 1);
    }

    #[tokio::test]
    async fn test_config_setters() {
        let config = DbConfig::new("/tmp/trimbook_test.db")
            .max_connections(8)
            .min_connections(2)
            .run_migrations(false);

        assert_eq!(config.max_connections, 8);
        assert_eq!(config.min_connections, 2);
        assert!(!config.run_migrations);
        assert!(DbConfig::in_memory().run_migrations);
    }
}

//! # Database Migrations
//!
//! Embedded SQL migrations for Trimbook.
//!
//! ## How Schema Changes Reach a Database
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  compile time     migrations/sqlite/*.sql baked into the binary         │
//! │       │           via sqlx::migrate! (no files needed at runtime)       │
//! │       ▼                                                                 │
//! │  Database::new ── run_migrations ──► compare _sqlx_migrations           │
//! │                                      against the embedded set           │
//! │                                              │                          │
//! │                          pending? ───────────┤                          │
//! │                              │               │                          │
//! │                              ▼               ▼                          │
//! │                      apply in order      nothing to do                  │
//! │                      record checksum                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every database this crate opens gets the same treatment, including the
//! in-memory ones the tests spin up, so a schema drift between test and
//! production databases cannot exist.
//!
//! ## Adding New Migrations
//!
//! 1. Add a file under `migrations/sqlite/` with the next sequence number,
//!    named `NNN_description.sql` (e.g. `002_add_reminders.sql`)
//! 2. Applied migrations are checksummed; never edit an existing file,
//!    always add a new one
//! 3. Prefer `IF NOT EXISTS` so a migration stays safe to re-run

use sqlx::SqlitePool;
use tracing::info;

use crate::error::DbResult;

/// All migrations under `migrations/sqlite`, embedded at compile time.
///
/// Currently a single file, `001_initial_schema.sql`: salons and their
/// currencies, staff and commission rules, the service catalog with tariff
/// history, and the financial tables the ledger aggregates (shaves,
/// payments, transactions, items, purchases, uses).
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Applies any embedded migrations the database has not seen yet.
///
/// Each migration runs in its own transaction and is recorded in
/// `_sqlx_migrations` with its checksum, so the call is idempotent and
/// ordered. Called automatically by `Database::new` unless
/// `DbConfig.run_migrations` is disabled.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    info!("Checking for pending migrations");

    MIGRATOR.run(pool).await?;

    info!("All migrations applied successfully");
    Ok(())
}

/// Returns `(embedded, applied)` migration counts for diagnostics.
///
/// A healthy database reports the two numbers equal. A missing
/// `_sqlx_migrations` table reads as zero applied.
pub async fn migration_status(pool: &SqlitePool) -> DbResult<(usize, usize)> {
    let total = MIGRATOR.migrations.len();

    let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
        .fetch_one(pool)
        .await
        .unwrap_or(0);

    Ok((total, applied as usize))
}

//! # trimbook-db: Database Layer for Trimbook
//!
//! SQLite persistence for the salon bookkeeping engine, on sqlx with
//! embedded migrations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Trimbook Data Flow                               │
//! │                                                                         │
//! │  Embedding application (desktop app, seed binary, tests)                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    trimbook-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   writes                      reads                             │   │
//! │  │   ┌───────────────┐           ┌───────────────┐                │   │
//! │  │   │  Bookkeeper   │           │ Repositories  │                │   │
//! │  │   │ (unit of work)│           │   Reports     │                │   │
//! │  │   │               │           │ RegisterLedger│                │   │
//! │  │   └───────┬───────┘           └───────┬───────┘                │   │
//! │  │           │      ┌───────────┐        │                        │   │
//! │  │           └─────►│ Database  │◄───────┘                        │   │
//! │  │                  │ (pool.rs) │                                 │   │
//! │  │                  └───────────┘                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │   SQLite (WAL): trimbook.db, or :memory: for tests              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  Pure money/commission/balance math lives in trimbook-core;             │
//! │  this crate feeds it rows and stores the results.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database and store error types
//! - [`repository`] - Per-entity repositories (salon, barber, catalog, ...)
//! - [`bookkeeper`] - The single write path for financial records
//! - [`ledger`] - Register balance recomputation
//! - [`reports`] - Salon-wide read models
//!
//! ## Usage
//!
//! ```rust,ignore
//! use trimbook_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/trimbook.db")).await?;
//!
//! // Mutate through the bookkeeper; balances stay current
//! let shave = db.bookkeeper().create_shave(new_shave).await?;
//!
//! // Read through repositories and reports
//! let summary = db.reports().financial_summary(&salon_id, &range).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod bookkeeper;
pub mod error;
pub mod ledger;
pub mod migrations;
pub mod pool;
pub mod reports;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult, StoreError, StoreResult};
pub use pool::{Database, DbConfig};

pub use bookkeeper::Bookkeeper;
pub use ledger::RegisterLedger;
pub use reports::{FinancialSummary, ItemUsageReport, Reports, ShaveStats, StockLevel};

// Repository re-exports for convenience
pub use repository::barber::BarberRepository;
pub use repository::catalog::CatalogRepository;
pub use repository::client::ClientRepository;
pub use repository::item::ItemRepository;
pub use repository::payment::PaymentRepository;
pub use repository::register::RegisterRepository;
pub use repository::salon::SalonRepository;
pub use repository::shave::ShaveRepository;
pub use repository::transaction::TransactionRepository;

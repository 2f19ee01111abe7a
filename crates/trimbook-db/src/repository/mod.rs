//! # Repository Module
//!
//! Database repository implementations for Trimbook.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  Embedding Application                                                 │
//! │       │                                                                 │
//! │       │  db.barbers().commission_rules(&barber_id)                     │
//! │       │  ↓                                                              │
//! │       ▼                                                                 │
//! │  BarberRepository                                                      │
//! │  ├── create(&self, salon_id, full_name, started_on)                    │
//! │  ├── get(&self, id)                                                    │
//! │  ├── list(&self, salon_id)                                             │
//! │  └── commission_rules(&self, barber_id)                                │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Two Kinds of Access
//!
//! Each repository exposes pool-backed methods for callers, plus
//! `pub(crate)` fetch helpers taking `&mut SqliteConnection` so the
//! bookkeeper can read reference rows inside its own transaction.
//!
//! Financial records (shaves, payments, transactions, purchases, uses) are
//! READ here but never written here. Writing them changes derived register
//! balances and stock, so those writes live in [`crate::bookkeeper`].
//!
//! ## Available Repositories
//!
//! - [`salon::SalonRepository`] - Salons and their currencies
//! - [`client::ClientRepository`] - Client records
//! - [`barber::BarberRepository`] - Barbers and commission rules
//! - [`catalog::CatalogRepository`] - Hairstyles and tariff history
//! - [`register::RegisterRepository`] - Cash registers
//! - [`shave::ShaveRepository`] - Shave reads
//! - [`payment::PaymentRepository`] - Payment reads
//! - [`transaction::TransactionRepository`] - Transaction reads
//! - [`item::ItemRepository`] - Items, purchases, and uses (reads)

pub mod barber;
pub mod catalog;
pub mod client;
pub mod item;
pub mod payment;
pub mod register;
pub mod salon;
pub mod shave;
pub mod transaction;

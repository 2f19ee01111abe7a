//! # trimbook-core: Pure Financial Logic for Trimbook
//!
//! This crate is the **heart** of Trimbook. It contains the reconciliation
//! rules of the salon ledger as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Trimbook Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Embedding Application                        │   │
//! │  │    record shaves ──► pay barbers ──► track stock ──► reports    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                trimbook-db (Storage Layer)                      │   │
//! │  │    Bookkeeper (mutations + recompute), Reports, repositories    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ trimbook-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │  ┌──────────┐ ┌──────────┐ ┌────────────┐ ┌────────┐ ┌───────┐ │   │
//! │  │  │  types   │ │  money   │ │ commission │ │ ledger │ │ valid.│ │   │
//! │  │  │  Shave   │ │  Money   │ │ rule pick  │ │ totals │ │ rules │ │   │
//! │  │  │  Barber  │ │  Rate    │ │ balance    │ │ avg    │ │ checks│ │   │
//! │  │  └──────────┘ └──────────┘ └────────────┘ └────────┘ └───────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Salon, Barber, Shave, Payment, Item, etc.)
//! - [`money`] - Money and ExchangeRate with integer storage (no floats!)
//! - [`commission`] - Commission rule selection and barber balances
//! - [`ledger`] - Cash register balance math and average item cost
//! - [`error`] - Domain error types
//! - [`validation`] - Field and cross-entity validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: Storage is cents (i64); fractional math runs through
//!    `rust_decimal` and rounds half-up at documented points only
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use trimbook_core::money::{ExchangeRate, Money};
//!
//! // Create money from cents (never from floats!)
//! let amount = Money::from_cents(10000); // 100.00
//!
//! // Normalize into the salon's default currency
//! let rate = ExchangeRate::from_micros(925_000); // 0.925
//! let normalized = amount.convert(rate).unwrap();
//!
//! // 100.00 at 0.925 = 92.50
//! assert_eq!(normalized.cents(), 9250);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod commission;
pub mod error;
pub mod ledger;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use trimbook_core::Money` instead of
// `use trimbook_core::money::Money`

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{ExchangeRate, Money};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum quantity on a single purchase or item use
///
/// ## Business Reason
/// Prevents typo-scale entries (e.g., typing 10000 instead of 10). Salons
/// restock consumables in small batches; anything above this is a mistake.
pub const MAX_QUANTITY: i64 = 9_999;

/// Stock level below which an item counts as "low stock"
///
/// ## Business Reason
/// Reports flag items near depletion so the next purchase happens before a
/// shave finds an empty shelf. Can be made configurable per-salon in future
/// versions.
pub const LOW_STOCK_THRESHOLD: i64 = 10;

//! Lot-based realized-loss accounting for dual-range liquidity strategies.
//!
//! This crate provides:
//! - A per-range LIFO ledger of deposit lots that realizes loss on withdrawal
//! - A tracker that follows two adjacent ranges through window shifts
//! - A builder folding a snapshot sequence into a per-block loss series
//! - Summary metrics over a finished series

/// Engine configuration.
pub mod config;
/// Error types.
pub mod error;
/// Per-step outcomes recorded by the tracker.
pub mod event;
/// Deposit lot ledger.
pub mod lot_ledger;
/// Loss series construction.
pub mod loss_series;
/// Prelude module for convenient imports.
pub mod prelude;
/// Dual-range state machine.
pub mod range_tracker;
/// Summary metrics.
pub mod summary;

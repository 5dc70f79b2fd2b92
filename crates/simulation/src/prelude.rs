//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types from the crate.
//!
//! # Example
//!
//! ```rust
//! use clmm_loss_simulation::prelude::*;
//!
//! let builder = LossSeriesBuilder::new(LossConfig::default().with_loss_tolerance(4));
//! assert!(builder.build(&[]).is_err());
//! ```

// Configuration
pub use crate::config::{ConfigError, LossConfig};

// Errors
pub use crate::error::{LedgerError, LossError};

// Events
pub use crate::event::{EventLog, RangeSide, ShiftKind, StepOutcome};

// Ledgers
pub use crate::lot_ledger::{Lot, RangeLedger};

// Loss series
pub use crate::loss_series::{LossSeries, LossSeriesBuilder, build_loss_series, validate_snapshots};

// Tracker
pub use crate::range_tracker::DualRangeTracker;

// Summary
pub use crate::summary::{LossSummary, annualized_loss_pct};

// Domain types
pub use clmm_loss_domain::{
    Holdings, MathError, RangeBounds, RangeState, Snapshot, SqrtPriceX96, TokenHoldings,
};

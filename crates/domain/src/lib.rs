//! Domain types and fixed-point math for concentrated liquidity loss accounting.
//!
//! This crate holds everything that is pure data or pure arithmetic:
//! - Q96 sqrt prices and range bounds
//! - Pool snapshots as produced by a snapshot feed
//! - Liquidity-to-amount conversions with on-chain integer semantics
//! - Token1-denominated capital valuation

/// Snapshot records consumed by the loss engine.
pub mod entities;
/// Error types for the math layer.
pub mod error;
/// Liquidity math and capital valuation.
pub mod math;
/// Serde helpers for big integers encoded as decimal strings.
pub mod serde_dec;
/// Token amounts.
pub mod token;
/// Value objects (sqrt prices, range bounds).
pub mod value_objects;

pub use entities::{Holdings, RangeState, Snapshot, TokenHoldings};
pub use error::MathError;
pub use token::{TokenAmount, TokenAmounts};
pub use value_objects::{RangeBounds, SqrtPriceX96};

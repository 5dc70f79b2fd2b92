//! Snapshot records produced by a snapshot feed.
//!
//! A snapshot captures, at one block, the pool spot price and the two adjacent
//! ranges a dual-range strategy keeps liquidity in.

use crate::token::TokenAmount;
use crate::value_objects::{RangeBounds, SqrtPriceX96};
use serde::{Deserialize, Serialize};

/// One of the two ranges as observed in a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeState {
    /// Range bounds.
    pub bounds: RangeBounds,
    /// Total liquidity currently deployed in the range.
    #[serde(with = "crate::serde_dec::dec_u128")]
    pub liquidity: u128,
}

impl RangeState {
    pub fn new(bounds: RangeBounds, liquidity: u128) -> Self {
        Self { bounds, liquidity }
    }
}

/// Raw token balances in one bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenHoldings {
    pub token0: TokenAmount,
    pub token1: TokenAmount,
}

impl TokenHoldings {
    pub fn new(token0: impl Into<TokenAmount>, token1: impl Into<TokenAmount>) -> Self {
        Self {
            token0: token0.into(),
            token1: token1.into(),
        }
    }
}

/// Token balances held by the strategy at a snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holdings {
    /// Tokens inside the lower range position.
    pub lower: TokenHoldings,
    /// Tokens inside the upper range position.
    pub upper: TokenHoldings,
    /// Tokens sitting idle outside both positions.
    #[serde(default)]
    pub idle: TokenHoldings,
}

impl Holdings {
    /// Total token0 across all buckets.
    pub fn total_token0(&self) -> f64 {
        self.lower.token0.to_f64() + self.upper.token0.to_f64() + self.idle.token0.to_f64()
    }

    /// Total token1 across all buckets.
    pub fn total_token1(&self) -> f64 {
        self.lower.token1.to_f64() + self.upper.token1.to_f64() + self.idle.token1.to_f64()
    }
}

/// Pool and strategy state at one block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub block_number: u64,
    pub sqrt_price_x96: SqrtPriceX96,
    pub lower: RangeState,
    pub upper: RangeState,
    /// Token balances, when the feed reports them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holdings: Option<Holdings>,
}

impl Snapshot {
    pub fn new(
        block_number: u64,
        sqrt_price_x96: SqrtPriceX96,
        lower: RangeState,
        upper: RangeState,
    ) -> Self {
        Self {
            block_number,
            sqrt_price_x96,
            lower,
            upper,
            holdings: None,
        }
    }

    /// Attaches token balances.
    #[must_use]
    pub fn with_holdings(mut self, holdings: Holdings) -> Self {
        self.holdings = Some(holdings);
        self
    }

    /// Liquidity this snapshot reports for `bounds`, zero when neither range matches.
    ///
    /// When both ranges carry the same bounds the upper figure is returned.
    pub fn liquidity_for(&self, bounds: &RangeBounds) -> u128 {
        if self.upper.bounds == *bounds {
            self.upper.liquidity
        } else if self.lower.bounds == *bounds {
            self.lower.liquidity
        } else {
            0
        }
    }
}

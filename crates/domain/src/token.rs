use primitive_types::U256;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An unsigned raw token amount (smallest units).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TokenAmount(#[serde(with = "crate::serde_dec::dec_u256")] pub U256);

impl TokenAmount {
    pub fn new(amount: impl Into<U256>) -> Self {
        Self(amount.into())
    }

    pub fn zero() -> Self {
        Self(U256::zero())
    }

    pub fn as_u256(&self) -> U256 {
        self.0
    }

    /// Nearest `f64`, for reporting metrics.
    pub fn to_f64(&self) -> f64 {
        crate::value_objects::sqrt_price::u256_to_f64(self.0)
    }
}

impl From<u64> for TokenAmount {
    fn from(v: u64) -> Self {
        Self(U256::from(v))
    }
}

impl From<u128> for TokenAmount {
    fn from(v: u128) -> Self {
        Self(U256::from(v))
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Token composition of a liquidity quantity at some price.
///
/// Components are signed: evaluating a range at a price outside its bounds
/// continues the linear formulas past the edges, which yields a negative leg.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenAmounts {
    pub amount0: i128,
    pub amount1: i128,
}

impl TokenAmounts {
    pub fn new(amount0: i128, amount1: i128) -> Self {
        Self { amount0, amount1 }
    }
}

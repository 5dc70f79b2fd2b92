use primitive_types::U256;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;

/// `2^96`, the scale of Q96 fixed point values.
pub const Q96: U256 = U256([0, 1 << 32, 0, 0]);

/// A square-root price in Q96 fixed point: `sqrt(price) * 2^96`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SqrtPriceX96(#[serde(with = "crate::serde_dec::dec_u256")] pub U256);

impl SqrtPriceX96 {
    pub fn new(value: impl Into<U256>) -> Self {
        Self(value.into())
    }

    /// Encodes `sqrt_price * 2^96` for small integer sqrt prices.
    pub fn from_integer_sqrt(sqrt_price: u64) -> Self {
        Self(U256::from(sqrt_price) * Q96)
    }

    pub fn as_u256(&self) -> U256 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// The spot price `(sqrt_price_x96 / 2^96)^2` in double precision.
    ///
    /// The integer is rounded to the nearest double before scaling. The square
    /// goes through libm `pow`, which near a rounding tie can differ from
    /// `sqrt * sqrt` by one ulp; valuations depend on the `pow` result.
    pub fn price_f64(&self) -> f64 {
        let sqrt = u256_to_f64(self.0) / 2f64.powi(96);
        // Kept opaque so the optimizer cannot lower `powf(2.0)` to a multiply.
        sqrt.powf(std::hint::black_box(2.0))
    }

    /// The spot price as a decimal, for display.
    pub fn price(&self) -> Option<Decimal> {
        Decimal::from_f64(self.price_f64())
    }
}

impl From<U256> for SqrtPriceX96 {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

impl fmt::Display for SqrtPriceX96 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Nearest double to `value`, ties to even.
pub(crate) fn u256_to_f64(value: U256) -> f64 {
    let bits = value.bits();
    if bits <= 128 {
        return value.low_u128() as f64;
    }
    let shift = bits - 128;
    let mut top = (value >> shift).low_u128();
    // Sticky bit: anything shifted out must still break rounding ties.
    if !(value & ((U256::one() << shift) - U256::one())).is_zero() {
        top |= 1;
    }
    top as f64 * 2f64.powi(shift as i32)
}

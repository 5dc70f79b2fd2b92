//! Liquidity to token amount conversions with on-chain integer semantics.
//!
//! Intermediates are carried in 512 bits, so `L * 2^96 * (b - a)` never
//! overflows for any `u128` liquidity and 160-bit sqrt ratios. Quotients round
//! towards negative infinity, which is plain truncation whenever the price sits
//! inside the range.

use crate::error::MathError;
use crate::token::TokenAmounts;
use crate::value_objects::{Q96, SqrtPriceX96};
use primitive_types::{U256, U512};

/// Magnitude of `b - a` and whether the difference is negative.
fn signed_diff(a: U256, b: U256) -> (U256, bool) {
    if b >= a { (b - a, false) } else { (a - b, true) }
}

/// `floor(±numerator / denominator)` as an `i128`.
fn floor_div(
    numerator: U512,
    denominator: U512,
    negative: bool,
    what: &'static str,
) -> Result<i128, MathError> {
    let quotient = numerator / denominator;
    let magnitude = if negative && !(numerator % denominator).is_zero() {
        quotient + U512::one()
    } else {
        quotient
    };
    if magnitude.bits() > 127 {
        return Err(MathError::Overflow(what));
    }
    let value = magnitude.low_u128() as i128;
    Ok(if negative { -value } else { value })
}

/// Amount of token0 for `liquidity` across `[sqrt_ratio_a, sqrt_ratio_b]`.
///
/// amount0 = floor(L * 2^96 * (sqrt_b - sqrt_a) / (sqrt_a * sqrt_b))
///
/// With `sqrt_ratio_a > sqrt_ratio_b` the formula is continued linearly and the
/// result is negative.
pub fn get_amount0_for_liquidity(
    liquidity: u128,
    sqrt_ratio_a: SqrtPriceX96,
    sqrt_ratio_b: SqrtPriceX96,
) -> Result<i128, MathError> {
    if sqrt_ratio_a.is_zero() || sqrt_ratio_b.is_zero() {
        return Err(MathError::ZeroSqrtRatio);
    }
    let (diff, negative) = signed_diff(sqrt_ratio_a.0, sqrt_ratio_b.0);

    let numerator = U512::from(liquidity) * U512::from(Q96) * U512::from(diff);
    let denominator = U512::from(sqrt_ratio_a.0) * U512::from(sqrt_ratio_b.0);

    floor_div(numerator, denominator, negative, "amount0")
}

/// Amount of token1 for `liquidity` across `[sqrt_ratio_a, sqrt_ratio_b]`.
///
/// amount1 = floor(L * (sqrt_b - sqrt_a) / 2^96)
pub fn get_amount1_for_liquidity(
    liquidity: u128,
    sqrt_ratio_a: SqrtPriceX96,
    sqrt_ratio_b: SqrtPriceX96,
) -> Result<i128, MathError> {
    let (diff, negative) = signed_diff(sqrt_ratio_a.0, sqrt_ratio_b.0);

    let numerator = U512::from(liquidity) * U512::from(diff);

    floor_div(numerator, U512::from(Q96), negative, "amount1")
}

/// Token composition of `liquidity` in `[sqrt_ratio_a, sqrt_ratio_b]` at `sqrt_price`.
///
/// Assumes `sqrt_ratio_a <= sqrt_price <= sqrt_ratio_b`; this is not checked.
/// Outside the range one leg comes out negative.
pub fn get_amounts_for_liquidity(
    sqrt_price: SqrtPriceX96,
    sqrt_ratio_a: SqrtPriceX96,
    sqrt_ratio_b: SqrtPriceX96,
    liquidity: u128,
) -> Result<TokenAmounts, MathError> {
    Ok(TokenAmounts::new(
        get_amount0_for_liquidity(liquidity, sqrt_price, sqrt_ratio_b)?,
        get_amount1_for_liquidity(liquidity, sqrt_ratio_a, sqrt_price)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(n: u64) -> SqrtPriceX96 {
        SqrtPriceX96::from_integer_sqrt(n)
    }

    #[test]
    fn test_amount_deltas() {
        // Liquidity 1000, sqrt price 1 -> 2
        // amount1 = 1000 * (2 - 1) = 1000
        // amount0 = 1000 * (1/1 - 1/2) = 500
        assert_eq!(get_amount1_for_liquidity(1000, q(1), q(2)).unwrap(), 1000);
        assert_eq!(get_amount0_for_liquidity(1000, q(1), q(2)).unwrap(), 500);
    }

    #[test]
    fn test_amount0_truncates() {
        // 1000 * (1/2 - 1/3) = 166.66..
        assert_eq!(get_amount0_for_liquidity(1000, q(2), q(3)).unwrap(), 166);
    }

    #[test]
    fn test_inverted_range_floors_towards_negative_infinity() {
        assert_eq!(get_amount0_for_liquidity(1000, q(3), q(2)).unwrap(), -167);
        assert_eq!(get_amount1_for_liquidity(1000, q(2), q(1)).unwrap(), -1000);

        let third = SqrtPriceX96::new(Q96 / U256::from(3u64));
        // 1000 * (Q96/3 - Q96) / Q96 is just below -666.66
        assert_eq!(get_amount1_for_liquidity(1000, q(1), third).unwrap(), -667);
    }

    #[test]
    fn test_zero_ratio_rejected() {
        assert_eq!(
            get_amount0_for_liquidity(1, SqrtPriceX96::default(), q(1)),
            Err(MathError::ZeroSqrtRatio)
        );
    }

    #[test]
    fn test_amounts_at_range_edges() {
        let at_lower = get_amounts_for_liquidity(q(1), q(1), q(2), 1000).unwrap();
        assert_eq!(at_lower.amount1, 0);
        assert_eq!(at_lower.amount0, 500);

        let at_upper = get_amounts_for_liquidity(q(2), q(1), q(2), 1000).unwrap();
        assert_eq!(at_upper.amount0, 0);
        assert_eq!(at_upper.amount1, 1000);
    }

    #[test]
    fn test_amounts_inside_range() {
        let p = SqrtPriceX96::new(Q96 * U256::from(11u64) / U256::from(10u64));
        let amounts = get_amounts_for_liquidity(p, q(1), q(2), 1000).unwrap();
        assert_eq!(amounts, TokenAmounts::new(409, 99));
    }

    #[test]
    fn test_max_liquidity_does_not_overflow_intermediates() {
        let amount1 = get_amount1_for_liquidity(u128::MAX >> 1, q(1), q(2)).unwrap();
        assert_eq!(amount1, (u128::MAX >> 1) as i128);

        let overflow = get_amount1_for_liquidity(u128::MAX, q(1), q(3));
        assert_eq!(overflow, Err(MathError::Overflow("amount1")));
    }
}

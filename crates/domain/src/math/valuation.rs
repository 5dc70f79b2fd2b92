//! Capital valuation in token1 terms.
//!
//! The spot price is taken in double precision and `token0 * price` is
//! truncated back to an integer. The realized-loss tolerance absorbs the
//! rounding noise of this path.

use crate::error::MathError;
use crate::token::TokenAmounts;
use crate::value_objects::SqrtPriceX96;

/// 2^127, the first magnitude that no longer fits an `i128`.
const I128_LIMIT: f64 = 170_141_183_460_469_231_731_687_303_715_884_105_728.0;

/// Values a token pair entirely in token1 at `sqrt_price`.
///
/// capital = token1 + trunc(token0 * (sqrt_price / 2^96)^2)
pub fn capital(amounts: TokenAmounts, sqrt_price: SqrtPriceX96) -> Result<i128, MathError> {
    let price = sqrt_price.price_f64();
    let token0_value = amounts.amount0 as f64 * price;
    if !token0_value.is_finite() {
        return Err(MathError::NonFiniteValuation);
    }
    if token0_value.abs() >= I128_LIMIT {
        return Err(MathError::Overflow("capital"));
    }
    amounts
        .amount1
        .checked_add(token0_value.trunc() as i128)
        .ok_or(MathError::Overflow("capital"))
}

/// Capital given up by holding `new` instead of `old`, both valued at `sqrt_price`.
pub fn capital_delta(
    old: TokenAmounts,
    new: TokenAmounts,
    sqrt_price: SqrtPriceX96,
) -> Result<i128, MathError> {
    capital(old, sqrt_price)?
        .checked_sub(capital(new, sqrt_price)?)
        .ok_or(MathError::Overflow("capital delta"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::Q96;
    use primitive_types::U256;

    fn one_point_one() -> SqrtPriceX96 {
        SqrtPriceX96::new(Q96 * U256::from(11u64) / U256::from(10u64))
    }

    #[test]
    fn test_capital_at_unit_price() {
        let p = SqrtPriceX96::from_integer_sqrt(1);
        assert_eq!(capital(TokenAmounts::new(500, 0), p).unwrap(), 500);
        assert_eq!(capital(TokenAmounts::new(10, 7), p).unwrap(), 17);
    }

    #[test]
    fn test_capital_truncates_float_product() {
        // price is 1.2100000000000002 in double precision
        let p = one_point_one();
        assert_eq!(capital(TokenAmounts::new(500, 0), p).unwrap(), 605);
        assert_eq!(capital(TokenAmounts::new(409, 99), p).unwrap(), 593);
    }

    #[test]
    fn test_negative_leg_truncates_towards_zero() {
        let p = SqrtPriceX96::new(Q96 * U256::from(3u64) / U256::from(2u64));
        // -3 * 2.25 = -6.75 -> -6
        assert_eq!(capital(TokenAmounts::new(-3, 10), p).unwrap(), 4);
    }

    #[test]
    fn test_capital_near_rounding_tie() {
        let p = SqrtPriceX96::new(U256::from_dec_str("89310230852449271863517486782").unwrap());
        let amounts = TokenAmounts::new(6_769_041_779_156_375_770, 10_513_749_363_012_443_234);
        assert_eq!(capital(amounts, p).unwrap(), 19_115_175_237_551_291_490);
    }

    #[test]
    fn test_capital_delta() {
        let p = one_point_one();
        let delta =
            capital_delta(TokenAmounts::new(500, 0), TokenAmounts::new(409, 99), p).unwrap();
        assert_eq!(delta, 12);
    }

    #[test]
    fn test_capital_overflow() {
        let p = SqrtPriceX96::from_integer_sqrt(1 << 40);
        let result = capital(TokenAmounts::new(i128::MAX, 0), p);
        assert_eq!(result, Err(MathError::Overflow("capital")));
    }
}

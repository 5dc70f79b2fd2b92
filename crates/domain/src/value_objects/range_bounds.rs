use crate::value_objects::sqrt_price::SqrtPriceX96;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Bounds of a liquidity range expressed as Q96 sqrt ratios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RangeBounds {
    pub sqrt_ratio_a_x96: SqrtPriceX96,
    pub sqrt_ratio_b_x96: SqrtPriceX96,
}

impl RangeBounds {
    pub fn new(sqrt_ratio_a_x96: SqrtPriceX96, sqrt_ratio_b_x96: SqrtPriceX96) -> Self {
        Self {
            sqrt_ratio_a_x96,
            sqrt_ratio_b_x96,
        }
    }

    /// Bounds are usable when the lower edge is positive and not above the upper edge.
    pub fn is_well_formed(&self) -> bool {
        !self.sqrt_ratio_a_x96.is_zero() && self.sqrt_ratio_a_x96 <= self.sqrt_ratio_b_x96
    }

    pub fn contains(&self, sqrt_price_x96: SqrtPriceX96) -> bool {
        sqrt_price_x96 >= self.sqrt_ratio_a_x96 && sqrt_price_x96 <= self.sqrt_ratio_b_x96
    }
}

impl fmt::Display for RangeBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.sqrt_ratio_a_x96, self.sqrt_ratio_b_x96)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(a: u64, b: u64) -> RangeBounds {
        RangeBounds::new(SqrtPriceX96::from_integer_sqrt(a), SqrtPriceX96::from_integer_sqrt(b))
    }

    #[test]
    fn test_well_formed() {
        assert!(bounds(1, 2).is_well_formed());
        assert!(bounds(2, 2).is_well_formed());
        assert!(!bounds(3, 2).is_well_formed());
        assert!(!bounds(0, 2).is_well_formed());
    }

    #[test]
    fn test_contains_is_inclusive() {
        let range = bounds(1, 2);
        assert!(range.contains(SqrtPriceX96::from_integer_sqrt(1)));
        assert!(range.contains(SqrtPriceX96::from_integer_sqrt(2)));
        assert!(!range.contains(SqrtPriceX96::from_integer_sqrt(3)));
    }
}

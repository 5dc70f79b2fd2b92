//! Deposit lot ledger for a single liquidity range.
//!
//! A ledger keeps the liquidity deployed in one range as a stack of lots, each
//! tagged with the sqrt price at which it entered the range. Shrinking the
//! ledger withdraws from the newest lot first and realizes, per withdrawal, the
//! capital difference between the composition the lot was deposited with and
//! the composition the same liquidity has at the current price.

use crate::error::LedgerError;
use clmm_loss_domain::math::{capital_delta, get_amounts_for_liquidity};
use clmm_loss_domain::{MathError, RangeBounds, SqrtPriceX96};
use serde::Serialize;
use tracing::{debug, warn};

/// Liquidity that entered a range at a given price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Lot {
    /// Remaining liquidity of the lot.
    pub liquidity: u128,
    /// Spot sqrt price when the lot was deposited.
    pub price_at_deposit: SqrtPriceX96,
}

impl Lot {
    /// Creates a new lot.
    #[must_use]
    pub fn new(liquidity: u128, price_at_deposit: SqrtPriceX96) -> Self {
        Self {
            liquidity,
            price_at_deposit,
        }
    }
}

/// LIFO stack of deposit lots for one range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RangeLedger {
    bounds: RangeBounds,
    lots: Vec<Lot>,
    total: u128,
}

impl RangeLedger {
    /// Opens a ledger holding `liquidity` deposited at `sqrt_price`.
    #[must_use]
    pub fn open(bounds: RangeBounds, liquidity: u128, sqrt_price: SqrtPriceX96) -> Self {
        let lots = if liquidity > 0 {
            vec![Lot::new(liquidity, sqrt_price)]
        } else {
            Vec::new()
        };
        Self {
            bounds,
            lots,
            total: liquidity,
        }
    }

    /// Range bounds this ledger tracks.
    #[must_use]
    pub fn bounds(&self) -> &RangeBounds {
        &self.bounds
    }

    /// Lots from oldest to newest.
    #[must_use]
    pub fn lots(&self) -> &[Lot] {
        &self.lots
    }

    /// Tracked total liquidity.
    #[must_use]
    pub fn total(&self) -> u128 {
        self.total
    }

    /// Whether the ledger holds no liquidity.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Verifies that the lots add up to the tracked total.
    pub fn check_invariant(&self) -> Result<(), LedgerError> {
        let actual = self
            .lots
            .iter()
            .try_fold(0u128, |acc, lot| acc.checked_add(lot.liquidity))
            .ok_or(MathError::Overflow("lot sum"))?;
        if actual != self.total {
            return Err(LedgerError::InvariantViolation {
                expected: self.total,
                actual,
            });
        }
        Ok(())
    }

    /// Grows or shrinks the ledger to `target` liquidity at `sqrt_price`.
    ///
    /// Returns the loss realized by the withdrawals. A single withdrawal may
    /// show a small gain from rounding; anything below `-tolerance` is an error.
    /// Added liquidity becomes a new lot and realizes nothing.
    pub fn resize(
        &mut self,
        sqrt_price: SqrtPriceX96,
        target: u128,
        tolerance: i128,
    ) -> Result<i128, LedgerError> {
        let mut realized = 0i128;

        while self.total > target {
            let Some(lot) = self.lots.pop() else {
                return Err(LedgerError::InvariantViolation {
                    expected: self.total,
                    actual: 0,
                });
            };
            let withdrawn = lot.liquidity.min(self.total - target);
            self.total -= withdrawn;

            let delta = self.withdrawal_loss(&lot, withdrawn, sqrt_price)?;
            if delta < -tolerance {
                return Err(LedgerError::ToleranceExceeded { delta, tolerance });
            }
            if delta < 0 {
                warn!(
                    bounds = %self.bounds,
                    delta,
                    withdrawn,
                    "Withdrawal realized a rounding gain"
                );
            }
            realized = realized
                .checked_add(delta)
                .ok_or(MathError::Overflow("realized loss"))?;

            if withdrawn < lot.liquidity {
                self.lots
                    .push(Lot::new(lot.liquidity - withdrawn, lot.price_at_deposit));
            }
        }

        if self.total < target {
            self.lots.push(Lot::new(target - self.total, sqrt_price));
            self.total = target;
        }

        debug!(
            bounds = %self.bounds,
            target,
            lots = self.lots.len(),
            realized,
            "Ledger resized"
        );

        Ok(realized)
    }

    /// Withdraws everything at `sqrt_price`.
    pub fn liquidate(
        &mut self,
        sqrt_price: SqrtPriceX96,
        tolerance: i128,
    ) -> Result<i128, LedgerError> {
        self.resize(sqrt_price, 0, tolerance)
    }

    /// Capital lost by `liquidity` of `lot` between its deposit and `sqrt_price`.
    fn withdrawal_loss(
        &self,
        lot: &Lot,
        liquidity: u128,
        sqrt_price: SqrtPriceX96,
    ) -> Result<i128, MathError> {
        let a = self.bounds.sqrt_ratio_a_x96;
        let b = self.bounds.sqrt_ratio_b_x96;
        let deposited = get_amounts_for_liquidity(lot.price_at_deposit, a, b, liquidity)?;
        let current = get_amounts_for_liquidity(sqrt_price, a, b, liquidity)?;
        capital_delta(deposited, current, sqrt_price)
    }
}

//! Summary metrics over a finished loss series.

use crate::config::LossConfig;
use crate::event::ShiftKind;
use crate::loss_series::LossSeries;
use clmm_loss_domain::{MathError, Snapshot};
use rust_decimal::Decimal;
use rust_decimal::prelude::*;
use serde::Serialize;

/// Seconds in a 365-day year.
pub const SECONDS_PER_YEAR: f64 = 31_536_000.0;

/// Aggregate view of one loss pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LossSummary {
    /// Number of snapshots processed.
    pub snapshot_count: usize,
    /// First block of the sequence.
    pub first_block: u64,
    /// Last block of the sequence.
    pub last_block: u64,
    /// Sum of realized losses, in raw token1 units.
    pub total_loss: i128,
    /// Block with the largest realized loss and that loss.
    pub worst_step: Option<(u64, i128)>,
    /// Number of window shifts.
    pub shift_count: usize,
    /// Number of shifts that replaced both ledgers.
    pub reset_count: usize,
    /// Realized loss as an annualized percentage of capital, when holdings are known.
    pub annualized_loss_pct: Option<Decimal>,
}

impl LossSummary {
    /// Summarizes `series`, which must have been built from `snapshots`.
    pub fn new(
        snapshots: &[Snapshot],
        series: &LossSeries,
        config: &LossConfig,
    ) -> Result<Self, MathError> {
        let worst_step = series
            .iter()
            .max_by(|(block_a, loss_a), (block_b, loss_b)| {
                loss_a.cmp(loss_b).then(block_b.cmp(block_a))
            });

        Ok(Self {
            snapshot_count: snapshots.len(),
            first_block: snapshots.first().map_or(0, |s| s.block_number),
            last_block: snapshots.last().map_or(0, |s| s.block_number),
            total_loss: series.total_loss()?,
            worst_step,
            shift_count: series.log().shift_count(),
            reset_count: series.log().count_shifts(ShiftKind::Reset),
            annualized_loss_pct: annualized_loss_pct(snapshots, series, config)
                .and_then(Decimal::from_f64),
        })
    }
}

/// Annualized realized loss as a percentage of strategy capital.
///
/// Each snapshot contributes `ln(capital - loss) - ln(capital)`, where capital
/// values the strategy's total holdings in token1 at the snapshot price and
/// loss is the series entry for its block. The sum is scaled from the sequence
/// duration to a year. Returns `None` when a snapshot lacks holdings, the
/// duration is zero, or a logarithm argument is not positive.
#[must_use]
pub fn annualized_loss_pct(
    snapshots: &[Snapshot],
    series: &LossSeries,
    config: &LossConfig,
) -> Option<f64> {
    let first = snapshots.first()?;
    let last = snapshots.last()?;
    let blocks = last.block_number.checked_sub(first.block_number)?;
    let duration = config.block_time_seconds.checked_mul(blocks)?;
    if duration == 0 {
        return None;
    }

    let scale = 10f64.powi(i32::try_from(config.token_decimals).ok()?);
    let mut log_loss = 0.0;
    for snapshot in snapshots {
        let holdings = snapshot.holdings.as_ref()?;
        let loss = series.get(snapshot.block_number)? as f64 / scale;
        let capital = holdings.total_token0() / scale * snapshot.sqrt_price_x96.price_f64()
            + holdings.total_token1() / scale;
        if capital <= 0.0 || capital - loss <= 0.0 {
            return None;
        }
        log_loss += (capital - loss).ln() - capital.ln();
    }

    let pct = 100.0 - 100.0 * (log_loss * SECONDS_PER_YEAR / duration as f64).exp();
    pct.is_finite().then_some(pct)
}

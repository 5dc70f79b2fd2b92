//! Folding a snapshot sequence into a per-block realized-loss series.

use crate::config::LossConfig;
use crate::error::LossError;
use crate::event::{EventLog, RangeSide, StepOutcome};
use crate::range_tracker::DualRangeTracker;
use clmm_loss_domain::{MathError, Snapshot};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::info;

/// Realized loss per block, in token1 units.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LossSeries {
    losses: BTreeMap<u64, i128>,
    #[serde(skip)]
    log: EventLog,
}

impl LossSeries {
    /// Creates an empty series.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a step outcome. A later outcome for the same block replaces the earlier loss.
    pub fn record(&mut self, outcome: StepOutcome) -> Result<(), MathError> {
        self.losses
            .insert(outcome.block_number, outcome.total_loss()?);
        self.log.record(outcome);
        Ok(())
    }

    /// Loss attributed to `block_number`.
    #[must_use]
    pub fn get(&self, block_number: u64) -> Option<i128> {
        self.losses.get(&block_number).copied()
    }

    /// Number of blocks with a recorded loss.
    #[must_use]
    pub fn len(&self) -> usize {
        self.losses.len()
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.losses.is_empty()
    }

    /// `(block, loss)` pairs in block order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, i128)> + '_ {
        self.losses.iter().map(|(block, loss)| (*block, *loss))
    }

    /// Sum of all recorded losses.
    pub fn total_loss(&self) -> Result<i128, MathError> {
        self.losses
            .values()
            .try_fold(0i128, |acc, loss| acc.checked_add(*loss))
            .ok_or(MathError::Overflow("total loss"))
    }

    /// The block → loss mapping.
    #[must_use]
    pub fn as_map(&self) -> &BTreeMap<u64, i128> {
        &self.losses
    }

    /// Step outcomes in processing order.
    #[must_use]
    pub fn outcomes(&self) -> &[StepOutcome] {
        self.log.outcomes()
    }

    /// The underlying outcome log.
    #[must_use]
    pub fn log(&self) -> &EventLog {
        &self.log
    }
}

/// Checks that a sequence can be processed: non-empty, block numbers
/// non-decreasing, positive spot prices, well-formed range bounds.
pub fn validate_snapshots(snapshots: &[Snapshot]) -> Result<(), LossError> {
    if snapshots.is_empty() {
        return Err(LossError::EmptySequence);
    }

    let mut previous: Option<u64> = None;
    for (index, snapshot) in snapshots.iter().enumerate() {
        if let Some(previous) = previous {
            if snapshot.block_number < previous {
                return Err(LossError::NonMonotonicBlock {
                    index,
                    previous,
                    current: snapshot.block_number,
                });
            }
        }
        previous = Some(snapshot.block_number);

        if snapshot.sqrt_price_x96.is_zero() {
            return Err(LossError::ZeroPrice { index });
        }
        for (side, range) in [
            (RangeSide::Lower, &snapshot.lower),
            (RangeSide::Upper, &snapshot.upper),
        ] {
            if !range.bounds.is_well_formed() {
                return Err(LossError::InvalidBounds {
                    index,
                    side,
                    bounds: range.bounds,
                });
            }
        }
    }
    Ok(())
}

/// Drives a [`DualRangeTracker`] over a whole snapshot sequence.
#[derive(Debug, Clone, Default)]
pub struct LossSeriesBuilder {
    config: LossConfig,
}

impl LossSeriesBuilder {
    /// Creates a builder with the given configuration.
    #[must_use]
    pub fn new(config: LossConfig) -> Self {
        Self { config }
    }

    /// Builds the loss series.
    ///
    /// Every transition between consecutive snapshots records its loss under
    /// the earlier block; the final liquidation of both ledgers is recorded
    /// under the last block.
    pub fn build(&self, snapshots: &[Snapshot]) -> Result<LossSeries, LossError> {
        validate_snapshots(snapshots)?;
        let Some((first, rest)) = snapshots.split_first() else {
            return Err(LossError::EmptySequence);
        };

        let mut tracker = DualRangeTracker::new(first, &self.config);
        let mut series = LossSeries::new();

        for (offset, snapshot) in rest.iter().enumerate() {
            let index = offset + 1;
            let outcome = tracker.step(index, snapshot)?;
            series
                .record(outcome)
                .map_err(|source| LossError::Math { index, source })?;
        }

        let index = snapshots.len() - 1;
        let last = rest.last().unwrap_or(first);
        series
            .record(tracker.finish(index, last)?)
            .map_err(|source| LossError::Math { index, source })?;
        let total_loss = series
            .total_loss()
            .map_err(|source| LossError::Math { index, source })?;

        info!(
            snapshots = snapshots.len(),
            shifts = series.log().shift_count(),
            total_loss,
            "Loss series built"
        );

        Ok(series)
    }
}

/// Builds a loss series with the default configuration.
pub fn build_loss_series(snapshots: &[Snapshot]) -> Result<LossSeries, LossError> {
    LossSeriesBuilder::default().build(snapshots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clmm_loss_domain::{RangeBounds, RangeState, SqrtPriceX96};

    fn q(n: u64) -> SqrtPriceX96 {
        SqrtPriceX96::from_integer_sqrt(n)
    }

    fn snapshot(block: u64) -> Snapshot {
        Snapshot::new(
            block,
            q(1),
            RangeState::new(RangeBounds::new(q(1), q(2)), 1000),
            RangeState::new(RangeBounds::new(q(2), q(3)), 0),
        )
    }

    #[test]
    fn test_empty_sequence_rejected() {
        assert_eq!(build_loss_series(&[]).unwrap_err(), LossError::EmptySequence);
    }

    #[test]
    fn test_non_monotonic_blocks_rejected() {
        let err = build_loss_series(&[snapshot(10), snapshot(12), snapshot(11)]).unwrap_err();
        assert_eq!(
            err,
            LossError::NonMonotonicBlock {
                index: 2,
                previous: 12,
                current: 11
            }
        );
        assert!(err.is_input_error());
    }

    #[test]
    fn test_zero_price_rejected() {
        let mut bad = snapshot(2);
        bad.sqrt_price_x96 = SqrtPriceX96::default();
        let err = build_loss_series(&[snapshot(1), bad]).unwrap_err();
        assert_eq!(err, LossError::ZeroPrice { index: 1 });
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let mut bad = snapshot(2);
        bad.upper.bounds = RangeBounds::new(q(3), q(2));
        let err = build_loss_series(&[snapshot(1), bad]).unwrap_err();
        assert!(matches!(
            err,
            LossError::InvalidBounds {
                index: 1,
                side: RangeSide::Upper,
                ..
            }
        ));
    }

    #[test]
    fn test_single_snapshot_only_liquidates() {
        let series = build_loss_series(&[snapshot(7)]).unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series.get(7), Some(0));
        assert!(series.outcomes()[0].terminal);
    }

    #[test]
    fn test_one_entry_per_snapshot() {
        let snapshots: Vec<_> = (1..=5).map(snapshot).collect();
        let series = build_loss_series(&snapshots).unwrap();
        assert_eq!(series.len(), 5);
        assert_eq!(series.outcomes().len(), 5);
        assert_eq!(series.total_loss(), Ok(0));
        assert_eq!(
            series.iter().map(|(block, _)| block).collect::<Vec<_>>(),
            vec![1, 2, 3, 4, 5]
        );
    }

    #[test]
    fn test_overflowing_losses_are_rejected() {
        let mut series = LossSeries::new();
        assert_eq!(
            series.record(StepOutcome::step(1, i128::MAX, 1, None)),
            Err(MathError::Overflow("step loss"))
        );
        assert!(series.is_empty());

        series.record(StepOutcome::step(1, i128::MAX, 0, None)).unwrap();
        series.record(StepOutcome::liquidation(2, 1, 0)).unwrap();
        assert_eq!(series.total_loss(), Err(MathError::Overflow("total loss")));
    }

    #[test]
    fn test_repeated_block_keeps_latest_loss() {
        let mut series = LossSeries::new();
        series.record(StepOutcome::step(3, 5, 0, None)).unwrap();
        series.record(StepOutcome::liquidation(3, 1, 1)).unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series.get(3), Some(2));
        assert_eq!(series.outcomes().len(), 2);
    }
}

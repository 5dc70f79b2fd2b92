//! Dual-range state machine.
//!
//! A dual-range strategy keeps liquidity in two adjacent bands. When the spot
//! price leaves the band pair the strategy slides both bands by one slot; the
//! tracker follows these moves, reusing whichever old ledger still holds
//! liquidity so its lot history keeps contributing to future losses.

use crate::config::LossConfig;
use crate::error::{LedgerError, LossError};
use crate::event::{RangeSide, ShiftKind, StepOutcome};
use crate::lot_ledger::RangeLedger;
use clmm_loss_domain::Snapshot;
use tracing::{debug, info};

/// Tracks the lower and upper range ledgers across a snapshot sequence.
#[derive(Debug, Clone)]
pub struct DualRangeTracker {
    lower: RangeLedger,
    upper: RangeLedger,
    previous_block: u64,
    loss_tolerance: i128,
}

impl DualRangeTracker {
    /// Seeds both ledgers from the first snapshot of a sequence.
    #[must_use]
    pub fn new(first: &Snapshot, config: &LossConfig) -> Self {
        let (lower, upper) = fresh_ledgers(first);
        Self {
            lower,
            upper,
            previous_block: first.block_number,
            loss_tolerance: config.loss_tolerance,
        }
    }

    /// Ledger of the lower range.
    #[must_use]
    pub fn lower(&self) -> &RangeLedger {
        &self.lower
    }

    /// Ledger of the upper range.
    #[must_use]
    pub fn upper(&self) -> &RangeLedger {
        &self.upper
    }

    /// Applies the next snapshot.
    ///
    /// Both ledgers are resized to the liquidity the snapshot reports for their
    /// bounds and the combined loss is attributed to the previous snapshot's
    /// block. If the snapshot's lower range differs from the tracked one the
    /// window has shifted and the ledgers are promoted or replaced.
    pub fn step(&mut self, index: usize, snapshot: &Snapshot) -> Result<StepOutcome, LossError> {
        self.check_invariants(index)?;

        let price = snapshot.sqrt_price_x96;
        let lower_target = snapshot.liquidity_for(self.lower.bounds());
        let upper_target = snapshot.liquidity_for(self.upper.bounds());

        let lower_loss = self
            .lower
            .resize(price, lower_target, self.loss_tolerance)
            .map_err(|source| ledger_error(index, RangeSide::Lower, source))?;
        let upper_loss = self
            .upper
            .resize(price, upper_target, self.loss_tolerance)
            .map_err(|source| ledger_error(index, RangeSide::Upper, source))?;

        let block_number = self.previous_block;
        self.previous_block = snapshot.block_number;

        let shift = if *self.lower.bounds() == snapshot.lower.bounds {
            None
        } else {
            Some(self.shift(snapshot))
        };

        debug!(
            index,
            block = block_number,
            lower_loss,
            upper_loss,
            in_range = snapshot.lower.bounds.contains(price) || snapshot.upper.bounds.contains(price),
            shifted = shift.is_some(),
            "Step applied"
        );

        Ok(StepOutcome::step(block_number, lower_loss, upper_loss, shift))
    }

    /// Liquidates both ledgers at the final snapshot's price.
    pub fn finish(&mut self, index: usize, last: &Snapshot) -> Result<StepOutcome, LossError> {
        self.check_invariants(index)?;

        let price = last.sqrt_price_x96;
        let lower_loss = self
            .lower
            .liquidate(price, self.loss_tolerance)
            .map_err(|source| ledger_error(index, RangeSide::Lower, source))?;
        let upper_loss = self
            .upper
            .liquidate(price, self.loss_tolerance)
            .map_err(|source| ledger_error(index, RangeSide::Upper, source))?;

        Ok(StepOutcome::liquidation(
            last.block_number,
            lower_loss,
            upper_loss,
        ))
    }

    fn check_invariants(&self, index: usize) -> Result<(), LossError> {
        self.lower
            .check_invariant()
            .map_err(|source| ledger_error(index, RangeSide::Lower, source))?;
        self.upper
            .check_invariant()
            .map_err(|source| ledger_error(index, RangeSide::Upper, source))
    }

    /// Rebuilds the ledger pair after the window moved. Branch order matters:
    /// an empty upper ledger alongside a non-empty lower one takes the last arm.
    fn shift(&mut self, snapshot: &Snapshot) -> ShiftKind {
        let price = snapshot.sqrt_price_x96;
        let kind = if self.lower.is_empty() && self.upper.is_empty() {
            let (lower, upper) = fresh_ledgers(snapshot);
            self.lower = lower;
            self.upper = upper;
            ShiftKind::Reset
        } else if self.lower.is_empty() {
            let fresh_upper =
                RangeLedger::open(snapshot.upper.bounds, snapshot.upper.liquidity, price);
            self.lower = std::mem::replace(&mut self.upper, fresh_upper);
            ShiftKind::UpperPromoted
        } else {
            let fresh_lower =
                RangeLedger::open(snapshot.lower.bounds, snapshot.lower.liquidity, price);
            self.upper = std::mem::replace(&mut self.lower, fresh_lower);
            ShiftKind::LowerDemoted
        };

        info!(
            block = snapshot.block_number,
            ?kind,
            lower = %self.lower.bounds(),
            upper = %self.upper.bounds(),
            "Range window shifted"
        );
        kind
    }
}

fn fresh_ledgers(snapshot: &Snapshot) -> (RangeLedger, RangeLedger) {
    let price = snapshot.sqrt_price_x96;
    (
        RangeLedger::open(snapshot.lower.bounds, snapshot.lower.liquidity, price),
        RangeLedger::open(snapshot.upper.bounds, snapshot.upper.liquidity, price),
    )
}

fn ledger_error(index: usize, side: RangeSide, source: LedgerError) -> LossError {
    LossError::Ledger {
        index,
        side,
        source,
    }
}

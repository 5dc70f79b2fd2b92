use crate::event::RangeSide;
use clmm_loss_domain::{MathError, RangeBounds};
use thiserror::Error;

/// Failures of a single ledger operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// The lots no longer add up to the tracked total.
    #[error("lots sum to {actual} but the ledger tracks {expected}")]
    InvariantViolation {
        /// Tracked total liquidity.
        expected: u128,
        /// Sum over the lot stack.
        actual: u128,
    },
    /// A withdrawal realized a gain larger than rounding can explain.
    #[error("withdrawal realized {delta}, below the -{tolerance} rounding tolerance")]
    ToleranceExceeded {
        /// Realized loss of the offending withdrawal.
        delta: i128,
        /// Allowed negative magnitude.
        tolerance: i128,
    },
    /// Liquidity or valuation math failed.
    #[error(transparent)]
    Math(#[from] MathError),
}

/// Failures of a loss pass over a snapshot sequence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LossError {
    /// No snapshots were supplied.
    #[error("snapshot sequence is empty")]
    EmptySequence,
    /// Block numbers went backwards.
    #[error("snapshot {index} has block {current}, earlier than block {previous}")]
    NonMonotonicBlock {
        /// Position of the offending snapshot.
        index: usize,
        /// Block of the preceding snapshot.
        previous: u64,
        /// Block of the offending snapshot.
        current: u64,
    },
    /// A range has a zero or inverted lower edge.
    #[error("snapshot {index} has malformed {side} bounds {bounds}")]
    InvalidBounds {
        /// Position of the offending snapshot.
        index: usize,
        /// Which range is malformed.
        side: RangeSide,
        /// The bounds as reported.
        bounds: RangeBounds,
    },
    /// The spot price is zero.
    #[error("snapshot {index} has a zero spot price")]
    ZeroPrice {
        /// Position of the offending snapshot.
        index: usize,
    },
    /// A combined loss figure left the `i128` range.
    #[error("snapshot {index}: {source}")]
    Math {
        /// Position of the snapshot being processed.
        index: usize,
        /// Underlying arithmetic failure.
        source: MathError,
    },
    /// A ledger invariant broke while processing a snapshot.
    #[error("snapshot {index}, {side} ledger: {source}")]
    Ledger {
        /// Position of the snapshot being processed.
        index: usize,
        /// Which ledger failed.
        side: RangeSide,
        /// Underlying ledger failure.
        source: LedgerError,
    },
}

impl LossError {
    /// Whether the error comes from malformed input rather than an engine defect.
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        !matches!(self, LossError::Ledger { .. } | LossError::Math { .. })
    }
}

//! Step outcomes recorded while folding a snapshot sequence.
//!
//! Every transition between two snapshots, plus the terminal liquidation,
//! produces one [`StepOutcome`]. The outcomes explain a loss series: which
//! ledger realized what and whether the active window moved.

use clmm_loss_domain::MathError;
use serde::Serialize;
use std::fmt;

/// Which of the two tracked ranges a value refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RangeSide {
    /// The range below (or containing) the spot price.
    Lower,
    /// The adjacent range above it.
    Upper,
}

impl fmt::Display for RangeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeSide::Lower => write!(f, "lower"),
            RangeSide::Upper => write!(f, "upper"),
        }
    }
}

/// How the tracker reacted to a window shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ShiftKind {
    /// Both ledgers were empty and were replaced by fresh ones.
    Reset,
    /// The lower ledger was empty; the upper ledger took its place.
    UpperPromoted,
    /// The lower ledger still held liquidity and became the upper ledger.
    LowerDemoted,
}

/// What happened at one step of a loss pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepOutcome {
    /// Block the realized loss is attributed to.
    pub block_number: u64,
    /// Loss realized by the lower ledger.
    pub lower_loss: i128,
    /// Loss realized by the upper ledger.
    pub upper_loss: i128,
    /// Window shift handled after the resize, if any.
    pub shift: Option<ShiftKind>,
    /// Whether this is the final liquidation of both ledgers.
    pub terminal: bool,
}

impl StepOutcome {
    /// Creates the outcome of an intermediate step.
    #[must_use]
    pub fn step(
        block_number: u64,
        lower_loss: i128,
        upper_loss: i128,
        shift: Option<ShiftKind>,
    ) -> Self {
        Self {
            block_number,
            lower_loss,
            upper_loss,
            shift,
            terminal: false,
        }
    }

    /// Creates the outcome of the terminal liquidation.
    #[must_use]
    pub fn liquidation(block_number: u64, lower_loss: i128, upper_loss: i128) -> Self {
        Self {
            block_number,
            lower_loss,
            upper_loss,
            shift: None,
            terminal: true,
        }
    }

    /// Combined loss of both ledgers.
    pub fn total_loss(&self) -> Result<i128, MathError> {
        self.lower_loss
            .checked_add(self.upper_loss)
            .ok_or(MathError::Overflow("step loss"))
    }

    /// Whether the active window moved at this step.
    #[must_use]
    pub fn shifted(&self) -> bool {
        self.shift.is_some()
    }
}

/// Ordered log of step outcomes.
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    outcomes: Vec<StepOutcome>,
}

impl EventLog {
    /// Creates a new empty log.
    #[must_use]
    pub fn new() -> Self {
        Self {
            outcomes: Vec::new(),
        }
    }

    /// Records an outcome.
    pub fn record(&mut self, outcome: StepOutcome) {
        self.outcomes.push(outcome);
    }

    /// Returns all outcomes in order.
    #[must_use]
    pub fn outcomes(&self) -> &[StepOutcome] {
        &self.outcomes
    }

    /// Returns the number of shifts of a given kind.
    #[must_use]
    pub fn count_shifts(&self, kind: ShiftKind) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.shift == Some(kind))
            .count()
    }

    /// Returns the total number of window shifts.
    #[must_use]
    pub fn shift_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.shifted()).count()
    }
}

pub mod snapshot;

pub use snapshot::{Holdings, RangeState, Snapshot, TokenHoldings};

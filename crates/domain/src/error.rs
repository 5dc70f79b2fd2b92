use thiserror::Error;

/// Errors raised by the liquidity and valuation math.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MathError {
    /// A sqrt ratio used as a divisor was zero.
    #[error("sqrt ratio must be non-zero")]
    ZeroSqrtRatio,
    /// An intermediate or final value does not fit its target width.
    #[error("arithmetic overflow in {0}")]
    Overflow(&'static str),
    /// The floating point valuation produced NaN or infinity.
    #[error("valuation is not finite")]
    NonFiniteValuation,
}

pub mod concentrated_liquidity;
pub mod valuation;

pub use concentrated_liquidity::{
    get_amount0_for_liquidity, get_amount1_for_liquidity, get_amounts_for_liquidity,
};
pub use valuation::{capital, capital_delta};

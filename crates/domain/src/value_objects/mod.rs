pub mod range_bounds;
pub mod sqrt_price;

pub use range_bounds::RangeBounds;
pub use sqrt_price::{Q96, SqrtPriceX96};

//! Human friendly number formatting, plus a copy-out LRU cache, a linear
//! interpolant and a line indenter.

pub mod cache;
pub mod interpolant;
pub mod number;
pub mod numeric_formatter;
pub mod text;

pub use cache::{lru_safe_cache, CacheInfo, LruSafeCache};
pub use interpolant::{interpolant, Interpolant};
pub use number::{Number, ParseNumberError, Value};
pub use numeric_formatter::{
    fmt, group_digits, magnitude, p10k, pc, pm, rpartition, Band, NumericFormatter, Ratio,
};
pub use text::{indent, Indent};

/// Errors raised when building an [`Interpolant`].
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("xs has {xs} points but ys has {ys}")]
    LengthMismatch { xs: usize, ys: usize },
    #[error("at least one sample point is required")]
    Empty,
    #[error("xs must be non-decreasing, but xs[{index}] is below the previous point")]
    Unsorted { index: usize },
    #[error("sample point {index} is not finite")]
    NonFinite { index: usize },
}

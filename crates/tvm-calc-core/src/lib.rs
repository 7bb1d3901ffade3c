pub mod error;
pub mod time_value;
pub mod types;

pub use error::TvmError;
pub use types::*;

/// Standard result type for all time-value operations
pub type TvmResult<T> = Result<T, TvmError>;

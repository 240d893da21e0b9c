pub mod aggregate;
pub mod cash;
pub mod concentration;
pub mod error;
pub mod filter;
pub mod fixture;
pub mod types;
pub mod variance;
pub mod waterfall;

pub use error::FinboardError;
pub use types::*;

/// Standard result type for all finboard operations
pub type FinboardResult<T> = Result<T, FinboardError>;

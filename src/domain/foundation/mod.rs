//! Shared domain primitives.

mod errors;
mod ids;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{OrderId, PaymentId, UserId};
pub use timestamp::Timestamp;

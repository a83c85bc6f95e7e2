mod identifiers;
mod rate_limiter;

pub use identifiers::parse_resource_id;
pub use rate_limiter::{RateLimitError, RateLimiter};

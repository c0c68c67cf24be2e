//! Domain logic for the groove review platform.
//!
//! Zero internal dependencies: everything here is pure (validation rules,
//! pagination math, the origin allow-set, rate-limit window arithmetic) so it
//! can be exercised by unit tests without a database or a Redis instance.

pub mod error;
pub mod origin;
pub mod pagination;
pub mod ratelimit;
pub mod review;
pub mod types;

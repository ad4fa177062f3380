//! Storage implementations for outstanding OTP codes.
//!
//! - **In-memory** - process-local map, the default
//! - **Redis** - shared across server instances, with TTL cleanup

pub mod memory;
pub mod otp_redis;

// Re-exports
pub use memory::InMemoryOtpStore;
pub use otp_redis::RedisOtpStore;

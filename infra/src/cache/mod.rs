//! Cache module for Redis-backed state
//!
//! A Redis client with retry logic and the access token revocation cache
//! built on it.

pub mod redis_client;
pub mod revocation_cache;


pub use redis_client::RedisClient;
pub use revocation_cache::RedisRevocationCache;

//! Build directory caching
//!
//! A whole build directory is stored as one blob addressed by a key that
//! captures every build input and host descriptor. Keys are never
//! overwritten: identical keys imply identical build inputs.
//!
//! # Failure Model
//!
//! Cache failures never fail a run. `CacheGateway` downgrades every store
//! error to a warning and the run continues as if the cache were empty.

pub mod gateway;
pub mod key;
pub mod store;

pub use gateway::CacheGateway;
pub use key::CacheKey;
pub use store::{CacheStore, LocalCacheStore};

//! Domain Layer - Pure logic
//!
//! This layer contains:
//! - The membership store (Bloom filter)
//! - Hash functions
//! - Parameter calculations
//! - Configuration
//! - Path prefix helpers
//!
//! RULES:
//! - No I/O operations
//! - No async code

pub mod config;
pub mod hash_functions;
pub mod membership_store;
pub mod parameters;
pub mod path;

pub use config::{
    PreloaderConfig, PreloaderConfigBuilder, DEFAULT_EXPECTED_ITEMS, DEFAULT_FALSE_POSITIVE_RATE,
};
pub use membership_store::MembershipStore;
pub use parameters::{calculate_fpr, calculate_optimal_parameters, StoreParams};
pub use path::{normalize_prefix, qualify, SEPARATOR};

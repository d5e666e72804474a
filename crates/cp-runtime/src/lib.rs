//! # Preloader Runtime
//!
//! Host wiring for the classpath preloader.
//!
//! ## Modular Structure
//!
//! - `config` - Environment configuration
//! - `logging` - tracing subscriber setup
//! - `probe` - Finder chain construction and path resolution
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (env, then CLI flags)
//! 2. Validate store parameters
//! 3. Build the finder chain
//! 4. Scan the classpath; any enumeration error aborts startup
//! 5. Replace classpath finders with guarded ones
//! 6. Serve lookups

pub mod config;
pub mod logging;
pub mod probe;

pub use config::{ConfigError, RuntimeConfig};
pub use logging::init_logging;
pub use probe::{filesystem_chain, guarded_chain, probe, FinderChain, ProbeResult};

//! # Domain Scout Library
//!
//! Given a search term, this library generates candidate domain names
//! (subdomain prefixes × TLD suffixes), checks each candidate for DNS
//! existence and live web reachability, and reports results in batches
//! with progress updates.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use domain_scout_lib::DomainChecker;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let checker = DomainChecker::new();
//!     let results = checker.search("example", |_progress, _chunk| {}).await?;
//!
//!     for result in results {
//!         println!("{}: {}", result.domain, result.status);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Design
//!
//! - **Two signals per domain**: an A-record lookup against a
//!   DNS-over-HTTPS resolver, and an HTTPS request with a single HTTP
//!   fallback. Both run concurrently and both degrade failures into a
//!   tri-state [`ProbeOutcome`] instead of erroring.
//! - **Bounded concurrency**: candidates are checked in sequential
//!   batches; at most `batch_size` domains have probes in flight.
//! - **Order preserved**: results always come back in generation order,
//!   no matter which probes finish first.

pub use checker::DomainChecker;
pub use config::{
    load_env_config, parse_timeout_string, ConfigManager, DefaultsConfig, EnvConfig, FileConfig,
    GenerationConfig,
};
pub use error::DomainScoutError;
pub use generate::{
    candidate_count, generate_candidates, normalize_term, DEFAULT_PREFIXES, DEFAULT_SUFFIXES,
};
pub use types::{
    CheckConfig, CheckResult, DomainStatus, Progress, ProbeOutcome, DEFAULT_RESOLVER_URL,
};

pub mod aggregate;
pub mod scheduler;

mod checker;
mod config;
mod error;
mod generate;
mod probes;
mod types;

/// Type alias for results using the library error type.
pub type Result<T> = std::result::Result<T, DomainScoutError>;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

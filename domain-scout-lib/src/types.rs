//! Core data types for domain scouting.
//!
//! This module defines the main data structures used throughout the library:
//! probe outcomes, per-domain check results, progress state, and the
//! configuration passed into the checking pipeline.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::generate::{DEFAULT_PREFIXES, DEFAULT_SUFFIXES};

/// Outcome of a single probe.
///
/// The probers deliberately keep three states instead of a boolean:
/// a resolver that answered with no records (`Absent`) is a different
/// signal from a resolver that could not be reached (`Indeterminate`),
/// even though both project to "not found" when the final status is
/// resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeOutcome {
    /// The probe observed a positive signal (DNS answer present, or a
    /// completed HTTP exchange).
    Present,

    /// The probe completed and observed a negative signal.
    Absent,

    /// The probe could not determine anything: transport failure,
    /// malformed response, or timeout.
    Indeterminate,
}

impl ProbeOutcome {
    /// Whether this outcome is a positive signal.
    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present)
    }
}

impl std::fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Present => write!(f, "present"),
            Self::Absent => write!(f, "absent"),
            Self::Indeterminate => write!(f, "indeterminate"),
        }
    }
}

/// Final status category assigned to a domain after both probes settle.
///
/// The categories are mutually exclusive. `Active` takes priority over
/// `Registered`: a site that answers on the wire is reported active even
/// when its DNS probe came back empty or indeterminate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DomainStatus {
    /// The domain responded to an HTTP(S) request.
    #[serde(rename = "active")]
    Active,

    /// The domain resolves in DNS but did not respond over HTTP(S).
    #[serde(rename = "registered")]
    Registered,

    /// Neither probe found the domain; likely available for registration.
    #[serde(rename = "available")]
    Available,

    /// The check itself failed in a way the probers could not degrade.
    #[serde(rename = "error")]
    Error,
}

impl std::fmt::Display for DomainStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "Active"),
            Self::Registered => write!(f, "Registered"),
            Self::Available => write!(f, "Available"),
            Self::Error => write!(f, "Error"),
        }
    }
}

/// Result of checking a single candidate domain.
///
/// Created once per candidate and never mutated afterwards. The batch
/// scheduler guarantees results come back in the same order their domains
/// were generated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    /// The candidate domain that was checked (e.g. "www.example.com")
    pub domain: String,

    /// Final status category for this domain
    pub status: DomainStatus,

    /// Raw DNS probe outcome, kept for diagnostics
    pub dns: ProbeOutcome,

    /// Raw reachability probe outcome, kept for diagnostics
    pub reachability: ProbeOutcome,

    /// Human-readable local timestamp captured when aggregation completed
    pub checked_at: String,

    /// How long the combined check took
    #[serde(skip)]
    pub check_duration: Option<Duration>,

    /// Error message when `status` is `Error`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

/// Cumulative progress after a batch completes.
///
/// Derived state: a pure function of how many domains have been checked
/// and the total, recomputed after every batch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Progress {
    /// Percentage of domains checked so far (0.0 - 100.0)
    pub percent: f64,

    /// Number of domains checked so far
    pub checked: usize,

    /// Total number of domains in this run
    pub total: usize,
}

impl Progress {
    /// Compute progress from a checked count and total.
    pub fn new(checked: usize, total: usize) -> Self {
        let percent = if total == 0 {
            100.0
        } else {
            (checked as f64 / total as f64) * 100.0
        };
        Self {
            percent,
            checked,
            total,
        }
    }

    /// Whether every domain has been checked.
    pub fn is_complete(&self) -> bool {
        self.checked >= self.total
    }
}

/// Configuration for a scouting run.
///
/// All tunables are carried here explicitly rather than in module-level
/// constants, so callers can adjust concurrency and timeouts per run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckConfig {
    /// Number of domains checked concurrently per batch.
    /// Default: 5, Range: 1-100
    pub batch_size: usize,

    /// Bounded wait for each reachability attempt (HTTPS, then HTTP)
    /// Default: 10 seconds
    #[serde(skip)]
    pub check_timeout: Duration,

    /// Bounded wait for the DNS-over-HTTPS lookup
    /// Default: 5 seconds
    #[serde(skip)]
    pub dns_timeout: Duration,

    /// DNS-over-HTTPS resolver endpoint
    pub resolver_url: String,

    /// Subdomain prefixes combined with the search term ("" means bare)
    pub prefixes: Vec<String>,

    /// TLD suffixes combined with the search term (leading dot included)
    pub suffixes: Vec<String>,
}

/// Default DNS-over-HTTPS resolver endpoint.
pub const DEFAULT_RESOLVER_URL: &str = "https://dns.google/resolve";

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            batch_size: 5,
            check_timeout: Duration::from_secs(10),
            dns_timeout: Duration::from_secs(5),
            resolver_url: DEFAULT_RESOLVER_URL.to_string(),
            prefixes: DEFAULT_PREFIXES.iter().map(|s| s.to_string()).collect(),
            suffixes: DEFAULT_SUFFIXES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl CheckConfig {
    /// Set the batch size, capped at 100 to prevent resource exhaustion.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.clamp(1, 100);
        self
    }

    /// Set the bounded wait for reachability attempts.
    pub fn with_check_timeout(mut self, timeout: Duration) -> Self {
        self.check_timeout = timeout;
        self
    }

    /// Set the bounded wait for DNS lookups.
    pub fn with_dns_timeout(mut self, timeout: Duration) -> Self {
        self.dns_timeout = timeout;
        self
    }

    /// Set a custom DNS-over-HTTPS resolver endpoint.
    pub fn with_resolver_url<S: Into<String>>(mut self, url: S) -> Self {
        self.resolver_url = url.into();
        self
    }

    /// Override the subdomain prefix list.
    pub fn with_prefixes(mut self, prefixes: Vec<String>) -> Self {
        self.prefixes = prefixes;
        self
    }

    /// Override the TLD suffix list.
    pub fn with_suffixes(mut self, suffixes: Vec<String>) -> Self {
        self.suffixes = suffixes;
        self
    }
}

//! Main domain checker implementation.
//!
//! `DomainChecker` wires the pieces together: candidate generation, the
//! two probers, status aggregation, and the batch scheduler.
//!
//! # Example
//!
//! ```rust,no_run
//! use domain_scout_lib::{CheckConfig, DomainChecker};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let checker = DomainChecker::new();
//!     let results = checker
//!         .search("example", |progress, _chunk| {
//!             eprintln!("{}/{} checked", progress.checked, progress.total);
//!         })
//!         .await?;
//!
//!     for result in results {
//!         println!("{}: {}", result.domain, result.status);
//!     }
//!     Ok(())
//! }
//! ```

use crate::aggregate::aggregate;
use crate::error::DomainScoutError;
use crate::generate::generate_candidates;
use crate::probes::{DnsProber, ReachabilityProber};
use crate::scheduler::run_batched;
use crate::types::{CheckConfig, CheckResult, Progress};
use futures::stream::{Stream, StreamExt};
use std::pin::Pin;
use std::time::Instant;

/// Coordinates candidate generation, probing, and batched checking.
#[derive(Clone)]
pub struct DomainChecker {
    /// Configuration for this checker instance
    config: CheckConfig,
    /// DNS-over-HTTPS existence prober
    dns: DnsProber,
    /// HTTPS/HTTP reachability prober
    reach: ReachabilityProber,
}

impl DomainChecker {
    /// Create a checker with default configuration.
    ///
    /// Defaults: batch size 5, 10s reachability timeout, 5s DNS timeout,
    /// Google's DoH resolver, and the standard prefix/suffix lists.
    pub fn new() -> Self {
        Self::with_config(CheckConfig::default())
    }

    /// Create a checker with custom configuration.
    pub fn with_config(config: CheckConfig) -> Self {
        let dns = DnsProber::new(config.resolver_url.clone(), config.dns_timeout)
            .expect("Failed to create DNS prober");
        let reach =
            ReachabilityProber::new(config.check_timeout).expect("Failed to create reachability prober");

        Self { config, dns, reach }
    }

    /// Generate the candidate list for a search term without checking it.
    pub fn candidates(&self, term: &str) -> Result<Vec<String>, DomainScoutError> {
        generate_candidates(term, &self.config.prefixes, &self.config.suffixes)
    }

    /// Check a single domain: run both probes concurrently and aggregate.
    ///
    /// Infallible by design — failures are folded into the result's
    /// status, so a single bad domain can never abort a batch.
    pub async fn check_domain(&self, domain: &str) -> CheckResult {
        let started = Instant::now();
        let (dns, reach) = tokio::join!(self.dns.probe(domain), self.reach.probe(domain));
        aggregate(domain, dns, reach, started)
    }

    /// Check a list of domains in batches, reporting progress per batch.
    ///
    /// Results are returned in input order; see [`crate::scheduler`] for
    /// the concurrency guarantees.
    pub async fn check_domains<F>(&self, domains: &[String], on_batch: F) -> Vec<CheckResult>
    where
        F: FnMut(Progress, &[CheckResult]),
    {
        let this = self.clone();
        run_batched(
            domains,
            self.config.batch_size,
            move |domain| {
                let this = this.clone();
                async move { this.check_domain(&domain).await }
            },
            on_batch,
        )
        .await
    }

    /// Check domains and yield results as a stream.
    ///
    /// Keeps the same batch semantics as [`Self::check_domains`]: one
    /// chunk in flight at a time, results in input order. Useful when the
    /// caller wants results one at a time instead of per chunk.
    pub fn check_domains_stream(
        &self,
        domains: &[String],
    ) -> Pin<Box<dyn Stream<Item = CheckResult> + Send>> {
        let chunks: Vec<Vec<String>> = domains
            .chunks(self.config.batch_size.max(1))
            .map(|c| c.to_vec())
            .collect();
        let this = self.clone();

        let stream = futures::stream::iter(chunks)
            .then(move |chunk| {
                let this = this.clone();
                async move {
                    futures::future::join_all(chunk.iter().map(|d| this.check_domain(d))).await
                }
            })
            .flat_map(futures::stream::iter);

        Box::pin(stream)
    }

    /// Full pipeline: normalize the term, generate candidates, check them.
    ///
    /// Returns an error only for invalid input; per-domain failures are
    /// carried in the results.
    pub async fn search<F>(
        &self,
        term: &str,
        on_batch: F,
    ) -> Result<Vec<CheckResult>, DomainScoutError>
    where
        F: FnMut(Progress, &[CheckResult]),
    {
        let candidates = self.candidates(term)?;
        Ok(self.check_domains(&candidates, on_batch).await)
    }

    /// Current configuration for this checker.
    pub fn config(&self) -> &CheckConfig {
        &self.config
    }
}

impl Default for DomainChecker {
    fn default() -> Self {
        Self::new()
    }
}

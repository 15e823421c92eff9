//! Web reachability probing.
//!
//! A domain is considered reachable when an HTTP exchange with it
//! completes at the transport level, regardless of the response status —
//! a 404 or 500 still means something is answering on the wire. The probe
//! tries HTTPS first and falls back to plain HTTP once; each attempt is
//! bounded by an explicit timeout rather than trusting the client's own.

use crate::error::DomainScoutError;
use crate::types::ProbeOutcome;
use std::time::Duration;
use tracing::debug;

/// What a single connection attempt observed.
enum Attempt {
    /// The exchange completed (any HTTP status).
    Completed,
    /// The transport failed (refused, reset, TLS failure, no route).
    Failed,
    /// The bounded wait expired before the exchange completed.
    TimedOut,
}

/// Reachability prober with HTTPS-then-HTTP fallback.
#[derive(Clone)]
pub struct ReachabilityProber {
    http_client: reqwest::Client,
    /// Bounded wait per attempt
    timeout: Duration,
}

impl ReachabilityProber {
    /// Create a new reachability prober.
    pub fn new(timeout: Duration) -> Result<Self, DomainScoutError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout + Duration::from_secs(2))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(|e| {
                DomainScoutError::network_with_source(
                    "Failed to create reachability HTTP client",
                    e.to_string(),
                )
            })?;

        Ok(Self {
            http_client,
            timeout,
        })
    }

    /// Probe whether a domain answers over HTTPS or HTTP.
    ///
    /// Returns `Present` if either attempt completes, `Absent` if both fail
    /// at the transport level, and `Indeterminate` if the failures were all
    /// timeouts (nothing definitive was observed). Only
    /// request-construction failures produce an `Err`.
    pub async fn probe(&self, domain: &str) -> Result<ProbeOutcome, DomainScoutError> {
        let https = self.attempt("https", domain).await?;
        if matches!(https, Attempt::Completed) {
            return Ok(ProbeOutcome::Present);
        }

        let http = self.attempt("http", domain).await?;
        match (https, http) {
            (_, Attempt::Completed) => Ok(ProbeOutcome::Present),
            (Attempt::TimedOut, Attempt::TimedOut) => Ok(ProbeOutcome::Indeterminate),
            _ => Ok(ProbeOutcome::Absent),
        }
    }

    /// Issue one GET against `{scheme}://{domain}` under the bounded wait.
    async fn attempt(&self, scheme: &str, domain: &str) -> Result<Attempt, DomainScoutError> {
        let url = format!("{}://{}", scheme, domain);

        match tokio::time::timeout(self.timeout, self.http_client.get(&url).send()).await {
            Ok(Ok(response)) => {
                // Status is observed for logging only; the reachability
                // signal is transport-level completion.
                debug!(domain, scheme, status = %response.status(), "reachability attempt completed");
                Ok(Attempt::Completed)
            }
            Ok(Err(e)) => {
                if e.is_builder() {
                    return Err(DomainScoutError::probe(
                        domain,
                        format!("could not build reachability request: {}", e),
                    ));
                }
                if e.is_timeout() {
                    debug!(domain, scheme, "reachability attempt timed out in client");
                    return Ok(Attempt::TimedOut);
                }
                debug!(domain, scheme, error = %e, "reachability attempt failed");
                Ok(Attempt::Failed)
            }
            Err(_) => {
                debug!(domain, scheme, timeout = ?self.timeout, "reachability attempt timed out");
                Ok(Attempt::TimedOut)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prober_creation() {
        let prober = ReachabilityProber::new(Duration::from_secs(10));
        assert!(prober.is_ok());
    }

    #[test]
    fn test_unroutable_domain_is_not_present() {
        // .invalid is reserved (RFC 2606) and never resolves, so both
        // attempts fail without depending on external state.
        let prober = ReachabilityProber::new(Duration::from_secs(5)).unwrap();
        let outcome = tokio_test::block_on(prober.probe("domain-scout-test.invalid")).unwrap();
        assert_ne!(outcome, ProbeOutcome::Present);
    }
}

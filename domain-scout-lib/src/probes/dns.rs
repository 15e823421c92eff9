//! DNS existence probing over DNS-over-HTTPS.
//!
//! Issues an A-record lookup against a DoH resolver (Google's by default)
//! and reads a single signal from the JSON body: whether the `Answer`
//! array is present and non-empty. The resolver being unreachable, a
//! malformed body, and a timeout all degrade to `Indeterminate` — the
//! caller decides how to project that.

use crate::error::DomainScoutError;
use crate::types::ProbeOutcome;
use std::time::Duration;
use tracing::debug;

/// DNS prober backed by a DNS-over-HTTPS resolver.
#[derive(Clone)]
pub struct DnsProber {
    /// HTTP client for resolver requests
    http_client: reqwest::Client,
    /// Resolver endpoint, e.g. "https://dns.google/resolve"
    resolver_url: String,
    /// Bounded wait for the whole lookup
    timeout: Duration,
}

impl DnsProber {
    /// Create a new DNS prober against the given resolver endpoint.
    pub fn new<S: Into<String>>(resolver_url: S, timeout: Duration) -> Result<Self, DomainScoutError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout + Duration::from_secs(2)) // buffer over the explicit wait
            .build()
            .map_err(|e| {
                DomainScoutError::network_with_source(
                    "Failed to create DNS HTTP client",
                    e.to_string(),
                )
            })?;

        Ok(Self {
            http_client,
            resolver_url: resolver_url.into(),
            timeout,
        })
    }

    /// Look up A records for a domain.
    ///
    /// Returns `Present` if the resolver answered with at least one record,
    /// `Absent` if it answered with none, and `Indeterminate` on transport
    /// failure, malformed response, or timeout. Only request-construction
    /// failures produce an `Err`.
    pub async fn probe(&self, domain: &str) -> Result<ProbeOutcome, DomainScoutError> {
        let url = format!("{}?name={}&type=A", self.resolver_url, domain);

        let response =
            match tokio::time::timeout(self.timeout, self.http_client.get(&url).send()).await {
                Ok(Ok(response)) => response,
                Ok(Err(e)) => {
                    if e.is_builder() {
                        return Err(DomainScoutError::probe(
                            domain,
                            format!("could not build DNS request: {}", e),
                        ));
                    }
                    debug!(domain, error = %e, "DNS lookup transport failure");
                    return Ok(ProbeOutcome::Indeterminate);
                }
                Err(_) => {
                    debug!(domain, timeout = ?self.timeout, "DNS lookup timed out");
                    return Ok(ProbeOutcome::Indeterminate);
                }
            };

        match response.json::<serde_json::Value>().await {
            Ok(body) => Ok(classify_answers(&body)),
            Err(e) => {
                debug!(domain, error = %e, "DNS response body was not valid JSON");
                Ok(ProbeOutcome::Indeterminate)
            }
        }
    }
}

/// Classify a DoH JSON body by its `Answer` array.
///
/// A missing or empty `Answer` means the resolver found no A records;
/// that is a definitive `Absent`, not an indeterminate outcome.
fn classify_answers(body: &serde_json::Value) -> ProbeOutcome {
    let has_answers = body
        .get("Answer")
        .and_then(|a| a.as_array())
        .map(|a| !a.is_empty())
        .unwrap_or(false);

    if has_answers {
        ProbeOutcome::Present
    } else {
        ProbeOutcome::Absent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prober_creation() {
        let prober = DnsProber::new("https://dns.google/resolve", Duration::from_secs(5));
        assert!(prober.is_ok());
    }

    #[test]
    fn test_classify_with_answers() {
        let body = serde_json::json!({
            "Status": 0,
            "Answer": [
                { "name": "example.com.", "type": 1, "TTL": 300, "data": "93.184.216.34" }
            ]
        });
        assert_eq!(classify_answers(&body), ProbeOutcome::Present);
    }

    #[test]
    fn test_classify_empty_answer_array() {
        let body = serde_json::json!({ "Status": 0, "Answer": [] });
        assert_eq!(classify_answers(&body), ProbeOutcome::Absent);
    }

    #[test]
    fn test_classify_missing_answer_field() {
        // NXDOMAIN responses carry an Authority section but no Answer
        let body = serde_json::json!({ "Status": 3, "Authority": [{}] });
        assert_eq!(classify_answers(&body), ProbeOutcome::Absent);
    }

    #[test]
    fn test_classify_answer_not_an_array() {
        let body = serde_json::json!({ "Answer": "unexpected" });
        assert_eq!(classify_answers(&body), ProbeOutcome::Absent);
    }
}

//! Status aggregation.
//!
//! Combines the two probe outcomes for a domain into a single
//! `CheckResult` with exactly one of the four status categories. The
//! priority order is fixed: a genuine probe error wins, then a completed
//! HTTP exchange (`Active`), then a DNS answer (`Registered`), then
//! `Available`. An indeterminate probe outcome projects to the negative
//! here; the raw outcome stays on the result for diagnostics.

use crate::error::DomainScoutError;
use crate::types::{CheckResult, DomainStatus, ProbeOutcome};
use chrono::Local;
use std::time::Instant;

/// Resolve the status category from the two probe outcomes.
///
/// `Active` deliberately wins over `Registered` even when DNS came back
/// empty or indeterminate: a host that answers on the wire is live, and
/// the no-status reachability probe is the stronger signal.
pub fn resolve_status(dns: ProbeOutcome, reachability: ProbeOutcome) -> DomainStatus {
    if reachability.is_present() {
        DomainStatus::Active
    } else if dns.is_present() {
        DomainStatus::Registered
    } else {
        DomainStatus::Available
    }
}

/// Build the final result for a domain from both probers' returns.
///
/// An error escaping either prober's degrade path is caught here and
/// converted into an `Error`-status result; it never propagates further.
pub fn aggregate(
    domain: &str,
    dns: Result<ProbeOutcome, DomainScoutError>,
    reachability: Result<ProbeOutcome, DomainScoutError>,
    started: Instant,
) -> CheckResult {
    match (dns, reachability) {
        (Ok(dns), Ok(reachability)) => CheckResult {
            domain: domain.to_string(),
            status: resolve_status(dns, reachability),
            dns,
            reachability,
            checked_at: local_timestamp(),
            check_duration: Some(started.elapsed()),
            error_message: None,
        },
        (dns, reachability) => {
            let message = [dns.err(), reachability.err()]
                .into_iter()
                .flatten()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            error_result(domain, message)
        }
    }
}

/// Build an `Error`-status result for a domain whose check failed outright.
pub fn error_result<M: Into<String>>(domain: &str, message: M) -> CheckResult {
    CheckResult {
        domain: domain.to_string(),
        status: DomainStatus::Error,
        dns: ProbeOutcome::Indeterminate,
        reachability: ProbeOutcome::Indeterminate,
        checked_at: local_timestamp(),
        check_duration: None,
        error_message: Some(message.into()),
    }
}

/// Human-readable local timestamp for `checked_at`.
fn local_timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

// domain-scout-lib/tests/integration.rs

//! Integration tests for domain-scout-lib exports and the pipeline
//! properties that hold without touching the network. Tests that need
//! real DNS/HTTP are marked #[ignore].

use domain_scout_lib::{
    candidate_count, generate_candidates, normalize_term, CheckConfig, CheckResult, DomainChecker,
    DomainStatus, ProbeOutcome, Progress, DEFAULT_PREFIXES, DEFAULT_SUFFIXES,
};

fn default_lists() -> (Vec<String>, Vec<String>) {
    (
        DEFAULT_PREFIXES.iter().map(|s| s.to_string()).collect(),
        DEFAULT_SUFFIXES.iter().map(|s| s.to_string()).collect(),
    )
}

#[test]
fn test_library_exports_work() {
    // Core generation surface
    let (prefixes, suffixes) = default_lists();
    assert_eq!(candidate_count(&prefixes, &suffixes), 54);
    assert_eq!(normalize_term(" Example ").unwrap(), "example");

    // Scheduler helpers
    assert_eq!(domain_scout_lib::scheduler::chunk_count(54, 5), 11);

    // Aggregation surface
    assert_eq!(
        domain_scout_lib::aggregate::resolve_status(ProbeOutcome::Absent, ProbeOutcome::Present),
        DomainStatus::Active
    );
}

#[test]
fn test_default_candidate_set_for_example() {
    let (prefixes, suffixes) = default_lists();
    let candidates = generate_candidates("example", &prefixes, &suffixes).unwrap();

    assert_eq!(candidates.len(), 54);
    assert!(candidates.contains(&"www.example.com".to_string()));
    assert!(candidates.contains(&"example.id".to_string()));

    // No duplicates with the default lists
    let mut unique = candidates.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), 54);
}

#[test]
fn test_default_config_values() {
    let config = CheckConfig::default();
    assert_eq!(config.batch_size, 5);
    assert_eq!(config.check_timeout.as_secs(), 10);
    assert_eq!(config.dns_timeout.as_secs(), 5);
    assert!(config.resolver_url.starts_with("https://"));
}

/// The full run over 54 candidates at batch size 5 must report the
/// cumulative progress sequence 5, 10, ..., 50, 54.
#[tokio::test]
async fn test_progress_sequence_via_scheduler() {
    use domain_scout_lib::scheduler::run_batched;
    use std::time::Instant;

    let (prefixes, suffixes) = default_lists();
    let candidates = generate_candidates("example", &prefixes, &suffixes).unwrap();

    let mut reported: Vec<(usize, f64)> = Vec::new();
    let results = run_batched(
        &candidates,
        5,
        |domain| async move {
            domain_scout_lib::aggregate::aggregate(
                &domain,
                Ok(ProbeOutcome::Absent),
                Ok(ProbeOutcome::Absent),
                Instant::now(),
            )
        },
        |progress: Progress, _chunk: &[CheckResult]| {
            reported.push((progress.checked, progress.percent));
        },
    )
    .await;

    assert_eq!(results.len(), 54);
    let counts: Vec<usize> = reported.iter().map(|(c, _)| *c).collect();
    assert_eq!(counts, vec![5, 10, 15, 20, 25, 30, 35, 40, 45, 50, 54]);
    assert_eq!(reported.last().unwrap().1, 100.0);

    // Output order matches generation order
    let domains: Vec<_> = results.iter().map(|r| r.domain.clone()).collect();
    assert_eq!(domains, candidates);
}

/// Every candidate yields exactly one result even when some checks fail.
#[tokio::test]
async fn test_one_result_per_candidate_with_failures() {
    use domain_scout_lib::scheduler::run_batched;
    use std::time::Instant;

    let domains: Vec<String> = (0..9).map(|i| format!("c{}.org", i)).collect();

    let results = run_batched(
        &domains,
        4,
        |domain| async move {
            if domain.starts_with("c4") {
                panic!("simulated probe crash");
            }
            domain_scout_lib::aggregate::aggregate(
                &domain,
                Ok(ProbeOutcome::Present),
                Ok(ProbeOutcome::Absent),
                Instant::now(),
            )
        },
        |_, _| {},
    )
    .await;

    assert_eq!(results.len(), 9);
    assert_eq!(results[4].status, DomainStatus::Error);
    assert!(results
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != 4)
        .all(|(_, r)| r.status == DomainStatus::Registered));
}

// ============================================================
// Network-touching tests (run with: cargo test -- --ignored)
// ============================================================

/// google.com must resolve and respond: the single most important
/// smoke test for a reachability checker.
#[tokio::test]
#[ignore]
async fn test_known_active_domain_google_com() {
    let checker = DomainChecker::new();
    let result = checker.check_domain("google.com").await;
    assert_eq!(
        result.status,
        DomainStatus::Active,
        "google.com must be reported as ACTIVE"
    );
    assert_eq!(result.dns, ProbeOutcome::Present);
}

/// A reserved-by-RFC name never resolves; with the default resolver it
/// must come back Available.
#[tokio::test]
#[ignore]
async fn test_reserved_name_is_available() {
    let checker = DomainChecker::new();
    let result = checker
        .check_domain("domain-scout-integration-test.invalid")
        .await;
    assert_eq!(result.status, DomainStatus::Available);
}

/// The stream API yields results in input order with real checks.
#[tokio::test]
#[ignore]
async fn test_stream_preserves_order_on_network() {
    use futures::StreamExt;

    let checker = DomainChecker::new();
    let domains = vec!["google.com".to_string(), "example.org".to_string()];

    let results: Vec<_> = checker.check_domains_stream(&domains).collect().await;
    let got: Vec<_> = results.iter().map(|r| r.domain.clone()).collect();
    assert_eq!(got, domains);
}

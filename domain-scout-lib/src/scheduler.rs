//! Batched concurrent check scheduling.
//!
//! The scheduler is the concurrency control for the whole pipeline: it
//! partitions the candidate list into fixed-size chunks, runs each chunk's
//! checks concurrently, and enforces a strict barrier between chunks so
//! that at most `batch_size` domains ever have probes in flight. Results
//! come back in the exact order the domains went in, and a progress
//! callback fires after every chunk.

use crate::aggregate::error_result;
use crate::types::{CheckResult, Progress};
use std::future::Future;
use tracing::warn;

/// Number of chunks a run of `total` domains produces at `batch_size`.
pub fn chunk_count(total: usize, batch_size: usize) -> usize {
    total.div_ceil(batch_size.max(1))
}

/// Run checks over `domains` in sequential chunks of `batch_size`.
///
/// Within a chunk every domain's check runs concurrently (spawned as a
/// task); the next chunk does not start until the whole chunk has
/// settled. After each chunk, `on_batch` receives the cumulative
/// [`Progress`] and the chunk's results, in input order — this is the
/// hook the presentation layer uses to render incrementally.
///
/// A failed or panicked check task is reported as an `Error`-status
/// result for that domain and the run continues; nothing aborts the
/// batch.
pub async fn run_batched<C, Fut, F>(
    domains: &[String],
    batch_size: usize,
    check: C,
    mut on_batch: F,
) -> Vec<CheckResult>
where
    C: Fn(String) -> Fut,
    Fut: Future<Output = CheckResult> + Send + 'static,
    F: FnMut(Progress, &[CheckResult]),
{
    let batch_size = batch_size.max(1);
    let total = domains.len();
    let mut results = Vec::with_capacity(total);
    let mut checked = 0usize;

    for chunk in domains.chunks(batch_size) {
        // Spawn the whole chunk first so its checks run concurrently,
        // then await handles in order — input order is preserved no
        // matter which check settles first.
        let handles: Vec<_> = chunk
            .iter()
            .map(|domain| (domain.clone(), tokio::spawn(check(domain.clone()))))
            .collect();

        let mut chunk_results = Vec::with_capacity(handles.len());
        for (domain, handle) in handles {
            match handle.await {
                Ok(result) => chunk_results.push(result),
                Err(e) => {
                    warn!(domain = %domain, error = %e, "check task did not complete");
                    chunk_results.push(error_result(&domain, format!("check task failed: {}", e)));
                }
            }
        }

        checked += chunk_results.len();
        on_batch(Progress::new(checked, total), &chunk_results);
        results.extend(chunk_results);
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use crate::types::{DomainStatus, ProbeOutcome};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    fn fake_result(domain: &str) -> CheckResult {
        aggregate(
            domain,
            Ok(ProbeOutcome::Absent),
            Ok(ProbeOutcome::Absent),
            Instant::now(),
        )
    }

    fn domains(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("d{}.com", i)).collect()
    }

    #[test]
    fn test_chunk_count() {
        assert_eq!(chunk_count(54, 5), 11);
        assert_eq!(chunk_count(10, 5), 2);
        assert_eq!(chunk_count(1, 5), 1);
        assert_eq!(chunk_count(0, 5), 0);
        assert_eq!(chunk_count(5, 0), 5); // batch size is floored to 1
    }

    #[tokio::test]
    async fn test_results_preserve_input_order() {
        let input = domains(10);

        // Earlier domains in a chunk sleep longer, so completion order is
        // reversed within each chunk; output order must still match input.
        let results = run_batched(
            &input,
            5,
            |domain| async move {
                let idx: u64 = domain[1..domain.len() - 4].parse().unwrap();
                tokio::time::sleep(Duration::from_millis(50 - (idx % 5) * 10)).await;
                fake_result(&domain)
            },
            |_, _| {},
        )
        .await;

        let got: Vec<_> = results.iter().map(|r| r.domain.clone()).collect();
        assert_eq!(got, input);
    }

    #[tokio::test]
    async fn test_progress_sequence_for_54_domains() {
        let input = domains(54);
        let mut reported = Vec::new();

        run_batched(
            &input,
            5,
            |domain| async move { fake_result(&domain) },
            |progress, chunk| {
                assert!(!chunk.is_empty());
                reported.push(progress.checked);
            },
        )
        .await;

        assert_eq!(
            reported,
            vec![5, 10, 15, 20, 25, 30, 35, 40, 45, 50, 54]
        );
    }

    #[tokio::test]
    async fn test_progress_percent_reaches_100() {
        let input = domains(7);
        let mut last = None;

        run_batched(
            &input,
            3,
            |domain| async move { fake_result(&domain) },
            |progress, _| last = Some(progress),
        )
        .await;

        let last = last.unwrap();
        assert_eq!(last.checked, 7);
        assert_eq!(last.total, 7);
        assert_eq!(last.percent, 100.0);
    }

    #[tokio::test]
    async fn test_in_flight_never_exceeds_batch_size() {
        let input = domains(20);
        let in_flight = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let results = run_batched(
            &input,
            5,
            {
                let in_flight = in_flight.clone();
                let peak = peak.clone();
                move |domain| {
                    let in_flight = in_flight.clone();
                    let peak = peak.clone();
                    async move {
                        let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                        peak.fetch_max(now, Ordering::SeqCst);
                        tokio::time::sleep(Duration::from_millis(20)).await;
                        in_flight.fetch_sub(1, Ordering::SeqCst);
                        fake_result(&domain)
                    }
                }
            },
            |_, _| {},
        )
        .await;

        assert_eq!(results.len(), 20);
        assert!(peak.load(Ordering::SeqCst) <= 5);
    }

    #[tokio::test]
    async fn test_panicked_check_becomes_error_result() {
        let input = domains(6);

        let results = run_batched(
            &input,
            2,
            |domain| async move {
                if domain == "d2.com" {
                    panic!("probe blew up");
                }
                fake_result(&domain)
            },
            |_, _| {},
        )
        .await;

        // The run continued past the failure and every domain got a result
        assert_eq!(results.len(), 6);
        assert_eq!(results[2].domain, "d2.com");
        assert_eq!(results[2].status, DomainStatus::Error);
        assert_eq!(results[3].status, DomainStatus::Available);
    }

    #[tokio::test]
    async fn test_final_partial_chunk() {
        let input = domains(7);
        let mut chunk_sizes = Vec::new();

        run_batched(
            &input,
            5,
            |domain| async move { fake_result(&domain) },
            |_, chunk| chunk_sizes.push(chunk.len()),
        )
        .await;

        assert_eq!(chunk_sizes, vec![5, 2]);
    }
}

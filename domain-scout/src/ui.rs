//! Terminal display for domain-scout.
//!
//! Handles the stderr progress bar, per-domain result lines, grouped
//! `--pretty` output, and the final summary. Uses only the `console`
//! crate. Result lines go to stdout; the progress bar stays on stderr so
//! piped output is clean.

use console::{pad_str, style, Alignment, Term};
use domain_scout_lib::{CheckResult, DomainStatus, Progress};
use std::time::Duration;

const BAR_WIDTH: usize = 30;

// ── Progress bar ─────────────────────────────────────────────────────────────

/// A redrawing progress bar on stderr.
///
/// Renders nothing when stderr is not a terminal, so automation and
/// pipes never see control sequences.
pub struct ProgressBar {
    term: Term,
    active: bool,
}

impl ProgressBar {
    /// Create a bar; it stays invisible until the first `draw`.
    pub fn new() -> Self {
        let term = Term::stderr();
        let active = term.is_term();
        Self { term, active }
    }

    /// Redraw the bar for the given progress state.
    pub fn draw(&self, progress: Progress) {
        if !self.active {
            return;
        }
        let filled = ((progress.percent / 100.0) * BAR_WIDTH as f64).round() as usize;
        let bar: String = "#".repeat(filled.min(BAR_WIDTH)) + &"-".repeat(BAR_WIDTH - filled.min(BAR_WIDTH));
        let _ = self.term.clear_line();
        let _ = self.term.write_str(&format!(
            "[{}] {}/{} domains checked ({:.0}%)",
            style(bar).cyan(),
            progress.checked,
            progress.total,
            progress.percent,
        ));
    }

    /// Clear the bar line (call before printing result lines).
    pub fn clear(&self) {
        if self.active {
            let _ = self.term.clear_line();
        }
    }

    /// Remove the bar for good once the run is complete.
    pub fn finish(&self) {
        self.clear();
    }
}

impl Default for ProgressBar {
    fn default() -> Self {
        Self::new()
    }
}

// ── Single result line ───────────────────────────────────────────────────────

/// Format and print one domain result with a colored status badge.
///
/// Active and registered domains get dim deep-links (visit / WHOIS) —
/// these are rendered affordances only, never probed.
pub fn print_result(result: &CheckResult, show_links: bool, debug: bool) {
    let domain_width = 28;
    let padded = pad_str(&result.domain, domain_width, Alignment::Left, Some(".."));

    println!(
        "  {}  {}{}",
        style(&padded).white(),
        status_badge(result.status),
        annotation(result, show_links),
    );

    if debug {
        if let Some(duration) = result.check_duration {
            println!(
                "    {} dns={} reach={} in {}ms",
                style("└─").dim(),
                result.dns,
                result.reachability,
                duration.as_millis(),
            );
        }
    }
}

/// Colored badge for a status category.
fn status_badge(status: DomainStatus) -> String {
    match status {
        DomainStatus::Active => style("ACTIVE").cyan().bold().to_string(),
        DomainStatus::Registered => style("REGISTERED").red().bold().to_string(),
        DomainStatus::Available => style("AVAILABLE").green().bold().to_string(),
        DomainStatus::Error => style("ERROR").yellow().bold().to_string(),
    }
}

/// Trailing annotation: timestamp plus deep-links, or the error reason.
fn annotation(result: &CheckResult, show_links: bool) -> String {
    match result.status {
        DomainStatus::Active if show_links => format!(
            "  {}",
            style(format!(
                "checked {} | visit {} | whois {}",
                result.checked_at,
                visit_link(&result.domain),
                whois_link(&result.domain),
            ))
            .dim()
        ),
        DomainStatus::Registered if show_links => format!(
            "  {}",
            style(format!(
                "checked {} | whois {}",
                result.checked_at,
                whois_link(&result.domain),
            ))
            .dim()
        ),
        DomainStatus::Error => {
            let reason = result.error_message.as_deref().unwrap_or("unknown failure");
            format!("  {}", style(format!("({})", reason)).dim())
        }
        _ => String::new(),
    }
}

/// Browser deep-link for visiting a domain.
pub fn visit_link(domain: &str) -> String {
    format!("https://{}", domain)
}

/// Deep-link to a third-party WHOIS page for a domain.
pub fn whois_link(domain: &str) -> String {
    format!("https://who.is/whois/{}", domain)
}

// ── Grouped output ───────────────────────────────────────────────────────────

/// Print results grouped by status. Empty sections are omitted.
pub fn print_grouped_results(results: &[CheckResult], show_links: bool, debug: bool) {
    let sections = [
        (DomainStatus::Active, "Active"),
        (DomainStatus::Registered, "Registered"),
        (DomainStatus::Available, "Available"),
        (DomainStatus::Error, "Errors"),
    ];

    for (status, title) in sections {
        let members: Vec<&CheckResult> = results.iter().filter(|r| r.status == status).collect();
        if members.is_empty() {
            continue;
        }

        println!(
            "  {} {}",
            style(format!("── {} ({}) ", title, members.len())).bold(),
            style("─".repeat(40)).dim(),
        );
        for r in &members {
            print_result(r, show_links, debug);
        }
        println!();
    }
}

// ── Summary ──────────────────────────────────────────────────────────────────

/// Print the final summary bar with per-status counts.
pub fn print_summary(results: &[CheckResult], duration: Duration) {
    let count = |status: DomainStatus| results.iter().filter(|r| r.status == status).count();

    println!(
        "  {}",
        style("────────────────────────────────────────────────────").dim()
    );
    println!(
        "  {} domain{} in {:.1}s  {}  {}  {}  {}  {}  {}  {}  {}",
        style(results.len()).bold(),
        if results.len() == 1 { "" } else { "s" },
        duration.as_secs_f64(),
        style("|").dim(),
        style(format!("{} active", count(DomainStatus::Active))).cyan(),
        style("|").dim(),
        style(format!("{} registered", count(DomainStatus::Registered))).red(),
        style("|").dim(),
        style(format!("{} available", count(DomainStatus::Available))).green(),
        style("|").dim(),
        style(format!("{} errors", count(DomainStatus::Error))).yellow(),
    );
}

// ── Tests ────────────────────────────────────────────────────────────────────

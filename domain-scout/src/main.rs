//! Domain Scout CLI Application
//!
//! Command-line front end for domain-scout-lib: takes a search term,
//! generates subdomain × TLD candidates, checks them in batches, and
//! renders results incrementally with a progress bar.

mod ui;

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::Parser;
use domain_scout_lib::{
    load_env_config, parse_timeout_string, CheckConfig, CheckResult, ConfigManager, DomainChecker,
    FileConfig,
};
use std::process;
use std::time::Duration;

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

/// CLI arguments for domain-scout
#[derive(Parser, Debug)]
#[command(name = "domain-scout")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Scout candidate domains for a search term via DNS and reachability checks")]
#[command(
    long_about = "Generate candidate domains for a search term (subdomain prefixes × TLD suffixes)\nand check each for DNS existence and live web reachability, in concurrent batches\nwith incremental results and a progress bar."
)]
#[command(styles = STYLES)]
pub struct Args {
    /// Search term to scout (e.g. "example")
    #[arg(value_name = "TERM", help_heading = "Candidate Generation")]
    pub term: String,

    /// TLD suffixes to combine, with dots (comma-separated, e.g. ".com,.dev")
    #[arg(short = 't', long = "tld", value_name = "TLD", value_delimiter = ',', action = clap::ArgAction::Append, help_heading = "Candidate Generation")]
    pub tlds: Option<Vec<String>>,

    /// Subdomain prefixes to combine, with trailing dots ("" keeps the bare domain)
    #[arg(short = 's', long = "subdomain", value_name = "PREFIX", value_delimiter = ',', action = clap::ArgAction::Append, help_heading = "Candidate Generation")]
    pub subdomains: Option<Vec<String>>,

    /// Preview generated candidates without checking them
    #[arg(long = "dry-run", help_heading = "Candidate Generation")]
    pub dry_run: bool,

    /// Domains checked concurrently per batch (default: 5, max: 100)
    #[arg(
        short = 'c',
        long = "batch-size",
        value_name = "N",
        help_heading = "Performance"
    )]
    pub batch_size: Option<usize>,

    /// Timeout per reachability attempt (e.g. "10s", "2m")
    #[arg(long = "timeout", value_name = "DURATION", help_heading = "Performance")]
    pub timeout: Option<String>,

    /// Timeout for DNS lookups (e.g. "5s")
    #[arg(
        long = "dns-timeout",
        value_name = "DURATION",
        help_heading = "Performance"
    )]
    pub dns_timeout: Option<String>,

    /// DNS-over-HTTPS resolver endpoint
    #[arg(long = "resolver", value_name = "URL", help_heading = "Performance")]
    pub resolver: Option<String>,

    /// Output results in JSON format
    #[arg(short = 'j', long = "json", help_heading = "Output Format")]
    pub json: bool,

    /// Output results in CSV format
    #[arg(long = "csv", help_heading = "Output Format")]
    pub csv: bool,

    /// Group results by status with section headers
    #[arg(short = 'p', long = "pretty", help_heading = "Output Format")]
    pub pretty: bool,

    /// Hide the visit/WHOIS deep-links on result lines
    #[arg(long = "no-links", help_heading = "Output Format")]
    pub no_links: bool,

    /// Use a specific config file instead of automatic discovery
    #[arg(long = "config", value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Show probe outcomes and timing per domain
    #[arg(short = 'd', long = "debug", help_heading = "Configuration")]
    pub debug: bool,

    /// Verbose logging
    #[arg(short = 'v', long = "verbose", help_heading = "Configuration")]
    pub verbose: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    init_tracing(&args);

    if let Err(e) = validate_args(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    if let Err(e) = run(args).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Set up tracing to stderr; -v raises the level, -d raises it further.
fn init_tracing(args: &Args) {
    let default_filter = if args.debug {
        "domain_scout=debug,domain_scout_lib=debug"
    } else if args.verbose {
        "domain_scout=info,domain_scout_lib=info"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Validate command line arguments
fn validate_args(args: &Args) -> Result<(), String> {
    if args.term.trim().is_empty() {
        return Err("Search term cannot be empty".to_string());
    }

    if args.json && args.csv {
        return Err("Cannot specify multiple output formats (--json, --csv)".to_string());
    }

    if let Some(batch_size) = args.batch_size {
        if batch_size == 0 || batch_size > 100 {
            return Err("Batch size must be between 1 and 100".to_string());
        }
    }

    for (name, value) in [("--timeout", &args.timeout), ("--dns-timeout", &args.dns_timeout)] {
        if let Some(timeout_str) = value {
            if parse_timeout_string(timeout_str).is_none() {
                return Err(format!(
                    "Invalid {} '{}'. Use a format like '10s', '30s', '2m'",
                    name, timeout_str
                ));
            }
        }
    }

    Ok(())
}

/// Main scouting logic
async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = build_config(&args)?;

    let checker = DomainChecker::with_config(config.clone());
    let candidates = checker.candidates(&args.term)?;

    // Dry-run: print candidates and exit without touching the network
    if args.dry_run {
        if args.json {
            println!("{}", serde_json::to_string_pretty(&candidates)?);
        } else {
            for candidate in &candidates {
                println!("{}", candidate);
            }
        }
        eprintln!("{} domains would be checked", candidates.len());
        return Ok(());
    }

    if args.verbose {
        eprintln!(
            "Checking {} candidates for '{}' (batch size {})",
            candidates.len(),
            args.term.trim().to_lowercase(),
            config.batch_size,
        );
    }

    let structured = args.json || args.csv;
    let show_links = !args.no_links;
    let start_time = std::time::Instant::now();

    let bar = ui::ProgressBar::new();
    let results = checker
        .check_domains(&candidates, |progress, chunk| {
            bar.clear();
            // Structured and pretty modes collect first; default mode
            // streams each chunk's lines as it settles.
            if !structured && !args.pretty {
                for result in chunk {
                    ui::print_result(result, show_links, args.debug);
                }
            }
            bar.draw(progress);
        })
        .await;
    bar.finish();

    let duration = start_time.elapsed();

    display_results(&results, &args, duration)?;

    Ok(())
}

/// Build CheckConfig with precedence: CLI > environment > config files.
fn build_config(args: &Args) -> Result<CheckConfig, Box<dyn std::error::Error>> {
    let mut config = CheckConfig::default();

    let config_manager = ConfigManager::new(args.verbose);

    // Step 1: config files (explicit --config / DS_CONFIG beat discovery)
    let file_config = if let Some(explicit_path) = &args.config {
        config_manager
            .load_file(explicit_path)
            .map_err(|e| format!("Failed to load config file '{}': {}", explicit_path, e))?
    } else if let Ok(env_path) = std::env::var("DS_CONFIG") {
        config_manager
            .load_file(&env_path)
            .map_err(|e| format!("Failed to load config file '{}': {}", env_path, e))?
    } else {
        config_manager.discover_and_load().unwrap_or_default()
    };
    config = apply_file_config(config, file_config);

    // Step 2: DS_* environment variables
    let env_config = load_env_config();
    if let Some(batch_size) = env_config.batch_size {
        config.batch_size = batch_size;
    }
    if let Some(timeout) = env_config.timeout.as_deref().and_then(parse_timeout_string) {
        config.check_timeout = Duration::from_secs(timeout);
    }
    if let Some(timeout) = env_config
        .dns_timeout
        .as_deref()
        .and_then(parse_timeout_string)
    {
        config.dns_timeout = Duration::from_secs(timeout);
    }
    if let Some(resolver) = env_config.resolver {
        config.resolver_url = resolver;
    }
    if let Some(prefixes) = env_config.prefixes {
        config.prefixes = prefixes;
    }
    if let Some(suffixes) = env_config.suffixes {
        config.suffixes = suffixes;
    }

    // Step 3: CLI arguments (highest precedence)
    if let Some(batch_size) = args.batch_size {
        config.batch_size = batch_size.clamp(1, 100);
    }
    if let Some(timeout) = args.timeout.as_deref().and_then(parse_timeout_string) {
        config.check_timeout = Duration::from_secs(timeout);
    }
    if let Some(timeout) = args.dns_timeout.as_deref().and_then(parse_timeout_string) {
        config.dns_timeout = Duration::from_secs(timeout);
    }
    if let Some(resolver) = &args.resolver {
        config.resolver_url = resolver.clone();
    }
    if let Some(subdomains) = &args.subdomains {
        config.prefixes = subdomains.clone();
    }
    if let Some(tlds) = &args.tlds {
        config.suffixes = tlds.clone();
    }

    Ok(config)
}

/// Merge FileConfig values into CheckConfig.
fn apply_file_config(mut config: CheckConfig, file_config: FileConfig) -> CheckConfig {
    if let Some(defaults) = file_config.defaults {
        if let Some(batch_size) = defaults.batch_size {
            config.batch_size = batch_size;
        }
        if let Some(timeout) = defaults.timeout.as_deref().and_then(parse_timeout_string) {
            config.check_timeout = Duration::from_secs(timeout);
        }
        if let Some(timeout) = defaults
            .dns_timeout
            .as_deref()
            .and_then(parse_timeout_string)
        {
            config.dns_timeout = Duration::from_secs(timeout);
        }
        if let Some(resolver) = defaults.resolver {
            config.resolver_url = resolver;
        }
    }

    if let Some(generation) = file_config.generation {
        if let Some(prefixes) = generation.prefixes {
            config.prefixes = prefixes;
        }
        if let Some(suffixes) = generation.suffixes {
            config.suffixes = suffixes;
        }
    }

    config
}

/// Display collected results in the requested format.
fn display_results(
    results: &[CheckResult],
    args: &Args,
    duration: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(results)?);
    } else if args.csv {
        display_csv_results(results);
    } else if args.pretty {
        ui::print_grouped_results(results, !args.no_links, args.debug);
        ui::print_summary(results, duration);
    } else {
        // Streaming mode already printed the lines; close with a summary
        println!();
        ui::print_summary(results, duration);
    }

    Ok(())
}

/// Display results in CSV format
fn display_csv_results(results: &[CheckResult]) {
    println!("domain,status,dns,reachability,checked_at,error");

    for result in results {
        println!(
            "{},{},{},{},{},{}",
            result.domain,
            result.status,
            result.dns,
            result.reachability,
            result.checked_at,
            result.error_message.as_deref().unwrap_or("-"),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> Args {
        Args {
            term: "example".to_string(),
            tlds: None,
            subdomains: None,
            dry_run: false,
            batch_size: None,
            timeout: None,
            dns_timeout: None,
            resolver: None,
            json: false,
            csv: false,
            pretty: false,
            no_links: false,
            config: None,
            debug: false,
            verbose: false,
        }
    }

    #[test]
    fn test_validate_empty_term() {
        let args = Args {
            term: "   ".to_string(),
            ..base_args()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_conflicting_formats() {
        let args = Args {
            json: true,
            csv: true,
            ..base_args()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_batch_size_range() {
        let args = Args {
            batch_size: Some(0),
            ..base_args()
        };
        assert!(validate_args(&args).is_err());

        let args = Args {
            batch_size: Some(101),
            ..base_args()
        };
        assert!(validate_args(&args).is_err());

        let args = Args {
            batch_size: Some(5),
            ..base_args()
        };
        assert!(validate_args(&args).is_ok());
    }

    #[test]
    fn test_validate_timeout_format() {
        let args = Args {
            timeout: Some("banana".to_string()),
            ..base_args()
        };
        assert!(validate_args(&args).is_err());

        let args = Args {
            timeout: Some("10s".to_string()),
            dns_timeout: Some("2m".to_string()),
            ..base_args()
        };
        assert!(validate_args(&args).is_ok());
    }

    #[test]
    fn test_cli_args_override_defaults() {
        let args = Args {
            batch_size: Some(12),
            timeout: Some("20s".to_string()),
            tlds: Some(vec![".dev".to_string()]),
            ..base_args()
        };

        let config = build_config(&args).unwrap();
        assert_eq!(config.batch_size, 12);
        assert_eq!(config.check_timeout, Duration::from_secs(20));
        assert_eq!(config.suffixes, vec![".dev".to_string()]);
        // Untouched settings keep their defaults
        assert_eq!(config.dns_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_apply_file_config() {
        use domain_scout_lib::{DefaultsConfig, GenerationConfig};

        let file_config = FileConfig {
            defaults: Some(DefaultsConfig {
                batch_size: Some(8),
                timeout: Some("30s".to_string()),
                ..Default::default()
            }),
            generation: Some(GenerationConfig {
                prefixes: Some(vec!["".to_string(), "app.".to_string()]),
                suffixes: None,
            }),
        };

        let config = apply_file_config(CheckConfig::default(), file_config);
        assert_eq!(config.batch_size, 8);
        assert_eq!(config.check_timeout, Duration::from_secs(30));
        assert_eq!(config.prefixes, vec!["".to_string(), "app.".to_string()]);
        assert_eq!(config.suffixes.len(), 6); // defaults preserved
    }
}

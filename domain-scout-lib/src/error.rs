//! Error handling for domain scouting operations.
//!
//! Most probe failures never surface here — the probers degrade transport
//! problems into an indeterminate outcome instead of erroring. This type
//! covers the failures that are genuinely exceptional: bad input, broken
//! configuration, and errors escaping a prober's degrade path.

use std::fmt;

/// Main error type for domain scouting operations.
#[derive(Debug, Clone)]
pub enum DomainScoutError {
    /// The search term is empty or contains characters that cannot form
    /// a domain label.
    InvalidTerm { term: String, reason: String },

    /// Network-related errors (connection setup, TLS, etc.)
    NetworkError {
        message: String,
        source: Option<String>,
    },

    /// A probe failed in a way that is not a transport degradation,
    /// e.g. the request could not even be constructed.
    ProbeError { domain: String, message: String },

    /// JSON parsing errors for resolver responses
    ParseError { message: String },

    /// Configuration errors (bad TOML, out-of-range values)
    ConfigError { message: String },

    /// Timeout errors when operations take too long
    Timeout {
        operation: String,
        duration: std::time::Duration,
    },

    /// Generic internal errors that don't fit other categories
    Internal { message: String },
}

impl DomainScoutError {
    /// Create a new invalid term error.
    pub fn invalid_term<T: Into<String>, R: Into<String>>(term: T, reason: R) -> Self {
        Self::InvalidTerm {
            term: term.into(),
            reason: reason.into(),
        }
    }

    /// Create a new network error.
    pub fn network<M: Into<String>>(message: M) -> Self {
        Self::NetworkError {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new network error with source information.
    pub fn network_with_source<M: Into<String>, S: Into<String>>(message: M, source: S) -> Self {
        Self::NetworkError {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create a new probe error.
    pub fn probe<D: Into<String>, M: Into<String>>(domain: D, message: M) -> Self {
        Self::ProbeError {
            domain: domain.into(),
            message: message.into(),
        }
    }

    /// Create a new parse error.
    pub fn parse<M: Into<String>>(message: M) -> Self {
        Self::ParseError {
            message: message.into(),
        }
    }

    /// Create a new configuration error.
    pub fn config<M: Into<String>>(message: M) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create a new timeout error.
    pub fn timeout<O: Into<String>>(operation: O, duration: std::time::Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            duration,
        }
    }

    /// Create a new internal error.
    pub fn internal<M: Into<String>>(message: M) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Check if this error was caused by a bounded wait expiring.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

impl fmt::Display for DomainScoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTerm { term, reason } => {
                write!(f, "Invalid search term '{}': {}", term, reason)
            }
            Self::NetworkError { message, source } => {
                if let Some(source) = source {
                    write!(f, "Network error: {} (source: {})", message, source)
                } else {
                    write!(f, "Network error: {}", message)
                }
            }
            Self::ProbeError { domain, message } => {
                write!(f, "Probe error for '{}': {}", domain, message)
            }
            Self::ParseError { message } => {
                write!(f, "Parse error: {}", message)
            }
            Self::ConfigError { message } => {
                write!(f, "Configuration error: {}", message)
            }
            Self::Timeout {
                operation,
                duration,
            } => {
                write!(f, "Timeout after {:?} during: {}", duration, operation)
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {}", message)
            }
        }
    }
}

impl std::error::Error for DomainScoutError {}

impl From<reqwest::Error> for DomainScoutError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::timeout("HTTP request", std::time::Duration::from_secs(10))
        } else if err.is_connect() {
            Self::network_with_source("Connection failed", err.to_string())
        } else {
            Self::network_with_source("HTTP request failed", err.to_string())
        }
    }
}

impl From<serde_json::Error> for DomainScoutError {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseError {
            message: format!("JSON parsing failed: {}", err),
        }
    }
}

impl From<std::io::Error> for DomainScoutError {
    fn from(err: std::io::Error) -> Self {
        Self::Internal {
            message: format!("I/O error: {}", err),
        }
    }
}

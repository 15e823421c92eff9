//! Candidate domain generation.
//!
//! Builds the full candidate list for a search term as the Cartesian
//! product of subdomain prefixes and TLD suffixes. Generation is
//! deterministic: prefixes iterate in order, and for each prefix every
//! suffix is emitted in order, so `"example"` with the default lists
//! always starts with `example.com` and ends with `dev.example.id`.

use crate::error::DomainScoutError;

/// Subdomain prefixes tried for every search term. The empty string
/// produces the bare apex domain.
pub const DEFAULT_PREFIXES: &[&str] = &[
    "", "www.", "api.", "admin.", "app.", "mail.", "blog.", "m.", "dev.",
];

/// TLD suffixes tried for every search term, most common first.
pub const DEFAULT_SUFFIXES: &[&str] = &[".com", ".net", ".org", ".io", ".co", ".id"];

/// Normalize a raw search term: trim whitespace and lowercase.
///
/// Returns an error if the term is empty after trimming or contains
/// characters that cannot appear in a domain label (anything other than
/// alphanumerics and inner hyphens).
pub fn normalize_term(term: &str) -> Result<String, DomainScoutError> {
    let term = term.trim().to_lowercase();

    if term.is_empty() {
        return Err(DomainScoutError::invalid_term(
            term,
            "search term cannot be empty",
        ));
    }

    if term.starts_with('-') || term.ends_with('-') {
        return Err(DomainScoutError::invalid_term(
            &term,
            "search term cannot start or end with a hyphen",
        ));
    }

    if !term.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(DomainScoutError::invalid_term(
            &term,
            "search term may only contain letters, digits, and hyphens",
        ));
    }

    Ok(term)
}

/// Generate every candidate domain for a search term.
///
/// The term is normalized first; the output size is always
/// `prefixes.len() * suffixes.len()`. No deduplication is performed —
/// distinct prefix/suffix lists cannot produce duplicates.
pub fn generate_candidates(
    term: &str,
    prefixes: &[String],
    suffixes: &[String],
) -> Result<Vec<String>, DomainScoutError> {
    let term = normalize_term(term)?;

    let mut candidates = Vec::with_capacity(prefixes.len() * suffixes.len());
    for prefix in prefixes {
        for suffix in suffixes {
            candidates.push(format!("{}{}{}", prefix, term, suffix));
        }
    }

    Ok(candidates)
}

/// Number of candidates a term will produce with the given lists.
pub fn candidate_count(prefixes: &[String], suffixes: &[String]) -> usize {
    prefixes.len() * suffixes.len()
}

//! Domain-name helpers shared by the record model, the storage key and the zone.
//!
//! Names are handled in presentation form. A name is "normalized" when it is
//! lower-cased and carries no trailing root dot; it is "fully qualified" when it
//! ends with exactly one dot.

use crate::errors::DomainError;

pub const MAX_NAME_LENGTH: usize = 253;
pub const MAX_LABEL_LENGTH: usize = 63;

/// Checks that `name` is a syntactically valid domain name.
///
/// A single trailing dot is accepted. The root name on its own is rejected
/// because no record can live there.
pub fn validate_domain_name(name: &str) -> Result<(), DomainError> {
    let trimmed = name.strip_suffix('.').unwrap_or(name);

    if trimmed.is_empty() {
        return Err(DomainError::InvalidDomainName(
            "domain name cannot be empty".to_string(),
        ));
    }

    if trimmed.len() > MAX_NAME_LENGTH {
        return Err(DomainError::InvalidDomainName(format!(
            "'{}' exceeds {} characters",
            name, MAX_NAME_LENGTH
        )));
    }

    for label in trimmed.split('.') {
        if label.is_empty() {
            return Err(DomainError::InvalidDomainName(format!(
                "'{}' contains an empty label",
                name
            )));
        }
        if label.len() > MAX_LABEL_LENGTH {
            return Err(DomainError::InvalidDomainName(format!(
                "label '{}' exceeds {} characters",
                label, MAX_LABEL_LENGTH
            )));
        }
        if let Some(bad) = label
            .chars()
            .find(|c| !c.is_ascii_graphic() || *c == '\\')
        {
            return Err(DomainError::InvalidDomainName(format!(
                "'{}' contains invalid character {:?}",
                name, bad
            )));
        }
    }

    Ok(())
}

/// Lower-cases and strips the trailing root dot.
pub fn normalize_name(name: &str) -> String {
    name.strip_suffix('.').unwrap_or(name).to_ascii_lowercase()
}

/// Lower-cases and guarantees exactly one trailing dot.
pub fn to_fqdn(name: &str) -> String {
    let normalized = normalize_name(name);
    if normalized.is_empty() {
        ".".to_string()
    } else {
        format!("{}.", normalized)
    }
}

/// `www.example.com` becomes `com.example.www`.
pub fn reverse_labels(name: &str) -> String {
    name.split('.').rev().collect::<Vec<_>>().join(".")
}

/// Case-insensitive comparison that ignores a trailing root dot.
pub fn names_equal(a: &str, b: &str) -> bool {
    let a = a.strip_suffix('.').unwrap_or(a);
    let b = b.strip_suffix('.').unwrap_or(b);
    a.eq_ignore_ascii_case(b)
}

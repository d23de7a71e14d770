use super::RecordType;
use std::sync::Arc;

/// A single DNS question. Built fresh for every lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsQuery {
    /// Fully-qualified name, always ending in `.`.
    pub domain: Arc<str>,
    pub record_type: RecordType,
    pub recursion_desired: bool,
}

impl DnsQuery {
    /// Builds a recursive query, normalising `domain` to its fully-qualified form.
    pub fn new(domain: &str, record_type: RecordType) -> Self {
        Self {
            domain: fqdn(domain).into(),
            record_type,
            recursion_desired: true,
        }
    }

    pub fn without_recursion(mut self) -> Self {
        self.recursion_desired = false;
        self
    }
}

/// Appends the root label to `name` unless it is already present.
pub fn fqdn(name: &str) -> String {
    let name = name.trim();
    if name.ends_with('.') {
        name.to_string()
    } else {
        format!("{}.", name)
    }
}

use std::net::IpAddr;
use std::time::Duration;

/// TXT strings in answer order, with the round trip of the exchange that
/// produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxtLookup {
    pub values: Vec<String>,
    pub rtt: Duration,
}

impl TxtLookup {
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn contains(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostLookup {
    pub addresses: Vec<IpAddr>,
    pub rtt: Duration,
}

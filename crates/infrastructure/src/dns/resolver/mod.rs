//! The validation resolver: a fixed pool of upstream servers, the
//! single-exchange primitive, and the record-specific lookups built on it.
//!
//! A [`Resolver`] holds no mutable state. Every call picks one server at
//! random, performs one round trip under the configured timeout and returns;
//! there is no retry, failover or caching here. Callers wanting any of those
//! wrap these operations.

pub mod exchange;
pub mod lookup;
pub mod policy;
pub mod pool;

pub use exchange::Exchange;
pub use policy::ResponseCodePolicy;
pub use pool::ServerPool;

use ferrous_acme_dns_domain::{DnsConfig, DomainError, TransportProtocol, UpstreamAddr};
use std::time::Duration;
use tracing::info;

#[derive(Debug, Clone)]
pub struct Resolver {
    pool: ServerPool,
    timeout: Duration,
    protocol: TransportProtocol,
    dnssec_ok: bool,
}

impl Resolver {
    /// Builds a resolver from `host:port` strings.
    ///
    /// An empty list is accepted; every operation on the resulting resolver
    /// then fails with [`DomainError::NoServersConfigured`]. Repeated entries
    /// are kept and only bias the random choice.
    pub fn new<I, S>(timeout: Duration, servers: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let servers = servers
            .into_iter()
            .map(|s| {
                s.as_ref()
                    .parse::<UpstreamAddr>()
                    .map_err(DomainError::InvalidServerAddress)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_addrs(timeout, servers)
    }

    pub fn from_addrs(timeout: Duration, servers: Vec<UpstreamAddr>) -> Result<Self, DomainError> {
        if timeout.is_zero() {
            return Err(DomainError::ConfigError(
                "Resolver timeout must be greater than zero".to_string(),
            ));
        }

        info!(
            servers = servers.len(),
            timeout_ms = timeout.as_millis() as u64,
            "Validation resolver created"
        );

        Ok(Self {
            pool: ServerPool::new(servers),
            timeout,
            protocol: TransportProtocol::Udp,
            dnssec_ok: true,
        })
    }

    pub fn from_config(config: &DnsConfig) -> Result<Self, DomainError> {
        Ok(Self::new(config.query_timeout(), &config.servers)?
            .with_protocol(config.protocol)
            .with_dnssec_ok(config.dnssec_ok))
    }

    pub fn with_protocol(mut self, protocol: TransportProtocol) -> Self {
        self.protocol = protocol;
        self
    }

    pub fn with_dnssec_ok(mut self, dnssec_ok: bool) -> Self {
        self.dnssec_ok = dnssec_ok;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn servers(&self) -> &[UpstreamAddr] {
        self.pool.servers()
    }

    pub fn protocol(&self) -> TransportProtocol {
        self.protocol
    }

    pub fn dnssec_ok(&self) -> bool {
        self.dnssec_ok
    }
}

//! Ferrous ACME DNS Domain Layer
pub mod config;
pub mod dns_protocol;
pub mod dns_query;
pub mod dns_record;
pub mod errors;

pub use config::{CliOverrides, Config, ConfigError, DnsConfig, LoggingConfig};
pub use dns_protocol::{TransportProtocol, UpstreamAddr};
pub use dns_query::{fqdn, DnsQuery};
pub use dns_record::{CaaRecord, HostLookup, RecordType, TxtLookup};
pub use errors::DomainError;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Not configured with at least one DNS server")]
    NoServersConfigured,

    #[error("Invalid DNS server address: {0}")]
    InvalidServerAddress(String),

    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("DNS resolution failed for {domain}: {rcode}")]
    ResolutionFailed { domain: String, rcode: &'static str },

    #[error("No {record_type} record in answer for {domain}")]
    MissingRecord {
        domain: String,
        record_type: &'static str,
    },

    #[error("Transport timeout waiting on {server}")]
    TransportTimeout { server: String },

    #[error("Transport connection refused by {server}")]
    TransportConnectionRefused { server: String },

    #[error("Transport connection reset by {server}")]
    TransportConnectionReset { server: String },

    #[error("Transport error talking to {server}: {reason}")]
    TransportNetwork { server: String, reason: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl DomainError {
    /// Timeouts and connection-level failures. These never carry a decoded
    /// response.
    pub fn is_transport_error(&self) -> bool {
        matches!(
            self,
            DomainError::TransportTimeout { .. }
                | DomainError::TransportConnectionRefused { .. }
                | DomainError::TransportConnectionReset { .. }
                | DomainError::TransportNetwork { .. }
        )
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, DomainError::TransportTimeout { .. })
    }

    pub fn is_resolution_failure(&self) -> bool {
        matches!(self, DomainError::ResolutionFailed { .. })
    }

    /// Errors raised before any network attempt is made.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            DomainError::NoServersConfigured
                | DomainError::InvalidServerAddress(_)
                | DomainError::ConfigError(_)
        )
    }

    /// The server address this error refers to, for transport failures.
    pub fn server(&self) -> Option<&str> {
        match self {
            DomainError::TransportTimeout { server }
            | DomainError::TransportConnectionRefused { server }
            | DomainError::TransportConnectionReset { server }
            | DomainError::TransportNetwork { server, .. } => Some(server),
            _ => None,
        }
    }
}

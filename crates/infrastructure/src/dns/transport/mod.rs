pub mod tcp;
pub mod udp;

use async_trait::async_trait;
use ferrous_acme_dns_domain::{DomainError, TransportProtocol, UpstreamAddr};
use std::io;
use std::net::SocketAddr;
use std::time::Duration;

#[derive(Debug)]
pub struct TransportResponse {
    pub bytes: Vec<u8>,

    pub protocol_used: &'static str,
}

/// One query to one server. The whole exchange, including name resolution of
/// the server address, is bounded by `timeout`.
#[async_trait]
pub trait DnsTransport: Send + Sync {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError>;

    fn protocol_name(&self) -> &'static str;
}

pub enum Transport {
    Udp(udp::UdpTransport),
    Tcp(tcp::TcpTransport),
}

impl Transport {
    pub async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        match self {
            Self::Udp(t) => DnsTransport::send(t, message_bytes, timeout).await,
            Self::Tcp(t) => DnsTransport::send(t, message_bytes, timeout).await,
        }
    }

    pub fn protocol_name(&self) -> &'static str {
        match self {
            Self::Udp(_) => "UDP",
            Self::Tcp(_) => "TCP",
        }
    }
}

pub fn create_transport(protocol: TransportProtocol, upstream_addr: UpstreamAddr) -> Transport {
    match protocol {
        TransportProtocol::Udp => Transport::Udp(udp::UdpTransport::new(upstream_addr)),
        TransportProtocol::Tcp => Transport::Tcp(tcp::TcpTransport::new(upstream_addr)),
    }
}

/// Resolves a hostname upstream to its first socket address.
pub(crate) async fn resolve_upstream(upstream_addr: &UpstreamAddr) -> Result<SocketAddr, DomainError> {
    match upstream_addr {
        UpstreamAddr::Resolved(addr) => Ok(*addr),
        UpstreamAddr::Unresolved { hostname, port } => {
            tokio::net::lookup_host((hostname.as_ref(), *port))
                .await
                .map_err(|e| io_error(upstream_addr, e))?
                .next()
                .ok_or_else(|| DomainError::TransportNetwork {
                    server: upstream_addr.to_string(),
                    reason: "hostname resolved to no addresses".to_string(),
                })
        }
    }
}

pub(crate) fn io_error(upstream_addr: &UpstreamAddr, e: io::Error) -> DomainError {
    let server = upstream_addr.to_string();
    match e.kind() {
        io::ErrorKind::ConnectionRefused => DomainError::TransportConnectionRefused { server },
        io::ErrorKind::ConnectionReset | io::ErrorKind::ConnectionAborted => {
            DomainError::TransportConnectionReset { server }
        }
        io::ErrorKind::TimedOut => DomainError::TransportTimeout { server },
        _ => DomainError::TransportNetwork {
            server,
            reason: e.to_string(),
        },
    }
}

pub(crate) fn timeout_error(upstream_addr: &UpstreamAddr) -> DomainError {
    DomainError::TransportTimeout {
        server: upstream_addr.to_string(),
    }
}

/// Transaction ID from the first two bytes of a message.
pub(crate) fn message_id(message_bytes: &[u8]) -> Option<u16> {
    match message_bytes {
        [hi, lo, ..] => Some(u16::from_be_bytes([*hi, *lo])),
        _ => None,
    }
}

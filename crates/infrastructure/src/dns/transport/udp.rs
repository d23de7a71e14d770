//! UDP Transport for DNS queries (RFC 1035 §4.2.1)
//!
//! Messages are sent as-is (no framing) on a fresh socket per exchange. The
//! socket is connected so that datagrams from other sources never reach it
//! and ICMP port-unreachable surfaces as a refused connection.

use super::{io_error, message_id, resolve_upstream, timeout_error, DnsTransport, TransportResponse};
use async_trait::async_trait;
use ferrous_acme_dns_domain::{DomainError, UpstreamAddr};
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::debug;

/// Matches the payload size advertised in the OPT record of every query
const MAX_UDP_RESPONSE_SIZE: usize = 4096;

/// DNS over UDP transport
pub struct UdpTransport {
    upstream_addr: UpstreamAddr,
}

impl UdpTransport {
    pub fn new(upstream_addr: UpstreamAddr) -> Self {
        Self { upstream_addr }
    }

    async fn exchange(&self, message_bytes: &[u8]) -> Result<Vec<u8>, DomainError> {
        let server_addr = resolve_upstream(&self.upstream_addr).await?;

        let bind_addr: SocketAddr = if server_addr.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };

        let socket = UdpSocket::bind(bind_addr)
            .await
            .map_err(|e| io_error(&self.upstream_addr, e))?;
        socket
            .connect(server_addr)
            .await
            .map_err(|e| io_error(&self.upstream_addr, e))?;

        let bytes_sent = socket
            .send(message_bytes)
            .await
            .map_err(|e| io_error(&self.upstream_addr, e))?;

        debug!(server = %server_addr, bytes_sent = bytes_sent, "UDP query sent");

        let expected_id = message_id(message_bytes);
        let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];

        loop {
            let bytes_received = socket
                .recv(&mut recv_buf)
                .await
                .map_err(|e| io_error(&self.upstream_addr, e))?;

            let response_id = message_id(&recv_buf[..bytes_received]);
            if response_id.is_none() || response_id != expected_id {
                debug!(
                    server = %server_addr,
                    expected_id = ?expected_id,
                    response_id = ?response_id,
                    "Dropping UDP datagram with mismatched ID"
                );
                continue;
            }

            debug!(server = %server_addr, bytes_received = bytes_received, "UDP response received");

            recv_buf.truncate(bytes_received);
            return Ok(recv_buf);
        }
    }
}

#[async_trait]
impl DnsTransport for UdpTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        let bytes = tokio::time::timeout(timeout, self.exchange(message_bytes))
            .await
            .map_err(|_| timeout_error(&self.upstream_addr))??;

        Ok(TransportResponse {
            bytes,
            protocol_used: "UDP",
        })
    }

    fn protocol_name(&self) -> &'static str {
        "UDP"
    }
}

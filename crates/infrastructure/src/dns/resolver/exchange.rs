use super::Resolver;
use crate::dns::codec::{DnsResponse, MessageBuilder, ResponseParser};
use crate::dns::transport;
use ferrous_acme_dns_domain::{DnsQuery, DomainError, UpstreamAddr};
use std::time::{Duration, Instant};
use tracing::debug;

/// Outcome of one query sent to one server.
#[derive(Debug, Clone)]
pub struct Exchange {
    pub response: DnsResponse,

    /// Send to decoded response.
    pub rtt: Duration,

    pub server: UpstreamAddr,
}

impl Resolver {
    /// Sends `query` to one randomly chosen server and waits at most the
    /// configured timeout for its answer.
    ///
    /// Fails before any I/O when no servers are configured. Any response that
    /// decodes is returned whatever its RCODE or TC bit; interpreting it is
    /// the caller's job.
    pub async fn exchange_one(&self, query: &DnsQuery) -> Result<Exchange, DomainError> {
        let server = self.pool.pick()?;
        let built = MessageBuilder::build_query(query, self.dnssec_ok)?;
        let dns_transport = transport::create_transport(self.protocol, server.clone());

        debug!(
            server = %server,
            protocol = dns_transport.protocol_name(),
            domain = %query.domain,
            record_type = %query.record_type,
            "Sending DNS query"
        );

        let start = Instant::now();
        let transport_response = dns_transport.send(&built.bytes, self.timeout).await?;
        let response = ResponseParser::parse(&transport_response.bytes)?;
        let rtt = start.elapsed();

        debug!(
            server = %server,
            protocol = transport_response.protocol_used,
            domain = %query.domain,
            rcode = response.rcode_str(),
            rtt_us = rtt.as_micros() as u64,
            "DNS exchange complete"
        );

        Ok(Exchange {
            response,
            rtt,
            server: server.clone(),
        })
    }
}

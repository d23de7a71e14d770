//! DNS Message Builder
//!
//! Turns a [`DnsQuery`] into a wire-format query using `hickory-proto`.

use super::record_type_map::RecordTypeMapper;
use ferrous_acme_dns_domain::{DnsQuery, DomainError};
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{DNSClass, Name};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::str::FromStr;

/// UDP payload size advertised in the EDNS0 OPT record
pub const EDNS_MAX_PAYLOAD: u16 = 4096;

/// DO bit in the high byte of the OPT TTL flags (RFC 3225)
const EDNS_DO_FLAG: u8 = 0x80;

/// An encoded query together with the ID used to match its response
#[derive(Debug, Clone)]
pub struct BuiltQuery {
    pub id: u16,
    pub bytes: Vec<u8>,
}

pub struct MessageBuilder;

impl MessageBuilder {
    /// Build a query message with a random ID and a single question.
    ///
    /// Every query carries an EDNS0 OPT record advertising
    /// [`EDNS_MAX_PAYLOAD`]; `dnssec_ok` sets its DO bit so that validating
    /// upstreams fail closed on broken chains instead of answering.
    pub fn build_query(query: &DnsQuery, dnssec_ok: bool) -> Result<BuiltQuery, DomainError> {
        let name = Name::from_str(&query.domain).map_err(|e| {
            DomainError::InvalidDomainName(format!("Invalid domain '{}': {}", query.domain, e))
        })?;

        let mut question = Query::new();
        question.set_name(name);
        question.set_query_type(RecordTypeMapper::to_hickory(&query.record_type));
        question.set_query_class(DNSClass::IN);

        let id = fastrand::u16(..);

        let mut message = Message::new(id, MessageType::Query, OpCode::Query);
        message.set_recursion_desired(query.recursion_desired);
        message.add_query(question);

        let mut bytes = Self::serialize_message(&message)?;
        Self::append_opt_record(&mut bytes, dnssec_ok);
        Ok(BuiltQuery { id, bytes })
    }

    /// Appends an EDNS0 OPT pseudo-record (RFC 6891 §6.1.2) and bumps ARCOUNT.
    ///
    /// The message must not already carry one.
    fn append_opt_record(buf: &mut Vec<u8>, dnssec_ok: bool) {
        let [payload_hi, payload_lo] = EDNS_MAX_PAYLOAD.to_be_bytes();
        let do_flag = if dnssec_ok { EDNS_DO_FLAG } else { 0x00 };

        buf.extend_from_slice(&[
            0x00, // root name
            0x00, 0x29, // TYPE = OPT
            payload_hi, payload_lo, // CLASS = UDP payload size
            0x00, // extended RCODE
            0x00, // version
            do_flag, 0x00, // flags
            0x00, 0x00, // RDLENGTH
        ]);

        let arcount = u16::from_be_bytes([buf[10], buf[11]]).saturating_add(1);
        buf[10..12].copy_from_slice(&arcount.to_be_bytes());
    }

    fn serialize_message(message: &Message) -> Result<Vec<u8>, DomainError> {
        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);

        message.emit(&mut encoder).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to serialize DNS message: {}", e))
        })?;

        Ok(buf)
    }
}

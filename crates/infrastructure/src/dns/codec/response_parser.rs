use super::rdata;
use ferrous_acme_dns_domain::{CaaRecord, DomainError};
use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::{RData, Record};
use std::net::IpAddr;
use tracing::debug;

/// A decoded upstream response. Produced by one exchange and consumed by the
/// lookup that asked for it.
#[derive(Debug, Clone)]
pub struct DnsResponse {
    pub rcode: ResponseCode,

    pub truncated: bool,

    pub message: Message,
}

impl DnsResponse {
    pub fn answers(&self) -> &[Record] {
        self.message.answers()
    }

    pub fn is_success(&self) -> bool {
        self.rcode == ResponseCode::NoError
    }

    pub fn is_server_error(&self) -> bool {
        matches!(
            self.rcode,
            ResponseCode::ServFail | ResponseCode::Refused | ResponseCode::NotImp
        )
    }

    pub fn rcode_str(&self) -> &'static str {
        ResponseParser::rcode_to_status(self.rcode)
    }

    /// Every character-string of every TXT record, in answer order, decoded
    /// as lossy UTF-8.
    pub fn txt_values(&self) -> Vec<String> {
        self.answers()
            .iter()
            .filter_map(|record| match record.data() {
                RData::TXT(txt) => Some(txt.txt_data()),
                _ => None,
            })
            .flatten()
            .map(|data| String::from_utf8_lossy(data).into_owned())
            .collect()
    }

    /// Target of the first CNAME record, fully-qualified.
    pub fn first_cname(&self) -> Option<String> {
        self.answers().iter().find_map(|record| match record.data() {
            RData::CNAME(canonical) => Some(canonical.to_utf8()),
            _ => None,
        })
    }

    pub fn caa_records(&self) -> Result<Vec<CaaRecord>, DomainError> {
        let mut records = Vec::new();
        for record in self.answers() {
            if let RData::CAA(_) = record.data() {
                let bytes = rdata::rdata_bytes(record.data())?;
                records.push(rdata::decode_caa(&bytes)?);
            }
        }
        Ok(records)
    }

    pub fn addresses(&self) -> Vec<IpAddr> {
        self.answers()
            .iter()
            .filter_map(|record| match record.data() {
                RData::A(a) => Some(IpAddr::V4(a.0)),
                _ => None,
            })
            .collect()
    }
}

pub struct ResponseParser;

impl ResponseParser {
    pub fn parse(response_bytes: &[u8]) -> Result<DnsResponse, DomainError> {
        let message = Message::from_vec(response_bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to parse DNS response: {}", e))
        })?;

        let rcode = message.response_code();
        let truncated = message.truncated();

        debug!(
            rcode = ?rcode,
            answers = message.answers().len(),
            truncated = truncated,
            "DNS response parsed"
        );

        Ok(DnsResponse {
            rcode,
            truncated,
            message,
        })
    }

    pub fn rcode_to_status(rcode: ResponseCode) -> &'static str {
        match rcode {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::NXDomain => "NXDOMAIN",
            ResponseCode::ServFail => "SERVFAIL",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::NotImp => "NOTIMP",
            ResponseCode::FormErr => "FORMERR",
            ResponseCode::NXRRSet => "NXRRSET",
            ResponseCode::YXDomain => "YXDOMAIN",
            ResponseCode::YXRRSet => "YXRRSET",
            ResponseCode::NotAuth => "NOTAUTH",
            ResponseCode::NotZone => "NOTZONE",
            _ => "UNKNOWN",
        }
    }
}

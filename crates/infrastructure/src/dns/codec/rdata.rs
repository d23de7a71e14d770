//! Decoding of CAA record data into domain values.
//!
//! `hickory-proto` decodes the message; CAA data is re-emitted in wire form
//! and read here so tag and value reach the caller byte-for-byte.

use ferrous_acme_dns_domain::{CaaRecord, DomainError};
use hickory_proto::rr::RData;
use hickory_proto::serialize::binary::BinEncodable;

pub fn rdata_bytes(rdata: &RData) -> Result<Vec<u8>, DomainError> {
    rdata.to_bytes().map_err(|e| {
        DomainError::InvalidDnsResponse(format!("Failed to encode record data: {}", e))
    })
}

/// Reads CAA RDATA: flags, tag length, tag, value (RFC 8659 §4.1).
pub fn decode_caa(bytes: &[u8]) -> Result<CaaRecord, DomainError> {
    let [flags, tag_len, rest @ ..] = bytes else {
        return Err(DomainError::InvalidDnsResponse(
            "CAA record data shorter than two bytes".to_string(),
        ));
    };

    let tag_len = *tag_len as usize;
    if tag_len == 0 || tag_len > rest.len() {
        return Err(DomainError::InvalidDnsResponse(format!(
            "CAA tag length {} invalid for {} bytes of data",
            tag_len,
            rest.len()
        )));
    }

    let (tag, value) = rest.split_at(tag_len);
    Ok(CaaRecord::new(
        *flags,
        String::from_utf8_lossy(tag).into_owned(),
        value.to_vec(),
    ))
}

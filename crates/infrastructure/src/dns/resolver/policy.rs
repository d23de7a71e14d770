use crate::dns::codec::DnsResponse;
use ferrous_acme_dns_domain::DomainError;
use hickory_proto::op::ResponseCode;

/// How a lookup treats the upstream response code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseCodePolicy {
    /// Only NOERROR passes. Anything else is [`DomainError::ResolutionFailed`],
    /// including NXDOMAIN and the SERVFAIL a validating upstream returns for
    /// a name whose DNSSEC chain is broken. Truncated answers are rejected.
    Strict,

    /// Every response code passes and the answer section is used as-is, even
    /// when truncated. A DNSSEC validation failure upstream is
    /// indistinguishable from an empty answer.
    AcceptValidationFailure,
}

pub const TXT_POLICY: ResponseCodePolicy = ResponseCodePolicy::Strict;
pub const CNAME_POLICY: ResponseCodePolicy = ResponseCodePolicy::Strict;
pub const HOST_POLICY: ResponseCodePolicy = ResponseCodePolicy::Strict;

/// CAA lookups currently read a validation failure as "no CAA policy".
pub const CAA_POLICY: ResponseCodePolicy = ResponseCodePolicy::AcceptValidationFailure;

impl ResponseCodePolicy {
    /// Whether a response with the TC bit set fails the lookup.
    pub fn rejects_truncated(self) -> bool {
        matches!(self, ResponseCodePolicy::Strict)
    }

    pub fn check(self, domain: &str, response: &DnsResponse) -> Result<(), DomainError> {
        match self {
            ResponseCodePolicy::AcceptValidationFailure => Ok(()),
            ResponseCodePolicy::Strict => match response.rcode {
                ResponseCode::NoError => Ok(()),
                _ => Err(DomainError::ResolutionFailed {
                    domain: domain.to_string(),
                    rcode: response.rcode_str(),
                }),
            },
        }
    }
}

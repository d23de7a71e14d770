use super::exchange::Exchange;
use super::policy::{ResponseCodePolicy, CAA_POLICY, CNAME_POLICY, HOST_POLICY, TXT_POLICY};
use super::Resolver;
use ferrous_acme_dns_domain::{
    fqdn, CaaRecord, DnsQuery, DomainError, HostLookup, RecordType, TxtLookup,
};
use tracing::debug;

impl Resolver {
    /// TXT strings for `name`, in answer order, with the exchange RTT.
    ///
    /// Any RCODE other than NOERROR is an error, so a name an upstream
    /// refuses to validate never yields a challenge token.
    pub async fn lookup_txt(&self, name: &str) -> Result<TxtLookup, DomainError> {
        let exchange = self.lookup(name, RecordType::TXT, TXT_POLICY).await?;

        Ok(TxtLookup {
            values: exchange.response.txt_values(),
            rtt: exchange.rtt,
        })
    }

    /// Canonical target of `name`. A response without a CNAME record is a
    /// [`DomainError::MissingRecord`], not "no alias".
    pub async fn lookup_cname(&self, name: &str) -> Result<String, DomainError> {
        let exchange = self.lookup(name, RecordType::CNAME, CNAME_POLICY).await?;

        exchange
            .response
            .first_cname()
            .ok_or_else(|| DomainError::MissingRecord {
                domain: fqdn(name),
                record_type: RecordType::CNAME.as_str(),
            })
    }

    /// CAA records for `name`. An empty list means no policy is published.
    ///
    /// Only transport failures are errors. Neither the response code nor the
    /// TC bit is inspected: a SERVFAIL from a validating upstream yields
    /// whatever records the answer holds, normally none. `strict` does not
    /// change this yet.
    pub async fn lookup_caa(&self, name: &str, strict: bool) -> Result<Vec<CaaRecord>, DomainError> {
        // TODO: use ResponseCodePolicy::Strict when `strict` is set, once CAA
        // checking can fail closed on validation errors.
        debug!(domain = %name, strict = strict, "CAA lookup");

        let exchange = self.lookup(name, RecordType::CAA, CAA_POLICY).await?;
        exchange.response.caa_records()
    }

    /// IPv4 addresses from the A records of `name`.
    pub async fn lookup_host(&self, name: &str) -> Result<HostLookup, DomainError> {
        let exchange = self.lookup(name, RecordType::A, HOST_POLICY).await?;

        Ok(HostLookup {
            addresses: exchange.response.addresses(),
            rtt: exchange.rtt,
        })
    }

    async fn lookup(
        &self,
        name: &str,
        record_type: RecordType,
        policy: ResponseCodePolicy,
    ) -> Result<Exchange, DomainError> {
        let query = DnsQuery::new(name, record_type);
        let exchange = self.exchange_one(&query).await?;

        if exchange.response.truncated && policy.rejects_truncated() {
            return Err(DomainError::InvalidDnsResponse(format!(
                "Truncated {} response for {} from {}",
                record_type, query.domain, exchange.server
            )));
        }

        policy.check(&query.domain, &exchange.response)?;
        Ok(exchange)
    }
}

use ferrous_acme_dns_domain::{DomainError, UpstreamAddr};
use std::sync::Arc;

/// Immutable list of upstream servers with a stateless uniform choice per call.
#[derive(Debug, Clone)]
pub struct ServerPool {
    servers: Arc<[UpstreamAddr]>,
}

impl ServerPool {
    pub fn new(servers: Vec<UpstreamAddr>) -> Self {
        Self {
            servers: servers.into(),
        }
    }

    pub fn servers(&self) -> &[UpstreamAddr] {
        &self.servers
    }

    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }

    pub fn pick(&self) -> Result<&UpstreamAddr, DomainError> {
        self.pick_with(&mut fastrand::Rng::new())
    }

    pub fn pick_with(&self, rng: &mut fastrand::Rng) -> Result<&UpstreamAddr, DomainError> {
        if self.is_empty() {
            return Err(DomainError::NoServersConfigured);
        }
        Ok(&self.servers[rng.usize(..self.servers.len())])
    }
}

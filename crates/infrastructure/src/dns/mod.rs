pub mod codec;
pub mod resolver;
pub mod transport;

pub use codec::{DnsResponse, MessageBuilder, ResponseParser};
pub use resolver::{Exchange, Resolver, ResponseCodePolicy};
pub use transport::{DnsTransport, Transport, TransportResponse};

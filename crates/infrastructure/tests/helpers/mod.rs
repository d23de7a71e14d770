pub mod dns_server_mock;

#[allow(unused_imports)]
pub use builders::ResolverBuilder;
#[allow(unused_imports)]
pub use dns_server_mock::{MockDnsServer, MockRecord, MockReply, MockZone};

pub mod caa;
pub mod lookup;
pub mod record_type;

pub use caa::CaaRecord;
pub use lookup::{HostLookup, TxtLookup};
pub use record_type::RecordType;

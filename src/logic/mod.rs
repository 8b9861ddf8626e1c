// Pure domain logic. Everything in here takes records, role context and
// reference dates as plain parameters and performs no I/O.

pub mod bulk;
pub mod dates;
pub mod enrich;
pub mod report;
pub mod scope;
pub mod stats;

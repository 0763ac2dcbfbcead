//! Principal records and placeholders.

mod pending;
mod record;

pub use pending::PendingEntry;
pub use record::PrincipalRecord;

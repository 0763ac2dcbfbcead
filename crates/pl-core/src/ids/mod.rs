//! ID type wrappers for type safety.

pub mod principal_identifier;
pub mod user_id;

pub use principal_identifier::{IdentifierError, PrincipalIdentifier, PrincipalKind};
pub use user_id::UserId;

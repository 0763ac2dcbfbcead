//! Port interfaces for the application layer
//!
//! Ports define the contract between the reconciliation logic (use cases)
//! and the collaborators around the field: the remote lookup endpoint, the
//! externally owned favorite set, the process-wide error surface and the
//! surrounding form.

pub mod errors;
mod error_surface;
mod favorites;
mod field_events;
pub mod principal_lookup;

pub use error_surface::ErrorSurfacePort;
pub use errors::{FavoriteError, LookupError};
pub use favorites::FavoriteUsersPort;
pub use field_events::FieldEventsPort;
pub use principal_lookup::{LookupRequest, LookupResponse, PrincipalLookupPort};

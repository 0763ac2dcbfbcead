//! # pl-core
//!
//! Core domain models for the principal list field.
//!
//! This crate contains pure domain logic without any infrastructure dependencies:
//! identifiers, resolved records, the resolved cache, the view builder and the
//! ports the application layer talks to.

pub mod cache;
pub mod config;
pub mod ids;
pub mod ports;
pub mod principal;
pub mod view;

// Re-export commonly used types at the crate root
pub use cache::ResolvedCache;
pub use config::FieldSettings;
pub use ids::{PrincipalIdentifier, PrincipalKind, UserId};
pub use principal::{PendingEntry, PrincipalRecord};
pub use view::{PrincipalListView, PrincipalRow};

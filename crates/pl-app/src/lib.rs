//! Principal list orchestration layer
//!
//! This crate contains the reconciliation use case, the list mutations and
//! the field that owns the edited identifier list and the resolved cache.

pub mod deps;
pub mod field;
pub mod usecases;

#[cfg(test)]
pub(crate) mod test_support;

pub use deps::FieldDeps;
pub use field::{FieldProps, FieldRender, FieldRow, PrincipalListField, SearchProps};
pub use usecases::{ReconcileOutcome, ReconcilePrincipals};

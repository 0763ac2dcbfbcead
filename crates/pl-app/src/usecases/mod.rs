//! Business logic use cases
//!
//! ```text
//! add_items / delete / set_value
//!         ↓
//! value or cache changed  ──> new generation (previous lookup cancelled)
//!         ↓
//! ReconcilePrincipals      ──> one batched lookup for everything missing
//!         ↓
//! merge into cache (only if the generation was not superseded)
//! ```

pub mod add_principals;
pub mod delete_principal;
pub mod reconcile_principals;
pub mod toggle_favorite_user;

mod touch;

pub use add_principals::AddPrincipals;
pub use delete_principal::DeletePrincipal;
pub use reconcile_principals::{ReconcileOutcome, ReconcilePrincipals};
pub use toggle_favorite_user::{FavoriteToggle, ToggleFavoriteUser};

//! View builder: derives the ordered render sequences from `(value, cache)`.
//!
//! ```text
//! value ──┬── in cache ──> entries  (groups first, then name, case-insensitive)
//!         └── not cached ─> pending (groups first, then identifier, case-insensitive)
//!
//! render order: entries ++ pending  (never one global sort)
//! ```

mod builder;


pub use builder::{build_view, PrincipalListView, PrincipalRow, EMPTY_LIST_LABEL};

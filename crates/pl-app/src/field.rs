//! Principal list field
//!
//! Owns the edited identifier list (`value`) and the resolved cache, and keeps
//! at most one lookup in flight.
//!
//! # Generations
//!
//! ```text
//! value/cache change ──> cancel previous lookup ──> plan ──> spawn lookup (maybe)
//!                                                              │
//! settle() <───────────── outcome (discarded if cancelled) <───┘
//! ```
//!
//! Every change to `value` or to the cache starts a new generation. Starting
//! one cancels the lookup of the previous generation, so a slow answer can
//! never overwrite data written after it was requested. A lookup that already
//! finished when the next change arrives is not stale: its answer is merged
//! before the change is applied. A failed lookup does not start a new
//! generation: the affected identifiers stay pending until something else
//! changes.
//!
//! The field must be created and mutated from within a Tokio runtime.

use std::sync::Arc;

use futures::FutureExt;
use pl_core::cache::ResolvedCache;
use pl_core::ids::{PrincipalIdentifier, PrincipalKind};
use pl_core::ports::{FavoriteError, FavoriteUsersPort, LookupError};
use pl_core::principal::{PendingEntry, PrincipalRecord};
use pl_core::view::{build_view, PrincipalListView, PrincipalRow, EMPTY_LIST_LABEL};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

use crate::deps::FieldDeps;
use crate::usecases::{
    AddPrincipals, DeletePrincipal, FavoriteToggle, ReconcileOutcome, ReconcilePrincipals,
    ToggleFavoriteUser,
};

/// Inputs the surrounding form hands to the field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldProps {
    pub value: Vec<PrincipalIdentifier>,
    pub disabled: bool,
    pub with_groups: bool,
}

/// Props handed to a search collaborator.
#[derive(Clone)]
pub struct SearchProps {
    pub kind: PrincipalKind,
    /// Already chosen identifiers, to be excluded from the results
    pub existing: Vec<PrincipalIdentifier>,
    pub disabled: bool,
    /// Only the user search sees the favorite set
    pub favorites: Option<Arc<dyn FavoriteUsersPort>>,
}

/// One row ready for presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldRow {
    Resolved {
        record: PrincipalRecord,
        /// `None` means the row has no favorite control (groups)
        favorite: Option<bool>,
        /// Whether delete / favorite actions react
        actions_enabled: bool,
    },
    Pending {
        entry: PendingEntry,
        label: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldRender {
    Empty { label: &'static str },
    Rows(Vec<FieldRow>),
}

struct InFlightLookup {
    generation: u64,
    cancel: CancellationToken,
    handle: JoinHandle<ReconcileOutcome>,
}

pub struct PrincipalListField {
    value: Vec<PrincipalIdentifier>,
    cache: ResolvedCache,
    disabled: bool,
    with_groups: bool,
    favorites: Arc<dyn FavoriteUsersPort>,
    reconcile: ReconcilePrincipals,
    add_principals: AddPrincipals,
    delete_principal: DeletePrincipal,
    toggle_favorite: ToggleFavoriteUser,
    generation: u64,
    in_flight: Option<InFlightLookup>,
}

impl PrincipalListField {
    /// Build the field and run the first reconciliation for `props.value`.
    pub fn new(props: FieldProps, deps: FieldDeps) -> Self {
        let mut field = Self {
            value: props.value,
            cache: ResolvedCache::new(),
            disabled: props.disabled,
            with_groups: props.with_groups,
            favorites: deps.favorites.clone(),
            reconcile: ReconcilePrincipals::from_ports(deps.lookup, deps.error_surface),
            add_principals: AddPrincipals::from_ports(deps.events.clone()),
            delete_principal: DeletePrincipal::from_ports(deps.events),
            toggle_favorite: ToggleFavoriteUser::from_ports(deps.favorites),
            generation: 0,
            in_flight: None,
        };
        field.begin_generation();
        field
    }

    pub fn value(&self) -> &[PrincipalIdentifier] {
        &self.value
    }

    pub fn cache(&self) -> &ResolvedCache {
        &self.cache
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Number of reconciliation generations started so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn has_pending_lookup(&self) -> bool {
        self.in_flight.is_some()
    }

    /// The form changed `value` from the outside.
    pub fn set_value(&mut self, value: Vec<PrincipalIdentifier>) {
        if value == self.value {
            return;
        }
        self.value = value;
        self.begin_generation();
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Remove every occurrence of `identifier`. Ignored while disabled.
    pub fn delete(&mut self, identifier: &PrincipalIdentifier) -> bool {
        if self.disabled {
            debug!(identifier = %identifier, "Field disabled, ignoring delete");
            return false;
        }
        self.value = self.delete_principal.execute(&self.value, identifier);
        self.begin_generation();
        true
    }

    /// Append records chosen through a search collaborator.
    pub fn add_items(&mut self, records: Vec<PrincipalRecord>) {
        // the chosen records are newer than any answer already received
        self.collect_finished();
        let (value, cache) = self.add_principals.execute(&self.value, &self.cache, records);
        self.value = value;
        self.cache = cache;
        self.begin_generation();
    }

    /// Toggle the favorite state of a resolved user row.
    ///
    /// Returns `Ok(None)` when nothing was called: field disabled, identifier
    /// not resolved, or the row has no favorite control.
    pub async fn toggle_favorite(
        &self,
        identifier: &PrincipalIdentifier,
    ) -> Result<Option<FavoriteToggle>, FavoriteError> {
        if self.disabled {
            return Ok(None);
        }
        if !self.value.contains(identifier) {
            return Ok(None);
        }
        match self.cache.get(identifier) {
            Some(record) => self.toggle_favorite.execute(record).await,
            None => Ok(None),
        }
    }

    /// Wait for the in-flight lookup (if any) and apply its outcome.
    ///
    /// A successful answer replaces the cache, which starts a new generation;
    /// a failure leaves everything as it was.
    pub async fn settle(&mut self) -> Option<ReconcileOutcome> {
        let in_flight = self.in_flight.take()?;
        let outcome = match in_flight.handle.await {
            Ok(outcome) => outcome,
            Err(join_err) => {
                error!(
                    generation = in_flight.generation,
                    error = %join_err,
                    "Lookup task did not complete"
                );
                ReconcileOutcome::Failed(LookupError::Transport(join_err.to_string()))
            }
        };

        if let Some(next) = ReconcilePrincipals::apply(&self.cache, &outcome, &in_flight.cancel) {
            self.cache = next;
            self.begin_generation();
        }
        Some(outcome)
    }

    pub fn view(&self) -> PrincipalListView {
        build_view(&self.value, &self.cache)
    }

    pub fn render(&self) -> FieldRender {
        let view = self.view();
        if view.is_empty() {
            return FieldRender::Empty {
                label: EMPTY_LIST_LABEL,
            };
        }

        let rows = view
            .rows()
            .into_iter()
            .map(|row| match row {
                PrincipalRow::Resolved(record) => FieldRow::Resolved {
                    favorite: self.toggle_favorite.state(&record),
                    record,
                    actions_enabled: !self.disabled,
                },
                PrincipalRow::Pending(entry) => FieldRow::Pending {
                    label: entry.placeholder_label(),
                    entry,
                },
            })
            .collect();
        FieldRender::Rows(rows)
    }

    pub fn user_search(&self) -> SearchProps {
        SearchProps {
            kind: PrincipalKind::User,
            existing: self.value.clone(),
            disabled: self.disabled,
            favorites: Some(self.favorites.clone()),
        }
    }

    /// `None` unless the field offers group selection.
    pub fn group_search(&self) -> Option<SearchProps> {
        self.with_groups.then(|| SearchProps {
            kind: PrincipalKind::Group,
            existing: self.value.clone(),
            disabled: self.disabled,
            favorites: None,
        })
    }

    /// Merge the answer of a lookup that completed before the current change.
    fn collect_finished(&mut self) {
        let finished = self
            .in_flight
            .as_ref()
            .is_some_and(|in_flight| in_flight.handle.is_finished());
        if !finished {
            return;
        }
        let Some(mut in_flight) = self.in_flight.take() else {
            return;
        };
        let outcome = match (&mut in_flight.handle).now_or_never() {
            Some(Ok(outcome)) => outcome,
            Some(Err(join_err)) => {
                error!(
                    generation = in_flight.generation,
                    error = %join_err,
                    "Lookup task did not complete"
                );
                return;
            }
            None => return,
        };
        if let Some(next) = ReconcilePrincipals::apply(&self.cache, &outcome, &in_flight.cancel) {
            debug!(
                generation = in_flight.generation,
                "Merged lookup that finished before the change"
            );
            self.cache = next;
        }
    }

    fn begin_generation(&mut self) {
        self.generation += 1;
        self.collect_finished();

        if let Some(previous) = self.in_flight.take() {
            previous.cancel.cancel();
            debug!(
                superseded = previous.generation,
                generation = self.generation,
                "Cancelled lookup of superseded generation"
            );
        }

        let Some(request) = ReconcilePrincipals::plan(&self.value, &self.cache) else {
            return;
        };

        debug!(
            generation = self.generation,
            missing = request.identifiers.len(),
            "Starting principal lookup"
        );
        let cancel = CancellationToken::new();
        let reconcile = self.reconcile.clone();
        let token = cancel.clone();
        let handle = tokio::spawn(async move { reconcile.execute(request, token).await });

        self.in_flight = Some(InFlightLookup {
            generation: self.generation,
            cancel,
            handle,
        });
    }
}

impl Drop for PrincipalListField {
    fn drop(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            in_flight.cancel.cancel();
        }
    }
}

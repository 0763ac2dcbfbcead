use std::sync::Arc;

use pl_core::cache::ResolvedCache;
use pl_core::ids::PrincipalIdentifier;
use pl_core::ports::FieldEventsPort;
use pl_core::principal::PrincipalRecord;
use tracing::info;

use super::touch::mark_touched;

/// Use case appending principals chosen through a search collaborator.
pub struct AddPrincipals {
    events: Arc<dyn FieldEventsPort>,
}

impl AddPrincipals {
    pub fn from_ports(events: Arc<dyn FieldEventsPort>) -> Self {
        Self { events }
    }

    /// Seed the cache with `records`, then append their identifiers to `value`.
    ///
    /// The caller already holds the metadata, so seeding first keeps the new
    /// identifiers out of the next lookup. Identifiers already present are
    /// appended again (no deduplication).
    ///
    /// Returns the new `(value, cache)` pair.
    #[tracing::instrument(
        name = "usecase.add_principals.execute",
        skip_all,
        fields(count = records.len())
    )]
    pub fn execute(
        &self,
        value: &[PrincipalIdentifier],
        cache: &ResolvedCache,
        records: Vec<PrincipalRecord>,
    ) -> (Vec<PrincipalIdentifier>, ResolvedCache) {
        let added: Vec<PrincipalIdentifier> =
            records.iter().map(|record| record.identifier.clone()).collect();
        let next_cache = cache.merged_records(records);

        let mut next = Vec::with_capacity(value.len() + added.len());
        next.extend_from_slice(value);
        next.extend(added);

        info!(size = next.len(), "Appended principals to list");

        self.events.on_change(&next);
        mark_touched(self.events.as_ref());
        (next, next_cache)
    }
}

//! Resolved cache: identifier -> last known record.
//!
//! The cache is an immutable snapshot. Every update produces a new snapshot
//! (prior entries merged with the new batch, new entries win) and bumps the
//! version; nothing is ever evicted.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::ids::PrincipalIdentifier;
use crate::principal::PrincipalRecord;

#[derive(Debug, Clone, Default)]
pub struct ResolvedCache {
    entries: Arc<HashMap<PrincipalIdentifier, PrincipalRecord>>,
    version: u64,
}

impl ResolvedCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot version; increases by one with every non-empty merge.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, identifier: &PrincipalIdentifier) -> Option<&PrincipalRecord> {
        self.entries.get(identifier)
    }

    pub fn contains(&self, identifier: &PrincipalIdentifier) -> bool {
        self.entries.contains_key(identifier)
    }

    /// Produce the next snapshot with `batch` merged over the current entries.
    ///
    /// An empty batch returns the same snapshot unchanged (same version), so
    /// callers never observe a change that carries no data.
    pub fn merged<I>(&self, batch: I) -> ResolvedCache
    where
        I: IntoIterator<Item = (PrincipalIdentifier, PrincipalRecord)>,
    {
        let mut batch = batch.into_iter().peekable();
        if batch.peek().is_none() {
            return self.clone();
        }

        let mut next = HashMap::clone(&self.entries);
        next.extend(batch);

        #[cfg(feature = "tracing")]
        tracing::trace!(
            version = self.version + 1,
            entries = next.len(),
            "resolved cache snapshot replaced"
        );

        ResolvedCache {
            entries: Arc::new(next),
            version: self.version + 1,
        }
    }

    /// Merge records keyed by their own identifier.
    pub fn merged_records<I>(&self, records: I) -> ResolvedCache
    where
        I: IntoIterator<Item = PrincipalRecord>,
    {
        self.merged(
            records
                .into_iter()
                .map(|record| (record.identifier.clone(), record)),
        )
    }

    /// Distinct identifiers of `value` without a cache entry, first occurrence order.
    pub fn missing(&self, value: &[PrincipalIdentifier]) -> Vec<PrincipalIdentifier> {
        let mut seen = HashSet::new();
        value
            .iter()
            .filter(|id| !self.contains(id))
            .filter(|id| seen.insert(*id))
            .cloned()
            .collect()
    }
}

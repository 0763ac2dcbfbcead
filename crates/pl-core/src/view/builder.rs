use serde::Serialize;

use crate::cache::ResolvedCache;
use crate::ids::PrincipalIdentifier;
use crate::principal::{PendingEntry, PrincipalRecord};

pub const EMPTY_LIST_LABEL: &str = "This list is currently empty";

/// What the list shows for the current identifier list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PrincipalListView {
    /// The identifier list itself is empty.
    Empty,
    Populated {
        entries: Vec<PrincipalRecord>,
        pending: Vec<PendingEntry>,
    },
}

/// One rendered row, in final display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PrincipalRow {
    Resolved(PrincipalRecord),
    Pending(PendingEntry),
}

impl PrincipalRow {
    pub fn identifier(&self) -> &PrincipalIdentifier {
        match self {
            PrincipalRow::Resolved(record) => &record.identifier,
            PrincipalRow::Pending(pending) => &pending.identifier,
        }
    }

    pub fn is_group(&self) -> bool {
        match self {
            PrincipalRow::Resolved(record) => record.is_group,
            PrincipalRow::Pending(pending) => pending.is_group,
        }
    }
}

impl PrincipalListView {
    pub fn is_empty(&self) -> bool {
        matches!(self, PrincipalListView::Empty)
    }

    pub fn entries(&self) -> &[PrincipalRecord] {
        match self {
            PrincipalListView::Empty => &[],
            PrincipalListView::Populated { entries, .. } => entries,
        }
    }

    pub fn pending(&self) -> &[PendingEntry] {
        match self {
            PrincipalListView::Empty => &[],
            PrincipalListView::Populated { pending, .. } => pending,
        }
    }

    /// Rows in display order: every resolved entry, then every placeholder.
    pub fn rows(&self) -> Vec<PrincipalRow> {
        self.entries()
            .iter()
            .cloned()
            .map(PrincipalRow::Resolved)
            .chain(self.pending().iter().cloned().map(PrincipalRow::Pending))
            .collect()
    }
}

fn group_rank(is_group: bool) -> u8 {
    if is_group {
        0
    } else {
        1
    }
}

/// Build the view for `value` against `cache`.
///
/// Duplicate identifiers in `value` are not collapsed; each occurrence yields
/// its own row.
pub fn build_view(value: &[PrincipalIdentifier], cache: &ResolvedCache) -> PrincipalListView {
    if value.is_empty() {
        return PrincipalListView::Empty;
    }

    let mut entries: Vec<PrincipalRecord> = value
        .iter()
        .filter_map(|id| cache.get(id).cloned())
        .collect();
    // stable sort: equal keys keep list order
    entries.sort_by_cached_key(|record| (group_rank(record.is_group), record.name.to_lowercase()));

    let mut pending: Vec<PendingEntry> = value
        .iter()
        .filter(|id| !cache.contains(id))
        .map(PendingEntry::from_identifier)
        .collect();
    pending.sort_by_cached_key(|entry| {
        (
            group_rank(entry.is_group),
            entry.identifier.as_str().to_lowercase(),
        )
    });

    PrincipalListView::Populated { entries, pending }
}

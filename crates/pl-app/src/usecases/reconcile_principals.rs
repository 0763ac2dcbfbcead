use std::sync::Arc;

use pl_core::cache::ResolvedCache;
use pl_core::ids::PrincipalIdentifier;
use pl_core::ports::{
    ErrorSurfacePort, LookupError, LookupRequest, LookupResponse, PrincipalLookupPort,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Result of one reconciliation cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// Every identifier already had a cache entry; no lookup was issued.
    UpToDate,
    /// The lookup answered before being superseded.
    Resolved(LookupResponse),
    /// The lookup failed and the failure was reported.
    Failed(LookupError),
    /// A newer generation superseded this one; the result was discarded.
    Cancelled,
}

/// Use case resolving display metadata for identifiers missing from the cache.
///
/// One call to [`execute`](Self::execute) is one generation: it issues at
/// most one batched lookup and never touches the cache itself. Applying the
/// answer is a separate step ([`apply`](Self::apply)) that refuses anything
/// coming from a cancelled generation.
#[derive(Clone)]
pub struct ReconcilePrincipals {
    lookup: Arc<dyn PrincipalLookupPort>,
    error_surface: Arc<dyn ErrorSurfacePort>,
}

impl ReconcilePrincipals {
    pub fn from_ports(
        lookup: Arc<dyn PrincipalLookupPort>,
        error_surface: Arc<dyn ErrorSurfacePort>,
    ) -> Self {
        Self {
            lookup,
            error_surface,
        }
    }

    /// The lookup request for `value` against `cache`, or `None` when nothing is missing.
    pub fn plan(value: &[PrincipalIdentifier], cache: &ResolvedCache) -> Option<LookupRequest> {
        let missing = cache.missing(value);
        if missing.is_empty() {
            return None;
        }
        Some(LookupRequest {
            identifiers: missing,
        })
    }

    /// Run one batched lookup, racing it against `cancel`.
    ///
    /// Failures are reported to the error surface exactly once; cancellations
    /// are never reported.
    #[tracing::instrument(
        name = "usecase.reconcile_principals.execute",
        skip(self, request, cancel),
        fields(missing = request.identifiers.len())
    )]
    pub async fn execute(&self, request: LookupRequest, cancel: CancellationToken) -> ReconcileOutcome {
        if cancel.is_cancelled() {
            return ReconcileOutcome::Cancelled;
        }

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("Lookup superseded before completion, discarding");
                return ReconcileOutcome::Cancelled;
            }
            result = self.lookup.lookup(request) => result,
        };

        // the answer may land in the same poll as the cancellation
        if cancel.is_cancelled() {
            debug!("Lookup answered after being superseded, discarding");
            return ReconcileOutcome::Cancelled;
        }

        match result {
            Ok(response) => {
                info!(resolved = response.len(), "Principal lookup completed");
                ReconcileOutcome::Resolved(response)
            }
            Err(err) => {
                warn!(error = %err, "Principal lookup failed");
                self.error_surface.report_lookup_failure(&err);
                ReconcileOutcome::Failed(err)
            }
        }
    }

    /// Merge a resolved outcome into `cache` unless its generation was cancelled.
    ///
    /// Returns the next snapshot only when the cache actually changed.
    pub fn apply(
        cache: &ResolvedCache,
        outcome: &ReconcileOutcome,
        cancel: &CancellationToken,
    ) -> Option<ResolvedCache> {
        if cancel.is_cancelled() {
            return None;
        }
        match outcome {
            ReconcileOutcome::Resolved(response) => {
                let next = cache.merged(response.clone());
                (next.version() != cache.version()).then_some(next)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{response, MockErrorSurface, ScriptedLookup};
    use pl_core::principal::PrincipalRecord;

    fn id(s: &str) -> PrincipalIdentifier {
        PrincipalIdentifier::from(s)
    }

    fn silent_surface() -> Arc<MockErrorSurface> {
        let mut surface = MockErrorSurface::new();
        surface.expect_report_lookup_failure().never();
        Arc::new(surface)
    }

    #[test]
    fn test_plan_none_when_everything_cached() {
        let cache = ResolvedCache::new().merged_records(vec![PrincipalRecord::group("Group:5", "Staff")]);
        assert_eq!(ReconcilePrincipals::plan(&[id("Group:5")], &cache), None);
        assert_eq!(ReconcilePrincipals::plan(&[], &cache), None);
    }

    #[test]
    fn test_plan_requests_distinct_missing() {
        let cache = ResolvedCache::new().merged_records(vec![PrincipalRecord::group("Group:5", "Staff")]);
        let request =
            ReconcilePrincipals::plan(&[id("User:1"), id("Group:5"), id("User:1"), id("User:2")], &cache)
                .unwrap();
        assert_eq!(request.identifiers, vec![id("User:1"), id("User:2")]);
    }

    #[tokio::test]
    async fn test_execute_returns_resolved_batch() {
        let lookup = Arc::new(ScriptedLookup::new());
        let reply = lookup.push_reply();
        let uc = ReconcilePrincipals::from_ports(lookup.clone(), silent_surface());

        reply
            .send(Ok(response(vec![PrincipalRecord::user("User:1", "Alice", 1u64)])))
            .unwrap();
        let outcome = uc
            .execute(
                LookupRequest {
                    identifiers: vec![id("User:1")],
                },
                CancellationToken::new(),
            )
            .await;

        match outcome {
            ReconcileOutcome::Resolved(batch) => assert_eq!(batch[&id("User:1")].name, "Alice"),
            other => panic!("expected resolved outcome, got {other:?}"),
        }
        assert_eq!(lookup.requests(), vec![vec![id("User:1")]]);
    }

    #[tokio::test]
    async fn test_execute_reports_failure_once() {
        let lookup = Arc::new(ScriptedLookup::new());
        let reply = lookup.push_reply();
        let mut surface = MockErrorSurface::new();
        surface
            .expect_report_lookup_failure()
            .withf(|err| *err == LookupError::Unavailable)
            .times(1)
            .return_const(());
        let uc = ReconcilePrincipals::from_ports(lookup, Arc::new(surface));

        reply.send(Err(LookupError::Unavailable)).unwrap();
        let outcome = uc
            .execute(
                LookupRequest {
                    identifiers: vec![id("User:9")],
                },
                CancellationToken::new(),
            )
            .await;

        assert_eq!(outcome, ReconcileOutcome::Failed(LookupError::Unavailable));
    }

    #[tokio::test]
    async fn test_cancelled_lookup_is_discarded_and_not_reported() {
        let lookup = Arc::new(ScriptedLookup::new());
        let _reply = lookup.push_reply();
        let uc = ReconcilePrincipals::from_ports(lookup.clone(), silent_surface());
        let cancel = CancellationToken::new();

        let task = tokio::spawn({
            let uc = uc.clone();
            let cancel = cancel.clone();
            async move {
                uc.execute(
                    LookupRequest {
                        identifiers: vec![id("User:1")],
                    },
                    cancel,
                )
                .await
            }
        });
        lookup.wait_for_calls(1).await;
        cancel.cancel();

        assert_eq!(task.await.unwrap(), ReconcileOutcome::Cancelled);
    }

    #[tokio::test]
    async fn test_execute_with_cancelled_token_skips_lookup() {
        let lookup = Arc::new(ScriptedLookup::new());
        let uc = ReconcilePrincipals::from_ports(lookup.clone(), silent_surface());
        let cancel = CancellationToken::new();
        cancel.cancel();

        let outcome = uc
            .execute(
                LookupRequest {
                    identifiers: vec![id("User:1")],
                },
                cancel,
            )
            .await;

        assert_eq!(outcome, ReconcileOutcome::Cancelled);
        assert!(lookup.requests().is_empty());
    }

    #[test]
    fn test_apply_refuses_cancelled_generation() {
        let cache = ResolvedCache::new();
        let outcome =
            ReconcileOutcome::Resolved(response(vec![PrincipalRecord::user("User:1", "Alice", 1u64)]));
        let cancel = CancellationToken::new();
        cancel.cancel();

        assert!(ReconcilePrincipals::apply(&cache, &outcome, &cancel).is_none());
    }

    #[test]
    fn test_apply_merges_resolved_batch() {
        let cache = ResolvedCache::new();
        let outcome =
            ReconcileOutcome::Resolved(response(vec![PrincipalRecord::user("User:1", "Alice", 1u64)]));

        let next = ReconcilePrincipals::apply(&cache, &outcome, &CancellationToken::new()).unwrap();
        assert_eq!(next.get(&id("User:1")).unwrap().name, "Alice");
        assert_eq!(next.version(), 1);
    }

    #[test]
    fn test_apply_ignores_failures_and_empty_batches() {
        let cache = ResolvedCache::new();
        let token = CancellationToken::new();
        assert!(ReconcilePrincipals::apply(
            &cache,
            &ReconcileOutcome::Failed(LookupError::Unavailable),
            &token
        )
        .is_none());
        assert!(ReconcilePrincipals::apply(&cache, &ReconcileOutcome::Resolved(Default::default()), &token)
            .is_none());
    }
}

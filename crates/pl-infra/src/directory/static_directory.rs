use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use pl_core::ids::PrincipalIdentifier;
use pl_core::ports::principal_lookup::parse_response;
use pl_core::ports::{LookupError, LookupRequest, LookupResponse, PrincipalLookupPort};
use pl_core::principal::PrincipalRecord;
use tokio::fs;
use tracing::debug;

/// In-memory principal directory.
///
/// Answers lookups from a fixed map. Identifiers it does not know are left
/// out of the response, like a server that cannot resolve them.
pub struct StaticPrincipalDirectory {
    records: HashMap<PrincipalIdentifier, PrincipalRecord>,
    latency: Option<Duration>,
    failing: AtomicBool,
}

impl StaticPrincipalDirectory {
    pub fn new<I>(records: I) -> Self
    where
        I: IntoIterator<Item = PrincipalRecord>,
    {
        Self {
            records: records
                .into_iter()
                .map(|record| (record.identifier.clone(), record))
                .collect(),
            latency: None,
            failing: AtomicBool::new(false),
        }
    }

    /// Load a directory from a JSON object keyed by identifier, in the same
    /// shape the lookup endpoint answers with.
    pub async fn from_json_file(path: &Path) -> Result<Self> {
        let body = fs::read_to_string(path)
            .await
            .with_context(|| format!("read directory fixture failed: {}", path.display()))?;
        let records = parse_response(&body)
            .with_context(|| format!("parse directory fixture failed: {}", path.display()))?;
        Ok(Self::new(records.into_values()))
    }

    /// Delay every answer by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Make every following lookup fail with [`LookupError::Unavailable`].
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl PrincipalLookupPort for StaticPrincipalDirectory {
    async fn lookup(&self, request: LookupRequest) -> Result<LookupResponse, LookupError> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(LookupError::Unavailable);
        }

        let response: LookupResponse = request
            .identifiers
            .iter()
            .filter_map(|id| self.records.get(id).map(|record| (id.clone(), record.clone())))
            .collect();

        debug!(
            requested = request.identifiers.len(),
            resolved = response.len(),
            "Answered lookup from static directory"
        );
        Ok(response)
    }
}

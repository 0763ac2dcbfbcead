use std::sync::Mutex;

use chrono::{DateTime, Utc};
use pl_core::ports::{ErrorSurfacePort, LookupError};
use tracing::error;

/// One failure as it reached the error surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupFailureReport {
    pub error: LookupError,
    pub reported_at: DateTime<Utc>,
}

/// Error surface that logs every lookup failure and keeps the reports for
/// later display.
#[derive(Default)]
pub struct TracingErrorSurface {
    reports: Mutex<Vec<LookupFailureReport>>,
}

impl TracingErrorSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> Vec<LookupFailureReport> {
        match self.reports.lock() {
            Ok(reports) => reports.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Drain the reports collected so far.
    pub fn take_reports(&self) -> Vec<LookupFailureReport> {
        match self.reports.lock() {
            Ok(mut reports) => std::mem::take(&mut *reports),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl ErrorSurfacePort for TracingErrorSurface {
    fn report_lookup_failure(&self, err: &LookupError) {
        error!(error = %err, "Failed to resolve principals");
        let report = LookupFailureReport {
            error: err.clone(),
            reported_at: Utc::now(),
        };
        match self.reports.lock() {
            Ok(mut reports) => reports.push(report),
            Err(poisoned) => poisoned.into_inner().push(report),
        }
    }
}

use super::errors::LookupError;

/// Process-wide handler that shows or logs lookup failures.
pub trait ErrorSurfacePort: Send + Sync {
    fn report_lookup_failure(&self, error: &LookupError);
}

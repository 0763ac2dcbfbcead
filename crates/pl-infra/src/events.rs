use pl_core::ids::PrincipalIdentifier;
use pl_core::ports::FieldEventsPort;
use tracing::{debug, info};

/// Field events sink for hosts without a surrounding form: logs every event.
#[derive(Debug, Default)]
pub struct LoggingFieldEvents;

impl FieldEventsPort for LoggingFieldEvents {
    fn on_change(&self, value: &[PrincipalIdentifier]) {
        info!(size = value.len(), "Principal list changed");
    }

    fn on_focus(&self) {
        debug!("Principal list focused");
    }

    fn on_blur(&self) {
        debug!("Principal list blurred");
    }
}

use std::sync::Arc;

use pl_core::ids::PrincipalIdentifier;
use pl_core::ports::FieldEventsPort;
use tracing::info;

use super::touch::mark_touched;

/// Use case removing a principal from the edited list.
pub struct DeletePrincipal {
    events: Arc<dyn FieldEventsPort>,
}

impl DeletePrincipal {
    pub fn from_ports(events: Arc<dyn FieldEventsPort>) -> Self {
        Self { events }
    }

    /// Remove every occurrence of `identifier` from `value`.
    ///
    /// Reports the new list through `on_change`, then marks the field touched.
    /// Returns the new list.
    #[tracing::instrument(
        name = "usecase.delete_principal.execute",
        skip_all,
        fields(identifier = %identifier)
    )]
    pub fn execute(
        &self,
        value: &[PrincipalIdentifier],
        identifier: &PrincipalIdentifier,
    ) -> Vec<PrincipalIdentifier> {
        let next: Vec<PrincipalIdentifier> = value
            .iter()
            .filter(|id| *id != identifier)
            .cloned()
            .collect();

        info!(removed = value.len() - next.len(), "Removed principal from list");

        self.events.on_change(&next);
        mark_touched(self.events.as_ref());
        next
    }
}

use crate::ids::PrincipalIdentifier;

/// Notifications the field sends to the surrounding form.
pub trait FieldEventsPort: Send + Sync {
    /// The edited identifier list changed.
    fn on_change(&self, value: &[PrincipalIdentifier]);

    fn on_focus(&self);

    fn on_blur(&self);
}

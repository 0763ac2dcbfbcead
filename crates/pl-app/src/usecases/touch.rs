use pl_core::ports::FieldEventsPort;

/// Mark the field as interacted-with: a focus immediately followed by a blur.
pub(crate) fn mark_touched(events: &dyn FieldEventsPort) {
    events.on_focus();
    events.on_blur();
}

//! Controller layer: UI events, event application, and command orchestration.

pub mod events;
pub mod orchestration;

use roster_core::FormState;

use crate::controller::events::UiEvent;

/// Applies one drained backend event onto the form and the status line.
/// Keeping this free of any display handle makes the whole event flow
/// testable headlessly.
pub fn apply_ui_event(state: &mut FormState, event: UiEvent, status: &mut String) {
    match event {
        UiEvent::Info(message) => *status = message,
        UiEvent::LocationsLoaded(locations) => {
            *status = format!("Loaded {} locations", locations.len());
            state.locations_loaded(locations);
        }
        UiEvent::LocationsFailed { detail } => {
            state.locations_failed();
            *status = detail;
        }
        UiEvent::NameChecked { token, available } => {
            // The inline form hint reports availability; the status line
            // stays quiet so stale responses cannot mislead it.
            state.name_checked(token, available);
        }
        UiEvent::NameCheckFailed { token, detail } => {
            if state.is_latest_check(token) {
                *status = detail;
            }
            state.name_check_failed(token);
        }
        UiEvent::Error(err) => {
            *status = format!("{} error: {}", err.context().label(), err.message());
        }
    }
}

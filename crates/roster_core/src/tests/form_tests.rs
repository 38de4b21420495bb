use super::*;

fn loaded_state(locations: &[&str]) -> FormState {
    let mut state = FormState::new();
    state.begin_location_load();
    state.locations_loaded(locations.iter().map(|location| location.to_string()).collect());
    state
}

fn settle_name(state: &mut FormState, name: &str, available: bool) {
    let request = state.edit_name(name).expect("non-empty name issues a check");
    state.name_checked(request.token, available);
}

#[test]
fn starts_idle_with_sentinel_only() {
    let state = FormState::new();
    assert_eq!(state.phase(), FormPhase::Idle);
    assert_eq!(state.locations, vec![LOCATION_SENTINEL.to_string()]);
    assert!(state.is_valid_name);
    assert!(state.rows.is_empty());
    assert!(state.error.is_none());
}

#[test]
fn loaded_locations_keep_the_sentinel_first() {
    let state = loaded_state(&["NYC", "LA"]);
    assert_eq!(
        state.locations,
        vec![
            LOCATION_SENTINEL.to_string(),
            "NYC".to_string(),
            "LA".to_string()
        ]
    );
    assert_eq!(state.phase(), FormPhase::Idle);
}

#[test]
fn location_load_failure_reports_and_returns_to_idle() {
    let mut state = FormState::new();
    state.begin_location_load();
    assert_eq!(state.phase(), FormPhase::LoadingLocations);

    state.locations_failed();
    assert_eq!(state.error.as_deref(), Some(LOCATIONS_FETCH_ERROR));
    assert_eq!(state.phase(), FormPhase::Idle);
}

#[test]
fn add_appends_one_row_and_resets_inputs() {
    let mut state = loaded_state(&["NYC", "LA"]);
    settle_name(&mut state, "bob", true);
    state.select_location("NYC");

    state.add_entry();

    assert_eq!(
        state.rows,
        vec![RosterRow {
            name: "bob".to_string(),
            location: "NYC".to_string(),
        }]
    );
    assert_eq!(state.name, "");
    assert_eq!(state.location, "");
}

#[test]
fn add_with_empty_name_appends_nothing_and_sets_error() {
    let mut state = loaded_state(&["NYC"]);
    state.select_location("NYC");

    state.add_entry();

    assert!(state.rows.is_empty());
    assert_eq!(state.error.as_deref(), Some(MISSING_INPUT_ERROR));
}

#[test]
fn add_without_location_appends_nothing_and_sets_error() {
    let mut state = loaded_state(&["NYC"]);
    settle_name(&mut state, "bob", true);

    state.add_entry();

    assert!(state.rows.is_empty());
    assert_eq!(state.error.as_deref(), Some(MISSING_INPUT_ERROR));
}

#[test]
fn sentinel_selection_counts_as_no_location() {
    let mut state = loaded_state(&["NYC"]);
    settle_name(&mut state, "bob", true);
    state.select_location(LOCATION_SENTINEL);

    assert_eq!(state.location, "");
    assert!(!state.has_location_selected());

    state.add_entry();
    assert!(state.rows.is_empty());
    assert_eq!(state.error.as_deref(), Some(MISSING_INPUT_ERROR));
}

#[test]
fn whitespace_location_counts_as_no_location() {
    let mut state = loaded_state(&["NYC"]);
    settle_name(&mut state, "bob", true);
    state.select_location("   ");

    state.add_entry();
    assert!(state.rows.is_empty());
    assert_eq!(state.error.as_deref(), Some(MISSING_INPUT_ERROR));
}

#[test]
fn successful_add_clears_a_previous_input_error() {
    let mut state = loaded_state(&["NYC"]);
    state.add_entry();
    assert_eq!(state.error.as_deref(), Some(MISSING_INPUT_ERROR));

    settle_name(&mut state, "bob", true);
    state.select_location("NYC");
    state.add_entry();

    assert!(state.error.is_none());
    assert_eq!(state.rows.len(), 1);
}

#[test]
fn add_is_a_noop_while_a_call_is_outstanding() {
    let mut state = loaded_state(&["NYC"]);
    settle_name(&mut state, "bob", true);
    state.select_location("NYC");
    state.begin_location_load();

    state.add_entry();

    assert!(state.rows.is_empty());
    assert_eq!(state.name, "bob");
}

#[test]
fn clear_resets_to_the_initial_shape() {
    let mut state = loaded_state(&["NYC", "LA"]);
    settle_name(&mut state, "bob", false);
    state.select_location("LA");
    state.add_entry();
    state.clear();

    assert_eq!(state.name, "");
    assert_eq!(state.location, "");
    assert!(state.is_valid_name);
    assert!(state.error.is_none());
    assert!(state.rows.is_empty());
    // Locations are backend data and survive a clear.
    assert_eq!(state.locations.len(), 3);
}

#[test]
fn clear_twice_matches_clear_once() {
    let mut state = loaded_state(&["NYC"]);
    settle_name(&mut state, "bob", true);
    state.select_location("NYC");
    state.add_entry();

    state.clear();
    let cleared_once = state.clone();
    state.clear();

    assert_eq!(state, cleared_once);
}

#[test]
fn clear_is_a_noop_while_a_call_is_outstanding() {
    let mut state = loaded_state(&["NYC"]);
    settle_name(&mut state, "bob", true);
    state.select_location("NYC");
    state.add_entry();
    state.begin_location_load();

    state.clear();

    assert_eq!(state.rows.len(), 1);
}

#[test]
fn name_edits_issue_monotonic_tokens() {
    let mut state = FormState::new();
    let first = state.edit_name("b").expect("check issued");
    let second = state.edit_name("bo").expect("check issued");

    assert!(second.token.0 > first.token.0);
    assert_eq!(second.name, "bo");
    assert_eq!(state.phase(), FormPhase::ValidatingName);
}

#[test]
fn taken_name_is_a_value_not_an_error() {
    let mut state = FormState::new();
    let request = state.edit_name("bob").expect("check issued");

    state.name_checked(request.token, false);

    assert!(!state.is_valid_name);
    assert_eq!(state.name, "bob");
    assert!(state.error.is_none());
    assert_eq!(state.phase(), FormPhase::Idle);
}

#[test]
fn stale_check_results_are_discarded() {
    let mut state = FormState::new();
    let first = state.edit_name("bo").expect("check issued");
    let second = state.edit_name("bob").expect("check issued");

    // Superseded response lands late: nothing changes.
    state.name_checked(first.token, false);
    assert!(state.is_valid_name);
    assert_eq!(state.phase(), FormPhase::ValidatingName);

    // Latest response wins.
    state.name_checked(second.token, true);
    assert!(state.is_valid_name);
    assert_eq!(state.phase(), FormPhase::Idle);

    // A straggler after resolution is also ignored.
    state.name_checked(first.token, false);
    assert!(state.is_valid_name);
}

#[test]
fn clearing_the_name_cancels_the_outstanding_check() {
    let mut state = FormState::new();
    let request = state.edit_name("bob").expect("check issued");

    assert!(state.edit_name("").is_none());
    assert_eq!(state.phase(), FormPhase::Idle);
    assert!(state.is_valid_name);

    // The in-flight response for the cancelled check must not resurface.
    state.name_checked(request.token, false);
    assert!(state.is_valid_name);
}

#[test]
fn whitespace_only_name_issues_no_check() {
    let mut state = FormState::new();
    assert!(state.edit_name("   ").is_none());
    assert_eq!(state.name, "   ");
    assert_eq!(state.phase(), FormPhase::Idle);
}

#[test]
fn check_failure_sets_error_only_for_the_latest_token() {
    let mut state = FormState::new();
    let first = state.edit_name("bo").expect("check issued");
    let second = state.edit_name("bob").expect("check issued");

    state.name_check_failed(first.token);
    assert!(state.error.is_none());

    state.name_check_failed(second.token);
    assert_eq!(state.error.as_deref(), Some(NAME_VALIDATION_ERROR));
    assert_eq!(state.phase(), FormPhase::Idle);
}

#[test]
fn select_location_applies_synchronously() {
    let mut state = loaded_state(&["NYC"]);
    state.select_location("NYC");
    assert_eq!(state.location, "NYC");
    assert!(state.has_location_selected());
}

#[test]
fn dismiss_error_clears_only_the_error() {
    let mut state = loaded_state(&["NYC"]);
    state.add_entry();
    assert!(state.error.is_some());

    state.dismiss_error();
    assert!(state.error.is_none());
    assert_eq!(state.locations.len(), 2);
}

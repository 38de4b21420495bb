//! Form state machine for the roster entry screen.
//!
//! All transitions are synchronous and pure. The embedding application owns
//! the remote calls: `edit_name` hands back a [`ValidationRequest`] to run
//! against the directory service, and the outcome is fed back in tagged with
//! the [`ValidationToken`] issued at request time. Only the latest token's
//! outcome is applied; superseded responses are discarded.

/// Leading placeholder entry of the location list, meaning "no selection".
pub const LOCATION_SENTINEL: &str = "Select a location";

/// Surfaced when the location list cannot be fetched.
pub const LOCATIONS_FETCH_ERROR: &str = "Error fetching the locations";
/// Surfaced when the name-availability check itself fails.
pub const NAME_VALIDATION_ERROR: &str = "Error validating the provided name";
/// Surfaced when an entry is submitted without both fields filled in.
pub const MISSING_INPUT_ERROR: &str = "Please enter both a name and a location";

/// Monotonic tag for one issued name-availability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValidationToken(pub u64);

/// One accepted roster entry. Immutable once appended; duplicates are fine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterRow {
    pub name: String,
    pub location: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Idle,
    LoadingLocations,
    ValidatingName,
}

impl FormPhase {
    pub fn is_busy(self) -> bool {
        !matches!(self, FormPhase::Idle)
    }
}

/// A name check the embedding application must run against the directory
/// service, answering with [`FormState::name_checked`] or
/// [`FormState::name_check_failed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationRequest {
    pub name: String,
    pub token: ValidationToken,
}

/// The entire form: inputs, the fetched location list, the collected roster
/// rows, and the single rendered error slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub name: String,
    pub location: String,
    pub locations: Vec<String>,
    pub is_valid_name: bool,
    pub rows: Vec<RosterRow>,
    pub error: Option<String>,
    next_token: u64,
    outstanding_check: Option<ValidationToken>,
    loading_locations: bool,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

impl FormState {
    pub fn new() -> Self {
        Self {
            name: String::new(),
            location: String::new(),
            locations: vec![LOCATION_SENTINEL.to_string()],
            is_valid_name: true,
            rows: Vec::new(),
            error: None,
            next_token: 0,
            outstanding_check: None,
            loading_locations: false,
        }
    }

    /// Derived from the outstanding remote work, so completions in any order
    /// cannot leave the form stuck in a busy phase.
    pub fn phase(&self) -> FormPhase {
        if self.loading_locations {
            FormPhase::LoadingLocations
        } else if self.outstanding_check.is_some() {
            FormPhase::ValidatingName
        } else {
            FormPhase::Idle
        }
    }

    pub fn is_busy(&self) -> bool {
        self.phase().is_busy()
    }

    pub fn has_location_selected(&self) -> bool {
        let location = self.location.trim();
        !location.is_empty() && location != LOCATION_SENTINEL
    }

    /// Entered once at startup, before the application queues the fetch.
    pub fn begin_location_load(&mut self) {
        self.loading_locations = true;
    }

    pub fn locations_loaded(&mut self, locations: Vec<String>) {
        let mut with_sentinel = Vec::with_capacity(locations.len() + 1);
        with_sentinel.push(LOCATION_SENTINEL.to_string());
        with_sentinel.extend(locations);
        self.locations = with_sentinel;
        self.loading_locations = false;
    }

    pub fn locations_failed(&mut self) {
        self.error = Some(LOCATIONS_FETCH_ERROR.to_string());
        self.loading_locations = false;
    }

    /// Echoes the edit immediately. A non-empty name supersedes any
    /// outstanding check and returns the fresh request to run; clearing the
    /// field cancels the outstanding check and resets the name to
    /// unvalidated.
    pub fn edit_name(&mut self, new_name: impl Into<String>) -> Option<ValidationRequest> {
        self.name = new_name.into();
        if self.name.trim().is_empty() {
            self.outstanding_check = None;
            self.is_valid_name = true;
            return None;
        }

        let token = ValidationToken(self.next_token);
        self.next_token += 1;
        self.outstanding_check = Some(token);
        Some(ValidationRequest {
            name: self.name.clone(),
            token,
        })
    }

    /// Applies a check result if `token` is still the latest one issued.
    /// An unavailable name is a data value, not an error.
    pub fn name_checked(&mut self, token: ValidationToken, available: bool) {
        if self.outstanding_check != Some(token) {
            return;
        }
        self.outstanding_check = None;
        self.is_valid_name = available;
    }

    /// True while `token` is the latest issued, still-unanswered check.
    pub fn is_latest_check(&self, token: ValidationToken) -> bool {
        self.outstanding_check == Some(token)
    }

    pub fn name_check_failed(&mut self, token: ValidationToken) {
        if self.outstanding_check != Some(token) {
            return;
        }
        self.outstanding_check = None;
        self.error = Some(NAME_VALIDATION_ERROR.to_string());
    }

    /// Selecting the sentinel row means deselecting.
    pub fn select_location(&mut self, new_location: impl Into<String>) {
        let new_location = new_location.into();
        self.location = if new_location == LOCATION_SENTINEL {
            String::new()
        } else {
            new_location
        };
    }

    /// Appends `{name, location}` when both are filled in, then resets the
    /// inputs for the next entry. No-op while a remote call is outstanding.
    pub fn add_entry(&mut self) {
        if self.is_busy() {
            return;
        }
        if self.name.trim().is_empty() || !self.has_location_selected() {
            self.error = Some(MISSING_INPUT_ERROR.to_string());
            return;
        }

        self.rows.push(RosterRow {
            name: self.name.clone(),
            location: self.location.clone(),
        });
        self.name.clear();
        self.location.clear();
        self.error = None;
    }

    /// Resets inputs, validity, error, and rows. The location list is
    /// backend data and survives. No-op while a remote call is outstanding.
    pub fn clear(&mut self) {
        if self.is_busy() {
            return;
        }
        self.name.clear();
        self.location.clear();
        self.is_valid_name = true;
        self.error = None;
        self.rows.clear();
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }
}

#[cfg(test)]
#[path = "tests/form_tests.rs"]
mod tests;

//! Backend commands queued from UI to the directory worker.

use roster_core::ValidationToken;

pub enum BackendCommand {
    FetchLocations,
    CheckName {
        name: String,
        token: ValidationToken,
    },
}

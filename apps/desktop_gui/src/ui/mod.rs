//! UI layer for the desktop app: the eframe shell and its rendering.

pub mod app;

pub use app::{PersistedDesktopSettings, RosterApp, SETTINGS_STORAGE_KEY};

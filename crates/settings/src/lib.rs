//! Persistent shell preferences.
//!
//! Preferences are plain JSON; every field has a default so older or partial
//! files keep loading, and [`ShellPreferences::sanitize`] repairs values that
//! would break the workspace.

pub mod preferences;
pub mod store;

pub use preferences::{
    HistoryPreferences, LayoutPreferences, NavigationPreferences, ShellPreferences,
};
pub use store::{PreferencesError, PreferencesStore};

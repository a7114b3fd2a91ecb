// Deferred "new view saved" commit.
//
// The add-view flow finishes long after the tab bar registered its handler, so
// the registration captures its dependencies by value and must be replaced
// whenever one of them changes. A handler whose snapshot differs from the
// current tab set is stale.

use crate::modules::navigation::Location;
use crate::modules::tabs::{commit_new_view_saved, TabSetChange};
use crate::settings::Settings;
use crate::state::Tab;

/// Registered callback for the add-view flow, with its captured dependencies.
#[derive(Debug, Clone, PartialEq)]
pub struct NewViewSavedHandler {
    tabs: Vec<Tab>,
    location: Location,
    settings: Settings,
}

impl NewViewSavedHandler {
    pub fn new(tabs: Vec<Tab>, location: Location, settings: Settings) -> Self {
        Self {
            tabs,
            location,
            settings,
        }
    }

    /// Key of the view being created, taken from the page's `viewId`.
    pub fn pending_view_id(&self) -> Option<&str> {
        self.location.view_id()
    }

    pub fn captured_tabs(&self) -> &[Tab] {
        &self.tabs
    }

    /// True when the captured state no longer matches what the host holds.
    pub fn is_stale(&self, tabs: &[Tab], location: &Location) -> bool {
        self.tabs != tabs || &self.location != location
    }

    pub fn call(&self, label: &str, query: &str, save_query_to_view: bool) -> Option<TabSetChange> {
        commit_new_view_saved(
            &self.tabs,
            &self.location,
            &self.settings,
            label,
            query,
            save_query_to_view,
        )
    }
}

/// Host-owned state shared between the tab bar and the add-view flow.
#[derive(Debug, Clone, Default)]
pub struct NewViewContext {
    new_view_active: bool,
    on_new_view_saved: Option<NewViewSavedHandler>,
    registrations: u64,
}

impl NewViewContext {
    pub fn is_new_view_active(&self) -> bool {
        self.new_view_active
    }

    pub fn set_new_view_active(&mut self, active: bool) {
        self.new_view_active = active;
    }

    /// Registers `handler` unless an identical one is already registered.
    /// Returns true when the registration was replaced.
    pub fn set_on_new_view_saved(&mut self, handler: NewViewSavedHandler) -> bool {
        if self.on_new_view_saved.as_ref() == Some(&handler) {
            return false;
        }
        self.on_new_view_saved = Some(handler);
        self.registrations += 1;
        true
    }

    pub fn on_new_view_saved(&self) -> Option<&NewViewSavedHandler> {
        self.on_new_view_saved.as_ref()
    }

    /// How many times the handler has been (re)registered.
    pub fn registrations(&self) -> u64 {
        self.registrations
    }
}

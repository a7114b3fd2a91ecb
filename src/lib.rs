// Issue View Tabs Library Entry Point
// Saved search views shown as a reorderable tab bar: the tab records, the
// operations over them, and the URL each operation navigates to. Rendering,
// routing and drag gestures belong to the host.

// Core modules
pub mod error;
pub mod settings;

// Shared state
pub mod state;

// Pure logic modules (no host imports)
pub mod modules;

pub use error::StoreError;
pub use modules::menu::{menu_for, MenuEntry, Priority, TabAction, TabMenu};
pub use modules::navigation::{HistoryMode, Location, NavigationTarget};
pub use modules::new_view::{NewViewContext, NewViewSavedHandler};
pub use modules::selection::{SelectionState, TabListState};
pub use modules::tab_bar::{TabBar, TabBarHost, TabItem};
pub use modules::tabs::{TabBarEvent, TabNode, TabSetChange, TabSetView};
pub use modules::views_store::SavedViewsStore;
pub use settings::Settings;
pub use state::{IssueSort, Tab, TabState, UnsavedChanges, TEMPORARY_TAB_KEY};

// Module exports for pure logic
pub mod menu;          // Per-tab action menu
pub mod navigation;    // URL targets and tab links
pub mod new_view;      // Deferred add-view commit registration
pub mod selection;     // Host-owned selected key
pub mod tab_bar;       // Controller over a TabBarHost
pub mod tabs;          // Tab set operations
pub mod views_store;   // Persistence layer

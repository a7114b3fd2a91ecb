// Tab set operations - pure logic, no host calls.
// Each operation reads a snapshot and returns the change to apply, or None
// when its precondition does not hold.

use rand::Rng;
use std::collections::HashMap;

use crate::modules::navigation::{
    navigation_target, view_params, HistoryMode, Location, NavigationTarget, QUERY_PARAM,
    SORT_PARAM, VIEW_ID_PARAM,
};
use crate::settings::Settings;
use crate::state::{IssueSort, Tab, UnsavedChanges};

/// Anything the drag-and-drop list hands back that exposes a tab key.
pub trait TabNode {
    fn key(&self) -> &str;
}

impl TabNode for Tab {
    fn key(&self) -> &str {
        &self.key
    }
}

impl TabNode for String {
    fn key(&self) -> &str {
        self
    }
}

impl TabNode for &str {
    fn key(&self) -> &str {
        self
    }
}

/// Which host hook a change should fire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabBarEvent {
    Reordered,
    Renamed { label: String },
    Duplicated,
    Deleted,
    Saved,
    Discarded,
    NewViewStarted,
    ViewAdded,
    TempViewSaved,
    TempViewDiscarded,
}

/// Result of one operation. The host remains the only writer of the tab set.
#[derive(Debug, Clone, PartialEq)]
pub struct TabSetChange {
    pub event: TabBarEvent,
    /// Full replacement collection, when the collection changed.
    pub tabs: Option<Vec<Tab>>,
    pub clear_temp_tab: bool,
    /// Key to select once everything else is applied.
    pub select: Option<String>,
    pub navigation: Option<NavigationTarget>,
    pub new_view_active: Option<bool>,
}

impl TabSetChange {
    fn new(event: TabBarEvent) -> Self {
        Self {
            event,
            tabs: None,
            clear_temp_tab: false,
            select: None,
            navigation: None,
            new_view_active: None,
        }
    }

    fn with_tabs(mut self, tabs: Vec<Tab>) -> Self {
        self.tabs = Some(tabs);
        self
    }

    fn selecting(mut self, key: impl Into<String>) -> Self {
        self.select = Some(key.into());
        self
    }

    fn navigating(mut self, target: NavigationTarget) -> Self {
        self.navigation = Some(target);
        self
    }
}

/// `_` plus five random digits; unique enough within one session.
pub fn generate_temp_view_id() -> String {
    format!("_{:05}", rand::rng().random_range(0..100_000u32))
}

/// A temp id that collides with no key or id in the collection or temp slot.
pub fn unique_temp_view_id(tabs: &[Tab], temp_tab: Option<&Tab>) -> String {
    loop {
        let id = generate_temp_view_id();
        let taken = tabs
            .iter()
            .chain(temp_tab)
            .any(|tab| tab.key == id || tab.id == id);
        if !taken {
            return id;
        }
    }
}

/// Pure logic for reordering tabs.
/// Returns the new collection, or None if the order did not change.
///
/// Algorithm:
/// 1. Map existing tabs by key for O(1) lookup
/// 2. Rebuild based on new_order, skipping keys that are not in the collection
/// 3. Append any tabs missing from new_order (prevents data loss on stale drag state)
fn reorder_logic<N: TabNode>(tabs: &[Tab], new_order: &[N]) -> Option<Vec<Tab>> {
    if tabs.is_empty() || new_order.is_empty() {
        return None;
    }

    let mut tab_map: HashMap<&str, &Tab> = tabs.iter().map(|t| (t.key.as_str(), t)).collect();

    let mut reordered: Vec<Tab> = Vec::with_capacity(tabs.len());
    for node in new_order {
        if let Some(tab) = tab_map.remove(node.key()) {
            reordered.push(tab.clone());
        }
    }

    // Keep the original relative order of whatever the drag result left out.
    reordered.extend(
        tabs.iter()
            .filter(|t| tab_map.contains_key(t.key.as_str()))
            .cloned(),
    );

    let changed = reordered
        .iter()
        .zip(tabs)
        .any(|(new, old)| new.key != old.key);
    changed.then_some(reordered)
}

/// Read-only snapshot of everything an operation may look at.
#[derive(Debug, Clone, Copy)]
pub struct TabSetView<'a> {
    pub tabs: &'a [Tab],
    pub temp_tab: Option<&'a Tab>,
    pub selected_key: Option<&'a str>,
    pub location: &'a Location,
    pub settings: &'a Settings,
}

impl TabSetView<'_> {
    fn selected_index(&self) -> Option<usize> {
        let key = self.selected_key?;
        self.tabs.iter().position(|tab| tab.key == key)
    }

    fn push(&self, overrides: &[(&str, String)]) -> NavigationTarget {
        navigation_target(self.location, self.settings, overrides, HistoryMode::Push)
    }

    pub fn reorder<N: TabNode>(&self, new_order: &[N]) -> Option<TabSetChange> {
        let tabs = reorder_logic(self.tabs, new_order)?;
        Some(TabSetChange::new(TabBarEvent::Reordered).with_tabs(tabs))
    }

    /// Renames the tab with `tab_key`; blank or unchanged labels are ignored.
    pub fn rename(&self, tab_key: &str, new_label: &str) -> Option<TabSetChange> {
        let label = new_label.trim();
        let renamed = self.tabs.iter().find(|tab| tab.key == tab_key)?;
        if label.is_empty() || label == renamed.label {
            return None;
        }
        let tabs = self
            .tabs
            .iter()
            .map(|tab| {
                if tab.key == tab_key {
                    Tab {
                        label: label.to_string(),
                        ..tab.clone()
                    }
                } else {
                    tab.clone()
                }
            })
            .collect();
        Some(
            TabSetChange::new(TabBarEvent::Renamed {
                label: label.to_string(),
            })
            .with_tabs(tabs),
        )
    }

    /// Copies the selected tab right after itself under a fresh temp id.
    pub fn duplicate(&self) -> Option<TabSetChange> {
        let idx = self.selected_index()?;
        let source = &self.tabs[idx];
        let temp_id = unique_temp_view_id(self.tabs, self.temp_tab);

        let copy = Tab {
            id: temp_id.clone(),
            key: temp_id.clone(),
            label: format!("{}{}", source.label, self.settings.copy_suffix),
            ..source.clone()
        };
        let mut tabs = self.tabs.to_vec();
        tabs.insert(idx + 1, copy);

        let target = self.push(&[(VIEW_ID_PARAM, temp_id.clone())]);
        Some(
            TabSetChange::new(TabBarEvent::Duplicated)
                .with_tabs(tabs)
                .navigating(target)
                .selecting(temp_id),
        )
    }

    /// Removes the selected tab. The last remaining tab is never removed.
    pub fn delete(&self) -> Option<TabSetChange> {
        if self.tabs.len() <= 1 {
            return None;
        }
        let idx = self.selected_index()?;
        let mut tabs = self.tabs.to_vec();
        tabs.remove(idx);
        let first = tabs[0].key.clone();
        Some(
            TabSetChange::new(TabBarEvent::Deleted)
                .with_tabs(tabs)
                .selecting(first),
        )
    }

    /// Writes the selected tab's pending query and sort into its saved fields.
    pub fn save_changes(&self) -> Option<TabSetChange> {
        let idx = self.selected_index()?;
        let changes = self.tabs[idx].unsaved_changes.clone()?;

        let mut tabs = self.tabs.to_vec();
        let tab = &mut tabs[idx];
        tab.query = changes.query;
        tab.query_sort = changes.sort;
        tab.unsaved_changes = None;
        Some(TabSetChange::new(TabBarEvent::Saved).with_tabs(tabs))
    }

    /// Drops the selected tab's pending edit and sends the page back to its saved query.
    pub fn discard_changes(&self) -> Option<TabSetChange> {
        let idx = self.selected_index()?;
        let original = &self.tabs[idx];
        if !original.has_unsaved_changes() {
            return None;
        }

        let target = self.push(&view_params(
            &original.query,
            original.query_sort,
            Some(original.id.as_str()),
        ));
        let mut tabs = self.tabs.to_vec();
        tabs[idx].unsaved_changes = None;
        Some(
            TabSetChange::new(TabBarEvent::Discarded)
                .with_tabs(tabs)
                .navigating(target),
        )
    }

    /// Appends an empty view and raises the new-view flow.
    pub fn create_new_view(&self) -> Option<TabSetChange> {
        let temp_id = unique_temp_view_id(self.tabs, self.temp_tab);
        let mut tabs = self.tabs.to_vec();
        tabs.push(Tab::new(
            temp_id.clone(),
            self.settings.new_view_label.clone(),
            "",
            self.settings.default_sort,
        ));

        let target = self.push(&[
            (QUERY_PARAM, String::new()),
            (VIEW_ID_PARAM, temp_id.clone()),
        ]);
        let mut change = TabSetChange::new(TabBarEvent::NewViewStarted)
            .with_tabs(tabs)
            .navigating(target)
            .selecting(temp_id);
        change.new_view_active = Some(true);
        Some(change)
    }

    /// Promotes the temporary tab into a persisted one.
    pub fn save_temp_view(&self) -> Option<TabSetChange> {
        let temp = self.temp_tab?;
        let temp_id = unique_temp_view_id(self.tabs, self.temp_tab);
        let mut tabs = self.tabs.to_vec();
        tabs.push(Tab::new(
            temp_id.clone(),
            self.settings.new_view_label.clone(),
            temp.query.clone(),
            temp.query_sort,
        ));

        let mut change = TabSetChange::new(TabBarEvent::TempViewSaved)
            .with_tabs(tabs)
            .selecting(temp_id);
        change.clear_temp_tab = true;
        Some(change)
    }

    pub fn discard_temp_view(&self) -> Option<TabSetChange> {
        self.temp_tab?;
        let mut change = TabSetChange::new(TabBarEvent::TempViewDiscarded);
        change.clear_temp_tab = true;
        change.select = self.tabs.first().map(|tab| tab.key.clone());
        Some(change)
    }
}

/// Finishes the new-view flow for the tab whose key is the page's `viewId`.
///
/// With `save_query_to_view` the query becomes the view's saved query; otherwise
/// the view stays empty and the query is kept as a pending edit. The committed
/// view always sorts by date, whatever the configured default sort is.
pub fn commit_new_view_saved(
    tabs: &[Tab],
    location: &Location,
    settings: &Settings,
    label: &str,
    query: &str,
    save_query_to_view: bool,
) -> Option<TabSetChange> {
    let pending_key = location.view_id()?;
    if !tabs.iter().any(|tab| tab.key == pending_key) {
        return None;
    }
    let sort = IssueSort::Date;

    let tabs = tabs
        .iter()
        .map(|tab| {
            if tab.key != pending_key {
                return tab.clone();
            }
            let (saved_query, unsaved_changes) = if save_query_to_view {
                (query.to_string(), None)
            } else {
                (String::new(), Some(UnsavedChanges::new(query, sort)))
            };
            Tab {
                label: label.to_string(),
                query: saved_query,
                query_sort: sort,
                unsaved_changes,
                ..tab.clone()
            }
        })
        .collect();

    let target = navigation_target(
        location,
        settings,
        &[
            (QUERY_PARAM, query.to_string()),
            (SORT_PARAM, sort.as_str().to_string()),
        ],
        HistoryMode::Replace,
    );
    let mut change = TabSetChange::new(TabBarEvent::ViewAdded)
        .with_tabs(tabs)
        .navigating(target);
    change.new_view_active = Some(false);
    Some(change)
}

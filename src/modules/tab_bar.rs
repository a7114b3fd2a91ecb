// Tab bar controller.
// Turns user actions into TabSetChanges and hands them to the host, which owns
// the tab collection, the temporary tab, the router and the new-view context.

use crate::modules::menu::{menu_for, TabAction, TabMenu};
use crate::modules::navigation::{tab_href, Location, NavigationTarget};
use crate::modules::new_view::{NewViewContext, NewViewSavedHandler};
use crate::modules::selection::SelectionState;
use crate::modules::tabs::{TabBarEvent, TabNode, TabSetChange, TabSetView};
use crate::settings::Settings;
use crate::state::Tab;

/// Everything the tab bar reads from and writes back to its owner.
///
/// Hooks run after the change has been written through `set_tabs`,
/// `set_temp_tab`, `navigate` and the selection, exactly once per operation.
pub trait TabBarHost {
    fn tabs(&self) -> &[Tab];
    fn temp_tab(&self) -> Option<&Tab>;
    fn location(&self) -> &Location;
    fn new_view_context(&self) -> &NewViewContext;
    fn new_view_context_mut(&mut self) -> &mut NewViewContext;

    fn set_tabs(&mut self, tabs: Vec<Tab>);
    fn set_temp_tab(&mut self, tab: Option<Tab>);
    /// Push or replace a history entry, per `target.mode`.
    fn navigate(&mut self, target: NavigationTarget);

    fn on_reorder(&mut self, _tabs: &[Tab]) {}
    fn on_duplicate(&mut self, _tabs: &[Tab]) {}
    fn on_delete(&mut self, _tabs: &[Tab]) {}
    fn on_save(&mut self, _tabs: &[Tab]) {}
    fn on_discard(&mut self, _tabs: &[Tab]) {}
    fn on_tab_renamed(&mut self, _tabs: &[Tab], _new_label: &str) {}
    fn on_add_view(&mut self, _tabs: &[Tab]) {}
    fn on_save_temp_view(&mut self, _tabs: &[Tab]) {}
    fn on_discard_temp_view(&mut self, _tabs: &[Tab]) {}
}

/// Display model for one tab item.
#[derive(Debug, Clone, PartialEq)]
pub struct TabItem {
    pub key: String,
    pub label: String,
    pub href: String,
    /// Items being renamed are not clickable.
    pub is_editing: bool,
    pub has_unsaved_changes: bool,
    /// Only the selected tab carries a menu.
    pub menu: Option<TabMenu>,
}

#[derive(Debug, Clone)]
pub struct TabBar {
    settings: Settings,
    initial_tab_key: String,
    editing_tab_key: Option<String>,
}

impl TabBar {
    pub fn new(settings: Settings, initial_tab_key: impl Into<String>) -> Self {
        Self {
            settings,
            initial_tab_key: initial_tab_key.into(),
            editing_tab_key: None,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn editing_tab_key(&self) -> Option<&str> {
        self.editing_tab_key.as_deref()
    }

    fn view<'a, H: TabBarHost, S: SelectionState + ?Sized>(
        &'a self,
        host: &'a H,
        selection: &'a S,
    ) -> TabSetView<'a> {
        TabSetView {
            tabs: host.tabs(),
            temp_tab: host.temp_tab(),
            selected_key: selection.selected_key(),
            location: host.location(),
            settings: &self.settings,
        }
    }

    /// Refreshes the new-view handler registration from the host's current state.
    /// Call after any change the tab bar did not make itself. Returns true if the
    /// registration was replaced.
    pub fn render<H: TabBarHost>(&self, host: &mut H) -> bool {
        let handler = NewViewSavedHandler::new(
            host.tabs().to_vec(),
            host.location().clone(),
            self.settings.clone(),
        );
        let replaced = host.new_view_context_mut().set_on_new_view_saved(handler);
        if replaced {
            log::debug!(
                "[TabBar] Registered new-view handler ({} tabs, viewId {:?})",
                host.tabs().len(),
                host.location().view_id()
            );
        }
        replaced
    }

    /// Persisted tabs followed by the temporary tab, if any.
    pub fn items<H: TabBarHost, S: SelectionState + ?Sized>(
        &self,
        host: &H,
        selection: &S,
    ) -> Vec<TabItem> {
        let selected = selection.selected_key();
        let collection_len = host.tabs().len();

        host.tabs()
            .iter()
            .chain(host.temp_tab())
            .map(|tab| {
                let shows_menu = match selected {
                    Some(key) => key == tab.key,
                    None => tab.key == self.initial_tab_key,
                };
                TabItem {
                    key: tab.key.clone(),
                    label: tab.label.clone(),
                    href: tab_href(tab, host.location(), &self.settings),
                    is_editing: self.editing_tab_key.as_deref() == Some(tab.key.as_str()),
                    has_unsaved_changes: tab.has_unsaved_changes(),
                    menu: shows_menu.then(|| menu_for(tab.state(), collection_len)),
                }
            })
            .collect()
    }

    /// Menu for the currently selected tab.
    pub fn selected_menu<H: TabBarHost, S: SelectionState + ?Sized>(
        &self,
        host: &H,
        selection: &S,
    ) -> Option<TabMenu> {
        self.items(host, selection)
            .into_iter()
            .find_map(|item| item.menu)
    }

    /// Runs a menu action against the selected tab.
    pub fn perform<H: TabBarHost, S: SelectionState + ?Sized>(
        &mut self,
        action: TabAction,
        host: &mut H,
        selection: &mut S,
    ) -> bool {
        match action {
            TabAction::SaveView => self.save_temp_view(host, selection),
            TabAction::Discard => self.discard_temp_view(host, selection),
            TabAction::SaveChanges => self.save_changes(host, selection),
            TabAction::DiscardChanges => self.discard_changes(host, selection),
            TabAction::Rename => match selection.selected_key() {
                Some(key) => {
                    self.begin_rename(key);
                    true
                }
                None => false,
            },
            TabAction::Duplicate => self.duplicate(host, selection),
            TabAction::Delete => self.delete(host, selection),
        }
    }

    pub fn reorder<H: TabBarHost, S: SelectionState + ?Sized, N: TabNode>(
        &self,
        host: &mut H,
        selection: &mut S,
        new_order: &[N],
    ) -> bool {
        let change = self.view(host, selection).reorder(new_order);
        self.apply_if(change, host, selection)
    }

    pub fn begin_rename(&mut self, tab_key: &str) {
        self.editing_tab_key = Some(tab_key.to_string());
    }

    pub fn cancel_rename(&mut self) {
        self.editing_tab_key = None;
    }

    /// Leaves editing mode and renames the tab that was being edited.
    pub fn commit_rename<H: TabBarHost, S: SelectionState + ?Sized>(
        &mut self,
        host: &mut H,
        selection: &mut S,
        new_label: &str,
    ) -> bool {
        let Some(tab_key) = self.editing_tab_key.take() else {
            return false;
        };
        self.rename(host, selection, &tab_key, new_label)
    }

    pub fn rename<H: TabBarHost, S: SelectionState + ?Sized>(
        &self,
        host: &mut H,
        selection: &mut S,
        tab_key: &str,
        new_label: &str,
    ) -> bool {
        let change = self.view(host, selection).rename(tab_key, new_label);
        self.apply_if(change, host, selection)
    }

    pub fn duplicate<H: TabBarHost, S: SelectionState + ?Sized>(
        &self,
        host: &mut H,
        selection: &mut S,
    ) -> bool {
        let change = self.view(host, selection).duplicate();
        self.apply_if(change, host, selection)
    }

    pub fn delete<H: TabBarHost, S: SelectionState + ?Sized>(
        &self,
        host: &mut H,
        selection: &mut S,
    ) -> bool {
        let change = self.view(host, selection).delete();
        self.apply_if(change, host, selection)
    }

    pub fn save_changes<H: TabBarHost, S: SelectionState + ?Sized>(
        &self,
        host: &mut H,
        selection: &mut S,
    ) -> bool {
        let change = self.view(host, selection).save_changes();
        self.apply_if(change, host, selection)
    }

    pub fn discard_changes<H: TabBarHost, S: SelectionState + ?Sized>(
        &self,
        host: &mut H,
        selection: &mut S,
    ) -> bool {
        let change = self.view(host, selection).discard_changes();
        self.apply_if(change, host, selection)
    }

    /// Starts the add-view flow with a blank view.
    pub fn create_new_view<H: TabBarHost, S: SelectionState + ?Sized>(
        &self,
        host: &mut H,
        selection: &mut S,
    ) -> bool {
        let change = self.view(host, selection).create_new_view();
        self.apply_if(change, host, selection)
    }

    pub fn save_temp_view<H: TabBarHost, S: SelectionState + ?Sized>(
        &self,
        host: &mut H,
        selection: &mut S,
    ) -> bool {
        let change = self.view(host, selection).save_temp_view();
        self.apply_if(change, host, selection)
    }

    pub fn discard_temp_view<H: TabBarHost, S: SelectionState + ?Sized>(
        &self,
        host: &mut H,
        selection: &mut S,
    ) -> bool {
        let change = self.view(host, selection).discard_temp_view();
        self.apply_if(change, host, selection)
    }

    /// Completion of the add-view flow. Ignored unless a view creation is
    /// pending. Uses the registered handler, refreshing it first if the host
    /// changed state without a render.
    pub fn commit_new_view_saved<H: TabBarHost, S: SelectionState + ?Sized>(
        &self,
        host: &mut H,
        selection: &mut S,
        label: &str,
        query: &str,
        save_query_to_view: bool,
    ) -> bool {
        if !host.new_view_context().is_new_view_active() {
            log::debug!("[TabBar] No view creation pending, ignoring commit");
            return false;
        }

        let stale = host
            .new_view_context()
            .on_new_view_saved()
            .map_or(true, |handler| handler.is_stale(host.tabs(), host.location()));
        if stale {
            log::warn!("[TabBar] New-view handler was stale, refreshing before commit");
            self.render(host);
        }

        let change = host
            .new_view_context()
            .on_new_view_saved()
            .and_then(|handler| handler.call(label, query, save_query_to_view));
        self.apply_if(change, host, selection)
    }

    fn apply_if<H: TabBarHost, S: SelectionState + ?Sized>(
        &self,
        change: Option<TabSetChange>,
        host: &mut H,
        selection: &mut S,
    ) -> bool {
        match change {
            Some(change) => {
                self.apply(change, host, selection);
                true
            }
            None => {
                log::debug!("[TabBar] Operation not applicable, skipping");
                false
            }
        }
    }

    /// Writes a change through the host: collection, temp slot, new-view flag,
    /// navigation, selection, handler registration, then the hook.
    pub fn apply<H: TabBarHost, S: SelectionState + ?Sized>(
        &self,
        change: TabSetChange,
        host: &mut H,
        selection: &mut S,
    ) {
        let TabSetChange {
            event,
            tabs,
            clear_temp_tab,
            select,
            navigation,
            new_view_active,
        } = change;
        log::debug!("[TabBar] Applying {:?}", event);

        let resulting = match tabs {
            Some(tabs) => {
                host.set_tabs(tabs.clone());
                tabs
            }
            None => host.tabs().to_vec(),
        };
        if clear_temp_tab {
            host.set_temp_tab(None);
        }
        if let Some(active) = new_view_active {
            host.new_view_context_mut().set_new_view_active(active);
        }
        if let Some(target) = navigation {
            log::info!("[TabBar] Navigating ({:?}) to {}", target.mode, target.href());
            host.navigate(target);
        }
        if let Some(key) = select {
            selection.set_selected_key(&key);
        }
        self.render(host);

        match event {
            TabBarEvent::Reordered => host.on_reorder(&resulting),
            TabBarEvent::Renamed { label } => host.on_tab_renamed(&resulting, &label),
            TabBarEvent::Duplicated => host.on_duplicate(&resulting),
            TabBarEvent::Deleted => host.on_delete(&resulting),
            TabBarEvent::Saved => host.on_save(&resulting),
            TabBarEvent::Discarded => host.on_discard(&resulting),
            TabBarEvent::ViewAdded => host.on_add_view(&resulting),
            TabBarEvent::TempViewSaved => host.on_save_temp_view(&resulting),
            TabBarEvent::TempViewDiscarded => host.on_discard_temp_view(&resulting),
            TabBarEvent::NewViewStarted => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::navigation::HistoryMode;
    use crate::modules::selection::TabListState;
    use crate::state::{IssueSort, UnsavedChanges};

    /// Host that records every call, and checks hooks see already-written state.
    #[derive(Default)]
    struct RecordingHost {
        tabs: Vec<Tab>,
        temp_tab: Option<Tab>,
        location: Location,
        new_view: NewViewContext,
        history: Vec<NavigationTarget>,
        set_tabs_calls: usize,
        hooks: Vec<(&'static str, Vec<Tab>)>,
        renamed_to: Option<String>,
    }

    impl RecordingHost {
        fn new(tabs: Vec<Tab>) -> Self {
            Self {
                tabs,
                location: Location::new("/organizations/sentry/issues/")
                    .with_param("project", "1")
                    .with_param("cursor", "0:25:0"),
                ..Default::default()
            }
        }

        fn hook(&mut self, name: &'static str, tabs: &[Tab]) {
            assert_eq!(self.tabs, tabs, "hook {} ran before set_tabs", name);
            self.hooks.push((name, tabs.to_vec()));
        }

        fn hook_names(&self) -> Vec<&'static str> {
            self.hooks.iter().map(|(name, _)| *name).collect()
        }

        fn keys(&self) -> Vec<&str> {
            self.tabs.iter().map(|t| t.key.as_str()).collect()
        }
    }

    impl TabBarHost for RecordingHost {
        fn tabs(&self) -> &[Tab] {
            &self.tabs
        }
        fn temp_tab(&self) -> Option<&Tab> {
            self.temp_tab.as_ref()
        }
        fn location(&self) -> &Location {
            &self.location
        }
        fn new_view_context(&self) -> &NewViewContext {
            &self.new_view
        }
        fn new_view_context_mut(&mut self) -> &mut NewViewContext {
            &mut self.new_view
        }
        fn set_tabs(&mut self, tabs: Vec<Tab>) {
            self.set_tabs_calls += 1;
            self.tabs = tabs;
        }
        fn set_temp_tab(&mut self, tab: Option<Tab>) {
            self.temp_tab = tab;
        }
        fn navigate(&mut self, target: NavigationTarget) {
            self.location = target.location.clone();
            self.history.push(target);
        }

        fn on_reorder(&mut self, tabs: &[Tab]) {
            self.hook("reorder", tabs);
        }
        fn on_duplicate(&mut self, tabs: &[Tab]) {
            self.hook("duplicate", tabs);
        }
        fn on_delete(&mut self, tabs: &[Tab]) {
            self.hook("delete", tabs);
        }
        fn on_save(&mut self, tabs: &[Tab]) {
            self.hook("save", tabs);
        }
        fn on_discard(&mut self, tabs: &[Tab]) {
            self.hook("discard", tabs);
        }
        fn on_tab_renamed(&mut self, tabs: &[Tab], new_label: &str) {
            self.renamed_to = Some(new_label.to_string());
            self.hook("rename", tabs);
        }
        fn on_add_view(&mut self, tabs: &[Tab]) {
            self.hook("add_view", tabs);
        }
        fn on_save_temp_view(&mut self, tabs: &[Tab]) {
            self.hook("save_temp_view", tabs);
        }
        fn on_discard_temp_view(&mut self, tabs: &[Tab]) {
            self.hook("discard_temp_view", tabs);
        }
    }

    fn two_tabs() -> Vec<Tab> {
        vec![
            Tab::new("a", "A", "is:unresolved", IssueSort::Date),
            Tab::new("b", "B", "assigned:me", IssueSort::Date),
        ]
    }

    fn setup(tabs: Vec<Tab>) -> (TabBar, RecordingHost, TabListState) {
        let bar = TabBar::new(Settings::default(), "a");
        let mut host = RecordingHost::new(tabs);
        bar.render(&mut host);
        (bar, host, TabListState::with_default("a"))
    }

    #[test]
    fn test_duplicate_selects_and_navigates() {
        let (bar, mut host, mut selection) = setup(two_tabs());

        assert!(bar.duplicate(&mut host, &mut selection));

        let new_key = selection.selected_key().unwrap().to_string();
        assert_eq!(host.keys(), vec!["a", new_key.as_str(), "b"]);
        assert_eq!(host.tabs[1].label, "A (Copy)");
        assert_eq!(host.history.len(), 1);
        assert_eq!(host.history[0].mode, HistoryMode::Push);
        assert_eq!(host.location.view_id(), Some(new_key.as_str()));
        assert_eq!(host.location.param("cursor"), None);
        assert_eq!(host.hook_names(), vec!["duplicate"]);
    }

    #[test]
    fn test_delete_last_tab_fires_nothing() {
        let (bar, mut host, mut selection) = setup(vec![Tab::new("a", "A", "", IssueSort::Date)]);

        assert!(!bar.delete(&mut host, &mut selection));
        assert_eq!(host.keys(), vec!["a"]);
        assert_eq!(host.set_tabs_calls, 0);
        assert!(host.hooks.is_empty());
        assert!(host.history.is_empty());
    }

    #[test]
    fn test_delete_moves_selection_to_first() {
        let (bar, mut host, mut selection) = setup(two_tabs());
        selection.set_selected_key("a");

        assert!(bar.delete(&mut host, &mut selection));
        assert_eq!(host.keys(), vec!["b"]);
        assert_eq!(selection.selected_key(), Some("b"));
        assert!(host.history.is_empty());
        assert_eq!(host.hook_names(), vec!["delete"]);
    }

    #[test]
    fn test_reorder_with_stale_node() {
        let (bar, mut host, mut selection) = setup(two_tabs());

        assert!(bar.reorder(&mut host, &mut selection, &["gone", "b", "a"]));
        assert_eq!(host.keys(), vec!["b", "a"]);
        assert_eq!(selection.selected_key(), Some("a"));
        assert_eq!(host.hook_names(), vec!["reorder"]);

        // Same order again: nothing to do
        assert!(!bar.reorder(&mut host, &mut selection, &["b", "a"]));
        assert_eq!(host.hooks.len(), 1);
    }

    #[test]
    fn test_save_and_discard_changes() {
        let mut tabs = two_tabs();
        tabs[0] = Tab::new("a", "A", "q1", IssueSort::Date).with_unsaved_changes("q2", IssueSort::Freq);
        let (mut bar, mut host, mut selection) = setup(tabs);

        let menu = bar.selected_menu(&host, &selection).unwrap();
        assert!(menu.contains(TabAction::SaveChanges));

        let mut discarding = RecordingHost::new(host.tabs.clone());
        assert!(bar.perform(TabAction::DiscardChanges, &mut discarding, &mut selection.clone()));
        assert_eq!(discarding.tabs[0], Tab::new("a", "A", "q1", IssueSort::Date));
        let target = &discarding.history[0];
        assert_eq!(target.location.param("query"), Some("q1"));
        assert_eq!(target.location.param("sort"), Some("date"));
        assert_eq!(target.location.param("viewId"), Some("a"));
        assert_eq!(discarding.hook_names(), vec!["discard"]);

        assert!(bar.perform(TabAction::SaveChanges, &mut host, &mut selection));
        assert_eq!(host.tabs[0].query, "q2");
        assert_eq!(host.tabs[0].query_sort, IssueSort::Freq);
        assert!(host.history.is_empty());

        // Nothing pending any more
        assert!(!bar.save_changes(&mut host, &mut selection));
        assert!(!bar.discard_changes(&mut host, &mut selection));
        assert_eq!(host.hook_names(), vec!["save"]);
    }

    #[test]
    fn test_rename_through_menu() {
        let (mut bar, mut host, mut selection) = setup(two_tabs());

        assert!(bar.perform(TabAction::Rename, &mut host, &mut selection));
        assert_eq!(bar.editing_tab_key(), Some("a"));
        let items = bar.items(&host, &selection);
        assert!(items[0].is_editing);
        assert!(!items[1].is_editing);

        assert!(bar.commit_rename(&mut host, &mut selection, "  Unresolved  "));
        assert_eq!(bar.editing_tab_key(), None);
        assert_eq!(host.tabs[0].label, "Unresolved");
        assert_eq!(host.renamed_to.as_deref(), Some("Unresolved"));

        bar.begin_rename("b");
        assert!(!bar.commit_rename(&mut host, &mut selection, "B"));
        bar.begin_rename("b");
        bar.cancel_rename();
        assert!(!bar.commit_rename(&mut host, &mut selection, "Other"));
        assert_eq!(host.hook_names(), vec!["rename"]);
    }

    #[test]
    fn test_temp_view_save() {
        let (bar, mut host, mut selection) = setup(two_tabs());
        host.temp_tab = Some(Tab::temporary("err:*", IssueSort::Date));
        selection.set_selected_key(crate::state::TEMPORARY_TAB_KEY);

        let menu = bar.selected_menu(&host, &selection).unwrap();
        assert_eq!(menu.actions(), vec![TabAction::SaveView, TabAction::Discard]);

        assert!(bar.save_temp_view(&mut host, &mut selection));
        assert_eq!(host.temp_tab, None);
        assert_eq!(host.tabs.len(), 3);
        assert_eq!(host.tabs[2].label, "New View");
        assert_eq!(host.tabs[2].query, "err:*");
        assert_eq!(selection.selected_key(), Some(host.tabs[2].key.as_str()));
        assert_eq!(host.hook_names(), vec!["save_temp_view"]);
    }

    #[test]
    fn test_temp_view_discard() {
        let (bar, mut host, mut selection) = setup(two_tabs());
        host.temp_tab = Some(Tab::temporary("err:*", IssueSort::Date));
        selection.set_selected_key(crate::state::TEMPORARY_TAB_KEY);

        assert!(bar.discard_temp_view(&mut host, &mut selection));
        assert_eq!(host.temp_tab, None);
        assert_eq!(host.keys(), vec!["a", "b"]);
        assert_eq!(host.set_tabs_calls, 0);
        assert_eq!(selection.selected_key(), Some("a"));
        assert_eq!(host.hook_names(), vec!["discard_temp_view"]);

        assert!(!bar.discard_temp_view(&mut host, &mut selection));
    }

    #[test]
    fn test_items_show_menu_on_selected_or_initial_tab() {
        let (bar, mut host, mut selection) = setup(two_tabs());
        host.temp_tab = Some(Tab::temporary("err:*", IssueSort::Date));

        let items = bar.items(&host, &TabListState::default());
        assert_eq!(items.len(), 3);
        assert!(items[0].menu.is_some());
        assert!(items[1].menu.is_none());
        assert!(items[2].menu.is_none());
        assert_eq!(Location::parse(&items[2].href).unwrap().view_id(), None);

        selection.set_selected_key("b");
        let items = bar.items(&host, &selection);
        assert!(items[0].menu.is_none());
        let menu = items[1].menu.as_ref().unwrap();
        assert_eq!(
            menu.actions(),
            vec![TabAction::Rename, TabAction::Duplicate, TabAction::Delete]
        );
        let link = Location::parse(&items[1].href).unwrap();
        assert_eq!(link.view_id(), Some("b"));
        assert_eq!(link.param("query"), Some("assigned:me"));
    }

    #[test]
    fn test_new_view_flow() {
        let (bar, mut host, mut selection) = setup(two_tabs());

        assert!(bar.create_new_view(&mut host, &mut selection));
        let new_key = selection.selected_key().unwrap().to_string();
        assert!(host.new_view.is_new_view_active());
        assert_eq!(host.location.view_id(), Some(new_key.as_str()));
        assert_eq!(host.location.param("query"), Some(""));
        assert_eq!(
            host.new_view.on_new_view_saved().unwrap().pending_view_id(),
            Some(new_key.as_str())
        );
        // Creating a view has no hook of its own; the commit fires on_add_view
        assert!(host.hooks.is_empty());

        assert!(bar.commit_new_view_saved(&mut host, &mut selection, "Errors", "level:error", false));

        let created = host.tabs.iter().find(|t| t.key == new_key).unwrap();
        assert_eq!(created.label, "Errors");
        assert_eq!(created.query, "");
        assert_eq!(
            created.unsaved_changes,
            Some(UnsavedChanges::new("level:error", IssueSort::Date))
        );
        assert!(!host.new_view.is_new_view_active());

        let last = host.history.last().unwrap();
        assert_eq!(last.mode, HistoryMode::Replace);
        assert_eq!(last.location.param("query"), Some("level:error"));
        assert_eq!(last.location.param("sort"), Some("date"));
        assert_eq!(host.hook_names(), vec!["add_view"]);
    }

    #[test]
    fn test_new_view_commit_sees_changes_made_after_registration() {
        let (bar, mut host, mut selection) = setup(two_tabs());
        assert!(bar.create_new_view(&mut host, &mut selection));
        let new_key = selection.selected_key().unwrap().to_string();
        let registrations = host.new_view.registrations();

        // Rename another tab while the add-view flow is open
        assert!(bar.rename(&mut host, &mut selection, "b", "Mine"));
        assert!(host.new_view.registrations() > registrations);

        assert!(bar.commit_new_view_saved(&mut host, &mut selection, "Errors", "level:error", true));
        assert_eq!(host.tabs[1].label, "Mine");
        let created = host.tabs.iter().find(|t| t.key == new_key).unwrap();
        assert_eq!(created.query, "level:error");
        assert_eq!(created.unsaved_changes, None);
    }

    #[test]
    fn test_new_view_commit_refreshes_after_external_change() {
        let (bar, mut host, mut selection) = setup(two_tabs());
        assert!(bar.create_new_view(&mut host, &mut selection));

        // Host reloads its views behind the tab bar's back, no render
        host.tabs[0].label = "Reloaded".to_string();
        assert!(host
            .new_view
            .on_new_view_saved()
            .unwrap()
            .is_stale(&host.tabs, &host.location));

        assert!(bar.commit_new_view_saved(&mut host, &mut selection, "Errors", "q", true));
        assert_eq!(host.tabs[0].label, "Reloaded");
    }

    #[test]
    fn test_render_only_reregisters_on_change() {
        let (bar, mut host, _selection) = setup(two_tabs());
        let registrations = host.new_view.registrations();

        assert!(!bar.render(&mut host));
        assert_eq!(host.new_view.registrations(), registrations);

        host.location = host.location.clone().with_param("viewId", "b");
        assert!(bar.render(&mut host));
        assert_eq!(host.new_view.registrations(), registrations + 1);
    }

    #[test]
    fn test_commit_without_pending_view_is_noop() {
        let (bar, mut host, mut selection) = setup(two_tabs());
        assert!(!bar.commit_new_view_saved(&mut host, &mut selection, "X", "q", true));
        assert!(host.hooks.is_empty());
        assert!(host.history.is_empty());
    }

    #[test]
    fn test_commit_on_persisted_view_without_creation_is_ignored() {
        let (bar, mut host, mut selection) = setup(two_tabs());
        host.location = host.location.clone().with_param("viewId", "a");
        bar.render(&mut host);
        assert!(!host.new_view.is_new_view_active());

        assert!(!bar.commit_new_view_saved(&mut host, &mut selection, "Hijacked", "x", false));

        assert_eq!(host.tabs, two_tabs());
        assert_eq!(host.set_tabs_calls, 0);
        assert!(host.history.is_empty());
        assert!(host.hooks.is_empty());
    }

    #[test]
    fn test_new_view_commit_sorts_by_date() {
        let settings = Settings {
            default_sort: IssueSort::Freq,
            ..Default::default()
        };
        let bar = TabBar::new(settings, "a");
        let mut host = RecordingHost::new(two_tabs());
        let mut selection = TabListState::with_default("a");
        bar.render(&mut host);
        assert_eq!(bar.settings().default_sort, IssueSort::Freq);

        assert!(bar.create_new_view(&mut host, &mut selection));
        let new_key = selection.selected_key().unwrap().to_string();
        let created = host.tabs.iter().find(|t| t.key == new_key).unwrap();
        assert_eq!(created.query_sort, IssueSort::Freq);

        assert!(bar.commit_new_view_saved(&mut host, &mut selection, "E", "level:error", true));

        let committed = host.tabs.iter().find(|t| t.key == new_key).unwrap();
        assert_eq!(committed.query_sort, IssueSort::Date);
        assert_eq!(committed.query, "level:error");
        assert_eq!(host.location.param("sort"), Some("date"));
    }
}

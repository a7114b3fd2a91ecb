// Action menu shown on the selected tab.
// The menu depends only on the tab's state and how many persisted tabs exist.

use crate::state::TabState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabAction {
    /// Promote the temporary view.
    SaveView,
    /// Drop the temporary view.
    Discard,
    SaveChanges,
    DiscardChanges,
    Rename,
    Duplicate,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    Default,
    Primary,
    Danger,
}

impl TabAction {
    /// Stable item key.
    pub fn key(&self) -> &'static str {
        match self {
            Self::SaveView | Self::SaveChanges => "save-changes",
            Self::Discard | Self::DiscardChanges => "discard-changes",
            Self::Rename => "rename-tab",
            Self::Duplicate => "duplicate-tab",
            Self::Delete => "delete-tab",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::SaveView => "Save View",
            Self::Discard => "Discard",
            Self::SaveChanges => "Save Changes",
            Self::DiscardChanges => "Discard Changes",
            Self::Rename => "Rename",
            Self::Duplicate => "Duplicate",
            Self::Delete => "Delete",
        }
    }

    pub fn priority(&self) -> Priority {
        match self {
            Self::SaveView | Self::SaveChanges => Priority::Primary,
            Self::Delete => Priority::Danger,
            _ => Priority::Default,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEntry {
    Item(TabAction),
    Group {
        key: &'static str,
        items: Vec<TabAction>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabMenu {
    pub entries: Vec<MenuEntry>,
}

impl TabMenu {
    /// Every action in display order, groups flattened.
    pub fn actions(&self) -> Vec<TabAction> {
        self.entries
            .iter()
            .flat_map(|entry| match entry {
                MenuEntry::Item(action) => vec![*action],
                MenuEntry::Group { items, .. } => items.clone(),
            })
            .collect()
    }

    pub fn contains(&self, action: TabAction) -> bool {
        self.actions().contains(&action)
    }
}

/// Rename/Duplicate, plus Delete while more than one persisted tab exists.
fn default_actions(collection_len: usize) -> Vec<TabAction> {
    let mut actions = vec![TabAction::Rename, TabAction::Duplicate];
    if collection_len > 1 {
        actions.push(TabAction::Delete);
    }
    actions
}

pub fn menu_for(state: TabState, collection_len: usize) -> TabMenu {
    let entries = match state {
        TabState::Temporary => vec![
            MenuEntry::Item(TabAction::SaveView),
            MenuEntry::Item(TabAction::Discard),
        ],
        TabState::Unsaved => vec![
            MenuEntry::Group {
                key: "changed",
                items: vec![TabAction::SaveChanges, TabAction::DiscardChanges],
            },
            MenuEntry::Group {
                key: "default",
                items: default_actions(collection_len),
            },
        ],
        TabState::Normal => default_actions(collection_len)
            .into_iter()
            .map(MenuEntry::Item)
            .collect(),
    };
    TabMenu { entries }
}

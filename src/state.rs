// Tab record model shared by every module.
// Kept free of controller logic so it can be serialized and tested on its own.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Key reserved for the single temporary (unsaved, ad hoc) view.
pub const TEMPORARY_TAB_KEY: &str = "temporary-tab";

/// Sort orders an issue search can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum IssueSort {
    #[default]
    Date,
    New,
    Trends,
    Freq,
    User,
    Inbox,
    Priority,
}

impl IssueSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::New => "new",
            Self::Trends => "trends",
            Self::Freq => "freq",
            Self::User => "user",
            Self::Inbox => "inbox",
            Self::Priority => "priority",
        }
    }
}

impl fmt::Display for IssueSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown issue sort '{0}'")]
pub struct UnknownSort(pub String);

impl FromStr for IssueSort {
    type Err = UnknownSort;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "date" => Ok(Self::Date),
            "new" => Ok(Self::New),
            "trends" => Ok(Self::Trends),
            "freq" => Ok(Self::Freq),
            "user" => Ok(Self::User),
            "inbox" => Ok(Self::Inbox),
            "priority" => Ok(Self::Priority),
            other => Err(UnknownSort(other.to_string())),
        }
    }
}

/// Pending query/sort edit that has not been written back to the view.
/// Serialized as `[query, sort]`, the shape the web client uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, IssueSort)", into = "(String, IssueSort)")]
pub struct UnsavedChanges {
    pub query: String,
    pub sort: IssueSort,
}

impl UnsavedChanges {
    pub fn new(query: impl Into<String>, sort: IssueSort) -> Self {
        Self {
            query: query.into(),
            sort,
        }
    }
}

impl From<(String, IssueSort)> for UnsavedChanges {
    fn from((query, sort): (String, IssueSort)) -> Self {
        Self { query, sort }
    }
}

impl From<UnsavedChanges> for (String, IssueSort) {
    fn from(changes: UnsavedChanges) -> Self {
        (changes.query, changes.sort)
    }
}

/// One saved (or temporary) search view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tab {
    /// Server id once persisted; an ephemeral `_12345` token before that.
    pub id: String,
    /// Local identity used for selection and ordering.
    pub key: String,
    pub label: String,
    pub query: String,
    pub query_sort: IssueSort,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unsaved_changes: Option<UnsavedChanges>,
    /// Opaque payload owned by the host; never touched by tab operations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<serde_json::Value>,
}

/// Which menu path a tab is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabState {
    Temporary,
    Unsaved,
    Normal,
}

impl Tab {
    /// Creates a persisted view whose key equals its id.
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        query: impl Into<String>,
        query_sort: IssueSort,
    ) -> Self {
        let id = id.into();
        Self {
            key: id.clone(),
            id,
            label: label.into(),
            query: query.into(),
            query_sort,
            unsaved_changes: None,
            content: None,
        }
    }

    /// The ad hoc view shown after the persisted tabs.
    pub fn temporary(query: impl Into<String>, query_sort: IssueSort) -> Self {
        Self::new(TEMPORARY_TAB_KEY, "Unsaved", query, query_sort)
    }

    pub fn with_unsaved_changes(mut self, query: impl Into<String>, sort: IssueSort) -> Self {
        self.unsaved_changes = Some(UnsavedChanges::new(query, sort));
        self
    }

    pub fn is_temporary(&self) -> bool {
        self.key == TEMPORARY_TAB_KEY
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved_changes.is_some()
    }

    pub fn state(&self) -> TabState {
        if self.is_temporary() {
            TabState::Temporary
        } else if self.has_unsaved_changes() {
            TabState::Unsaved
        } else {
            TabState::Normal
        }
    }

    /// Query the tab currently shows: the pending edit if any, else the saved one.
    pub fn effective_query(&self) -> &str {
        self.unsaved_changes
            .as_ref()
            .map(|changes| changes.query.as_str())
            .unwrap_or(&self.query)
    }

    pub fn effective_sort(&self) -> IssueSort {
        self.unsaved_changes
            .as_ref()
            .map(|changes| changes.sort)
            .unwrap_or(self.query_sort)
    }
}

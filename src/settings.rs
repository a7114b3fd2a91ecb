use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{write_atomic, StoreError};
use crate::state::IssueSort;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Organization whose issue stream the tabs link into.
    pub org_slug: String,
    /// Label for views created from the add button or a promoted temporary view.
    pub new_view_label: String,
    /// Appended to a duplicated view's label.
    pub copy_suffix: String,
    /// Sort for newly created views and committed new-view queries.
    pub default_sort: IssueSort,
    /// Query params dropped whenever the tab bar navigates.
    pub pagination_params: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            org_slug: "sentry".to_string(),
            new_view_label: "New View".to_string(),
            copy_suffix: " (Copy)".to_string(),
            default_sort: IssueSort::Date,
            pagination_params: vec!["cursor".to_string(), "page".to_string()],
        }
    }
}

impl Settings {
    /// Path of the issue stream every tab link points at.
    pub fn issues_path(&self) -> String {
        format!("/organizations/{}/issues/", self.org_slug)
    }

    pub fn is_pagination_param(&self, name: &str) -> bool {
        self.pagination_params.iter().any(|p| p == name)
    }

    pub fn load(path: &Path) -> Self {
        if path.exists() {
            match fs::read_to_string(path) {
                Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                    log::warn!("[Settings] Failed to parse settings: {}, returning defaults", e);
                    Self::default()
                }),
                Err(e) => {
                    log::warn!("[Settings] Failed to read file: {}, returning defaults", e);
                    Self::default()
                }
            }
        } else {
            Self::default()
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(self)?;
        write_atomic(path, &json)
    }
}

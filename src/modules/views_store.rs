use crate::error::{write_atomic, StoreError};
use crate::state::Tab;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Saved views as the host persists them between sessions.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SavedViewsStore {
    /// RFC 3339 time of the last save.
    #[serde(default)]
    pub saved_at: Option<String>,
    pub views: Vec<Tab>,
}

impl SavedViewsStore {
    /// Snapshot of a tab collection. The temporary tab is never persisted.
    pub fn from_tabs(tabs: &[Tab]) -> Self {
        Self {
            saved_at: None,
            views: tabs.iter().filter(|t| !t.is_temporary()).cloned().collect(),
        }
    }

    /// Tabs ready to hand to the tab bar: temporary-key entries and repeated
    /// keys are dropped so every key is unique.
    pub fn into_tabs(self) -> Vec<Tab> {
        let mut seen = HashSet::new();
        self.views
            .into_iter()
            .filter(|tab| {
                if tab.is_temporary() {
                    log::warn!("[ViewsStore] Dropping persisted temporary view");
                    return false;
                }
                if !seen.insert(tab.key.clone()) {
                    log::warn!("[ViewsStore] Dropping duplicate view key '{}'", tab.key);
                    return false;
                }
                true
            })
            .collect()
    }

    pub fn load(path: &Path) -> Self {
        if path.exists() {
            match fs::read_to_string(path) {
                Ok(json) => match serde_json::from_str(&json) {
                    Ok(store) => return store,
                    Err(e) => log::warn!("[ViewsStore] Failed to parse {:?}: {}", path, e),
                },
                Err(e) => log::warn!("[ViewsStore] Failed to read {:?}: {}", path, e),
            }
        }

        SavedViewsStore::default()
    }

    pub fn save(&mut self, path: &Path) -> Result<(), StoreError> {
        self.saved_at = Some(chrono::Utc::now().to_rfc3339());
        let json = serde_json::to_string_pretty(self)?;
        write_atomic(path, &json)?;
        log::info!("[ViewsStore] Saved {} views to {:?}", self.views.len(), path);
        Ok(())
    }
}

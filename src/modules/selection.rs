// Selection is owned by the host tab list; the controller reads and writes it
// through this trait instead of reaching into ambient state.

/// Currently selected tab key, as held by the host tab-list widget.
pub trait SelectionState {
    fn selected_key(&self) -> Option<&str>;
    fn set_selected_key(&mut self, key: &str);
}

/// In-memory selection for hosts without their own widget state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabListState {
    default_selected_key: Option<String>,
    selected_key: Option<String>,
}

impl TabListState {
    /// Selection that reports `initial_key` until something is selected explicitly.
    pub fn with_default(initial_key: impl Into<String>) -> Self {
        Self {
            default_selected_key: Some(initial_key.into()),
            selected_key: None,
        }
    }

    /// True once a key has been set, as opposed to falling back to the default.
    pub fn is_initialized(&self) -> bool {
        self.selected_key.is_some()
    }
}

impl SelectionState for TabListState {
    fn selected_key(&self) -> Option<&str> {
        self.selected_key
            .as_deref()
            .or(self.default_selected_key.as_deref())
    }

    fn set_selected_key(&mut self, key: &str) {
        self.selected_key = Some(key.to_string());
    }
}

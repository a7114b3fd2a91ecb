// Pure navigation logic - no host imports allowed.
// Builds the URL targets the tab bar asks the router to visit.

use std::collections::BTreeMap;
use url::Url;

use crate::settings::Settings;
use crate::state::{IssueSort, Tab};

pub const QUERY_PARAM: &str = "query";
pub const SORT_PARAM: &str = "sort";
pub const VIEW_ID_PARAM: &str = "viewId";

/// Path plus decoded query params of the page the tab bar lives on.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Location {
    pub pathname: String,
    pub query: BTreeMap<String, String>,
}

impl Location {
    pub fn new(pathname: impl Into<String>) -> Self {
        Self {
            pathname: pathname.into(),
            query: BTreeMap::new(),
        }
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }

    /// Parses an absolute URL or a root-relative href like `/issues/?query=a`.
    pub fn parse(href: &str) -> Option<Self> {
        let base = Url::parse("http://localhost/").ok()?;
        let url = base.join(href.trim()).ok()?;
        Some(Self {
            pathname: url.path().to_string(),
            query: url.query_pairs().into_owned().collect(),
        })
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }

    /// The selected view id, ignoring an empty `viewId=`.
    pub fn view_id(&self) -> Option<&str> {
        self.param(VIEW_ID_PARAM).filter(|id| !id.is_empty())
    }

    pub fn to_href(&self) -> String {
        if self.query.is_empty() {
            return self.pathname.clone();
        }
        let query = self
            .query
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{}", self.pathname, query)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryMode {
    Push,
    Replace,
}

/// A navigation request handed to the host router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationTarget {
    pub location: Location,
    pub mode: HistoryMode,
}

impl NavigationTarget {
    pub fn href(&self) -> String {
        self.location.to_href()
    }
}

/// Current query params minus pagination cursors, which never survive a tab switch.
pub fn carried_params(location: &Location, settings: &Settings) -> BTreeMap<String, String> {
    location
        .query
        .iter()
        .filter(|(name, _)| !settings.is_pagination_param(name))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

/// Same page, carried params, then `overrides` layered on top.
pub fn navigation_target(
    location: &Location,
    settings: &Settings,
    overrides: &[(&str, String)],
    mode: HistoryMode,
) -> NavigationTarget {
    let mut query = carried_params(location, settings);
    for (name, value) in overrides {
        query.insert((*name).to_string(), value.clone());
    }
    NavigationTarget {
        location: Location {
            pathname: location.pathname.clone(),
            query,
        },
        mode,
    }
}

/// Overrides that point the page at a view's saved (or given) query and sort.
pub fn view_params(query: &str, sort: IssueSort, view_id: Option<&str>) -> Vec<(&'static str, String)> {
    let mut params = vec![
        (QUERY_PARAM, query.to_string()),
        (SORT_PARAM, sort.as_str().to_string()),
    ];
    if let Some(id) = view_id.filter(|id| !id.is_empty()) {
        params.push((VIEW_ID_PARAM, id.to_string()));
    }
    params
}

/// Link a tab item points at: its live query and sort, and its id unless temporary.
pub fn tab_href(tab: &Tab, location: &Location, settings: &Settings) -> String {
    let mut query = carried_params(location, settings);
    query.insert(QUERY_PARAM.to_string(), tab.effective_query().to_string());
    query.insert(SORT_PARAM.to_string(), tab.effective_sort().as_str().to_string());
    if tab.is_temporary() {
        query.remove(VIEW_ID_PARAM);
    } else {
        query.insert(VIEW_ID_PARAM.to_string(), tab.id.clone());
    }
    Location {
        pathname: settings.issues_path(),
        query,
    }
    .to_href()
}

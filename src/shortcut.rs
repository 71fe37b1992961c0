/// Data structures for SP Shortcuts
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const TITLE_MAX_LEN: usize = 50;
pub const DESCRIPTION_MAX_LEN: usize = 200;

/// A named path relative to a SharePoint site's base URL
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Shortcut {
    pub id: String,
    pub title: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Shortcut {
    pub fn new(id: &str, title: &str, path: &str) -> Shortcut {
        Shortcut {
            id: id.to_string(),
            title: title.to_string(),
            path: normalize_path(path),
            description: None,
        }
    }

    pub fn with_description(mut self, description: &str) -> Shortcut {
        self.description = non_empty(description);
        self
    }

    /// Case-insensitive title comparison used for duplicate detection
    pub fn title_matches(&self, title: &str) -> bool {
        self.title.to_lowercase() == title.to_lowercase()
    }
}

/// Prefix `/` unless the path already starts with one
pub fn normalize_path(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

pub(crate) fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    if s.is_empty() { None } else { Some(s.to_string()) }
}

/// Id for a user-created shortcut: `custom-<epoch ms>-<9 random chars>`
pub fn custom_id(timestamp_ms: f64) -> String {
    let random = Uuid::new_v4().simple().to_string();
    format!("custom-{}-{}", timestamp_ms as i64, &random[..9])
}

/// Id stamped with the browser clock
pub fn new_custom_id() -> String {
    custom_id(js_sys::Date::now())
}

/// Built-in shortcut sets.
///
/// `Standard` seeds storage on install and backs the options page reset.
/// `Extended` is the larger set the popup restores on reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultSet {
    Standard,
    Extended,
}

impl DefaultSet {
    pub fn shortcuts(self) -> Vec<Shortcut> {
        match self {
            DefaultSet::Standard => vec![
                Shortcut::new("sp-site-contents", "Site Contents", "/_layouts/15/viewlsts.aspx")
                    .with_description("View all lists and libraries in this site"),
                Shortcut::new("sp-site-settings", "Site Settings", "/_layouts/15/settings.aspx")
                    .with_description("Configure site settings and permissions"),
                Shortcut::new("sp-recycle-bin", "Recycle Bin", "/_layouts/15/RecycleBin.aspx")
                    .with_description("View and restore deleted items"),
                Shortcut::new("sp-site-permissions", "Site Permissions", "/_layouts/15/user.aspx")
                    .with_description("Manage site permissions and users"),
                Shortcut::new("sp-site-columns", "Site Columns", "/_layouts/15/mngfield.aspx")
                    .with_description("Manage site columns"),
                Shortcut::new(
                    "sp-term-store",
                    "Term Store Management",
                    "/_layouts/15/termstoremanager.aspx",
                )
                .with_description("Manage taxonomy and metadata"),
                Shortcut::new(
                    "sp-search-schema",
                    "Search Schema",
                    "/_layouts/15/listmanagedproperties.aspx?level=sitecol",
                )
                .with_description("Configure search managed properties"),
            ],
            DefaultSet::Extended => vec![
                Shortcut::new("sp-site-contents", "Site Contents", "/_layouts/15/viewlsts.aspx"),
                Shortcut::new("sp-site-settings", "Site Settings", "/_layouts/15/settings.aspx"),
                Shortcut::new("sp-recycle-bin", "Recycle Bin", "/_layouts/15/RecycleBin.aspx"),
                Shortcut::new("sp-app-catalog", "App Catalog", "/_catalogs/apps/Forms/AllItems.aspx"),
                Shortcut::new("sp-site-permissions", "Site Permissions", "/_layouts/15/user.aspx"),
                Shortcut::new("sp-web-parts", "Web Part Gallery", "/_catalogs/wp/Forms/AllItems.aspx"),
                Shortcut::new(
                    "sp-master-pages",
                    "Master Page Gallery",
                    "/_catalogs/masterpage/Forms/AllItems.aspx",
                ),
                Shortcut::new("sp-workflows", "Workflow Settings", "/_layouts/15/workflow.aspx"),
                Shortcut::new("sp-site-usage", "Site Usage", "/_layouts/15/usage.aspx"),
                Shortcut::new(
                    "sp-term-store",
                    "Term Store Management",
                    "/_layouts/15/termstoremanager.aspx",
                ),
            ],
        }
    }
}

/// Quick-fill entry offered by the options page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    pub title: &'static str,
    pub path: &'static str,
}

pub const TEMPLATES: &[Template] = &[
    Template { title: "Site Contents", path: "/_layouts/15/viewlsts.aspx" },
    Template { title: "Site Settings", path: "/_layouts/15/settings.aspx" },
    Template { title: "Recycle Bin", path: "/_layouts/15/RecycleBin.aspx" },
    Template { title: "Site Permissions", path: "/_layouts/15/user.aspx" },
    Template { title: "Site Columns", path: "/_layouts/15/mngfield.aspx" },
    Template { title: "Content Types", path: "/_layouts/15/mngctype.aspx" },
    Template { title: "Term Store Management", path: "/_layouts/15/termstoremanager.aspx" },
    Template { title: "Search Schema", path: "/_layouts/15/listmanagedproperties.aspx?level=sitecol" },
    Template { title: "Site Features", path: "/_layouts/15/ManageFeatures.aspx" },
    Template {
        title: "Site Collection Features",
        path: "/_layouts/15/ManageFeatures.aspx?Scope=Site",
    },
];

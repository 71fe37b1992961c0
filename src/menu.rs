/// Context menu projection: the menu tree is derived from the shortcut list
/// and rebuilt whole on every change.

use crate::error::ShortcutError;
use crate::messages::SiteUrlResponse;
use crate::shortcut::Shortcut;
use crate::storage::ShortcutList;
use serde::{Deserialize, Serialize};

pub const ROOT_MENU_ID: &str = "sp-shortcuts";
pub const ROOT_MENU_TITLE: &str = "SP Shortcuts";
pub const SEPARATOR_ID: &str = "separator";
pub const SETTINGS_ID: &str = "open-settings";

/// Pages the menu is shown on
pub const DOCUMENT_URL_PATTERNS: [&str; 2] = ["*://*.sharepoint.com/*", "*://*/*.sharepoint.com/*"];

/// One `chrome.contextMenus.create` call
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,
    pub contexts: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_url_patterns: Option<Vec<String>>,
}

impl MenuItem {
    fn page_item(id: &str, title: &str) -> MenuItem {
        MenuItem {
            id: id.to_string(),
            parent_id: Some(ROOT_MENU_ID.to_string()),
            title: Some(title.to_string()),
            item_type: None,
            contexts: vec!["page".to_string()],
            document_url_patterns: None,
        }
    }

    fn scoped(mut self) -> MenuItem {
        self.document_url_patterns = Some(DOCUMENT_URL_PATTERNS.iter().map(|p| p.to_string()).collect());
        self
    }
}

/// Items to create, in creation order: root, one child per shortcut, separator, settings
pub fn project_menu(list: &ShortcutList) -> Vec<MenuItem> {
    let mut root = MenuItem::page_item(ROOT_MENU_ID, ROOT_MENU_TITLE).scoped();
    root.parent_id = None;

    let mut separator = MenuItem::page_item(SEPARATOR_ID, "");
    separator.title = None;
    separator.item_type = Some("separator".to_string());

    std::iter::once(root)
        .chain(
            list.shortcuts
                .iter()
                .map(|s| MenuItem::page_item(&s.id, &s.title).scoped()),
        )
        .chain([separator, MenuItem::page_item(SETTINGS_ID, "Settings")])
        .collect()
}

/// What a click on a menu item asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    OpenSettings,
    Navigate(Shortcut),
    /// Root, separator, or an id no longer in the list
    Ignore,
}

pub fn classify_click(menu_item_id: &str, list: &ShortcutList) -> MenuAction {
    if menu_item_id == SETTINGS_ID {
        return MenuAction::OpenSettings;
    }
    match list.find_by_id(menu_item_id) {
        Some(shortcut) => MenuAction::Navigate(shortcut.clone()),
        None => MenuAction::Ignore,
    }
}

/// `siteUrl + path`, or `NoSiteUrl` when the page gave no usable answer
pub fn navigation_target(
    response: Option<&SiteUrlResponse>,
    shortcut: &Shortcut,
) -> Result<String, ShortcutError> {
    response
        .and_then(SiteUrlResponse::usable_url)
        .map(|site_url| format!("{}{}", site_url, shortcut.path))
        .ok_or(ShortcutError::NoSiteUrl)
}

/// Serializes menu rebuilds. A request that arrives while a rebuild is
/// running is folded into one extra pass after it, so the menu is never
/// torn down and recreated by two passes at once.
#[derive(Debug, Default)]
pub struct RebuildGate {
    running: bool,
    dirty: bool,
}

impl RebuildGate {
    /// Returns true when the caller should start a rebuild now
    pub fn request(&mut self) -> bool {
        if self.running {
            self.dirty = true;
            false
        } else {
            self.running = true;
            true
        }
    }

    /// Called when a pass ends. Returns true when another pass is due.
    pub fn finish(&mut self) -> bool {
        if self.dirty {
            self.dirty = false;
            true
        } else {
            self.running = false;
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create_test_list() -> ShortcutList {
        ShortcutList::new(vec![
            Shortcut::new("sp-site-contents", "Site Contents", "/_layouts/15/viewlsts.aspx"),
            Shortcut::new("custom-1-abc", "Team Lists", "/Lists/Team"),
        ])
    }

    #[test]
    fn test_projection_order() {
        let items = project_menu(&create_test_list());
        let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();

        assert_eq!(ids, vec!["sp-shortcuts", "sp-site-contents", "custom-1-abc", "separator", "open-settings"]);
        assert!(items[1..].iter().all(|i| i.parent_id.as_deref() == Some(ROOT_MENU_ID)));
        assert_eq!(items[2].title.as_deref(), Some("Team Lists"));
    }

    #[test]
    fn test_empty_list_keeps_settings() {
        let items = project_menu(&ShortcutList::default());
        let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();

        assert_eq!(ids, vec!["sp-shortcuts", "separator", "open-settings"]);
    }

    #[test]
    fn test_projection_is_idempotent() {
        let list = create_test_list();
        assert_eq!(project_menu(&list), project_menu(&list));
    }

    #[test]
    fn test_wire_shape() {
        let items = project_menu(&create_test_list());

        assert_eq!(
            serde_json::to_value(&items[0]).unwrap(),
            json!({
                "id": "sp-shortcuts",
                "title": "SP Shortcuts",
                "contexts": ["page"],
                "documentUrlPatterns": ["*://*.sharepoint.com/*", "*://*/*.sharepoint.com/*"]
            })
        );
        assert_eq!(
            serde_json::to_value(&items[3]).unwrap(),
            json!({"id": "separator", "parentId": "sp-shortcuts", "type": "separator", "contexts": ["page"]})
        );
    }

    #[test]
    fn test_classify_click() {
        let list = create_test_list();

        assert_eq!(classify_click("open-settings", &list), MenuAction::OpenSettings);
        assert_eq!(classify_click("custom-1-abc", &list), MenuAction::Navigate(list.shortcuts[1].clone()));
        assert_eq!(classify_click("sp-removed", &list), MenuAction::Ignore);
    }

    #[test]
    fn test_navigation_target() {
        let shortcut = Shortcut::new("sp-recycle-bin", "Recycle Bin", "/_layouts/15/RecycleBin.aspx");
        let response = SiteUrlResponse::new("https://t.sharepoint.com/sites/hr".to_string());

        assert_eq!(
            navigation_target(Some(&response), &shortcut),
            Ok("https://t.sharepoint.com/sites/hr/_layouts/15/RecycleBin.aspx".to_string())
        );
    }

    #[test]
    fn test_navigation_without_answer_fails() {
        let shortcut = Shortcut::new("a", "A", "/a");
        let empty = SiteUrlResponse { site_url: None };

        assert_eq!(navigation_target(None, &shortcut), Err(ShortcutError::NoSiteUrl));
        assert_eq!(navigation_target(Some(&empty), &shortcut), Err(ShortcutError::NoSiteUrl));
    }

    #[test]
    fn test_rebuild_gate_runs_one_pass_at_a_time() {
        let mut gate = RebuildGate::default();

        assert!(gate.request());
        assert!(!gate.request());
        assert!(!gate.request());

        // Both queued requests fold into a single follow-up pass
        assert!(gate.finish());
        assert!(!gate.finish());

        assert!(gate.request());
    }

    #[test]
    fn test_rebuild_gate_idle_after_single_pass() {
        let mut gate = RebuildGate::default();

        assert!(gate.request());
        assert!(!gate.finish());
        assert!(gate.request());
    }
}

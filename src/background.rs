/// Background service worker: seeds storage, keeps the context menu in sync
/// with the list and turns menu clicks into new tabs.

use crate::chrome::{self, ChromeSyncArea};
use crate::error::ShortcutError;
use crate::menu::{MenuAction, RebuildGate, classify_click, navigation_target, project_menu};
use crate::messages::{Ack, Request};
use crate::storage::STORAGE_KEY;
use crate::store::ShortcutStore;
use std::cell::RefCell;

thread_local! {
    static REBUILD: RefCell<RebuildGate> = RefCell::new(RebuildGate::default());
}

fn store() -> ShortcutStore<ChromeSyncArea> {
    ShortcutStore::new(ChromeSyncArea)
}

/// Tear the menu down and recreate it from the persisted list
async fn rebuild_context_menus() -> Result<(), ShortcutError> {
    let list = store().load().await?;
    chrome::remove_all_context_menus().await?;
    for item in project_menu(&list) {
        chrome::create_context_menu(&item)?;
    }
    log::info!("Context menu rebuilt with {} shortcuts", list.len());
    Ok(())
}

/// Rebuild now, or after the pass already in flight
async fn request_rebuild() {
    if !REBUILD.with(|gate| gate.borrow_mut().request()) {
        log::debug!("Context menu rebuild queued");
        return;
    }
    loop {
        if let Err(e) = rebuild_context_menus().await {
            log::error!("Failed to rebuild context menu: {}", e);
        }
        if !REBUILD.with(|gate| gate.borrow_mut().finish()) {
            break;
        }
    }
}

/// Extension installed or updated
pub async fn on_installed() {
    log::info!("SP Shortcuts extension installed");
    if let Err(e) = store().seed_defaults().await {
        log::error!("Failed to seed default shortcuts: {}", e);
    }
    request_rebuild().await;
}

/// Rebuild whenever any surface persists a new list
pub async fn on_storage_changed(key: &str) {
    if key == STORAGE_KEY {
        request_rebuild().await;
    }
}

pub async fn on_menu_clicked(menu_item_id: String, tab_id: Option<i32>) {
    let list = match store().load().await {
        Ok(list) => list,
        Err(e) => {
            log::error!("Failed to load shortcuts: {}", e);
            return;
        }
    };

    match classify_click(&menu_item_id, &list) {
        MenuAction::OpenSettings => {
            if let Err(e) = chrome::open_options_page().await {
                log::error!("{}", e);
            }
        }
        MenuAction::Navigate(shortcut) => {
            let response = match tab_id {
                Some(tab_id) => chrome::query_site_url(tab_id).await,
                None => None,
            };
            match navigation_target(response.as_ref(), &shortcut) {
                Ok(url) => {
                    log::debug!("Opening {} for {}", url, shortcut.title);
                    if let Err(e) = chrome::open_tab(&url).await {
                        log::error!("{}", e);
                    }
                }
                Err(e) => log::error!("{}", e),
            }
        }
        MenuAction::Ignore => log::debug!("Ignoring click on menu item {}", menu_item_id),
    }
}

/// Handle a runtime message. Returns the response to send, if any.
pub async fn on_message(request: Request) -> Option<Ack> {
    log::debug!("Background received {:?}", request);
    match request {
        Request::UpdateContextMenus => {
            request_rebuild().await;
            Some(Ack { success: true })
        }
        Request::GetSiteUrl => None,
    }
}

/// Bridge to the chrome.* extension APIs

use crate::error::ShortcutError;
use crate::messages::{Request, SiteUrlResponse};
use crate::store::{AreaListener, StorageArea};
use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::prelude::*;

// Import JS bridge functions
#[wasm_bindgen(module = "/extension/bridge.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn storageGet(key: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn storageSet(key: &str, value: JsValue) -> Result<(), JsValue>;

    fn onStorageChanged(callback: &Closure<dyn Fn(String, JsValue)>);

    #[wasm_bindgen(catch)]
    async fn removeAllContextMenus() -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    fn createContextMenu(item: JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn sendMessageToTab(tab_id: i32, message: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn sendRuntimeMessage(message: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn createTab(url: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn openOptionsPage() -> Result<(), JsValue>;

    fn downloadFile(data: &str, filename: &str);

    fn confirmDialog(message: &str) -> bool;
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, ShortcutError> {
    // Maps as plain objects so chrome.* sees ordinary JSON
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    value
        .serialize(&serializer)
        .map_err(|e| ShortcutError::Bridge(format!("Failed to serialize: {:?}", e)))
}

fn from_js(value: JsValue) -> Result<Option<Value>, ShortcutError> {
    if value.is_null() || value.is_undefined() {
        return Ok(None);
    }
    serde_wasm_bindgen::from_value(value)
        .map(Some)
        .map_err(|e| ShortcutError::Storage(format!("Failed to parse storage: {:?}", e)))
}

/// `chrome.storage.sync`, shared across the user's browsers
#[derive(Clone, Copy, Default)]
pub struct ChromeSyncArea;

impl StorageArea for ChromeSyncArea {
    async fn get(&self, key: &str) -> Result<Option<Value>, ShortcutError> {
        let value = storageGet(key)
            .await
            .map_err(|e| ShortcutError::Storage(format!("Failed to get storage: {:?}", e)))?;
        from_js(value)
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), ShortcutError> {
        storageSet(key, to_js(&value)?)
            .await
            .map_err(|e| ShortcutError::Storage(format!("Failed to save storage: {:?}", e)))
    }

    fn subscribe(&self, listener: AreaListener) {
        let callback = Closure::wrap(Box::new(move |key: String, new_value: JsValue| {
            match from_js(new_value) {
                Ok(value) => listener(&key, value),
                Err(e) => log::error!("{}", e),
            }
        }) as Box<dyn Fn(String, JsValue)>);
        onStorageChanged(&callback);
        // Listener lives as long as the extension page
        callback.forget();
    }
}

pub async fn remove_all_context_menus() -> Result<(), ShortcutError> {
    removeAllContextMenus()
        .await
        .map_err(|e| ShortcutError::Bridge(format!("Failed to clear menus: {:?}", e)))
}

pub fn create_context_menu<T: Serialize>(item: &T) -> Result<(), ShortcutError> {
    createContextMenu(to_js(item)?)
        .map_err(|e| ShortcutError::Bridge(format!("Failed to create menu item: {:?}", e)))
}

/// Ask a tab for its site URL. `None` when the page does not answer.
pub async fn query_site_url(tab_id: i32) -> Option<SiteUrlResponse> {
    let message = to_js(&Request::GetSiteUrl).ok()?;
    match sendMessageToTab(tab_id, message).await {
        Ok(response) if !response.is_undefined() && !response.is_null() => {
            serde_wasm_bindgen::from_value(response).ok()
        }
        Ok(_) => None,
        Err(e) => {
            log::debug!("Tab {} did not answer: {:?}", tab_id, e);
            None
        }
    }
}

/// Ask the background worker to rebuild the context menu
pub async fn request_menu_rebuild() -> Result<(), ShortcutError> {
    sendRuntimeMessage(to_js(&Request::UpdateContextMenus)?)
        .await
        .map(|_| ())
        .map_err(|e| ShortcutError::Bridge(format!("Failed to reach background: {:?}", e)))
}

pub async fn open_tab(url: &str) -> Result<(), ShortcutError> {
    createTab(url)
        .await
        .map_err(|e| ShortcutError::Bridge(format!("Failed to open tab: {:?}", e)))
}

pub async fn open_options_page() -> Result<(), ShortcutError> {
    openOptionsPage()
        .await
        .map_err(|e| ShortcutError::Bridge(format!("Failed to open options: {:?}", e)))
}

pub fn download_json(data: &str, filename: &str) {
    downloadFile(data, filename);
}

pub fn confirm(message: &str) -> bool {
    confirmDialog(message)
}

pub fn iso_now() -> String {
    js_sys::Date::new_0().to_iso_string().into()
}

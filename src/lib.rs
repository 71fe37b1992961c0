/// SP Shortcuts - Chrome Extension for SharePoint admin page shortcuts
/// Built with Rust + WASM + Yew

pub mod editor;
pub mod error;
pub mod menu;
pub mod messages;
pub mod shortcut;
pub mod site_url;
pub mod storage;
pub mod store;
pub mod transfer;

mod background;
mod chrome;
mod content;
pub mod ui;

use messages::Request;
use wasm_bindgen::prelude::*;

// Set up panic hook for better error messages in the browser console.
// Not registered as the start function in test builds, where
// wasm-bindgen-test provides its own entry point.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

fn parse_request(request: JsValue) -> Option<Request> {
    match serde_wasm_bindgen::from_value(request) {
        Ok(request) => Some(request),
        Err(e) => {
            log::debug!("Ignoring unknown message: {:?}", e);
            None
        }
    }
}

fn to_response<T: serde::Serialize>(response: Option<T>) -> JsValue {
    response
        .and_then(|r| serde_wasm_bindgen::to_value(&r).ok())
        .unwrap_or(JsValue::UNDEFINED)
}

// Background service worker entry points

/// `chrome.storage.onChanged` for the sync area, one call per changed key
#[wasm_bindgen]
pub async fn on_storage_changed(key: String) {
    background::on_storage_changed(&key).await;
}

#[wasm_bindgen]
pub async fn on_installed() {
    background::on_installed().await;
}

#[wasm_bindgen]
pub async fn on_menu_clicked(menu_item_id: String, tab_id: Option<i32>) {
    background::on_menu_clicked(menu_item_id, tab_id).await;
}

/// Response for `chrome.runtime.onMessage`, or `undefined`
#[wasm_bindgen]
pub async fn on_runtime_message(request: JsValue) -> JsValue {
    match parse_request(request) {
        Some(request) => to_response(background::on_message(request).await),
        None => JsValue::UNDEFINED,
    }
}

// Content script entry points

#[wasm_bindgen]
pub fn start_content() {
    if let Err(e) = content::show_indicator() {
        log::warn!("Could not show indicator: {:?}", e);
    }
}

#[wasm_bindgen]
pub fn on_page_message(request: JsValue) -> JsValue {
    to_response(parse_request(request).and_then(content::on_page_message))
}

#[wasm_bindgen]
pub fn get_site_url() -> Option<String> {
    content::snapshot_page().map(|page| site_url::resolve_site_url(&page))
}

// Start the Yew app for the popup
#[wasm_bindgen]
pub fn start_popup() {
    yew::Renderer::<ui::popup::App>::new().render();
}

// Start the Yew app for the options page
#[wasm_bindgen]
pub fn start_options() {
    yew::Renderer::<ui::options::OptionsPage>::new().render();
}

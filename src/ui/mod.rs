/// UI module exports
pub mod components;
pub mod options;
pub mod popup;

use crate::chrome::{self, ChromeSyncArea};
use crate::editor::Status;
use crate::error::ShortcutError;
use crate::storage::ShortcutList;
use crate::store::ShortcutStore;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use yew::prelude::*;

const STATUS_MS: i32 = 3000;

pub(crate) fn store() -> ShortcutStore<ChromeSyncArea> {
    ShortcutStore::new(ChromeSyncArea)
}

/// Save the list, then ask the background worker to rebuild the menu
pub(crate) async fn persist(list: &ShortcutList) -> Result<(), ShortcutError> {
    store().save(list).await?;
    if let Err(e) = chrome::request_menu_rebuild().await {
        // The storage listener in the worker rebuilds as well
        log::warn!("{}", e);
    }
    Ok(())
}

/// Show a status message and clear it after a few seconds
pub(crate) fn show_status(handle: &UseStateHandle<Option<Status>>, status: Status) {
    handle.set(Some(status));

    let handle = handle.clone();
    if let Some(window) = web_sys::window() {
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            Closure::once_into_js(move || handle.set(None)).unchecked_ref(),
            STATUS_MS,
        );
    }
}

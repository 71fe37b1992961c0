/// Content script: reads the visited page and answers site URL queries

use crate::messages::{Request, SiteUrlResponse};
use crate::site_url::{PageSnapshot, resolve_site_url};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, Window};

const META_SELECTOR: &str = r#"meta[name="msapplication-starturl"], meta[property="og:url"]"#;
const INDICATOR_ID: &str = "sp-shortcuts-indicator";
const INDICATOR_MS: i32 = 3000;

fn page_context_url(window: &Window) -> Option<String> {
    let context = js_sys::Reflect::get(window, &JsValue::from_str("_spPageContextInfo")).ok()?;
    if context.is_undefined() || context.is_null() {
        return None;
    }
    js_sys::Reflect::get(&context, &JsValue::from_str("webAbsoluteUrl"))
        .ok()?
        .as_string()
}

fn meta_urls(document: &Document) -> Vec<String> {
    let Ok(nodes) = document.query_selector_all(META_SELECTOR) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .filter_map(|meta| meta.get_attribute("content"))
        .collect()
}

pub fn snapshot_page() -> Option<PageSnapshot> {
    let window = web_sys::window()?;
    let location = window.location();
    Some(PageSnapshot {
        web_absolute_url: page_context_url(&window),
        href: location.href().ok()?,
        origin: location.origin().ok()?,
        meta_urls: window.document().map(|d| meta_urls(&d)).unwrap_or_default(),
    })
}

/// Answer for a message from the background worker, if it is ours
pub fn on_page_message(request: Request) -> Option<SiteUrlResponse> {
    match request {
        Request::GetSiteUrl => {
            let page = snapshot_page()?;
            Some(SiteUrlResponse::new(resolve_site_url(&page)))
        }
        Request::UpdateContextMenus => None,
    }
}

/// Badge shown briefly so the user can tell the extension is active on the page
pub fn show_indicator() -> Result<(), JsValue> {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return Ok(());
    };
    if document.get_element_by_id(INDICATOR_ID).is_some() {
        return Ok(());
    }
    let Some(body) = document.body() else {
        return Ok(());
    };

    let indicator: HtmlElement = document.create_element("div")?.dyn_into()?;
    indicator.set_id(INDICATOR_ID);
    indicator.set_text_content(Some("SP Shortcuts Active"));
    let style = indicator.style();
    for (name, value) in [
        ("position", "fixed"),
        ("top", "10px"),
        ("right", "10px"),
        ("background", "#0078d4"),
        ("color", "white"),
        ("padding", "5px 10px"),
        ("border-radius", "3px"),
        ("font-size", "12px"),
        ("z-index", "10000"),
        ("font-family", "'Segoe UI', Tahoma, Geneva, Verdana, sans-serif"),
        ("opacity", "0.8"),
        ("pointer-events", "none"),
    ] {
        style.set_property(name, value)?;
    }
    body.append_child(&indicator)?;

    let remove = Closure::once_into_js(move || indicator.remove());
    if let Some(window) = web_sys::window() {
        window.set_timeout_with_callback_and_timeout_and_arguments_0(remove.unchecked_ref(), INDICATOR_MS)?;
    }
    Ok(())
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn document() -> Document {
        web_sys::window().and_then(|w| w.document()).unwrap()
    }

    #[wasm_bindgen_test]
    fn test_indicator_added_once() {
        show_indicator().unwrap();
        show_indicator().unwrap();

        let found = document().query_selector_all(&format!("#{}", INDICATOR_ID)).unwrap();
        assert_eq!(found.length(), 1);
        let indicator = document().get_element_by_id(INDICATOR_ID).unwrap();
        assert_eq!(indicator.text_content().as_deref(), Some("SP Shortcuts Active"));
        indicator.remove();
    }

    #[wasm_bindgen_test]
    fn test_meta_urls_in_document_order() {
        let document = document();
        let body = document.body().unwrap();
        let mut added = Vec::new();
        for (attr, name, content) in [
            ("name", "msapplication-starturl", "https://t.sharepoint.com/sites/hr/SitePages/Home.aspx"),
            ("property", "og:url", "https://example.com/page"),
            ("name", "description", "ignored"),
        ] {
            let meta = document.create_element("meta").unwrap();
            meta.set_attribute(attr, name).unwrap();
            meta.set_attribute("content", content).unwrap();
            body.append_child(&meta).unwrap();
            added.push(meta);
        }

        assert_eq!(
            meta_urls(&document),
            vec![
                "https://t.sharepoint.com/sites/hr/SitePages/Home.aspx".to_string(),
                "https://example.com/page".to_string(),
            ]
        );
        for meta in added {
            meta.remove();
        }
    }

    #[wasm_bindgen_test]
    fn test_snapshot_reads_location() {
        let origin = web_sys::window().unwrap().location().origin().unwrap();
        let page = snapshot_page().unwrap();

        assert_eq!(page.origin, origin);
        assert_eq!(page.web_absolute_url, None);
    }

    #[wasm_bindgen_test]
    fn test_only_site_url_requests_are_answered() {
        assert!(on_page_message(Request::UpdateContextMenus).is_none());
        assert!(on_page_message(Request::GetSiteUrl).is_some());
    }
}

/// Reusable UI components

use crate::editor::{ListView, Status, StatusKind};
use patternfly_yew::prelude::*;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct StatusBannerProps {
    #[prop_or_default]
    pub status: Option<Status>,
}

#[function_component(StatusBanner)]
pub fn status_banner(props: &StatusBannerProps) -> Html {
    let Some(status) = &props.status else {
        return html! {};
    };

    let alert_type = match status.kind {
        StatusKind::Success => AlertType::Success,
        StatusKind::Error => AlertType::Danger,
        StatusKind::Warning => AlertType::Warning,
        StatusKind::Info => AlertType::Info,
    };

    html! {
        <div class="status-container">
            <Alert r#type={alert_type} title={status.message.clone()} inline={true}>
            </Alert>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ShortcutListProps {
    pub view: ListView,
    pub on_delete: Callback<usize>,
    /// Edit buttons are only shown when set
    #[prop_or_default]
    pub on_edit: Option<Callback<usize>>,
    pub empty_message: AttrValue,
    #[prop_or_default]
    pub empty_hint: Option<AttrValue>,
}

#[function_component(ShortcutListView)]
pub fn shortcut_list_view(props: &ShortcutListProps) -> Html {
    if props.view.is_empty() {
        return html! {
            <div class="empty-state">
                <p>{props.empty_message.clone()}</p>
                if let Some(hint) = &props.empty_hint {
                    <p class="empty-state-hint">{hint.clone()}</p>
                }
            </div>
        };
    }

    html! {
        <div class="shortcuts-list">
            {for props.view.rows.iter().map(|row| {
                let index = row.index;
                let class = if row.editing { "shortcut-item editing" } else { "shortcut-item" };

                html! {
                    <div key={row.id.clone()} class={class}>
                        <div class="shortcut-info">
                            <div class="shortcut-title">{&row.title}</div>
                            <div class="shortcut-path">{&row.path}</div>
                            if let Some(description) = &row.description {
                                <div class="shortcut-description">{description}</div>
                            }
                        </div>
                        <div class="shortcut-actions">
                            if let Some(on_edit) = &props.on_edit {
                                <Button
                                    onclick={on_edit.reform(move |_| index)}
                                    variant={ButtonVariant::Secondary}
                                >
                                    {"✏️"}
                                </Button>
                            }
                            <Button
                                onclick={props.on_delete.reform(move |_| index)}
                                variant={ButtonVariant::Danger}
                            >
                                {"Delete"}
                            </Button>
                        </div>
                    </div>
                }
            })}
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ConfirmPanelProps {
    pub title: AttrValue,
    pub message: AttrValue,
    pub on_confirm: Callback<()>,
    pub on_cancel: Callback<()>,
}

/// Inline confirmation for destructive actions
#[function_component(ConfirmPanel)]
pub fn confirm_panel(props: &ConfirmPanelProps) -> Html {
    html! {
        <div class="confirm-panel">
            <Alert r#type={AlertType::Warning} title={props.title.to_string()} inline={true}>
                {props.message.clone()}
            </Alert>
            <div class="confirm-actions">
                <Button onclick={props.on_confirm.reform(|_| ())} variant={ButtonVariant::Danger}>
                    {"Yes"}
                </Button>
                <Button onclick={props.on_cancel.reform(|_| ())} variant={ButtonVariant::Secondary}>
                    {"No"}
                </Button>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ImportPickerProps {
    /// Called with the text of the chosen file
    pub on_load: Callback<String>,
    pub on_error: Callback<String>,
}

/// Button backed by a hidden file input that reads one JSON file
#[function_component(ImportPicker)]
pub fn import_picker(props: &ImportPickerProps) -> Html {
    let input_ref = use_node_ref();

    let on_click = {
        let input_ref = input_ref.clone();
        Callback::from(move |_| {
            if let Some(input) = input_ref.cast::<HtmlInputElement>() {
                input.click();
            }
        })
    };

    let on_change = {
        let on_load = props.on_load.clone();
        let on_error = props.on_error.clone();
        Callback::from(move |e: Event| {
            let Some(input) = e.target_dyn_into::<HtmlInputElement>() else {
                return;
            };
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                return;
            };
            // Allow picking the same file again
            input.set_value("");

            let on_load = on_load.clone();
            let on_error = on_error.clone();
            spawn_local(async move {
                match JsFuture::from(file.text()).await {
                    Ok(text) => on_load.emit(text.as_string().unwrap_or_default()),
                    Err(e) => on_error.emit(format!("Failed to read file: {:?}", e)),
                }
            });
        })
    };

    html! {
        <>
            <input
                ref={input_ref}
                type="file"
                accept=".json,application/json"
                class="hidden-input"
                onchange={on_change}
            />
            <Button onclick={on_click} variant={ButtonVariant::Secondary}>
                {"📤 Import"}
            </Button>
        </>
    }
}

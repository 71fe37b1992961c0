/// Popup UI for SP Shortcuts

use crate::chrome;
use crate::editor::{EditorSession, Status, Surface, render};
use crate::error::ShortcutError;
use crate::shortcut::new_custom_id;
use crate::storage::ShortcutList;
use crate::transfer::{PLAIN_EXPORT_FILENAME, export_json};
use crate::ui::components::{ImportPicker, ShortcutListView, StatusBanner};
use crate::ui::{persist, show_status, store};
use patternfly_yew::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Clone, PartialEq)]
enum AppState {
    Loading,
    Idle,
    Error(String),
}

#[function_component(App)]
pub fn app() -> Html {
    let state = use_state(|| AppState::Loading);
    let session = use_state(|| EditorSession::new(Surface::Popup, ShortcutList::default()));
    let remote_list = use_state(|| None::<ShortcutList>);
    let status = use_state(|| None::<Status>);

    // Load storage on mount and follow changes made elsewhere
    {
        let state = state.clone();
        let remote_list = remote_list.clone();
        use_effect_with((), move |_| {
            {
                let remote_list = remote_list.clone();
                store().on_change(move |list| remote_list.set(Some(list.clone())));
            }
            spawn_local(async move {
                match store().load().await {
                    Ok(list) => {
                        remote_list.set(Some(list));
                        state.set(AppState::Idle);
                    }
                    Err(e) => state.set(AppState::Error(format!("Failed to load: {}", e))),
                }
            });
            || ()
        });
    }

    {
        let session = session.clone();
        use_effect_with((*remote_list).clone(), move |remote| {
            if let Some(list) = remote {
                let mut next = (*session).clone();
                next.replace_list(list.clone());
                session.set(next);
            }
            || ()
        });
    }

    // Persist a changed session, then commit it
    let commit = {
        let session = session.clone();
        let status = status.clone();
        Callback::from(move |(next, message): (EditorSession, Status)| {
            let session = session.clone();
            let status = status.clone();
            spawn_local(async move {
                match persist(&next.list).await {
                    Ok(()) => {
                        session.set(next);
                        show_status(&status, message);
                    }
                    Err(e) => show_status(&status, Status::error(&e)),
                }
            });
        })
    };

    let on_title_input = {
        let session = session.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                let mut next = (*session).clone();
                next.draft.title = input.value();
                session.set(next);
            }
        })
    };

    let on_path_input = {
        let session = session.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                let mut next = (*session).clone();
                next.draft.path = input.value();
                session.set(next);
            }
        })
    };

    let on_add = {
        let session = session.clone();
        let status = status.clone();
        let commit = commit.clone();
        Callback::from(move |_| {
            let mut next = (*session).clone();
            match next.submit(new_custom_id) {
                Ok(message) => commit.emit((next, message)),
                Err(e) => show_status(&status, Status::error(&e)),
            }
        })
    };

    let on_delete = {
        let session = session.clone();
        let status = status.clone();
        let commit = commit.clone();
        Callback::from(move |index: usize| {
            let mut next = (*session).clone();
            if let Err(e) = next.request_delete(index) {
                show_status(&status, Status::error(&e));
                return;
            }
            let Some((_, message)) = next.confirm_text() else {
                return;
            };
            if !chrome::confirm(&message) {
                return;
            }
            match next.confirm() {
                Some(Ok(message)) => commit.emit((next, message)),
                Some(Err(e)) => show_status(&status, Status::error(&e)),
                None => {}
            }
        })
    };

    let on_reset = {
        let session = session.clone();
        let commit = commit.clone();
        Callback::from(move |_| {
            let mut next = (*session).clone();
            next.request_reset();
            let confirmed = next
                .confirm_text()
                .map(|(_, message)| chrome::confirm(&message))
                .unwrap_or(false);
            if !confirmed {
                return;
            }
            if let Some(Ok(message)) = next.confirm() {
                commit.emit((next, message));
            }
        })
    };

    let on_export = {
        let session = session.clone();
        let status = status.clone();
        Callback::from(move |_| {
            match export_json(&session.list, Surface::Popup.export_format(), &chrome::iso_now()) {
                Ok(json) => {
                    chrome::download_json(&json, PLAIN_EXPORT_FILENAME);
                    show_status(&status, Status::success("Shortcuts exported successfully!"));
                }
                Err(e) => {
                    log::error!("Export failed: {}", e);
                    show_status(&status, Status::error(&e));
                }
            }
        })
    };

    // The popup imports without asking first
    let on_import = {
        let session = session.clone();
        let status = status.clone();
        let commit = commit.clone();
        Callback::from(move |text: String| {
            let mut next = (*session).clone();
            if let Err(e) = next.request_import(&text) {
                show_status(&status, Status::import_error(&e));
                return;
            }
            if let Some(Ok(message)) = next.confirm() {
                commit.emit((next, message));
            }
        })
    };

    let on_import_error = {
        let status = status.clone();
        Callback::from(move |message: String| {
            show_status(&status, Status::error(&ShortcutError::Bridge(message)));
        })
    };

    let view = render(&session.list, None);

    html! {
        <div class="padding-20">
            <h1 class="popup-title">{"SP Shortcuts"}</h1>

            {match &*state {
                AppState::Loading => html! {
                    <div class="loading-text-center">
                        <Spinner />
                    </div>
                },
                AppState::Error(err) => html! {
                    <Alert r#type={AlertType::Danger} title={"Error"} inline={true}>
                        {err.clone()}
                    </Alert>
                },
                AppState::Idle => html! {
                    <ShortcutListView
                        view={view}
                        on_delete={on_delete}
                        empty_message={"No shortcuts configured"}
                    />
                },
            }}

            <div class="add-form">
                <input
                    type="text"
                    placeholder="Title"
                    value={session.draft.title.clone()}
                    oninput={on_title_input}
                    class="form-input"
                />
                <input
                    type="text"
                    placeholder="/_layouts/15/viewlsts.aspx"
                    value={session.draft.path.clone()}
                    oninput={on_path_input}
                    class="form-input"
                />
                <Button onclick={on_add} variant={ButtonVariant::Primary} block={true}>
                    {"Add Shortcut"}
                </Button>
            </div>

            <StatusBanner status={(*status).clone()} />

            <div class="flex-row-gap">
                <Button onclick={on_export} variant={ButtonVariant::Secondary}>
                    {"📥 Export"}
                </Button>
                <ImportPicker on_load={on_import} on_error={on_import_error} />
                <Button onclick={on_reset} variant={ButtonVariant::Danger}>
                    {"Reset to Defaults"}
                </Button>
            </div>

            <p class="footer-popup">
                {"SP Shortcuts v0.1.0"}
            </p>
        </div>
    }
}

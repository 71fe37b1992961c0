/// Options page: full shortcut editor

use crate::chrome;
use crate::editor::{
    EditMode, EditorSession, Status, Surface, description_remaining, render, title_remaining,
};
use crate::error::ShortcutError;
use crate::shortcut::{DESCRIPTION_MAX_LEN, TEMPLATES, TITLE_MAX_LEN, Template, new_custom_id};
use crate::storage::ShortcutList;
use crate::transfer::{dated_export_filename, export_json};
use crate::ui::components::{ConfirmPanel, ImportPicker, ShortcutListView, StatusBanner};
use crate::ui::{persist, show_status, store};
use patternfly_yew::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

#[derive(Clone, PartialEq)]
enum PageState {
    Loading,
    Idle,
    Error(String),
}

/// Remaining-character hint, coloured as the limit gets close
fn char_hint(label: &str, remaining: i64) -> Html {
    let class = if remaining < 10 {
        "help-text danger"
    } else if remaining < 25 {
        "help-text warning"
    } else {
        "help-text"
    };
    html! {
        <small class={class}>{format!("{} ({} characters remaining)", label, remaining)}</small>
    }
}

#[function_component(OptionsPage)]
pub fn options_page() -> Html {
    let state = use_state(|| PageState::Loading);
    let session = use_state(|| EditorSession::new(Surface::Options, ShortcutList::default()));
    let remote_list = use_state(|| None::<ShortcutList>);
    let status = use_state(|| None::<Status>);

    // Load storage on mount and follow changes made by the popup
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
                        state.set(PageState::Idle);
                    }
                    Err(e) => state.set(PageState::Error(format!("Failed to load: {}", e))),
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

    // Apply a change that does not touch storage
    let update = {
        let session = session.clone();
        move |change: &dyn Fn(&mut EditorSession)| {
            let mut next = (*session).clone();
            change(&mut next);
            session.set(next);
        }
    };

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
        let update = update.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                update(&|s: &mut EditorSession| s.draft.title = input.value());
            }
        })
    };

    let on_path_input = {
        let update = update.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                update(&|s: &mut EditorSession| s.draft.path = input.value());
            }
        })
    };

    let on_description_input = {
        let update = update.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlTextAreaElement>() {
                update(&|s: &mut EditorSession| s.draft.description = input.value());
            }
        })
    };

    let on_submit = {
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

    let on_edit = {
        let session = session.clone();
        let status = status.clone();
        Callback::from(move |index: usize| {
            let mut next = (*session).clone();
            match next.start_edit(index) {
                Ok(()) => session.set(next),
                Err(e) => show_status(&status, Status::error(&e)),
            }
        })
    };

    let on_cancel_edit = {
        let update = update.clone();
        let status = status.clone();
        Callback::from(move |_| {
            update(&|s: &mut EditorSession| s.cancel_edit());
            show_status(&status, Status::warning("Edit cancelled."));
        })
    };

    let on_keydown = {
        let session = session.clone();
        let status = status.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() != "Escape" {
                return;
            }
            let mut next = (*session).clone();
            let cancelled = next.escape();
            session.set(next);
            if let Some(message) = cancelled {
                show_status(&status, message);
            }
        })
    };

    let on_template = {
        let update = update.clone();
        let status = status.clone();
        Callback::from(move |template: Template| {
            update(&|s: &mut EditorSession| s.apply_template(&template));
            show_status(
                &status,
                Status::success("Template loaded! You can modify the details and save."),
            );
        })
    };

    let on_delete = {
        let session = session.clone();
        let status = status.clone();
        Callback::from(move |index: usize| {
            let mut next = (*session).clone();
            match next.request_delete(index) {
                Ok(()) => session.set(next),
                Err(e) => show_status(&status, Status::error(&e)),
            }
        })
    };

    let on_reset = {
        let update = update.clone();
        Callback::from(move |_| update(&|s: &mut EditorSession| s.request_reset()))
    };

    let on_confirm = {
        let session = session.clone();
        let status = status.clone();
        let commit = commit.clone();
        Callback::from(move |_| {
            let mut next = (*session).clone();
            match next.confirm() {
                Some(Ok(message)) => commit.emit((next, message)),
                Some(Err(e)) => {
                    session.set(next);
                    show_status(&status, Status::error(&e));
                }
                None => {}
            }
        })
    };

    let on_dismiss = {
        let update = update.clone();
        Callback::from(move |_| update(&|s: &mut EditorSession| s.dismiss()))
    };

    let on_export = {
        let session = session.clone();
        let status = status.clone();
        Callback::from(move |_| {
            if session.list.is_empty() {
                show_status(&status, Status::warning("No shortcuts to export."));
                return;
            }
            let now = chrome::iso_now();
            match export_json(&session.list, Surface::Options.export_format(), &now) {
                Ok(json) => {
                    chrome::download_json(&json, &dated_export_filename(&now));
                    show_status(&status, Status::success("Shortcuts exported successfully!"));
                }
                Err(e) => {
                    log::error!("Export failed: {}", e);
                    show_status(&status, Status::error(&e));
                }
            }
        })
    };

    let on_import = {
        let session = session.clone();
        let status = status.clone();
        Callback::from(move |text: String| {
            let mut next = (*session).clone();
            match next.request_import(&text) {
                Ok(()) => session.set(next),
                Err(e) => show_status(&status, Status::import_error(&e)),
            }
        })
    };

    let on_import_error = {
        let status = status.clone();
        Callback::from(move |message: String| {
            show_status(&status, Status::error(&ShortcutError::Bridge(message)));
        })
    };

    let is_editing = matches!(session.mode, EditMode::Editing { .. });
    let view = render(&session.list, session.editing_index());
    let count_label = view.count_label.clone();

    html! {
        <div class="container" onkeydown={on_keydown}>
            <div class="header">
                <h1 class="main-title">{"SP Shortcuts Settings"}</h1>
                <span class="count-badge">{count_label}</span>
            </div>

            <StatusBanner status={(*status).clone()} />

            if let Some((title, message)) = session.confirm_text() {
                <ConfirmPanel
                    title={title}
                    message={message}
                    on_confirm={on_confirm}
                    on_cancel={on_dismiss}
                />
            }

            <div class="options-layout">
                <div class="list-panel">
                    {match &*state {
                        PageState::Loading => html! {
                            <div class="loading-text-center">
                                <Spinner />
                                <p class="loading-text">{"Loading shortcuts..."}</p>
                            </div>
                        },
                        PageState::Error(err) => html! {
                            <Alert r#type={AlertType::Danger} title={"Error"} inline={true}>
                                {err.clone()}
                            </Alert>
                        },
                        PageState::Idle => html! {
                            <ShortcutListView
                                view={view}
                                on_delete={on_delete}
                                on_edit={Some(on_edit)}
                                empty_message={"No shortcuts configured"}
                                empty_hint={Some(AttrValue::from("Add your first SharePoint shortcut using the form on the right."))}
                            />
                        },
                    }}

                    <div class="flex-row-gap">
                        <Button onclick={on_export} variant={ButtonVariant::Secondary}>
                            {"📥 Export"}
                        </Button>
                        <ImportPicker on_load={on_import} on_error={on_import_error} />
                        <Button onclick={on_reset} variant={ButtonVariant::Danger}>
                            {"Reset to Defaults"}
                        </Button>
                    </div>
                </div>

                <div class="editor-panel">
                    <h2 class="editor-title">
                        {if is_editing { "Edit Shortcut" } else { "Add New Shortcut" }}
                    </h2>

                    <label class="form-label">{"Title"}</label>
                    <input
                        type="text"
                        maxlength={TITLE_MAX_LEN.to_string()}
                        value={session.draft.title.clone()}
                        oninput={on_title_input}
                        class="form-input"
                    />
                    {char_hint("Display name in the menu", title_remaining(&session.draft))}

                    <label class="form-label">{"Path"}</label>
                    <input
                        type="text"
                        placeholder="/_layouts/15/viewlsts.aspx"
                        value={session.draft.path.clone()}
                        oninput={on_path_input}
                        class="form-input"
                    />

                    <label class="form-label">{"Description"}</label>
                    <textarea
                        maxlength={DESCRIPTION_MAX_LEN.to_string()}
                        value={session.draft.description.clone()}
                        oninput={on_description_input}
                        class="form-textarea"
                    />
                    {char_hint("Optional", description_remaining(&session.draft))}

                    <div class="flex-row-gap">
                        <Button onclick={on_submit} variant={ButtonVariant::Primary}>
                            {if is_editing { "Update Shortcut" } else { "Add Shortcut" }}
                        </Button>
                        if is_editing {
                            <Button onclick={on_cancel_edit} variant={ButtonVariant::Secondary}>
                                {"Cancel"}
                            </Button>
                        }
                    </div>

                    <h3 class="templates-title">{"Quick Templates"}</h3>
                    <div class="templates">
                        {for TEMPLATES.iter().map(|template| {
                            let template = *template;
                            html! {
                                <Button
                                    key={template.title}
                                    onclick={on_template.reform(move |_| template)}
                                    variant={ButtonVariant::Tertiary}
                                >
                                    {template.title}
                                </Button>
                            }
                        })}
                    </div>
                </div>
            </div>
        </div>
    }
}

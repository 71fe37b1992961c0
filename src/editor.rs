/// Editor core shared by the popup and the options page.
///
/// All operations work on an in-memory `EditorSession`. The UI clones the
/// session, applies an operation, persists the resulting list and only then
/// commits the clone, so a failed save leaves the visible state untouched.

use crate::error::ShortcutError;
use crate::shortcut::{DESCRIPTION_MAX_LEN, DefaultSet, TITLE_MAX_LEN, Template};
use crate::storage::{ShortcutDraft, ShortcutList, ValidationMessages};
use crate::transfer::{ExportFormat, parse_import};

/// Which UI presentation a session belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Popup,
    Options,
}

impl Surface {
    pub fn messages(self) -> ValidationMessages {
        match self {
            Surface::Popup => ValidationMessages {
                missing_fields: "Please fill in both title and path",
                duplicate_title: "A shortcut with this title already exists",
            },
            Surface::Options => ValidationMessages {
                missing_fields: "Please fill in both title and path fields.",
                duplicate_title: "A shortcut with this title already exists.",
            },
        }
    }

    /// Set restored by "reset to defaults"
    pub fn default_set(self) -> DefaultSet {
        match self {
            Surface::Popup => DefaultSet::Extended,
            Surface::Options => DefaultSet::Standard,
        }
    }

    pub fn export_format(self) -> ExportFormat {
        match self {
            Surface::Popup => ExportFormat::Plain,
            Surface::Options => ExportFormat::Envelope,
        }
    }
}

/// Edits and deletes carry the shortcut id as well as its position, so a
/// list saved by another surface can move the position without changing
/// which shortcut is targeted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditMode {
    #[default]
    Idle,
    Editing { index: usize, id: String },
}

/// An action waiting for the user to confirm it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingConfirm {
    Delete { index: usize, id: String },
    Reset,
    Import(ShortcutList),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
    Warning,
    Info,
}

/// Transient message shown after an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub kind: StatusKind,
    pub message: String,
}

impl Status {
    pub fn success(message: &str) -> Self {
        Status { kind: StatusKind::Success, message: message.to_string() }
    }

    pub fn warning(message: &str) -> Self {
        Status { kind: StatusKind::Warning, message: message.to_string() }
    }

    pub fn info(message: &str) -> Self {
        Status { kind: StatusKind::Info, message: message.to_string() }
    }

    pub fn error(err: &ShortcutError) -> Self {
        Status { kind: StatusKind::Error, message: err.to_string() }
    }

    pub fn import_error(err: &ShortcutError) -> Self {
        Status {
            kind: StatusKind::Error,
            message: format!("Error importing shortcuts: {}", err),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorSession {
    pub surface: Surface,
    pub list: ShortcutList,
    pub mode: EditMode,
    pub draft: ShortcutDraft,
    pub pending: Option<PendingConfirm>,
}

impl EditorSession {
    pub fn new(surface: Surface, list: ShortcutList) -> Self {
        EditorSession {
            surface,
            list,
            mode: EditMode::Idle,
            draft: ShortcutDraft::default(),
            pending: None,
        }
    }

    pub fn editing_index(&self) -> Option<usize> {
        match self.mode {
            EditMode::Editing { index, .. } => Some(index),
            EditMode::Idle => None,
        }
    }

    /// Take a list persisted elsewhere. An edit or pending delete follows its
    /// shortcut to the new position and is dropped if the shortcut is gone.
    pub fn replace_list(&mut self, list: ShortcutList) {
        self.list = list;
        self.relocate_edit();
        let vanished = match &mut self.pending {
            Some(PendingConfirm::Delete { index, id }) => match self.list.position_of(id) {
                Some(position) => {
                    *index = position;
                    false
                }
                None => true,
            },
            _ => false,
        };
        if vanished {
            self.pending = None;
        }
    }

    pub fn start_edit(&mut self, index: usize) -> Result<(), ShortcutError> {
        let shortcut = self.list.get(index).ok_or(ShortcutError::IndexOutOfRange(index))?;
        self.draft = ShortcutDraft {
            title: shortcut.title.clone(),
            path: shortcut.path.clone(),
            description: shortcut.description.clone().unwrap_or_default(),
        };
        self.mode = EditMode::Editing { index, id: shortcut.id.clone() };
        Ok(())
    }

    pub fn cancel_edit(&mut self) {
        self.reset_form();
    }

    /// Fill the form from a template without touching the list
    pub fn apply_template(&mut self, template: &Template) {
        self.draft.title = template.title.to_string();
        self.draft.path = template.path.to_string();
        self.draft.description.clear();
    }

    /// Add or update from the draft. `new_id` is only called when adding.
    pub fn submit(&mut self, new_id: impl FnOnce() -> String) -> Result<Status, ShortcutError> {
        let messages = self.surface.messages();
        let status = match self.mode {
            EditMode::Editing { index, .. } => {
                self.list.update(index, &self.draft, &messages)?;
                Status::success("Shortcut updated successfully!")
            }
            EditMode::Idle => {
                self.list.add(&self.draft, new_id(), &messages)?;
                Status::success("Shortcut added successfully!")
            }
        };
        self.reset_form();
        Ok(status)
    }

    /// Remove an entry and keep the edit pointing at the same shortcut
    pub fn delete(&mut self, index: usize) -> Result<Status, ShortcutError> {
        self.list.remove(index)?;
        self.relocate_edit();
        Ok(Status::success("Shortcut deleted successfully!"))
    }

    pub fn reset_to_defaults(&mut self) -> Status {
        self.list = ShortcutList::defaults(self.surface.default_set());
        self.reset_form();
        Status::success("Reset to default shortcuts successfully!")
    }

    pub fn import(&mut self, list: ShortcutList) -> Status {
        self.list = list;
        self.reset_form();
        Status::success("Shortcuts imported successfully!")
    }

    /// Parse an import file; on success the import waits for confirmation
    pub fn request_import(&mut self, text: &str) -> Result<(), ShortcutError> {
        let list = parse_import(text)?;
        self.pending = Some(PendingConfirm::Import(list));
        Ok(())
    }

    pub fn request_delete(&mut self, index: usize) -> Result<(), ShortcutError> {
        let shortcut = self.list.get(index).ok_or(ShortcutError::IndexOutOfRange(index))?;
        self.pending = Some(PendingConfirm::Delete { index, id: shortcut.id.clone() });
        Ok(())
    }

    pub fn request_reset(&mut self) {
        self.pending = Some(PendingConfirm::Reset);
    }

    /// Run the pending action, if any
    pub fn confirm(&mut self) -> Option<Result<Status, ShortcutError>> {
        let pending = self.pending.take()?;
        Some(match pending {
            PendingConfirm::Delete { index, .. } => self.delete(index),
            PendingConfirm::Reset => Ok(self.reset_to_defaults()),
            PendingConfirm::Import(list) => Ok(self.import(list)),
        })
    }

    pub fn dismiss(&mut self) {
        self.pending = None;
    }

    /// Escape key: cancel the edit, else close the confirmation. Returns a status for a cancelled edit.
    pub fn escape(&mut self) -> Option<Status> {
        if self.editing_index().is_some() {
            self.cancel_edit();
            Some(Status::warning("Edit cancelled."))
        } else {
            self.dismiss();
            None
        }
    }

    /// Heading and body for the confirmation prompt
    pub fn confirm_text(&self) -> Option<(&'static str, String)> {
        let pending = self.pending.as_ref()?;
        Some(match (self.surface, pending) {
            (Surface::Popup, PendingConfirm::Delete { .. }) => {
                ("Delete Shortcut", "Are you sure you want to delete this shortcut?".to_string())
            }
            (Surface::Options, PendingConfirm::Delete { index, .. }) => {
                let title = self.list.get(*index).map(|s| s.title.as_str()).unwrap_or_default();
                (
                    "Delete Shortcut",
                    format!("Are you sure you want to delete \"{}\"? This action cannot be undone.", title),
                )
            }
            (Surface::Popup, PendingConfirm::Reset) => (
                "Reset to Defaults",
                "This will remove all custom shortcuts and reset to defaults. Continue?".to_string(),
            ),
            (Surface::Options, PendingConfirm::Reset) => (
                "Reset to Defaults",
                "This will remove all custom shortcuts and reset to the default SharePoint shortcuts. This action cannot be undone."
                    .to_string(),
            ),
            (_, PendingConfirm::Import(list)) => (
                "Import Shortcuts",
                format!(
                    "This will replace all current shortcuts with {} imported shortcuts. Continue?",
                    list.len()
                ),
            ),
        })
    }

    /// Point the edit at its shortcut's current position, or end it
    fn relocate_edit(&mut self) {
        let EditMode::Editing { id, .. } = &self.mode else {
            return;
        };
        match self.list.position_of(id) {
            Some(index) => {
                let id = id.clone();
                self.mode = EditMode::Editing { index, id };
            }
            None => self.reset_form(),
        }
    }

    fn reset_form(&mut self) {
        self.mode = EditMode::Idle;
        self.draft = ShortcutDraft::default();
    }
}

/// One row of the rendered list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub index: usize,
    pub id: String,
    pub title: String,
    pub path: String,
    pub description: Option<String>,
    pub editing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    pub rows: Vec<RowView>,
    pub count_label: String,
}

impl ListView {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub fn render(list: &ShortcutList, editing_index: Option<usize>) -> ListView {
    let rows = list
        .shortcuts
        .iter()
        .enumerate()
        .map(|(index, s)| RowView {
            index,
            id: s.id.clone(),
            title: s.title.clone(),
            path: s.path.clone(),
            description: s.description.clone(),
            editing: editing_index == Some(index),
        })
        .collect();

    let count = list.len();
    ListView {
        rows,
        count_label: format!("{} shortcut{}", count, if count == 1 { "" } else { "s" }),
    }
}

/// Characters left before the limit, negative once over it
pub fn remaining_chars(text: &str, max: usize) -> i64 {
    max as i64 - text.chars().count() as i64
}

pub fn title_remaining(draft: &ShortcutDraft) -> i64 {
    remaining_chars(&draft.title, TITLE_MAX_LEN)
}

pub fn description_remaining(draft: &ShortcutDraft) -> i64 {
    remaining_chars(&draft.description, DESCRIPTION_MAX_LEN)
}

/// Ordered shortcut list and its persisted form in chrome.storage.sync

use crate::error::ShortcutError;
use crate::shortcut::{DefaultSet, Shortcut, non_empty, normalize_path};
use serde::{Deserialize, Serialize};

/// Key the list is stored under
pub const STORAGE_KEY: &str = "shortcuts";

/// The canonical ordered list. Order is insertion order and drives menu order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(transparent)]
pub struct ShortcutList {
    pub shortcuts: Vec<Shortcut>,
}

/// Title, path and description as typed into a form
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShortcutDraft {
    pub title: String,
    pub path: String,
    pub description: String,
}

impl ShortcutDraft {
    pub fn new(title: &str, path: &str) -> Self {
        ShortcutDraft {
            title: title.to_string(),
            path: path.to_string(),
            description: String::new(),
        }
    }
}

/// Messages reported back to the user for rejected drafts
#[derive(Debug, Clone, Copy)]
pub struct ValidationMessages {
    pub missing_fields: &'static str,
    pub duplicate_title: &'static str,
}

impl ShortcutList {
    pub fn new(shortcuts: Vec<Shortcut>) -> Self {
        ShortcutList { shortcuts }
    }

    pub fn defaults(set: DefaultSet) -> Self {
        ShortcutList::new(set.shortcuts())
    }

    /// Decode the raw storage value; a missing key means the standard defaults
    pub fn from_stored(raw: Option<serde_json::Value>) -> Result<Self, ShortcutError> {
        match raw {
            None | Some(serde_json::Value::Null) => Ok(ShortcutList::defaults(DefaultSet::Standard)),
            Some(value) => Ok(serde_json::from_value(value)?),
        }
    }

    pub fn to_stored(&self) -> Result<serde_json::Value, ShortcutError> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn len(&self) -> usize {
        self.shortcuts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shortcuts.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Shortcut> {
        self.shortcuts.get(index)
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Shortcut> {
        self.shortcuts.iter().find(|s| s.id == id)
    }

    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.shortcuts.iter().position(|s| s.id == id)
    }

    /// Whether another entry (other than `except`) already uses this title
    pub fn has_title(&self, title: &str, except: Option<usize>) -> bool {
        self.shortcuts
            .iter()
            .enumerate()
            .any(|(i, s)| Some(i) != except && s.title_matches(title))
    }

    /// Append a new shortcut built from the draft. Returns its index.
    pub fn add(
        &mut self,
        draft: &ShortcutDraft,
        id: String,
        messages: &ValidationMessages,
    ) -> Result<usize, ShortcutError> {
        let shortcut = self.validate(draft, id, None, messages)?;
        self.shortcuts.push(shortcut);
        Ok(self.shortcuts.len() - 1)
    }

    /// Replace the entry at `index`, keeping its id
    pub fn update(
        &mut self,
        index: usize,
        draft: &ShortcutDraft,
        messages: &ValidationMessages,
    ) -> Result<(), ShortcutError> {
        let id = self
            .get(index)
            .map(|s| s.id.clone())
            .ok_or(ShortcutError::IndexOutOfRange(index))?;
        let shortcut = self.validate(draft, id, Some(index), messages)?;
        self.shortcuts[index] = shortcut;
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<Shortcut, ShortcutError> {
        if index < self.shortcuts.len() {
            Ok(self.shortcuts.remove(index))
        } else {
            Err(ShortcutError::IndexOutOfRange(index))
        }
    }

    fn validate(
        &self,
        draft: &ShortcutDraft,
        id: String,
        editing: Option<usize>,
        messages: &ValidationMessages,
    ) -> Result<Shortcut, ShortcutError> {
        let title = draft.title.trim();
        let path = draft.path.trim();

        if title.is_empty() || path.is_empty() {
            return Err(ShortcutError::MissingFields(messages.missing_fields.to_string()));
        }

        if self.has_title(title, editing) {
            return Err(ShortcutError::DuplicateTitle(messages.duplicate_title.to_string()));
        }

        Ok(Shortcut {
            id,
            title: title.to_string(),
            path: normalize_path(path),
            description: non_empty(&draft.description),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MESSAGES: ValidationMessages = ValidationMessages {
        missing_fields: "missing",
        duplicate_title: "duplicate",
    };

    fn create_test_list() -> ShortcutList {
        ShortcutList::new(vec![
            Shortcut::new("sp-site-contents", "Site Contents", "/_layouts/15/viewlsts.aspx"),
            Shortcut::new("sp-recycle-bin", "Recycle Bin", "/_layouts/15/RecycleBin.aspx"),
            Shortcut::new("custom-1-abc", "Lists", "/Lists"),
        ])
    }

    #[test]
    fn test_missing_key_yields_standard_defaults() {
        let list = ShortcutList::from_stored(None).unwrap();
        assert_eq!(list, ShortcutList::defaults(DefaultSet::Standard));

        let list = ShortcutList::from_stored(Some(serde_json::Value::Null)).unwrap();
        assert_eq!(list.len(), 7);
    }

    #[test]
    fn test_stored_empty_list_is_kept() {
        let list = ShortcutList::from_stored(Some(serde_json::json!([]))).unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn test_stored_shape_is_bare_array() {
        let value = create_test_list().to_stored().unwrap();
        assert!(value.is_array());
        assert_eq!(value[2]["id"], "custom-1-abc");
        assert_eq!(ShortcutList::from_stored(Some(value)).unwrap(), create_test_list());
    }

    #[test]
    fn test_add_normalizes_path() {
        let mut list = create_test_list();
        let index = list
            .add(&ShortcutDraft::new("  Usage ", "_layouts/15/usage.aspx"), "custom-2-x".to_string(), &MESSAGES)
            .unwrap();

        assert_eq!(index, 3);
        assert_eq!(list.len(), 4);
        assert_eq!(list.shortcuts[3].title, "Usage");
        assert_eq!(list.shortcuts[3].path, "/_layouts/15/usage.aspx");
        assert_eq!(list.shortcuts[3].description, None);
    }

    #[test]
    fn test_add_rejects_duplicate_title() {
        let mut list = create_test_list();
        let result = list.add(&ShortcutDraft::new("recycle BIN", "/other"), "x".to_string(), &MESSAGES);

        assert_eq!(result, Err(ShortcutError::DuplicateTitle("duplicate".to_string())));
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_add_rejects_blank_fields() {
        let mut list = create_test_list();

        let no_title = list.add(&ShortcutDraft::new("   ", "/p"), "x".to_string(), &MESSAGES);
        let no_path = list.add(&ShortcutDraft::new("T", ""), "x".to_string(), &MESSAGES);

        assert_eq!(no_title, Err(ShortcutError::MissingFields("missing".to_string())));
        assert_eq!(no_path, Err(ShortcutError::MissingFields("missing".to_string())));
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_update_keeps_id_and_allows_own_title() {
        let mut list = create_test_list();
        let mut draft = ShortcutDraft::new("RECYCLE BIN", "RecycleBin.aspx");
        draft.description = "Deleted items".to_string();

        list.update(1, &draft, &MESSAGES).unwrap();

        assert_eq!(list.shortcuts[1].id, "sp-recycle-bin");
        assert_eq!(list.shortcuts[1].title, "RECYCLE BIN");
        assert_eq!(list.shortcuts[1].path, "/RecycleBin.aspx");
        assert_eq!(list.shortcuts[1].description.as_deref(), Some("Deleted items"));
    }

    #[test]
    fn test_update_rejects_other_title() {
        let mut list = create_test_list();
        let result = list.update(1, &ShortcutDraft::new("lists", "/x"), &MESSAGES);

        assert!(matches!(result, Err(ShortcutError::DuplicateTitle(_))));
        assert_eq!(list, create_test_list());
    }

    #[test]
    fn test_remove_exact_entry() {
        let mut list = create_test_list();
        let removed = list.remove(1).unwrap();

        assert_eq!(removed.id, "sp-recycle-bin");
        assert_eq!(list.len(), 2);
        assert_eq!(list.shortcuts[0].id, "sp-site-contents");
        assert_eq!(list.shortcuts[1].id, "custom-1-abc");
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut list = create_test_list();
        assert_eq!(list.remove(3), Err(ShortcutError::IndexOutOfRange(3)));
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_find_by_id() {
        let list = create_test_list();
        assert_eq!(list.find_by_id("custom-1-abc").map(|s| s.title.as_str()), Some("Lists"));
        assert!(list.find_by_id("missing").is_none());
    }
}

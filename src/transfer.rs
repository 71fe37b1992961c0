/// JSON import and export of the shortcut list

use crate::error::ShortcutError;
use crate::shortcut::{Shortcut, normalize_path};
use crate::storage::ShortcutList;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const EXPORT_VERSION: &str = "1.0";

/// Filename used by the popup, which exports the bare array
pub const PLAIN_EXPORT_FILENAME: &str = "sharepoint-shortcuts.json";

/// Versioned export written by the options page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExportEnvelope {
    pub version: String,
    pub export_date: String,
    pub shortcuts: Vec<Shortcut>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// `[ {...}, ... ]`
    Plain,
    /// `{version, exportDate, shortcuts}`
    Envelope,
}

/// Pretty-printed export document. `export_date` is an ISO-8601 timestamp.
pub fn export_json(
    list: &ShortcutList,
    format: ExportFormat,
    export_date: &str,
) -> Result<String, ShortcutError> {
    let json = match format {
        ExportFormat::Plain => serde_json::to_string_pretty(&list.shortcuts)?,
        ExportFormat::Envelope => serde_json::to_string_pretty(&ExportEnvelope {
            version: EXPORT_VERSION.to_string(),
            export_date: export_date.to_string(),
            shortcuts: list.shortcuts.clone(),
        })?,
    };
    Ok(json)
}

/// `sharepoint-shortcuts-YYYY-MM-DD.json` from an ISO-8601 timestamp
pub fn dated_export_filename(export_date: &str) -> String {
    let day = export_date.split('T').next().unwrap_or(export_date);
    format!("sharepoint-shortcuts-{}.json", day)
}

/// Parse an import file in either export shape.
///
/// Every entry must carry a non-empty string `id`, `title` and `path`, and
/// ids and titles (ignoring case) must be unique. A single bad entry rejects
/// the whole file.
pub fn parse_import(text: &str) -> Result<ShortcutList, ShortcutError> {
    let data: Value = serde_json::from_str(text)?;

    let entries = match &data {
        Value::Array(entries) => entries,
        Value::Object(map) => match map.get("shortcuts") {
            Some(Value::Array(entries)) => entries,
            _ => return Err(ShortcutError::InvalidFormat),
        },
        _ => return Err(ShortcutError::InvalidFormat),
    };

    let mut shortcuts: Vec<Shortcut> = Vec::with_capacity(entries.len());
    for entry in entries {
        let shortcut = parse_entry(entry)?;
        if shortcuts.iter().any(|s| s.id == shortcut.id) {
            return Err(ShortcutError::DuplicateImportId(shortcut.id));
        }
        if shortcuts.iter().any(|s| s.title_matches(&shortcut.title)) {
            return Err(ShortcutError::DuplicateImportTitle(shortcut.title));
        }
        shortcuts.push(shortcut);
    }

    Ok(ShortcutList::new(shortcuts))
}

fn parse_entry(entry: &Value) -> Result<Shortcut, ShortcutError> {
    let field = |name: &str| {
        entry
            .get(name)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .ok_or(ShortcutError::InvalidEntry)
    };

    Ok(Shortcut {
        id: field("id")?,
        title: field("title")?,
        path: normalize_path(&field("path")?),
        description: entry
            .get("description")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_list() -> ShortcutList {
        ShortcutList::new(vec![
            Shortcut::new("sp-site-contents", "Site Contents", "/_layouts/15/viewlsts.aspx")
                .with_description("View all lists and libraries in this site"),
            Shortcut::new("custom-1698508200000-k3j9x0a1b", "Team Lists", "/Lists/Team"),
        ])
    }

    #[test]
    fn test_envelope_round_trip() {
        let list = create_test_list();
        let json = export_json(&list, ExportFormat::Envelope, "2024-10-28T10:30:00.000Z").unwrap();

        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["version"], "1.0");
        assert_eq!(value["exportDate"], "2024-10-28T10:30:00.000Z");

        assert_eq!(parse_import(&json).unwrap(), list);
    }

    #[test]
    fn test_plain_round_trip() {
        let list = create_test_list();
        let json = export_json(&list, ExportFormat::Plain, "").unwrap();

        assert!(json.trim_start().starts_with('['));
        assert_eq!(parse_import(&json).unwrap(), list);
    }

    #[test]
    fn test_dated_filename() {
        assert_eq!(
            dated_export_filename("2024-10-28T10:30:00.000Z"),
            "sharepoint-shortcuts-2024-10-28.json"
        );
    }

    #[test]
    fn test_entry_missing_path_rejects_import() {
        let text = r#"[
            {"id": "a", "title": "A", "path": "/a"},
            {"id": "b", "title": "B"}
        ]"#;

        assert_eq!(parse_import(text), Err(ShortcutError::InvalidEntry));
    }

    #[test]
    fn test_empty_field_rejects_import() {
        let text = r#"{"shortcuts": [{"id": "", "title": "A", "path": "/a"}]}"#;
        assert_eq!(parse_import(text), Err(ShortcutError::InvalidEntry));
    }

    #[test]
    fn test_duplicate_id_rejects_import() {
        let text = r#"[
            {"id": "a", "title": "Lists", "path": "/Lists"},
            {"id": "a", "title": "Pages", "path": "/SitePages"}
        ]"#;

        let err = parse_import(text).unwrap_err();
        assert_eq!(err, ShortcutError::DuplicateImportId("a".to_string()));
        assert_eq!(err.to_string(), "Invalid shortcut format: duplicate id \"a\"");
    }

    #[test]
    fn test_duplicate_title_ignoring_case_rejects_import() {
        let text = r#"{"shortcuts": [
            {"id": "a", "title": "Lists", "path": "/Lists"},
            {"id": "b", "title": "LISTS", "path": "/Lists/Other"}
        ]}"#;

        assert_eq!(
            parse_import(text),
            Err(ShortcutError::DuplicateImportTitle("LISTS".to_string()))
        );
    }

    #[test]
    fn test_object_without_shortcuts_is_invalid() {
        assert_eq!(parse_import(r#"{"version": "1.0"}"#), Err(ShortcutError::InvalidFormat));
        assert_eq!(parse_import(r#"{"shortcuts": "nope"}"#), Err(ShortcutError::InvalidFormat));
        assert_eq!(parse_import("42"), Err(ShortcutError::InvalidFormat));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(parse_import("{not json"), Err(ShortcutError::Json(_))));
    }

    #[test]
    fn test_import_normalizes_path() {
        let list = parse_import(r#"[{"id": "a", "title": "A", "path": "Lists/A"}]"#).unwrap();
        assert_eq!(list.shortcuts[0].path, "/Lists/A");
    }
}

//! End-to-end editing sessions against the file and memory gateways.

#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]
#![allow(clippy::indexing_slicing)]
#![allow(missing_docs)]

use std::fs;

use indexmap::IndexMap;
use pretty_assertions::assert_eq;
use serde_json::{
    Value,
    json,
};
use tempfile::TempDir;
use translation_directory::config::{
    ArtifactConfig,
    DirectorySettings,
};
use translation_directory::gateway::{
    FileGateway,
    MemoryGateway,
};
use translation_directory::import::ImportFile;
use translation_directory::types::StorageDocument;
use translation_directory::{
    CellSave,
    DirectoryError,
    TranslationDirectory,
};

fn settings(languages: &[&str]) -> DirectorySettings {
    DirectorySettings {
        languages: languages.iter().map(ToString::to_string).collect(),
        ..DirectorySettings::default()
    }
}

fn read_json(path: &std::path::Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[tokio::test]
async fn test_import_and_save_into_options_envelope() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("options.json"),
        r#"{"theme": "dark", "i18nExtra": {"de": {"embassy": "Botschaft"}}}"#,
    )
    .unwrap();
    let settings = DirectorySettings {
        artifact: ArtifactConfig { path: "options.json".to_string(), options_field: Some("i18nExtra".to_string()) },
        ..settings(&["de", "en"])
    };
    let gateway = FileGateway::from_settings(temp_dir.path(), &settings);
    let mut directory = TranslationDirectory::new(gateway, &settings);
    directory.load().await.unwrap();

    let file = ImportFile::from_text(
        "messages_en.json",
        r#"{
            // exported from the design tool
            "embassy": "Embassy",
            "menu": { "open": "Open", "close": "" },
        }"#,
    )
    .unwrap();
    let affected = directory.import_files(vec![file]).unwrap();
    directory.save().await.unwrap();

    assert_eq!(affected.len(), 2);
    assert!(!directory.is_dirty());
    assert_eq!(
        read_json(&temp_dir.path().join("options.json")),
        json!({
            "theme": "dark",
            "i18nExtra": {
                "de": {"embassy": "Botschaft"},
                "en": {"embassy": "Embassy", "menu.open": "Open"}
            }
        })
    );
}

#[tokio::test]
async fn test_edit_session_round_trips_through_file() {
    let temp_dir = TempDir::new().unwrap();
    let settings = settings(&["de", "en", "fr"]);
    let gateway = FileGateway::from_settings(temp_dir.path(), &settings);
    assert!(gateway.ensure_artifact().await.unwrap());

    let mut directory = TranslationDirectory::new(gateway, &settings);
    directory.load().await.unwrap();
    assert!(directory.entries().is_empty());

    let mut draft = directory.new_entry_draft().with_value("de", "Hallo").with_value("en", "Hello");
    draft.translation_key = " greeting ".to_string();
    directory.create_entry(draft).unwrap();
    assert_eq!(directory.save_cell("greeting", "fr", "Bonjour").unwrap(), CellSave::Saved);
    directory.save().await.unwrap();

    let mut reopened = TranslationDirectory::new(FileGateway::from_settings(temp_dir.path(), &settings), &settings);
    reopened.load().await.unwrap();

    let greeting = reopened.entry("greeting").unwrap();
    assert_eq!(greeting.value("de"), Some("Hallo"));
    assert_eq!(greeting.value("en"), Some("Hello"));
    assert_eq!(greeting.value("fr"), Some("Bonjour"));
    assert!(!greeting.is_delete_action_enabled);
}

#[tokio::test]
async fn test_removal_flow_persists_only_after_save() {
    let mut stored = StorageDocument::new();
    stored.insert("de".to_string(), IndexMap::from([("farewell".to_string(), "Tschüss".to_string())]));
    let mut directory = TranslationDirectory::new(MemoryGateway::with_document(stored.clone()), &settings(&["de"]));
    directory.load().await.unwrap();

    let CellSave::RemovalRequired(pending) = directory.save_cell("farewell", "de", "").unwrap() else {
        panic!("expected a removal request");
    };
    assert_eq!(pending.previous_value(), Some("Tschüss"));
    assert!(matches!(directory.save().await, Err(DirectoryError::RemovalPending(_))));
    directory.confirm_removal().unwrap();

    assert!(directory.entries().is_empty());
    assert!(directory.is_dirty());
    assert_eq!(directory.gateway().stored().await, Some(stored));

    directory.save().await.unwrap();

    assert_eq!(directory.gateway().stored().await.unwrap()["de"].len(), 0);
    assert_eq!(directory.gateway().write_count(), 1);
}

#[tokio::test]
async fn test_rejected_imports_leave_directory_untouched() {
    let mut directory = TranslationDirectory::new(MemoryGateway::new(), &settings(&["de", "en"]));
    directory.load().await.unwrap();

    assert!(matches!(directory.import_files(vec![]), Err(DirectoryError::NoImportFile)));
    assert!(matches!(ImportFile::from_text("en.json", "{ not json"), Err(DirectoryError::MalformedImport(_))));
    assert!(matches!(ImportFile::from_text("en.json", "{}"), Err(DirectoryError::EmptyImport)));
    assert!(matches!(
        directory.import_files(vec![ImportFile::new("en.json", json!({"a": ""}))]),
        Err(DirectoryError::EmptyImport)
    ));

    assert!(!directory.is_dirty());
    assert!(directory.document().is_empty());
}

#[tokio::test]
async fn test_failed_save_can_be_retried() {
    let mut directory = TranslationDirectory::new(MemoryGateway::new(), &settings(&["en"]));
    directory.load().await.unwrap();
    directory.import_file(&ImportFile::new("en.json", json!({"title": "Title"}))).unwrap();

    directory.gateway().set_fail_writes(true);
    assert!(directory.save().await.is_err());
    assert!(directory.is_dirty());

    directory.gateway().set_fail_writes(false);
    directory.save().await.unwrap();

    assert!(!directory.is_dirty());
    assert_eq!(
        directory.gateway().stored().await.unwrap()["en"].get("title").map(String::as_str),
        Some("Title")
    );
}

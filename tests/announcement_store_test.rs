/// Integration tests for the announcement store and publisher
///
/// These tests verify the board contract:
/// - Published fields round-trip through the JSON file
/// - A second publish replaces the first
/// - Reads do not change the document
/// - A missing file is the empty board, not an error

use chrono::{TimeZone, Utc};
use quake_alert::{
    announcement::{AnnouncementDraft, AnnouncementPublisher, AnnouncementStore, BoardView, FileAnnouncementStore},
    models::{AlertLevel, FeatureVector, SAFETY_TIPS},
};
use std::fs;
use std::sync::Arc;

fn file_store(dir: &tempfile::TempDir) -> Arc<FileAnnouncementStore> {
    Arc::new(FileAnnouncementStore::new(
        dir.path().join("storage/public_announcements.json"),
    ))
}

#[test]
fn test_published_fields_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = file_store(&dir);
    let publisher = AnnouncementPublisher::new(store.clone());
    let now = Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap();

    let inputs = FeatureVector::new(6.1, 33.0, 5.0, 6.0, 720.0);
    let draft = AnnouncementDraft::new(AlertLevel::from("orange"), inputs, Some("Valparaíso"))
        .with_message("Strong shaking expected near the coast");
    publisher.publish_at(&draft, now).unwrap();

    let document = store.read().unwrap().unwrap();
    assert_eq!(document.last_updated, "2024-05-06T07:08:09Z");
    assert_eq!(document.announcements.len(), 1);

    let entry = &document.announcements[0];
    assert_eq!(entry.id, now.timestamp().to_string());
    assert_eq!(entry.risk_level.as_str(), "orange");
    assert_eq!(entry.region, "Valparaíso");
    assert_eq!(entry.message, "Strong shaking expected near the coast");
    assert_eq!(entry.inputs, inputs);
    assert_eq!(entry.tips, SAFETY_TIPS.map(String::from).to_vec());

    // Non-ASCII text is stored as-is
    let raw = fs::read_to_string(store.path()).unwrap();
    assert!(raw.contains("Valparaíso"));

    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["announcements"][0]["risk_level"], "orange");
    assert_eq!(json["announcements"][0]["inputs"]["sig"], 720.0);
}

#[test]
fn test_second_publish_overwrites_first() {
    let dir = tempfile::tempdir().unwrap();
    let store = file_store(&dir);
    let publisher = AnnouncementPublisher::new(store.clone());

    let first = AnnouncementDraft::new(AlertLevel::from("yellow"), FeatureVector::default(), Some("North"));
    let second = AnnouncementDraft::new(AlertLevel::from("red"), FeatureVector::default(), Some("South"));
    publisher
        .publish_at(&first, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
        .unwrap();
    publisher
        .publish_at(&second, Utc.with_ymd_and_hms(2024, 1, 1, 0, 5, 0).unwrap())
        .unwrap();

    let document = store.read().unwrap().unwrap();
    assert_eq!(document.last_updated, "2024-01-01T00:05:00Z");
    assert_eq!(document.announcements.len(), 1);
    assert_eq!(document.announcements[0].risk_level.as_str(), "red");
    assert_eq!(document.announcements[0].region, "South");
}

#[test]
fn test_reads_are_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let store = file_store(&dir);
    let publisher = AnnouncementPublisher::new(store.clone());
    publisher
        .publish(&AnnouncementDraft::new(AlertLevel::from("green"), FeatureVector::default(), None))
        .unwrap();

    let before = fs::read(store.path()).unwrap();
    let first = BoardView::load(&*store).unwrap();
    let second = BoardView::load(&*store).unwrap();

    assert_eq!(first, second);
    assert_eq!(fs::read(store.path()).unwrap(), before);
    assert_eq!(first.document().unwrap().announcements[0].region, "Affected area");
}

#[test]
fn test_missing_store_is_empty_board() {
    let dir = tempfile::tempdir().unwrap();
    let store = file_store(&dir);

    let view = BoardView::load(&*store).unwrap();

    assert!(view.is_empty());
    assert_eq!(view.to_string(), "No announcement available yet.\n");
    assert!(!store.path().exists());
}

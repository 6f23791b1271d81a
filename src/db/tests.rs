//! Database integration tests.

#[cfg(test)]
mod db_tests {
    use super::super::*;
    use crate::models::paste::{now_ms, Paste};
    use tempfile::TempDir;

    fn setup_test_db() -> (Database, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");
        let db = Database::new(db_path.to_str().unwrap()).unwrap();
        (db, temp_dir)
    }

    fn sample_paste(id: &str, expires_at: Option<i64>) -> Paste {
        Paste::new(
            id.to_string(),
            Some("test-paste".to_string()),
            "Test content".to_string(),
            Some("rust".to_string()),
            expires_at,
        )
    }

    #[test]
    fn test_create_database() {
        let (db, _temp) = setup_test_db();
        assert!(db.flush().is_ok());
    }

    #[test]
    fn test_paste_insert_and_get() {
        let (db, _temp) = setup_test_db();

        let paste = sample_paste("abc123de", None);
        db.pastes.insert(&paste).unwrap();

        let retrieved = db.pastes.get("abc123de").unwrap().unwrap();
        assert_eq!(retrieved.content, "Test content");
        assert_eq!(retrieved.title, "test-paste");
        assert_eq!(retrieved.language.as_deref(), Some("rust"));
        assert_eq!(retrieved.views, 0);
    }

    #[test]
    fn test_get_missing_paste() {
        let (db, _temp) = setup_test_db();
        assert!(db.pastes.get("missing1").unwrap().is_none());
        assert!(!db.pastes.contains("missing1").unwrap());
    }

    #[test]
    fn test_contains_after_insert() {
        let (db, _temp) = setup_test_db();
        db.pastes.insert(&sample_paste("abc123de", None)).unwrap();
        assert!(db.pastes.contains("abc123de").unwrap());
    }

    #[test]
    fn test_delete_paste() {
        let (db, _temp) = setup_test_db();
        db.pastes.insert(&sample_paste("abc123de", None)).unwrap();

        assert!(db.pastes.delete("abc123de").unwrap());
        assert!(db.pastes.get("abc123de").unwrap().is_none());
        // second delete is a no-op
        assert!(!db.pastes.delete("abc123de").unwrap());
    }

    #[test]
    fn test_increment_views() {
        let (db, _temp) = setup_test_db();
        db.pastes.insert(&sample_paste("abc123de", None)).unwrap();

        let updated = db.pastes.increment_views("abc123de").unwrap().unwrap();
        assert_eq!(updated.views, 1);

        let updated = db.pastes.increment_views("abc123de").unwrap().unwrap();
        assert_eq!(updated.views, 2);

        let stored = db.pastes.get("abc123de").unwrap().unwrap();
        assert_eq!(stored.views, 2);
    }

    #[test]
    fn test_increment_views_preserves_undecodable_record() {
        let (db, _temp) = setup_test_db();
        let tree = db.db.open_tree("pastes").unwrap();
        tree.insert("mangled1", &b"not json"[..]).unwrap();

        assert!(db.pastes.increment_views("mangled1").is_err());

        // the record survives for manual recovery
        let raw = tree.get("mangled1").unwrap().unwrap();
        assert_eq!(&*raw, b"not json");
    }

    #[test]
    fn test_increment_views_missing_paste() {
        let (db, _temp) = setup_test_db();
        assert!(db.pastes.increment_views("missing1").unwrap().is_none());
    }

    #[test]
    fn test_sweep_removes_only_expired() {
        let (db, _temp) = setup_test_db();
        let now = now_ms();

        db.pastes.insert(&sample_paste("expired1", Some(now - 1))).unwrap();
        db.pastes
            .insert(&sample_paste("alive001", Some(now + 60_000)))
            .unwrap();
        db.pastes.insert(&sample_paste("forever1", None)).unwrap();

        let removed = db.pastes.sweep_expired(now).unwrap();
        assert_eq!(removed, 1);

        assert!(db.pastes.get("expired1").unwrap().is_none());
        assert!(db.pastes.get("alive001").unwrap().is_some());
        assert!(db.pastes.get("forever1").unwrap().is_some());
    }

    #[test]
    fn test_records_persist_as_json() {
        let (db, _temp) = setup_test_db();
        db.pastes.insert(&sample_paste("abc123de", None)).unwrap();

        let tree = db.db.open_tree("pastes").unwrap();
        let raw = tree.get("abc123de").unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_slice(&raw).unwrap();
        assert_eq!(value["id"], "abc123de");
        assert_eq!(value["content"], "Test content");
    }
}

use seatforge::blob::{BlobStore, FileBlobStore, MemoryBlobStore};
use seatforge::error::{SeatForgeError, SfResult};
use seatforge::model::{ClassConfig, DeskType, Pair, Student};
use seatforge::store::{HistoryStore, SaveOutcome, CLASSES_KEY};
use serde_json::json;
use tempfile::TempDir;

fn open_memory() -> HistoryStore<MemoryBlobStore> {
    HistoryStore::open(MemoryBlobStore::new()).unwrap()
}

fn generator_response() -> serde_json::Value {
    json!({
        "Seating": [
            {"Row": 0, "Column": 0, "StudentID": 1, "Student": "Ann"},
            {"Row": 0, "Column": 1, "StudentID": 2, "Student": "Bob"},
            {"Row": 1, "Column": 0, "StudentID": 3, "Student": "Cid"}
        ],
        "Fitness": 0.91,
        "Ignored": [],
        "Date": 1700000000,
        "ID": "run-1"
    })
}

// --- LIFECYCLE ---

#[test]
fn test_open_empty_blob() {
    let store = open_memory();
    assert!(store.classes().is_empty());
}

#[test]
fn test_add_class_defaults_and_persists() {
    let mut store = open_memory();
    let id = store.add_class("7A").unwrap();

    let class = store.find(id).unwrap();
    assert_eq!(class.name, "7A");
    assert!(class.students.is_empty());
    assert!(class.seatings.is_empty());
    assert_eq!(class.priorities.medical, 0.8);
    assert_eq!(class.priorities.fill, 0.3);

    let blob = store.blob().get(CLASSES_KEY).unwrap();
    assert!(blob.contains("\"7A\""));
}

#[test]
fn test_class_ids_are_unique() {
    let mut store = open_memory();
    let a = store.add_class("A").unwrap();
    let b = store.add_class("B").unwrap();
    let c = store.add_class("C").unwrap();
    assert!(a != b && b != c && a != c);
}

#[test]
fn test_delete_class() {
    let mut store = open_memory();
    let a = store.add_class("A").unwrap();
    let b = store.add_class("B").unwrap();

    assert!(store.delete_class(a).unwrap());
    assert!(!store.delete_class(a).unwrap());
    assert!(store.find(a).is_none());
    assert!(store.find(b).is_some());
}

#[test]
fn test_reload_from_file_blob() {
    let dir = TempDir::new().unwrap();
    let id = {
        let mut store = HistoryStore::open(FileBlobStore::new(dir.path())).unwrap();
        let id = store.add_class("7A").unwrap();
        store
            .modify_class(id, |c| {
                c.students.push(Student::new(1, "Ann"));
                c.class_config = Some(ClassConfig::new(2, 2, DeskType::Double));
            })
            .unwrap();
        id
    };

    assert!(dir.path().join("Classes.json").exists());

    let store = HistoryStore::open(FileBlobStore::new(dir.path())).unwrap();
    let class = store.find(id).unwrap();
    assert_eq!(class.students[0].name, "Ann");
    assert_eq!(class.class_config.unwrap().desk_type, DeskType::Double);
}

#[test]
fn test_load_tolerates_editor_data() {
    // Shape written by the web editor: string ids in pairs, blank rows,
    // generator casing in history, no classConfig.
    let blob = json!([{
        "id": 42,
        "name": "5B",
        "students": [{"id": 1, "name": "Ann", "preferredRows": "1,2"}],
        "preferences": [["", ""], [1, "1"]],
        "forbidden": [],
        "seatings": [{
            "Seating": [{"Row": 0, "Column": 0, "StudentID": 1}],
            "Rows": 1, "Columns": 1, "DeskType": "single",
            "Date": 1, "Fitness": 0.5, "ID": "old"
        }],
        "priorities": {"medical": 0.8, "friends": 0.4, "enemies": 0.7, "preferences": 0.5, "fill": 0.3}
    }])
    .to_string();

    let store = HistoryStore::open(MemoryBlobStore::with_blob(CLASSES_KEY, &blob)).unwrap();
    let class = store.find(42).unwrap();
    assert_eq!(class.preferences[0], Pair::blank());
    assert_eq!(class.preferences[1], Pair::new(1, 1));
    assert_eq!(class.seatings[0].seating[0].student_id, 1);
    assert!(class.class_config.is_none());
}

#[test]
fn test_blank_rows_from_blob_are_validated() {
    let blob = json!([{
        "id": 5,
        "name": "6C",
        "preferences": [["", ""], ["", ""]],
        "classConfig": {"rows": 2, "columns": 2, "deskType": "single"}
    }])
    .to_string();
    let store = HistoryStore::open(MemoryBlobStore::with_blob(CLASSES_KEY, &blob)).unwrap();
    assert_eq!(
        store.validation_errors(5).unwrap(),
        vec![
            "duplicate pair in preferences: ? and ?",
            "? cannot want to sit with themself",
            "? cannot want to sit with themself",
            "preference pair cannot contain empty values",
            "preference pair cannot contain empty values",
        ]
    );
}

#[test]
fn test_bare_history_entries_load_and_dedup() {
    let blob = json!([{
        "id": 9,
        "name": "8D",
        "seatings": [
            [{"row": 0, "col": 0, "studentId": 1}, {"Row": 0, "Column": 1, "StudentID": 2}],
            {"Seating": [{"row": 1, "col": 1, "studentId": 3}], "ID": "kept"}
        ]
    }])
    .to_string();
    let mut store = HistoryStore::open(MemoryBlobStore::with_blob(CLASSES_KEY, &blob)).unwrap();

    let class = store.find(9).unwrap();
    assert_eq!(class.seatings.len(), 2);
    assert_eq!(class.seatings[0].seating.len(), 2);
    assert_eq!(class.seatings[0].id, "");
    assert_eq!(class.seatings[1].id, "kept");

    let same_seats = json!([
        {"Row": 0, "Column": 1, "StudentID": 2},
        {"Row": 0, "Column": 0, "StudentID": 1}
    ]);
    assert_eq!(
        store.save_seating(9, &same_seats, None).unwrap(),
        SaveOutcome::Duplicate
    );
}

#[test]
fn test_load_rejects_corrupt_blob() {
    let result = HistoryStore::open(MemoryBlobStore::with_blob(CLASSES_KEY, "{not json"));
    assert!(matches!(result, Err(SeatForgeError::Json(_))));
}

struct ReadOnlyBlob;

impl BlobStore for ReadOnlyBlob {
    fn read(&self, _key: &str) -> SfResult<Option<String>> {
        Ok(None)
    }

    fn write(&self, _key: &str, _contents: &str) -> SfResult<()> {
        Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only").into())
    }
}

#[test]
fn test_write_failure_propagates() {
    let mut store = HistoryStore::open(ReadOnlyBlob).unwrap();
    assert!(matches!(store.add_class("7A"), Err(SeatForgeError::Io(_))));
}

// --- EDITOR OPERATIONS ---

#[test]
fn test_add_preference_appends_blank_row() {
    let mut store = open_memory();
    let id = store.add_class("7A").unwrap();
    assert!(store.add_preference(id).unwrap());
    assert!(!store.add_preference(id + 1).unwrap());
    assert_eq!(store.find(id).unwrap().preferences, vec![Pair::blank()]);
    // The blank row is exactly what the validator complains about.
    store
        .modify_class(id, |c| c.class_config = Some(ClassConfig::new(2, 2, DeskType::Single)))
        .unwrap();
    assert_eq!(
        store.validation_errors(id).unwrap(),
        vec![
            "? cannot want to sit with themself",
            "preference pair cannot contain empty values",
        ]
    );
    assert!(store.blob().get(CLASSES_KEY).unwrap().contains(r#""preferences":[["",""]]"#));
    assert!(store.has_errors(id));
}

#[test]
fn test_check_name() {
    let mut store = open_memory();
    let id = store.add_class("7A").unwrap();
    store
        .modify_class(id, |c| c.students.push(Student::new(1, "Ann")))
        .unwrap();

    assert_eq!(store.check_name(id, ""), None);
    assert_eq!(store.check_name(id, "Ann"), Some(true));
    assert_eq!(store.check_name(id, "Bob"), Some(false));
}

#[test]
fn test_unknown_class_queries() {
    let store = open_memory();
    assert!(store.validation_errors(1).is_none());
    assert!(!store.has_errors(1));
}

// --- SEATING HISTORY ---

#[test]
fn test_save_seating_then_duplicate() {
    let mut store = open_memory();
    let id = store.add_class("7A").unwrap();
    let config = ClassConfig::new(2, 2, DeskType::Single);

    let first = store
        .save_seating(id, &generator_response(), Some(&config))
        .unwrap();
    assert_eq!(first, SaveOutcome::Success);

    // Same seats, other order, other casing.
    let permuted = json!({
        "Seating": [
            {"row": 1, "col": 0, "studentId": 3},
            {"row": 0, "col": 0, "studentId": 1},
            {"row": 0, "col": 1, "studentId": 2}
        ],
        "Fitness": 0.5
    });
    let second = store.save_seating(id, &permuted, Some(&config)).unwrap();
    assert_eq!(second, SaveOutcome::Duplicate);
    assert_eq!(store.find(id).unwrap().seatings.len(), 1);
}

#[test]
fn test_saved_entry_fields() {
    let mut store = open_memory();
    let id = store.add_class("7A").unwrap();
    let config = ClassConfig::new(4, 3, DeskType::Double);
    store
        .save_seating(id, &generator_response(), Some(&config))
        .unwrap();

    let entry = &store.find(id).unwrap().seatings[0];
    assert_eq!(entry.rows, 4);
    assert_eq!(entry.columns, 3);
    assert_eq!(entry.desk_type, DeskType::Double);
    assert_eq!(entry.date, 1_700_000_000);
    assert_eq!(entry.fitness, 0.91);
    assert_eq!(entry.id, "run-1");
    assert_eq!(entry.seating.len(), 3);
}

#[test]
fn test_missing_metadata_gets_defaults() {
    let mut store = open_memory();
    let id = store.add_class("7A").unwrap();
    store
        .save_seating(id, &json!([{"row": 0, "col": 0, "studentId": 1}]), None)
        .unwrap();

    let entry = &store.find(id).unwrap().seatings[0];
    assert_eq!(entry.rows, 0);
    assert_eq!(entry.columns, 0);
    assert_eq!(entry.desk_type, DeskType::Single);
    assert_eq!(entry.fitness, 0.0);
    assert!(entry.date > 1_600_000_000);
    assert!(!entry.id.is_empty());
}

#[test]
fn test_history_is_newest_first() {
    let mut store = open_memory();
    let id = store.add_class("7A").unwrap();
    for (n, tag) in ["a", "b", "c"].iter().enumerate() {
        let resp = json!({
            "Seating": [{"row": 0, "col": n, "studentId": 1}],
            "ID": tag
        });
        assert_eq!(store.save_seating(id, &resp, None).unwrap(), SaveOutcome::Success);
    }
    let ids: Vec<&str> = store
        .find(id)
        .unwrap()
        .seatings
        .iter()
        .map(|s| s.id.as_str())
        .collect();
    assert_eq!(ids, vec!["c", "b", "a"]);
}

#[test]
fn test_save_seating_unknown_class() {
    let mut store = open_memory();
    let outcome = store.save_seating(99, &generator_response(), None).unwrap();
    assert_eq!(outcome, SaveOutcome::ClassNotFound);
}

#[test]
fn test_save_seating_invalid_payload() {
    let mut store = open_memory();
    let id = store.add_class("7A").unwrap();
    for bad in [
        json!({"Seating": {"row": 0}}),
        json!({"Fitness": 1.0}),
        json!("seats"),
        json!([{"seat": 1}]),
    ] {
        assert_eq!(
            store.save_seating(id, &bad, None).unwrap(),
            SaveOutcome::InvalidData
        );
    }
    assert!(store.find(id).unwrap().seatings.is_empty());
}

#[test]
fn test_duplicate_check_is_per_class() {
    let mut store = open_memory();
    let a = store.add_class("A").unwrap();
    let b = store.add_class("B").unwrap();
    let resp = generator_response();
    assert_eq!(store.save_seating(a, &resp, None).unwrap(), SaveOutcome::Success);
    assert_eq!(store.save_seating(b, &resp, None).unwrap(), SaveOutcome::Success);
}

#[test]
fn test_outcome_names() {
    assert_eq!(SaveOutcome::ClassNotFound.to_string(), "class_not_found");
    assert_eq!(SaveOutcome::InvalidData.to_string(), "invalid_data");
    assert_eq!(SaveOutcome::Duplicate.to_string(), "duplicate");
    assert_eq!(SaveOutcome::Success.to_string(), "success");
}

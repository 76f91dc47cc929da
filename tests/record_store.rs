use std::fs;
use std::path::PathBuf;

use business_directory::store::CsvTable;
use business_directory::{
    search, sort, Draft, Field, LoadWarning, RecordStore, SortKey, SortOrder, StoreError,
};
use tempfile::TempDir;

const TABLE: &str = "\
ID,Name,Category,Address,Phone,Website,Hours,Description,Latitude,Longitude
a1,Bob's Bakery,Food,12 High St,555-0101,https://bobs.example,7-15,\"Bread, cakes and coffee\",51.5,-0.12
b2,Hardware Hut,Retail,3 Mill Rd,555-0102,,9-17,Tools,,
c3,\"The \"\"Quoted\"\" Inn\",Hospitality,\"4 Bridge St, Old Town\",,,,Rooms and a bar,51.6,-0.2
d4,apple tree books,retail,9 Elm Ave,,,,Second-hand books,,
";

fn write_table(contents: &str) -> (TempDir, PathBuf) {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("businesses.csv");
    fs::write(&path, contents).unwrap();
    (temp, path)
}

fn cafe_draft() -> Draft {
    Draft::new()
        .with(Field::Name, "Bob's Cafe")
        .with(Field::Category, "Food")
        .with(Field::Address, "1 Main St")
}

#[test]
fn save_after_load_is_a_no_op() {
    let (_temp, path) = write_table(TABLE);
    let store = RecordStore::open(&path).unwrap();
    assert_eq!(store.len(), 4);
    assert!(store.warning().is_none());

    store.save().unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), TABLE);
    let reopened = RecordStore::open(&path).unwrap();
    assert_eq!(reopened.records(), store.records());
}

#[test]
fn quoted_fields_survive_loading() {
    let (_temp, path) = write_table(TABLE);
    let store = RecordStore::open(&path).unwrap();
    let inn = store.get("c3").unwrap();
    assert_eq!(inn.name(), "The \"Quoted\" Inn");
    assert_eq!(inn.address(), "4 Bridge St, Old Town");
    assert_eq!(inn.get(Field::Latitude), "51.6");
}

#[test]
fn missing_file_is_created_and_reloads_empty() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("businesses.csv");

    let first = RecordStore::open(&path).unwrap();
    assert!(first.is_empty());
    assert!(path.exists());

    let second = RecordStore::open(&path).unwrap();
    assert!(second.is_empty());
    assert_eq!(first.records(), second.records());
}

#[test]
fn search_results_are_a_matching_subset() {
    let (_temp, path) = write_table(TABLE);
    let store = RecordStore::open(&path).unwrap();
    let records = store.records();

    for query in ["b", "BOOK", "retail", "coffee", "xyz", "o"] {
        let needle = query.to_lowercase();
        let hits = search(query, records);
        for hit in &hits {
            assert!(records.contains(*hit));
            assert!(
                hit.name().to_lowercase().contains(&needle)
                    || hit.category().to_lowercase().contains(&needle)
                    || hit.description().to_lowercase().contains(&needle),
                "{query:?} matched {hit:?}"
            );
        }
    }

    let everything: Vec<_> = search("", records).into_iter().cloned().collect();
    assert_eq!(everything, records);
}

#[test]
fn sort_reverses_groups_but_keeps_ties_stable() {
    let (_temp, path) = write_table(TABLE);
    let store = RecordStore::open(&path).unwrap();
    let mut hits = search("", store.records());

    sort(&mut hits, SortKey::Category, SortOrder::Ascending);
    let ascending: Vec<&str> = hits.iter().map(|r| r.id()).collect();
    assert_eq!(ascending, ["a1", "c3", "b2", "d4"]);

    sort(&mut hits, SortKey::Category, SortOrder::Descending);
    let descending: Vec<&str> = hits.iter().map(|r| r.id()).collect();
    assert_eq!(descending, ["b2", "d4", "c3", "a1"]);
}

#[test]
fn inserted_business_is_searchable_and_persisted() {
    let (_temp, path) = write_table(TABLE);
    let mut store = RecordStore::open(&path).unwrap();
    let existing: Vec<String> = store.records().iter().map(|r| r.id().to_string()).collect();

    let record = store.insert(&cafe_draft()).unwrap();
    assert!(!record.id().is_empty());
    assert!(!existing.iter().any(|id| id == record.id()));
    assert_eq!(store.records().last(), Some(&record));

    let hits = search("bob", store.records());
    assert!(hits.iter().any(|r| r.id() == record.id()));

    let reopened = RecordStore::open(&path).unwrap();
    assert_eq!(reopened.get(record.id()), Some(&record));
}

#[test]
fn insert_with_empty_name_is_rejected() {
    let (_temp, path) = write_table(TABLE);
    let mut store = RecordStore::open(&path).unwrap();
    let err = store.insert(&cafe_draft().with(Field::Name, "")).unwrap_err();

    assert!(matches!(err, StoreError::Validation { .. }));
    assert_eq!(store.len(), 4);
    assert_eq!(fs::read_to_string(&path).unwrap(), TABLE);
}

#[test]
fn delete_of_unknown_id_changes_nothing() {
    let (_temp, path) = write_table(TABLE);
    let mut store = RecordStore::open(&path).unwrap();
    let before = store.records().to_vec();

    assert!(!store.delete("does-not-exist").unwrap());
    assert_eq!(store.records(), before.as_slice());
    assert_eq!(fs::read_to_string(&path).unwrap(), TABLE);
}

#[test]
fn delete_removes_and_persists() {
    let (_temp, path) = write_table(TABLE);
    let mut store = RecordStore::open(&path).unwrap();
    assert!(store.delete("b2").unwrap());
    assert!(!store.delete("b2").unwrap());

    let reopened = RecordStore::open(&path).unwrap();
    let ids: Vec<&str> = reopened.records().iter().map(|r| r.id()).collect();
    assert_eq!(ids, ["a1", "c3", "d4"]);
}

#[test]
fn update_of_unknown_id_is_not_found() {
    let (_temp, path) = write_table(TABLE);
    let mut store = RecordStore::open(&path).unwrap();
    let err = store.update("nope", &cafe_draft()).unwrap_err();

    assert!(matches!(err, StoreError::NotFound { ref id } if id == "nope"));
    assert_eq!(store.len(), 4);
}

#[test]
fn update_replaces_every_field_but_the_id() {
    let (_temp, path) = write_table(TABLE);
    let mut store = RecordStore::open(&path).unwrap();
    let updated = store.update("a1", &cafe_draft()).unwrap();

    assert_eq!(updated.id(), "a1");
    assert_eq!(updated.name(), "Bob's Cafe");
    assert_eq!(updated.get(Field::Website), "");
    assert_eq!(updated.get(Field::Latitude), "");

    let reopened = RecordStore::open(&path).unwrap();
    assert_eq!(reopened.records()[0], updated);
}

#[test]
fn partial_header_warns_and_unknown_columns_are_dropped_on_save() {
    let (_temp, path) = write_table("ID,Name,Category,Address,Notes\nx1,Deli,Food,2 Side St,secret\n");
    let mut store = RecordStore::open(&path).unwrap();
    assert_eq!(
        store.warning(),
        Some(&LoadWarning::MissingColumns(vec!["Phone"]))
    );
    assert_eq!(store.get("x1").unwrap().get(Field::Phone), "");

    store.insert(&cafe_draft()).unwrap();
    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.starts_with(
        "ID,Name,Category,Address,Phone,Website,Hours,Description,Latitude,Longitude\n"
    ));
    assert!(!contents.contains("secret"));
}

#[test]
fn unreadable_table_is_a_load_error() {
    let (_temp, path) = write_table("ID,Name\n");
    fs::remove_file(&path).unwrap();
    fs::create_dir(&path).unwrap();

    let err = RecordStore::open(&path).unwrap_err();
    assert!(matches!(err, StoreError::Load { .. }));
    assert!(CsvTable::new(&path).load().is_err());
}

//! End-to-end tests: introspection document in, SQLite rows out.

use serde_json::{Value, json};
use siphon_schema::{
    Deriver, FlatValue, Schema, flatten,
    testing::{countries_introspection, south_africa},
};
use siphon_store::{JournalMode, SqliteOptions, Store};
use tempfile::TempDir;

fn countries() -> Vec<Value> {
    vec![
        south_africa(),
        json!({
            "code": "AQ",
            "name": "Antarctica",
            "native": "Antarctica",
            "phone": "672",
            "capital": null,
            "currency": null,
            "continent": { "code": "AN", "name": "Antarctica" },
            "languages": [],
            "emoji": "🇦🇶"
        }),
        json!({
            "code": "CH",
            "name": "Switzerland",
            "native": "Schweiz",
            "phone": "41",
            "capital": "Bern",
            "currency": ["CHE", "CHF", "CHW"],
            "continent": { "code": "EU", "name": "Europe" },
            "emoji": "🇨🇭"
        }),
    ]
}

#[test]
fn test_introspection_to_rows() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("countries.db");
    let schema = Schema::from_response(&countries_introspection()).unwrap();
    let derivation = Deriver::new(&schema).derive("Country").unwrap();

    {
        let mut store = Store::open(&SqliteOptions {
            journal_mode: Some(JournalMode::Wal),
            ..SqliteOptions::new(&path)
        })
        .unwrap();
        let table = store.create_table("Country", &derivation.columns).unwrap();
        let summary = store.load(&table, &countries()).unwrap();
        assert_eq!(summary.attempted, 3);
        assert_eq!(summary.inserted, 3);
        assert!(summary.is_complete());
    }

    let store = Store::open(&SqliteOptions::new(&path)).unwrap();
    assert_eq!(store.count_rows("country").unwrap(), 3);

    let rows = store.sample_rows("country", 10).unwrap();
    let names: Vec<&str> = derivation.columns.names().collect();
    assert_eq!(rows.columns, names);

    let column = |name: &str| rows.columns.iter().position(|c| c == name).unwrap();
    let ch = &rows.rows[2];
    assert_eq!(ch[column("currency")], FlatValue::Text("CHE, CHF, CHW".into()));
    assert_eq!(ch[column("continent_name")], FlatValue::Text("Europe".into()));

    let aq = &rows.rows[1];
    assert_eq!(aq[column("capital")], FlatValue::Null);
    assert_eq!(aq[column("continent_code")], FlatValue::Text("AN".into()));
}

#[test]
fn test_flattened_keys_are_columns() {
    let schema = Schema::from_response(&countries_introspection()).unwrap();
    let derivation = Deriver::new(&schema).derive("Country").unwrap();

    for record in countries() {
        let flat = flatten(record.as_object().unwrap());
        for key in flat.keys() {
            assert!(
                derivation.columns.contains(key),
                "flattened key '{}' has no column",
                key
            );
        }
    }
}

#[test]
fn test_rerun_appends_to_existing_table() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("countries.db");
    let schema = Schema::from_response(&countries_introspection()).unwrap();
    let columns = Deriver::new(&schema).derive("Country").unwrap().columns;

    for run in 1..=2 {
        let mut store = Store::open(&SqliteOptions::new(&path)).unwrap();
        let table = store.create_table("Country", &columns).unwrap();
        store.load(&table, &countries()).unwrap();
        assert_eq!(store.count_rows("country").unwrap(), 3 * run);
    }
}

use rusqlite::{Connection, OpenFlags, params_from_iter, types::ValueRef};
use serde_json::{Number, Value};
use siphon_schema::{Columns, FlatRecord, FlatValue, flatten_value};

use crate::{
    Error, LoadSummary, Result, SqliteOptions,
    sql::{count_sql, create_table_sql, insert_sql, quote_ident, sample_sql, table_name},
};

/// A created table and the columns its rows are projected onto.
#[derive(Debug, Clone)]
pub struct Table {
    name: String,
    columns: Columns,
}

impl Table {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &Columns {
        &self.columns
    }
}

/// Rows read back from a table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rows {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<FlatValue>>,
}

/// One SQLite connection and the tables written through it.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open (or create) the database file described by `options` and apply
    /// its pragmas.
    pub fn open(options: &SqliteOptions) -> Result<Self> {
        let mut flags = OpenFlags::default();
        if !options.create_if_missing {
            flags.remove(OpenFlags::SQLITE_OPEN_CREATE);
        }

        let conn = Connection::open_with_flags(&options.path, flags).map_err(|source| {
            Error::Open {
                path: options.path.clone(),
                source,
            }
        })?;

        if let Some(timeout) = options.busy_timeout {
            conn.busy_timeout(timeout)?;
        }
        if let Some(mode) = options.journal_mode {
            let applied: String =
                conn.pragma_update_and_check(None, "journal_mode", mode.as_str(), |row| {
                    row.get(0)
                })?;
            tracing::debug!(requested = mode.as_str(), %applied, "set journal mode");
        }
        if let Some(mode) = options.synchronous {
            conn.pragma_update(None, "synchronous", mode.as_str())?;
        }

        tracing::debug!(path = %options.path.display(), "opened database");
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
        })
    }

    /// The underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Create the table for `type_name` unless it already exists.
    ///
    /// An existing table is kept along with its rows. If it lacks some of
    /// `columns`, a warning is logged; inserts into it will then fail.
    pub fn create_table(&self, type_name: &str, columns: &Columns) -> Result<Table> {
        let name = table_name(type_name);
        if columns.is_empty() {
            return Err(Error::NoColumns { name });
        }

        if self.table_exists(&name)? {
            let existing = self.table_columns(&name)?;
            let missing: Vec<&str> = columns
                .names()
                .filter(|column| !existing.iter().any(|e| e == column))
                .collect();
            if !missing.is_empty() {
                tracing::warn!(
                    table = %name,
                    missing = %missing.join(", "),
                    "existing table lacks derived columns"
                );
            }
        }

        let ddl = create_table_sql(&name, columns);
        tracing::debug!(table = %name, %ddl, "creating table");
        self.conn.execute(&ddl, [])?;

        Ok(Table {
            name,
            columns: columns.clone(),
        })
    }

    pub fn table_exists(&self, name: &str) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
            [name],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    fn table_columns(&self, name: &str) -> Result<Vec<String>> {
        let mut statement = self
            .conn
            .prepare(&format!("PRAGMA table_info({})", quote_ident(name)))?;
        let names = statement
            .query_map([], |row| row.get::<_, String>(1))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(names)
    }

    /// Insert one flattened record. Columns absent from the record are NULL.
    pub fn insert_record(&self, table: &Table, record: &FlatRecord) -> Result<()> {
        let sql = insert_sql(table.name(), table.columns());
        self.conn
            .execute(&sql, params_from_iter(bind(record, table.columns())))?;
        Ok(())
    }

    /// Flatten and insert every record inside one transaction.
    ///
    /// A record that is not an object or whose INSERT fails is recorded in
    /// the summary and the batch continues. Errors outside a single record
    /// (starting or committing the transaction) abort the load.
    pub fn load(&mut self, table: &Table, records: &[Value]) -> Result<LoadSummary> {
        let mut summary = LoadSummary {
            attempted: records.len(),
            ..Default::default()
        };
        let sql = insert_sql(table.name(), table.columns());

        let tx = self.conn.transaction()?;
        {
            let mut statement = tx.prepare(&sql)?;
            for (index, value) in records.iter().enumerate() {
                let record = match flatten_value(value) {
                    Ok(record) => record,
                    Err(error) => {
                        let failure = Error::InvalidRecord { index, error };
                        tracing::warn!(table = table.name(), %failure, "skipping record");
                        summary.failures.push(failure);
                        continue;
                    }
                };

                for key in record.unmatched(table.columns()) {
                    if !summary.dropped.iter().any(|seen| seen == key) {
                        summary.dropped.push(key.to_string());
                    }
                }

                match statement.execute(params_from_iter(bind(&record, table.columns()))) {
                    Ok(_) => summary.inserted += 1,
                    Err(error) => {
                        let failure = Error::RecordInsert { index, error };
                        tracing::warn!(table = table.name(), %failure, "skipping record");
                        summary.failures.push(failure);
                    }
                }
            }
        }
        tx.commit()?;

        if !summary.dropped.is_empty() {
            tracing::warn!(
                table = table.name(),
                fields = ?summary.dropped,
                "record fields have no column and were not stored"
            );
        }
        tracing::info!(
            table = table.name(),
            attempted = summary.attempted,
            inserted = summary.inserted,
            failed = summary.failed(),
            "loaded records"
        );
        Ok(summary)
    }

    /// Number of rows in table `name`.
    pub fn count_rows(&self, name: &str) -> Result<usize> {
        self.ensure_table(name)?;
        let count: i64 = self.conn.query_row(&count_sql(name), [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    /// The first `limit` rows of table `name`, in insertion order.
    pub fn sample_rows(&self, name: &str, limit: usize) -> Result<Rows> {
        self.ensure_table(name)?;
        let mut statement = self.conn.prepare(&sample_sql(name))?;
        let columns: Vec<String> = statement
            .column_names()
            .into_iter()
            .map(String::from)
            .collect();
        let width = columns.len();

        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = statement
            .query_map([limit], |row| {
                (0..width)
                    .map(|i| row.get_ref(i).map(read_value))
                    .collect::<rusqlite::Result<Vec<_>>>()
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(Rows { columns, rows })
    }

    fn ensure_table(&self, name: &str) -> Result<()> {
        if self.table_exists(name)? {
            Ok(())
        } else {
            Err(Error::TableNotFound {
                name: name.to_string(),
            })
        }
    }
}

/// Positional parameters for `record`: every value is stored as text.
fn bind(record: &FlatRecord, columns: &Columns) -> Vec<Option<String>> {
    record
        .project(columns)
        .into_iter()
        .map(FlatValue::to_text)
        .collect()
}

fn read_value(value: ValueRef<'_>) -> FlatValue {
    match value {
        ValueRef::Null => FlatValue::Null,
        ValueRef::Integer(i) => FlatValue::Number(i.into()),
        ValueRef::Real(f) => Number::from_f64(f)
            .map(FlatValue::Number)
            .unwrap_or(FlatValue::Null),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
            FlatValue::Text(String::from_utf8_lossy(bytes).into_owned())
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use siphon_schema::{
        ColumnPath, ColumnSpec, Deriver, SqlType, derive_columns, flatten,
        testing::{SchemaBuilder, countries_schema, south_africa},
    };

    use super::*;
    use crate::{JournalMode, SynchronousMode};

    fn columns(names: &[&str]) -> Columns {
        names
            .iter()
            .map(|name| {
                let path = ColumnPath::from_segments(name.split('_'));
                ColumnSpec::new(path, SqlType::Text)
            })
            .collect()
    }

    fn text(s: &str) -> FlatValue {
        FlatValue::Text(s.to_string())
    }

    fn country_table(store: &Store) -> Table {
        store
            .create_table("Country", &columns(&["code", "capital", "continent_code", "continent_name"]))
            .unwrap()
    }

    #[test]
    fn test_create_table_is_idempotent() {
        let mut store = Store::open_in_memory().unwrap();
        let table = country_table(&store);
        assert_eq!(table.name(), "country");

        store.load(&table, &[json!({ "code": "ZA" })]).unwrap();
        let again = country_table(&store);

        assert_eq!(again.name(), "country");
        assert_eq!(store.count_rows("country").unwrap(), 1);
    }

    #[test]
    fn test_create_table_without_columns() {
        let store = Store::open_in_memory().unwrap();
        let err = store.create_table("Empty", &Columns::new()).unwrap_err();
        assert!(matches!(err, Error::NoColumns { name } if name == "empty"));
    }

    #[test]
    fn test_insert_record_absent_keys_are_null() {
        let store = Store::open_in_memory().unwrap();
        let table = country_table(&store);

        let record: FlatRecord = [("continent_name", text("Africa")), ("code", text("ZA"))]
            .into_iter()
            .collect();
        store.insert_record(&table, &record).unwrap();

        let rows = store.sample_rows("country", 10).unwrap();
        assert_eq!(
            rows.columns,
            vec!["code", "capital", "continent_code", "continent_name"]
        );
        assert_eq!(
            rows.rows,
            vec![vec![text("ZA"), FlatValue::Null, FlatValue::Null, text("Africa")]]
        );
    }

    #[test]
    fn test_scalar_record_round_trip() {
        let mut store = Store::open_in_memory().unwrap();
        let table = country_table(&store);
        let record = json!({
            "code": "ZA",
            "capital": "Pretoria",
            "continent": { "code": "AF", "name": "Africa" }
        });

        let summary = store.load(&table, std::slice::from_ref(&record)).unwrap();
        assert_eq!(summary.inserted, 1);

        let rows = store.sample_rows("country", 1).unwrap();
        let expected = flatten(record.as_object().unwrap());
        let read_back: FlatRecord = rows
            .columns
            .iter()
            .cloned()
            .zip(rows.rows[0].iter().cloned())
            .collect();
        assert_eq!(read_back, expected);
    }

    #[test]
    fn test_values_are_stored_as_text() {
        let mut store = Store::open_in_memory().unwrap();
        let table = store
            .create_table("Reading", &columns(&["count", "ratio", "ok", "tags"]))
            .unwrap();

        store
            .load(
                &table,
                &[json!({ "count": 27, "ratio": 0.5, "ok": true, "tags": ["a", "b,c"] })],
            )
            .unwrap();

        let rows = store.sample_rows("reading", 1).unwrap();
        assert_eq!(
            rows.rows[0],
            vec![text("27"), text("0.5"), text("true"), text("a, b\\,c")]
        );
    }

    #[test]
    fn test_load_isolates_failing_records() {
        let mut store = Store::open_in_memory().unwrap();
        store
            .connection()
            .execute(
                "CREATE TABLE country (\"code\" TEXT CHECK (\"code\" <> 'XX'), \"capital\" TEXT)",
                [],
            )
            .unwrap();
        let table = store
            .create_table("Country", &columns(&["code", "capital"]))
            .unwrap();

        let records = vec![
            json!({ "code": "ZA" }),
            json!({ "code": "XX" }),
            json!("not a record"),
            json!({ "code": "FR", "capital": "Paris" }),
        ];
        let summary = store.load(&table, &records).unwrap();

        assert_eq!(summary.attempted, 4);
        assert_eq!(summary.inserted, 2);
        assert!(!summary.is_complete());
        let indexes: Vec<_> = summary
            .failures
            .iter()
            .filter_map(Error::record_index)
            .collect();
        assert_eq!(indexes, vec![1, 2]);
        assert!(matches!(summary.failures[0], Error::RecordInsert { .. }));
        assert!(matches!(summary.failures[1], Error::InvalidRecord { .. }));
        assert_eq!(store.count_rows("country").unwrap(), 2);
    }

    #[test]
    fn test_repeated_loads_append() {
        let mut store = Store::open_in_memory().unwrap();
        let derived = derive_columns(&countries_schema(), "Country").unwrap();

        for _ in 0..2 {
            let table = store.create_table("Country", &derived).unwrap();
            let summary = store.load(&table, &[south_africa()]).unwrap();
            assert!(summary.is_complete());
        }

        assert_eq!(store.count_rows("country").unwrap(), 2);
    }

    #[test]
    fn test_load_reports_fields_past_a_cycle() {
        let schema = SchemaBuilder::new()
            .object("Employee", |t| {
                t.scalar("name", "String").object("manager", "Employee")
            })
            .build();
        let mut store = Store::open_in_memory().unwrap();
        let table = store
            .create_table("Employee", &derive_columns(&schema, "Employee").unwrap())
            .unwrap();

        let records = [
            json!({ "name": "ann", "manager": { "name": "bob", "manager": { "name": "cy" } } }),
            json!({ "name": "bob", "manager": { "name": "cy" } }),
            json!({ "name": "cy" }),
        ];
        let summary = store.load(&table, &records).unwrap();

        assert_eq!(summary.inserted, 3);
        assert!(summary.is_complete());
        assert_eq!(summary.dropped, ["manager_name", "manager_manager_name"]);

        let rows = store.sample_rows("employee", 10).unwrap();
        assert_eq!(rows.columns, ["name"]);
        assert_eq!(rows.rows[0], [text("ann")]);
    }

    #[test]
    fn test_load_reports_fields_past_depth_limit() {
        let schema = SchemaBuilder::new()
            .object("A", |t| t.scalar("x", "String").object("b", "B"))
            .object("B", |t| t.scalar("y", "String").object("c", "C"))
            .object("C", |t| t.scalar("z", "String"))
            .build();
        let derivation = Deriver::new(&schema).max_depth(Some(1)).derive("A").unwrap();
        let mut store = Store::open_in_memory().unwrap();
        let table = store.create_table("A", &derivation.columns).unwrap();

        let record = json!({ "x": "1", "b": { "y": "2", "c": { "z": "3" } } });
        let summary = store.load(&table, &[record]).unwrap();

        assert_eq!(summary.inserted, 1);
        assert_eq!(summary.dropped, ["b_c_z"]);
    }

    #[test]
    fn test_load_without_dropped_fields() {
        let mut store = Store::open_in_memory().unwrap();
        let derived = derive_columns(&countries_schema(), "Country").unwrap();
        let table = store.create_table("Country", &derived).unwrap();

        let summary = store.load(&table, &[south_africa()]).unwrap();
        assert!(summary.dropped.is_empty());
    }

    #[test]
    fn test_sample_rows_respects_limit_and_order() {
        let mut store = Store::open_in_memory().unwrap();
        let table = store.create_table("Country", &columns(&["code"])).unwrap();
        let records: Vec<Value> = ["AD", "AE", "AF"]
            .iter()
            .map(|code| json!({ "code": code }))
            .collect();
        store.load(&table, &records).unwrap();

        let rows = store.sample_rows("country", 2).unwrap();
        assert_eq!(rows.rows, vec![vec![text("AD")], vec![text("AE")]]);
    }

    #[test]
    fn test_unknown_table() {
        let store = Store::open_in_memory().unwrap();
        assert!(matches!(
            store.count_rows("country"),
            Err(Error::TableNotFound { .. })
        ));
        assert!(matches!(
            store.sample_rows("country", 5),
            Err(Error::TableNotFound { .. })
        ));
    }

    #[test]
    fn test_file_database_persists() {
        let dir = tempfile::tempdir().unwrap();
        let options = SqliteOptions {
            journal_mode: Some(JournalMode::Wal),
            synchronous: Some(SynchronousMode::Normal),
            busy_timeout: Some(std::time::Duration::from_millis(500)),
            ..SqliteOptions::new(dir.path().join("countries.db"))
        };

        {
            let mut store = Store::open(&options).unwrap();
            let table = store.create_table("Country", &columns(&["code"])).unwrap();
            store.load(&table, &[json!({ "code": "ZA" })]).unwrap();
        }

        let store = Store::open(&options).unwrap();
        assert_eq!(store.count_rows("country").unwrap(), 1);
        let mode: String = store
            .connection()
            .query_row("PRAGMA journal_mode", [], |row| row.get(0))
            .unwrap();
        assert_eq!(mode, "wal");
    }

    #[test]
    fn test_open_missing_file_without_create() {
        let dir = tempfile::tempdir().unwrap();
        let options = SqliteOptions {
            create_if_missing: false,
            ..SqliteOptions::new(dir.path().join("missing.db"))
        };

        let err = Store::open(&options).err().unwrap();
        assert!(matches!(err, Error::Open { .. }));
    }
}

//! Insert-or-update keyed on a table's declared unique columns.
//!
//! Every write to the index goes through [`upsert`]: a plain INSERT is tried
//! first; when it trips a UNIQUE or PRIMARY KEY constraint the existing row is
//! located by its unique columns and the remaining columns are updated in
//! place. Re-running a sync therefore never duplicates rows and never changes
//! row ids.

use rusqlite::types::Value;
use rusqlite::{Connection, ErrorCode, params_from_iter};

use crate::operations::OperationError;

/// A row to be written: a table name plus typed column values.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    table: &'static str,
    columns: Vec<(&'static str, Value)>,
}

impl Record {
    pub fn new(table: &'static str) -> Self {
        Self {
            table,
            columns: Vec::new(),
        }
    }

    /// Set a column, replacing any earlier value for it.
    pub fn set(mut self, column: &'static str, value: impl Into<Value>) -> Self {
        let value = value.into();
        match self.columns.iter_mut().find(|(c, _)| *c == column) {
            Some(slot) => slot.1 = value,
            None => self.columns.push((column, value)),
        }
        self
    }

    pub fn text(self, column: &'static str, value: &str) -> Self {
        self.set(column, value.to_string())
    }

    pub fn table(&self) -> &'static str {
        self.table
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns
            .iter()
            .find(|(c, _)| *c == column)
            .map(|(_, v)| v)
    }

    pub fn columns(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns.iter().map(|(c, _)| *c)
    }
}

/// Build a NULL-safe predicate over `unique_columns` of `record`.
///
/// Returns `"a" IS ?1 AND "b" IS ?2` together with the values to bind.
/// Every unique column must be present on the record.
pub fn unique_predicate(
    record: &Record,
    unique_columns: &[&str],
) -> Result<(String, Vec<Value>), OperationError> {
    let mut clauses = Vec::with_capacity(unique_columns.len());
    let mut values = Vec::with_capacity(unique_columns.len());
    for (i, column) in unique_columns.iter().enumerate() {
        let value = record
            .get(column)
            .ok_or_else(|| OperationError::MissingUniqueColumn {
                table: record.table.to_string(),
                column: column.to_string(),
            })?;
        clauses.push(format!("\"{column}\" IS ?{}", i + 1));
        values.push(value.clone());
    }
    Ok((clauses.join(" AND "), values))
}

/// Insert `record`, or update the row sharing its unique columns.
///
/// Returns the row id either way. Insert failures other than a uniqueness
/// conflict propagate unchanged.
pub fn upsert(
    conn: &Connection,
    record: &Record,
    unique_columns: &[&str],
) -> Result<i64, OperationError> {
    let (predicate, key) = unique_predicate(record, unique_columns)?;
    let table = record.table;

    let columns: Vec<String> = record.columns.iter().map(|(c, _)| format!("\"{c}\"")).collect();
    let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("?{i}")).collect();
    let insert = format!(
        "INSERT INTO \"{table}\" ({}) VALUES ({})",
        columns.join(", "),
        placeholders.join(", ")
    );

    match conn.execute(&insert, params_from_iter(record.columns.iter().map(|(_, v)| v))) {
        Ok(_) => return Ok(conn.last_insert_rowid()),
        Err(e) if is_uniqueness_violation(&e) => {}
        Err(e) => return Err(e.into()),
    }

    let lookup = format!("SELECT id FROM \"{table}\" WHERE {predicate}");
    let id = match conn.query_row(&lookup, params_from_iter(key.iter()), |row| row.get::<_, i64>(0)) {
        Ok(id) => id,
        Err(rusqlite::Error::QueryReturnedNoRows) => return Err(lost_race(record, unique_columns)),
        Err(e) => return Err(e.into()),
    };

    let rest: Vec<&(&'static str, Value)> = record
        .columns
        .iter()
        .filter(|(c, _)| !unique_columns.contains(c))
        .collect();
    if rest.is_empty() {
        return Ok(id);
    }

    let assignments: Vec<String> = rest
        .iter()
        .enumerate()
        .map(|(i, (c, _))| format!("\"{c}\" = ?{}", i + 1))
        .collect();
    let update = format!(
        "UPDATE \"{table}\" SET {} WHERE id = ?{}",
        assignments.join(", "),
        rest.len() + 1
    );
    let id_value = Value::Integer(id);
    let params = rest.iter().map(|(_, v)| v).chain(std::iter::once(&id_value));
    let changed = conn.execute(&update, params_from_iter(params))?;
    if changed == 0 {
        return Err(lost_race(record, unique_columns));
    }

    Ok(id)
}

fn is_uniqueness_violation(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(e, _) => {
            e.code == ErrorCode::ConstraintViolation
                && (e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                    || e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY)
        }
        _ => false,
    }
}

fn lost_race(record: &Record, unique_columns: &[&str]) -> OperationError {
    let key = unique_columns
        .iter()
        .map(|c| match record.get(c) {
            Some(v) => format!("{c}={}", display_value(v)),
            None => format!("{c}=?"),
        })
        .collect::<Vec<_>>()
        .join(", ");
    OperationError::LostRace {
        table: record.table.to_string(),
        key,
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Integer(n) => n.to_string(),
        Value::Real(f) => f.to_string(),
        Value::Text(s) => format!("'{s}'"),
        Value::Blob(b) => format!("<{} bytes>", b.len()),
    }
}

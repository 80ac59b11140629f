pub mod bootstrap;
pub mod sqlite;

pub use sqlite::SqliteStore;

use std::time::Duration;

use rusqlite::types::{ToSqlOutput, Value, ValueRef};
use rusqlite::ToSql;

use crate::error::{CatalogError, Result};

/// A single SQL value crossing the store boundary
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl SqlValue {
    pub fn text(value: impl Into<String>) -> Self {
        SqlValue::Text(value.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            SqlValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            SqlValue::Integer(i) => Some(*i),
            SqlValue::Text(s) => s.parse().ok(),
            _ => None,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            SqlValue::Null => serde_json::Value::Null,
            SqlValue::Integer(i) => serde_json::Value::from(*i),
            SqlValue::Real(f) => serde_json::Value::from(*f),
            SqlValue::Text(s) => serde_json::Value::from(s.clone()),
        }
    }
}

impl ToSql for SqlValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            SqlValue::Null => ToSqlOutput::Owned(Value::Null),
            SqlValue::Integer(i) => ToSqlOutput::Owned(Value::Integer(*i)),
            SqlValue::Real(f) => ToSqlOutput::Owned(Value::Real(*f)),
            SqlValue::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
        })
    }
}

impl From<ValueRef<'_>> for SqlValue {
    fn from(value: ValueRef<'_>) -> Self {
        match value {
            ValueRef::Null => SqlValue::Null,
            ValueRef::Integer(i) => SqlValue::Integer(i),
            ValueRef::Real(f) => SqlValue::Real(f),
            ValueRef::Text(t) => SqlValue::Text(String::from_utf8_lossy(t).into_owned()),
            ValueRef::Blob(b) => SqlValue::Text(String::from_utf8_lossy(b).into_owned()),
        }
    }
}

/// One result row. Column names are lower-cased; lookup is by name,
/// positional access preserves the SELECT order.
#[derive(Debug, Clone)]
pub struct Row {
    columns: Vec<String>,
    values: Vec<SqlValue>,
}

impl Row {
    pub fn new(columns: Vec<String>, values: Vec<SqlValue>) -> Self {
        debug_assert_eq!(columns.len(), values.len());
        Self { columns, values }
    }

    pub fn get(&self, name: &str) -> Option<&SqlValue> {
        self.columns
            .iter()
            .position(|c| c.eq_ignore_ascii_case(name))
            .map(|i| &self.values[i])
    }

    pub fn first(&self) -> Option<&SqlValue> {
        self.values.first()
    }

    /// Required non-null text column
    pub fn get_str(&self, name: &str) -> Result<String> {
        match self.get(name) {
            Some(SqlValue::Text(s)) => Ok(s.clone()),
            Some(SqlValue::Integer(i)) => Ok(i.to_string()),
            Some(SqlValue::Real(f)) => Ok(f.to_string()),
            _ => Err(CatalogError::Storage(format!(
                "missing or null column: {name}"
            ))),
        }
    }

    pub fn opt_str(&self, name: &str) -> Option<String> {
        match self.get(name) {
            Some(SqlValue::Text(s)) => Some(s.clone()),
            Some(SqlValue::Integer(i)) => Some(i.to_string()),
            _ => None,
        }
    }

    pub fn get_i64(&self, name: &str) -> Result<i64> {
        self.get(name)
            .and_then(SqlValue::as_i64)
            .ok_or_else(|| CatalogError::Storage(format!("missing or non-integer column: {name}")))
    }

    pub fn opt_i64(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(SqlValue::as_i64)
    }

    /// Catalog booleans are stored as 'Y'/'N' flags
    pub fn get_flag(&self, name: &str) -> bool {
        matches!(self.get(name), Some(SqlValue::Text(s)) if s.eq_ignore_ascii_case("y"))
    }

    pub fn to_json(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        for (column, value) in self.columns.iter().zip(&self.values) {
            map.insert(column.clone(), value.to_json());
        }
        serde_json::Value::Object(map)
    }
}

/// The minimal SQL capability the engine consumes from its storage
/// collaborator. Row ordering comes from the SQL's ORDER BY.
pub trait CatalogStore: Send + Sync {
    fn query(&self, sql: &str, params: &[SqlValue]) -> Result<Vec<Row>>;

    /// Exactly-one-row query. `NotFound` on zero rows, `Ambiguous` on more.
    fn query_scalar(&self, sql: &str, params: &[SqlValue]) -> Result<SqlValue> {
        let rows = self.query(sql, params)?;
        match rows.len() {
            0 => Err(CatalogError::NotFound("scalar query returned no rows".to_string())),
            1 => Ok(rows[0].first().cloned().unwrap_or(SqlValue::Null)),
            n => Err(CatalogError::Ambiguous(format!(
                "scalar query returned {n} rows"
            ))),
        }
    }

    fn set_statement_timeout(&self, timeout: Duration) -> Result<()>;

    fn clear_statement_timeout(&self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_lookup_is_case_insensitive() {
        let row = Row::new(
            vec!["owner".to_string(), "object_name".to_string()],
            vec![SqlValue::text("HR"), SqlValue::text("EMPLOYEES")],
        );
        assert_eq!(row.get_str("OWNER").unwrap(), "HR");
        assert_eq!(row.get_str("object_name").unwrap(), "EMPLOYEES");
        assert!(row.get_str("missing").is_err());
    }

    #[test]
    fn flags_parse_y_n() {
        let row = Row::new(
            vec!["temporary".to_string(), "generated".to_string()],
            vec![SqlValue::text("Y"), SqlValue::text("N")],
        );
        assert!(row.get_flag("temporary"));
        assert!(!row.get_flag("generated"));
        assert!(!row.get_flag("absent"));
    }
}

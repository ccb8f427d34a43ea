//! Result set -> record mapping

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::error::DbError;
use super::value::Value;

/// Raw rows as returned by a backend: column names plus row-major cells
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl ResultSet {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn row(mut self, cells: Vec<Value>) -> Self {
        self.rows.push(cells);
        self
    }
}

/// One mapped row. Keeps the result set's column order for display;
/// equality ignores order.
#[derive(Debug, Clone, Default, Eq)]
pub struct Record {
    cells: Vec<(String, Value)>,
}

impl Record {
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.cells.iter().find(|(c, _)| c == column).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.cells.iter().map(|(c, v)| (c.as_str(), v))
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(c, _)| c.as_str())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Text column that may be NULL
    pub fn text(&self, column: &str) -> Result<Option<String>, DbError> {
        let value = self.require(column)?;
        match value.as_str() {
            Some(s) => Ok(Some(s.to_owned())),
            None if *value == Value::Null => Ok(None),
            None => Err(type_mismatch(column, "text", value)),
        }
    }

    /// Non-null text column
    pub fn required_text(&self, column: &str) -> Result<String, DbError> {
        self.text(column)?
            .ok_or_else(|| DbError::mapping(format!("column '{}' is NULL", column)))
    }

    pub fn uuid(&self, column: &str) -> Result<uuid::Uuid, DbError> {
        let value = self.require(column)?;
        value
            .as_uuid()
            .ok_or_else(|| type_mismatch(column, "uuid", value))
    }

    fn require(&self, column: &str) -> Result<&Value, DbError> {
        self.get(column)
            .ok_or_else(|| DbError::mapping(format!("missing column '{}'", column)))
    }
}

fn type_mismatch(column: &str, expected: &str, got: &Value) -> DbError {
    DbError::mapping(format!(
        "column '{}' expected {}, got {}",
        column,
        expected,
        got.kind()
    ))
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.cells.len() == other.cells.len()
            && self
                .cells
                .iter()
                .all(|(c, v)| other.get(c) == Some(v))
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (column, value) in &self.cells {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

/// Zip every row with the column descriptors.
///
/// Fails as a whole if any row's width differs from the column count.
pub fn map_rows(set: ResultSet) -> Result<Vec<Record>, DbError> {
    let ResultSet { columns, rows } = set;

    if let Some((index, row)) = rows
        .iter()
        .enumerate()
        .find(|(_, row)| row.len() != columns.len())
    {
        return Err(DbError::mapping(format!(
            "row {} has {} cells but the result set describes {} columns",
            index,
            row.len(),
            columns.len()
        )));
    }

    Ok(rows
        .into_iter()
        .map(|row| columns.iter().cloned().zip(row).collect())
        .collect())
}

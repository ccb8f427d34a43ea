//! SQL builders
//!
//! Turns (table, conditions, options) into a parameterized statement. Values
//! never end up in the SQL text; they are pushed into `params` and referenced
//! through `$1, $2, ...` in the order they were generated.
//!
//! Table names and projected field names are written into the statement as
//! given. Callers must only pass trusted identifiers.

use super::error::DbError;
use super::value::{Value, ValueMap};

/// Schema created by [`build_init`]
pub const RECRUITERS_SCHEMA: &str = "CREATE TABLE IF NOT EXISTS recruiters (id uuid PRIMARY KEY, name varchar(255), company varchar(255), city varchar(255), state varchar(255), country varchar(255));";

/// Read options
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOptions {
    /// Columns to project; `None` selects `*`
    pub fields: Option<Vec<String>>,
    /// Maximum number of rows
    pub limit: Option<u64>,
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// A statement plus the values bound to its placeholders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltQuery {
    pub sql: String,
    pub params: Vec<Value>,
}

impl BuiltQuery {
    fn unparameterized(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }
}

/// Accumulates SQL text and keeps placeholder numbering in step with `params`
struct SqlWriter {
    sql: String,
    params: Vec<Value>,
    placeholders: usize,
}

impl SqlWriter {
    fn new(head: String) -> Self {
        Self {
            sql: head,
            params: Vec::new(),
            placeholders: 0,
        }
    }

    /// Push a value and return its 1-based placeholder
    fn bind(&mut self, value: Value) -> String {
        self.params.push(value);
        self.placeholders += 1;
        format!("${}", self.placeholders)
    }

    /// Append `WHERE "a" = $n AND "b" = $n+1 ...`; `eq` is the spacing around `=`.
    fn conditions(&mut self, conditions: &ValueMap, eq: &str) {
        for (i, (column, value)) in conditions.iter().enumerate() {
            let keyword = if i == 0 { "WHERE" } else { "AND" };
            let placeholder = self.bind(value.clone());
            self.sql
                .push_str(&format!(" {} \"{}\"{}{}", keyword, column, eq, placeholder));
        }
    }

    fn finish(mut self) -> BuiltQuery {
        self.sql.push(';');
        debug_assert_eq!(
            self.placeholders,
            self.params.len(),
            "placeholder count out of step with params: {}",
            self.sql
        );
        BuiltQuery {
            sql: self.sql,
            params: self.params,
        }
    }
}

/// Build a `SELECT` over `table`.
///
/// ```ignore
/// let q = build_select("recruiters", &ValueMap::new().with("id", "abc"),
///     &QueryOptions::new().fields(["name", "city"]));
/// assert_eq!(q.sql, r#"SELECT 'name', 'city' FROM recruiters WHERE "id" = $1;"#);
/// ```
pub fn build_select(table: &str, conditions: &ValueMap, options: &QueryOptions) -> BuiltQuery {
    let columns = match &options.fields {
        Some(fields) => fields
            .iter()
            .map(|f| format!("'{}'", f))
            .collect::<Vec<_>>()
            .join(", "),
        None => "*".to_string(),
    };

    let mut w = SqlWriter::new(format!("SELECT {} FROM {}", columns, table));
    w.conditions(conditions, " = ");

    if let Some(limit) = options.limit {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let placeholder = w.bind(Value::Integer(limit));
        w.sql.push_str(&format!(" LIMIT {}", placeholder));
    }

    w.finish()
}

/// Build an `INSERT` of every column in `data`, in map order.
pub fn build_insert(table: &str, data: &ValueMap) -> Result<BuiltQuery, DbError> {
    if data.is_empty() {
        return Err(DbError::EmptyData {
            table: table.to_owned(),
        });
    }

    let columns = data.columns().collect::<Vec<_>>().join(", ");
    let mut w = SqlWriter::new(format!("INSERT INTO {} ({}) VALUES (", table, columns));

    let placeholders: Vec<String> = data.values().map(|v| w.bind(v.clone())).collect();
    w.sql.push_str(&placeholders.join(", "));
    w.sql.push(')');

    Ok(w.finish())
}

/// Build an `UPDATE` setting every column in `data` on rows matching `conditions`.
///
/// Empty `conditions` means every row in the table.
pub fn build_update(
    table: &str,
    conditions: &ValueMap,
    data: &ValueMap,
) -> Result<BuiltQuery, DbError> {
    if data.is_empty() {
        return Err(DbError::EmptyData {
            table: table.to_owned(),
        });
    }

    let mut w = SqlWriter::new(format!("UPDATE {} SET ", table));

    let assignments: Vec<String> = data
        .iter()
        .map(|(column, value)| format!("{}={}", column, w.bind(value.clone())))
        .collect();
    w.sql.push_str(&assignments.join(", "));
    w.conditions(conditions, "=");

    Ok(w.finish())
}

/// Build a `DELETE` of rows matching `conditions`, with the condition values bound.
///
/// Empty `conditions` means every row in the table.
pub fn build_delete(table: &str, conditions: &ValueMap) -> BuiltQuery {
    let mut w = SqlWriter::new(format!("DELETE FROM {}", table));
    w.conditions(conditions, " = ");
    w.finish()
}

/// The one schema statement run at startup
pub fn build_init() -> BuiltQuery {
    BuiltQuery::unparameterized(RECRUITERS_SCHEMA)
}

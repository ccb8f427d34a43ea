//! Recruiter records

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validation::{check_len, ValidationError};
use crate::db::{DbError, Record, ValueMap};

pub const TABLE: &str = "recruiters";

/// Every text column is `varchar(255)`
const MAX_FIELD_LEN: usize = 255;

/// A row of the `recruiters` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recruiter {
    pub id: Uuid,
    pub name: Option<String>,
    pub company: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
}

impl Recruiter {
    pub fn from_record(record: &Record) -> Result<Self, DbError> {
        Ok(Self {
            id: record.uuid("id")?,
            name: record.text("name")?,
            company: record.text("company")?,
            city: record.text("city")?,
            state: record.text("state")?,
            country: record.text("country")?,
        })
    }

    /// All columns, `id` first
    pub fn to_values(&self) -> ValueMap {
        ValueMap::new()
            .with("id", self.id)
            .with("name", self.name.clone())
            .with("company", self.company.clone())
            .with("city", self.city.clone())
            .with("state", self.state.clone())
            .with("country", self.country.clone())
    }
}

/// Create/update payload. Absent fields are left alone on update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RecruiterInput {
    pub name: Option<String>,
    pub company: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
}

impl RecruiterInput {
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in self.fields() {
            if let Some(v) = value {
                check_len(field, v, MAX_FIELD_LEN)?;
            }
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.fields().iter().all(|(_, v)| v.is_none())
    }

    /// Only the columns present in the payload
    pub fn changes(&self) -> ValueMap {
        self.fields()
            .into_iter()
            .filter_map(|(field, value)| value.map(|v| (field, v.to_owned())))
            .collect()
    }

    pub fn into_recruiter(self, id: Uuid) -> Recruiter {
        Recruiter {
            id,
            name: self.name,
            company: self.company,
            city: self.city,
            state: self.state,
            country: self.country,
        }
    }

    fn fields(&self) -> [(&'static str, Option<&str>); 5] {
        [
            ("name", self.name.as_deref()),
            ("company", self.company.as_deref()),
            ("city", self.city.as_deref()),
            ("state", self.state.as_deref()),
            ("country", self.country.as_deref()),
        ]
    }
}

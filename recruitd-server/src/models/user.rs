//! User accounts
//!
//! The `users` table is provisioned outside this service; only its shape is
//! relied on here.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::{DbError, Record, ValueMap};

pub const TABLE: &str = "users";

/// Alias given to every newly registered user
pub const DEFAULT_ALIAS: &str = "Anonymous";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    /// bcrypt hash; never sent to clients
    #[serde(skip_serializing)]
    pub password: String,
    pub alias: String,
}

impl User {
    pub fn from_record(record: &Record) -> Result<Self, DbError> {
        Ok(Self {
            id: record.uuid("id")?,
            email: record.required_text("email")?,
            password: record.required_text("password")?,
            alias: record.text("alias")?.unwrap_or_default(),
        })
    }

    pub fn to_values(&self) -> ValueMap {
        ValueMap::new()
            .with("id", self.id)
            .with("email", self.email.as_str())
            .with("password", self.password.as_str())
            .with("alias", self.alias.as_str())
    }
}

/// Login / register body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_is_not_serialized() {
        let user = User {
            id: Uuid::nil(),
            email: "ada@example.com".into(),
            password: "$2b$12$secret".into(),
            alias: DEFAULT_ALIAS.into(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["alias"], "Anonymous");
    }

    #[test]
    fn record_round_trip() {
        let user = User {
            id: Uuid::new_v4(),
            email: "ada@example.com".into(),
            password: "hash".into(),
            alias: "ada".into(),
        };
        let record: Record = user.to_values().into_iter().collect();
        assert_eq!(User::from_record(&record).unwrap(), user);
    }
}

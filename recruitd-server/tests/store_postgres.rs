//! Data-access verbs against a live PostgreSQL
//!
//! Run with a reachable server configured through the usual variables:
//!   DB_USER=postgres DB_PASSWORD=... DATABASE=recruitd_test \
//!     cargo test -p recruitd-server --test store_postgres -- --ignored

use std::time::Duration;

use recruitd_server::db::{Backend, BuiltQuery, QueryOptions, Value, ValueMap};
use recruitd_server::models::{recruiter, Recruiter};
use recruitd_server::{DbConfig, DbError, PgBackend, Store};
use uuid::Uuid;

fn config_from_env() -> DbConfig {
    let defaults = DbConfig::default();
    DbConfig {
        user: std::env::var("DB_USER").unwrap_or(defaults.user),
        database: std::env::var("DATABASE").unwrap_or(defaults.database),
        password: std::env::var("DB_PASSWORD").ok(),
        host: std::env::var("DB_HOST").unwrap_or(defaults.host),
        port: std::env::var("DB_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port),
        statement_timeout: Some(Duration::from_secs(10)),
    }
}

fn raw(sql: String) -> BuiltQuery {
    BuiltQuery {
        sql,
        params: Vec::new(),
    }
}

/// A throwaway table so unconditional updates and deletes stay contained
struct Scratch {
    backend: PgBackend,
    table: String,
}

impl Scratch {
    async fn create() -> Self {
        let backend = PgBackend::new(config_from_env());
        let table = format!("scratch_{}", Uuid::new_v4().simple());
        backend
            .execute(&raw(format!(
                "CREATE TABLE {table} (id uuid PRIMARY KEY, name varchar(255), city varchar(255));"
            )))
            .await
            .unwrap();
        Self { backend, table }
    }

    fn store(&self) -> Store {
        Store::new(self.backend.clone())
    }

    async fn drop_table(self) {
        self.backend
            .execute(&raw(format!("DROP TABLE IF EXISTS {};", self.table)))
            .await
            .unwrap();
    }
}

async fn seed(store: &Store, table: &str, name: &str, city: &str) -> Uuid {
    let id = Uuid::new_v4();
    let row = ValueMap::new()
        .with("id", id)
        .with("name", name)
        .with("city", city);
    store.create(table, &row).await.unwrap();
    id
}

#[tokio::test]
#[ignore = "requires database"]
async fn init_is_idempotent() {
    let store = Store::new(PgBackend::new(config_from_env()));
    store.init().await.unwrap();
    store.init().await.unwrap();
}

#[tokio::test]
#[ignore = "requires database"]
async fn recruiter_round_trip() {
    let store = Store::new(PgBackend::new(config_from_env()));
    store.init().await.unwrap();

    let recruiter = Recruiter {
        id: Uuid::new_v4(),
        name: Some("Ada".into()),
        company: Some("Analytical".into()),
        city: Some("London".into()),
        state: None,
        country: Some("UK".into()),
    };
    store
        .create(recruiter::TABLE, &recruiter.to_values())
        .await
        .unwrap();

    let by_id = ValueMap::new().with("id", recruiter.id);
    let record = store
        .find_one(recruiter::TABLE, &by_id, &QueryOptions::new())
        .await
        .unwrap()
        .expect("row was just inserted");
    assert_eq!(Recruiter::from_record(&record).unwrap(), recruiter);

    store
        .update(
            recruiter::TABLE,
            &by_id,
            &ValueMap::new().with("city", "Cambridge"),
        )
        .await
        .unwrap();
    let record = store
        .find_one(recruiter::TABLE, &by_id, &QueryOptions::new())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.get("city"), Some(&Value::from("Cambridge")));
    assert_eq!(record.get("name"), Some(&Value::from("Ada")));

    store.destroy(recruiter::TABLE, &by_id).await.unwrap();
    let gone = store
        .find_one(recruiter::TABLE, &by_id, &QueryOptions::new())
        .await
        .unwrap();
    assert!(gone.is_none());
}

#[tokio::test]
#[ignore = "requires database"]
async fn find_one_without_match_is_none() {
    let scratch = Scratch::create().await;
    let store = scratch.store();

    let found = store
        .find_one(
            &scratch.table,
            &ValueMap::new().with("id", Uuid::new_v4()),
            &QueryOptions::new(),
        )
        .await
        .unwrap();
    assert!(found.is_none());

    let all = store
        .find_all(&scratch.table, &ValueMap::new(), &QueryOptions::new())
        .await
        .unwrap();
    assert!(all.is_empty());

    scratch.drop_table().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn conditions_and_limit_filter_rows() {
    let scratch = Scratch::create().await;
    let store = scratch.store();
    seed(&store, &scratch.table, "Ada", "London").await;
    seed(&store, &scratch.table, "Grace", "London").await;
    seed(&store, &scratch.table, "Linus", "Helsinki").await;

    let london = ValueMap::new().with("city", "London");
    let rows = store
        .find_all(&scratch.table, &london, &QueryOptions::new())
        .await
        .unwrap();
    assert_eq!(rows.len(), 2);

    let limited = store
        .find_all(&scratch.table, &ValueMap::new(), &QueryOptions::new().limit(1))
        .await
        .unwrap();
    assert_eq!(limited.len(), 1);

    scratch.drop_table().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn destroy_binds_values_and_only_hits_matches() {
    let scratch = Scratch::create().await;
    let store = scratch.store();
    seed(&store, &scratch.table, "O'Brien", "Dublin").await;
    let keep = seed(&store, &scratch.table, "Ada", "London").await;

    // A quote in the value must not break out of the statement
    store
        .destroy(&scratch.table, &ValueMap::new().with("name", "O'Brien"))
        .await
        .unwrap();

    let rows = store
        .find_all(&scratch.table, &ValueMap::new(), &QueryOptions::new())
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].uuid("id").unwrap(), keep);

    scratch.drop_table().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn empty_conditions_touch_every_row() {
    let scratch = Scratch::create().await;
    let store = scratch.store();
    seed(&store, &scratch.table, "Ada", "London").await;
    seed(&store, &scratch.table, "Grace", "Arlington").await;

    store
        .update(
            &scratch.table,
            &ValueMap::new(),
            &ValueMap::new().with("city", "Nowhere"),
        )
        .await
        .unwrap();
    let moved = store
        .find_all(
            &scratch.table,
            &ValueMap::new().with("city", "Nowhere"),
            &QueryOptions::new(),
        )
        .await
        .unwrap();
    assert_eq!(moved.len(), 2);

    store.destroy(&scratch.table, &ValueMap::new()).await.unwrap();
    let rows = store
        .find_all(&scratch.table, &ValueMap::new(), &QueryOptions::new())
        .await
        .unwrap();
    assert!(rows.is_empty());

    scratch.drop_table().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn unknown_table_is_a_query_error() {
    let store = Store::new(PgBackend::new(config_from_env()));
    let err = store
        .find_all("no_such_table", &ValueMap::new(), &QueryOptions::new())
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::Query(_)), "got {err:?}");
}

#[tokio::test]
#[ignore = "requires database"]
async fn unreachable_server_is_a_connection_error() {
    let config = DbConfig {
        host: "127.0.0.1".into(),
        port: 1,
        statement_timeout: Some(Duration::from_secs(5)),
        ..config_from_env()
    };
    let store = Store::new(PgBackend::new(config));
    let err = store.init().await.unwrap_err();
    assert!(err.is_connection(), "got {err:?}");
}

//! Integration tests for the dataapi-rs driver.
//!
//! # Overview
//!
//! These tests run against a live Aurora cluster through the RDS Data API.
//! Unlike the driver tests, which use an in-memory transport, they verify
//! the real SDK wiring and the service's answers.
//!
//! # Prerequisites
//!
//! 1. An Aurora cluster (PostgreSQL or MySQL compatible) with the Data API
//!    (HTTP endpoint) enabled.
//! 2. A Secrets Manager secret holding the database credentials.
//! 3. AWS credentials and a region resolvable by the default provider chain.
//!
//! # Configuration
//!
//! | Variable                    | Description                          |
//! |-----------------------------|--------------------------------------|
//! | `DATAAPI_CONNECTION_STRING` | Pipe or URL form connection string   |
//!
//! # Running Tests
//!
//! Integration tests are marked with `#[ignore]` to prevent failures in
//! CI environments without a cluster. Run them explicitly:
//!
//! ```bash
//! DATAAPI_CONNECTION_STRING='dataapi:arn:...:cluster:c|arn:...:secret:s|mydb' \
//!   cargo test --test integration_tests -- --ignored --nocapture
//! ```
//!
//! # Test Organization
//!
//! - `infrastructure_*` - Validates test setup and helpers
//! - `connection_*` - Connection establishment and management
//! - `query_*` - Query execution and results
//! - `transaction_*` - Transaction handling
//! - `arrow_*` - Arrow conversion validation

mod common;

use arrow::array::{Array, Int64Array, StringArray};
use arrow::datatypes::DataType;
use common::{generate_test_table_name, get_test_connection, get_test_connection_string};
use dataapi_rs::{Connection, Driver, ErrorCode, Value};

async fn drop_table(conn: &Connection, table: &str) {
    let _ = conn
        .prepare(format!("DROP TABLE IF EXISTS {}", table))
        .expect("connection should be open")
        .exec(&[])
        .await;
}

// ============================================================================
// Infrastructure Tests
// ============================================================================

#[test]
fn infrastructure_table_names_are_unique() {
    let first = generate_test_table_name();
    std::thread::sleep(std::time::Duration::from_millis(1));
    let second = generate_test_table_name();

    assert_ne!(first, second);
    assert!(first.starts_with("dataapi_rs_test_"));
}

#[test]
fn infrastructure_configured_connection_string_parses() {
    if let Some(conn_str) = get_test_connection_string() {
        assert!(
            Driver::new().validate_connection_string(&conn_str),
            "DATAAPI_CONNECTION_STRING should be a valid connection string"
        );
    }
}

// ============================================================================
// Connection Tests
// ============================================================================

#[tokio::test]
#[ignore]
async fn connection_select_one() {
    skip_if_no_dataapi!();

    let mut conn = get_test_connection().await.expect("Failed to connect");

    let mut rows = conn
        .prepare("SELECT 1 AS one")
        .unwrap()
        .query(&[])
        .await
        .expect("SELECT 1 should succeed");

    assert_eq!(rows.columns(), ["one"]);
    let mut dest = vec![Value::Null];
    assert!(rows.next(&mut dest).unwrap());
    assert_eq!(dest[0], Value::Integer(1));
    assert!(!rows.next(&mut dest).unwrap());

    conn.close().await;
}

#[tokio::test]
#[ignore]
async fn connection_unknown_database_reports_service_error() {
    skip_if_no_dataapi!();

    let conn_str = get_test_connection_string().unwrap();
    let mut params = Driver::new().open(&conn_str).unwrap().params().clone();
    params.database = "dataapi_rs_no_such_database".to_string();

    let conn = dataapi_rs::Database::new(params)
        .connect()
        .await
        .expect("connect sends nothing");

    let err = conn
        .prepare("SELECT 1")
        .unwrap()
        .exec(&[])
        .await
        .expect_err("unknown database should fail");
    assert_eq!(err.to_error_code(), ErrorCode::Remote);
    assert!(!err.to_string().is_empty());
}

// ============================================================================
// Query Tests
// ============================================================================

#[tokio::test]
#[ignore]
async fn query_parameters_round_trip() {
    skip_if_no_dataapi!();

    let mut conn = get_test_connection().await.expect("Failed to connect");
    let table = generate_test_table_name();

    conn.prepare(format!(
        "CREATE TABLE {} (id BIGINT PRIMARY KEY, name VARCHAR(64), score DOUBLE PRECISION)",
        table
    ))
    .unwrap()
    .exec(&[])
    .await
    .expect("CREATE TABLE should succeed");

    let insert = conn
        .prepare(format!(
            "INSERT INTO {} (id, name, score) VALUES (:1, :2, :3)",
            table
        ))
        .unwrap();
    let first = insert
        .exec(&[1i64.into(), "alice".into(), 9.5f64.into()])
        .await
        .expect("INSERT should succeed");
    assert_eq!(first.rows_affected(), 1);
    insert
        .exec(&[2i64.into(), None::<String>.into(), None::<f64>.into()])
        .await
        .expect("INSERT with NULLs should succeed");

    let rows: Vec<Vec<Value>> = conn
        .prepare(format!("SELECT id, name, score FROM {} ORDER BY id", table))
        .unwrap()
        .query(&[])
        .await
        .expect("SELECT should succeed")
        .collect();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0][0], Value::Integer(1));
    assert_eq!(rows[0][1], Value::String("alice".to_string()));
    assert_eq!(rows[0][2], Value::Double(9.5));
    assert!(rows[1][1].is_null());
    assert!(rows[1][2].is_null());

    drop_table(&conn, &table).await;
    conn.close().await;
}

// ============================================================================
// Transaction Tests
// ============================================================================

#[tokio::test]
#[ignore]
async fn transaction_rollback_discards_changes() {
    skip_if_no_dataapi!();

    let mut conn = get_test_connection().await.expect("Failed to connect");
    let table = generate_test_table_name();

    conn.prepare(format!("CREATE TABLE {} (id BIGINT)", table))
        .unwrap()
        .exec(&[])
        .await
        .expect("CREATE TABLE should succeed");

    let mut tx = conn.begin().await.expect("BEGIN should succeed");
    conn.prepare(format!("INSERT INTO {} VALUES (:1)", table))
        .unwrap()
        .exec(&[1i64.into()])
        .await
        .expect("INSERT in transaction should succeed");
    tx.rollback().await.expect("ROLLBACK should succeed");

    let count: Vec<Vec<Value>> = conn
        .prepare(format!("SELECT COUNT(*) FROM {}", table))
        .unwrap()
        .query(&[])
        .await
        .unwrap()
        .collect();
    assert_eq!(count[0][0], Value::Integer(0));

    drop_table(&conn, &table).await;
    conn.close().await;
}

#[tokio::test]
#[ignore]
async fn transaction_commit_persists_changes() {
    skip_if_no_dataapi!();

    let mut conn = get_test_connection().await.expect("Failed to connect");
    let table = generate_test_table_name();

    conn.prepare(format!("CREATE TABLE {} (id BIGINT)", table))
        .unwrap()
        .exec(&[])
        .await
        .expect("CREATE TABLE should succeed");

    let mut tx = conn.begin().await.expect("BEGIN should succeed");
    conn.prepare(format!("INSERT INTO {} VALUES (:1)", table))
        .unwrap()
        .exec(&[7i64.into()])
        .await
        .unwrap();
    tx.commit().await.expect("COMMIT should succeed");
    assert!(tx.commit().await.is_err(), "second commit must be rejected");

    let ids: Vec<Vec<Value>> = conn
        .prepare(format!("SELECT id FROM {}", table))
        .unwrap()
        .query(&[])
        .await
        .unwrap()
        .collect();
    assert_eq!(ids, vec![vec![Value::Integer(7)]]);

    drop_table(&conn, &table).await;
    conn.close().await;
}

// ============================================================================
// Arrow Tests
// ============================================================================

#[tokio::test]
#[ignore]
async fn arrow_record_batch_from_query() {
    skip_if_no_dataapi!();

    let mut conn = get_test_connection().await.expect("Failed to connect");

    let rows = conn
        .prepare("SELECT CAST(42 AS BIGINT) AS answer, 'hello' AS greeting")
        .unwrap()
        .query(&[])
        .await
        .expect("Query should succeed");

    let batch = rows.to_record_batch().expect("Conversion should succeed");
    assert_eq!(batch.num_rows(), 1);
    assert_eq!(batch.schema().field(0).data_type(), &DataType::Int64);

    let answer = batch
        .column(0)
        .as_any()
        .downcast_ref::<Int64Array>()
        .unwrap();
    assert_eq!(answer.value(0), 42);

    let greeting = batch
        .column(1)
        .as_any()
        .downcast_ref::<StringArray>()
        .unwrap();
    assert_eq!(greeting.value(0), "hello");
    assert!(!greeting.is_null(0));

    conn.close().await;
}

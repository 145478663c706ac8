//! Basic usage example for the dataapi-rs driver.
//!
//! ```bash
//! DATAAPI_CONNECTION_STRING='dataapi:<clusterARN>|<secretARN>|<database>' \
//!   RUST_LOG=dataapi_rs=debug cargo run --example basic_usage
//! ```

use dataapi_rs::{Connection, Driver, Value};
use std::error::Error;
use tracing_subscriber::EnvFilter;

const TABLE: &str = "dataapi_rs_example";

/// Opens a connection from `DATAAPI_CONNECTION_STRING`.
async fn example_connection() -> Result<Connection, Box<dyn Error>> {
    let conn_string = std::env::var("DATAAPI_CONNECTION_STRING")
        .map_err(|_| "DATAAPI_CONNECTION_STRING is not set")?;
    let driver = Driver::new();
    let database = driver.open(&conn_string)?;
    let connection = database.connect().await?;
    Ok(connection)
}

/// Executes a simple arithmetic query and returns the result.
async fn example_simple_select(conn: &Connection) -> Result<Option<i64>, Box<dyn Error>> {
    let mut rows = conn.prepare("SELECT 1 + 1")?.query(&[]).await?;
    let mut row = vec![Value::Null];
    if rows.next(&mut row)? {
        return Ok(row[0].as_i64());
    }
    Ok(None)
}

/// Demonstrates a full transaction: create table, insert, commit, select, cleanup.
async fn example_transaction(conn: &Connection) -> Result<usize, Box<dyn Error>> {
    conn.prepare(format!(
        "CREATE TABLE {} (id BIGINT, name VARCHAR(100))",
        TABLE
    ))?
    .exec(&[])
    .await?;

    let mut tx = conn.begin().await?;
    let insert = conn.prepare(format!("INSERT INTO {} VALUES (:1, :2)", TABLE))?;
    for (id, name) in [(1i64, "Alice"), (2, "Bob"), (3, "Charlie")] {
        insert.exec(&[id.into(), name.into()]).await?;
    }
    tx.commit().await?;

    let rows = conn
        .prepare(format!("SELECT id, name FROM {} ORDER BY id", TABLE))?
        .query(&[])
        .await?;
    let batch = rows.to_record_batch()?;
    println!("Schema: {:?}", batch.schema());

    conn.prepare(format!("DROP TABLE {}", TABLE))?
        .exec(&[])
        .await?;
    Ok(batch.num_rows())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut conn = example_connection().await?;
    println!("Connected: {:?}", conn.params());

    let value = example_simple_select(&conn).await?;
    println!("Simple select: {:?}", value);

    let rows = example_transaction(&conn).await?;
    println!("Transaction: {} row(s)", rows);

    conn.close().await;
    println!("Done");

    Ok(())
}

// Database module - quiz store backed by libSQL

use std::sync::Arc;
use color_eyre::{
    eyre::{ensure, OptionExt},
    Result,
};

pub mod models;
pub use models::*;

mod helpers;
mod quiz;
mod schema;

// Main database handle
#[derive(Clone)]
pub struct Db {
    _db: Arc<libsql::Database>,
    conn: libsql::Connection,
}

impl Db {
    pub async fn new(url: String, auth_token: Option<String>) -> Result<Self> {
        let db = if url.starts_with("file:") {
            // Local SQLite file
            let path = url.strip_prefix("file:").unwrap_or(&url);
            libsql::Builder::new_local(path)
                .build()
                .await?
        } else {
            // Remote Turso database
            libsql::Builder::new_remote(url.to_owned(), auth_token.unwrap_or_default())
                .build()
                .await?
        };

        // One shared connection; statements on it are serialized.
        let conn = db.connect()?;

        // Verify connection
        let one = conn
            .query("SELECT 1", ())
            .await?
            .next()
            .await?
            .ok_or_eyre("connection check failed")?
            .get::<i32>(0)?;
        ensure!(one == 1, "connection check returned {one}");

        schema::create_schema(&conn).await?;

        tracing::info!("database connection has been verified");

        Ok(Self {
            _db: Arc::new(db),
            conn,
        })
    }

    fn conn(&self) -> &libsql::Connection {
        &self.conn
    }
}

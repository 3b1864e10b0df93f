//! Process-lifetime handle to the document database.
//!
//! Opened once during startup and shared across invocations for the life
//! of the process; no teardown is needed. The chat path neither reads nor
//! writes it; the handle is reserved for conversation persistence.

use crate::Result;
use libsql::{Builder, Database};
use tracing::info;

pub struct DocumentStore {
    db: Database,
}

impl DocumentStore {
    pub async fn connect(db_path: &str) -> Result<Self> {
        let db = Builder::new_local(db_path).build().await?;

        // Open a connection eagerly so a bad path fails at startup, not on
        // first use.
        db.connect()?;

        info!("Document store ready: {}", db_path);

        Ok(Self { db })
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

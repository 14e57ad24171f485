use anyhow::{anyhow, Context, Result};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::db::{
    models::{process::DEFAULT_TYPE, Process},
    Database,
};

fn row_to_process(row: &Row) -> rusqlite::Result<Process> {
    Ok(Process {
        id: row.get("id")?,
        path: row.get("path")?,
        name: row.get("name")?,
        type_str: row.get("type_str")?,
        type_color: row.get("color")?,
    })
}

pub struct ProcessRepository<'a> {
    conn: &'a Connection,
}

impl<'a> ProcessRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Create the process if its path is new, then return the stored row.
    pub fn save(&self, path: &str) -> Result<Process> {
        self.conn
            .execute(
                "INSERT INTO processes (path, type_str) VALUES (?1, ?2)
                 ON CONFLICT(path) DO NOTHING",
                params![path, DEFAULT_TYPE],
            )
            .with_context(|| format!("failed to insert process {path}"))?;

        self.find(path)?
            .ok_or_else(|| anyhow!("process {path} not found after insert"))
    }

    pub fn find(&self, path: &str) -> Result<Option<Process>> {
        self.conn
            .query_row(
                "SELECT p.id, p.path, p.name, p.type_str, pt.color
                 FROM processes p
                 LEFT JOIN productivity_type pt ON pt.type = p.type_str
                 WHERE p.path = ?1",
                params![path],
                row_to_process,
            )
            .optional()
            .map_err(Into::into)
    }

    /// Returns the number of rows touched (0 when the id is unknown).
    pub fn set_type(&self, process_id: i64, type_str: &str) -> Result<usize> {
        let updated = self.conn.execute(
            "UPDATE processes SET type_str = ?1 WHERE id = ?2",
            params![type_str, process_id],
        )?;
        Ok(updated)
    }
}

impl Database {
    pub async fn save_process(&self, path: &str) -> Result<Process> {
        let path = path.to_string();
        self.execute(move |conn| ProcessRepository::new(conn).save(&path))
            .await
    }

    pub async fn find_process(&self, path: &str) -> Result<Option<Process>> {
        let path = path.to_string();
        self.execute(move |conn| ProcessRepository::new(conn).find(&path))
            .await
    }
}

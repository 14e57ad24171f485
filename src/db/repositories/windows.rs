use anyhow::{anyhow, Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use crate::db::{models::Window, Database};

pub struct WindowRepository<'a> {
    conn: &'a Connection,
}

impl<'a> WindowRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Windows are unique per (process, title).
    pub fn save(&self, process_id: i64, title: &str) -> Result<Window> {
        self.conn
            .execute(
                "INSERT INTO windows (process_id, title) VALUES (?1, ?2)
                 ON CONFLICT(process_id, title) DO NOTHING",
                params![process_id, title],
            )
            .with_context(|| format!("failed to insert window for process {process_id}"))?;

        self.find(process_id, title)?
            .ok_or_else(|| anyhow!("window '{title}' of process {process_id} not found after insert"))
    }

    pub fn find(&self, process_id: i64, title: &str) -> Result<Option<Window>> {
        self.conn
            .query_row(
                "SELECT id, process_id, title, type_str
                 FROM windows
                 WHERE process_id = ?1 AND title = ?2",
                params![process_id, title],
                |row| {
                    Ok(Window {
                        id: row.get(0)?,
                        process_id: row.get(1)?,
                        title: row.get(2)?,
                        type_str: row.get(3)?,
                    })
                },
            )
            .optional()
            .map_err(Into::into)
    }

    pub fn set_type(&self, window_id: i64, type_str: &str) -> Result<usize> {
        let updated = self.conn.execute(
            "UPDATE windows SET type_str = ?1 WHERE id = ?2",
            params![type_str, window_id],
        )?;
        Ok(updated)
    }
}

impl Database {
    pub async fn save_window(&self, process_id: i64, title: &str) -> Result<Window> {
        let title = title.to_string();
        self.execute(move |conn| WindowRepository::new(conn).save(process_id, &title))
            .await
    }

    pub async fn find_window(&self, process_id: i64, title: &str) -> Result<Option<Window>> {
        let title = title.to_string();
        self.execute(move |conn| WindowRepository::new(conn).find(process_id, &title))
            .await
    }
}

//! Time aggregation over heartbeats.
//!
//! Time is the sum of `end_time - start_time` over non-idle heartbeats.
//! Rows whose total is zero are dropped.

use anyhow::Result;
use rusqlite::{params, Connection};

use crate::db::{
    helpers::to_u64,
    models::{ProcessUsage, WindowUsage},
    Database,
};

pub struct UsageRepository<'a> {
    conn: &'a Connection,
}

impl<'a> UsageRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Per-process totals, largest first. Names are returned as stored;
    /// deriving missing ones is up to the caller.
    pub fn process_usage(&self) -> Result<Vec<ProcessUsage>> {
        let mut stmt = self.conn.prepare(
            "SELECT p.id, p.path, p.name, p.type_str, pt.color,
                    SUM(h.end_time - h.start_time) AS total
             FROM heartbeats h
             JOIN processes p ON h.process_id = p.id
             LEFT JOIN productivity_type pt ON pt.type = p.type_str
             WHERE h.idle = 0
               AND p.path IS NOT NULL
               AND p.path != ''
             GROUP BY p.id
             HAVING total > 0
             ORDER BY total DESC",
        )?;

        let mut rows = stmt.query([])?;
        let mut usage = Vec::new();
        while let Some(row) = rows.next()? {
            usage.push(ProcessUsage {
                process_id: row.get(0)?,
                path: row.get(1)?,
                name: row.get(2)?,
                type_str: row.get(3)?,
                color: row.get(4)?,
                time: to_u64(row.get(5)?, "total")?,
            });
        }

        Ok(usage)
    }

    /// Per-window totals for one process. A window without its own type
    /// reports the process's type and color.
    pub fn window_usage(&self, process_id: i64) -> Result<Vec<WindowUsage>> {
        let mut stmt = self.conn.prepare(
            "SELECT w.id, w.title,
                    COALESCE(w.type_str, p.type_str) AS effective_type,
                    pt.color,
                    SUM(h.end_time - h.start_time) AS total
             FROM heartbeats h
             JOIN windows w ON h.window_id = w.id
             JOIN processes p ON w.process_id = p.id
             LEFT JOIN productivity_type pt ON pt.type = COALESCE(w.type_str, p.type_str)
             WHERE h.idle = 0
               AND w.process_id = ?1
             GROUP BY w.id
             HAVING total > 0
             ORDER BY total DESC",
        )?;

        let mut rows = stmt.query(params![process_id])?;
        let mut usage = Vec::new();
        while let Some(row) = rows.next()? {
            usage.push(WindowUsage {
                window_id: row.get(0)?,
                title: row.get(1)?,
                type_str: row.get(2)?,
                color: row.get(3)?,
                time: to_u64(row.get(4)?, "total")?,
            });
        }

        Ok(usage)
    }
}

impl Database {
    pub async fn get_process_usage(&self) -> Result<Vec<ProcessUsage>> {
        self.execute(|conn| UsageRepository::new(conn).process_usage())
            .await
    }

    pub async fn get_window_usage(&self, process_id: i64) -> Result<Vec<WindowUsage>> {
        self.execute(move |conn| UsageRepository::new(conn).window_usage(process_id))
            .await
    }
}

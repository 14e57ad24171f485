use anyhow::{bail, Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use crate::db::{
    helpers::{to_bool, to_i64},
    models::Heartbeat,
    repositories::{ProcessRepository, WindowRepository},
    Database,
};

/// How a recorded heartbeat landed in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeartbeatWrite {
    Inserted,
    /// Folded into the previous row by extending its end time.
    Extended,
}

struct LastHeartbeat {
    rowid: i64,
    process_id: i64,
    window_id: i64,
    start_time: i64,
    end_time: i64,
    idle: bool,
}

pub struct HeartbeatRepository<'a> {
    conn: &'a Connection,
}

impl<'a> HeartbeatRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Store a sample, extending the latest row instead of inserting when it
    /// continues the same process/window/idle state within `merge_gap_secs`.
    /// Samples older than the latest row's start always get their own row.
    pub fn record(&self, heartbeat: &Heartbeat, merge_gap_secs: u64) -> Result<HeartbeatWrite> {
        if heartbeat.duration_secs() < 0 {
            bail!(
                "heartbeat ends ({}) before it starts ({})",
                heartbeat.ended_at,
                heartbeat.started_at
            );
        }

        let process = ProcessRepository::new(self.conn).save(&heartbeat.path)?;
        let window = WindowRepository::new(self.conn).save(process.id, &heartbeat.window_title)?;

        let start_time = heartbeat.started_at.timestamp();
        let end_time = heartbeat.ended_at.timestamp();
        let gap = to_i64(merge_gap_secs)?;

        if let Some(last) = self.last()? {
            let continues = last.process_id == process.id
                && last.window_id == window.id
                && last.idle == heartbeat.idle
                && start_time >= last.start_time
                && start_time <= last.end_time.saturating_add(gap);
            if continues {
                self.conn
                    .execute(
                        "UPDATE heartbeats SET end_time = MAX(end_time, ?1) WHERE rowid = ?2",
                        params![end_time, last.rowid],
                    )
                    .context("failed to extend heartbeat")?;
                return Ok(HeartbeatWrite::Extended);
            }
        }

        self.conn
            .execute(
                "INSERT INTO heartbeats (process_id, window_id, start_time, end_time, idle)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![process.id, window.id, start_time, end_time, heartbeat.idle],
            )
            .context("failed to insert heartbeat")?;
        Ok(HeartbeatWrite::Inserted)
    }

    fn last(&self) -> Result<Option<LastHeartbeat>> {
        self.conn
            .query_row(
                "SELECT rowid, process_id, window_id, start_time, end_time, idle
                 FROM heartbeats
                 ORDER BY rowid DESC
                 LIMIT 1",
                [],
                |row| {
                    Ok(LastHeartbeat {
                        rowid: row.get(0)?,
                        process_id: row.get(1)?,
                        window_id: row.get(2)?,
                        start_time: row.get(3)?,
                        end_time: row.get(4)?,
                        idle: to_bool(row.get(5)?),
                    })
                },
            )
            .optional()
            .map_err(Into::into)
    }
}

impl Database {
    pub async fn record_heartbeat(
        &self,
        heartbeat: &Heartbeat,
        merge_gap_secs: u64,
    ) -> Result<HeartbeatWrite> {
        let record = heartbeat.clone();
        self.execute(move |conn| {
            // Process, window and heartbeat rows land together or not at all.
            let tx = conn.transaction()?;
            let write = HeartbeatRepository::new(&tx).record(&record, merge_gap_secs)?;
            tx.commit()?;
            Ok(write)
        })
        .await
    }
}

//! Query/command façade over the activity database.
//!
//! Each public method backs one named request (see [`requests::Request`]).
//! Failures are logged and returned as [`CommandError`].

use log::{error, warn};

use crate::{
    db::{
        models::{Heartbeat, ProcessUsage, ProductivityType, WindowUsage},
        Database, HeartbeatWrite, TypeAssignment,
    },
    error::{CommandError, CommandResult},
    settings::TrackerSettings,
};

pub mod naming;
pub mod requests;

pub use naming::{derive_name, PathStyle};
pub use requests::{Reply, Request, Response};

#[derive(Clone)]
pub struct ActivityService {
    db: Database,
    path_style: PathStyle,
    merge_gap_secs: u64,
}

fn report<T>(request: &str, result: CommandResult<T>) -> CommandResult<T> {
    if let Err(err) = &result {
        error!("{request} failed: {err}");
    }
    result
}

fn assignment_to_ack(assignment: TypeAssignment, type_str: String) -> CommandResult<bool> {
    match assignment {
        TypeAssignment::Updated => Ok(true),
        TypeAssignment::NotFound => Ok(false),
        TypeAssignment::UnknownType => Err(CommandError::UnknownType(type_str)),
    }
}

/// Fill in missing display names from the process path. Paths the style's
/// pattern rejects keep `name = None`.
pub fn fill_missing_names(usage: &mut [ProcessUsage], style: PathStyle) {
    for row in usage.iter_mut().filter(|row| row.name.is_none()) {
        match derive_name(&row.path, style) {
            Some(name) => row.name = Some(name),
            None => warn!(
                "Skipping name for process {}: path '{}' does not match {:?} layout",
                row.process_id, row.path, style
            ),
        }
    }
}

impl ActivityService {
    pub fn new(db: Database, settings: &TrackerSettings) -> Self {
        Self {
            db,
            path_style: settings.path_style,
            merge_gap_secs: settings.heartbeat_merge_gap_secs,
        }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub async fn get_processes_data(&self) -> CommandResult<Vec<ProcessUsage>> {
        let result = self.db.get_process_usage().await.map_err(CommandError::from);
        let mut usage = report(Request::GET_PROCESSES_DATA, result)?;
        fill_missing_names(&mut usage, self.path_style);
        Ok(usage)
    }

    pub async fn get_windows_data(&self, process_id: i64) -> CommandResult<Vec<WindowUsage>> {
        let result = self
            .db
            .get_window_usage(process_id)
            .await
            .map_err(CommandError::from);
        report(Request::GET_WINDOWS_DATA, result)
    }

    pub async fn get_type_data(&self) -> CommandResult<Vec<ProductivityType>> {
        let result = self
            .db
            .get_productivity_types()
            .await
            .map_err(CommandError::from);
        report(Request::GET_TYPE_DATA, result)
    }

    pub async fn set_process_type(&self, process_id: i64, type_str: String) -> CommandResult<bool> {
        let result = match self.db.set_process_type(process_id, &type_str).await {
            Ok(assignment) => assignment_to_ack(assignment, type_str),
            Err(err) => Err(err.into()),
        };
        report(Request::SET_PROCESS_TYPE, result)
    }

    pub async fn set_window_type(&self, window_id: i64, type_str: String) -> CommandResult<bool> {
        let result = match self.db.set_window_type(window_id, &type_str).await {
            Ok(assignment) => assignment_to_ack(assignment, type_str),
            Err(err) => Err(err.into()),
        };
        report(Request::SET_WINDOW_TYPE, result)
    }

    /// Store a sample from the capture side, merging it into the previous
    /// row when it continues the same window.
    pub async fn record_heartbeat(&self, heartbeat: &Heartbeat) -> CommandResult<HeartbeatWrite> {
        let result = self
            .db
            .record_heartbeat(heartbeat, self.merge_gap_secs)
            .await
            .map_err(CommandError::from);
        report("record-heartbeat", result)
    }
}

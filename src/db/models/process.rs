//! Process-related data models.
//!
//! - `Process`: one observed executable, keyed by its path.
//! - `ProcessUsage`: a row of the aggregated per-process time list.

use serde::{Deserialize, Serialize};

pub const DEFAULT_TYPE: &str = "unknown";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Process {
    pub id: i64,
    pub path: String,
    pub name: Option<String>,
    pub type_str: String,
    pub type_color: Option<String>,
}

/// Total non-idle time spent in one process.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProcessUsage {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub time: u64,
    pub process_id: i64,
    #[serde(rename = "type")]
    pub type_str: String,
    pub color: Option<String>,
}

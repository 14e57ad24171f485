use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Window {
    pub id: i64,
    pub process_id: i64,
    pub title: String,
    /// `None` inherits the owning process's type.
    pub type_str: Option<String>,
}

/// Total non-idle time spent in one window, with its effective type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WindowUsage {
    pub window_id: i64,
    pub title: String,
    pub time: u64,
    #[serde(rename = "type")]
    pub type_str: String,
    pub color: Option<String>,
}

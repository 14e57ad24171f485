//! Named requests and their JSON envelope.
//!
//! Wire shape: `{"cmd": "<name>", "args": {...}}` in,
//! `{"ok": <payload>}` or `{"error": "<message>"}` out.

use log::{debug, error};
use serde::{Deserialize, Serialize};

use crate::{
    activity::ActivityService,
    db::models::{ProcessUsage, ProductivityType, WindowUsage},
    error::{CommandError, CommandResult},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", content = "args", rename_all = "kebab-case")]
pub enum Request {
    GetProcessesData,
    GetWindowsData {
        #[serde(rename = "processId")]
        process_id: i64,
    },
    GetTypeData,
    SetProcessType {
        #[serde(rename = "processId")]
        process_id: i64,
        #[serde(rename = "type")]
        type_str: String,
    },
    SetWindowType {
        #[serde(rename = "windowId")]
        window_id: i64,
        #[serde(rename = "type")]
        type_str: String,
    },
}

impl Request {
    pub const GET_PROCESSES_DATA: &'static str = "get-processes-data";
    pub const GET_WINDOWS_DATA: &'static str = "get-windows-data";
    pub const GET_TYPE_DATA: &'static str = "get-type-data";
    pub const SET_PROCESS_TYPE: &'static str = "set-process-type";
    pub const SET_WINDOW_TYPE: &'static str = "set-window-type";

    pub fn name(&self) -> &'static str {
        match self {
            Request::GetProcessesData => Self::GET_PROCESSES_DATA,
            Request::GetWindowsData { .. } => Self::GET_WINDOWS_DATA,
            Request::GetTypeData => Self::GET_TYPE_DATA,
            Request::SetProcessType { .. } => Self::SET_PROCESS_TYPE,
            Request::SetWindowType { .. } => Self::SET_WINDOW_TYPE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Response {
    Processes(Vec<ProcessUsage>),
    Windows(Vec<WindowUsage>),
    Types(Vec<ProductivityType>),
    Ack(bool),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Reply {
    Ok(Response),
    Error(String),
}

impl From<CommandResult<Response>> for Reply {
    fn from(result: CommandResult<Response>) -> Self {
        match result {
            Ok(response) => Reply::Ok(response),
            Err(err) => Reply::Error(err.to_string()),
        }
    }
}

impl ActivityService {
    pub async fn handle(&self, request: Request) -> CommandResult<Response> {
        debug!("Handling {}", request.name());
        match request {
            Request::GetProcessesData => self.get_processes_data().await.map(Response::Processes),
            Request::GetWindowsData { process_id } => self
                .get_windows_data(process_id)
                .await
                .map(Response::Windows),
            Request::GetTypeData => self.get_type_data().await.map(Response::Types),
            Request::SetProcessType {
                process_id,
                type_str,
            } => self
                .set_process_type(process_id, type_str)
                .await
                .map(Response::Ack),
            Request::SetWindowType {
                window_id,
                type_str,
            } => self
                .set_window_type(window_id, type_str)
                .await
                .map(Response::Ack),
        }
    }

    /// Decode a JSON request, run it and encode the reply.
    pub async fn handle_json(&self, raw: &str) -> serde_json::Value {
        let reply = match serde_json::from_str::<Request>(raw) {
            Ok(request) => Reply::from(self.handle(request).await),
            Err(err) => {
                let err = CommandError::from(err);
                error!("Rejected request: {err}");
                Reply::Error(err.to_string())
            }
        };

        serde_json::to_value(&reply)
            .unwrap_or_else(|err| serde_json::json!({ "error": err.to_string() }))
    }
}

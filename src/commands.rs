//! Tauri commands exposing the activity requests to the desktop UI.

use tauri::State;

use crate::{
    db::models::{ProcessUsage, ProductivityType, WindowUsage},
    error::CommandError,
    AppState,
};

#[tauri::command]
pub async fn get_processes_data(
    state: State<'_, AppState>,
) -> Result<Vec<ProcessUsage>, CommandError> {
    state.activity.get_processes_data().await
}

#[tauri::command]
pub async fn get_windows_data(
    state: State<'_, AppState>,
    process_id: i64,
) -> Result<Vec<WindowUsage>, CommandError> {
    state.activity.get_windows_data(process_id).await
}

#[tauri::command]
pub async fn get_type_data(
    state: State<'_, AppState>,
) -> Result<Vec<ProductivityType>, CommandError> {
    state.activity.get_type_data().await
}

#[tauri::command]
pub async fn set_process_type(
    state: State<'_, AppState>,
    process_id: i64,
    r#type: String,
) -> Result<bool, CommandError> {
    state.activity.set_process_type(process_id, r#type).await
}

#[tauri::command]
pub async fn set_window_type(
    state: State<'_, AppState>,
    window_id: i64,
    r#type: String,
) -> Result<bool, CommandError> {
    state.activity.set_window_type(window_id, r#type).await
}

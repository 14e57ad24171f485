pub mod activity;
#[cfg(feature = "desktop")]
mod commands;
pub mod db;
pub mod error;
pub mod settings;

pub use activity::{ActivityService, PathStyle, Reply, Request, Response};
pub use db::Database;
pub use error::{CommandError, CommandResult};
pub use settings::{SettingsStore, TrackerSettings};

/// Initialize logging (reads RUST_LOG env var, defaults to info).
pub fn init_logging() {
    let _ = env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .try_init();
}

#[cfg(feature = "desktop")]
pub(crate) struct AppState {
    pub(crate) activity: ActivityService,
}

#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    use tauri::Manager;

    init_logging();

    log::info!("timewire starting up...");

    tauri::Builder::default()
        .setup(|app| {
            let result = (|| -> anyhow::Result<()> {
                let app_data_dir = app
                    .path()
                    .app_data_dir()
                    .map_err(|err| anyhow::anyhow!(err))?;
                std::fs::create_dir_all(&app_data_dir)?;

                let settings_path = app_data_dir.join("settings.json");
                let first_run = !settings_path.exists();
                let settings_store = SettingsStore::new(settings_path)?;
                let settings = settings_store.current();
                if first_run {
                    // Write defaults out so the path style can be edited by hand.
                    settings_store.update(settings.clone())?;
                }

                let db_path = app_data_dir.join("timewire.sqlite3");
                let database = Database::new(db_path)?;

                log::info!(
                    "Using {:?} path style, {}s heartbeat merge gap",
                    settings.path_style,
                    settings.heartbeat_merge_gap_secs
                );

                app.manage(AppState {
                    activity: ActivityService::new(database, &settings),
                });

                Ok(())
            })();

            result.map_err(|err| err.into())
        })
        .invoke_handler(tauri::generate_handler![
            commands::get_processes_data,
            commands::get_windows_data,
            commands::get_type_data,
            commands::set_process_type,
            commands::set_window_type,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}

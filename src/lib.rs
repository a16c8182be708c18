mod commands;
pub mod error;
pub mod models;
pub mod services;

use std::sync::Arc;

use commands::*;
use services::backend::HttpBackend;
use services::session_service::FileCredentialStore;
use services::workspace::Workspace;
use tracing_subscriber::EnvFilter;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let base_url = services::config_service::get_base_url().unwrap_or_else(|err| {
        tracing::warn!(error = %err, "falling back to the default base URL");
        services::config_service::DEFAULT_BASE_URL.to_string()
    });
    tracing::info!(base_url, "starting FileWhisper");

    let backend = Arc::new(HttpBackend::new(&base_url));
    let store = Arc::new(FileCredentialStore::new().expect("failed to prepare app data directory"));
    let workspace = Arc::new(Workspace::new(backend, store));

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .plugin(tauri_plugin_dialog::init())
        .manage(workspace)
        .setup(|app| {
            use tauri::Manager;

            // Restore the persisted session once, before the first view asks.
            let workspace = app.state::<Arc<Workspace>>();
            match workspace.restore() {
                Ok(info) if info.is_authenticated => tracing::info!("restored session"),
                Ok(_) => tracing::debug!("no persisted session"),
                Err(err) => tracing::warn!(error = %err, "failed to restore session"),
            }
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // Auth commands
            login,
            register,
            logout,
            check_auth_status,
            // File commands
            refresh_files,
            list_files,
            delete_file,
            open_document,
            // Upload commands
            open_upload_modal,
            close_upload_modal,
            select_upload_candidate,
            submit_upload,
            // Summary commands
            summarize_file,
            get_summary_state,
            // Chat commands
            ask_question,
            get_transcript,
            // Export commands
            export_summary,
            // Config commands
            get_base_url,
            set_base_url,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}

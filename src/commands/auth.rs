use std::sync::Arc;
use tauri::State;

use crate::services::workspace::{SessionInfo, Workspace};

#[tauri::command]
pub async fn login(
    workspace: State<'_, Arc<Workspace>>,
    email: String,
    password: String,
) -> Result<SessionInfo, String> {
    workspace
        .login(&email, &password)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn register(
    workspace: State<'_, Arc<Workspace>>,
    full_name: String,
    email: String,
    password: String,
) -> Result<(), String> {
    workspace
        .register(&full_name, &email, &password)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn logout(workspace: State<'_, Arc<Workspace>>) -> Result<(), String> {
    workspace.logout().await.map_err(|e| e.to_string())
}

#[tauri::command]
pub fn check_auth_status(workspace: State<'_, Arc<Workspace>>) -> Result<SessionInfo, String> {
    workspace.session().map_err(|e| e.to_string())
}

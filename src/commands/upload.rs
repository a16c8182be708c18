use std::sync::Arc;
use tauri::State;

use crate::models::{FileRecord, UploadCandidate, UploadModal};
use crate::services::workspace::Workspace;

#[tauri::command]
pub fn open_upload_modal(workspace: State<'_, Arc<Workspace>>) -> Result<UploadModal, String> {
    workspace.open_upload_modal().map_err(|e| e.to_string())
}

/// Close button and backdrop click both land here.
#[tauri::command]
pub fn close_upload_modal(workspace: State<'_, Arc<Workspace>>) -> Result<UploadModal, String> {
    workspace.close_upload_modal().map_err(|e| e.to_string())
}

#[tauri::command]
pub fn select_upload_candidate(
    workspace: State<'_, Arc<Workspace>>,
    path: String,
) -> Result<UploadCandidate, String> {
    workspace
        .select_upload_candidate(&path)
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn submit_upload(
    workspace: State<'_, Arc<Workspace>>,
) -> Result<Vec<FileRecord>, String> {
    workspace.submit_upload().await.map_err(|e| e.to_string())
}

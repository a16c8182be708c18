use std::sync::Arc;
use tauri::State;

use crate::models::{FileRecord, TranscriptItem};
use crate::services::workspace::Workspace;

#[tauri::command]
pub async fn refresh_files(
    workspace: State<'_, Arc<Workspace>>,
) -> Result<Vec<FileRecord>, String> {
    workspace.refresh_files().await.map_err(|e| e.to_string())
}

#[tauri::command]
pub fn list_files(workspace: State<'_, Arc<Workspace>>) -> Result<Vec<FileRecord>, String> {
    workspace.files().map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn delete_file(
    workspace: State<'_, Arc<Workspace>>,
    file_id: String,
) -> Result<Vec<FileRecord>, String> {
    workspace
        .delete_file(&file_id)
        .await
        .map_err(|e| e.to_string())
}

/// Selecting a file hands its id to both the summary and chat controllers;
/// this resets the summary slot and loads the document's transcript.
#[tauri::command]
pub async fn open_document(
    workspace: State<'_, Arc<Workspace>>,
    file_id: String,
) -> Result<Vec<TranscriptItem>, String> {
    workspace
        .open_document(&file_id)
        .await
        .map_err(|e| e.to_string())
}

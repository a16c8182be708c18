use std::sync::Arc;
use tauri::State;

use crate::models::TranscriptItem;
use crate::services::workspace::Workspace;

#[tauri::command]
pub async fn ask_question(
    workspace: State<'_, Arc<Workspace>>,
    question: String,
) -> Result<Vec<TranscriptItem>, String> {
    workspace.ask(&question).await.map_err(|e| e.to_string())
}

#[tauri::command]
pub fn get_transcript(
    workspace: State<'_, Arc<Workspace>>,
) -> Result<Vec<TranscriptItem>, String> {
    workspace.transcript().map_err(|e| e.to_string())
}

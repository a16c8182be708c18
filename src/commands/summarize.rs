use std::sync::Arc;
use tauri::State;

use crate::models::{SummaryLength, SummaryState, SummaryStyle};
use crate::services::workspace::Workspace;

#[tauri::command]
pub async fn summarize_file(
    workspace: State<'_, Arc<Workspace>>,
    file_id: String,
    style: SummaryStyle,
    length: SummaryLength,
) -> Result<SummaryState, String> {
    workspace
        .summarize(&file_id, style, length)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub fn get_summary_state(workspace: State<'_, Arc<Workspace>>) -> Result<SummaryState, String> {
    workspace.summary_state().map_err(|e| e.to_string())
}

use std::sync::Arc;
use tauri::State;

use crate::models::SummaryState;
use crate::services::export_service;
use crate::services::workspace::Workspace;

/// Export the currently held summary to a PDF at the user-selected path.
#[tauri::command]
pub async fn export_summary(
    workspace: State<'_, Arc<Workspace>>,
    output_path: String,
) -> Result<(), String> {
    let summary = match workspace.summary_state().map_err(|e| e.to_string())? {
        SummaryState::Ready { summary } if !summary.is_empty() => summary,
        _ => return Err("no summary to export".to_string()),
    };

    // The browser print step blocks; keep it off the async runtime.
    tauri::async_runtime::spawn_blocking(move || {
        export_service::export_summary_to_pdf(&summary, &output_path)
    })
    .await
    .map_err(|e| e.to_string())?
    .map_err(|e| e.to_string())
}

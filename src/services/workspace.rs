use serde::Serialize;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

use crate::error::{Result, WhisperError};
use crate::models::{
    CandidateValidity, ChatMessage, FileRecord, Summary, SummaryLength, SummaryState,
    SummaryStyle, TranscriptEntry, TranscriptItem, UploadCandidate, UploadModal,
};
use crate::services::backend::Backend;
use crate::services::session_service::{CredentialStore, StoredSession, MAX_FULL_NAME_LEN};

/// Literal shown when the backend resolves an answer without content.
const NO_ANSWER_FALLBACK: &str = "No answer.";

/// What the frontend needs to know about the signed-in user.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub is_authenticated: bool,
    pub full_name: Option<String>,
}

#[derive(Default)]
struct WorkspaceState {
    session: Option<StoredSession>,
    files: Vec<FileRecord>,
    upload: UploadModal,
    active_file: Option<String>,
    summary: SummaryState,
    summary_file: Option<String>,
    summary_epoch: u64,
    transcript: Vec<TranscriptEntry>,
    transcript_generation: u64,
}

/// Single owner of all client-held state: session, file inventory, upload
/// modal, summary slot and chat transcript.
///
/// Every async operation follows the same shape: lock, apply the optimistic
/// phase and record an identity (summary epoch, chat ticket, transcript
/// generation), unlock, await the network, relock and reconcile only if the
/// identity still matches. Stale resolutions are dropped, never applied, and
/// the lock is never held across an await.
pub struct Workspace {
    backend: Arc<dyn Backend>,
    store: Arc<dyn CredentialStore>,
    state: Mutex<WorkspaceState>,
}

fn session_info(state: &WorkspaceState) -> SessionInfo {
    SessionInfo {
        is_authenticated: state.session.is_some(),
        full_name: state.session.as_ref().map(|s| s.full_name.clone()),
    }
}

fn token_of(state: &WorkspaceState) -> Result<String> {
    state
        .session
        .as_ref()
        .map(|s| s.token.clone())
        .ok_or_else(|| WhisperError::Auth("Not authenticated".to_string()))
}

impl Workspace {
    pub fn new(backend: Arc<dyn Backend>, store: Arc<dyn CredentialStore>) -> Self {
        Self {
            backend,
            store,
            state: Mutex::new(WorkspaceState::default()),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, WorkspaceState>> {
        self.state
            .lock()
            .map_err(|_| WhisperError::Internal("workspace state poisoned".to_string()))
    }

    // ------------------------------------------------------------------
    // Session store
    // ------------------------------------------------------------------

    /// Load the persisted session, if any. Called once at startup.
    pub fn restore(&self) -> Result<SessionInfo> {
        let session = self.store.load()?;
        let mut state = self.lock()?;
        state.session = session;
        Ok(session_info(&state))
    }

    pub fn session(&self) -> Result<SessionInfo> {
        let state = self.lock()?;
        Ok(session_info(&state))
    }

    /// A response carrying a token authenticates the session; anything else
    /// surfaces the server's error message verbatim.
    pub async fn login(&self, email: &str, password: &str) -> Result<SessionInfo> {
        let response = self.backend.login(email, password).await?;

        let token = match response.token {
            Some(token) => token,
            None => {
                return Err(WhisperError::Auth(
                    response
                        .error
                        .unwrap_or_else(|| "Invalid credentials".to_string()),
                ))
            }
        };

        let session = StoredSession {
            token,
            full_name: response.full_name.unwrap_or_default(),
        };
        self.store.save(&session)?;

        let info = {
            let mut state = self.lock()?;
            state.session = Some(session);
            session_info(&state)
        };

        // The landing view wants the inventory as soon as the session opens.
        if let Err(err) = self.refresh_files().await {
            tracing::warn!(error = %err, "inventory refresh after login failed");
        }

        Ok(info)
    }

    /// Pre-flight name validation happens locally; only a valid name is sent
    /// to the backend. Success does not authenticate - the flow returns to
    /// the login form.
    pub async fn register(&self, full_name: &str, email: &str, password: &str) -> Result<()> {
        let full_name = full_name.trim();
        if full_name.chars().count() > MAX_FULL_NAME_LEN {
            return Err(WhisperError::Validation(format!(
                "Full name must be less than {} characters.",
                MAX_FULL_NAME_LEN
            )));
        }

        self.backend.register(full_name, email, password).await
    }

    /// Best-effort server notification, then an unconditional local wipe.
    /// Logout never fails from the user's perspective.
    pub async fn logout(&self) -> Result<()> {
        let token = {
            let state = self.lock()?;
            state.session.as_ref().map(|s| s.token.clone())
        };

        if let Some(token) = token {
            if let Err(err) = self.backend.logout(&token).await {
                tracing::debug!(error = %err, "logout request failed; clearing local session anyway");
            }
        }

        if let Err(err) = self.store.clear() {
            tracing::warn!(error = %err, "failed to clear persisted session");
        }

        let mut state = self.lock()?;
        // The identity counters survive the wipe, so a request left in
        // flight across a logout can never match a recycled epoch after
        // re-login.
        *state = WorkspaceState {
            summary_epoch: state.summary_epoch + 1,
            transcript_generation: state.transcript_generation + 1,
            ..WorkspaceState::default()
        };
        Ok(())
    }

    // ------------------------------------------------------------------
    // File inventory
    // ------------------------------------------------------------------

    /// Fetch the inventory and install it verbatim; the latest completed
    /// call wins. Without a stored credential this is a no-op, not an error.
    pub async fn refresh_files(&self) -> Result<Vec<FileRecord>> {
        let token = {
            let state = self.lock()?;
            match state.session.as_ref() {
                Some(session) => session.token.clone(),
                None => return Ok(state.files.clone()),
            }
        };

        let files = self.backend.list_files(&token).await?;

        let mut state = self.lock()?;
        state.files = files;
        Ok(state.files.clone())
    }

    pub fn files(&self) -> Result<Vec<FileRecord>> {
        Ok(self.lock()?.files.clone())
    }

    /// The record is only removed locally once the backend confirms; on any
    /// failure it stays in the list and the error is surfaced.
    pub async fn delete_file(&self, file_id: &str) -> Result<Vec<FileRecord>> {
        let token = {
            let state = self.lock()?;
            token_of(&state)?
        };

        self.backend.delete_file(&token, file_id).await?;

        let mut state = self.lock()?;
        state.files.retain(|f| f.id != file_id);
        if state.active_file.as_deref() == Some(file_id) {
            close_document(&mut state);
        }
        Ok(state.files.clone())
    }

    // ------------------------------------------------------------------
    // Upload pipeline
    // ------------------------------------------------------------------

    pub fn open_upload_modal(&self) -> Result<UploadModal> {
        let mut state = self.lock()?;
        if !matches!(state.upload, UploadModal::Submitting { .. }) {
            state.upload = UploadModal::Open { candidate: None };
        }
        Ok(state.upload.clone())
    }

    /// Close (or backdrop-click): discards the candidate. An in-flight
    /// submission keeps running and reconciles against the closed modal.
    pub fn close_upload_modal(&self) -> Result<UploadModal> {
        let mut state = self.lock()?;
        state.upload = UploadModal::Closed;
        Ok(state.upload.clone())
    }

    pub fn upload_modal(&self) -> Result<UploadModal> {
        Ok(self.lock()?.upload.clone())
    }

    pub fn select_upload_candidate(&self, path: &str) -> Result<UploadCandidate> {
        let candidate = UploadCandidate::inspect(Path::new(path));

        let mut state = self.lock()?;
        match &mut state.upload {
            UploadModal::Open { candidate: slot } => {
                *slot = Some(candidate.clone());
                Ok(candidate)
            }
            _ => Err(WhisperError::Validation(
                "upload dialog is not open".to_string(),
            )),
        }
    }

    /// Submit the selected candidate. On completion the inventory is
    /// reconciled from the canonical list either way; the server's echoed
    /// record is never trusted for list consistency.
    pub async fn submit_upload(&self) -> Result<Vec<FileRecord>> {
        let (token, candidate) = {
            let mut state = self.lock()?;
            let token = token_of(&state)?;
            let candidate = match &state.upload {
                UploadModal::Open {
                    candidate: Some(candidate),
                } if candidate.is_valid() => candidate.clone(),
                UploadModal::Open {
                    candidate: Some(_),
                } => {
                    return Err(WhisperError::Validation(
                        "Please select a .txt or .pdf file.".to_string(),
                    ))
                }
                UploadModal::Submitting { .. } => {
                    return Err(WhisperError::Validation(
                        "an upload is already in progress".to_string(),
                    ))
                }
                _ => {
                    return Err(WhisperError::Validation(
                        "no file selected".to_string(),
                    ))
                }
            };
            state.upload = UploadModal::Submitting {
                candidate: candidate.clone(),
            };
            (token, candidate)
        };

        let outcome = self.send_candidate(&token, &candidate).await;

        {
            let mut state = self.lock()?;
            // If the user closed the modal mid-flight it stays closed.
            if matches!(state.upload, UploadModal::Submitting { .. }) {
                state.upload = match &outcome {
                    Ok(_) => UploadModal::Closed,
                    Err(_) => UploadModal::Open {
                        candidate: Some(UploadCandidate {
                            validity: CandidateValidity::Error,
                            ..candidate.clone()
                        }),
                    },
                };
            }
        }

        let refreshed = self.refresh_files().await;
        match outcome {
            Ok(file_id) => {
                tracing::debug!(?file_id, filename = %candidate.filename, "upload completed");
                refreshed
            }
            Err(err) => Err(err),
        }
    }

    async fn send_candidate(
        &self,
        token: &str,
        candidate: &UploadCandidate,
    ) -> Result<Option<String>> {
        let mime_type = candidate.mime_type.clone().ok_or_else(|| {
            WhisperError::Validation("Please select a .txt or .pdf file.".to_string())
        })?;
        let bytes = tokio::fs::read(&candidate.path).await.map_err(|e| {
            WhisperError::Upload(format!("failed to read {}: {}", candidate.filename, e))
        })?;

        self.backend
            .upload_file(token, &candidate.filename, &mime_type, bytes)
            .await
    }

    // ------------------------------------------------------------------
    // Document switching
    // ------------------------------------------------------------------

    /// Open a document: reset the summary slot, drop the old transcript and
    /// load the new one. Bumping the transcript generation makes any
    /// in-flight answers for the previous document resolve into nothing.
    pub async fn open_document(&self, file_id: &str) -> Result<Vec<TranscriptItem>> {
        let (token, generation) = {
            let mut state = self.lock()?;
            let token = token_of(&state)?;
            state.active_file = Some(file_id.to_string());
            state.summary = SummaryState::Unset;
            state.summary_file = None;
            state.summary_epoch += 1;
            state.transcript.clear();
            state.transcript_generation += 1;
            (token, state.transcript_generation)
        };

        let history = self.backend.chat_history(&token, file_id).await?;

        let mut state = self.lock()?;
        if state.transcript_generation == generation {
            state.transcript = history.into_iter().map(TranscriptEntry::Message).collect();
        }
        Ok(transcript_view(&state))
    }

    pub fn active_file(&self) -> Result<Option<String>> {
        Ok(self.lock()?.active_file.clone())
    }

    // ------------------------------------------------------------------
    // Summarization controller
    // ------------------------------------------------------------------

    /// One summary slot, epoch-guarded: a resolution for a superseded
    /// request (newer call, or a different file selected at resolution
    /// time) is discarded instead of overwriting the newer result.
    pub async fn summarize(
        &self,
        file_id: &str,
        style: SummaryStyle,
        length: SummaryLength,
    ) -> Result<SummaryState> {
        let (token, epoch) = {
            let mut state = self.lock()?;
            let token = token_of(&state)?;
            state.summary_epoch += 1;
            state.summary = SummaryState::Loading;
            state.summary_file = Some(file_id.to_string());
            (token, state.summary_epoch)
        };

        let outcome = self.backend.summarize(&token, file_id, style, length).await;

        let mut state = self.lock()?;
        if state.summary_epoch != epoch || state.summary_file.as_deref() != Some(file_id) {
            tracing::debug!(file_id, "discarding stale summary resolution");
            return Ok(state.summary.clone());
        }

        state.summary = match outcome {
            Ok(field) => SummaryState::Ready {
                summary: Summary::from_response(style, field.as_ref()),
            },
            Err(err) => SummaryState::Failed {
                message: err.to_string(),
            },
        };
        Ok(state.summary.clone())
    }

    pub fn summary_state(&self) -> Result<SummaryState> {
        Ok(self.lock()?.summary.clone())
    }

    // ------------------------------------------------------------------
    // Chat conversation controller
    // ------------------------------------------------------------------

    /// Optimistic ask: the user message and a pending answer slot are
    /// appended synchronously, then the slot is filled in place when the
    /// network resolves. The transcript always ends up with a response for
    /// every question, at the position implied by submission order.
    pub async fn ask(&self, question: &str) -> Result<Vec<TranscriptItem>> {
        let question = question.trim().to_string();
        if question.is_empty() {
            return Err(WhisperError::Validation("question is empty".to_string()));
        }

        let (token, file_id, generation, ticket) = {
            let mut state = self.lock()?;
            let token = token_of(&state)?;
            let file_id = state
                .active_file
                .clone()
                .ok_or_else(|| WhisperError::Validation("no document is open".to_string()))?;
            let ticket = Uuid::new_v4();
            state
                .transcript
                .push(TranscriptEntry::Message(ChatMessage::user(question.clone())));
            state.transcript.push(TranscriptEntry::Pending { ticket });
            (token, file_id, state.transcript_generation, ticket)
        };

        let answer = match self.backend.ask(&token, &file_id, &question).await {
            Ok(Some(text)) => ChatMessage::assistant(text),
            Ok(None) => ChatMessage::assistant(NO_ANSWER_FALLBACK),
            Err(err) => ChatMessage::assistant(format!("Error: {}", err)),
        };

        let mut state = self.lock()?;
        if state.transcript_generation == generation {
            let slot = state.transcript.iter_mut().find(|entry| match entry {
                TranscriptEntry::Pending { ticket: t } => *t == ticket,
                _ => false,
            });
            if let Some(slot) = slot {
                *slot = TranscriptEntry::Message(answer);
            }
        }
        Ok(transcript_view(&state))
    }

    pub fn transcript(&self) -> Result<Vec<TranscriptItem>> {
        let state = self.lock()?;
        Ok(transcript_view(&state))
    }
}

fn close_document(state: &mut WorkspaceState) {
    state.active_file = None;
    state.summary = SummaryState::Unset;
    state.summary_file = None;
    state.summary_epoch += 1;
    state.transcript.clear();
    state.transcript_generation += 1;
}

fn transcript_view(state: &WorkspaceState) -> Vec<TranscriptItem> {
    state.transcript.iter().map(TranscriptItem::from).collect()
}

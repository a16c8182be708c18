use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

use crate::error::{Result, WhisperError};
use crate::models::{ChatMessage, FileRecord, SummaryLength, SummaryStyle};

/// Parsed body of `POST /auth/login`. The presence of `token` decides
/// success; that classification belongs to the session logic, not here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct FilesResponse {
    #[serde(default)]
    files: Vec<FileRecord>,
}

#[derive(Debug, Default, Deserialize)]
struct UploadResponse {
    #[serde(default)]
    file_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct SummarizeResponse {
    #[serde(default)]
    summary: Option<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
struct HistoryResponse {
    #[serde(default)]
    chat_history: Vec<ChatMessage>,
}

#[derive(Debug, Default, Deserialize)]
struct AskResponse {
    #[serde(default)]
    answer: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

/// Everything the workspace asks of the remote service, as a port so tests
/// can substitute an in-memory implementation.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse>;
    async fn register(&self, full_name: &str, email: &str, password: &str) -> Result<()>;
    async fn logout(&self, token: &str) -> Result<()>;
    async fn list_files(&self, token: &str) -> Result<Vec<FileRecord>>;
    async fn delete_file(&self, token: &str, file_id: &str) -> Result<()>;
    async fn upload_file(
        &self,
        token: &str,
        filename: &str,
        mime_type: &str,
        bytes: Vec<u8>,
    ) -> Result<Option<String>>;
    /// Returns the raw `summary` field; the caller interprets its shape
    /// according to the style it asked for.
    async fn summarize(
        &self,
        token: &str,
        file_id: &str,
        style: SummaryStyle,
        length: SummaryLength,
    ) -> Result<Option<serde_json::Value>>;
    async fn chat_history(&self, token: &str, file_id: &str) -> Result<Vec<ChatMessage>>;
    async fn ask(&self, token: &str, file_id: &str, question: &str) -> Result<Option<String>>;
}

/// HTTP client for the FileWhisper backend.
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: &str) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn classify_status(status: StatusCode, message: String) -> WhisperError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => WhisperError::Auth(message),
        StatusCode::NOT_FOUND => WhisperError::NotFound,
        _ => WhisperError::Network(message),
    }
}

/// Pull a human-readable message out of an error response body. The backend
/// reports auth failures as `{error}` and everything else as `{detail}`.
async fn error_message(response: reqwest::Response) -> String {
    let status = response.status();
    let body: ErrorBody = response.json().await.unwrap_or_default();
    body.error
        .or_else(|| match body.detail {
            Some(serde_json::Value::String(text)) => Some(text),
            Some(other) => Some(other.to_string()),
            None => None,
        })
        .unwrap_or_else(|| format!("request failed with status {}", status))
}

#[async_trait]
impl Backend for HttpBackend {
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        let response = self
            .client
            .post(self.url("/auth/login"))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| WhisperError::Network(e.to_string()))?;

        // The body is parsed regardless of status; a token field is the
        // only success signal.
        response
            .json::<LoginResponse>()
            .await
            .map_err(|e| WhisperError::Network(format!("failed to parse login response: {}", e)))
    }

    async fn register(&self, full_name: &str, email: &str, password: &str) -> Result<()> {
        let response = self
            .client
            .post(self.url("/auth/register"))
            .json(&serde_json::json!({
                "full_name": full_name,
                "email": email,
                "password": password
            }))
            .send()
            .await
            .map_err(|e| WhisperError::Network(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(WhisperError::Auth(error_message(response).await))
        }
    }

    async fn logout(&self, token: &str) -> Result<()> {
        let response = self
            .client
            .post(self.url("/auth/logout"))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| WhisperError::Network(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(WhisperError::Network(error_message(response).await))
        }
    }

    async fn list_files(&self, token: &str) -> Result<Vec<FileRecord>> {
        let response = self
            .client
            .get(self.url("/files/"))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| WhisperError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(classify_status(status, error_message(response).await));
        }

        let body: FilesResponse = response
            .json()
            .await
            .map_err(|e| WhisperError::Network(format!("failed to parse file list: {}", e)))?;
        Ok(body.files)
    }

    async fn delete_file(&self, token: &str, file_id: &str) -> Result<()> {
        let response = self
            .client
            .delete(self.url(&format!("/files/{}", file_id)))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| WhisperError::Network(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status();
            Err(classify_status(status, error_message(response).await))
        }
    }

    async fn upload_file(
        &self,
        token: &str,
        filename: &str,
        mime_type: &str,
        bytes: Vec<u8>,
    ) -> Result<Option<String>> {
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str(mime_type)
            .map_err(|e| WhisperError::Upload(e.to_string()))?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(self.url("/upload/"))
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await
            .map_err(|e| WhisperError::Upload(e.to_string()))?;

        if !response.status().is_success() {
            return Err(WhisperError::Upload(error_message(response).await));
        }

        let body: UploadResponse = response.json().await.unwrap_or_default();
        Ok(body.file_id)
    }

    async fn summarize(
        &self,
        token: &str,
        file_id: &str,
        style: SummaryStyle,
        length: SummaryLength,
    ) -> Result<Option<serde_json::Value>> {
        let response = self
            .client
            .post(self.url("/summarize/file/"))
            .bearer_auth(token)
            .json(&serde_json::json!({
                "file_id": file_id,
                "style": style,
                "length": length
            }))
            .send()
            .await
            .map_err(|e| WhisperError::Summarize(e.to_string()))?;

        if !response.status().is_success() {
            return Err(WhisperError::Summarize(error_message(response).await));
        }

        let body: SummarizeResponse = response
            .json()
            .await
            .map_err(|e| WhisperError::Summarize(format!("failed to parse summary: {}", e)))?;
        Ok(body.summary)
    }

    async fn chat_history(&self, token: &str, file_id: &str) -> Result<Vec<ChatMessage>> {
        let response = self
            .client
            .get(self.url("/chat/history"))
            .query(&[("context_file_id", file_id)])
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| WhisperError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(classify_status(status, error_message(response).await));
        }

        let body: HistoryResponse = response
            .json()
            .await
            .map_err(|e| WhisperError::Network(format!("failed to parse chat history: {}", e)))?;
        Ok(body.chat_history)
    }

    async fn ask(&self, token: &str, file_id: &str, question: &str) -> Result<Option<String>> {
        let response = self
            .client
            .post(self.url("/chat/"))
            .bearer_auth(token)
            .json(&serde_json::json!({
                "context_file_id": file_id,
                "question": question
            }))
            .send()
            .await
            .map_err(|e| WhisperError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(classify_status(status, error_message(response).await));
        }

        let body: AskResponse = response
            .json()
            .await
            .map_err(|e| WhisperError::Network(format!("failed to parse answer: {}", e)))?;
        Ok(body.answer)
    }
}

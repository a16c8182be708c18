use serde::{Deserialize, Serialize};

/// One entry in the user's file inventory, field-for-field as the backend
/// returns it from `GET /files/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileRecord {
    pub id: String,
    pub filename: String,
    /// ISO timestamp string from the server, passed through verbatim.
    /// The client never does time arithmetic on it.
    #[serde(default)]
    pub uploaded_at: Option<String>,
}

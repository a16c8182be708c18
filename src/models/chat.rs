use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sender {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "assistant", alias = "ai")]
    Assistant,
}

/// One message of a per-document conversation, as stored in the transcript
/// and as `GET /chat/history` returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
    /// When set, `text` is raw markup the presentation layer renders as-is.
    /// Preserved untouched through load and append.
    #[serde(default)]
    pub is_html: bool,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
            is_html: false,
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Assistant,
            text: text.into(),
            is_html: false,
        }
    }
}

/// Internal transcript entry. A pending slot is inserted at submit time and
/// replaced in place once the answer for its ticket resolves, so answers
/// land at the position implied by submission order, not arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptEntry {
    Message(ChatMessage),
    Pending { ticket: Uuid },
}

/// Snapshot of the transcript handed to the presentation layer. Pending
/// slots render as typing indicators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "lowercase")]
pub enum TranscriptItem {
    Message(ChatMessage),
    Typing,
}

impl From<&TranscriptEntry> for TranscriptItem {
    fn from(entry: &TranscriptEntry) -> Self {
        match entry {
            TranscriptEntry::Message(msg) => TranscriptItem::Message(msg.clone()),
            TranscriptEntry::Pending { .. } => TranscriptItem::Typing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_accepts_assistant_and_ai_sender_spellings() {
        let msg: ChatMessage =
            serde_json::from_str(r#"{"sender": "assistant", "text": "hi"}"#).unwrap();
        assert_eq!(msg.sender, Sender::Assistant);
        assert!(!msg.is_html);

        let msg: ChatMessage =
            serde_json::from_str(r#"{"sender": "ai", "text": "<b>hi</b>", "is_html": true}"#)
                .unwrap();
        assert_eq!(msg.sender, Sender::Assistant);
        assert!(msg.is_html);
        assert_eq!(msg.text, "<b>hi</b>");
    }
}

use serde::{Deserialize, Serialize};

/// Summary rendering style requested from the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryStyle {
    Bullet,
    Paragraph,
}

/// Summary length requested from the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryLength {
    Short,
    Medium,
    Long,
}

/// A completed summary. The shape is fixed by the request's style and is
/// never coerced: a bullet request always yields a list (possibly empty),
/// a paragraph request always yields a single text block (possibly empty).
///
/// Serializes untagged so the frontend sees the same `string | string[]`
/// union the backend speaks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Summary {
    Bullets(Vec<String>),
    Paragraph(String),
}

impl Summary {
    /// Interpret the raw `summary` response field according to the style the
    /// request was made with. An absent or malformed field becomes the empty
    /// value of the requested shape.
    pub fn from_response(style: SummaryStyle, field: Option<&serde_json::Value>) -> Self {
        match style {
            SummaryStyle::Bullet => {
                let items = field
                    .and_then(|v| v.as_array())
                    .map(|arr| {
                        arr.iter()
                            .filter_map(|item| item.as_str().map(str::to_string))
                            .collect()
                    })
                    .unwrap_or_default();
                Summary::Bullets(items)
            }
            SummaryStyle::Paragraph => {
                let text = field
                    .and_then(|v| v.as_str())
                    .unwrap_or_default()
                    .to_string();
                Summary::Paragraph(text)
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Summary::Bullets(items) => items.is_empty(),
            Summary::Paragraph(text) => text.trim().is_empty(),
        }
    }
}

/// Loading state of the summary slot for the active document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SummaryState {
    Unset,
    Loading,
    Ready { summary: Summary },
    Failed { message: String },
}

impl Default for SummaryState {
    fn default() -> Self {
        SummaryState::Unset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bullet_style_reads_an_array() {
        let value = json!(["a", "b"]);
        let summary = Summary::from_response(SummaryStyle::Bullet, Some(&value));
        assert_eq!(
            summary,
            Summary::Bullets(vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn absent_bullet_summary_is_an_empty_list_not_a_string() {
        let summary = Summary::from_response(SummaryStyle::Bullet, None);
        assert_eq!(summary, Summary::Bullets(Vec::new()));
    }

    #[test]
    fn absent_paragraph_summary_is_an_empty_string() {
        let summary = Summary::from_response(SummaryStyle::Paragraph, None);
        assert_eq!(summary, Summary::Paragraph(String::new()));
    }

    #[test]
    fn paragraph_style_never_adopts_a_list_shape() {
        let value = json!(["a", "b"]);
        let summary = Summary::from_response(SummaryStyle::Paragraph, Some(&value));
        assert_eq!(summary, Summary::Paragraph(String::new()));
    }

    #[test]
    fn style_and_length_serialize_as_the_wire_words() {
        assert_eq!(
            serde_json::to_string(&SummaryStyle::Bullet).unwrap(),
            "\"bullet\""
        );
        assert_eq!(
            serde_json::to_string(&SummaryLength::Medium).unwrap(),
            "\"medium\""
        );
    }
}

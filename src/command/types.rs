use serde::{Deserialize, Serialize};

/// Fields of a slash command this function cares about. Everything else Slack
/// posts (team, channel, user, response_url...) is ignored.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct IncomingCommand {
    pub token: String,
    pub text: String,
}

impl IncomingCommand {
    /// Parses a form-encoded body, keeping the first value of repeated fields.
    /// An undecodable body yields an empty command, which never passes the
    /// token check.
    pub fn from_form(body: &str) -> Self {
        let params: Vec<(String, String)> = serde_urlencoded::from_str(body).unwrap_or_default();
        let first = |name: &str| {
            params
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.clone())
                .unwrap_or_default()
        };

        Self {
            token: first("token"),
            text: first("text"),
        }
    }
}

/// One translated segment as reported by the translation service.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Translation {
    pub translated_text: String,
    #[serde(default)]
    pub detected_source_language: String,
}

pub type TranslationResult = Vec<Translation>;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Good,
    Danger,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Attachment {
    pub text: String,
    pub color: Color,
}

/// Message returned to Slack as the command response.
///
/// Without a `response_type` Slack shows the message only to the user who ran
/// the command; `in_channel` makes it visible to everyone.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct SlackResponse {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_type: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
}

impl SlackResponse {
    pub fn translated(original: &str, translations: &[Translation]) -> Self {
        Self {
            text: format!("Translating \"{}\"", original),
            response_type: Some("in_channel".to_string()),
            attachments: translations
                .iter()
                .map(|t| Attachment {
                    text: format!("{} ({})", t.translated_text, t.detected_source_language),
                    color: Color::Good,
                })
                .collect(),
        }
    }

    pub fn error(error: &impl std::fmt::Display) -> Self {
        Self {
            text: "Error".to_string(),
            response_type: None,
            attachments: vec![Attachment {
                text: error.to_string(),
                color: Color::Danger,
            }],
        }
    }
}

use serde::{Deserialize, Serialize};

/// Kinds of coaching nudges shown on the AI coach tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoachMessageKind {
    Motivation,
    Adjustment,
    Celebration,
}

/// A coaching message. These are a static catalog for now and are not
/// persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoachMessage {
    pub id: i32,
    #[serde(rename = "type")]
    pub kind: CoachMessageKind,
    pub message: String,
    pub timestamp: String,
    #[serde(default)]
    pub has_action: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_text: Option<String>,
}

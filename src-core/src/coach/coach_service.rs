use crate::coach::coach_model::{CoachMessage, CoachMessageKind};

pub struct CoachService;

impl CoachService {
    pub fn new() -> Self {
        CoachService
    }

    /// The current coaching feed, newest first.
    pub fn messages(&self) -> Vec<CoachMessage> {
        default_messages()
    }
}

impl Default for CoachService {
    fn default() -> Self {
        Self::new()
    }
}

fn default_messages() -> Vec<CoachMessage> {
    vec![
        CoachMessage {
            id: 1,
            kind: CoachMessageKind::Motivation,
            message: "🔥 Seven days strong! Your consistency is building real momentum."
                .to_string(),
            timestamp: "Earlier today".to_string(),
            has_action: false,
            action_text: None,
        },
        CoachMessage {
            id: 2,
            kind: CoachMessageKind::Adjustment,
            message: "I noticed you skipped yesterday's networking task. Want to try a \
                      different approach? Maybe coffee chats work better than cold emails \
                      for you."
                .to_string(),
            timestamp: "Yesterday".to_string(),
            has_action: true,
            action_text: Some("Adjust Strategy".to_string()),
        },
        CoachMessage {
            id: 3,
            kind: CoachMessageKind::Celebration,
            message: "Nice work on that case study draft! 🎉 You're ahead of schedule on \
                      your PM goal."
                .to_string(),
            timestamp: "2 days ago".to_string(),
            has_action: false,
            action_text: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_one_message_per_kind() {
        let messages = CoachService::new().messages();
        assert_eq!(messages.len(), 3);
        assert!(messages
            .iter()
            .any(|m| m.kind == CoachMessageKind::Motivation));
        assert!(messages
            .iter()
            .any(|m| m.kind == CoachMessageKind::Adjustment));
        assert!(messages
            .iter()
            .any(|m| m.kind == CoachMessageKind::Celebration));
    }

    #[test]
    fn only_adjustments_carry_an_action() {
        let messages = CoachService::new().messages();
        for message in messages {
            assert_eq!(message.has_action, message.action_text.is_some());
        }
    }
}

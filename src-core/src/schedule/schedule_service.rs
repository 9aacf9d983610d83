use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;
use std::sync::Arc;

use crate::schedule::schedule_errors::ScheduleError;
use crate::schedule::schedule_model::ScheduleDay;
use crate::schedule::schedule_provider::ScheduleProviderTrait;

lazy_static! {
    static ref FENCED_JSON: Regex = Regex::new(r"```json\n([\s\S]+?)```").unwrap();
}

pub struct ScheduleService {
    provider: Arc<dyn ScheduleProviderTrait>,
}

impl ScheduleService {
    pub fn new(provider: Arc<dyn ScheduleProviderTrait>) -> Self {
        ScheduleService { provider }
    }

    /// Builds the coaching prompt, sends it to the text-generation
    /// collaborator and parses the reply into a weekly schedule.
    pub async fn generate_schedule(
        &self,
        user: &Value,
        goals: &[Value],
    ) -> Result<Vec<ScheduleDay>, ScheduleError> {
        let prompt = build_prompt(user, goals)?;
        let reply = self.provider.complete(&prompt).await?;
        parse_schedule_reply(&reply)
    }
}

fn build_prompt(user: &Value, goals: &[Value]) -> Result<String, ScheduleError> {
    let user_json = serde_json::to_string_pretty(user)
        .map_err(|e| ScheduleError::InvalidInput(e.to_string()))?;
    let goals_json = serde_json::to_string_pretty(goals)
        .map_err(|e| ScheduleError::InvalidInput(e.to_string()))?;

    Ok(format!(
        r#"
You're an AI productivity coach. Based on this user's profile and goals, generate a personalized weekly schedule.

User:
{}

Goals:
{}

Format your response as JSON with:
[
  {{
    "day": "Monday",
    "tasks": [
      {{ "time": "09:00", "activity": "Deep work on main goal" }}
    ]
  }}
]
"#,
        user_json, goals_json
    ))
}

/// Parses the model reply: a direct JSON array first, then the contents of a
/// fenced ```json block, otherwise a terminal parse error.
pub fn parse_schedule_reply(text: &str) -> Result<Vec<ScheduleDay>, ScheduleError> {
    if let Ok(schedule) = serde_json::from_str::<Vec<ScheduleDay>>(text) {
        return Ok(schedule);
    }

    if let Some(captures) = FENCED_JSON.captures(text) {
        let inner = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
        return serde_json::from_str::<Vec<ScheduleDay>>(inner)
            .map_err(|e| ScheduleError::Parse(e.to_string()));
    }

    Err(ScheduleError::Parse(
        "reply is neither valid JSON nor a fenced json block".to_string(),
    ))
}

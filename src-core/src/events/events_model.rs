use chrono::{NaiveDate, NaiveTime};
use diesel::prelude::*;
use diesel::Queryable;
use diesel::Selectable;
use serde::{Deserialize, Serialize};

use crate::cache::Keyed;
use crate::errors::{Result, ValidationError};

/// Calendar event kinds, each mapped to a fixed display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    #[default]
    Custom,
    Birthday,
    Meeting,
    Task,
}

impl EventType {
    pub fn color(&self) -> &'static str {
        match self {
            EventType::Custom => "#6b7280",
            EventType::Birthday => "#f59e0b",
            EventType::Meeting => "#06b6d4",
            EventType::Task => "#8b5cf6",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Custom => "custom",
            EventType::Birthday => "birthday",
            EventType::Meeting => "meeting",
            EventType::Task => "task",
        }
    }
}

/// Recurrence label; stored with the event, never expanded into instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Recurrence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Recurrence::None => "none",
            Recurrence::Daily => "daily",
            Recurrence::Weekly => "weekly",
            Recurrence::Monthly => "monthly",
            Recurrence::Yearly => "yearly",
        }
    }
}

#[derive(
    Queryable,
    Identifiable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::events)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    pub start_time: String,
    pub end_time: Option<String>,
    pub all_day: bool,
    pub color: String,
    pub event_type: String,
    pub recurrence: String,
    pub user_id: String,
    pub deleted: bool,
}

#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::events)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub id: Option<String>,
    pub title: String,
    pub start_time: String,
    pub end_time: Option<String>,
    pub all_day: bool,
    pub color: String,
    pub event_type: String,
    pub recurrence: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub deleted: bool,
}

/// Form payload collected by the event modal: a date plus optional wall-clock
/// times, turned into stored start/end strings on save.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    pub title: String,
    pub date: String,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default, rename = "type")]
    pub event_type: EventType,
    #[serde(default)]
    pub recurrence: Recurrence,
    #[serde(default)]
    pub user_id: String,
}

impl EventDraft {
    /// Validates the form fields and computes the stored representation.
    /// An event with no start time is an all-day event and keeps the bare
    /// date as its start string.
    pub fn into_new_event(self) -> Result<NewEvent> {
        let time = normalize(self.time);
        let end_time = normalize(self.end_time);

        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingField("title".to_string()).into());
        }
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").map_err(|_| {
            ValidationError::InvalidInput(format!("invalid date '{}'", self.date))
        })?;
        for value in [&time, &end_time].into_iter().flatten() {
            NaiveTime::parse_from_str(value, "%H:%M").map_err(|_| {
                ValidationError::InvalidInput(format!("invalid time '{}'", value))
            })?;
        }

        let start_time = match &time {
            Some(t) => format!("{}T{}", self.date, t),
            None => self.date.clone(),
        };
        let end_time = end_time.map(|t| format!("{}T{}", self.date, t));
        let all_day = time.is_none();

        Ok(NewEvent {
            id: None,
            title: self.title,
            start_time,
            end_time,
            all_day,
            color: self.event_type.color().to_string(),
            event_type: self.event_type.as_str().to_string(),
            recurrence: self.recurrence.as_str().to_string(),
            user_id: self.user_id,
            deleted: false,
        })
    }
}

fn normalize(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// Initial form values derived from a stored event (click-to-edit).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventForm {
    pub id: String,
    pub title: String,
    pub date: String,
    pub time: String,
    pub end_time: String,
    pub event_type: String,
}

impl EventForm {
    pub fn from_event(event: &Event) -> Self {
        let (date, time) = split_date_time(&event.start_time);
        let end_time = event
            .end_time
            .as_deref()
            .map(|s| split_date_time(s).1)
            .unwrap_or_default();
        EventForm {
            id: event.id.clone(),
            title: event.title.clone(),
            date,
            time,
            end_time,
            event_type: event.event_type.clone(),
        }
    }
}

/// Splits an ISO-ish timestamp on the date/time separator. An absent time
/// component yields an empty time string (all-day).
fn split_date_time(value: &str) -> (String, String) {
    match value.split_once('T') {
        Some((date, time)) => (date.to_string(), time.chars().take(5).collect()),
        None => (value.to_string(), String::new()),
    }
}

impl Keyed for Event {
    fn key(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(date: &str, time: Option<&str>) -> EventDraft {
        EventDraft {
            title: "Team sync".to_string(),
            date: date.to_string(),
            time: time.map(str::to_string),
            end_time: None,
            event_type: EventType::Meeting,
            recurrence: Recurrence::None,
            user_id: "u1".to_string(),
        }
    }

    #[test]
    fn draft_without_time_becomes_all_day() {
        let new_event = draft("2024-01-10", None).into_new_event().unwrap();
        assert!(new_event.all_day);
        assert_eq!(new_event.start_time, "2024-01-10");
        assert_eq!(new_event.end_time, None);
    }

    #[test]
    fn draft_with_time_keeps_wall_clock_start() {
        let new_event = draft("2024-01-10", Some("09:00")).into_new_event().unwrap();
        assert!(!new_event.all_day);
        assert_eq!(new_event.start_time, "2024-01-10T09:00");
    }

    #[test]
    fn empty_time_string_counts_as_all_day() {
        let mut d = draft("2024-01-10", None);
        d.time = Some(String::new());
        let new_event = d.into_new_event().unwrap();
        assert!(new_event.all_day);
        assert_eq!(new_event.start_time, "2024-01-10");
    }

    #[test]
    fn type_color_mapping_is_fixed() {
        let new_event = draft("2024-01-10", None).into_new_event().unwrap();
        assert_eq!(new_event.color, "#06b6d4");
        assert_eq!(new_event.event_type, "meeting");
        assert_eq!(EventType::Custom.color(), "#6b7280");
        assert_eq!(EventType::Birthday.color(), "#f59e0b");
        assert_eq!(EventType::Task.color(), "#8b5cf6");
    }

    #[test]
    fn bad_date_and_time_are_rejected() {
        assert!(draft("tomorrow", None).into_new_event().is_err());
        assert!(draft("2024-01-10", Some("9am")).into_new_event().is_err());
    }

    #[test]
    fn form_derivation_splits_on_separator() {
        let event = Event {
            id: "e1".to_string(),
            title: "Dentist".to_string(),
            start_time: "2024-01-10T09:00".to_string(),
            end_time: Some("2024-01-10T10:30".to_string()),
            all_day: false,
            color: "#6b7280".to_string(),
            event_type: "custom".to_string(),
            recurrence: "none".to_string(),
            user_id: "u1".to_string(),
            deleted: false,
        };
        let form = EventForm::from_event(&event);
        assert_eq!(form.date, "2024-01-10");
        assert_eq!(form.time, "09:00");
        assert_eq!(form.end_time, "10:30");
    }

    #[test]
    fn form_derivation_for_all_day_event_has_empty_time() {
        let event = Event {
            id: "e1".to_string(),
            title: "Holiday".to_string(),
            start_time: "2024-01-10".to_string(),
            end_time: None,
            all_day: true,
            color: "#6b7280".to_string(),
            event_type: "custom".to_string(),
            recurrence: "none".to_string(),
            user_id: "u1".to_string(),
            deleted: false,
        };
        let form = EventForm::from_event(&event);
        assert_eq!(form.date, "2024-01-10");
        assert_eq!(form.time, "");
        assert_eq!(form.end_time, "");
    }
}

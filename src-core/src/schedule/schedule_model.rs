use serde::{Deserialize, Serialize};

/// One scheduled activity slot within a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSlot {
    pub time: String,
    pub activity: String,
}

/// A single day of the generated weekly schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleDay {
    pub day: String,
    pub tasks: Vec<ScheduleSlot>,
}

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::io::document::Stored;

/// A completable, point-in-time item. `end_date` acts as the due date.
///
/// Field names are camelCase on disk to match the document format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Opaque unique id, assigned at creation, immutable.
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    #[serde(default)]
    pub completed: bool,
}

/// An interval-bound occurrence. No completion state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
}

/// A task as submitted for creation, before an id is assigned.
#[derive(Debug, Clone)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub completed: bool,
}

/// An event as submitted for creation, before an id is assigned.
#[derive(Debug, Clone)]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
}

impl Stored for Task {
    type Draft = TaskDraft;

    fn from_draft(draft: TaskDraft, id: String) -> Self {
        Task {
            id,
            title: draft.title,
            description: draft.description,
            start_date: draft.start_date,
            end_date: draft.end_date,
            completed: draft.completed,
        }
    }

    fn id(&self) -> &str {
        &self.id
    }
}

impl Stored for Event {
    type Draft = EventDraft;

    fn from_draft(draft: EventDraft, id: String) -> Self {
        Event {
            id,
            title: draft.title,
            description: draft.description,
            start_date: draft.start_date,
            end_date: draft.end_date,
        }
    }

    fn id(&self) -> &str {
        &self.id
    }
}

/// Which item kind a command targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Task,
    Event,
}

impl ItemKind {
    /// Document filename for this kind inside the data directory.
    pub fn document_name(self) -> &'static str {
        match self {
            ItemKind::Task => "tasks.json",
            ItemKind::Event => "events.json",
        }
    }
}

/// A kind-tagged item to create. Resolved to the matching document once,
/// at the repository boundary.
#[derive(Debug, Clone)]
pub enum ItemDraft {
    Task(TaskDraft),
    Event(EventDraft),
}

/// A kind-tagged stored item.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Task(Task),
    Event(Event),
}

impl Item {
    pub fn kind(&self) -> ItemKind {
        match self {
            Item::Task(_) => ItemKind::Task,
            Item::Event(_) => ItemKind::Event,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Item::Task(task) => &task.id,
            Item::Event(event) => &event.id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Item::Task(task) => &task.title,
            Item::Event(event) => &event.title,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn task_serializes_with_camel_case_iso_dates() {
        let task = Task {
            id: "abc".into(),
            title: "Pay rent".into(),
            description: String::new(),
            start_date: at(2024, 3, 1, 9, 0),
            end_date: at(2024, 3, 1, 9, 0),
            completed: false,
        };
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["startDate"], "2024-03-01T09:00:00");
        assert_eq!(json["endDate"], "2024-03-01T09:00:00");
        assert_eq!(json["completed"], false);
    }

    #[test]
    fn task_description_and_completed_default_when_missing() {
        let json = r#"{
            "id": "t1",
            "title": "Minimal",
            "startDate": "2024-03-01T09:00:00",
            "endDate": "2024-03-01T09:00:00"
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.description, "");
        assert!(!task.completed);
    }

    #[test]
    fn event_document_has_no_completed_field() {
        let event = Event {
            id: "e1".into(),
            title: "Conference".into(),
            description: String::new(),
            start_date: at(2024, 3, 1, 0, 0),
            end_date: at(2024, 3, 3, 0, 0),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert!(json.get("completed").is_none());
    }

    #[test]
    fn draft_keeps_all_fields_when_id_is_attached() {
        let draft = TaskDraft {
            title: "Pay rent".into(),
            description: "first of the month".into(),
            start_date: at(2024, 3, 1, 9, 0),
            end_date: at(2024, 3, 1, 9, 0),
            completed: false,
        };
        let task = Task::from_draft(draft, "id-1".into());
        assert_eq!(task.id, "id-1");
        assert_eq!(task.title, "Pay rent");
        assert_eq!(task.description, "first of the month");
    }
}
